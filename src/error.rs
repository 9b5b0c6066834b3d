use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown generation status: {0}")]
    InvalidStatus(String),

    #[error("invalid parser config: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
