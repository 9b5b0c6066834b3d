//! Type definitions for streamed input.

use serde::{Deserialize, Serialize};

/// Streamed piece of model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamChunk {
    /// Text delta appended to the buffer
    Text(String),
    /// Generation finished
    Done,
}
