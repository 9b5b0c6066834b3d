//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Text of the block emitted for `<maximum_tool_calls_reached>`
pub const DEFAULT_LIMIT_REACHED_MESSAGE: &str = "Maximum tool calls reached";

/// Tunables for [`BlockParser`](crate::BlockParser).
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Content of the text block emitted for the limit-reached marker
    pub limit_reached_message: String,
    /// Recognize tool tags even while the message is still generating
    pub parse_tool_tags_while_generating: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            limit_reached_message: DEFAULT_LIMIT_REACHED_MESSAGE.to_string(),
            parse_tool_tags_while_generating: false,
        }
    }
}

impl ParserConfig {
    /// Load and validate a config from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit_reached_message.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "limit_reached_message must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the limit-reached message
    pub fn with_limit_reached_message(mut self, message: impl Into<String>) -> Self {
        self.limit_reached_message = message.into();
        self
    }

    /// Enable or disable tool tag recognition during generation
    pub fn with_tool_tags_while_generating(mut self, enabled: bool) -> Self {
        self.parse_tool_tags_while_generating = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.limit_reached_message, "Maximum tool calls reached");
        assert!(!config.parse_tool_tags_while_generating);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ParserConfig::from_json(r#"{"parse_tool_tags_while_generating": true}"#).unwrap();
        assert!(config.parse_tool_tags_while_generating);
        assert_eq!(config.limit_reached_message, DEFAULT_LIMIT_REACHED_MESSAGE);
    }

    #[test]
    fn test_from_json_rejects_blank_message() {
        let err = ParserConfig::from_json(r#"{"limit_reached_message": "   "}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ParserConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
