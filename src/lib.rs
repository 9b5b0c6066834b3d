//! Tagstream
//!
//! This crate turns the text a language model streams for one chat message
//! into an ordered list of typed render blocks. The text embeds pseudo-markup
//! for thinking, artifacts (code, markdown, SVG, diagrams, components) and a
//! multi-tag tool-call lifecycle, and it is usually observed mid-generation,
//! so tags are often incomplete.
//!
//! ## Usage
//!
//! ```rust
//! use tagstream::{parse, Block, GenerationStatus};
//!
//! let buffer = r#"Here you go <antArtifact identifier="a" title="T" type="text/markdown">Hi"#;
//!
//! // While streaming, the unclosed artifact is reported as loading
//! let result = parse(buffer, GenerationStatus::Generating);
//! assert_eq!(result.len(), 2);
//! assert!(result.is_loading());
//!
//! // Once closed it converges to the same metadata with loading=false
//! let done = parse(&format!("{buffer}</antArtifact>"), GenerationStatus::Complete);
//! let artifact = done.blocks()[1].as_artifact().unwrap();
//! assert_eq!(artifact.identifier, "a");
//! assert!(!artifact.loading);
//! ```
//!
//! ## Core Principles
//!
//! 1. **Stateless**: every call re-parses the full buffer; nothing carries over
//! 2. **Tolerant**: malformed or unknown markup degrades to text, never an error
//! 3. **Ordered**: blocks appear in the order their first tag appears
//! 4. **Status-gated tool tags**: tool tags are only interpreted once the
//!    message is complete

// ============================================================================
// Blocks and Errors
// ============================================================================

pub mod block;
pub mod config;
pub mod error;

pub use block::{
    ArtifactBlock, ArtifactKind, Block, GenerationStatus, ParseResult, TextBlock, ThinkingBlock,
    ToolCallBlock, ToolCallStatus,
};
pub use config::{ParserConfig, DEFAULT_LIMIT_REACHED_MESSAGE};
pub use error::{Error, Result};

// ============================================================================
// Parser
// ============================================================================

pub mod parser;
pub use parser::{parse, Attributes, BlockParser};

// ============================================================================
// Streaming Support (optional feature)
// ============================================================================

#[cfg(feature = "streaming")]
pub mod streaming;
#[cfg(feature = "streaming")]
pub use streaming::{StreamChunk, StreamingBlockParser};

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_drives_parse() {
        let buf = r#"<tool_call_end name="y">"#;

        let status: GenerationStatus = "loading".parse().unwrap();
        assert_eq!(parse(buf, status).blocks(), &[Block::text(buf)]);

        let status: GenerationStatus = "success".parse().unwrap();
        let result = parse(buf, status);
        assert_eq!(result.blocks()[0].as_tool_call().unwrap().name.as_deref(), Some("y"));
    }

    #[test]
    fn test_parser_from_json_config() {
        let config = ParserConfig::from_json(r#"{"limit_reached_message": "Too many tools"}"#).unwrap();
        let parser = BlockParser::new(config);

        let result = parser.parse("a <maximum_tool_calls_reached>", GenerationStatus::Complete);
        assert_eq!(result.blocks(), &[Block::text("a"), Block::text("Too many tools")]);
        assert_eq!(parser.config().limit_reached_message, "Too many tools");
    }

    #[test]
    fn test_result_ownership_transfers_to_caller() {
        let result = parse("<antThinking>x</antThinking> y", GenerationStatus::Complete);
        let blocks: Vec<Block> = result.into_iter().collect();
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::Thinking(_)));
    }
}
