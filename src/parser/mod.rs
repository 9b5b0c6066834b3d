//! Stream block parser.
//!
//! Turns one (possibly still growing) message buffer into ordered render
//! blocks. Every call rebuilds the result from scratch: the scanner finds
//! the earliest recognized tag past the cursor, any text before it becomes
//! a text block, and the tag's handler emits or updates a block and moves
//! the cursor forward.

mod attributes;
mod handlers;
mod patterns;
mod scanner;

pub use attributes::Attributes;

use crate::block::{GenerationStatus, ParseResult};
use crate::config::ParserConfig;
use handlers::BlockBuilder;
use scanner::Scanner;

/// Parser for tagged LLM output.
///
/// Holds only configuration; it is cheap to share and every call is
/// independent.
#[derive(Debug, Clone, Default)]
pub struct BlockParser {
    config: ParserConfig,
}

impl BlockParser {
    /// Create a parser with the given config
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `content` into blocks.
    ///
    /// Tool tags are left as plain text while `status` is
    /// [`GenerationStatus::Generating`], unless the config enables them.
    pub fn parse(&self, content: &str, status: GenerationStatus) -> ParseResult {
        let tool_tags = !status.is_generating() || self.config.parse_tool_tags_while_generating;
        let scanner = Scanner::new(content, tool_tags);
        let mut builder = BlockBuilder::new(content, status, &self.config.limit_reached_message);

        let mut pos = 0;
        while pos < content.len() {
            let Some(tag) = scanner.next_match(pos) else {
                builder.push_text(&content[pos..]);
                break;
            };

            if tag.start > pos {
                builder.push_text(&content[pos..tag.start]);
            }

            let next = builder.handle(tag);
            debug_assert!(next > pos, "cursor must advance");
            pos = next;
        }

        ParseResult::new(builder.finish(), content)
    }
}

/// Parse with the default configuration
pub fn parse(content: &str, status: GenerationStatus) -> ParseResult {
    BlockParser::default().parse(content, status)
}
