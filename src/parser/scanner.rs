//! Earliest-match tokenizer over the buffer.

use super::patterns::{TagMatch, TagPattern, PATTERNS};

/// Finds the next recognized tag at or after a cursor.
///
/// Candidates are the `<` positions in the remainder; at each one the
/// enabled patterns are tried in table order.
#[derive(Debug)]
pub(crate) struct Scanner<'a> {
    buffer: &'a str,
    patterns: Vec<TagPattern>,
}

impl<'a> Scanner<'a> {
    pub fn new(buffer: &'a str, tool_tags_enabled: bool) -> Self {
        let patterns = PATTERNS
            .iter()
            .filter(|p| tool_tags_enabled || !p.suppressed_while_streaming)
            .copied()
            .collect();
        Self { buffer, patterns }
    }

    pub fn next_match(&self, pos: usize) -> Option<TagMatch<'a>> {
        self.buffer[pos..]
            .match_indices('<')
            .map(|(i, _)| pos + i)
            .find_map(|at| {
                self.patterns.iter().find_map(|pattern| {
                    let found = pattern.match_at(self.buffer, at)?;
                    tracing::trace!(pattern = pattern.name, offset = at, "tag matched");
                    Some(found)
                })
            })
    }
}
