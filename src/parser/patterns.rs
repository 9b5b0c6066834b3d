//! Catalogue of recognized tag shapes.
//!
//! Each entry knows how to match at one exact byte offset. The scanner walks
//! candidate offsets left to right and tries the enabled entries in table
//! order, so the earliest match wins and ties go to the entry listed first.

use super::attributes::Attributes;

pub(crate) const THINKING_OPEN: &str = "<antThinking>";
pub(crate) const THINKING_CLOSE: &str = "</antThinking>";
pub(crate) const ARTIFACT_OPEN: &str = "<antArtifact";
pub(crate) const ARTIFACT_CLOSE: &str = "</antArtifact>";

pub(crate) const TOOL_CALL: &str = "tool_call";
pub(crate) const TOOL_RESPONSE: &str = "tool_response";
pub(crate) const TOOL_CALL_END: &str = "tool_call_end";
pub(crate) const TOOL_CALL_ERROR: &str = "tool_call_error";
pub(crate) const LIMIT_REACHED: &str = "maximum_tool_calls_reached";

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagKind {
    ThinkingClosed,
    ThinkingUnclosed,
    ArtifactClosed,
    ArtifactUnclosed,
    ToolStart,
    ToolResponse,
    ToolEnd,
    ToolError,
    LimitReached,
}

/// A pattern table entry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TagPattern {
    pub name: &'static str,
    pub kind: TagKind,
    /// Skipped while the message is still generating
    pub suppressed_while_streaming: bool,
}

pub(crate) const PATTERNS: [TagPattern; 9] = [
    TagPattern { name: "thinking-closed", kind: TagKind::ThinkingClosed, suppressed_while_streaming: false },
    TagPattern { name: "thinking-unclosed", kind: TagKind::ThinkingUnclosed, suppressed_while_streaming: false },
    TagPattern { name: "artifact-closed", kind: TagKind::ArtifactClosed, suppressed_while_streaming: false },
    TagPattern { name: "artifact-unclosed", kind: TagKind::ArtifactUnclosed, suppressed_while_streaming: false },
    TagPattern { name: "tool-call-start", kind: TagKind::ToolStart, suppressed_while_streaming: true },
    TagPattern { name: "tool-call-response", kind: TagKind::ToolResponse, suppressed_while_streaming: true },
    TagPattern { name: "tool-call-end", kind: TagKind::ToolEnd, suppressed_while_streaming: true },
    TagPattern { name: "tool-call-error", kind: TagKind::ToolError, suppressed_while_streaming: true },
    TagPattern { name: "limit-reached", kind: TagKind::LimitReached, suppressed_while_streaming: true },
];

/// Tool-family tag names, in the order boundaries are searched.
pub(crate) const TOOL_TAG_NAMES: [&str; 5] = [
    TOOL_RESPONSE,
    TOOL_CALL_END,
    TOOL_CALL_ERROR,
    TOOL_CALL,
    LIMIT_REACHED,
];

/// Where a pattern matched in the buffer. All offsets are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagMatch<'a> {
    pub kind: TagKind,
    /// Offset of the opening `<`
    pub start: usize,
    /// Raw attribute text of the opening tag
    pub attrs: &'a str,
    /// Body span for content tags: up to the closing delimiter when closed,
    /// to the end of the buffer when unclosed
    pub body: (usize, usize),
    /// Offset just past the whole construct
    pub end: usize,
}

impl<'a> TagMatch<'a> {
    pub fn body(&self, buffer: &'a str) -> &'a str {
        &buffer[self.body.0..self.body.1]
    }

    pub fn attributes(&self) -> Attributes {
        Attributes::parse(self.attrs)
    }
}

impl TagPattern {
    /// Try to match this pattern with its `<` exactly at `pos`
    pub fn match_at<'a>(&self, buffer: &'a str, pos: usize) -> Option<TagMatch<'a>> {
        match self.kind {
            TagKind::ThinkingClosed | TagKind::ThinkingUnclosed => {
                if !buffer[pos..].starts_with(THINKING_OPEN) {
                    return None;
                }
                let open_end = pos + THINKING_OPEN.len();
                self.content_match(buffer, pos, open_end, "", THINKING_CLOSE)
            }
            TagKind::ArtifactClosed | TagKind::ArtifactUnclosed => {
                let (attrs, open_end) = artifact_opening(buffer, pos)?;
                self.content_match(buffer, pos, open_end, attrs, ARTIFACT_CLOSE)
            }
            TagKind::ToolStart => tool_tag_at(buffer, pos, TOOL_CALL, self.kind),
            TagKind::ToolResponse => tool_tag_at(buffer, pos, TOOL_RESPONSE, self.kind),
            TagKind::ToolEnd => tool_tag_at(buffer, pos, TOOL_CALL_END, self.kind),
            TagKind::ToolError => tool_tag_at(buffer, pos, TOOL_CALL_ERROR, self.kind),
            TagKind::LimitReached => tool_tag_at(buffer, pos, LIMIT_REACHED, self.kind),
        }
    }

    fn content_match<'a>(
        &self,
        buffer: &'a str,
        start: usize,
        open_end: usize,
        attrs: &'a str,
        close: &str,
    ) -> Option<TagMatch<'a>> {
        let closing = buffer[open_end..].find(close).map(|i| open_end + i);
        let closed = matches!(self.kind, TagKind::ThinkingClosed | TagKind::ArtifactClosed);

        let (body, end) = match (closed, closing) {
            (true, Some(close_at)) => ((open_end, close_at), close_at + close.len()),
            (false, None) => ((open_end, buffer.len()), buffer.len()),
            _ => return None,
        };

        Some(TagMatch {
            kind: self.kind,
            start,
            attrs,
            body,
            end,
        })
    }
}

/// `<antArtifact` WS ATTRS `>`; returns the attribute text and the offset
/// past `>`
fn artifact_opening(buffer: &str, pos: usize) -> Option<(&str, usize)> {
    let rest = buffer[pos..].strip_prefix(ARTIFACT_OPEN)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let gt = rest.find('>')?;
    let attrs_start = pos + ARTIFACT_OPEN.len();
    Some((
        buffer[attrs_start..attrs_start + gt].trim_start(),
        attrs_start + gt + 1,
    ))
}

/// `<name>` or `<name` WS ATTRS `>`
fn tool_tag_at<'a>(buffer: &'a str, pos: usize, name: &str, kind: TagKind) -> Option<TagMatch<'a>> {
    let rest = buffer[pos..].strip_prefix('<')?.strip_prefix(name)?;
    let name_end = pos + 1 + name.len();

    let (attrs, open_end) = if rest.starts_with('>') {
        ("", name_end + 1)
    } else if rest.starts_with(char::is_whitespace) {
        let gt = rest.find('>')?;
        (buffer[name_end..name_end + gt].trim_start(), name_end + gt + 1)
    } else {
        return None;
    };

    Some(TagMatch {
        kind,
        start: pos,
        attrs,
        body: (open_end, open_end),
        end: open_end,
    })
}

/// Offset of the next tool-family tag at or after `from`, or the buffer
/// length when there is none
pub(crate) fn next_tool_boundary(buffer: &str, from: usize) -> usize {
    buffer[from..]
        .match_indices('<')
        .map(|(i, _)| from + i)
        .find(|&at| {
            TOOL_TAG_NAMES
                .iter()
                .any(|name| tool_tag_at(buffer, at, name, TagKind::ToolStart).is_some())
        })
        .unwrap_or(buffer.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(kind: TagKind) -> TagPattern {
        PATTERNS.into_iter().find(|p| p.kind == kind).unwrap()
    }

    #[test]
    fn test_table_order_puts_closed_forms_first() {
        let names: Vec<&str> = PATTERNS.iter().map(|p| p.name).collect();
        assert_eq!(names[0], "thinking-closed");
        assert_eq!(names[1], "thinking-unclosed");
        assert_eq!(names[2], "artifact-closed");
        assert_eq!(names[3], "artifact-unclosed");
        assert!(PATTERNS[4..].iter().all(|p| p.suppressed_while_streaming));
        assert!(PATTERNS[..4].iter().all(|p| !p.suppressed_while_streaming));
    }

    #[test]
    fn test_thinking_closed_and_unclosed_are_exclusive() {
        let closed = "<antThinking>hmm</antThinking>";
        assert!(pattern(TagKind::ThinkingClosed).match_at(closed, 0).is_some());
        assert!(pattern(TagKind::ThinkingUnclosed).match_at(closed, 0).is_none());

        let open = "<antThinking>hmm";
        assert!(pattern(TagKind::ThinkingClosed).match_at(open, 0).is_none());
        let m = pattern(TagKind::ThinkingUnclosed).match_at(open, 0).unwrap();
        assert_eq!(m.body(open), "hmm");
        assert_eq!(m.end, open.len());
    }

    #[test]
    fn test_artifact_opening_requires_whitespace_and_gt() {
        let p = pattern(TagKind::ArtifactUnclosed);
        assert!(p.match_at("<antArtifact>body", 0).is_none());
        assert!(p.match_at(r#"<antArtifact identifier="a""#, 0).is_none());

        let buf = "<antArtifact\n  title=\"T\">body";
        let m = p.match_at(buf, 0).unwrap();
        assert_eq!(m.attrs, "title=\"T\"");
        assert_eq!(m.body(buf), "body");
    }

    #[test]
    fn test_closed_artifact_spans_to_first_close() {
        let buf = r#"<antArtifact type="text/html">a</antArtifact>b</antArtifact>"#;
        let m = pattern(TagKind::ArtifactClosed).match_at(buf, 0).unwrap();
        assert_eq!(m.body(buf), "a");
        assert_eq!(&buf[m.end..], "b</antArtifact>");
    }

    #[test]
    fn test_tool_tag_name_must_end_at_boundary() {
        let start = pattern(TagKind::ToolStart);
        assert!(start.match_at("<tool_call_end>", 0).is_none());
        assert!(start.match_at("<tool_calls>", 0).is_none());
        assert!(start.match_at("<tool_call", 0).is_none());

        let buf = r#"<tool_call name="x">rest"#;
        let m = start.match_at(buf, 0).unwrap();
        assert_eq!(m.attrs, r#"name="x""#);
        assert_eq!(&buf[m.end..], "rest");

        let end = pattern(TagKind::ToolEnd).match_at("<tool_call_end>", 0).unwrap();
        assert_eq!(end.attrs, "");
        assert_eq!(end.end, "<tool_call_end>".len());
    }

    #[test]
    fn test_next_tool_boundary() {
        let buf = "abc <b>x</b> <tool_response> z";
        assert_eq!(next_tool_boundary(buf, 0), 13);
        assert_eq!(next_tool_boundary("no tags here", 0), 12);
        assert_eq!(next_tool_boundary("x <maximum_tool_calls_reached>", 1), 2);
    }
}
