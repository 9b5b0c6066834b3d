//! Render blocks - the stable output of a parse pass.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Whether the buffer is still growing.
///
/// Tool tags are only interpreted once the message is [`Complete`](Self::Complete).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// The model is still producing text for this message
    Generating,
    /// The buffer is final
    Complete,
}

impl GenerationStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Generating => "generating",
            Self::Complete => "complete",
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating)
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GenerationStatus {
    type Err = Error;

    /// Accepts the message-level status strings used by chat stores as well
    /// as the canonical names.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "generating" | "loading" | "pending" => Ok(Self::Generating),
            "complete" | "success" | "error" | "cancel" => Ok(Self::Complete),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Kind of self-contained document carried by an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Source code (`application/vnd.ant.code`)
    Code,
    /// Markdown document (`text/markdown`)
    #[default]
    Markdown,
    /// HTML page (`text/html`)
    Html,
    /// SVG image (`image/svg+xml`)
    Svg,
    /// Mermaid diagram (`application/vnd.ant.mermaid`)
    Diagram,
    /// React component (`application/vnd.ant.react`)
    InteractiveComponent,
}

impl ArtifactKind {
    /// MIME type used in the `type` attribute
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Code => "application/vnd.ant.code",
            Self::Markdown => "text/markdown",
            Self::Html => "text/html",
            Self::Svg => "image/svg+xml",
            Self::Diagram => "application/vnd.ant.mermaid",
            Self::InteractiveComponent => "application/vnd.ant.react",
        }
    }

    /// Map a `type` attribute value to a kind. Unknown values yield `None`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/vnd.ant.code" => Some(Self::Code),
            "text/markdown" => Some(Self::Markdown),
            "text/html" => Some(Self::Html),
            "image/svg+xml" => Some(Self::Svg),
            "application/vnd.ant.mermaid" => Some(Self::Diagram),
            "application/vnd.ant.react" => Some(Self::InteractiveComponent),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_mime())
    }
}

/// Lifecycle position of a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallStatus {
    /// Start tag seen, no response yet
    Calling,
    /// At least one response appended
    Responded,
    /// Finished successfully
    Ended,
    /// Finished with an error
    Errored,
}

impl ToolCallStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Calling => "calling",
            Self::Responded => "responded",
            Self::Ended => "ended",
            Self::Errored => "errored",
        }
    }

    /// Terminal states accept no further lifecycle tags
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Errored)
    }
}

impl std::fmt::Display for ToolCallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Plain text between or around recognized tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub content: String,
}

/// Model reasoning shown separately from the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingBlock {
    pub content: String,
    pub loading: bool,
}

/// A self-contained document with identifying metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactBlock {
    pub content: String,
    pub loading: bool,
    /// Stable identifier, empty when the tag carries none
    pub identifier: String,
    /// Display title, empty when the tag carries none
    pub title: String,
    pub kind: ArtifactKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// One tool invocation stitched together from its lifecycle tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallBlock {
    /// Call body followed by each response, newline-joined
    pub content: String,
    pub loading: bool,
    pub status: ToolCallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolCallBlock {
    /// Fresh call opened by a start tag
    pub fn calling(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            loading: true,
            status: ToolCallStatus::Calling,
            name: None,
            error: None,
        }
    }

    /// Call that exists only because of a terminal tag
    pub fn terminal(status: ToolCallStatus) -> Self {
        Self {
            content: String::new(),
            loading: false,
            status,
            name: None,
            error: None,
        }
    }

    /// Set name
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Set error
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }
}

/// A typed, renderable unit of parsed content.
///
/// Serializes with a `"type"` discriminator and the variant's fields
/// flattened beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Text(TextBlock),
    Thinking(ThinkingBlock),
    Artifact(ArtifactBlock),
    ToolCall(ToolCallBlock),
}

impl Block {
    /// Create a text block
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(TextBlock {
            content: content.into(),
        })
    }

    /// Create a thinking block
    pub fn thinking(content: impl Into<String>, loading: bool) -> Self {
        Self::Thinking(ThinkingBlock {
            content: content.into(),
            loading,
        })
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Text(b) => &b.content,
            Self::Thinking(b) => &b.content,
            Self::Artifact(b) => &b.content,
            Self::ToolCall(b) => &b.content,
        }
    }

    /// Text blocks are never loading
    pub fn is_loading(&self) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Thinking(b) => b.loading,
            Self::Artifact(b) => b.loading,
            Self::ToolCall(b) => b.loading,
        }
    }

    /// Discriminator used in the serialized form
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Thinking(_) => "thinking",
            Self::Artifact(_) => "artifact",
            Self::ToolCall(_) => "tool_call",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(b) => Some(&b.content),
            _ => None,
        }
    }

    pub fn as_artifact(&self) -> Option<&ArtifactBlock> {
        match self {
            Self::Artifact(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tool_call(&self) -> Option<&ToolCallBlock> {
        match self {
            Self::ToolCall(b) => Some(b),
            _ => None,
        }
    }
}

/// Ordered blocks produced by one parse pass. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParseResult {
    blocks: Vec<Block>,
}

impl ParseResult {
    /// Wrap a block list, substituting a single text block when it is empty
    pub(crate) fn new(blocks: Vec<Block>, fallback: &str) -> Self {
        if blocks.is_empty() {
            return Self {
                blocks: vec![Block::text(fallback.trim())],
            };
        }
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// True while any block is still waiting for its closing tag
    pub fn is_loading(&self) -> bool {
        self.blocks.iter().any(Block::is_loading)
    }

    /// Concatenate the text blocks only, separated by blank lines
    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(Block::as_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl IntoIterator for ParseResult {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseResult {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!("loading".parse::<GenerationStatus>().unwrap(), GenerationStatus::Generating);
        assert_eq!("generating".parse::<GenerationStatus>().unwrap(), GenerationStatus::Generating);
        assert_eq!("success".parse::<GenerationStatus>().unwrap(), GenerationStatus::Complete);
        assert_eq!("complete".parse::<GenerationStatus>().unwrap(), GenerationStatus::Complete);

        let err = "bogus".parse::<GenerationStatus>().unwrap_err();
        assert!(matches!(err, Error::InvalidStatus(ref s) if s == "bogus"));
    }

    #[test]
    fn test_artifact_kind_mime_mapping() {
        for kind in [
            ArtifactKind::Code,
            ArtifactKind::Markdown,
            ArtifactKind::Html,
            ArtifactKind::Svg,
            ArtifactKind::Diagram,
            ArtifactKind::InteractiveComponent,
        ] {
            assert_eq!(ArtifactKind::from_mime(kind.as_mime()), Some(kind));
        }
        assert_eq!(ArtifactKind::from_mime("text/plain"), None);
        assert_eq!(ArtifactKind::default(), ArtifactKind::Markdown);
    }

    #[test]
    fn test_tool_status_terminal() {
        assert!(!ToolCallStatus::Calling.is_terminal());
        assert!(!ToolCallStatus::Responded.is_terminal());
        assert!(ToolCallStatus::Ended.is_terminal());
        assert!(ToolCallStatus::Errored.is_terminal());
        assert_eq!(ToolCallStatus::Responded.to_string(), "responded");
    }

    #[test]
    fn test_text_block_serialization() {
        let json = serde_json::to_value(Block::text("Hello")).unwrap();

        // {"type":"text","content":"Hello"}
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"], "Hello");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_tool_call_block_skips_absent_fields() {
        let block = Block::ToolCall(ToolCallBlock::calling("args"));
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(json["type"], "tool_call");
        assert_eq!(json["status"], "calling");
        assert_eq!(json["loading"], true);
        assert!(json.get("name").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_artifact_block_serialization() {
        let block = Block::Artifact(ArtifactBlock {
            content: "fn main() {}".to_string(),
            loading: false,
            identifier: "demo".to_string(),
            title: "Demo".to_string(),
            kind: ArtifactKind::Code,
            language: Some("rust".to_string()),
        });
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(json["type"], "artifact");
        assert_eq!(json["kind"], "code");
        assert_eq!(json["language"], "rust");

        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_parse_result_fallback_is_never_empty() {
        let result = ParseResult::new(Vec::new(), "  raw  ");
        assert_eq!(result.len(), 1);
        assert_eq!(result.blocks()[0], Block::text("raw"));
        assert!(!result.is_empty());
    }

    #[test]
    fn test_parse_result_plain_text() {
        let result = ParseResult::new(
            vec![
                Block::text("one"),
                Block::thinking("hidden", false),
                Block::text("two"),
            ],
            "",
        );
        assert_eq!(result.to_plain_text(), "one\n\ntwo");
        assert!(!result.is_loading());
    }
}
