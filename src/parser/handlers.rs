//! Per-family tag handlers and the block list they build.

use tracing::debug;

use super::patterns::{next_tool_boundary, TagKind, TagMatch};
use crate::block::{ArtifactBlock, ArtifactKind, Block, GenerationStatus, ToolCallBlock, ToolCallStatus};

/// Ordered output of one parse pass plus the open tool-call session.
///
/// Handlers append or mutate blocks; they never reorder them.
#[derive(Debug)]
pub(crate) struct BlockBuilder<'a> {
    buffer: &'a str,
    status: GenerationStatus,
    limit_reached_message: &'a str,
    blocks: Vec<Block>,
    /// Index of the tool call that response/end/error tags route to
    current_tool_call: Option<usize>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(buffer: &'a str, status: GenerationStatus, limit_reached_message: &'a str) -> Self {
        Self {
            buffer,
            status,
            limit_reached_message,
            blocks: Vec::new(),
            current_tool_call: None,
        }
    }

    /// Emit trimmed text, skipping it when empty
    pub fn push_text(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.blocks.push(Block::text(text));
        }
    }

    /// Dispatch a matched tag; returns the new cursor position
    pub fn handle(&mut self, tag: TagMatch<'a>) -> usize {
        match tag.kind {
            TagKind::ThinkingClosed | TagKind::ThinkingUnclosed => self.thinking(&tag),
            TagKind::ArtifactClosed | TagKind::ArtifactUnclosed => self.artifact(&tag),
            TagKind::ToolStart => self.tool_start(&tag),
            TagKind::ToolResponse => self.tool_response(&tag),
            TagKind::ToolEnd => self.tool_finish(&tag, ToolCallStatus::Ended),
            TagKind::ToolError => self.tool_finish(&tag, ToolCallStatus::Errored),
            TagKind::LimitReached => {
                self.blocks.push(Block::text(self.limit_reached_message));
                tag.end
            }
        }
    }

    pub fn finish(self) -> Vec<Block> {
        self.blocks
    }

    fn unclosed_loading(&self, kind: TagKind) -> bool {
        matches!(kind, TagKind::ThinkingUnclosed | TagKind::ArtifactUnclosed)
            && self.status.is_generating()
    }

    fn thinking(&mut self, tag: &TagMatch<'a>) -> usize {
        let loading = self.unclosed_loading(tag.kind);
        self.blocks
            .push(Block::thinking(tag.body(self.buffer).trim(), loading));
        tag.end
    }

    fn artifact(&mut self, tag: &TagMatch<'a>) -> usize {
        let attrs = tag.attributes();
        let kind = match attrs.get("type").filter(|t| !t.is_empty()) {
            None => ArtifactKind::default(),
            Some(mime) => ArtifactKind::from_mime(mime).unwrap_or_else(|| {
                debug!(mime, "unknown artifact type, rendering as markdown");
                ArtifactKind::default()
            }),
        };

        self.blocks.push(Block::Artifact(ArtifactBlock {
            content: tag.body(self.buffer).trim().to_string(),
            loading: self.unclosed_loading(tag.kind),
            identifier: attrs.get("identifier").unwrap_or_default().to_string(),
            title: attrs.get("title").unwrap_or_default().to_string(),
            kind,
            language: attrs.get("language").map(str::to_string),
        }));
        tag.end
    }

    /// Text after a tool tag up to the next tool-family tag; returns it with
    /// the boundary offset
    fn tool_segment(&self, tag: &TagMatch<'a>) -> (&'a str, usize) {
        let buffer = self.buffer;
        let boundary = next_tool_boundary(buffer, tag.end);
        (buffer[tag.end..boundary].trim(), boundary)
    }

    /// Open tool call that has not reached a terminal state
    fn open_tool_call(&mut self) -> Option<&mut ToolCallBlock> {
        let index = self.current_tool_call?;
        match self.blocks.get_mut(index) {
            Some(Block::ToolCall(call)) if !call.status.is_terminal() => Some(call),
            _ => None,
        }
    }

    fn tool_start(&mut self, tag: &TagMatch<'a>) -> usize {
        if let Some(previous) = self.open_tool_call() {
            debug!(
                name = previous.name.as_deref().unwrap_or_default(),
                status = %previous.status,
                "tool call superseded before it finished"
            );
        }

        let attrs = tag.attributes();
        let (content, boundary) = self.tool_segment(tag);
        self.blocks.push(Block::ToolCall(
            ToolCallBlock::calling(content)
                .with_name(attrs.get_non_empty("name"))
                .with_error(attrs.get_non_empty("error")),
        ));
        self.current_tool_call = Some(self.blocks.len() - 1);
        boundary
    }

    fn tool_response(&mut self, tag: &TagMatch<'a>) -> usize {
        let attrs = tag.attributes();
        let (content, boundary) = self.tool_segment(tag);

        let Some(call) = self.open_tool_call() else {
            debug!(offset = tag.start, "dropping tool response with no open call");
            return tag.end;
        };

        call.content.push('\n');
        call.content.push_str(content);
        call.status = ToolCallStatus::Responded;
        if let Some(name) = attrs.get_non_empty("name") {
            call.name = Some(name);
        }
        if let Some(error) = attrs.get_non_empty("error") {
            call.error = Some(error);
        }
        boundary
    }

    fn tool_finish(&mut self, tag: &TagMatch<'a>, status: ToolCallStatus) -> usize {
        let attrs = tag.attributes();

        match self.open_tool_call() {
            Some(call) => {
                call.loading = false;
                call.status = status;
                if let Some(name) = attrs.get_non_empty("name") {
                    call.name = Some(name);
                }
                if let Some(error) = attrs.get_non_empty("error") {
                    call.error = Some(error);
                }
            }
            None => {
                debug!(offset = tag.start, %status, "synthesizing tool call for orphan terminal tag");
                self.blocks.push(Block::ToolCall(
                    ToolCallBlock::terminal(status)
                        .with_name(attrs.get_non_empty("name"))
                        .with_error(attrs.get_non_empty("error")),
                ));
                self.current_tool_call = Some(self.blocks.len() - 1);
            }
        }
        tag.end
    }
}
