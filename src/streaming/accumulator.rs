//! Streaming buffer accumulator.

use super::types::StreamChunk;
use crate::block::{GenerationStatus, ParseResult};
use crate::parser::BlockParser;

/// Accumulates streamed text and parses the buffer on demand.
///
/// The parser keeps no state between calls, so every snapshot re-parses the
/// whole buffer from the start.
#[derive(Debug, Default)]
pub struct StreamingBlockParser {
    parser: BlockParser,
    buffer: String,
    done: bool,
}

impl StreamingBlockParser {
    /// Create a new accumulator with the default parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new accumulator around a configured parser
    pub fn with_parser(parser: BlockParser) -> Self {
        Self {
            parser,
            buffer: String::new(),
            done: false,
        }
    }

    /// Process a single chunk; returns true once the stream is done
    pub fn process_chunk(&mut self, chunk: StreamChunk) -> bool {
        match chunk {
            StreamChunk::Text(text) => {
                if self.done {
                    tracing::debug!(len = text.len(), "ignoring text after stream completion");
                } else {
                    self.buffer.push_str(&text);
                }
            }
            StreamChunk::Done => self.done = true,
        }
        self.done
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn status(&self) -> GenerationStatus {
        if self.done {
            GenerationStatus::Complete
        } else {
            GenerationStatus::Generating
        }
    }

    /// Parse the buffer as it stands
    pub fn snapshot(&self) -> ParseResult {
        self.parser.parse(&self.buffer, self.status())
    }

    /// Parse the buffer as final, whether or not `Done` was seen
    pub fn finish(self) -> ParseResult {
        self.parser.parse(&self.buffer, GenerationStatus::Complete)
    }

    /// Accumulate an entire stream and return the final blocks
    pub async fn accumulate_stream<S, E>(stream: S) -> Result<ParseResult, E>
    where
        S: futures_util::Stream<Item = Result<StreamChunk, E>> + Unpin,
    {
        Self::accumulate_stream_with(stream, |_| {}).await
    }

    /// Accumulate an entire stream, handing a fresh snapshot to `on_update`
    /// after every text chunk
    pub async fn accumulate_stream_with<S, E, F>(mut stream: S, mut on_update: F) -> Result<ParseResult, E>
    where
        S: futures_util::Stream<Item = Result<StreamChunk, E>> + Unpin,
        F: FnMut(&ParseResult),
    {
        use futures_util::StreamExt;

        let mut accumulator = Self::new();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            if accumulator.process_chunk(chunk) {
                break;
            }
            on_update(&accumulator.snapshot());
        }

        Ok(accumulator.finish())
    }
}
