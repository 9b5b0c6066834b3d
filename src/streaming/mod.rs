//! Streaming driver for the block parser.
//!
//! This module keeps the growing message buffer for the caller and re-parses
//! it as chunks arrive, so each snapshot reflects everything received so far.

mod accumulator;
mod types;

pub use accumulator::StreamingBlockParser;
pub use types::StreamChunk;
