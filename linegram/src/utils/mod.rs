//! Shared utility types used across the stream, parsers and logging.

pub mod position;

pub use position::Position;
