//! Position-tracked, backtrackable character stream
//!
//! Every parser reads through a [`Stream`]. Failed matches restore the
//! cursor with [`Stream::rewind_to`], which keeps the line bookkeeping in step
//! with the absolute position.

pub mod char_stream;
pub mod error;
pub mod source;

pub use char_stream::{Stream, LINE_SEPARATOR};
pub use error::{StreamError, StreamResult};
