//! linegram: backtracking parser combinators and a state-graph driver for
//! line-oriented text formats.
//!
//! Parsers read from a [`Stream`], either matching (and capturing values
//! under string identifiers) or leaving the stream exactly where it was.
//! Combinators build larger parsers out of smaller ones, [`Rule`] allows
//! recursion, and a [`StateGraph`] strings line parsers together into a
//! whole-file grammar.

// Internal modules
#[macro_use]
pub mod logging;
pub mod combinators;
pub mod config;
pub mod grammar;
pub mod parsers;
pub mod stream;
pub mod utils;
pub mod values;

// Re-export key types for library consumers
pub use grammar::{
    GrammarError, GrammarHandler, GrammarResult, StateController, StateGraph, StateGraphBuilder,
};
pub use parsers::{BoxedParser, ParseError, ParseResult, Parser, Rule};
pub use stream::{Stream, StreamError, StreamResult};
pub use utils::Position;
pub use values::{Scalar, Value, ValueError, ValueMap, ValueResult};
