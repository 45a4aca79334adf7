//! Parser contract and leaf parsers
//!
//! A parser attempts a match at the current stream position:
//!
//! - `Ok(true)`: matched; the stream sits after the consumed text and
//!   [`Parser::values`] exposes what was captured.
//! - `Ok(false)`: no match; the stream is exactly where it was.
//! - `Err(_)`: a usage or configuration error that must not be backtracked.
//!
//! Values are cleared when a parse starts and filled only when it succeeds.

pub mod chars;
pub mod error;
pub mod guard;
pub mod numeric;
pub mod rule;
pub mod utility;

use crate::stream::Stream;
use crate::values::ValueMap;
use std::fmt::Debug;

pub use chars::{
    Alphanumeric, CharValidator, Chars, Constant, FnValidator, Identifier, OneOf,
};
pub use error::{ParseError, ParseResult};
pub use guard::RewindGuard;
pub use numeric::{Float, SignedInt, UnsignedInt};
pub use rule::{Rule, RuleRef};
pub use utility::{Blanks, Eof, Eol, SkipLine};

/// Owned, clonable handle to any parser
pub type BoxedParser = Box<dyn Parser>;

pub trait Parser: Debug {
    /// Attempt a match at the current position of `stream`
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool>;

    /// Values captured by the last successful parse
    fn values(&self) -> &ValueMap;

    /// Deep copy, including the captured values
    fn box_clone(&self) -> BoxedParser;

    /// Short human-readable description used in logs and errors
    fn describe(&self) -> String;
}

impl Clone for BoxedParser {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
