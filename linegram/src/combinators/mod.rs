//! Parser combinators
//!
//! Every combinator owns its sub-parsers and honours the parser contract:
//! a failed match leaves the stream where it started. The free functions
//! below build boxed combinators for terse grammar definitions.

pub mod choice;
pub mod negation;
pub mod optional;
pub mod repeat;
pub mod sequence;
pub mod tuple;

pub use choice::{Greedy, Or};
pub use negation::Not;
pub use optional::Optional;
pub use repeat::Repeat;
pub use sequence::And;
pub use tuple::Tuple;

use crate::parsers::BoxedParser;

/// Sequence, optionally skipping blanks before each element
pub fn and(parsers: Vec<BoxedParser>, skip_blanks: bool) -> BoxedParser {
    Box::new(And::new(parsers).skip_blanks(skip_blanks))
}

/// Ordered choice
pub fn or(alternatives: Vec<BoxedParser>) -> BoxedParser {
    Box::new(Or::new(alternatives))
}

/// Longest-match choice
pub fn greedy(alternatives: Vec<BoxedParser>) -> BoxedParser {
    Box::new(Greedy::new(alternatives))
}

/// Text up to the first match of `parser`
pub fn not(id: &str, parser: BoxedParser) -> BoxedParser {
    Box::new(Not::new(id, parser))
}

pub fn optional(parser: BoxedParser) -> BoxedParser {
    Box::new(Optional::new(parser))
}

/// Between `min` and `max` repetitions (`None` for no upper bound)
pub fn repeat(parser: BoxedParser, min: usize, max: Option<usize>) -> BoxedParser {
    Box::new(Repeat::new(parser, min, max))
}

/// Delimited list; `arity` of `None` accepts any non-zero count
pub fn tuple(
    id: &str,
    begin: BoxedParser,
    value: BoxedParser,
    separator: BoxedParser,
    end: BoxedParser,
    arity: Option<usize>,
    skip_blanks: bool,
) -> BoxedParser {
    let tuple = Tuple::new(id, begin, value, separator, end).skip_blanks(skip_blanks);
    match arity {
        Some(arity) => Box::new(tuple.arity(arity)),
        None => Box::new(tuple),
    }
}
