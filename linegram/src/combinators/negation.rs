//! Negation

use crate::parsers::{BoxedParser, ParseResult, Parser, RewindGuard};
use crate::stream::Stream;
use crate::values::{Scalar, ValueMap};

/// Consumes characters up to the first position where the wrapped parser
/// would match, or to end of input. The consumed text is the value.
///
/// Matches only if at least one character was consumed.
#[derive(Debug, Clone)]
pub struct Not {
    id: String,
    inner: BoxedParser,
    values: ValueMap,
}

impl Not {
    pub fn new(id: &str, inner: BoxedParser) -> Self {
        Self {
            id: id.to_string(),
            inner,
            values: ValueMap::new(),
        }
    }
}

impl Parser for Not {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        let mut guard = RewindGuard::new(stream);
        let mut text = String::new();
        while guard.good() {
            let mark = guard.position();
            if self.inner.parse(&mut guard)? {
                guard.rewind_to(mark);
                break;
            }
            text.push(guard.get()?);
        }

        if text.is_empty() {
            return Ok(false);
        }

        self.values.insert(&self.id, Scalar::new(text));
        guard.commit();
        Ok(true)
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn box_clone(&self) -> BoxedParser {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        format!("Not({})", self.inner.describe())
    }
}
