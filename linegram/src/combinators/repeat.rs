//! Bounded repetition

use crate::config::compile_time::parsers::MAX_REPEAT_COUNT;
use crate::logging::codes;
use crate::parsers::{BoxedParser, ParseError, ParseResult, Parser, RewindGuard};
use crate::stream::Stream;
use crate::values::ValueMap;
use crate::log_error;

/// Applies the wrapped parser until it fails or `max` is reached.
///
/// Matches when the count lies in `[min, max]` (`max = None` is unbounded).
/// Each identifier captured by the wrapped parser becomes a list holding
/// one element per repetition. A repetition that consumes nothing ends the
/// loop.
#[derive(Debug, Clone)]
pub struct Repeat {
    inner: BoxedParser,
    min: usize,
    max: Option<usize>,
    values: ValueMap,
}

impl Repeat {
    pub fn new(inner: BoxedParser, min: usize, max: Option<usize>) -> Self {
        Self {
            inner,
            min,
            max,
            values: ValueMap::new(),
        }
    }

    /// Zero or more
    pub fn any(inner: BoxedParser) -> Self {
        Self::new(inner, 0, None)
    }

    /// One or more
    pub fn at_least_one(inner: BoxedParser) -> Self {
        Self::new(inner, 1, None)
    }

    /// Exactly `count`
    pub fn exactly(inner: BoxedParser, count: usize) -> Self {
        Self::new(inner, count, Some(count))
    }

    fn check_bounds(&self) -> ParseResult<()> {
        match self.max {
            Some(max) if max < self.min => {
                let error = ParseError::InvalidBounds { min: self.min, max };
                log_error!(error.error_code(), "Repetition bounds are inconsistent",
                    "min" => self.min,
                    "max" => max
                );
                Err(error)
            }
            _ => Ok(()),
        }
    }
}

impl Parser for Repeat {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();
        self.check_bounds()?;

        let mut guard = RewindGuard::new(stream);
        let mut collected = ValueMap::new();
        let mut count = 0;
        loop {
            match self.max {
                Some(max) if count >= max => break,
                None if count >= MAX_REPEAT_COUNT => {
                    let error = ParseError::RepeatLimit {
                        parser: self.inner.describe(),
                        limit: MAX_REPEAT_COUNT,
                    };
                    log_error!(codes::parser::REPEAT_LIMIT_EXCEEDED, "Unbounded repetition limit reached",
                        position = guard.location(),
                        "parser" => self.inner.describe(),
                        "limit" => MAX_REPEAT_COUNT
                    );
                    return Err(error);
                }
                _ => {}
            }

            let before = guard.position();
            if !self.inner.parse(&mut guard)? {
                break;
            }
            count += 1;
            for (id, value) in self.inner.values() {
                collected.append(id, value);
            }
            if guard.position() == before {
                break;
            }
        }

        if count < self.min {
            return Ok(false);
        }

        self.values = collected;
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
        match self.max {
            Some(max) => format!("Repeat{{{},{}}}({})", self.min, max, self.inner.describe()),
            None => format!("Repeat{{{},}}({})", self.min, self.inner.describe()),
        }
    }
}
