//! Optional match

use crate::parsers::{BoxedParser, ParseResult, Parser};
use crate::stream::Stream;
use crate::values::ValueMap;

/// Always matches; exposes the wrapped parser's values only when it matched
#[derive(Debug, Clone)]
pub struct Optional {
    inner: BoxedParser,
    values: ValueMap,
}

impl Optional {
    pub fn new(inner: BoxedParser) -> Self {
        Self {
            inner,
            values: ValueMap::new(),
        }
    }
}

impl Parser for Optional {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();
        if self.inner.parse(stream)? {
            self.values = self.inner.values().clone();
        }
        Ok(true)
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn box_clone(&self) -> BoxedParser {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        format!("Optional({})", self.inner.describe())
    }
}
