//! Sequencing

use crate::parsers::utility::skip_blanks;
use crate::parsers::{BoxedParser, ParseResult, Parser, RewindGuard};
use crate::stream::Stream;
use crate::values::ValueMap;

/// Runs sub-parsers strictly in order; any failure restores the stream.
///
/// Values are merged in declaration order, so a later sub-parser wins when
/// two capture under the same identifier.
#[derive(Debug, Clone)]
pub struct And {
    parsers: Vec<BoxedParser>,
    skip_blanks: bool,
    values: ValueMap,
}

impl And {
    pub fn new(parsers: Vec<BoxedParser>) -> Self {
        Self {
            parsers,
            skip_blanks: false,
            values: ValueMap::new(),
        }
    }

    /// Skip blanks before each sub-parser
    pub fn skip_blanks(mut self, skip: bool) -> Self {
        self.skip_blanks = skip;
        self
    }
}

impl Parser for And {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        let mut guard = RewindGuard::new(stream);
        for parser in &mut self.parsers {
            if self.skip_blanks {
                skip_blanks(&mut guard)?;
            }
            if !parser.parse(&mut guard)? {
                return Ok(false);
            }
        }
        guard.commit();

        for parser in &self.parsers {
            self.values.merge(parser.values());
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
        let parts: Vec<String> = self.parsers.iter().map(|p| p.describe()).collect();
        format!("And[{}]", parts.join(", "))
    }
}
