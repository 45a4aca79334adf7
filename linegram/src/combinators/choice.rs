//! Ordered and longest-match choice

use crate::parsers::{BoxedParser, ParseResult, Parser};
use crate::stream::Stream;
use crate::values::ValueMap;

fn describe_all(name: &str, parsers: &[BoxedParser]) -> String {
    let parts: Vec<String> = parsers.iter().map(|p| p.describe()).collect();
    format!("{}[{}]", name, parts.join(" | "))
}

// ============================================================================
// ORDERED CHOICE
// ============================================================================

/// First alternative to match, in declaration order
#[derive(Debug, Clone)]
pub struct Or {
    alternatives: Vec<BoxedParser>,
    values: ValueMap,
}

impl Or {
    pub fn new(alternatives: Vec<BoxedParser>) -> Self {
        Self {
            alternatives,
            values: ValueMap::new(),
        }
    }
}

impl Parser for Or {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        for alternative in &mut self.alternatives {
            if alternative.parse(stream)? {
                self.values = alternative.values().clone();
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn box_clone(&self) -> BoxedParser {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        describe_all("Or", &self.alternatives)
    }
}

// ============================================================================
// GREEDY CHOICE
// ============================================================================

/// Alternative consuming the most input; ties go to the earliest declared
#[derive(Debug, Clone)]
pub struct Greedy {
    alternatives: Vec<BoxedParser>,
    values: ValueMap,
}

impl Greedy {
    pub fn new(alternatives: Vec<BoxedParser>) -> Self {
        Self {
            alternatives,
            values: ValueMap::new(),
        }
    }
}

impl Parser for Greedy {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        let start = stream.position();
        let mut best: Option<(usize, usize)> = None;
        for (index, alternative) in self.alternatives.iter_mut().enumerate() {
            if !alternative.parse(stream)? {
                continue;
            }
            let end = stream.position();
            if best.map_or(true, |(_, best_end)| end > best_end) {
                best = Some((index, end));
            }
            stream.rewind_to(start);
        }

        let Some((index, end)) = best else {
            return Ok(false);
        };
        stream.seek(end)?;
        self.values = self.alternatives[index].values().clone();
        Ok(true)
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn box_clone(&self) -> BoxedParser {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        describe_all("Greedy", &self.alternatives)
    }
}
