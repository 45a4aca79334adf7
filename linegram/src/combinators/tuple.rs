//! Delimited tuples

use crate::parsers::utility::skip_blanks;
use crate::parsers::{BoxedParser, Chars, ParseResult, Parser, RewindGuard};
use crate::stream::Stream;
use crate::values::{Scalar, Value, ValueMap};

/// `begin value (separator value)* end`, captured as one list.
///
/// Each value contributes its captures to the list under the tuple's
/// identifier, element by element. Within one element the named captures
/// come in identifier order and unnamed ones are left out; an element with
/// only unnamed captures contributes those. List captures are spliced in.
///
/// With a fixed arity the number of values must match it exactly; without
/// one, at least one value is required. A round where neither the value nor
/// the separator consumes input ends the list and is not counted.
#[derive(Debug, Clone)]
pub struct Tuple {
    id: String,
    begin: BoxedParser,
    value: BoxedParser,
    separator: BoxedParser,
    end: BoxedParser,
    arity: Option<usize>,
    skip_blanks: bool,
    values: ValueMap,
}

/// Append one element's captures to `items` in identifier order
fn collect_element(values: &ValueMap, items: &mut Vec<Scalar>) {
    let mut ids = values.ids();
    if ids.iter().any(|id| !id.is_empty()) {
        ids.retain(|id| !id.is_empty());
    }
    for id in ids {
        match values.get(id) {
            Ok(Value::Scalar(scalar)) => items.push(scalar.clone()),
            Ok(Value::List(scalars)) => items.extend(scalars.iter().cloned()),
            Err(_) => {}
        }
    }
}

impl Tuple {
    pub fn new(
        id: &str,
        begin: BoxedParser,
        value: BoxedParser,
        separator: BoxedParser,
        end: BoxedParser,
    ) -> Self {
        Self {
            id: id.to_string(),
            begin,
            value,
            separator,
            end,
            arity: None,
            skip_blanks: false,
            values: ValueMap::new(),
        }
    }

    /// `(v, v, ...)` with the usual punctuation
    pub fn parenthesized(id: &str, value: BoxedParser) -> Self {
        Self::new(
            id,
            Box::new(Chars::constant("", "(")),
            value,
            Box::new(Chars::constant("", ",")),
            Box::new(Chars::constant("", ")")),
        )
    }

    /// Require exactly `arity` values
    pub fn arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Skip blanks around every token
    pub fn skip_blanks(mut self, skip: bool) -> Self {
        self.skip_blanks = skip;
        self
    }

    fn blanks(&self, stream: &mut Stream) -> ParseResult<()> {
        if self.skip_blanks {
            skip_blanks(stream)?;
        }
        Ok(())
    }
}

impl Parser for Tuple {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        let mut guard = RewindGuard::new(stream);
        self.blanks(&mut guard)?;
        if !self.begin.parse(&mut guard)? {
            return Ok(false);
        }

        let mut items: Vec<Scalar> = Vec::new();
        let mut count = 0;
        loop {
            self.blanks(&mut guard)?;
            let value_start = guard.position();
            if !self.value.parse(&mut guard)? {
                break;
            }
            let value_end = guard.position();

            self.blanks(&mut guard)?;
            let separator_start = guard.position();
            let separated = self.separator.parse(&mut guard)?;

            if value_end == value_start && guard.position() == separator_start {
                guard.rewind_to(value_start);
                break;
            }

            count += 1;
            collect_element(self.value.values(), &mut items);
            if !separated {
                break;
            }
        }

        self.blanks(&mut guard)?;
        if !self.end.parse(&mut guard)? {
            return Ok(false);
        }

        let arity_ok = match self.arity {
            Some(arity) => count == arity,
            None => count >= 1,
        };
        if !arity_ok {
            return Ok(false);
        }

        self.values.insert_list(&self.id, items);
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
        let arity = self
            .arity
            .map(|a| a.to_string())
            .unwrap_or_else(|| "+".to_string());
        format!(
            "Tuple<{}>({} {} {} {})",
            arity,
            self.begin.describe(),
            self.value.describe(),
            self.separator.describe(),
            self.end.describe()
        )
    }
}
