//! Integer and floating-point parsers

use super::{BoxedParser, ParseResult, Parser, RewindGuard};
use crate::stream::{Stream, StreamResult};
use crate::values::{Scalar, ValueMap};

/// Consume a run of ASCII digits into `text`, returning how many were read
pub(crate) fn read_digits(stream: &mut Stream, text: &mut String) -> StreamResult<usize> {
    let mut count = 0;
    while stream.good() && stream.peek()?.is_ascii_digit() {
        text.push(stream.get()?);
        count += 1;
    }
    Ok(count)
}

/// Consume a leading `+` or `-` into `text`
fn read_sign(stream: &mut Stream, text: &mut String) -> StreamResult<bool> {
    if stream.good() && matches!(stream.peek()?, '+' | '-') {
        text.push(stream.get()?);
        return Ok(true);
    }
    Ok(false)
}

// ============================================================================
// UNSIGNED INTEGER
// ============================================================================

/// Maximal run of ASCII digits captured as `u64`
#[derive(Debug, Clone, Default)]
pub struct UnsignedInt {
    id: String,
    values: ValueMap,
}

impl UnsignedInt {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            values: ValueMap::new(),
        }
    }
}

impl Parser for UnsignedInt {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        let mut guard = RewindGuard::new(stream);
        let mut text = String::new();
        if read_digits(&mut guard, &mut text)? == 0 {
            return Ok(false);
        }

        // Overflow is a non-match like any other
        let Ok(number) = text.parse::<u64>() else {
            return Ok(false);
        };

        self.values.insert(&self.id, Scalar::new(number));
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
        format!("UnsignedInt({})", self.id)
    }
}

// ============================================================================
// SIGNED INTEGER
// ============================================================================

/// Optionally signed run of ASCII digits captured as `i64`
#[derive(Debug, Clone, Default)]
pub struct SignedInt {
    id: String,
    values: ValueMap,
}

impl SignedInt {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            values: ValueMap::new(),
        }
    }
}

impl Parser for SignedInt {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        let mut guard = RewindGuard::new(stream);
        let mut text = String::new();
        read_sign(&mut guard, &mut text)?;
        if read_digits(&mut guard, &mut text)? == 0 {
            return Ok(false);
        }

        let Ok(number) = text.parse::<i64>() else {
            return Ok(false);
        };

        self.values.insert(&self.id, Scalar::new(number));
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
        format!("SignedInt({})", self.id)
    }
}

// ============================================================================
// FLOAT
// ============================================================================

/// Floating-point number captured as `f64`.
///
/// Accepts `[sign] (digits ['.' digits] | '.' digits) [exponent]` where the
/// exponent marker is one of `E e D d`. An exponent without digits is left
/// unconsumed; a mantissa without digits is no match at all.
#[derive(Debug, Clone, Default)]
pub struct Float {
    id: String,
    values: ValueMap,
}

impl Float {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            values: ValueMap::new(),
        }
    }

    fn scan(stream: &mut Stream) -> StreamResult<Option<String>> {
        let mut sign = String::new();
        read_sign(stream, &mut sign)?;

        let mut integer = String::new();
        read_digits(stream, &mut integer)?;

        let mut fraction = String::new();
        if stream.good() && stream.peek()? == '.' {
            stream.get()?;
            read_digits(stream, &mut fraction)?;
        }

        if integer.is_empty() && fraction.is_empty() {
            return Ok(None);
        }

        let mut exponent = String::new();
        if stream.good() && matches!(stream.peek()?, 'E' | 'e' | 'D' | 'd') {
            let mark = stream.position();
            stream.get()?;
            read_sign(stream, &mut exponent)?;
            if read_digits(stream, &mut exponent)? == 0 {
                exponent.clear();
                stream.rewind_to(mark);
            }
        }

        let mut canonical = format!(
            "{}{}.{}",
            sign,
            if integer.is_empty() { "0" } else { integer.as_str() },
            if fraction.is_empty() { "0" } else { fraction.as_str() },
        );
        if !exponent.is_empty() {
            canonical.push('E');
            canonical.push_str(&exponent);
        }
        Ok(Some(canonical))
    }
}

impl Parser for Float {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        let mut guard = RewindGuard::new(stream);
        let Some(canonical) = Self::scan(&mut guard)? else {
            return Ok(false);
        };
        let Ok(number) = canonical.parse::<f64>() else {
            return Ok(false);
        };

        self.values.insert(&self.id, Scalar::new(number));
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
        format!("Float({})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::test_support::run;

    fn float_of(text: &str) -> Option<(f64, String)> {
        let mut parser = Float::new("x");
        let (matched, rest) = run(&mut parser, text);
        matched.then(|| (*parser.values().get_as::<f64>("x").unwrap(), rest))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0),
            "{} != {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_unsigned_int() {
        let mut parser = UnsignedInt::new("n");
        let (matched, rest) = run(&mut parser, "123 rest");
        assert!(matched);
        assert_eq!(rest, " rest");
        assert_eq!(*parser.values().get_as::<u64>("n").unwrap(), 123);
    }

    #[test]
    fn test_unsigned_int_rejects_sign_and_letters() {
        let mut parser = UnsignedInt::new("n");
        assert_eq!(run(&mut parser, "-1"), (false, "-1".to_string()));
        assert_eq!(run(&mut parser, "x1"), (false, "x1".to_string()));
        assert_eq!(run(&mut parser, ""), (false, String::new()));
        assert!(parser.values().is_empty());
    }

    #[test]
    fn test_unsigned_int_overflow_is_no_match() {
        let mut parser = UnsignedInt::new("n");
        let text = "18446744073709551616";
        assert_eq!(run(&mut parser, text), (false, text.to_string()));
        assert!(run(&mut parser, "18446744073709551615").0);
    }

    #[test]
    fn test_signed_int() {
        let mut parser = SignedInt::new("");
        assert!(run(&mut parser, "-123").0);
        assert_eq!(*parser.values().get_as::<i64>("").unwrap(), -123);
        assert!(run(&mut parser, "+7,").0);
        assert_eq!(*parser.values().get_as::<i64>("").unwrap(), 7);
    }

    #[test]
    fn test_signed_int_sign_without_digits_rewinds() {
        let mut parser = SignedInt::new("");
        assert_eq!(run(&mut parser, "- 1"), (false, "- 1".to_string()));
        assert_eq!(run(&mut parser, "+"), (false, "+".to_string()));
    }

    #[test]
    fn test_float_plain() {
        let (value, rest) = float_of("12.3").unwrap();
        assert_close(value, 12.3);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_float_drops_exponent_without_digits() {
        let (value, rest) = float_of(".12E+abc").unwrap();
        assert_close(value, 0.12);
        assert_eq!(rest, "E+abc");
    }

    #[test]
    fn test_float_signed_exponent() {
        let (value, rest) = float_of("-.12E-01").unwrap();
        assert_close(value, -0.012);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_float_exponent_stops_at_letters() {
        let (value, rest) = float_of(".12E1abc").unwrap();
        assert_close(value, 1.2);
        assert_eq!(rest, "abc");
    }

    #[test]
    fn test_float_fortran_exponent() {
        let (value, _) = float_of("+1.D2").unwrap();
        assert_close(value, 100.0);
        let (value, _) = float_of("2.5d-1").unwrap();
        assert_close(value, 0.25);
    }

    #[test]
    fn test_float_integer_forms() {
        let (value, rest) = float_of("42 ").unwrap();
        assert_close(value, 42.0);
        assert_eq!(rest, " ");
        let (value, rest) = float_of("7.").unwrap();
        assert_close(value, 7.0);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_float_without_mantissa_digits_consumes_nothing() {
        let mut stream = Stream::new("+.E");
        let mut parser = Float::new("x");
        assert!(!parser.parse(&mut stream).unwrap());
        assert_eq!(stream.get().unwrap(), '+');
        assert_eq!(stream.get().unwrap(), '.');
        assert_eq!(stream.get().unwrap(), 'E');
        assert!(parser.values().is_empty());
    }

    #[test]
    fn test_values_reset_on_failure() {
        let mut parser = Float::new("x");
        assert!(run(&mut parser, "1.5").0);
        assert!(!run(&mut parser, "abc").0);
        assert!(parser.values().is_empty());
    }
}
