//! Whitespace, line and end-of-input parsers

use super::{BoxedParser, ParseResult, Parser, RewindGuard};
use crate::stream::{Stream, StreamResult, LINE_SEPARATOR};
use crate::values::ValueMap;

/// Characters skipped as blanks: space, tab and carriage return
pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

/// Consume blanks, returning how many were skipped
pub fn skip_blanks(stream: &mut Stream) -> StreamResult<usize> {
    let mut count = 0;
    while stream.good() && is_blank(stream.peek()?) {
        stream.get()?;
        count += 1;
    }
    Ok(count)
}

/// Declares a capture-free parser with an empty value map
macro_rules! unit_parser {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            values: ValueMap,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}

unit_parser!(
    /// Skips blanks; always matches
    Blanks
);
unit_parser!(
    /// Skips through the next line separator, or to end of input; always matches
    SkipLine
);
unit_parser!(
    /// Matches optional blanks followed by a line separator
    Eol
);
unit_parser!(
    /// Matches only at end of input
    Eof
);

impl Parser for Blanks {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        skip_blanks(stream)?;
        Ok(true)
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn box_clone(&self) -> BoxedParser {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        "Blanks".to_string()
    }
}

impl Parser for SkipLine {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        while stream.good() {
            if stream.get()? == LINE_SEPARATOR {
                break;
            }
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
        "SkipLine".to_string()
    }
}

impl Parser for Eol {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        let mut guard = RewindGuard::new(stream);
        skip_blanks(&mut guard)?;
        if guard.good() && guard.peek()? == LINE_SEPARATOR {
            guard.get()?;
            guard.commit();
            return Ok(true);
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
        "Eol".to_string()
    }
}

impl Parser for Eof {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        Ok(stream.eof())
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn box_clone(&self) -> BoxedParser {
        Box::new(self.clone())
    }

    fn describe(&self) -> String {
        "Eof".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::test_support::run;

    #[test]
    fn test_blanks_always_match() {
        let mut parser = Blanks::new();
        assert_eq!(run(&mut parser, " \t\r x"), (true, "x".to_string()));
        assert_eq!(run(&mut parser, "x"), (true, "x".to_string()));
        assert_eq!(run(&mut parser, "\n"), (true, "\n".to_string()));
        assert!(parser.values().is_empty());
    }

    #[test]
    fn test_skip_line_consumes_separator() {
        let mut parser = SkipLine::new();
        assert_eq!(run(&mut parser, "junk 1 2\nnext"), (true, "next".to_string()));
        assert_eq!(run(&mut parser, "no newline"), (true, String::new()));
        assert_eq!(run(&mut parser, ""), (true, String::new()));
    }

    #[test]
    fn test_eol() {
        let mut parser = Eol::new();
        assert_eq!(run(&mut parser, "  \r\nnext"), (true, "next".to_string()));
        assert_eq!(run(&mut parser, "  x\n"), (false, "  x\n".to_string()));
        assert_eq!(run(&mut parser, "   "), (false, "   ".to_string()));
    }

    #[test]
    fn test_eol_advances_line() {
        let mut stream = Stream::new("a \nb");
        stream.get().unwrap();
        assert!(Eol::new().parse(&mut stream).unwrap());
        assert_eq!((stream.line(), stream.column()), (2, 1));
    }

    #[test]
    fn test_eof() {
        let mut parser = Eof::new();
        assert!(run(&mut parser, "").0);
        assert_eq!(run(&mut parser, " "), (false, " ".to_string()));
    }
}
