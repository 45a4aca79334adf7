//! Validator-driven character sequences

use super::{BoxedParser, ParseResult, Parser, RewindGuard};
use crate::stream::Stream;
use crate::values::{Scalar, ValueMap};
use std::fmt;
use std::rc::Rc;

/// Decides, one character at a time, whether a sequence keeps growing
pub trait CharValidator: fmt::Debug {
    /// Whether `c` extends `matched`
    fn accept(&self, matched: &str, c: char) -> bool;

    /// Whether `matched` is an acceptable final text
    fn complete(&self, _matched: &str) -> bool {
        true
    }

    fn box_clone(&self) -> Box<dyn CharValidator>;
}

impl Clone for Box<dyn CharValidator> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

// ============================================================================
// SHIPPED VALIDATORS
// ============================================================================

/// ASCII letters and digits
#[derive(Debug, Clone, Copy, Default)]
pub struct Alphanumeric;

impl CharValidator for Alphanumeric {
    fn accept(&self, _matched: &str, c: char) -> bool {
        c.is_ascii_alphanumeric()
    }

    fn box_clone(&self) -> Box<dyn CharValidator> {
        Box::new(*self)
    }
}

/// ASCII alphanumerics starting with a letter
#[derive(Debug, Clone, Copy, Default)]
pub struct Identifier;

impl CharValidator for Identifier {
    fn accept(&self, matched: &str, c: char) -> bool {
        if matched.is_empty() {
            c.is_ascii_alphabetic()
        } else {
            c.is_ascii_alphanumeric()
        }
    }

    fn box_clone(&self) -> Box<dyn CharValidator> {
        Box::new(*self)
    }
}

/// A fixed keyword, optionally matched without regard to ASCII case
#[derive(Debug, Clone)]
pub struct Constant {
    text: Vec<char>,
    case_insensitive: bool,
}

impl Constant {
    pub fn new(text: &str, case_insensitive: bool) -> Self {
        Self {
            text: text.chars().collect(),
            case_insensitive,
        }
    }
}

impl CharValidator for Constant {
    fn accept(&self, matched: &str, c: char) -> bool {
        match self.text.get(matched.chars().count()) {
            Some(&expected) if self.case_insensitive => expected.eq_ignore_ascii_case(&c),
            Some(&expected) => expected == c,
            None => false,
        }
    }

    fn complete(&self, matched: &str) -> bool {
        matched.chars().count() == self.text.len()
    }

    fn box_clone(&self) -> Box<dyn CharValidator> {
        Box::new(self.clone())
    }
}

/// Any character from a fixed set
#[derive(Debug, Clone)]
pub struct OneOf {
    set: Vec<char>,
}

impl OneOf {
    pub fn new(set: &str) -> Self {
        Self {
            set: set.chars().collect(),
        }
    }
}

impl CharValidator for OneOf {
    fn accept(&self, _matched: &str, c: char) -> bool {
        self.set.contains(&c)
    }

    fn box_clone(&self) -> Box<dyn CharValidator> {
        Box::new(self.clone())
    }
}

/// Closure-backed validator; every sequence it accepts is complete
#[derive(Clone)]
pub struct FnValidator {
    accept: Rc<dyn Fn(&str, char) -> bool>,
}

impl FnValidator {
    pub fn new<F>(accept: F) -> Self
    where
        F: Fn(&str, char) -> bool + 'static,
    {
        Self {
            accept: Rc::new(accept),
        }
    }
}

impl fmt::Debug for FnValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnValidator")
    }
}

impl CharValidator for FnValidator {
    fn accept(&self, matched: &str, c: char) -> bool {
        (self.accept)(matched, c)
    }

    fn box_clone(&self) -> Box<dyn CharValidator> {
        Box::new(self.clone())
    }
}

// ============================================================================
// CHARS PARSER
// ============================================================================

/// Longest run of characters a validator accepts, captured as `String`.
///
/// Matches when at least one character was accepted and the validator
/// reports the run complete.
#[derive(Debug, Clone)]
pub struct Chars {
    id: String,
    validator: Box<dyn CharValidator>,
    values: ValueMap,
}

impl Chars {
    pub fn new(id: &str, validator: Box<dyn CharValidator>) -> Self {
        Self {
            id: id.to_string(),
            validator,
            values: ValueMap::new(),
        }
    }

    pub fn alphanumeric(id: &str) -> Self {
        Self::new(id, Box::new(Alphanumeric))
    }

    pub fn identifier(id: &str) -> Self {
        Self::new(id, Box::new(Identifier))
    }

    /// Exact keyword
    pub fn constant(id: &str, text: &str) -> Self {
        Self::new(id, Box::new(Constant::new(text, false)))
    }

    /// Keyword ignoring ASCII case
    pub fn constant_nocase(id: &str, text: &str) -> Self {
        Self::new(id, Box::new(Constant::new(text, true)))
    }

    pub fn one_of(id: &str, set: &str) -> Self {
        Self::new(id, Box::new(OneOf::new(set)))
    }

    pub fn with_fn<F>(id: &str, accept: F) -> Self
    where
        F: Fn(&str, char) -> bool + 'static,
    {
        Self::new(id, Box::new(FnValidator::new(accept)))
    }
}

impl Parser for Chars {
    fn parse(&mut self, stream: &mut Stream) -> ParseResult<bool> {
        self.values.clear();

        let mut guard = RewindGuard::new(stream);
        let mut matched = String::new();
        while guard.good() {
            let c = guard.peek()?;
            if !self.validator.accept(&matched, c) {
                break;
            }
            guard.get()?;
            matched.push(c);
        }

        if matched.is_empty() || !self.validator.complete(&matched) {
            return Ok(false);
        }

        self.values.insert(&self.id, Scalar::new(matched));
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
        format!("Chars({}, {:?})", self.id, self.validator)
    }
}
