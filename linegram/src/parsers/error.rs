//! Fatal parser errors
//!
//! These are usage or configuration problems. An input that simply does not
//! match is reported as `Ok(false)`, never through this type.

use crate::logging::codes;
use crate::stream::StreamError;
use crate::values::ValueError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("Rule '{name}' has no parser bound to it")]
    UnboundRule { name: String },

    #[error("Rule '{name}' nested deeper than {limit} levels")]
    RecursionLimit { name: String, limit: usize },

    #[error("{parser} matched more than {limit} times")]
    RepeatLimit { parser: String, limit: usize },

    #[error("Invalid repetition bounds: min {min} exceeds max {max}")]
    InvalidBounds { min: usize, max: usize },
}

impl ParseError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ParseError::Stream(e) => e.error_code(),
            ParseError::Value(e) => e.error_code(),
            ParseError::UnboundRule { .. } => codes::parser::UNBOUND_RULE,
            ParseError::RecursionLimit { .. } => codes::parser::RULE_DEPTH_EXCEEDED,
            ParseError::RepeatLimit { .. } => codes::parser::REPEAT_LIMIT_EXCEEDED,
            ParseError::InvalidBounds { .. } => codes::parser::INVALID_BOUNDS,
        }
    }

    /// Check if this error should halt processing
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Get error severity
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}

/// Result of a parse attempt: `Ok(true)` matched, `Ok(false)` no match
pub type ParseResult<T> = Result<T, ParseError>;
