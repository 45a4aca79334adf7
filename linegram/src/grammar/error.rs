//! State graph construction and walk errors

use crate::logging::codes;
use crate::parsers::ParseError;

/// Errors from building or walking a [`StateGraph`](super::StateGraph).
///
/// State identifiers are carried in their `Debug` rendering so the error
/// type does not depend on the state type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrammarError {
    #[error("State {state} is a transition target but has no parser")]
    MissingParser { state: String },

    #[error("State {state} is not part of the graph")]
    UndefinedState { state: String },

    #[error("Callback attached to undeclared transition {from} -> {to}")]
    UndefinedTransition { from: String, to: String },

    #[error("State graph has no start state")]
    MissingStartState,

    #[error("State graph has no end state")]
    MissingEndState,

    #[error("Transition {from} -> {to} declared more than once")]
    DuplicateTransition { from: String, to: String },

    #[error("Walk exceeded {limit} transitions")]
    StepLimitExceeded { limit: usize },

    #[error("State graph declares {count} states, limit is {limit}")]
    TooManyStates { count: usize, limit: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl GrammarError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            GrammarError::MissingParser { .. } => codes::grammar::MISSING_PARSER,
            GrammarError::UndefinedState { .. } => codes::grammar::UNDEFINED_STATE,
            GrammarError::UndefinedTransition { .. } => codes::grammar::UNDEFINED_TRANSITION,
            GrammarError::MissingStartState => codes::grammar::MISSING_START_STATE,
            GrammarError::MissingEndState => codes::grammar::MISSING_END_STATE,
            GrammarError::DuplicateTransition { .. } => codes::grammar::DUPLICATE_TRANSITION,
            GrammarError::StepLimitExceeded { .. } => codes::grammar::STEP_LIMIT_EXCEEDED,
            GrammarError::TooManyStates { .. } => codes::grammar::TOO_MANY_STATES,
            GrammarError::Parse(e) => e.error_code(),
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

pub type GrammarResult<T> = Result<T, GrammarError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StreamError;
    use crate::utils::Position;

    #[test]
    fn test_parse_errors_convert_through() {
        let stream_error = StreamError::Exhausted {
            position: Position::start(),
        };
        let error: GrammarError = ParseError::from(stream_error).into();
        assert_eq!(error.error_code(), codes::stream::STREAM_EXHAUSTED);
        assert!(error.requires_halt());
    }

    #[test]
    fn test_messages_and_codes() {
        let error = GrammarError::DuplicateTransition {
            from: "Start".to_string(),
            to: "Atom".to_string(),
        };
        assert_eq!(error.to_string(), "Transition Start -> Atom declared more than once");
        assert_eq!(error.error_code().as_str(), "E074");
        assert_eq!(GrammarError::MissingStartState.severity(), "Critical");
    }
}
