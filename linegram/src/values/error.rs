//! Value extraction errors

use crate::logging::codes;

/// Errors raised when reading captured values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("No value captured under identifier '{id}'")]
    NotFound { id: String },

    #[error("Type mismatch: requested {expected}, scalar holds {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Shape mismatch for '{id}': requested a {expected}, found a {found}")]
    ShapeMismatch {
        id: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ValueError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ValueError::NotFound { .. } => codes::values::VALUE_NOT_FOUND,
            ValueError::TypeMismatch { .. } => codes::values::TYPE_MISMATCH,
            ValueError::ShapeMismatch { .. } => codes::values::SHAPE_MISMATCH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}

pub type ValueResult<T> = Result<T, ValueError>;
