//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Character stream error codes
pub mod stream {
    use super::Code;

    pub const STREAM_EXHAUSTED: Code = Code::new("E010");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E011");
    pub const SOURCE_IO_ERROR: Code = Code::new("E012");
    pub const INVALID_ENCODING: Code = Code::new("E013");
    pub const SOURCE_NOT_FOUND: Code = Code::new("E014");
    pub const SEEK_OUT_OF_RANGE: Code = Code::new("E015");
}

/// Value model error codes
pub mod values {
    use super::Code;

    pub const VALUE_NOT_FOUND: Code = Code::new("E030");
    pub const TYPE_MISMATCH: Code = Code::new("E031");
    pub const SHAPE_MISMATCH: Code = Code::new("E032");
}

/// Parser and combinator error codes
pub mod parser {
    use super::Code;

    pub const UNBOUND_RULE: Code = Code::new("E050");
    pub const RULE_DEPTH_EXCEEDED: Code = Code::new("E051");
    pub const REPEAT_LIMIT_EXCEEDED: Code = Code::new("E052");
    pub const INVALID_BOUNDS: Code = Code::new("E053");
}

/// State graph error codes
pub mod grammar {
    use super::Code;

    pub const MISSING_PARSER: Code = Code::new("E070");
    pub const UNDEFINED_STATE: Code = Code::new("E071");
    pub const MISSING_START_STATE: Code = Code::new("E072");
    pub const MISSING_END_STATE: Code = Code::new("E073");
    pub const DUPLICATE_TRANSITION: Code = Code::new("E074");
    pub const STEP_LIMIT_EXCEEDED: Code = Code::new("E075");
    pub const TOO_MANY_STATES: Code = Code::new("E076");
    pub const NO_TRANSITION: Code = Code::new("E077");
    pub const VALUES_REJECTED: Code = Code::new("E078");
    pub const UNDEFINED_TRANSITION: Code = Code::new("E079");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const SOURCE_LOADED: Code = Code::new("I010");
    pub const GRAMMAR_BUILT: Code = Code::new("I070");
    pub const TRANSITION_COMMITTED: Code = Code::new("I071");
    pub const WALK_COMPLETE: Code = Code::new("I072");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal error",
                "File a bug report with the grammar and input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Logging or configuration initialization failure",
                "Check configuration files and environment variables",
            ),
            // Stream errors
            ErrorMetadata::new(
                "E010",
                "Stream",
                Severity::High,
                false,
                true,
                "Character read past the end of the stream",
                "Guard reads with eof()/good() inside custom parsers",
            ),
            ErrorMetadata::new(
                "E011",
                "Stream",
                Severity::Medium,
                false,
                true,
                "Source exceeds the maximum size that can be buffered",
                "Split the input or raise max_source_size in the build profile",
            ),
            ErrorMetadata::new(
                "E012",
                "Stream",
                Severity::Medium,
                false,
                true,
                "I/O error while reading the source",
                "Check the source path, permissions and device",
            ),
            ErrorMetadata::new(
                "E013",
                "Stream",
                Severity::Medium,
                false,
                true,
                "Source is not valid UTF-8",
                "Convert the source to UTF-8",
            ),
            ErrorMetadata::new(
                "E014",
                "Stream",
                Severity::Medium,
                false,
                true,
                "Source file not found",
                "Check the source path",
            ),
            ErrorMetadata::new(
                "E015",
                "Stream",
                Severity::High,
                false,
                true,
                "Seek target lies outside the buffered source",
                "Only seek to positions previously returned by position()",
            ),
            // Value errors
            ErrorMetadata::new(
                "E030",
                "Values",
                Severity::Medium,
                true,
                false,
                "No value captured under the requested identifier",
                "Check the identifiers given to the parsers of the rule",
            ),
            ErrorMetadata::new(
                "E031",
                "Values",
                Severity::High,
                false,
                true,
                "Scalar requested as a type it does not hold",
                "Request the type the capturing parser produces",
            ),
            ErrorMetadata::new(
                "E032",
                "Values",
                Severity::High,
                false,
                true,
                "List requested as a scalar or scalar requested as a list",
                "Use list() for Repeat/Tuple captures and scalar() otherwise",
            ),
            // Parser errors
            ErrorMetadata::new(
                "E050",
                "Parser",
                Severity::Critical,
                false,
                true,
                "Recursive rule used before a parser was bound to it",
                "Call Rule::define before parsing",
            ),
            ErrorMetadata::new(
                "E051",
                "Parser",
                Severity::High,
                false,
                true,
                "Recursive rule nesting exceeds the configured depth",
                "Reduce input nesting or raise max_rule_depth",
            ),
            ErrorMetadata::new(
                "E052",
                "Parser",
                Severity::High,
                false,
                true,
                "Unbounded repetition exceeded the configured iteration limit",
                "Bound the repetition or raise max_repeat_count",
            ),
            ErrorMetadata::new(
                "E053",
                "Parser",
                Severity::Critical,
                false,
                true,
                "Repetition bounds are inconsistent",
                "Ensure min <= max",
            ),
            // Grammar errors
            ErrorMetadata::new(
                "E070",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Transition target has no bound parser",
                "Bind a parser to every state that is a transition target",
            ),
            ErrorMetadata::new(
                "E071",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Reference to a state that was never declared",
                "Declare the state or fix the transition table",
            ),
            ErrorMetadata::new(
                "E072",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "State graph has no start state",
                "Call start() on the builder",
            ),
            ErrorMetadata::new(
                "E073",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "State graph has no end state",
                "Call end() on the builder",
            ),
            ErrorMetadata::new(
                "E074",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Transition declared twice",
                "Remove the duplicate entry from the transition table",
            ),
            ErrorMetadata::new(
                "E075",
                "Grammar",
                Severity::High,
                false,
                true,
                "Walk exceeded the configured number of transitions",
                "Check for cycles through parsers that consume no input",
            ),
            ErrorMetadata::new(
                "E076",
                "Grammar",
                Severity::High,
                false,
                true,
                "State graph declares too many states",
                "Split the grammar or raise max_states",
            ),
            ErrorMetadata::new(
                "E077",
                "Grammar",
                Severity::Medium,
                true,
                false,
                "No enabled transition matched the input",
                "Inspect the reported state and line",
            ),
            ErrorMetadata::new(
                "E078",
                "Grammar",
                Severity::Medium,
                true,
                false,
                "Value handler rejected a matched transition",
                "Inspect the reported state and line",
            ),
            ErrorMetadata::new(
                "E079",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Callback registered for a transition that was never declared",
                "Declare the transition before attaching callbacks to it",
            ),
            // Success codes
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "None",
            ),
            ErrorMetadata::new(
                "I010",
                "Stream",
                Severity::Low,
                true,
                false,
                "Source loaded into stream",
                "None",
            ),
            ErrorMetadata::new(
                "I070",
                "Grammar",
                Severity::Low,
                true,
                false,
                "State graph built and validated",
                "None",
            ),
            ErrorMetadata::new(
                "I072",
                "Grammar",
                Severity::Low,
                true,
                false,
                "State graph walk reached a terminal state",
                "None",
            ),
        ];

        entries.into_iter().map(|meta| (meta.code, meta)).collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            stream::STREAM_EXHAUSTED,
            stream::SOURCE_TOO_LARGE,
            stream::SOURCE_IO_ERROR,
            stream::INVALID_ENCODING,
            stream::SOURCE_NOT_FOUND,
            stream::SEEK_OUT_OF_RANGE,
            values::VALUE_NOT_FOUND,
            values::TYPE_MISMATCH,
            values::SHAPE_MISMATCH,
            parser::UNBOUND_RULE,
            parser::RULE_DEPTH_EXCEEDED,
            parser::REPEAT_LIMIT_EXCEEDED,
            parser::INVALID_BOUNDS,
            grammar::MISSING_PARSER,
            grammar::UNDEFINED_STATE,
            grammar::MISSING_START_STATE,
            grammar::MISSING_END_STATE,
            grammar::DUPLICATE_TRANSITION,
            grammar::STEP_LIMIT_EXCEEDED,
            grammar::TOO_MANY_STATES,
            grammar::NO_TRANSITION,
            grammar::VALUES_REJECTED,
            grammar::UNDEFINED_TRANSITION,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_usage_errors_halt_and_walk_failures_do_not() {
        assert!(requires_halt(stream::STREAM_EXHAUSTED.as_str()));
        assert!(requires_halt(values::TYPE_MISMATCH.as_str()));
        assert!(requires_halt(grammar::MISSING_PARSER.as_str()));
        assert!(!requires_halt(grammar::NO_TRANSITION.as_str()));
        assert!(is_recoverable(grammar::VALUES_REJECTED.as_str()));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_severity("Z999"), Severity::Medium);
        assert!(!requires_halt("Z999"));
    }
}
