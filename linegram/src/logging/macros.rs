//! Type-safe logging macros using Code types with Display support
//!
//! Every macro is a no-op until the global logger has been initialized.

// ============================================================================
// ERROR LOGGING MACROS
// ============================================================================

/// Log error with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, position = $pos:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($pos), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, None, context_refs)
        }
    };

    ($code:expr, $message:expr, position = $pos:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, Some($pos), context_refs)
        }
    };
}

// ============================================================================
// SUCCESS LOGGING MACROS
// ============================================================================

/// Log success with Code type - accepts Display types for context values
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

// ============================================================================
// INFO LOGGING MACROS
// ============================================================================

/// Log informational message - accepts Display types for context values
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

// ============================================================================
// WARNING LOGGING MACROS
// ============================================================================

/// Log warning message - accepts Display types for context values
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                logger.log_event($crate::logging::LogEvent::warning($message));
            }
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                let mut event = $crate::logging::LogEvent::warning($message);
                $(
                    event = event.with_context($key, &format!("{}", $value));
                )+
                logger.log_event(event);
            }
        }
    };
}

// ============================================================================
// DEBUG LOGGING MACROS
// ============================================================================

/// Log debug message - accepts Display types for context values
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                if logger.should_log($crate::logging::LogLevel::Debug) {
                    logger.log_event($crate::logging::LogEvent::debug($message));
                }
            }
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                if logger.should_log($crate::logging::LogLevel::Debug) {
                    let mut event = $crate::logging::LogEvent::debug($message);
                    $(
                        event = event.with_context($key, &format!("{}", $value));
                    )+
                    logger.log_event(event);
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::Position;

    #[test]
    fn test_macros_are_noops_without_global_logger() {
        let line: usize = 42;
        let position = Position::new(10, 2, 4);

        log_error!(codes::grammar::NO_TRANSITION, "No transition matched",
            "state" => "Header",
            "line" => line
        );
        log_error!(codes::parser::UNBOUND_RULE, "Unbound rule", position = position);
        log_error!(codes::parser::UNBOUND_RULE, "Unbound rule",
            position = position,
            "rule" => "expr"
        );
        log_success!(codes::success::WALK_COMPLETE, "Walk complete", "steps" => 7);
        log_info!("Loading source", "chars" => 2048);
        log_warning!("Separator log truncated", "capacity" => 8);
        log_debug!("Attempting transition", "from" => "A", "to" => "B");
    }
}
