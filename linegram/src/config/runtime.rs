// RUNTIME PREFERENCES (User Experience)

use crate::config::compile_time::stream::LINE_LOG_CAPACITY;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamPreferences {
    /// Line separators remembered for backward seeks (clamped to the compile-time capacity)
    pub line_log_capacity: usize,

    /// Whether to log source loading (size, line count)
    pub log_source_loading: bool,
}

impl Default for StreamPreferences {
    fn default() -> Self {
        Self {
            line_log_capacity: env::var("LINEGRAM_STREAM_LINE_LOG_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(LINE_LOG_CAPACITY),
            log_source_loading: env::var("LINEGRAM_STREAM_LOG_SOURCE_LOADING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl StreamPreferences {
    /// Effective separator log capacity, never above the compile-time limit and never zero
    pub fn effective_line_log_capacity(&self) -> usize {
        self.line_log_capacity.clamp(1, LINE_LOG_CAPACITY)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarPreferences {
    /// Whether to log every committed transition
    pub log_transitions: bool,

    /// Whether to log each candidate parser attempt
    pub trace_attempts: bool,

    /// Whether `apply` re-enables every state before walking
    pub reset_states_on_apply: bool,
}

impl Default for GrammarPreferences {
    fn default() -> Self {
        Self {
            log_transitions: env::var("LINEGRAM_GRAMMAR_LOG_TRANSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            trace_attempts: env::var("LINEGRAM_GRAMMAR_TRACE_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            reset_states_on_apply: env::var("LINEGRAM_GRAMMAR_RESET_STATES_ON_APPLY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("LINEGRAM_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("LINEGRAM_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("LINEGRAM_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub stream: StreamPreferences,
    pub grammar: GrammarPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML text; missing sections fall back to env/defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load preferences from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Stream
    pub const STREAM_LINE_LOG_CAPACITY: &str = "LINEGRAM_STREAM_LINE_LOG_CAPACITY";
    pub const STREAM_LOG_SOURCE_LOADING: &str = "LINEGRAM_STREAM_LOG_SOURCE_LOADING";

    // Grammar
    pub const GRAMMAR_LOG_TRANSITIONS: &str = "LINEGRAM_GRAMMAR_LOG_TRANSITIONS";
    pub const GRAMMAR_TRACE_ATTEMPTS: &str = "LINEGRAM_GRAMMAR_TRACE_ATTEMPTS";
    pub const GRAMMAR_RESET_STATES_ON_APPLY: &str = "LINEGRAM_GRAMMAR_RESET_STATES_ON_APPLY";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "LINEGRAM_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "LINEGRAM_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "LINEGRAM_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_line_log_capacity_is_clamped() {
        let prefs = StreamPreferences {
            line_log_capacity: 0,
            log_source_loading: false,
        };
        assert_eq!(prefs.effective_line_log_capacity(), 1);

        let prefs = StreamPreferences {
            line_log_capacity: usize::MAX,
            log_source_loading: false,
        };
        assert_eq!(prefs.effective_line_log_capacity(), LINE_LOG_CAPACITY);
    }

    #[test]
    fn test_runtime_config_from_toml() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [grammar]
            log_transitions = false
            trace_attempts = true
            reset_states_on_apply = true

            [logging]
            min_log_level = "Debug"
            "#,
        )
        .unwrap();

        assert!(!config.grammar.log_transitions);
        assert!(config.grammar.trace_attempts);
        assert!(config.grammar.reset_states_on_apply);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_runtime_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stream]\nline_log_capacity = 8\nlog_source_loading = false").unwrap();

        let config = RuntimeConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.stream.line_log_capacity, 8);
        assert!(!config.stream.log_source_loading);
    }

    #[test]
    fn test_runtime_config_rejects_bad_toml() {
        let result = RuntimeConfig::from_toml_str("[grammar\nlog_transitions = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(!env_vars::GRAMMAR_LOG_TRANSITIONS.is_empty());
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(!env_vars::STREAM_LINE_LOG_CAPACITY.is_empty());
    }
}
