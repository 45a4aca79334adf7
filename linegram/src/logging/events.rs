//! Event system for linegram logging

use super::codes::Code;
use crate::utils::Position;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub position: Option<Position>,
    pub context: HashMap<String, String>,
}

impl LogEvent {
    fn with_level(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: truncate_message(message),
            position: None,
            context: HashMap::new(),
        }
    }

    /// Create a new error event
    pub fn error(error_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Error, error_code, message)
    }

    /// Create a new warning event (warnings may not have codes)
    pub fn warning(message: &str) -> Self {
        Self::with_level(LogLevel::Warning, Code::new("W000"), message)
    }

    /// Create warning with specific code
    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Warning, warning_code, message)
    }

    /// Create a new info event
    pub fn info(message: &str) -> Self {
        Self::with_level(LogLevel::Info, Code::new("I000"), message)
    }

    /// Create a success event (info with success code)
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Info, success_code, message)
    }

    /// Create a debug event
    pub fn debug(message: &str) -> Self {
        Self::with_level(LogLevel::Debug, Code::new("D000"), message)
    }

    /// Attach the stream position the event refers to
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    /// Check if this event requires halting
    pub fn requires_halt(&self) -> bool {
        super::codes::requires_halt(self.code.as_str())
    }

    /// Get severity from error code
    pub fn severity(&self) -> &'static str {
        super::codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        super::codes::get_category(self.code.as_str())
    }

    pub fn description(&self) -> &'static str {
        super::codes::get_description(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        super::codes::get_action(self.code.as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        super::codes::is_recoverable(self.code.as_str())
    }

    /// Format for display
    pub fn format(&self) -> String {
        let position_str = self
            .position
            .as_ref()
            .map(|p| format!(" at {}:{}", p.line, p.column))
            .unwrap_or_default();

        format!(
            "[{}] {} - {}{}",
            self.level.as_str(),
            self.code.as_str(),
            self.message,
            position_str
        )
    }

    /// Format with detailed error information
    pub fn format_detailed(&self) -> String {
        let mut output = self.format();

        output.push_str(&format!("\n  Category: {}", self.category()));
        output.push_str(&format!("\n  Severity: {}", self.severity()));

        if self.is_error() {
            output.push_str(&format!("\n  Recoverable: {}", self.is_recoverable()));
            output.push_str(&format!("\n  Requires halt: {}", self.requires_halt()));
        }

        let description = self.description();
        if description != "Unknown error" {
            output.push_str(&format!("\n  Description: {}", description));
        }

        let action = self.recommended_action();
        if action != "No specific action available" {
            output.push_str(&format!("\n  Recommended action: {}", action));
        }

        if !self.context.is_empty() {
            let mut keys: Vec<_> = self.context.keys().collect();
            keys.sort();
            output.push_str("\n  Context:");
            for key in keys {
                output.push_str(&format!("\n    {}: {}", key, self.context[key]));
            }
        }

        output
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            json["error_metadata"] = serde_json::json!({
                "recoverable": self.is_recoverable(),
                "requires_halt": self.requires_halt(),
                "description": self.description(),
                "recommended_action": self.recommended_action(),
            });
        }

        if let Some(position) = &self.position {
            json["position"] = serde_json::to_value(position)?;
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::Value::Object(
                self.context
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            );
        }

        serde_json::to_string(&json)
    }
}

/// Clip a message to the compile-time length limit on a char boundary
fn truncate_message(message: &str) -> String {
    let limit = super::config::get_max_log_message_length();
    if message.len() <= limit {
        return message.to_string();
    }

    let mut end = limit;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::stream::SOURCE_NOT_FOUND, "Source not found");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E014");
        assert_eq!(event.message, "Source not found");
        assert_eq!(event.category(), "Stream");
    }

    #[test]
    fn test_success_event_creation() {
        let event = LogEvent::success(codes::success::GRAMMAR_BUILT, "Grammar built");

        assert!(event.is_info());
        assert_eq!(event.code.as_str(), "I070");
    }

    #[test]
    fn test_event_with_context_and_position() {
        let event = LogEvent::error(codes::grammar::NO_TRANSITION, "No transition")
            .with_position(Position::new(14, 2, 3))
            .with_context("state", "Header");

        assert_eq!(event.context.get("state"), Some(&"Header".to_string()));
        assert!(event.format().ends_with("at 2:3"));
    }

    #[test]
    fn test_event_metadata() {
        let event = LogEvent::error(codes::system::INTERNAL_ERROR, "System failure");

        assert_eq!(event.severity(), "Critical");
        assert_eq!(event.category(), "System");
        assert!(!event.is_recoverable());
        assert!(event.requires_halt());
        assert!(event.format_detailed().contains("Requires halt: true"));
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::parser::UNBOUND_RULE, "Unbound rule")
            .with_position(Position::new(0, 1, 1))
            .with_context("rule", "expr");

        let json = event.format_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["code"], "E050");
        assert_eq!(parsed["position"]["line"], 1);
        assert_eq!(parsed["context"]["rule"], "expr");
        assert!(parsed["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_long_messages_are_truncated() {
        let limit = crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
        let long = "x".repeat(limit + 10);
        let event = LogEvent::info(&long);
        assert_eq!(event.message.len(), limit + 3);
        assert!(event.message.ends_with("..."));
    }
}
