use chrono::Utc;
use serde_json::{json, Value};
use serverless_api_core::logging::{DispatchLogger, LogEntry, LogLevel};

pub const API_HANDLER_COMPONENT: &str = "api_handler";

/// Writes dispatcher entries to stderr as one JSON object per line, which
/// CloudWatch Logs ingests as structured records.
#[derive(Debug, Clone)]
pub struct StderrJsonLogger {
    component: &'static str,
    min_level: LogLevel,
}

impl StderrJsonLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            component: API_HANDLER_COMPONENT,
            min_level,
        }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl DispatchLogger for StderrJsonLogger {
    fn log(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        eprintln!(
            "{}",
            render_entry(self.component, &entry, &Utc::now().to_rfc3339())
        );
    }
}

pub fn render_entry(component: &str, entry: &LogEntry, timestamp: &str) -> Value {
    json!({
        "component": component,
        "level": entry.level.as_str(),
        "event": entry.event,
        "timestamp": timestamp,
        "details": entry.details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_structured_line() {
        let entry = LogEntry::error("request_failed", json!({"error": "boom"}));
        let rendered = render_entry(API_HANDLER_COMPONENT, &entry, "2026-10-16T00:00:00+00:00");

        assert_eq!(
            rendered,
            json!({
                "component": "api_handler",
                "level": "error",
                "event": "request_failed",
                "timestamp": "2026-10-16T00:00:00+00:00",
                "details": {"error": "boom"},
            })
        );
    }

    #[test]
    fn error_threshold_suppresses_info() {
        let logger = StderrJsonLogger::new(LogLevel::Error);
        assert!(!logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Error));
    }

    #[test]
    fn info_threshold_keeps_everything() {
        let logger = StderrJsonLogger::new(LogLevel::Info);
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Error));
    }
}
