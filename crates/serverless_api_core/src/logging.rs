use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// One structured log record emitted by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub event: &'static str,
    pub details: Value,
}

impl LogEntry {
    pub fn info(event: &'static str, details: Value) -> Self {
        Self {
            level: LogLevel::Info,
            event,
            details,
        }
    }

    pub fn error(event: &'static str, details: Value) -> Self {
        Self {
            level: LogLevel::Error,
            event,
            details,
        }
    }
}

/// Sink for dispatcher log entries. Rendering and level filtering belong to
/// the implementation.
pub trait DispatchLogger {
    fn log(&self, entry: LogEntry);
}
