use std::sync::Mutex;

use serverless_api_core::logging::{DispatchLogger, LogEntry, LogLevel};

#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("poisoned mutex").clone()
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }
}

impl DispatchLogger for RecordingLogger {
    fn log(&self, entry: LogEntry) {
        self.entries.lock().expect("poisoned mutex").push(entry);
    }
}
