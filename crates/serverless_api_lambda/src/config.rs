use serverless_api_core::{DispatcherConfig, LogLevel};
use thiserror::Error;

pub const TABLE_NAME_ENV: &str = "TABLE_NAME";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Settings read once per Lambda execution environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub table_name: Option<String>,
    pub log_level: LogLevel,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LOG_LEVEL must be 'info' or 'error', got '{value}'")]
    InvalidLogLevel { value: String },
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            table_name: None,
            log_level: LogLevel::Info,
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = non_blank(lookup(TABLE_NAME_ENV));
        let log_level = match non_blank(lookup(LOG_LEVEL_ENV)) {
            Some(value) => parse_log_level(&value)?,
            None => LogLevel::Info,
        };

        Ok(Self {
            table_name,
            log_level,
        })
    }

    pub fn dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig {
            table_name: self.table_name.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_log_level(value: &str) -> Result<LogLevel, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "info" => Ok(LogLevel::Info),
        "error" => Ok(LogLevel::Error),
        _ => Err(ConfigError::InvalidLogLevel {
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_configured() {
        let config = RuntimeConfig::from_lookup(|_| None).expect("empty env should load");
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn reads_table_name_and_log_level() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            (TABLE_NAME_ENV, "ServerlessApp-Database"),
            (LOG_LEVEL_ENV, "ERROR"),
        ]))
        .expect("config should load");

        assert_eq!(config.table_name.as_deref(), Some("ServerlessApp-Database"));
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(
            config.dispatcher_config().table_name.as_deref(),
            Some("ServerlessApp-Database")
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            RuntimeConfig::from_lookup(lookup_from(&[(TABLE_NAME_ENV, "  "), (LOG_LEVEL_ENV, "")]))
                .expect("blank values should load");
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let error = RuntimeConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "verbose")]))
            .expect_err("unknown level should fail");
        assert_eq!(
            error,
            ConfigError::InvalidLogLevel {
                value: "verbose".to_string()
            }
        );
        assert_eq!(
            error.to_string(),
            "LOG_LEVEL must be 'info' or 'error', got 'verbose'"
        );
    }
}
