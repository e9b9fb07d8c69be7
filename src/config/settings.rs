use std::time::Duration;

use serde::Deserialize;

/// Top-level ambient settings of the application.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

/// HTTP transport settings used for every call to the emitter service.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HttpSettings {
    /// Per request timeout; unset keeps the transport default.
    pub request_timeout_secs: Option<u64>,
}

impl HttpSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Partial settings loaded from files or environment.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub logging: Option<PartialLoggingSettings>,
    pub http: Option<PartialHttpSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialHttpSettings {
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingSettings {
                level: "info".to_string(),
            },
            http: HttpSettings {
                request_timeout_secs: None,
            },
        }
    }
}
