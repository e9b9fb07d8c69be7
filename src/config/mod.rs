//! Configuration of the analyzer.
//!
//! - `settings`: ambient settings (logging, HTTP) layered from an optional
//!   `config/default` file and `EMITTER_ANALYZE__*` environment variables.
//! - `experiment_file`: the JSON experiment script driving scripted mode.

pub mod experiment_file;
mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use experiment_file::{BatchStep, ConfigFile, JobStep, OutputPaths, RateSpec, TimelineStep};
pub use settings::{HttpSettings, LoggingSettings, Settings};

pub const ENV_PREFIX: &str = "EMITTER_ANALYZE";

/// Loads the settings from the default file and environment variables
/// Missing values are taken from `Settings::default()`
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    Ok(Settings {
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
        http: HttpSettings {
            request_timeout_secs: partial
                .http
                .as_ref()
                .and_then(|h| h.request_timeout_secs)
                .or(default.http.request_timeout_secs),
        },
    })
}
