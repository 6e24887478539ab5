use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::services::obis::{DEFAULT_OBIS_ENDPOINT, DEFAULT_RESULT_SIZE};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub obis: ObisSettings,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObisSettings {
    pub endpoint: String,
    #[serde(default = "default_result_size")]
    pub result_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ObisSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_result_size() -> u32 { DEFAULT_RESULT_SIZE }
fn default_timeout_secs() -> u64 { 30 }

/// Grid synthesis settings
///
/// With a seed, synthesized readings are reproducible across requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridSettings {
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LoggingSettings {
    /// Unknown names fall back to compact text
    pub fn log_format(&self) -> LogFormat {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with REEF_)
    /// 5. `OBIS_API_URL`, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., REEF__SERVER__PORT -> server.port
            .add_source(reef_environment())
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(reef_environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8000_i64)?
        .set_default("obis.endpoint", DEFAULT_OBIS_ENDPOINT)
}

fn reef_environment() -> Environment {
    Environment::with_prefix("REEF")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply well-known environment variables that live outside the REEF_ namespace
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(endpoint) = std::env::var("OBIS_API_URL") {
        builder = builder.set_override("obis.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
        assert_eq!(logging.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_parsing() {
        let with_format = |format: &str| LoggingSettings {
            level: default_log_level(),
            format: format.to_string(),
        };

        assert_eq!(with_format("JSON").log_format(), LogFormat::Json);
        assert_eq!(with_format("pretty").log_format(), LogFormat::Pretty);
        assert_eq!(with_format("compact").log_format(), LogFormat::Compact);
        assert_eq!(with_format("plain").log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_defaults_without_file() {
        let settings: Settings = with_defaults(Config::builder())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.obis.endpoint, DEFAULT_OBIS_ENDPOINT);
        assert_eq!(settings.obis.result_size, 500);
        assert_eq!(settings.obis.timeout(), Duration::from_secs(30));
        assert!(settings.grid.seed.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("reef-index-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9100\n\n[obis]\nendpoint = \"http://localhost:1234\"\nresult_size = 50\n\n[grid]\nseed = 42\n"
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.obis.endpoint, "http://localhost:1234");
        assert_eq!(settings.obis.result_size, 50);
        assert_eq!(settings.grid.seed, Some(42));
    }
}
