//! Configuration loading.
//!
//! A TOML file supplies server, logging, reference-table and presentation
//! settings; every section is optional and falls back to built-in defaults.
//! Environment variables override the file:
//! - `LIFERADAR_HOST`, `LIFERADAR_PORT`
//! - `LIFERADAR_LOG_LEVEL`, `LIFERADAR_LOG_FORMAT`

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::ReferenceTable;
use crate::presentation::PresentationConfig;

pub const CONFIG_FILE_NAME: &str = "liferadar.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub reference: ReferenceTable,

    #[serde(default)]
    pub presentation: PresentationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::InvalidValue {
                key: "logging.format",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "liferadar=info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

impl Config {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Loads `path` when given, otherwise the first config found in the
    /// default locations, then applies environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::load_default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn load_default() -> Self {
        let candidates = [
            dirs::config_dir().map(|p| p.join("liferadar").join(CONFIG_FILE_NAME)),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        for path in candidates.iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load(path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {:?}", path);
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Ignoring config at {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }

    /// Applies `LIFERADAR_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("LIFERADAR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("LIFERADAR_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LIFERADAR_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(level) = lookup("LIFERADAR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LIFERADAR_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }
}

/// Template written by `liferadar init-config`.
pub fn generate_default_config() -> String {
    r##"# Life Radar configuration
#
# Environment variables override these settings:
# - LIFERADAR_HOST
# - LIFERADAR_PORT
# - LIFERADAR_LOG_LEVEL
# - LIFERADAR_LOG_FORMAT

[server]
host = "0.0.0.0"
port = 8080

[logging]
# tracing EnvFilter directive; RUST_LOG takes precedence when set
level = "liferadar=info"
# "pretty" or "json"
format = "pretty"

[reference.life_expectancy]
male = 72.3
female = 77.8

[reference.radar]
income_full_scale = 30000.0
net_worth_full_scale = 1000000.0
free_hours_full_scale = 50.0
savings_rate_full_scale = 30.0
education_fallback = 50.0

[reference.radar.education_scores]
high-school = 40.0
bachelor = 65.0
master = 90.0
doctorate = 100.0

[reference.benchmark]
name = "MX average"
scores = [40.0, 20.0, 60.0, 60.0, 20.0]
hover_text = ["~$12,000", "~$200,000", "~31h/wk", "Bachelor's", "~5%"]

[presentation]
title = "Life Radar"

[presentation.palette]
positive = "#2E8B57"
negative = "#D32F2F"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(content: &str) -> Config {
        Config::parse(content, Path::new("test.toml")).expect("config should parse")
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.reference, ReferenceTable::default());
        assert_eq!(config.presentation, PresentationConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = parse(
            r##"
            [server]
            port = 9000

            [reference.radar]
            income_full_scale = 45000.0

            [presentation.palette]
            positive = "#00FF00"
            "##,
        );
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.reference.radar.income_full_scale, 45_000.0);
        assert_eq!(config.reference.radar.net_worth_full_scale, 1_000_000.0);
        assert_eq!(config.reference.radar.education_scores.len(), 4);
        assert_eq!(config.presentation.palette.positive, "#00FF00");
        assert_eq!(config.presentation.palette.negative, "#D32F2F");
    }

    #[test]
    fn generated_template_round_trips_to_defaults() {
        let config = parse(&generate_default_config());
        assert_eq!(config.reference, ReferenceTable::default());
        assert_eq!(config.presentation, PresentationConfig::default());
        assert_eq!(config.logging.level, default_log_level());
    }

    #[test]
    fn default_log_filter_names_only_this_crate() {
        assert_eq!(LoggingConfig::default().level, "liferadar=info");
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let err = Config::parse("[server\nport = ", Path::new("bad.toml"))
            .expect_err("must reject malformed toml");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            ("LIFERADAR_HOST", "127.0.0.1"),
            ("LIFERADAR_PORT", "3001"),
            ("LIFERADAR_LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .expect("overrides should apply");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn env_override_rejects_bad_port() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|key| (key == "LIFERADAR_PORT").then(|| "not-a-port".to_string()))
            .expect_err("must reject bad port");
        assert!(err.to_string().contains("LIFERADAR_PORT"));
    }
}
