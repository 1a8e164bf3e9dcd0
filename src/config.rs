use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::domain::forecast::ModelId;
use crate::logging::{UnknownLogLevel, parse_log_level};
use crate::services::forecast_engine::{MAX_HISTORY_DAYS, MAX_HORIZON_DAYS};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SupplyFlowConfig {
    pub routing: RoutingConfig,
    pub forecasting: ForecastingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Number of calculations kept in the route history.
    pub history_limit: usize,
    pub simulated_delay_ms: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            history_limit: 10,
            simulated_delay_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastingConfig {
    pub default_model: String,
    pub horizon_days: usize,
    /// Percent.
    pub confidence_level: f64,
    /// Days of synthetic history loaded before forecasting.
    pub history_days: usize,
    /// Trailing observed days held out to measure accuracy.
    pub validation_days: usize,
    pub simulated_delay_ms: u64,
}

impl Default for ForecastingConfig {
    fn default() -> Self {
        Self {
            default_model: ModelId::Prophet.as_str().to_string(),
            horizon_days: 90,
            confidence_level: 95.0,
            history_days: 365,
            validation_days: 30,
            simulated_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, UnknownLogLevel> {
        parse_log_level(&self.level)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl SupplyFlowConfig {
    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => load_config_from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.routing.history_limit == 0 {
            return Err(invalid("routing.history_limit", "must be at least 1"));
        }
        let forecasting = &self.forecasting;
        if ModelId::parse(&forecasting.default_model).is_none() {
            return Err(invalid(
                "forecasting.default_model",
                format!("unknown model '{}'", forecasting.default_model),
            ));
        }
        if forecasting.horizon_days == 0 || forecasting.horizon_days > MAX_HORIZON_DAYS {
            return Err(invalid(
                "forecasting.horizon_days",
                format!("must be between 1 and {MAX_HORIZON_DAYS}"),
            ));
        }
        if !(forecasting.confidence_level > 0.0 && forecasting.confidence_level <= 100.0) {
            return Err(invalid(
                "forecasting.confidence_level",
                "must be within (0, 100]",
            ));
        }
        if forecasting.validation_days == 0 {
            return Err(invalid("forecasting.validation_days", "must be at least 1"));
        }
        if forecasting.history_days <= forecasting.validation_days {
            return Err(invalid(
                "forecasting.history_days",
                "must exceed forecasting.validation_days",
            ));
        }
        if forecasting.history_days > MAX_HISTORY_DAYS {
            return Err(invalid(
                "forecasting.history_days",
                format!("must be at most {MAX_HISTORY_DAYS}"),
            ));
        }
        if let Err(e) = self.logging.level_filter() {
            return Err(invalid("logging.level", e.to_string()));
        }
        Ok(())
    }

    pub fn default_model(&self) -> ModelId {
        ModelId::from_id(&self.forecasting.default_model)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

pub fn load_config_from_yaml_file<P: AsRef<Path>>(path: P) -> Result<SupplyFlowConfig, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config = deserialize_config_from_yaml_str(&contents).map_err(|source| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    config.validate()?;
    Ok(config)
}

pub fn deserialize_config_from_yaml_str(contents: &str) -> Result<SupplyFlowConfig, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(SupplyFlowConfig::default());
    }
    serde_yaml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = deserialize_config_from_yaml_str(
            "routing:\n  simulated_delay_ms: 0\nlogging:\n  json: true\n",
        )
        .unwrap();

        assert_eq!(config.routing.simulated_delay_ms, 0);
        assert_eq!(config.routing.history_limit, 10);
        assert_eq!(config.forecasting, ForecastingConfig::default());
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(
            deserialize_config_from_yaml_str("").unwrap(),
            SupplyFlowConfig::default()
        );
    }

    #[test]
    fn load_reads_and_validates_file() {
        let file = assert_fs::NamedTempFile::new("config.yaml").unwrap();
        file.write_str("forecasting:\n  default_model: lstm\n  horizon_days: 14\n")
            .unwrap();

        let config = SupplyFlowConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.default_model(), ModelId::Lstm);
        assert_eq!(config.forecasting.horizon_days, 14);
    }

    #[test]
    fn load_without_path_returns_defaults() {
        assert_eq!(SupplyFlowConfig::load(None).unwrap(), SupplyFlowConfig::default());
    }

    #[test]
    fn rejects_invalid_values() {
        let file = assert_fs::NamedTempFile::new("config.yaml").unwrap();
        file.write_str("forecasting:\n  confidence_level: 150\n").unwrap();

        let error = load_config_from_yaml_file(file.path()).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "forecasting.confidence_level",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_default_model() {
        let config =
            deserialize_config_from_yaml_str("forecasting:\n  default_model: magic\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "forecasting.default_model",
                ..
            })
        ));
    }

    #[test]
    fn caps_history_and_horizon_lengths() {
        let history =
            deserialize_config_from_yaml_str("forecasting:\n  history_days: 200000000\n").unwrap();
        assert!(matches!(
            history.validate(),
            Err(ConfigError::Invalid {
                field: "forecasting.history_days",
                ..
            })
        ));

        let horizon =
            deserialize_config_from_yaml_str("forecasting:\n  horizon_days: 100000\n").unwrap();
        assert!(matches!(
            horizon.validate(),
            Err(ConfigError::Invalid {
                field: "forecasting.horizon_days",
                ..
            })
        ));

        let longest = deserialize_config_from_yaml_str(&format!(
            "forecasting:\n  history_days: {MAX_HISTORY_DAYS}\n  horizon_days: {MAX_HORIZON_DAYS}\n"
        ))
        .unwrap();
        assert!(longest.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let config = deserialize_config_from_yaml_str("logging:\n  level: verbose\n").unwrap();

        let error = config.validate().unwrap_err();

        assert!(matches!(error, ConfigError::Invalid { field: "logging.level", .. }));
        assert!(error.to_string().contains("unknown log level 'verbose'"));
        assert_eq!(
            SupplyFlowConfig::default().logging.level_filter(),
            Ok(LevelFilter::INFO)
        );
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.child("missing.yaml");
        assert!(matches!(
            load_config_from_yaml_file(missing.path()),
            Err(ConfigError::ReadFile { .. })
        ));

        let malformed = temp.child("bad.yaml");
        malformed.write_str("routing: [1, 2").unwrap();
        assert!(matches!(
            load_config_from_yaml_file(malformed.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
