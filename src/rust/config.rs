//! YAML configuration for a classification pass.
//!
//! Keys match the `config.yaml` shipped with the tool; everything except the
//! input file has a default. Values are checked once by [`Config::validate`] and
//! any problem aborts startup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::endpoints::BuiltinEndpoint;

/// Environment variable pointing at the configuration file.
pub const CONFIG_ENV: &str = "SDG_CLASSIFY_CONFIG";

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_TEXT_COLUMN: &str = "Abstract";
pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_RATE_LIMIT_SECS: f64 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("sdg_threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),
    #[error("rate_limit must be a non-negative number of seconds, got {0}")]
    InvalidRateLimit(f64),
    #[error("Invalid classifier_url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("text_column must not be empty")]
    EmptyTextColumn,
    #[error("No input file configured")]
    MissingInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_input_folder: PathBuf,
    pub data_input_file: PathBuf,
    pub data_output_folder: PathBuf,
    pub sdg_threshold: f64,
    pub classifier_url: String,
    /// Seconds to wait before each classifier call.
    pub rate_limit: f64,
    pub text_column: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_input_folder: PathBuf::new(),
            data_input_file: PathBuf::new(),
            data_output_folder: PathBuf::from("."),
            sdg_threshold: DEFAULT_THRESHOLD,
            classifier_url: BuiltinEndpoint::default().url().to_string(),
            rate_limit: DEFAULT_RATE_LIMIT_SECS,
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
        }
    }
}

impl Config {
    /// Returns the configuration file to use when none is given explicitly
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Loads a configuration file without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sdg_threshold.is_finite() || !(0.0..=1.0).contains(&self.sdg_threshold) {
            return Err(ConfigError::InvalidThreshold(self.sdg_threshold));
        }
        if Duration::try_from_secs_f64(self.rate_limit).is_err() {
            return Err(ConfigError::InvalidRateLimit(self.rate_limit));
        }
        Url::parse(&self.classifier_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.classifier_url.clone(),
            reason: e.to_string(),
        })?;
        if self.text_column.trim().is_empty() {
            return Err(ConfigError::EmptyTextColumn);
        }
        if self.data_input_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingInput);
        }
        Ok(())
    }

    /// Full input path: the input file inside the input folder.
    pub fn input_path(&self) -> PathBuf {
        self.data_input_folder.join(&self.data_input_file)
    }

    /// Pause before each classifier call. A rate limit rejected by `validate` maps to no pause.
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.rate_limit).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(yaml: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(yaml.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_config_full() {
        let yaml = r#"
data_input_folder: ./data/
data_input_file: publications.csv
data_output_folder: ./output/
sdg_threshold: 0.3
classifier_url: https://aurora-sdg.labs.vu.nl/classifier/classify/aurora-sdg
rate_limit: 1.5
text_column: Summary
"#;
        let f = write_yaml(yaml);
        let config = Config::load(f.path()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.input_path(), PathBuf::from("./data/publications.csv"));
        assert_eq!(config.data_output_folder, PathBuf::from("./output/"));
        assert_eq!(config.sdg_threshold, 0.3);
        assert_eq!(config.classifier_url, BuiltinEndpoint::AuroraSdg.url());
        assert_eq!(config.delay(), Duration::from_millis(1500));
        assert_eq!(config.text_column, "Summary");
    }

    #[test]
    fn test_load_config_defaults() {
        let config = Config::from_yaml("data_input_file: in.csv\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.sdg_threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.text_column, DEFAULT_TEXT_COLUMN);
        assert_eq!(config.classifier_url, BuiltinEndpoint::AuroraSdgMulti.url());
        assert_eq!(config.delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let f = write_yaml("not: [valid: yaml: {{{}}}");
        assert!(matches!(Config::load(f.path()), Err(ConfigError::Parse(_))));

        let f = write_yaml("sdg_threshold: high\n");
        assert!(matches!(Config::load(f.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = Config {
            data_input_file: PathBuf::from("in.csv"),
            ..Config::default()
        };

        let config = Config { sdg_threshold: 1.2, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold(_))));

        let config = Config { sdg_threshold: f64::NAN, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold(_))));

        let config = Config { rate_limit: -0.1, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRateLimit(_))));

        let config = Config { rate_limit: f64::INFINITY, ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRateLimit(_))));

        let config = Config { classifier_url: "aurora".to_string(), ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl { .. })));

        let config = Config { text_column: " ".to_string(), ..base.clone() };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTextColumn)));

        assert!(matches!(Config::default().validate(), Err(ConfigError::MissingInput)));
    }

    #[test]
    fn test_huge_rate_limit_is_rejected() {
        let config = Config::from_yaml("data_input_file: in.csv\nrate_limit: 1e30\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRateLimit(_))));
        assert_eq!(config.delay(), Duration::ZERO);
    }

    #[test]
    fn test_threshold_bounds_are_valid() {
        for threshold in [0.0, 1.0] {
            let config = Config {
                data_input_file: PathBuf::from("in.csv"),
                sdg_threshold: threshold,
                ..Config::default()
            };
            assert!(config.validate().is_ok());
        }
    }
}
