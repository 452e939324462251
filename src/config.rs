//! Container configuration loaded from TOML.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Runtime options for a [`Context`](crate::Context)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    /// Label attached to every resolution span
    pub label: String,
    /// Whether resolution counters are updated
    pub collect_stats: bool,
    pub logging: LoggingConfig,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            label: "context".to_string(),
            collect_stats: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl ContainerConfig {
    /// Parse configuration from a TOML document; missing keys take defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn without_stats(mut self) -> Self {
        self.collect_stats = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LoggingEnvironment};
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ContainerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ContainerConfig::default());
        assert_eq!(config.label, "context");
        assert!(config.collect_stats);
    }

    #[test]
    fn test_full_document() {
        let config = ContainerConfig::from_toml_str(
            r#"
            label = "api"
            collect_stats = false

            [logging]
            environment = "production"
            level = "context_container=debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.label, "api");
        assert!(!config.collect_stats);
        assert_eq!(config.logging.environment, LoggingEnvironment::Production);
        assert_eq!(config.logging.level, "context_container=debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        // 未给出的字段保持默认
        assert!(config.logging.show_target);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ContainerConfig::from_toml_str("lable = \"typo\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label = \"from-file\"").unwrap();

        let config = ContainerConfig::load(file.path()).unwrap();
        assert_eq!(config.label, "from-file");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContainerConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_builder_helpers() {
        let config = ContainerConfig::default().with_label("jobs").without_stats();
        assert_eq!(config.label, "jobs");
        assert!(!config.collect_stats);
    }
}
