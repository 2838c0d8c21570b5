use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileDoubleCheckConfig {
    pub energy_threshold: Option<f64>,
    pub distance_threshold: Option<f64>,
    pub match_policy: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub append: Option<bool>,
}

/// The TOML configuration file. Every field is optional; missing values fall back to defaults.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub double_check: Option<FileDoubleCheckConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_file_is_deserialized() {
        let config = FileConfig::from_toml_str(
            r#"
            [double-check]
            energy-threshold = 0.5
            distance-threshold = 0.2
            match-policy = "closest-match"

            [output]
            append = true
            "#,
        )
        .unwrap();
        let dc = config.double_check.unwrap();
        assert_eq!(dc.energy_threshold, Some(0.5));
        assert_eq!(dc.distance_threshold, Some(0.2));
        assert_eq!(dc.match_policy.as_deref(), Some("closest-match"));
        assert_eq!(config.output.unwrap().append, Some(true));
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(FileConfig::from_toml_str("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml_str("[double-check]\nrmsd-threshold = 0.1\n").is_err());
        assert!(FileConfig::from_toml_str("[sampling]\n").is_err());
    }
}
