//! TOML-based resource configuration.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::OEDB_URL;
use crate::smoothing::SmoothingParams;

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with
/// [`ResourceConfig::from_toml_file`] or use [`ResourceConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Local search directories.
    #[serde(default)]
    pub resources: DirectoryConfig,
    /// Remote turbine catalog.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Default fleet smoothing parameters.
    #[serde(default)]
    pub smoothing: SmoothingParams,
}

/// Local search directories for turbine and panel records.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    pub windturbine_dir: PathBuf,
    pub solarpanel_dir: PathBuf,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            windturbine_dir: PathBuf::from("resources/windturbine"),
            solarpanel_dir: PathBuf::from("resources/solarpanel"),
        }
    }
}

/// Remote turbine catalog location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: OEDB_URL.to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"smoothing.sigma"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ResourceConfig {
    /// Configuration with both search directories under `root`.
    pub fn with_root(root: &Path) -> Self {
        Self {
            resources: DirectoryConfig {
                windturbine_dir: root.join("windturbine"),
                solarpanel_dir: root.join("solarpanel"),
            },
            ..Self::default()
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// Relative directories are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            let dirs = &mut config.resources;
            dirs.windturbine_dir = base.join(&dirs.windturbine_dir);
            dirs.solarpanel_dir = base.join(&dirs.solarpanel_dir);
        }
        Ok(config)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let dirs = &self.resources;
        if dirs.windturbine_dir.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "resources.windturbine_dir".into(),
                message: "must not be empty".into(),
            });
        }
        if dirs.solarpanel_dir.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "resources.solarpanel_dir".into(),
                message: "must not be empty".into(),
            });
        }

        let url = &self.catalog.url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError {
                field: "catalog.url".into(),
                message: format!("must be an http(s) URL, got \"{url}\""),
            });
        }

        let sm = &self.smoothing;
        if !(sm.eta > 0.0 && sm.eta <= 1.0) {
            errors.push(ConfigError {
                field: "smoothing.eta".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(sm.sigma > 0.0) {
            errors.push(ConfigError {
                field: "smoothing.sigma".into(),
                message: "must be > 0".into(),
            });
        }
        if !sm.delta_v.is_finite() {
            errors.push(ConfigError {
                field: "smoothing.delta_v".into(),
                message: "must be finite".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_valid() {
        let errors = ResourceConfig::default().validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[resources]
windturbine_dir = "data/turbines"
solarpanel_dir = "data/panels"

[catalog]
url = "https://example.org/turbine_library/rows"

[smoothing]
eta = 0.9
delta_v = 1.0
sigma = 2.0
"#;
        let cfg = ResourceConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.resources.windturbine_dir.clone()),
            Some(PathBuf::from("data/turbines"))
        );
        assert_eq!(cfg.as_ref().map(|c| c.smoothing.sigma), Some(2.0));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ResourceConfig::from_toml_str("[smoothing]\neta = 0.8\n");
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.smoothing.eta), Some(0.8));
        assert_eq!(cfg.as_ref().map(|c| c.smoothing.sigma), Some(2.29));
        assert_eq!(cfg.as_ref().map(|c| c.catalog.url.as_str()), Some(OEDB_URL));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let result = ResourceConfig::from_toml_str("[resources]\nturbine_dir = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_bad_smoothing() {
        let mut cfg = ResourceConfig::default();
        cfg.smoothing.eta = 1.5;
        cfg.smoothing.sigma = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "smoothing.eta"));
        assert!(errors.iter().any(|e| e.field == "smoothing.sigma"));
    }

    #[test]
    fn validation_catches_bad_url() {
        let mut cfg = ResourceConfig::default();
        cfg.catalog.url = "ftp://example.org".into();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "catalog.url"));
    }

    #[test]
    fn file_relative_dirs_resolve_against_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("assets.toml");
        fs::write(&path, "[resources]\nwindturbine_dir = \"wt\"\n").expect("write");
        let cfg = ResourceConfig::from_toml_file(&path).expect("config");
        assert_eq!(cfg.resources.windturbine_dir, dir.path().join("wt"));
    }

    #[test]
    fn with_root_places_both_dirs() {
        let cfg = ResourceConfig::with_root(Path::new("/srv/assets"));
        assert_eq!(
            cfg.resources.solarpanel_dir,
            PathBuf::from("/srv/assets/solarpanel")
        );
    }
}
