//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use cdu::{CduError, config::AppConfig};

/// Local configuration path, relative to the working directory.
const LOCAL_CONFIG_PATH: &str = "cdu/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for CduError {
    fn from(err: ConfigError) -> Self {
        CduError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (cdu/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CduError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG_PATH);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("org", "webcdu", "cdu") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CduError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.parser().section_marker().trim().is_empty() {
        return Err(ConfigError::Validation(
            "parser.section_marker must not be empty".to_string(),
        ));
    }

    let layout = config.layout();
    for (name, spacing) in [
        ("layout.horizontal_spacing", layout.horizontal_spacing()),
        ("layout.vertical_spacing", layout.vertical_spacing()),
    ] {
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{name} must be a non-negative number, got {spacing}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use cdu::block_type::ContinuationMode;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [parser]
            continuation_mode = "standard"
            section_marker = "CDUX"

            [layout]
            enabled = true
            horizontal_spacing = 300.0
            "#,
        )
        .unwrap();

        assert_eq!(config.parser().continuation_mode(), ContinuationMode::Standard);
        assert_eq!(config.parser().section_marker(), "CDUX");
        assert!(config.layout().enabled());
        assert_eq!(config.layout().horizontal_spacing(), 300.0);
        assert_eq!(config.layout().vertical_spacing(), 120.0);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();

        assert_eq!(config.parser().continuation_mode(), ContinuationMode::Extended);
        assert!(!config.layout().enabled());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[parser\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = parse_config("[parser]\ncontinuation_mode = \"loose\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let err = parse_config("[parser]\nsection_marker = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = parse_config("[layout]\nvertical_spacing = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("layout.vertical_spacing"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();

        assert!(matches!(err, CduError::Config(_)));
        assert!(err.to_string().contains("Missing configuration file"));
    }
}
