//! Locating and reading the `umlapse` TOML configuration.
//!
//! A configuration given on the command line always wins. Otherwise the
//! first existing file among the search locations is used, and when there
//! is none the built-in defaults apply.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use umlapse::{UmlapseError, config::AppConfig};

const LOCAL_CONFIG: &str = "umlapse/config.toml";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Failures while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for UmlapseError {
    fn from(err: ConfigError) -> Self {
        UmlapseError::Config(err.to_string())
    }
}

/// Resolves the configuration for a run.
///
/// Locations, in priority order:
/// 1. `explicit_path`, which must exist when given
/// 2. `umlapse/config.toml` under the working directory
/// 3. `config.toml` in the per-user configuration directory
///
/// Falls back to [`AppConfig::default`] when no location has a file.
///
/// # Arguments
///
/// * `explicit_path` - Path passed with `--config`, if any
///
/// # Errors
///
/// Returns [`UmlapseError::Config`] when the explicit file is missing or the
/// selected file is not valid TOML for [`AppConfig`], and
/// [`UmlapseError::Io`] when it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, UmlapseError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    for (origin, path) in search_locations() {
        if path.exists() {
            info!(origin, path = path.display().to_string(); "Loading configuration");
            return load_config_file(&path);
        }
        debug!(origin, path = path.display().to_string(); "Configuration file not found");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Implicit configuration locations, each tagged with where it comes from.
fn search_locations() -> Vec<(&'static str, PathBuf)> {
    let mut locations = vec![("local", PathBuf::from(LOCAL_CONFIG))];
    match ProjectDirs::from("com", "umlapse", "umlapse") {
        Some(dirs) => locations.push(("system", dirs.config_dir().join(CONFIG_FILE_NAME))),
        None => debug!("Could not determine platform-specific config directory"),
    }
    locations
}

/// Reads and deserializes one configuration file.
///
/// # Arguments
///
/// * `path` - Location of the TOML file
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] or [`ConfigError::Parse`] converted
/// into [`UmlapseError`], or the I/O error from reading the file.
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, UmlapseError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_explicit_config_is_loaded() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[style]\nbackground_color = \"#411F48\"\n\n[history]\nclean_frames = true"
        )
        .expect("write config");

        let config = load_config(Some(file.path())).expect("valid config");
        assert_eq!(config.style().background_color(), "#411F48");
        assert!(config.history().clean_frames());
    }

    #[test]
    fn test_search_locations_start_local() {
        let locations = search_locations();
        assert_eq!(locations[0], ("local", PathBuf::from("umlapse/config.toml")));
        assert!(locations.iter().skip(1).all(|(origin, _)| *origin == "system"));
    }

    #[test]
    fn test_missing_explicit_config() {
        let err = load_config(Some("does/not/exist.toml")).expect_err("missing file");
        assert!(matches!(
            err,
            UmlapseError::Config(ref msg) if msg.starts_with("Missing configuration file")
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[style\nnode_color = ").expect("write config");

        let err = load_config(Some(file.path())).expect_err("invalid toml");
        assert!(matches!(
            err,
            UmlapseError::Config(ref msg) if msg.starts_with("Failed to parse TOML")
        ));
    }
}
