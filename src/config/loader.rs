use std::fs;
use std::path::{Path, PathBuf};

use super::core::ReportConfig;
use crate::errors::{ReportError, Result};

pub const CONFIG_FILE_NAME: &str = ".a11y-report.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string.
pub fn parse_config(contents: &str) -> std::result::Result<ReportConfig, String> {
    let config = toml::from_str::<ReportConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Load an explicitly requested config file. Any failure is an error.
pub fn load_config_file(path: &Path) -> Result<ReportConfig> {
    let contents = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents)
        .map_err(|message| ReportError::config(message, Some(path.to_path_buf())))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Config at `config_path`, or `None` when it is missing or unusable.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ReportConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Only log actual errors, not "file not found".
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its ancestors, at most `max_depth` directories.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for the config file; defaults if none
/// is usable.
pub fn load_config_from(start: PathBuf) -> ReportConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ReportConfig::default()
        })
}

/// Search from the working directory.
pub fn load_config() -> ReportConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ReportConfig::default()
        }
    }
}

/// Explicit path if given, otherwise the directory search.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ReportConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => Ok(load_config()),
    }
}
