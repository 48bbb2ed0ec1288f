//! Report configuration and its loader.

mod core;
mod loader;

pub use self::core::{OutputConfig, ReportConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from, parse_config,
    resolve_config, CONFIG_FILE_NAME,
};
