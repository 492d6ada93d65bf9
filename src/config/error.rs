//! Errors raised while loading `nota.toml`.
//!
//! Parse errors carry no path themselves; `SiteConfig::from_path` wraps them
//! with the file name so the message stays actionable.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
