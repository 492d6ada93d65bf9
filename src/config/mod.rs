//! Project configuration management for `nota.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                         |
//! |---------------|-------------------------------------------------|
//! | `[build]`     | Source/output extensions, templates, index slug |
//! | `[converter]` | External markup converter command and timeout   |
//!
//! # Example
//!
//! ```toml
//! [build]
//! source_ext = "markdown"
//! templates  = "templates"
//!
//! [converter]
//! command = ["multimarkdown"]
//! timeout_secs = 30
//! ```
//!
//! The config file is optional; every field has a default, so a bare
//! directory of notes builds without one.

mod defaults;
mod error;

use error::ConfigError;

use crate::cli::Cli;
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing nota.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// External converter settings
    #[serde(default)]
    pub converter: ConverterConfig,
}

/// `[build]` section in nota.toml - discovery and output settings.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(skip)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Extension of source files, without the leading dot.
    #[serde(default = "defaults::build::source_ext")]
    #[educe(Default = defaults::build::source_ext())]
    pub source_ext: String,

    /// Extension of rendered output files, without the leading dot.
    #[serde(default = "defaults::build::output_ext")]
    #[educe(Default = defaults::build::output_ext())]
    pub output_ext: String,

    /// Template search directory, relative to the project root.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Slug of the file that receives the aggregate `notes` list.
    #[serde(default = "defaults::build::index_slug")]
    #[educe(Default = defaults::build::index_slug())]
    pub index_slug: String,
}

/// `[converter]` section in nota.toml - the external markup converter.
///
/// The first element of `command` is the program; remaining elements are
/// leading arguments prepended to every invocation.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    #[serde(default = "defaults::converter::command")]
    #[educe(Default = defaults::converter::command())]
    pub command: Vec<String>,

    /// Upper bound on a single converter invocation, in seconds.
    #[serde(default = "defaults::converter::timeout_secs")]
    #[educe(Default = defaults::converter::timeout_secs())]
    pub timeout_secs: u64,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)
            .with_context(|| format!("in config file `{}`", path.display()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load configuration for the given CLI invocation.
    ///
    /// Uses `<root>/<config>` when it exists, defaults otherwise.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Template search directory, resolved against the root.
    pub fn template_dir(&self) -> PathBuf {
        self.get_root().join(&self.build.templates)
    }

    /// Per-invocation converter timeout.
    pub fn converter_timeout(&self) -> Duration {
        Duration::from_secs(self.converter.timeout_secs)
    }

    /// Update configuration with CLI arguments
    fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(root) = cli.root.as_deref() {
            self.set_root(root);
        }
    }

    /// Validate configuration before a build.
    pub fn validate(&self) -> Result<()> {
        if self.build.source_ext.is_empty() {
            bail!(ConfigError::Validation(
                "[build.source_ext] must not be empty".into()
            ));
        }
        if self.build.output_ext.is_empty() {
            bail!(ConfigError::Validation(
                "[build.output_ext] must not be empty".into()
            ));
        }
        if self.converter.timeout_secs == 0 {
            bail!(ConfigError::Validation(
                "[converter.timeout_secs] must be at least 1".into()
            ));
        }

        Self::check_command_installed("[converter.command]", &self.converter.command)?;

        Ok(())
    }

    /// Check if a command is installed and available
    fn check_command_installed(field: &str, command: &[String]) -> Result<()> {
        if command.is_empty() {
            bail!(ConfigError::Validation(format!(
                "{field} must have at least one element"
            )));
        }

        let cmd = &command[0];

        // Absolute or relative paths bypass PATH lookup; check them directly.
        if cmd.contains(std::path::MAIN_SEPARATOR) {
            if !Path::new(cmd).is_file() {
                bail!(ConfigError::Validation(format!("{field}: `{cmd}` not found")));
            }
            return Ok(());
        }

        which::which(cmd)
            .with_context(|| format!("`{cmd}` not found. Please install it first."))?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
