//! Opening rendered output with the platform's default application.

use crate::config::SiteConfig;
use anyhow::{Context, Result, bail};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

/// Open the rendered index page in the default browser.
pub fn view_site(config: &SiteConfig) -> Result<()> {
    let index = index_output(config);
    if !index.is_file() {
        bail!(
            "`{}` does not exist. Have you run `nota make`?",
            index.display()
        );
    }

    crate::log!("view"; "opening `{}`", index.display());
    open_path(&index)
}

/// Open a file with the platform opener.
pub fn open_path(path: &Path) -> Result<()> {
    let status = opener(path)
        .status()
        .with_context(|| format!("while opening `{}`", path.display()))?;

    if !status.success() {
        bail!("opener exited with {status} for `{}`", path.display());
    }
    Ok(())
}

fn index_output(config: &SiteConfig) -> PathBuf {
    config.get_root().join(format!(
        "{}.{}",
        config.build.index_slug, config.build.output_ext
    ))
}

#[cfg(target_os = "macos")]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
