//! Project scaffolding: `init` and `new`.
//!
//! Both commands create a single source file and never overwrite anything
//! that already exists.

use crate::{config::SiteConfig, utils::slug};
use anyhow::{Context, Result, bail};
use chrono::Local;
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

/// Seed a directory with an index source file.
pub fn init_site(config: &SiteConfig) -> Result<PathBuf> {
    let path = config
        .get_root()
        .join(format!("index.{}", config.build.source_ext));
    refuse_overwrite(&path)?;

    let contents = "title:      Notes\ntemplate:   index\n\n____\n";
    fs::write(&path, contents)
        .with_context(|| format!("while creating `{}`", path.display()))?;

    crate::log!("init"; "created `{}`", path.display());
    Ok(path)
}

/// Create a dated note skeleton, prompting for a title when none is given.
pub fn new_note(config: &SiteConfig, title: Option<String>) -> Result<PathBuf> {
    let title = match title {
        Some(title) => title,
        None => prompt_title()?,
    };

    let now = Local::now();
    let path = config.get_root().join(format!(
        "{}-{}.{}",
        now.format("%Y-%m-%d"),
        slug::slugify(&title),
        config.build.source_ext
    ));
    refuse_overwrite(&path)?;

    let contents = format!(
        "title:  {title}\nauthor: \ndate:   {}\n\n",
        now.format("%A, %d %B %Y")
    );
    fs::write(&path, contents)
        .with_context(|| format!("while creating `{}`", path.display()))?;

    crate::log!("new"; "created `{}`", path.display());
    Ok(path)
}

fn refuse_overwrite(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("`{}` already exists; refusing to overwrite", path.display());
    }
    Ok(())
}

fn prompt_title() -> Result<String> {
    print!("Title of new note: ");
    io::stdout().flush().context("while flushing stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("while reading the note title")?;

    let title = line.trim().to_owned();
    if title.is_empty() {
        bail!("a note needs a title");
    }
    Ok(title)
}
