//! Nota - a static publisher for plain-text notes.

mod build;
mod cli;
mod config;
mod content;
mod convert;
mod discover;
mod error;
mod fragment;
mod init;
mod template;
#[cfg(test)]
mod testing;
mod utils;
mod view;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::{init_site, new_note};
use view::{open_path, view_site};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(SiteConfig::load(cli)?));

    // The converter is only invoked by a build
    if cli.is_make() {
        config.validate()?;
    }

    match &cli.command {
        Commands::Init => init_site(config).map(|_| ()),
        Commands::New { title } => {
            let note = new_note(config, title.clone())?;
            open_path(&note)
        }
        Commands::Make => build_site(config),
        Commands::View => view_site(config),
    }
}
