//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Nota static note publisher CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: nota.toml)
    #[arg(short = 'C', long, default_value = "nota.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Seed the root with an index source file
    Init,

    /// Create a dated note skeleton and open it for editing
    New {
        /// Title of the note (prompted for when absent)
        title: Option<String>,
    },

    /// Render every source file to its output file
    Make,

    /// Open the rendered index page in the default browser
    View,
}

impl Cli {
    pub const fn is_make(&self) -> bool {
        matches!(self.command, Commands::Make)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_make_with_root() {
        let cli = Cli::try_parse_from(["nota", "--root", "/site", "make"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/site")));
        assert_eq!(cli.config, PathBuf::from("nota.toml"));
        assert!(cli.is_make());
    }

    #[test]
    fn test_parse_new_with_title() {
        let cli = Cli::try_parse_from(["nota", "new", "My Note"]).unwrap();
        let Commands::New { title } = cli.command else {
            panic!("expected the new subcommand");
        };
        assert_eq!(title.as_deref(), Some("My Note"));
    }

    #[test]
    fn test_no_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["nota"]).is_err());
    }
}
