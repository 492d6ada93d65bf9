//! Build error taxonomy.
//!
//! Every failure aborts the whole run; there is no partial-output mode.
//! These variants exist so the abort message names the offending file,
//! template, or output path.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering, converting, and rendering notes.
#[derive(Debug, Error)]
pub enum NotaError {
    #[error("failed to convert `{path}`: {source}")]
    Conversion {
        path: PathBuf,
        #[source]
        source: crate::utils::exec::ExecError,
    },

    #[error("converter timed out on `{path}` after {secs}s")]
    ConversionTimeout { path: PathBuf, secs: u64 },

    #[error("template `{0}` not found in template directory")]
    TemplateNotFound(String),

    #[error("`{source_file}` references template `{template}`, which was never loaded")]
    UnknownTemplate {
        template: String,
        source_file: PathBuf,
    },

    #[error("malformed HTML fragment: {0}")]
    MalformedFragment(String),

    #[error(
        "`{first}` and `{second}` both resolve to output path `{output}`"
    )]
    DuplicateOutputPath {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}
