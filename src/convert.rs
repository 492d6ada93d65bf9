//! External markup converter adapter.
//!
//! Wraps the configured converter command (multimarkdown by default) behind
//! the four invocation shapes the pipeline needs:
//!
//! | Operation         | Invocation          | Result                        |
//! |-------------------|---------------------|-------------------------------|
//! | `document_html`   | `-s <file>`         | HTML fragment of the body     |
//! | `metadata_fields` | `-m <file>`         | metadata field names, ordered |
//! | `metadata_value`  | `-e <field> <file>` | one extracted field value     |
//! | `inline_html`     | `-s` + stdin        | HTML fragment of a string     |
//!
//! All output is UTF-8 and trimmed; exit codes and stderr are checked on
//! every call, and each call carries the configured timeout.

use crate::{
    config::SiteConfig,
    error::NotaError,
    utils::exec::{self, ExecError},
};
use anyhow::Result;
use std::{
    ffi::OsString,
    path::Path,
    time::Duration,
};

/// Converter flag forcing snippet mode (fragment output, no document shell).
const SNIPPET_FLAG: &str = "-s";
/// Converter flag listing metadata field names, one per line.
const META_LIST_FLAG: &str = "-m";
/// Converter flag extracting a single metadata field value.
const META_EXTRACT_FLAG: &str = "-e";

/// Handle on the external markup converter.
#[derive(Debug, Clone)]
pub struct MarkupConverter {
    command: Vec<String>,
    timeout: Duration,
}

impl MarkupConverter {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            command: config.converter.command.clone(),
            timeout: config.converter_timeout(),
        }
    }

    /// Convert a whole source file to an HTML fragment.
    pub fn document_html(&self, path: &Path) -> Result<String> {
        let args = [OsString::from(SNIPPET_FLAG), path.into()];
        let output = self.run(&args, None, path)?;
        Ok(output.trim().to_owned())
    }

    /// List the metadata field names declared in a source file, in order.
    pub fn metadata_fields(&self, path: &Path) -> Result<Vec<String>> {
        let args = [OsString::from(META_LIST_FLAG), path.into()];
        let output = self.run(&args, None, path)?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }

    /// Extract a single metadata field value from a source file.
    pub fn metadata_value(&self, path: &Path, field: &str) -> Result<String> {
        let args = [
            OsString::from(META_EXTRACT_FLAG),
            field.into(),
            path.into(),
        ];
        let output = self.run(&args, None, path)?;
        Ok(output.trim().to_owned())
    }

    /// Convert an inline markup string to an HTML fragment via stdin.
    ///
    /// The payload is prefixed with a newline so a leading `key: value` line
    /// is treated as content rather than swallowed as metadata.
    pub fn inline_html(&self, markup: &str) -> Result<String> {
        if markup.is_empty() {
            return Ok(String::new());
        }

        let payload = format!("\n{markup}");
        let args = [OsString::from(SNIPPET_FLAG)];
        let output = self.run(&args, Some(&payload), Path::new("<inline markup>"))?;
        Ok(output.trim().to_owned())
    }

    /// Run the converter, mapping failures into the build error taxonomy.
    fn run(&self, args: &[OsString], stdin: Option<&str>, path: &Path) -> Result<String> {
        exec::run(&self.command, args, stdin, self.timeout).map_err(|err| match err {
            ExecError::Timeout { timeout, .. } => NotaError::ConversionTimeout {
                path: path.to_path_buf(),
                secs: timeout.as_secs(),
            }
            .into(),
            source => NotaError::Conversion {
                path: path.to_path_buf(),
                source,
            }
            .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn stub_converter(dir: &TempDir) -> MarkupConverter {
        let config = testing::stub_config(dir.path());
        MarkupConverter::new(&config)
    }

    fn write_note(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_document_html() {
        let dir = TempDir::new().unwrap();
        let converter = stub_converter(&dir);
        let note = write_note(&dir, "a.markdown", "title: A\n\nhello body\n");

        let html = converter.document_html(&note).unwrap();
        assert_eq!(html, "<p>hello body</p>");
    }

    #[test]
    fn test_metadata_fields_ordered() {
        let dir = TempDir::new().unwrap();
        let converter = stub_converter(&dir);
        let note = write_note(&dir, "a.markdown", "title: A\ndate: 2020-01-01\n\nbody\n");

        let fields = converter.metadata_fields(&note).unwrap();
        assert_eq!(fields, vec!["title", "date"]);
    }

    #[test]
    fn test_metadata_fields_empty_for_plain_document() {
        let dir = TempDir::new().unwrap();
        let converter = stub_converter(&dir);
        let note = write_note(&dir, "a.markdown", "\njust a body\n");

        assert!(converter.metadata_fields(&note).unwrap().is_empty());
    }

    #[test]
    fn test_metadata_value_trimmed() {
        let dir = TempDir::new().unwrap();
        let converter = stub_converter(&dir);
        let note = write_note(&dir, "a.markdown", "title:    Spaced Out   \n\nbody\n");

        assert_eq!(converter.metadata_value(&note, "title").unwrap(), "Spaced Out");
    }

    #[test]
    fn test_inline_html() {
        let dir = TempDir::new().unwrap();
        let converter = stub_converter(&dir);

        let html = converter.inline_html("some words").unwrap();
        assert_eq!(html, "<p>some words</p>");
    }

    #[test]
    fn test_inline_html_empty_is_empty() {
        let dir = TempDir::new().unwrap();
        let converter = stub_converter(&dir);
        assert_eq!(converter.inline_html("").unwrap(), "");
    }

    #[test]
    fn test_missing_converter_is_conversion_error() {
        let mut config = SiteConfig::default();
        config.converter.command = vec!["/no/such/converter".into()];
        let converter = MarkupConverter::new(&config);

        let err = converter
            .document_html(Path::new("whatever.markdown"))
            .unwrap_err();
        let err = err.downcast::<NotaError>().unwrap();
        assert!(matches!(err, NotaError::Conversion { .. }));
    }

    #[test]
    fn test_nonzero_exit_is_conversion_error() {
        let dir = TempDir::new().unwrap();
        let converter = stub_converter(&dir);
        let missing = dir.path().join("missing.markdown");

        // Stub's sed fails on the nonexistent file
        let err = converter.document_html(&missing).unwrap_err();
        assert!(matches!(
            err.downcast::<NotaError>().unwrap(),
            NotaError::Conversion { .. }
        ));
    }

    #[test]
    fn test_hung_converter_times_out() {
        let mut config = SiteConfig::default();
        // Extra flag/path args land in $0/$@ of the -c script and are ignored
        config.converter.command = vec!["sh".into(), "-c".into(), "sleep 30".into(), "sh".into()];
        config.converter.timeout_secs = 1;
        let converter = MarkupConverter::new(&config);

        let err = converter
            .document_html(Path::new("a.markdown"))
            .unwrap_err();
        assert!(matches!(
            err.downcast::<NotaError>().unwrap(),
            NotaError::ConversionTimeout { .. }
        ));
    }
}
