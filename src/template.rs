//! Template loading and rendering.
//!
//! Templates live in the configured template directory as `<name>.template`
//! files and are addressed by bare name. Only names actually referenced by a
//! discovered file get loaded; `render_and_write` then renders a file's full
//! context and writes the output in one buffer, BOM first.
//!
//! Three filters are exposed to template text:
//!
//! | Filter   | Effect                                                |
//! |----------|-------------------------------------------------------|
//! | `dedent` | strip common leading whitespace from a block          |
//! | `inline` | strip the outer tag from a converted fragment         |
//! | `markup` | convert an inline markup string to HTML               |

use crate::{
    config::SiteConfig, content::ContentFile, convert::MarkupConverter, error::NotaError,
    fragment,
};
use anyhow::{Context, Result, bail};
use minijinja::{Environment, ErrorKind, path_loader, value::Value};
use std::{collections::HashSet, fs};

/// Suffix appended to a template name to resolve its file.
const TEMPLATE_EXT: &str = ".template";

/// Byte-order mark written ahead of every rendered output file.
const BOM: &str = "\u{feff}";

/// Loads named templates and renders content files against them.
pub struct TemplateEngine {
    env: Environment<'static>,
    loaded: HashSet<String>,
}

impl TemplateEngine {
    pub fn new(config: &SiteConfig, converter: &MarkupConverter) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(config.template_dir()));
        // Block tags own their line: no stray indentation or newlines leak
        // into the rendered HTML
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        env.add_filter("dedent", dedent_filter);
        env.add_filter("inline", inline_filter);

        let converter = converter.clone();
        env.add_filter(
            "markup",
            move |value: Option<String>| -> Result<String, minijinja::Error> {
                match value {
                    None => Ok(String::new()),
                    Some(markup) => converter.inline_html(&markup).map_err(filter_error),
                }
            },
        );

        Self {
            env,
            loaded: HashSet::new(),
        }
    }

    /// Resolve and compile each named template, caching it for rendering.
    pub fn load<I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        for name in names {
            match self.env.get_template(&template_file(&name)) {
                Ok(_) => {
                    self.loaded.insert(name);
                }
                Err(err) if err.kind() == ErrorKind::TemplateNotFound => {
                    bail!(NotaError::TemplateNotFound(name));
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("while compiling template `{name}`"));
                }
            }
        }

        Ok(())
    }

    /// Render a content file with its declared template and write the result
    /// to `id` + output extension, overwriting any existing file.
    pub fn render_and_write(&self, file: &ContentFile, config: &SiteConfig) -> Result<()> {
        let name = file.template();
        if !self.loaded.contains(name) {
            // Unreachable through the normal build flow, which loads every
            // referenced name up front
            bail!(NotaError::UnknownTemplate {
                template: name.to_owned(),
                source_file: file.source.clone(),
            });
        }

        let template = self
            .env
            .get_template(&template_file(name))
            .with_context(|| format!("while fetching template `{name}`"))?;

        let rendered = template
            .render(Value::from_serialize(file.template_context()))
            .with_context(|| format!("while rendering `{}`", file.source.display()))?;

        let output = file.output_path(config);
        fs::write(&output, format!("{BOM}{rendered}"))
            .with_context(|| format!("while writing `{}`", output.display()))?;

        Ok(())
    }
}

fn template_file(name: &str) -> String {
    format!("{name}{TEMPLATE_EXT}")
}

fn filter_error(err: anyhow::Error) -> minijinja::Error {
    minijinja::Error::new(ErrorKind::InvalidOperation, format!("{err:#}"))
}

/// `dedent` filter: remove the common leading whitespace of all non-blank
/// lines, for embedding pre-formatted blocks cleanly.
fn dedent_filter(value: Option<String>) -> String {
    value.as_deref().map(dedent).unwrap_or_default()
}

/// `inline` filter: strip the outermost tag from a converted fragment.
fn inline_filter(value: Option<String>) -> Result<String, minijinja::Error> {
    match value {
        None => Ok(String::new()),
        Some(html) => fragment::inner_html(&html).map_err(filter_error),
    }
}

fn dedent(text: &str) -> String {
    let mut prefix: Option<&str> = None;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = &line[..line.len() - line.trim_start().len()];
        prefix = Some(match prefix {
            None => indent,
            Some(common) => common_prefix(common, indent),
        });
    }
    let prefix = prefix.unwrap_or("");

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        // Whitespace-only lines may be shorter than the prefix
        out.push_str(line.strip_prefix(prefix).unwrap_or(line));
    }
    out
}

/// Longest shared leading substring of two indents.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .last()
        .map_or(0, |((i, ca), _)| i + ca.len_utf8());
    &a[..end]
}
