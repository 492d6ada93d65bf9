//! Discovered source documents and their template-facing data.
//!
//! A [`ContentFile`] is built once per discovered source file: identity
//! fields derive from the path, the metadata map and HTML body come from the
//! external converter, and the extra-data bag picks up cross-file values
//! (the index page's `notes` list) after discovery.

use crate::{config::SiteConfig, convert::MarkupConverter};
use anyhow::Result;
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Template used when a source file declares none.
pub const DEFAULT_TEMPLATE: &str = "note";

/// Metadata keys present on every file, declared or not.
const DEFAULT_METADATA_KEYS: [&str; 4] = ["title", "author", "date", "tags"];

/// One discovered source document.
///
/// Identity fields are immutable after construction; `metadata` and `extra`
/// only grow through the discovery-time merge passes.
#[derive(Debug, Clone)]
pub struct ContentFile {
    /// Full path of the source file.
    pub source: PathBuf,
    /// Directory containing the source file.
    pub dir: PathBuf,
    /// File name with extension.
    pub name: String,
    /// File name without extension.
    pub slug: String,
    /// Full path without extension; `id` + output extension is the unique
    /// output path.
    pub id: PathBuf,
    /// Source file extension.
    pub ext: String,
    /// Output path as a string, for links in templates.
    pub url: String,
    /// Converted HTML body (may be empty).
    pub html: String,
    /// Metadata map; always contains the default keys plus `template`.
    pub metadata: BTreeMap<String, Option<String>>,
    /// Open-ended bag of extra template values attached after construction.
    pub extra: Map<String, Value>,
}

impl ContentFile {
    /// Build a ContentFile from a source path, extracting metadata and
    /// converting the body through the external converter.
    pub fn load(path: &Path, config: &SiteConfig, converter: &MarkupConverter) -> Result<Self> {
        let dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = dir.join(&slug);
        let output = append_extension(&id, &config.build.output_ext);

        let mut metadata: BTreeMap<String, Option<String>> = DEFAULT_METADATA_KEYS
            .iter()
            .map(|key| ((*key).to_owned(), None))
            .collect();
        metadata.insert("template".to_owned(), Some(DEFAULT_TEMPLATE.to_owned()));

        // Source-declared fields override defaults; unknown fields merge in
        for field in converter.metadata_fields(path)? {
            let value = converter.metadata_value(path, &field)?;
            metadata.insert(field, Some(value));
        }

        let html = converter.document_html(path)?;

        Ok(Self {
            source: path.to_path_buf(),
            dir,
            name,
            slug,
            id,
            ext,
            url: output.to_string_lossy().into_owned(),
            html,
            metadata,
            extra: Map::new(),
        })
    }

    /// Name of the template this file renders with.
    pub fn template(&self) -> &str {
        self.metadata
            .get("template")
            .and_then(|t| t.as_deref())
            .unwrap_or(DEFAULT_TEMPLATE)
    }

    /// The output path this file renders to.
    pub fn output_path(&self, config: &SiteConfig) -> PathBuf {
        append_extension(&self.id, &config.build.output_ext)
    }

    /// Attach an extra template value (e.g. the index page's `notes` list).
    pub fn add_extra(&mut self, key: &str, value: Value) {
        self.extra.insert(key.to_owned(), value);
    }

    /// Full template context: metadata entries, then extra entries, then
    /// identity fields. Identity fields are inserted last so they win when a
    /// metadata or extra key collides with one.
    pub fn template_context(&self) -> Map<String, Value> {
        let mut ctx = self.metadata_entries();
        for (key, value) in &self.extra {
            ctx.insert(key.clone(), value.clone());
        }
        self.insert_identity(&mut ctx);
        ctx
    }

    /// Context used when this file appears inside another file's `notes`
    /// list: the full field set minus the extra bag.
    pub fn listing_entry(&self) -> Value {
        let mut ctx = self.metadata_entries();
        self.insert_identity(&mut ctx);
        Value::Object(ctx)
    }

    fn metadata_entries(&self) -> Map<String, Value> {
        self.metadata
            .iter()
            .map(|(key, value)| {
                let value = value.clone().map_or(Value::Null, Value::String);
                (key.clone(), value)
            })
            .collect()
    }

    fn insert_identity(&self, ctx: &mut Map<String, Value>) {
        ctx.insert("source".into(), path_value(&self.source));
        ctx.insert("dir".into(), path_value(&self.dir));
        ctx.insert("name".into(), Value::String(self.name.clone()));
        ctx.insert("slug".into(), Value::String(self.slug.clone()));
        ctx.insert("id".into(), path_value(&self.id));
        ctx.insert("ext".into(), Value::String(self.ext.clone()));
        ctx.insert("url".into(), Value::String(self.url.clone()));
        ctx.insert("html".into(), Value::String(self.html.clone()));
    }
}

fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

/// Append an extension without touching dots already in the file stem, so
/// `2020-01-01-v1.2` keeps its full slug in the output name.
fn append_extension(id: &Path, ext: &str) -> PathBuf {
    let mut os: OsString = id.as_os_str().to_owned();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}
