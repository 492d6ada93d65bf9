//! Source file discovery and cross-file augmentation.
//!
//! Walks the project root for files with the configured source extension and
//! builds one [`ContentFile`] per match; conversion is independent per file,
//! so it runs across a rayon pool. Two passes follow once every conversion
//! has completed:
//!
//! 1. notes augmentation: files rendered with the default `note` template
//!    are sorted by slug (alphanumeric, descending) and the resulting list
//!    is attached to the index file's extra-data bag under `notes`;
//! 2. output collision check: no two inputs may resolve to the same output
//!    path, since each output file must be owned by exactly one input.

use crate::{
    config::SiteConfig,
    content::{ContentFile, DEFAULT_TEMPLATE},
    convert::MarkupConverter,
    error::NotaError,
    utils::alphanum,
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde_json::Value;
use std::{collections::HashMap, path::PathBuf};
use walkdir::WalkDir;

/// Key under which the index file receives the sorted note list.
const NOTES_KEY: &str = "notes";

/// Discover and load every source file under the project root.
///
/// Files come back in traversal order; only the notes list is explicitly
/// sorted. All augmentation completes before the caller starts rendering.
pub fn discover(config: &SiteConfig, converter: &MarkupConverter) -> Result<Vec<ContentFile>> {
    let paths = collect_source_paths(config)?;

    let mut files: Vec<ContentFile> = paths
        .par_iter()
        .map(|path| {
            ContentFile::load(path, config, converter)
                .with_context(|| format!("while loading `{}`", path.display()))
        })
        .collect::<Result<_>>()?;

    attach_notes(&mut files, config);
    check_output_collisions(&files, config)?;

    Ok(files)
}

/// Recursively collect paths with the configured source extension.
fn collect_source_paths(config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let root = config.get_root();
    let mut paths = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("while walking `{}`", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .path()
            .extension()
            .is_some_and(|ext| ext == config.build.source_ext.as_str())
        {
            paths.push(entry.into_path());
        }
    }

    Ok(paths)
}

/// Attach the sorted note list to every file whose slug is the index slug.
///
/// Hard-codes the one cross-file relationship the site needs (the index's
/// chronological listing) instead of growing a query mechanism.
fn attach_notes(files: &mut [ContentFile], config: &SiteConfig) {
    let mut notes: Vec<&ContentFile> = files
        .iter()
        .filter(|f| f.template() == DEFAULT_TEMPLATE)
        .collect();
    notes.sort_by(|a, b| alphanum::compare_with(&a.slug, &b.slug, true));

    let entries: Vec<Value> = notes.iter().map(|f| f.listing_entry()).collect();

    for file in files.iter_mut() {
        if file.slug == config.build.index_slug {
            file.add_extra(NOTES_KEY, Value::Array(entries.clone()));
        }
    }
}

/// Fail when two inputs resolve to the same output path.
fn check_output_collisions(files: &[ContentFile], config: &SiteConfig) -> Result<()> {
    let mut seen: HashMap<PathBuf, &ContentFile> = HashMap::with_capacity(files.len());

    for file in files {
        let output = file.output_path(config);
        if let Some(first) = seen.insert(output.clone(), file) {
            bail!(NotaError::DuplicateOutputPath {
                output,
                first: first.source.clone(),
                second: file.source.clone(),
            });
        }
    }

    Ok(())
}
