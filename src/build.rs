//! Full site build: discover, load templates, render, write.

use crate::{
    config::SiteConfig, convert::MarkupConverter, discover, template::TemplateEngine,
};
use anyhow::Result;
use std::{collections::BTreeSet, time::Instant};

/// Build the whole site under the configured root.
///
/// Discovery (including conversion) completes before any output is written,
/// so a conversion failure leaves every existing output file untouched.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let start = Instant::now();

    let converter = MarkupConverter::new(config);
    let files = discover::discover(config, &converter)?;

    let names: BTreeSet<String> = files.iter().map(|f| f.template().to_owned()).collect();
    let mut engine = TemplateEngine::new(config, &converter);
    engine.load(names)?;

    for file in &files {
        engine.render_and_write(file, config)?;
    }

    crate::log!(
        "make";
        "rendered {} files in {:.2}s",
        files.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
