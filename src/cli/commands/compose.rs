use anyhow::Result;
use log::info;
use std::path::{ Path, PathBuf };

use crate::cli::ui;
use epubdiff::composer::compose_comparison;
use epubdiff::config::ComposerConfig;

/// Comparison composition command
pub fn execute(
    book: &str,
    chapter: &str,
    output_dir: &Path,
    config: &ComposerConfig
) -> Result<PathBuf> {
    info!("Composing comparison for {} chapter {} in {}", book, chapter, output_dir.display());

    let output = compose_comparison(book, chapter, output_dir, config)?;

    ui::print_success(format!("Comparison image saved to: {}", output.display()).as_str());
    Ok(output)
}
