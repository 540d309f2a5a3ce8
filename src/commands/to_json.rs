use crate::pdf::text::extract_text;
use crate::pdf::PdfDocument;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TextExport {
    pub filename: String,
    pub content: String,
    pub num_characters: usize,
}

/// Write the text of `input` to `<output_dir>/<stem>.json`.
///
/// Returns the JSON path and the document's page count.
pub fn export<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> Result<(PathBuf, usize)> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    let page_count = PdfDocument::open(input)?.page_count();
    let content = extract_text(input)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let json_path = output_dir.join(format!("{}.json", stem));

    let export = TextExport {
        filename: input.display().to_string(),
        num_characters: content.chars().count(),
        content,
    };
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(&json_path, json)
        .with_context(|| format!("Failed to write JSON: {}", json_path.display()))?;

    Ok((json_path, page_count))
}

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> Result<()> {
    let (json_path, page_count) = export(input, output_dir)?;
    println!("Number of pages: {}", page_count);
    println!("JSON file created successfully: {}", json_path.display());
    Ok(())
}
