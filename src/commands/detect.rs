use crate::commands::split::splitter;
use crate::ocr::RecognizerConfig;
use crate::pdf::RasterConfig;
use crate::pipeline::PageGroups;
use anyhow::Result;
use std::fmt::Write;
use std::path::Path;

/// One `page <n>: <label>` line per source page, a blank line, then one
/// `<label>: <pages>` line per group.
pub fn format_detection(groups: &PageGroups) -> String {
    if groups.is_empty() {
        return "No pages found.\n".to_string();
    }

    let mut out = String::new();
    for (idx, label) in groups.labels_by_page().into_iter().enumerate() {
        let _ = writeln!(out, "page {}: {}", idx + 1, label);
    }

    out.push('\n');
    for (label, ordinals) in groups.iter() {
        let pages: Vec<String> = ordinals.iter().map(|o| (o + 1).to_string()).collect();
        let _ = writeln!(out, "{}: {}", label, pages.join(","));
    }
    out
}

pub fn run<P: AsRef<Path>>(
    input: P,
    raster: &RasterConfig,
    recognizer: &RecognizerConfig,
) -> Result<()> {
    let (_, groups) = splitter(raster, recognizer).classify(input.as_ref())?;
    print!("{}", format_detection(&groups));
    Ok(())
}
