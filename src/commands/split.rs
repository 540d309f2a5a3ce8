use crate::ocr::{RecognizerConfig, TesseractRecognizer};
use crate::pdf::{PdfiumRasterizer, RasterConfig};
use crate::pipeline::{SplitReport, Splitter};
use anyhow::Result;
use std::path::Path;

/// Build the pdfium + Tesseract pipeline.
///
/// Neither engine is loaded until a readable input has been opened.
pub fn splitter(
    raster: &RasterConfig,
    recognizer: &RecognizerConfig,
) -> Splitter<PdfiumRasterizer, TesseractRecognizer> {
    Splitter::new(
        PdfiumRasterizer::new(raster),
        TesseractRecognizer::new(recognizer),
    )
}

pub fn split_pdf<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    raster: &RasterConfig,
    recognizer: &RecognizerConfig,
) -> Result<SplitReport> {
    let report = splitter(raster, recognizer).split(input.as_ref(), output_dir.as_ref())?;
    Ok(report)
}

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    raster: &RasterConfig,
    recognizer: &RecognizerConfig,
) -> Result<()> {
    let report = split_pdf(input, output_dir, raster, recognizer)?;

    for artifact in &report.artifacts {
        match &artifact.error {
            None => println!(
                "Created {} with {} pages",
                artifact.path.display(),
                artifact.pages.len()
            ),
            Some(e) => println!("Failed to write {}: {}", artifact.path.display(), e),
        }
    }

    report.ensure_complete()?;

    println!(
        "Split {} pages into {} file(s) in {}",
        report.page_count,
        report.artifacts.len(),
        report.output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitError;

    #[test]
    fn test_missing_input_reported_before_engines_load() {
        let dir = tempfile::tempdir().unwrap();
        let raster = RasterConfig {
            pdfium_library: Some(dir.path().join("no-pdfium-here")),
            ..RasterConfig::default()
        };
        let recognizer = RecognizerConfig {
            language: "no-such-language".to_string(),
            tessdata: Some(dir.path().to_path_buf()),
            ..RecognizerConfig::default()
        };
        let out = dir.path().join("output");

        let err = split_pdf(dir.path().join("missing.pdf"), &out, &raster, &recognizer)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SplitError>(),
            Some(SplitError::InputUnreadable { .. })
        ));
        assert!(!out.exists());
    }
}
