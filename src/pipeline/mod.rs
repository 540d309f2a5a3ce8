pub mod emit;
pub mod grouping;

use std::path::Path;
use tracing::info;

use crate::error::SplitError;
use crate::ocr::TextRecognizer;
use crate::pdf::{PageRasterizer, PdfDocument};

pub use emit::SplitReport;
pub use grouping::{group_pages, PageGroups};

/// Splits a scanned PDF into one document per OCR'd page number.
pub struct Splitter<R, T> {
    rasterizer: R,
    recognizer: T,
}

impl<R: PageRasterizer, T: TextRecognizer> Splitter<R, T> {
    pub fn new(rasterizer: R, recognizer: T) -> Self {
        Self {
            rasterizer,
            recognizer,
        }
    }

    /// Read the source and assign every page to a group, without writing anything.
    pub fn classify(&mut self, input: &Path) -> Result<(PdfDocument, PageGroups), SplitError> {
        let doc = PdfDocument::open(input).map_err(|source| SplitError::InputUnreadable {
            path: input.to_path_buf(),
            source,
        })?;

        let images = self
            .rasterizer
            .rasterize(input)
            .map_err(|source| SplitError::Rasterize {
                path: input.to_path_buf(),
                source,
            })?;

        if images.len() != doc.page_count() {
            return Err(SplitError::PageCountMismatch {
                path: input.to_path_buf(),
                expected: doc.page_count(),
                rendered: images.len(),
            });
        }

        let groups = group_pages(&images, &mut self.recognizer);
        Ok((doc, groups))
    }

    /// Classify `input` and write its groups under `output_dir`.
    ///
    /// Per-file write failures are recorded in the report rather than
    /// returned; see [`SplitReport::ensure_complete`].
    pub fn split(&mut self, input: &Path, output_dir: &Path) -> Result<SplitReport, SplitError> {
        let (doc, groups) = self.classify(input)?;
        info!(
            "Found {} group(s) across {} page(s)",
            groups.len(),
            groups.page_count()
        );

        let artifacts = emit::emit_groups(&doc, &groups, output_dir)?;

        Ok(SplitReport {
            source: input.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            page_count: groups.page_count(),
            artifacts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::grouping::testing::{blank_pages, ScriptedRecognizer};
    use super::*;
    use crate::error::RecognizeError;
    use crate::ocr::Label;
    use crate::pdf::document::fixtures::{page_markers, write_document_with_markers};
    use image::DynamicImage;

    /// Renders a fixed number of blank pages regardless of input.
    struct BlankRasterizer {
        pages: usize,
    }

    impl PageRasterizer for BlankRasterizer {
        fn rasterize(&self, _path: &Path) -> anyhow::Result<Vec<DynamicImage>> {
            Ok(blank_pages(self.pages))
        }
    }

    struct FailingRasterizer;

    impl PageRasterizer for FailingRasterizer {
        fn rasterize(&self, _path: &Path) -> anyhow::Result<Vec<DynamicImage>> {
            anyhow::bail!("pdfium could not load the document")
        }
    }

    /// Stands in for an OCR engine that could not be initialized.
    struct UnavailableRecognizer;

    impl TextRecognizer for UnavailableRecognizer {
        fn recognize(&mut self, _region: &DynamicImage) -> Result<String, RecognizeError> {
            Err(RecognizeError::Unavailable("eng.traineddata not found".into()))
        }
    }

    fn splitter(pages: usize, texts: &[&str]) -> Splitter<BlankRasterizer, ScriptedRecognizer> {
        Splitter::new(BlankRasterizer { pages }, ScriptedRecognizer::new(texts))
    }

    #[test]
    fn test_three_page_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.pdf");
        write_document_with_markers(&source, &["first", "second", "third"]);
        let out = dir.path().join("output");

        let report = splitter(3, &["1", "", "1"]).split(&source, &out).unwrap();
        report.ensure_complete().unwrap();
        assert_eq!(report.page_count, 3);
        assert_eq!(report.artifacts.len(), 2);

        let page_1 = PdfDocument::open(out.join("page_1.pdf")).unwrap();
        assert_eq!(page_markers(&page_1.doc), vec!["first", "third"]);

        let unlabeled = PdfDocument::open(out.join("unlabeled").join("unlabeled.pdf")).unwrap();
        assert_eq!(page_markers(&unlabeled.doc), vec!["second"]);
    }

    #[test]
    fn test_artifact_page_counts_cover_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.pdf");
        let markers = ["a", "b", "c", "d", "e"];
        write_document_with_markers(&source, &markers);
        let out = dir.path().join("output");

        let report = splitter(5, &["2", "3", "2", "", "3"])
            .split(&source, &out)
            .unwrap();

        let mut total = 0;
        for artifact in &report.artifacts {
            let written = PdfDocument::open(&artifact.path).unwrap();
            total += written.page_count();
            assert_eq!(written.page_count(), artifact.pages.len());
        }
        assert_eq!(total, markers.len());
    }

    #[test]
    fn test_rerun_overwrites_with_identical_result() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.pdf");
        write_document_with_markers(&source, &["a", "b"]);
        let out = dir.path().join("output");

        splitter(2, &["9", "9"]).split(&source, &out).unwrap();
        let first = std::fs::read(out.join("page_9.pdf")).unwrap();
        splitter(2, &["9", "9"]).split(&source, &out).unwrap();
        let second = std::fs::read(out.join("page_9.pdf")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_unlabeled_dir_always_created() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.pdf");
        write_document_with_markers(&source, &["a"]);
        let out = dir.path().join("output");

        splitter(1, &["4"]).split(&source, &out).unwrap();
        assert!(out.join("unlabeled").is_dir());
        assert!(!out.join("unlabeled").join("unlabeled.pdf").exists());
    }

    #[test]
    fn test_zero_byte_input_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("empty.pdf");
        std::fs::write(&source, b"").unwrap();
        let out = dir.path().join("output");

        let err = splitter(0, &[]).split(&source, &out).unwrap_err();
        assert!(matches!(err, SplitError::InputUnreadable { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");

        let err = splitter(0, &[])
            .split(&dir.path().join("nope.pdf"), &out)
            .unwrap_err();
        assert!(err.to_string().contains("nope.pdf"));
        assert!(!out.exists());
    }

    #[test]
    fn test_rasterizer_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.pdf");
        write_document_with_markers(&source, &["a"]);
        let out = dir.path().join("output");

        let mut splitter = Splitter::new(FailingRasterizer, ScriptedRecognizer::new(&["1"]));
        let err = splitter.split(&source, &out).unwrap_err();
        assert!(matches!(err, SplitError::Rasterize { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_page_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.pdf");
        write_document_with_markers(&source, &["a", "b"]);

        let err = splitter(1, &["1"]).classify(&source).unwrap_err();
        match err {
            SplitError::PageCountMismatch {
                expected, rendered, ..
            } => assert_eq!((expected, rendered), (2, 1)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_classify_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.pdf");
        write_document_with_markers(&source, &["a", "b"]);

        let (doc, groups) = splitter(2, &["3", "x"]).classify(&source).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(groups.get(&Label::Digits("3".into())), Some(&[0][..]));
        assert_eq!(groups.get(&Label::Unlabeled), Some(&[1][..]));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_input_wins_over_broken_engines() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");

        let mut splitter = Splitter::new(FailingRasterizer, UnavailableRecognizer);
        let err = splitter
            .split(&dir.path().join("missing.pdf"), &out)
            .unwrap_err();
        assert!(matches!(err, SplitError::InputUnreadable { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_unavailable_engine_leaves_every_page_unlabeled() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.pdf");
        write_document_with_markers(&source, &["a", "b", "c"]);
        let out = dir.path().join("output");

        let mut splitter = Splitter::new(BlankRasterizer { pages: 3 }, UnavailableRecognizer);
        let report = splitter.split(&source, &out).unwrap();
        report.ensure_complete().unwrap();

        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].label, Label::Unlabeled);
        let unlabeled = PdfDocument::open(out.join("unlabeled").join("unlabeled.pdf")).unwrap();
        assert_eq!(page_markers(&unlabeled.doc), vec!["a", "b", "c"]);
    }
}
