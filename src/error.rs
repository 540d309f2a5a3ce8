use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a split run.
///
/// Per-page OCR problems never show up here; they are absorbed by the
/// grouping engine and the page lands in the unlabeled group.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Cannot read input PDF {}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to rasterize PDF {}", .path.display())]
    Rasterize {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Rasterizer produced {rendered} page image(s) but {} has {expected} page(s)", .path.display())]
    PageCountMismatch {
        path: PathBuf,
        expected: usize,
        rendered: usize,
    },

    #[error("Failed to create directory {}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{failed} of {total} output file(s) could not be written")]
    ArtifactsFailed { failed: usize, total: usize },
}

#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error("Failed to initialize Tesseract with language '{language}': {message}")]
    Init { language: String, message: String },

    #[error("Failed to set Tesseract variable {name}: {message}")]
    Variable { name: &'static str, message: String },

    #[error("Region is empty ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },

    #[error("Failed to encode region image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to run OCR: {0}")]
    Recognition(String),
}
