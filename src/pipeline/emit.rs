use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::grouping::PageGroups;
use crate::error::SplitError;
use crate::ocr::Label;
use crate::pdf::PdfDocument;

pub const UNLABELED_DIR: &str = "unlabeled";
pub const UNLABELED_FILE: &str = "unlabeled.pdf";

/// Outcome of writing one group to disk.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    pub label: Label,
    pub path: PathBuf,
    /// 1-based source page numbers, in output order
    pub pages: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArtifactReport {
    pub fn is_written(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub page_count: usize,
    pub artifacts: Vec<ArtifactReport>,
}

impl SplitReport {
    pub fn failed(&self) -> usize {
        self.artifacts.iter().filter(|a| !a.is_written()).count()
    }

    /// Collapse per-file failures into a single error for callers that only
    /// care whether the whole run succeeded.
    pub fn ensure_complete(&self) -> Result<(), SplitError> {
        match self.failed() {
            0 => Ok(()),
            failed => Err(SplitError::ArtifactsFailed {
                failed,
                total: self.artifacts.len(),
            }),
        }
    }
}

/// Where the document for `label` is written inside `output_dir`.
pub fn artifact_path(output_dir: &Path, label: &Label) -> PathBuf {
    match label {
        Label::Digits(number) => output_dir.join(format!("page_{}.pdf", number)),
        Label::Unlabeled => output_dir.join(UNLABELED_DIR).join(UNLABELED_FILE),
    }
}

/// Create the output directory and its unlabeled subdirectory if missing.
pub fn prepare_output_dirs(output_dir: &Path) -> Result<(), SplitError> {
    for dir in [output_dir.to_path_buf(), output_dir.join(UNLABELED_DIR)] {
        std::fs::create_dir_all(&dir).map_err(|source| SplitError::OutputDir {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(())
}

fn write_group(doc: &PdfDocument, ordinals: &[usize], path: &Path) -> anyhow::Result<()> {
    let mut new_doc = doc.extract_pages(ordinals)?;
    PdfDocument::save(&mut new_doc, path)
}

/// Write one document per group.
///
/// Every group is attempted; a failed write is recorded in its report and
/// does not stop the remaining groups.
pub fn emit_groups(
    doc: &PdfDocument,
    groups: &PageGroups,
    output_dir: &Path,
) -> Result<Vec<ArtifactReport>, SplitError> {
    prepare_output_dirs(output_dir)?;

    let mut reports = Vec::with_capacity(groups.len());
    for (label, ordinals) in groups.iter() {
        let path = artifact_path(output_dir, label);
        let error = match write_group(doc, ordinals, &path) {
            Ok(()) => {
                info!("Created {} with {} pages", path.display(), ordinals.len());
                None
            }
            Err(e) => {
                warn!("Failed to write {}: {:#}", path.display(), e);
                Some(format!("{:#}", e))
            }
        };

        reports.push(ArtifactReport {
            label: label.clone(),
            path,
            pages: ordinals.iter().map(|o| o + 1).collect(),
            error,
        });
    }

    Ok(reports)
}
