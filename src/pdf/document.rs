use anyhow::{Context, Result};
use lopdf::{Document, ObjectId};
use std::path::Path;

#[derive(Debug)]
pub struct PdfDocument {
    pub doc: Document,
    pub path: String,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().display().to_string();
        let doc =
            Document::load(&path).with_context(|| format!("Failed to open PDF: {}", path_str))?;
        Ok(PdfDocument {
            doc,
            path: path_str,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Copy the pages at the given 0-based ordinals into a new document.
    ///
    /// The copy keeps source order, so `ordinals` must be ascending for the
    /// result to match it.
    pub fn extract_pages(&self, ordinals: &[usize]) -> Result<Document> {
        let total = self.page_count();

        for &ordinal in ordinals {
            if ordinal >= total {
                anyhow::bail!(
                    "Page {} is out of range (1-{}) in {}",
                    ordinal + 1,
                    total,
                    self.path
                );
            }
        }

        let pages_to_delete: Vec<u32> = self
            .page_ids()
            .iter()
            .filter(|(num, _)| !ordinals.contains(&(*num as usize - 1)))
            .map(|(num, _)| *num)
            .collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            // Drop content and resources only the deleted pages referenced
            new_doc.prune_objects();
        }

        Ok(new_doc)
    }

    /// Save to a file, replacing whatever is there
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }
}
