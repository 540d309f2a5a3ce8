use image::DynamicImage;
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::ocr::{extract_region, parse_page_number, Label, TextRecognizer};

/// Source page ordinals (0-based) grouped by label.
///
/// Labels keep the order they were first seen in; ordinals inside a group are
/// always ascending because pages are only ever appended.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageGroups {
    groups: IndexMap<Label, Vec<usize>>,
    page_count: usize,
}

impl PageGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next source page under `label`, returning its ordinal.
    pub fn push(&mut self, label: Label) -> usize {
        let ordinal = self.page_count;
        self.groups.entry(label).or_default().push(ordinal);
        self.page_count += 1;
        ordinal
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, label: &Label) -> Option<&[usize]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &[usize])> {
        self.groups
            .iter()
            .map(|(label, ordinals)| (label, ordinals.as_slice()))
    }

    /// Label assigned to each source page, in source order.
    pub fn labels_by_page(&self) -> Vec<&Label> {
        let mut assigned: Vec<Option<&Label>> = vec![None; self.page_count];
        for (label, ordinals) in &self.groups {
            for &ordinal in ordinals {
                assigned[ordinal] = Some(label);
            }
        }
        assigned.into_iter().flatten().collect()
    }
}

/// Read the page number off one rendered page.
///
/// OCR failures are logged and reported as [`Label::Unlabeled`].
pub fn classify_page<R: TextRecognizer + ?Sized>(page: &DynamicImage, recognizer: &mut R) -> Label {
    let region = extract_region(page);
    match recognizer.recognize(&region) {
        Ok(text) => {
            info!("  Raw OCR text: '{}'", text.trim());
            parse_page_number(&text)
        }
        Err(e) => {
            warn!("  OCR failed: {}", e);
            Label::Unlabeled
        }
    }
}

/// Classify every page in order and collect them into groups.
pub fn group_pages<R: TextRecognizer + ?Sized>(
    pages: &[DynamicImage],
    recognizer: &mut R,
) -> PageGroups {
    let total = pages.len();
    let mut groups = PageGroups::new();

    for (idx, page) in pages.iter().enumerate() {
        info!("Processing page {} of {}...", idx + 1, total);

        let label = classify_page(page, recognizer);
        match &label {
            Label::Digits(number) => info!("  Detected page number: {}", number),
            Label::Unlabeled => warn!("Could not extract page number from page {}", idx + 1),
        }

        groups.push(label);
    }

    groups
}
