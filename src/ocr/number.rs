use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Page-number label assigned to a source page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    /// First run of digits read from the page, kept verbatim (`"007"` stays `"007"`).
    Digits(String),
    Unlabeled,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Digits(digits) => f.write_str(digits),
            Label::Unlabeled => f.write_str("unlabeled"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Pull the page number out of raw OCR text.
///
/// Takes the first left-to-right run of ASCII digits. Text without any digit
/// yields [`Label::Unlabeled`].
pub fn parse_page_number(text: &str) -> Label {
    match DIGIT_RUN.find(text) {
        Some(m) => Label::Digits(m.as_str().to_string()),
        None => Label::Unlabeled,
    }
}
