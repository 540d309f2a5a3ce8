pub mod number;
pub mod recognizer;
pub mod region;

pub use number::{parse_page_number, Label};
pub use recognizer::{RecognizerConfig, TesseractRecognizer, TextRecognizer};
pub use region::extract_region;
