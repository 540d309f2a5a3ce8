use image::{DynamicImage, GenericImageView, ImageFormat};
use leptess::{LepTess, Variable};
use std::io::Cursor;
use std::path::PathBuf;
use tracing::warn;

use crate::error::RecognizeError;

pub const DIGIT_WHITELIST: &str = "0123456789";

/// Tesseract "assume a single uniform block of text".
pub const PSM_SINGLE_BLOCK: u32 = 6;

/// OCR engine settings, fixed for the lifetime of a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Tesseract language code (e.g. "eng")
    pub language: String,
    /// Directory holding `<language>.traineddata`; `None` uses Tesseract's default
    pub tessdata: Option<PathBuf>,
    pub page_segmentation_mode: u32,
    pub char_whitelist: String,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            tessdata: None,
            page_segmentation_mode: PSM_SINGLE_BLOCK,
            char_whitelist: DIGIT_WHITELIST.to_string(),
        }
    }
}

/// Turns a cropped region into raw text.
pub trait TextRecognizer {
    fn recognize(&mut self, region: &DynamicImage) -> Result<String, RecognizeError>;
}

/// Tesseract-backed recognizer.
///
/// The engine is created on the first call to `recognize`. If that fails, the
/// failure is remembered and every later call reports the engine unavailable
/// without retrying.
pub struct TesseractRecognizer {
    config: RecognizerConfig,
    engine: Option<Result<LepTess, String>>,
}

impl TesseractRecognizer {
    pub fn new(config: &RecognizerConfig) -> Self {
        Self {
            config: config.clone(),
            engine: None,
        }
    }

    fn engine(&mut self) -> Result<&mut LepTess, RecognizeError> {
        let config = &self.config;
        let engine = self.engine.get_or_insert_with(|| {
            init_engine(config).map_err(|e| {
                warn!("OCR engine unavailable, pages will be unlabeled: {}", e);
                e.to_string()
            })
        });

        match engine {
            Ok(tess) => Ok(tess),
            Err(message) => Err(RecognizeError::Unavailable(message.clone())),
        }
    }
}

fn init_engine(config: &RecognizerConfig) -> Result<LepTess, RecognizeError> {
    let data_path = config
        .tessdata
        .as_ref()
        .map(|p| p.display().to_string());
    let mut tess = LepTess::new(data_path.as_deref(), &config.language).map_err(|e| {
        RecognizeError::Init {
            language: config.language.clone(),
            message: e.to_string(),
        }
    })?;

    tess.set_variable(
        Variable::TesseditPagesegMode,
        &config.page_segmentation_mode.to_string(),
    )
    .map_err(|e| RecognizeError::Variable {
        name: "tessedit_pageseg_mode",
        message: e.to_string(),
    })?;
    tess.set_variable(Variable::TesseditCharWhitelist, &config.char_whitelist)
        .map_err(|e| RecognizeError::Variable {
            name: "tessedit_char_whitelist",
            message: e.to_string(),
        })?;

    Ok(tess)
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&mut self, region: &DynamicImage) -> Result<String, RecognizeError> {
        let (width, height) = region.dimensions();
        if width == 0 || height == 0 {
            return Err(RecognizeError::EmptyRegion { width, height });
        }

        // leptess only accepts encoded image data
        let mut png = Cursor::new(Vec::new());
        region.write_to(&mut png, ImageFormat::Png)?;

        let tess = self.engine()?;
        tess.set_image_from_mem(png.get_ref())
            .map_err(|e| RecognizeError::Recognition(e.to_string()))?;

        tess.get_utf8_text()
            .map_err(|e| RecognizeError::Recognition(e.to_string()))
    }
}
