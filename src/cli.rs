use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ocr::recognizer::{RecognizerConfig, DIGIT_WHITELIST, PSM_SINGLE_BLOCK};
use crate::pdf::raster::{validate_dpi, RasterConfig, DEFAULT_DPI};

#[derive(Parser)]
#[command(name = "pagesplit")]
#[command(about = "Split scanned PDFs into one file per printed page number")]
#[command(version)]
pub struct Cli {
    /// Log OCR details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Split a scanned PDF by the page number printed in each page's bottom-right corner
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        #[command(flatten)]
        ocr: OcrArgs,
    },

    /// Show the page number detected on each page without writing anything
    Detect {
        /// PDF file to inspect
        path: PathBuf,

        #[command(flatten)]
        ocr: OcrArgs,
    },

    /// Dump the text layer of a PDF to <OUTPUT_DIR>/<name>.json
    ToJson {
        /// PDF file to read
        path: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct OcrArgs {
    /// Rendering resolution used for OCR
    #[arg(long, default_value_t = DEFAULT_DPI, value_parser = parse_dpi)]
    pub dpi: f32,

    /// Tesseract language
    #[arg(long, default_value = "eng")]
    pub lang: String,

    /// Directory containing Tesseract traineddata files
    #[arg(long)]
    pub tessdata: Option<PathBuf>,

    /// Tesseract page segmentation mode
    #[arg(long, default_value_t = PSM_SINGLE_BLOCK)]
    pub psm: u32,

    /// Directory containing the pdfium shared library
    #[arg(long)]
    pub pdfium: Option<PathBuf>,
}

fn parse_dpi(s: &str) -> Result<f32, String> {
    let dpi: f32 = s.parse().map_err(|_| format!("invalid number: {}", s))?;
    validate_dpi(dpi).map_err(|e| e.to_string())
}

impl OcrArgs {
    pub fn raster_config(&self) -> RasterConfig {
        RasterConfig {
            dpi: self.dpi,
            pdfium_library: self.pdfium.clone(),
        }
    }

    pub fn recognizer_config(&self) -> RecognizerConfig {
        RecognizerConfig {
            language: self.lang.clone(),
            tessdata: self.tessdata.clone(),
            page_segmentation_mode: self.psm,
            char_whitelist: DIGIT_WHITELIST.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_defaults() {
        let cli = Cli::try_parse_from(["pagesplit", "split", "scan.pdf"]).unwrap();
        match cli.command {
            Commands::Split {
                path,
                output_dir,
                ocr,
            } => {
                assert_eq!(path, PathBuf::from("scan.pdf"));
                assert_eq!(output_dir, PathBuf::from("output"));
                assert_eq!(ocr.raster_config(), RasterConfig::default());
                assert_eq!(ocr.recognizer_config(), RecognizerConfig::default());
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_split_flags() {
        let cli = Cli::try_parse_from([
            "pagesplit", "-v", "split", "scan.pdf", "-o", "out", "--dpi", "300", "--lang", "deu",
            "--psm", "7",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Split { output_dir, ocr, .. } => {
                assert_eq!(output_dir, PathBuf::from("out"));
                assert_eq!(ocr.raster_config().dpi, 300.0);
                let config = ocr.recognizer_config();
                assert_eq!(config.language, "deu");
                assert_eq!(config.page_segmentation_mode, 7);
                assert_eq!(config.char_whitelist, "0123456789");
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_dpi_must_be_positive() {
        for bad in ["0", "-150", "NaN", "abc"] {
            assert!(
                Cli::try_parse_from(["pagesplit", "split", "scan.pdf", "--dpi", bad]).is_err(),
                "accepted --dpi {}",
                bad
            );
        }
    }

    #[test]
    fn test_burst_alias_removed() {
        assert!(Cli::try_parse_from(["pagesplit", "burst", "scan.pdf"]).is_err());
    }

    #[test]
    fn test_split_requires_input() {
        assert!(Cli::try_parse_from(["pagesplit", "split"]).is_err());
    }
}
