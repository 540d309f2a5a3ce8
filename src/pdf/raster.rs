use anyhow::{Context, Result};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolution pages are rendered at before OCR.
pub const DEFAULT_DPI: f32 = 200.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    pub dpi: f32,
    /// Directory containing the pdfium shared library; the system library is used otherwise
    pub pdfium_library: Option<PathBuf>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            pdfium_library: None,
        }
    }
}

/// Renders every page of a PDF to an image, one per page, in page order.
pub trait PageRasterizer {
    fn rasterize(&self, path: &Path) -> Result<Vec<DynamicImage>>;
}

/// pdfium-backed rasterizer. The library is bound when a document is rendered.
pub struct PdfiumRasterizer {
    config: RasterConfig,
}

impl PdfiumRasterizer {
    pub fn new(config: &RasterConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn bind(&self) -> Result<Pdfium> {
        let library_dir = self
            .config
            .pdfium_library
            .clone()
            .unwrap_or_else(|| PathBuf::from("./"));
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
            &library_dir,
        ))
        .or_else(|_| Pdfium::bind_to_system_library())
        .context("Failed to bind pdfium library")?;

        Ok(Pdfium::new(bindings))
    }

    fn render_page(&self, page: &PdfPage) -> Result<DynamicImage> {
        let scale = self.config.dpi / 72.0; // PDF points are 72 per inch
        let pixel_width = (page.width().value * scale) as i32;
        let pixel_height = (page.height().value * scale) as i32;

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(pixel_width)
                    .set_target_height(pixel_height)
                    .render_form_data(true)
                    .render_annotations(true),
            )
            .context("Failed to render PDF page")?;

        Ok(bitmap.as_image())
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, path: &Path) -> Result<Vec<DynamicImage>> {
        validate_dpi(self.config.dpi)?;
        let pdfium = self.bind()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .with_context(|| format!("Failed to load PDF: {}", path.display()))?;

        let page_count = document.pages().len();
        debug!(
            "Rendering {} pages from {} at {} dpi",
            page_count,
            path.display(),
            self.config.dpi
        );

        let images = document
            .pages()
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                self.render_page(&page)
                    .with_context(|| format!("Page {} of {}", idx + 1, page_count))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(images)
    }
}

/// Rendering resolution must be a positive, finite number.
pub fn validate_dpi(dpi: f32) -> Result<f32> {
    if !dpi.is_finite() || dpi <= 0.0 {
        anyhow::bail!("DPI must be a positive number, got {}", dpi);
    }
    Ok(dpi)
}
