pub mod document;
pub mod raster;
pub mod text;

pub use document::PdfDocument;
pub use raster::{PageRasterizer, PdfiumRasterizer, RasterConfig};
