use image::{DynamicImage, GenericImageView};

/// Share of the page width, measured from the right edge, that is searched.
pub const REGION_WIDTH_FRACTION: f64 = 0.3;
/// Share of the page height, measured from the bottom edge, that is searched.
pub const REGION_HEIGHT_FRACTION: f64 = 0.15;

/// Crop box in pixel coordinates, `left`/`top` inclusive and `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Region {
    /// Bottom-right corner of a `width` x `height` page, where page numbers usually sit.
    pub fn page_number_corner(width: u32, height: u32) -> Self {
        // Margins truncate toward zero, so tiny pages yield an empty box.
        let right_margin = (f64::from(width) * REGION_WIDTH_FRACTION) as u32;
        let bottom_margin = (f64::from(height) * REGION_HEIGHT_FRACTION) as u32;

        Region {
            left: width - right_margin,
            top: height - bottom_margin,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Crop the page-number corner out of a rendered page.
pub fn extract_region(page: &DynamicImage) -> DynamicImage {
    let (width, height) = page.dimensions();
    let region = Region::page_number_corner(width, height);
    page.crop_imm(region.left, region.top, region.width(), region.height())
}
