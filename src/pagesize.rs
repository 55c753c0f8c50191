//! Page dimensions for handwritten output.
//!
//! Pages are drawn on a fixed logical canvas of 600 × 800 pixels and exported
//! at that size, both as raster images and as PDF pages (one PDF unit per
//! pixel). Sizes are given in portrait orientation as (width, height).
//!
//! # Example
//!
//! ```
//! use handwrite_gen::pagesize::{self, PageDimensions};
//!
//! let (width, height) = pagesize::CANVAS;
//! assert!(width < height);
//! assert_eq!(pagesize::CANVAS.pixel_dimensions(), (600, 800));
//! ```

use crate::rect::Rect;
use crate::units::*;

/// Page dimensions as (width, height) in canvas pixels.
pub type PageSize = (Px, Px);

/// The canvas every page is laid out on
pub const CANVAS: PageSize = (Px(600.0), Px(800.0));

/// Helpers for turning a [PageSize] into concrete raster and box dimensions
pub trait PageDimensions {
    /// Whole-pixel dimensions of a raster rendering of the page
    fn pixel_dimensions(&self) -> (u32, u32);
    /// The full page as a rectangle anchored at the origin
    fn media_box(&self) -> Rect;
}

impl PageDimensions for PageSize {
    fn pixel_dimensions(&self) -> (u32, u32) {
        (self.0 .0.round().max(1.0) as u32, self.1 .0.round().max(1.0) as u32)
    }

    fn media_box(&self) -> Rect {
        Rect::from_size(self.0, self.1)
    }
}
