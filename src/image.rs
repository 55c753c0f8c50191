use crate::error::HandwritingError;
use crate::pagesize::{PageDimensions, PageSize};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, ImageEncoder, RgbaImage};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::Filter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Raster formats pages can be exported in
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    /// Encode a rendered page
    pub fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, HandwritingError> {
        let mut bytes = Vec::new();
        match self {
            ImageFormat::Png => PngEncoder::new(&mut bytes).write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ColorType::Rgba8,
            )?,
            ImageFormat::Jpeg => {
                // jpeg has no alpha channel
                let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut bytes, 95).write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    ColorType::Rgb8,
                )?
            }
        }
        Ok(bytes)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(format!("unsupported image format `{other}`")),
        }
    }
}

/// A user supplied background, already scaled to cover a page
pub struct BackgroundImage {
    pub image: RgbaImage,
}

impl fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .finish()
    }
}

impl BackgroundImage {
    /// Decode an image in any format the `image` crate recognises and scale it
    /// to cover the page: first to the page width, then, if it still falls
    /// short of the page height, to the page height. It is anchored at the
    /// top-left corner and whatever overhangs the page is cropped when drawn.
    pub fn decode(bytes: &[u8], page: PageSize) -> Result<BackgroundImage, HandwritingError> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::cover(decoded, page))
    }

    pub fn from_disk<P: AsRef<Path>>(path: P, page: PageSize) -> Result<BackgroundImage, HandwritingError> {
        let data = std::fs::read(path)?;
        Self::decode(&data, page)
    }

    pub fn cover(image: DynamicImage, page: PageSize) -> BackgroundImage {
        let (page_w, page_h) = page.pixel_dimensions();
        let (w, h) = (image.width().max(1) as f32, image.height().max(1) as f32);

        let mut scale = page_w as f32 / w;
        if h * scale < page_h as f32 {
            scale = page_h as f32 / h;
        }
        let target_w = ((w * scale).round() as u32).max(1);
        let target_h = ((h * scale).round() as u32).max(1);

        let rgba = image.to_rgba8();
        let image = if (target_w, target_h) == rgba.dimensions() {
            rgba
        } else {
            imageops::resize(&rgba, target_w, target_h, FilterType::Triangle)
        };
        BackgroundImage { image }
    }
}

/// A page image ready to be embedded in a PDF
pub(crate) struct EncodeOutput {
    pub filter: Filter,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Compress the RGB channels of a rendered page. Pages are opaque, so no
/// soft mask is produced.
pub(crate) fn encode_for_pdf(image: &RgbaImage) -> EncodeOutput {
    let level = CompressionLevel::DefaultLevel as u8;
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let bytes = compress_to_vec_zlib(rgb.as_raw(), level);

    EncodeOutput {
        filter: Filter::FlateDecode,
        bytes,
        width: image.width(),
        height: image.height(),
    }
}
