//! Paints pages onto an RGBA image: flat fills, image blits, guide lines and
//! glyph outlines. Paths are filled and stroked by tiny-skia, working directly
//! on the image's pixels.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{Align, GuideLine, TextLine};
use crate::transform::Transform;
use crate::units::Px;
use image::{Rgba, RgbaImage};
use owned_ttf_parser::OutlineBuilder;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, PixmapMut, Stroke};

/// Horizontal offset of the second pass that emboldens text
const BOLD_OFFSET: f32 = 0.75;

/// Paints onto an RGBA image in page pixel coordinates.
///
/// The image is handed to tiny-skia as premultiplied pixels, which holds as
/// long as everything on it is opaque: pages are flooded with the paper colour
/// before anything else is drawn and blits are flattened onto that.
pub struct Painter<'a> {
    image: &'a mut RgbaImage,
}

impl<'a> Painter<'a> {
    pub fn new(image: &'a mut RgbaImage) -> Painter<'a> {
        Painter { image }
    }

    /// Flood the whole image
    pub fn fill(&mut self, colour: Colour) {
        let pixel = Rgba(colour.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    /// Composite `source` with its top-left corner at the origin, cropping
    /// whatever falls outside the image
    pub fn blit(&mut self, source: &RgbaImage) {
        let width = self.image.width().min(source.width());
        let height = self.image.height().min(source.height());
        for y in 0..height {
            for x in 0..width {
                let src = source.get_pixel(x, y).0;
                let coverage = src[3] as f32 / 255.0;
                let dst = self.image.get_pixel_mut(x, y);
                for i in 0..3 {
                    let mixed = dst.0[i] as f32 * (1.0 - coverage) + src[i] as f32 * coverage;
                    dst.0[i] = mixed.round() as u8;
                }
                dst.0[3] = 255;
            }
        }
    }

    /// Stroke a guide line. Horizontal and vertical lines are snapped to whole
    /// pixels so that rules stay crisp.
    pub fn stroke(&mut self, line: &GuideLine) {
        let (x0, y0) = (*line.from.0, *line.from.1);
        let (x1, y1) = (*line.to.0, *line.to.1);
        let half = (*line.width / 2.0).max(0.5);
        let mut paint = paint(line.colour);

        let snapped = if (y0 - y1).abs() < f32::EPSILON {
            Some((x0.min(x1), y0 - half, x0.max(x1), y0 + half))
        } else if (x0 - x1).abs() < f32::EPSILON {
            Some((x0 - half, y0.min(y1), x0 + half, y0.max(y1)))
        } else {
            None
        };

        let Some(mut pixmap) = self.pixmap() else {
            return;
        };
        match snapped {
            Some((left, top, right, bottom)) => {
                paint.anti_alias = false;
                let rect = tiny_skia::Rect::from_ltrb(
                    left.round(),
                    top.round(),
                    right.round(),
                    bottom.round(),
                );
                if let Some(rect) = rect {
                    pixmap.fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
                }
            }
            None => {
                let mut path = PathBuilder::new();
                path.move_to(x0, y0);
                path.line_to(x1, y1);
                let stroke = Stroke {
                    width: half * 2.0,
                    ..Stroke::default()
                };
                if let Some(path) = path.finish() {
                    pixmap.stroke_path(
                        &path,
                        &paint,
                        &stroke,
                        tiny_skia::Transform::identity(),
                        None,
                    );
                }
            }
        }
    }

    /// Write a line of text with the given face. The line's box is anchored at
    /// its jittered position and rotated about that anchor by its jittered angle.
    pub fn text(&mut self, line: &TextLine, font: &Font) {
        let size = line.size();
        if *size <= 0.0 || line.content.is_empty() {
            return;
        }

        let (x, y) = line.position();
        let left = match line.style.align {
            Align::Left => x,
            Align::Centre => x - font.width_of_text(&line.content, size, line.style.char_spacing) / 2.0,
        };

        let passes: &[f32] = if line.style.bold {
            &[0.0, BOLD_OFFSET]
        } else {
            &[0.0]
        };

        let scaling = font.scaling(size);
        let ascent = font.ascent(size);
        let spacing = size * (line.style.char_spacing / 1000.0);
        // rotate about the anchor of the line's box
        let place = Transform::translate(left - x, ascent)
            .with_rotate_degrees(line.jitter.angle)
            .with_translate(x, y);

        let mut glyphs = GlyphPath::new();
        for offset in passes {
            let mut pen = Px(*offset);
            for ch in line.content.chars().filter(|ch| !ch.is_control()) {
                let Some(glyph) = font.glyph_id(ch) else {
                    continue;
                };
                // font units are y-up; the page is y-down
                glyphs.transform = Transform::scale(scaling, -scaling)
                    .with_translate(pen, Px(0.0))
                    .then(place);
                font.outline(glyph, &mut glyphs);
                pen += font.advance(glyph, size) + spacing;
            }
        }

        if let Some(path) = glyphs.builder.finish() {
            self.fill_path(&path, line.style.colour);
        }
    }

    /// Anti-aliased non-zero winding fill of a path in page coordinates
    fn fill_path(&mut self, path: &Path, colour: Colour) {
        let paint = paint(colour);
        if let Some(mut pixmap) = self.pixmap() {
            pixmap.fill_path(
                path,
                &paint,
                FillRule::Winding,
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }

    fn pixmap(&mut self) -> Option<PixmapMut<'_>> {
        let (width, height) = self.image.dimensions();
        let data: &mut [u8] = &mut *self.image;
        PixmapMut::from_bytes(data, width, height)
    }
}

fn paint(colour: Colour) -> Paint<'static> {
    let [r, g, b, a] = colour.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Collects glyph outlines into one path, mapped onto the page as they arrive
struct GlyphPath {
    transform: Transform,
    builder: PathBuilder,
}

impl GlyphPath {
    fn new() -> GlyphPath {
        GlyphPath {
            transform: Transform::IDENTITY,
            builder: PathBuilder::new(),
        }
    }
}

impl OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.transform.apply(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.transform.apply(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.transform.apply(x1, y1);
        let (x, y) = self.transform.apply(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.transform.apply(x1, y1);
        let (x2, y2) = self.transform.apply(x2, y2);
        let (x, y) = self.transform.apply(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
