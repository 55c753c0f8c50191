use crate::error::HandwritingError;
use crate::font::FontBook;
use crate::image::{BackgroundImage, ImageFormat};
use crate::page::{DrawInstruction, ShapeTag};
use crate::pagesize::{PageDimensions, PageSize};
use crate::raster::Painter;
use image::RgbaImage;
use tracing::{debug, warn};

/// A drawing surface that holds shapes until it is rendered
pub trait Surface {
    fn add_shape(&mut self, shape: DrawInstruction);

    /// Remove every shape carrying the tag, returning how many were removed
    fn remove_shapes_by_tag(&mut self, tag: ShapeTag) -> usize;

    fn shapes(&self) -> &[DrawInstruction];
}

/// Add every instruction to the surface, in order
pub fn realize<S: Surface + ?Sized>(instructions: &[DrawInstruction], surface: &mut S) {
    for instruction in instructions {
        surface.add_shape(instruction.clone());
    }
}

/// A retained-mode page surface. Shapes are kept in painting order and can be
/// replaced by tag or edited in place; nothing is painted until the canvas is
/// rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: PageSize,
    shapes: Vec<DrawInstruction>,
}

impl Surface for Canvas {
    fn add_shape(&mut self, shape: DrawInstruction) {
        self.shapes.push(shape);
    }

    fn remove_shapes_by_tag(&mut self, tag: ShapeTag) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|shape| shape.tag() != tag);
        before - self.shapes.len()
    }

    fn shapes(&self) -> &[DrawInstruction] {
        &self.shapes
    }
}

impl Canvas {
    pub fn new(size: PageSize) -> Canvas {
        Canvas {
            size,
            shapes: Vec::new(),
        }
    }

    pub fn from_instructions(size: PageSize, instructions: &[DrawInstruction]) -> Canvas {
        let mut canvas = Canvas::new(size);
        realize(instructions, &mut canvas);
        canvas
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    /// Content of every written line on the canvas, in order, excluding the title
    pub fn written_lines(&self) -> Vec<&str> {
        self.shapes
            .iter()
            .filter_map(DrawInstruction::as_text)
            .map(|line| line.content.as_str())
            .collect()
    }

    /// The written lines read back as text, one per line
    pub fn text_content(&self) -> String {
        self.written_lines().join("\n")
    }

    /// Replace the content of the `index`th written line in place, keeping its
    /// position and jitter. Returns false when there is no such line.
    pub fn set_line_text(&mut self, index: usize, content: &str) -> bool {
        let line = self
            .shapes
            .iter_mut()
            .filter_map(|shape| match shape {
                DrawInstruction::Text(line) => Some(line),
                _ => None,
            })
            .nth(index);
        match line {
            Some(line) => {
                line.content = content.to_string();
                true
            }
            None => false,
        }
    }

    /// Replace all shapes carrying `tag` with the matching instructions from a
    /// fresh layout, keeping everything else where it is
    pub fn replace_tagged(&mut self, tag: ShapeTag, instructions: &[DrawInstruction]) {
        self.remove_shapes_by_tag(tag);
        for instruction in instructions.iter().filter(|i| i.tag() == tag) {
            self.add_shape(instruction.clone());
        }
    }

    /// Paint every shape, in order. Text is written with the face resolved from
    /// `fonts` and skipped when no face is loaded at all; the background image
    /// instruction draws nothing when no background is loaded, leaving the
    /// paper colour underneath.
    pub fn rasterize(&self, fonts: &FontBook, background: Option<&BackgroundImage>) -> RgbaImage {
        let (width, height) = self.size.pixel_dimensions();
        let mut image = RgbaImage::new(width, height);
        let mut painter = Painter::new(&mut image);
        let mut skipped = 0usize;

        for shape in self.shapes.iter() {
            match shape {
                DrawInstruction::Fill(colour) => painter.fill(*colour),
                DrawInstruction::BackgroundImage => match background {
                    Some(background) => painter.blit(&background.image),
                    None => debug!("no background image loaded, showing the paper colour"),
                },
                DrawInstruction::Rule(line)
                | DrawInstruction::Grid(line)
                | DrawInstruction::Margin(line) => painter.stroke(line),
                DrawInstruction::Title(line) | DrawInstruction::Text(line) => {
                    match fonts.resolve(line.style.font) {
                        Some(font) => painter.text(line, font),
                        None => skipped += 1,
                    }
                }
            }
        }

        if skipped > 0 {
            warn!(lines = skipped, "no font loaded, text left unwritten");
        }
        image
    }

    /// Rasterize the canvas and encode it
    pub fn render_to_image(
        &self,
        fonts: &FontBook,
        background: Option<&BackgroundImage>,
        format: ImageFormat,
    ) -> Result<Vec<u8>, HandwritingError> {
        format.encode(&self.rasterize(fonts, background))
    }
}
