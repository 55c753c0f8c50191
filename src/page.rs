use crate::colour::Colour;
use crate::font::FontFamily;
use crate::units::Px;

/// One fixed-size page of the document: the slice of input lines it holds and
/// whether the document title is written at its top.
///
/// Pages are derived from the text and layout configuration by
/// [paginate](crate::layout::paginate) and are recreated rather than patched
/// whenever either changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 0-based position of the page in the document
    pub index: usize,
    /// The input lines on this page, in input order
    pub lines: Vec<String>,
    /// Only ever true for page 0, when a title is configured
    pub has_title: bool,
}

impl Page {
    pub fn new(index: usize) -> Page {
        Page {
            index,
            lines: Vec::new(),
            has_title: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The page's text as it would read back from an editable page
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Small offsets applied to one written line so that consecutive lines never
/// look machine-set
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Jitter {
    /// Vertical offset of the line from its cursor position
    pub position: Px,
    /// Offset added to the base font size
    pub size: Px,
    /// Rotation of the line in degrees, clockwise
    pub angle: f32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    /// `base_position` is the top-left corner of the line
    #[default]
    Left,
    /// `base_position` is the top-centre of the line
    Centre,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub font: FontFamily,
    /// Size before jitter is applied
    pub size: Px,
    pub colour: Colour,
    /// Extra space between characters, in thousandths of an em
    pub char_spacing: f32,
    pub bold: bool,
    pub align: Align,
    /// Width of the box the line is written in
    pub width: Px,
}

/// A single written line, positioned on the page
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub content: String,
    /// Where the line's box starts, before jitter
    pub base_position: (Px, Px),
    pub style: TextStyle,
    pub jitter: Jitter,
}

impl TextLine {
    /// Font size after jitter
    pub fn size(&self) -> Px {
        self.style.size + self.jitter.size
    }

    /// Anchor of the line's box after jitter
    pub fn position(&self) -> (Px, Px) {
        (self.base_position.0, self.base_position.1 + self.jitter.position)
    }
}

/// A straight guide line printed on the paper
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GuideLine {
    pub from: (Px, Px),
    pub to: (Px, Px),
    pub colour: Colour,
    pub width: Px,
}

/// Groups of shapes that can be removed from a surface together
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShapeTag {
    Background,
    RuleLine,
    GraphLine,
    MarginLine,
    Title,
    Text,
}

/// One step of drawing a page, independent of whatever surface realizes it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    /// Flood the page with the paper colour
    Fill(Colour),
    /// Cover the page with the custom background image, if one is loaded.
    /// Always preceded by a [DrawInstruction::Fill] that shows through when it isn't.
    BackgroundImage,
    Rule(GuideLine),
    Grid(GuideLine),
    Margin(GuideLine),
    Title(TextLine),
    Text(TextLine),
}

impl DrawInstruction {
    pub fn tag(&self) -> ShapeTag {
        match self {
            DrawInstruction::Fill(_) | DrawInstruction::BackgroundImage => ShapeTag::Background,
            DrawInstruction::Rule(_) => ShapeTag::RuleLine,
            DrawInstruction::Grid(_) => ShapeTag::GraphLine,
            DrawInstruction::Margin(_) => ShapeTag::MarginLine,
            DrawInstruction::Title(_) => ShapeTag::Title,
            DrawInstruction::Text(_) => ShapeTag::Text,
        }
    }

    pub fn as_text(&self) -> Option<&TextLine> {
        match self {
            DrawInstruction::Text(line) => Some(line),
            _ => None,
        }
    }
}
