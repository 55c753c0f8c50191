use super::margins::Margins;
use crate::colour::{colours, Colour};
use crate::error::HandwritingError;
use crate::font::FontFamily;
use crate::pagesize::{self, PageSize};
use crate::units::Px;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Background guide lines printed on the paper
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ruling {
    /// Blank paper
    #[serde(alias = "none")]
    Plain,
    /// A horizontal rule under every line of text
    #[default]
    Ruled,
    /// A 20px square grid
    Graph,
}

/// Spacing between letters, as a discrete level
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LetterSpacing {
    Tight,
    #[default]
    Normal,
    Wide,
    ExtraWide,
}

impl LetterSpacing {
    pub fn level(&self) -> u8 {
        match self {
            LetterSpacing::Tight => 0,
            LetterSpacing::Normal => 1,
            LetterSpacing::Wide => 2,
            LetterSpacing::ExtraWide => 3,
        }
    }

    /// Character spacing of body text, in thousandths of an em
    pub fn body(&self) -> f32 {
        self.level() as f32 * 20.0
    }

    /// Character spacing of the title, in thousandths of an em
    pub fn title(&self) -> f32 {
        self.level() as f32 * 15.0
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InkColour {
    #[default]
    Black,
    Blue,
    Red,
    Green,
    Purple,
    /// Use the hex colour in [LayoutOptions::custom_ink_colour]
    Custom,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaperColour {
    #[default]
    White,
    Cream,
    Blue,
    Yellow,
    Green,
}

impl PaperColour {
    pub fn colour(&self) -> Colour {
        match self {
            PaperColour::White => colours::PAPER_WHITE,
            PaperColour::Cream => colours::PAPER_CREAM,
            PaperColour::Blue => colours::PAPER_BLUE,
            PaperColour::Yellow => colours::PAPER_YELLOW,
            PaperColour::Green => colours::PAPER_GREEN,
        }
    }
}

/// Everything a user can choose about how their pages look. This is the
/// serializable form read from option files; [LayoutConfig] is derived from it
/// for each render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub font: FontFamily,
    pub ink_color: InkColour,
    pub custom_ink_color: String,
    pub page_color: PaperColour,
    pub page_type: Ruling,
    pub show_margins: bool,
    pub letter_spacing: LetterSpacing,
    pub title: String,
    pub show_title: bool,
    /// A custom background image is configured for the pages
    pub custom_background: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            font: FontFamily::default(),
            ink_color: InkColour::default(),
            custom_ink_color: "#000000".to_string(),
            page_color: PaperColour::default(),
            page_type: Ruling::default(),
            show_margins: true,
            letter_spacing: LetterSpacing::default(),
            title: String::new(),
            show_title: false,
            custom_background: false,
        }
    }
}

impl LayoutOptions {
    /// Parse options from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<LayoutOptions, HandwritingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The ink to write with. A custom ink that isn't a valid hex colour falls
    /// back to black.
    pub fn ink(&self) -> Colour {
        match self.ink_color {
            InkColour::Black => colours::INK_BLACK,
            InkColour::Blue => colours::INK_BLUE,
            InkColour::Red => colours::INK_RED,
            InkColour::Green => colours::INK_GREEN,
            InkColour::Purple => colours::INK_PURPLE,
            InkColour::Custom => {
                Colour::from_hex(&self.custom_ink_color).unwrap_or_else(|err| {
                    warn!(%err, "custom ink rejected, writing in black");
                    colours::INK_BLACK
                })
            }
        }
    }
}

/// The immutable configuration of one render pass, derived from
/// [LayoutOptions] whenever they change
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    pub line_height: Px,
    pub base_font_size: Px,
    pub font: FontFamily,
    pub ink: Colour,
    pub paper: Colour,
    pub ruling: Ruling,
    pub letter_spacing: LetterSpacing,
    pub show_margins: bool,
    /// The title written on page 0; only set when titles are shown and the
    /// title is non-empty
    pub title: Option<String>,
    pub background_image: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig::from_options(&LayoutOptions::default())
    }
}

impl LayoutConfig {
    /// Derive the configuration for a page of the standard canvas size
    pub fn from_options(options: &LayoutOptions) -> LayoutConfig {
        LayoutConfig::with_page_size(options, pagesize::CANVAS)
    }

    pub fn with_page_size(options: &LayoutOptions, page_size: PageSize) -> LayoutConfig {
        let title = (options.show_title && !options.title.is_empty()).then(|| options.title.clone());
        LayoutConfig {
            page_size,
            margins: Margins::for_page(options.show_margins, options.show_title),
            line_height: options.font.line_height(),
            base_font_size: options.font.base_size(),
            font: options.font,
            ink: options.ink(),
            paper: options.page_color.colour(),
            ruling: options.page_type,
            letter_spacing: options.letter_spacing,
            show_margins: options.show_margins,
            title,
            background_image: options.custom_background,
        }
    }

    /// How many lines fit between the top and bottom margins. Never less than
    /// one, so that pagination always makes progress.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.margins.content_box(self.page_size).height();
        let lines = (usable / self.line_height).floor();
        if lines.is_finite() && lines >= 1.0 {
            lines as usize
        } else {
            warn!(line_height = %self.line_height, "no room for a full line, writing one per page");
            1
        }
    }

    pub fn content_width(&self) -> Px {
        self.margins.content_box(self.page_size).width()
    }
}
