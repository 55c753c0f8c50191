use crate::{error::HandwritingError, units::Px};
use owned_ttf_parser::{AsFaceRef, GlyphId, OutlineBuilder, OwnedFace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The handwriting faces a page can be written in. Ids match the option ids
/// used in layout option files (`"caveat"`, `"homemade-apple"`, ...).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    #[default]
    Caveat,
    HomemadeApple,
    IndieFlower,
    DancingScript,
    Sacramento,
    Kalam,
    Satisfy,
    ArchitectsDaughter,
    Schoolbell,
    JustMeAgain,
    NanumPen,
    Sriracha,
    PatrickHand,
    GloriaHallelujah,
    MyHandwriting,
    KidsHandwriting,
    ProfessionalScript,
    /// A font file supplied by the user
    CustomFont,
}

impl FontFamily {
    pub const ALL: [FontFamily; 18] = [
        FontFamily::Caveat,
        FontFamily::HomemadeApple,
        FontFamily::IndieFlower,
        FontFamily::DancingScript,
        FontFamily::Sacramento,
        FontFamily::Kalam,
        FontFamily::Satisfy,
        FontFamily::ArchitectsDaughter,
        FontFamily::Schoolbell,
        FontFamily::JustMeAgain,
        FontFamily::NanumPen,
        FontFamily::Sriracha,
        FontFamily::PatrickHand,
        FontFamily::GloriaHallelujah,
        FontFamily::MyHandwriting,
        FontFamily::KidsHandwriting,
        FontFamily::ProfessionalScript,
        FontFamily::CustomFont,
    ];

    /// The option id of the family
    pub fn id(&self) -> &'static str {
        match self {
            FontFamily::Caveat => "caveat",
            FontFamily::HomemadeApple => "homemade-apple",
            FontFamily::IndieFlower => "indie-flower",
            FontFamily::DancingScript => "dancing-script",
            FontFamily::Sacramento => "sacramento",
            FontFamily::Kalam => "kalam",
            FontFamily::Satisfy => "satisfy",
            FontFamily::ArchitectsDaughter => "architects-daughter",
            FontFamily::Schoolbell => "schoolbell",
            FontFamily::JustMeAgain => "just-me-again",
            FontFamily::NanumPen => "nanum-pen",
            FontFamily::Sriracha => "sriracha",
            FontFamily::PatrickHand => "patrick-hand",
            FontFamily::GloriaHallelujah => "gloria-hallelujah",
            FontFamily::MyHandwriting => "my-handwriting",
            FontFamily::KidsHandwriting => "kids-handwriting",
            FontFamily::ProfessionalScript => "professional-script",
            FontFamily::CustomFont => "custom-font",
        }
    }

    /// Human readable family name, as it appears in the font's own name table
    pub fn display_name(&self) -> &'static str {
        match self {
            FontFamily::Caveat => "Caveat",
            FontFamily::HomemadeApple => "Homemade Apple",
            FontFamily::IndieFlower => "Indie Flower",
            FontFamily::DancingScript => "Dancing Script",
            FontFamily::Sacramento => "Sacramento",
            FontFamily::Kalam => "Kalam",
            FontFamily::Satisfy => "Satisfy",
            FontFamily::ArchitectsDaughter => "Architects Daughter",
            FontFamily::Schoolbell => "Schoolbell",
            FontFamily::JustMeAgain => "Just Me Again Down Here",
            FontFamily::NanumPen => "Nanum Pen Script",
            FontFamily::Sriracha => "Sriracha",
            FontFamily::PatrickHand => "Patrick Hand",
            FontFamily::GloriaHallelujah => "Gloria Hallelujah",
            FontFamily::MyHandwriting => "MyHandwriting",
            FontFamily::KidsHandwriting => "KidsHandwriting",
            FontFamily::ProfessionalScript => "ProfessionalScript",
            FontFamily::CustomFont => "CustomHandwriting",
        }
    }

    /// Distance between the tops of two consecutive lines written in this family.
    /// Homemade Apple has tall ascenders and gets more room.
    pub fn line_height(&self) -> Px {
        match self {
            FontFamily::HomemadeApple => Px(50.0),
            _ => Px(40.0),
        }
    }

    /// Body text size before jitter
    pub fn base_size(&self) -> Px {
        match self {
            FontFamily::HomemadeApple => Px(22.0),
            _ => Px(26.0),
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontFamily::ALL
            .iter()
            .copied()
            .find(|family| family.id() == s)
            .ok_or_else(|| format!("unknown font `{s}`"))
    }
}

/// A parsed font object. Fonts can be TTF or OTF fonts and are used to measure
/// and rasterize the glyphs of each written line.
pub struct Font {
    pub face: OwnedFace,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family())
            .finish_non_exhaustive()
    }
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, HandwritingError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the family name of the font, if its name table carries one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Factor converting font units into pixels at the given size
    pub fn scaling(&self, size: Px) -> f32 {
        *size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Px) -> Px {
        Px(self.scaling(size) * self.face.as_face_ref().ascender() as f32)
    }

    /// Glyph for the character, substituting the replacement character or `?`
    /// when the font does not cover it
    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        let face = self.face.as_face_ref();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
    }

    /// Horizontal advance of a glyph at the given size
    pub fn advance(&self, glyph: GlyphId, size: Px) -> Px {
        let units = self
            .face
            .as_face_ref()
            .glyph_hor_advance(glyph)
            .unwrap_or_default();
        Px(self.scaling(size) * units as f32)
    }

    /// Calculate the width of a line of text, including letter spacing given in
    /// thousandths of an em between every pair of characters
    pub fn width_of_text(&self, text: &str, size: Px, char_spacing: f32) -> Px {
        let spacing = size * (char_spacing / 1000.0);
        let mut count = 0usize;
        let glyphs: Px = text
            .chars()
            .filter(|ch| !ch.is_control())
            .filter_map(|ch| self.glyph_id(ch))
            .inspect(|_| count += 1)
            .map(|gid| self.advance(gid, size))
            .sum();
        glyphs + spacing * count.saturating_sub(1) as f32
    }

    /// Feed the outline of a glyph, in font units, to the builder. Returns false
    /// for glyphs without an outline (spaces, for instance).
    pub fn outline(&self, glyph: GlyphId, builder: &mut dyn OutlineBuilder) -> bool {
        self.face
            .as_face_ref()
            .outline_glyph(glyph, builder)
            .is_some()
    }
}

/// The set of loaded faces, keyed by family
#[derive(Debug, Default)]
pub struct FontBook {
    faces: HashMap<FontFamily, Font>,
}

impl FontBook {
    pub fn new() -> FontBook {
        FontBook::default()
    }

    /// Register the face used for a family, returning the face it replaces
    pub fn insert(&mut self, family: FontFamily, font: Font) -> Option<Font> {
        self.faces.insert(family, font)
    }

    pub fn remove(&mut self, family: FontFamily) -> Option<Font> {
        self.faces.remove(&family)
    }

    pub fn contains(&self, family: FontFamily) -> bool {
        self.faces.contains_key(&family)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Find the face to write a family with. Falls back to the default family,
    /// then to whichever face is loaded.
    pub fn resolve(&self, family: FontFamily) -> Option<&Font> {
        if let Some(font) = self.faces.get(&family) {
            return Some(font);
        }
        let fallback = self
            .faces
            .get(&FontFamily::default())
            .or_else(|| {
                FontFamily::ALL
                    .iter()
                    .find_map(|family| self.faces.get(family))
            });
        if fallback.is_some() {
            debug!(%family, "font not loaded, falling back");
        }
        fallback
    }
}
