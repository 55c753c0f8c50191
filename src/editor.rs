//! An editing session over one handwritten document.
//!
//! The [Editor] keeps the typed text as the single source of truth and derives
//! everything else from it: the [LayoutConfig], the paginated [Page]s and, on
//! demand, the draw instructions of whichever page is visible. Instructions are
//! realized lazily the first time a page is shown and cached until the text or
//! the options change, so flipping back and forth between pages doesn't re-roll
//! the handwriting jitter.
//!
//! When a live [Canvas] is mounted and editing is enabled, lines can be edited
//! directly on the canvas; the edited page is read back and the whole document
//! reflowed with [Editor::reflow_on_edit].

use crate::assets::{LoadGate, LoadOutcome, LoadTicket};
use crate::canvas::Canvas;
use crate::document::Document;
use crate::error::HandwritingError;
use crate::font::{Font, FontBook, FontFamily};
use crate::image::BackgroundImage;
use crate::info::Info;
use crate::layout::{layout_page, paginate, LayoutConfig, LayoutOptions};
use crate::page::{DrawInstruction, Page, ShapeTag};
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub struct Editor {
    text: String,
    options: LayoutOptions,
    config: LayoutConfig,
    pages: Vec<Page>,
    active: usize,
    realized: HashMap<usize, Vec<DrawInstruction>>,
    editing: bool,
    rng: StdRng,
    fonts: FontBook,
    background: Option<BackgroundImage>,
    background_gate: LoadGate,
    font_gate: LoadGate,
    live: Option<Canvas>,
    last_reflow: Option<Reflow>,
}

/// The edited page text of the last reflow and the document text it produced
struct Reflow {
    edited: String,
    text: String,
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new(None)
    }
}

impl Editor {
    /// Create an empty session. With a seed the handwriting jitter is
    /// reproducible; without one it is drawn from system entropy.
    pub fn new(seed: Option<u64>) -> Editor {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let options = LayoutOptions::default();
        let config = LayoutConfig::from_options(&options);
        let pages = paginate("", &config);
        Editor {
            text: String::new(),
            options,
            config,
            pages,
            active: 0,
            realized: HashMap::new(),
            editing: false,
            rng,
            fonts: FontBook::new(),
            background: None,
            background_gate: LoadGate::new(),
            font_gate: LoadGate::new(),
            live: None,
            last_reflow: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// The faces text can be written in. Register bundled fonts here.
    pub fn fonts_mut(&mut self) -> &mut FontBook {
        &mut self.fonts
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// Replace the whole text and repaginate
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
        self.last_reflow = None;
        self.refresh();
        self.remount();
    }

    /// Replace the options, deriving a new layout configuration
    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
        self.last_reflow = None;
        self.refresh();
        self.remount();
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the visible page
    pub fn active_page(&self) -> usize {
        self.active
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.active.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.active.saturating_sub(1))
    }

    /// Show page `index`, clamped to the pages that exist. Returns the page
    /// actually shown.
    pub fn go_to_page(&mut self, index: usize) -> usize {
        let clamped = index.min(self.last_page());
        if clamped != index {
            debug!(requested = index, shown = clamped, "page out of range, clamping");
        }
        if clamped != self.active {
            self.active = clamped;
            self.last_reflow = None;
            self.remount();
        }
        self.active
    }

    /// The draw instructions of the visible page, laid out the first time the
    /// page is shown
    pub fn visible_page(&mut self) -> &[DrawInstruction] {
        self.realize_page(self.active).unwrap_or_default()
    }

    /// Mount a live canvas showing the visible page. Editing operations are
    /// ignored until a canvas is mounted.
    pub fn mount(&mut self) -> &Canvas {
        let size = self.config.page_size;
        let canvas = Canvas::from_instructions(size, self.visible_page());
        self.live.insert(canvas)
    }

    pub fn unmount(&mut self) {
        self.live = None;
    }

    pub fn live_canvas(&self) -> Option<&Canvas> {
        self.live.as_ref()
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Rewrite one written line of the live canvas in place, then read the
    /// page back and reflow the document. Returns false if nothing was edited:
    /// editing is off, no canvas is mounted or the line doesn't exist.
    pub fn edit_line(&mut self, line: usize, content: &str) -> bool {
        if !self.editing {
            debug!("editing is disabled, ignoring edit");
            return false;
        }
        let Some(canvas) = self.live.as_mut() else {
            debug!("no live canvas mounted, ignoring edit");
            return false;
        };
        if !canvas.set_line_text(line, content) {
            return false;
        }
        let edited = canvas.text_content();
        // a fresh edit of the canvas is never a repeat of the last reflow
        self.last_reflow = None;
        self.reflow_on_edit(&edited);
        true
    }

    /// Splice the edited text of the visible page between the lines of the
    /// pages around it and repaginate the whole document. Ignored while
    /// editing is disabled.
    ///
    /// Calling it again with the same page text changes nothing, even when the
    /// first call pushed lines onto the next page: the edit has already been
    /// applied to the document.
    pub fn reflow_on_edit(&mut self, edited: &str) -> &[Page] {
        if !self.editing {
            debug!("editing is disabled, ignoring reflow");
            return &self.pages;
        }
        if let Some(last) = &self.last_reflow {
            if last.edited == edited && last.text == self.text {
                debug!("edit already applied");
                return &self.pages;
            }
        }

        let (before, rest) = self.pages.split_at(self.active.min(self.pages.len()));
        let after = rest.get(1..).unwrap_or_default();
        let merged = before
            .iter()
            .flat_map(|page| page.lines.iter().map(String::as_str))
            .chain(edited.split('\n'))
            .chain(
                after
                    .iter()
                    .flat_map(|page| page.lines.iter().map(String::as_str)),
            )
            .collect::<Vec<_>>()
            .join("\n");

        self.last_reflow = Some(Reflow {
            edited: edited.to_string(),
            text: merged.clone(),
        });
        if merged == self.text {
            debug!("reflow left the text unchanged");
            return &self.pages;
        }

        let active = self.active;
        self.text = merged;
        self.refresh();
        if self.active != active {
            self.remount();
        } else {
            self.sync_live_text();
        }
        &self.pages
    }

    /// Start loading a background image. Completions of earlier requests will
    /// be discarded.
    pub fn request_background(&mut self) -> LoadTicket {
        self.background_gate.request()
    }

    /// Apply the decoded background of a request, unless a newer request has
    /// been made since. A failed decode falls back to the plain paper colour.
    pub fn complete_background(
        &mut self,
        ticket: LoadTicket,
        result: Result<BackgroundImage, HandwritingError>,
    ) -> LoadOutcome {
        if !self.background_gate.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        let outcome = match result {
            Ok(background) => {
                debug!(?background, "background loaded");
                self.background = Some(background);
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!(%err, "background failed to load, using the paper colour");
                self.background = None;
                LoadOutcome::FellBack
            }
        };
        self.options.custom_background = self.background.is_some();
        self.refresh();
        self.remount();
        outcome
    }

    /// Decode and apply a background in one go
    pub fn load_background(&mut self, bytes: &[u8]) -> LoadOutcome {
        let ticket = self.request_background();
        let decoded = BackgroundImage::decode(bytes, self.config.page_size);
        self.complete_background(ticket, decoded)
    }

    /// Drop the background, along with any load still in flight
    pub fn clear_background(&mut self) {
        self.background_gate.supersede();
        self.background = None;
        self.options.custom_background = false;
        self.refresh();
        self.remount();
    }

    pub fn request_custom_font(&mut self) -> LoadTicket {
        self.font_gate.request()
    }

    /// Install a parsed custom font and switch to it, unless a newer request
    /// has been made since. If parsing failed the default font is used.
    pub fn complete_custom_font(
        &mut self,
        ticket: LoadTicket,
        result: Result<Font, HandwritingError>,
    ) -> LoadOutcome {
        if !self.font_gate.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        let outcome = match result {
            Ok(font) => {
                info!(family = ?font.family(), "custom font loaded");
                self.fonts.insert(FontFamily::CustomFont, font);
                self.options.font = FontFamily::CustomFont;
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!(%err, "custom font failed to load, using the default font");
                self.drop_custom_font();
                LoadOutcome::FellBack
            }
        };
        self.refresh();
        self.remount();
        outcome
    }

    /// Parse and apply a custom font in one go
    pub fn load_custom_font(&mut self, bytes: Vec<u8>) -> LoadOutcome {
        let ticket = self.request_custom_font();
        let parsed = Font::load(bytes);
        self.complete_custom_font(ticket, parsed)
    }

    pub fn clear_custom_font(&mut self) {
        self.font_gate.supersede();
        self.drop_custom_font();
        self.refresh();
        self.remount();
    }

    /// Rasterize page `index`. The visible page is rendered from the live
    /// canvas when one is mounted, so direct edits show up.
    pub fn render_page(&mut self, index: usize) -> Result<RgbaImage, HandwritingError> {
        if index == self.active {
            if let Some(live) = &self.live {
                return Ok(live.rasterize(&self.fonts, self.background.as_ref()));
            }
        }
        let size = self.config.page_size;
        let instructions = self
            .realize_page(index)
            .ok_or(HandwritingError::PageMissing)?;
        let canvas = Canvas::from_instructions(size, instructions);
        Ok(canvas.rasterize(&self.fonts, self.background.as_ref()))
    }

    /// Render every page, in order, into a document ready to be written out
    pub fn export_document(&mut self) -> Result<Document, HandwritingError> {
        if self.pages.is_empty() {
            return Err(HandwritingError::NoContent);
        }

        let mut document = Document::default();
        document.set_info(Info::new(self.config.title.clone()));
        for index in 0..self.page_count() {
            document.add_page(self.render_page(index)?);
        }
        info!(pages = document.page_count(), "rendered document");
        Ok(document)
    }

    fn last_page(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    fn refresh(&mut self) {
        self.config = LayoutConfig::from_options(&self.options);
        self.pages = paginate(&self.text, &self.config);
        self.realized.clear();
        self.active = self.active.min(self.last_page());
    }

    fn realize_page(&mut self, index: usize) -> Option<&[DrawInstruction]> {
        let page = self.pages.get(index)?;
        let instructions = match self.realized.entry(index) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(page = index, "laying out page");
                entry.insert(layout_page(page, &self.config, &mut self.rng))
            }
        };
        Some(instructions.as_slice())
    }

    /// Rebuild the live canvas for the visible page, if one is mounted
    fn remount(&mut self) {
        if self.live.is_some() {
            self.mount();
        }
    }

    /// Bring the written lines of the live canvas in line with the visible
    /// page, leaving everything else on it untouched
    fn sync_live_text(&mut self) {
        let Some(live) = self.live.as_ref() else {
            return;
        };
        let in_sync = match self.pages.get(self.active) {
            Some(page) => live.written_lines() == page.lines,
            None => true,
        };
        if !in_sync {
            let instructions = self.visible_page().to_vec();
            if let Some(live) = self.live.as_mut() {
                live.replace_tagged(ShapeTag::Text, &instructions);
            }
        }
    }

    fn drop_custom_font(&mut self) {
        self.fonts.remove(FontFamily::CustomFont);
        if self.options.font == FontFamily::CustomFont {
            self.options.font = FontFamily::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::CANVAS;
    use image::{DynamicImage, Rgba};

    fn editor_with_lines(count: usize) -> Editor {
        let mut editor = Editor::new(Some(7));
        let text = (1..=count)
            .map(|n| format!("line {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        editor.set_text(text);
        editor
    }

    fn background() -> BackgroundImage {
        BackgroundImage::cover(
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(6, 8, Rgba([10, 20, 30, 255]))),
            CANVAS,
        )
    }

    #[test]
    fn navigation_is_clamped() {
        let mut editor = editor_with_lines(40);
        assert_eq!(editor.page_count(), 3);
        assert_eq!(editor.prev_page(), 0);
        assert_eq!(editor.next_page(), 1);
        assert_eq!(editor.go_to_page(99), 2);
        assert_eq!(editor.next_page(), 2);
    }

    #[test]
    fn shrinking_the_text_pulls_the_active_page_back() {
        let mut editor = editor_with_lines(40);
        editor.go_to_page(2);
        editor.set_text("short");
        assert_eq!(editor.active_page(), 0);
    }

    #[test]
    fn pages_are_realized_once_until_something_changes() {
        let mut editor = editor_with_lines(3);
        let first = editor.visible_page().to_vec();
        let second = editor.visible_page().to_vec();
        assert_eq!(first, second);

        editor.set_options(LayoutOptions {
            show_margins: false,
            ..Default::default()
        });
        assert_ne!(editor.visible_page(), first.as_slice());
    }

    #[test]
    fn editing_needs_a_mounted_canvas_and_the_flag() {
        let mut editor = editor_with_lines(2);
        editor.set_editing(true);
        assert!(!editor.edit_line(0, "changed"));

        editor.set_editing(false);
        editor.mount();
        assert!(!editor.edit_line(0, "changed"));
        assert_eq!(editor.text(), "line 1\nline 2");

        editor.set_editing(true);
        assert!(editor.edit_line(0, "changed"));
        assert_eq!(editor.text(), "changed\nline 2");
        assert!(!editor.edit_line(5, "missing"));
    }

    #[test]
    fn reflow_is_ignored_while_editing_is_off() {
        let mut editor = editor_with_lines(2);
        editor.reflow_on_edit("something else");
        assert_eq!(editor.text(), "line 1\nline 2");
    }

    #[test]
    fn reflow_splices_the_visible_page_into_the_document() {
        let mut editor = editor_with_lines(20);
        editor.set_editing(true);
        editor.go_to_page(1);
        editor.reflow_on_edit("nineteen\nextra\ntwenty");

        let expected = (1..=18)
            .map(|n| format!("line {n}"))
            .chain(["nineteen".into(), "extra".into(), "twenty".into()])
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(editor.text(), expected);

        let pages = editor.pages().to_vec();
        editor.reflow_on_edit("nineteen\nextra\ntwenty");
        assert_eq!(editor.pages(), pages.as_slice());
    }

    #[test]
    fn repeating_an_edit_that_spills_onto_the_next_page_changes_nothing() {
        let mut editor = editor_with_lines(19);
        editor.set_editing(true);
        let edited = (1..=18)
            .map(|n| format!("line {n}"))
            .chain(["new".to_string()])
            .collect::<Vec<_>>()
            .join("\n");

        let once = editor.reflow_on_edit(&edited).to_vec();
        assert_eq!(once[1].lines, vec!["new", "line 19"]);
        let text = editor.text().to_string();

        editor.reflow_on_edit(&edited);
        assert_eq!(editor.text(), text);
        assert_eq!(editor.pages(), once.as_slice());
    }

    #[test]
    fn repeating_an_overflowing_edit_of_a_middle_page_changes_nothing() {
        let mut editor = editor_with_lines(40);
        editor.set_editing(true);
        editor.go_to_page(1);
        let edited = (1..=19)
            .map(|n| format!("rewritten {n}"))
            .collect::<Vec<_>>()
            .join("\n");

        editor.reflow_on_edit(&edited);
        let text = editor.text().to_string();
        assert_eq!(editor.pages()[2].lines[0], "rewritten 19");
        assert_eq!(text.lines().count(), 41);

        editor.reflow_on_edit(&edited);
        assert_eq!(editor.text(), text);
        assert_eq!(editor.active_page(), 1);
    }

    #[test]
    fn edits_that_add_lines_update_the_live_canvas() {
        let mut editor = editor_with_lines(2);
        editor.set_editing(true);
        editor.mount();
        assert!(editor.edit_line(1, "two\nthree"));
        assert_eq!(editor.text(), "line 1\ntwo\nthree");
        let live = editor.live_canvas().map(Canvas::text_content);
        assert_eq!(live.as_deref(), Some("line 1\ntwo\nthree"));
    }

    #[test]
    fn stale_backgrounds_are_discarded() {
        let mut editor = Editor::new(Some(1));
        let older = editor.request_background();
        let newer = editor.request_background();

        assert_eq!(editor.complete_background(newer, Ok(background())), LoadOutcome::Applied);
        assert_eq!(editor.complete_background(older, Ok(background())), LoadOutcome::Stale);
        assert!(editor.options().custom_background);
        assert!(editor.background().is_some());

        editor.clear_background();
        assert!(editor.background().is_none());
        assert!(!editor.config().background_image);
    }

    #[test]
    fn a_failed_background_falls_back_to_the_paper() {
        let mut editor = Editor::new(Some(1));
        assert_eq!(editor.load_background(b"garbage"), LoadOutcome::FellBack);
        assert!(editor.background().is_none());
        assert!(!editor.options().custom_background);
    }

    #[test]
    fn a_failed_custom_font_falls_back_to_the_default() {
        let mut editor = Editor::new(Some(1));
        editor.set_options(LayoutOptions {
            font: FontFamily::CustomFont,
            ..Default::default()
        });
        assert_eq!(editor.load_custom_font(vec![0, 1, 2, 3]), LoadOutcome::FellBack);
        assert_eq!(editor.options().font, FontFamily::default());
        assert!(!editor.fonts().contains(FontFamily::CustomFont));
    }

    #[test]
    fn exports_every_page() {
        let mut editor = editor_with_lines(40);
        let document = editor.export_document().unwrap();
        assert_eq!(document.page_count(), 3);
        assert_eq!(document.page(0).map(|p| p.image.dimensions()), Some((600, 800)));
        assert!(editor.render_page(3).is_err());
    }
}
