use super::config::{LayoutConfig, Ruling};
use crate::colour::colours;
use crate::page::*;
use crate::units::Px;
use rand::Rng;

/// Spacing of graph paper lines, in both directions
pub const GRID_SPACING: Px = Px(20.0);

const GUIDE_WIDTH: Px = Px(1.0);
const TITLE_TOP: Px = Px(30.0);
const TITLE_SIZE: Px = Px(36.0);
/// Horizontal room the title leaves free, split evenly on both sides
const TITLE_INSET: Px = Px(80.0);

/// Bounds of the random perturbations applied to each written line. Every
/// value is drawn uniformly from `-bound..=bound`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JitterBounds {
    /// Vertical offset of a line from its cursor position
    pub position: Px,
    /// Offset of the font size
    pub size: Px,
    /// Rotation, in degrees
    pub angle: f32,
    /// Variation of the distance between consecutive lines
    pub advance: Px,
}

impl JitterBounds {
    /// The irregularity of a steady hand
    pub const HANDWRITTEN: JitterBounds = JitterBounds {
        position: Px(1.0),
        size: Px(1.0),
        angle: 0.25,
        advance: Px(2.0),
    };

    /// No irregularity at all; lines sit exactly on their cursor
    pub const NONE: JitterBounds = JitterBounds {
        position: Px(0.0),
        size: Px(0.0),
        angle: 0.0,
        advance: Px(0.0),
    };

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Jitter {
        Jitter {
            position: Px(symmetric(rng, *self.position)),
            size: Px(symmetric(rng, *self.size)),
            angle: symmetric(rng, self.angle),
        }
    }

    fn sample_advance<R: Rng + ?Sized>(&self, rng: &mut R) -> Px {
        Px(symmetric(rng, *self.advance))
    }
}

impl Default for JitterBounds {
    fn default() -> Self {
        JitterBounds::HANDWRITTEN
    }
}

fn symmetric<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> f32 {
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}

/// Turn a page into the instructions that draw it, using the default
/// handwriting jitter. See [layout_page_with].
pub fn layout_page<R: Rng + ?Sized>(
    page: &Page,
    config: &LayoutConfig,
    rng: &mut R,
) -> Vec<DrawInstruction> {
    layout_page_with(page, config, &JitterBounds::HANDWRITTEN, rng)
}

/// Turn a page into the instructions that draw it, in painting order: paper
/// fill, background image, ruling, margin guides, title (page 0 only) and
/// finally one instruction per written line.
///
/// Lines start at the top margin; the cursor advances by the line height plus
/// a small random amount after every line. Each line also receives its own
/// position, size and angle jitter drawn from `rng`.
pub fn layout_page_with<R: Rng + ?Sized>(
    page: &Page,
    config: &LayoutConfig,
    bounds: &JitterBounds,
    rng: &mut R,
) -> Vec<DrawInstruction> {
    let (width, height) = config.page_size;
    let mut out = Vec::with_capacity(page.lines.len() + 64);

    out.push(DrawInstruction::Fill(config.paper));
    if config.background_image {
        out.push(DrawInstruction::BackgroundImage);
    }

    match config.ruling {
        Ruling::Plain => {}
        Ruling::Ruled => {
            for y in steps(config.margins.top, config.line_height, height) {
                out.push(DrawInstruction::Rule(guide(
                    (Px(0.0), y),
                    (width, y),
                    colours::RULE,
                )));
            }
        }
        Ruling::Graph => {
            for y in steps(GRID_SPACING, GRID_SPACING, height) {
                out.push(DrawInstruction::Grid(guide(
                    (Px(0.0), y),
                    (width, y),
                    colours::GRAPH,
                )));
            }
            for x in steps(GRID_SPACING, GRID_SPACING, width) {
                out.push(DrawInstruction::Grid(guide(
                    (x, Px(0.0)),
                    (x, height),
                    colours::GRAPH,
                )));
            }
        }
    }

    if config.show_margins {
        let left = config.margins.left;
        let right = width - config.margins.right;
        let top = config.margins.top / 2.0;
        out.push(DrawInstruction::Margin(guide(
            (left, Px(0.0)),
            (left, height),
            colours::MARGIN,
        )));
        out.push(DrawInstruction::Margin(guide(
            (right, Px(0.0)),
            (right, height),
            colours::MARGIN_FAINT,
        )));
        out.push(DrawInstruction::Margin(guide(
            (Px(0.0), top),
            (width, top),
            colours::MARGIN_FAINT,
        )));
    }

    if page.has_title {
        if let Some(title) = &config.title {
            out.push(DrawInstruction::Title(TextLine {
                content: title.clone(),
                base_position: (width / 2.0, TITLE_TOP),
                style: TextStyle {
                    font: config.font,
                    size: TITLE_SIZE,
                    colour: config.ink,
                    char_spacing: config.letter_spacing.title(),
                    bold: true,
                    align: Align::Centre,
                    width: width - TITLE_INSET,
                },
                jitter: Jitter::default(),
            }));
        }
    }

    let style = TextStyle {
        font: config.font,
        size: config.base_font_size,
        colour: config.ink,
        char_spacing: config.letter_spacing.body(),
        bold: false,
        align: Align::Left,
        width: config.content_width(),
    };
    let mut cursor = config.margins.top;
    for line in page.lines.iter() {
        out.push(DrawInstruction::Text(TextLine {
            content: line.clone(),
            base_position: (config.margins.left, cursor),
            style,
            jitter: bounds.sample(rng),
        }));
        cursor += config.line_height + bounds.sample_advance(rng);
    }

    out
}

fn guide(from: (Px, Px), to: (Px, Px), colour: crate::Colour) -> GuideLine {
    GuideLine {
        from,
        to,
        colour,
        width: GUIDE_WIDTH,
    }
}

/// `start, start + step, ...` while strictly below `end`
fn steps(start: Px, step: Px, end: Px) -> impl Iterator<Item = Px> {
    let count = if *step > 0.0 && start < end {
        ((end - start) / step).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| start + step * i as f32).filter(move |v| *v < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{paginate, LayoutOptions};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(options: LayoutOptions) -> LayoutConfig {
        LayoutConfig::from_options(&options)
    }

    fn page_with(lines: &[&str]) -> Page {
        Page {
            index: 0,
            lines: lines.iter().map(|l| l.to_string()).collect(),
            has_title: false,
        }
    }

    #[test]
    fn graph_paper_has_39_rows_and_29_columns() {
        let config = config(LayoutOptions {
            page_type: Ruling::Graph,
            show_margins: false,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(7);
        let instructions = layout_page(&page_with(&[]), &config, &mut rng);

        let rows: Vec<Px> = instructions
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Grid(g) if g.from.1 == g.to.1 => Some(g.from.1),
                _ => None,
            })
            .collect();
        assert_eq!(rows.len(), 39);
        assert_eq!(rows.first(), Some(&Px(20.0)));
        assert_eq!(rows.last(), Some(&Px(780.0)));

        let columns = instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::Grid(g) if g.from.0 == g.to.0))
            .count();
        assert_eq!(columns, 29);
    }

    #[test]
    fn ruled_lines_start_at_the_top_margin() {
        let config = config(LayoutOptions::default());
        let mut rng = StdRng::seed_from_u64(1);
        let rules: Vec<Px> = layout_page(&page_with(&["a"]), &config, &mut rng)
            .into_iter()
            .filter_map(|i| match i {
                DrawInstruction::Rule(g) => Some(g.from.1),
                _ => None,
            })
            .collect();
        // 40, 80, ... 760
        assert_eq!(rules.len(), 19);
        assert_eq!(rules[0], Px(40.0));
        assert_eq!(rules[18], Px(760.0));
    }

    #[test]
    fn plain_paper_without_margins_is_just_a_fill() {
        let config = config(LayoutOptions {
            page_type: Ruling::Plain,
            show_margins: false,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        let instructions = layout_page(&page_with(&[]), &config, &mut rng);
        assert_eq!(instructions, vec![DrawInstruction::Fill(config.paper)]);
    }

    #[test]
    fn background_image_follows_the_fill() {
        let config = config(LayoutOptions {
            custom_background: true,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        let instructions = layout_page(&page_with(&[]), &config, &mut rng);
        assert!(matches!(instructions[0], DrawInstruction::Fill(_)));
        assert_eq!(instructions[1], DrawInstruction::BackgroundImage);
    }

    #[test]
    fn margin_guides_sit_on_the_margins() {
        let config = config(LayoutOptions {
            page_type: Ruling::Plain,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        let guides: Vec<GuideLine> = layout_page(&page_with(&[]), &config, &mut rng)
            .into_iter()
            .filter_map(|i| match i {
                DrawInstruction::Margin(g) => Some(g),
                _ => None,
            })
            .collect();
        assert_eq!(guides.len(), 3);
        assert_eq!(guides[0].from.0, Px(60.0));
        assert_eq!(guides[0].colour, colours::MARGIN);
        assert_eq!(guides[1].from.0, Px(560.0));
        assert_eq!(guides[2].from.1, Px(20.0));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let config = config(LayoutOptions::default());
        let lines: Vec<&str> = vec!["the quick brown fox"; 18];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for instruction in layout_page(&page_with(&lines), &config, &mut rng) {
                if let DrawInstruction::Text(line) = instruction {
                    assert!(line.jitter.position.abs() <= Px(1.0));
                    assert!(line.jitter.size.abs() <= Px(1.0));
                    assert!(line.jitter.angle.abs() <= 0.25);
                }
            }
        }
    }

    #[test]
    fn cursor_advances_by_about_a_line_height() {
        let config = config(LayoutOptions::default());
        let mut rng = StdRng::seed_from_u64(99);
        let tops: Vec<Px> = layout_page(&page_with(&["a", "b", "c", "d"]), &config, &mut rng)
            .iter()
            .filter_map(DrawInstruction::as_text)
            .map(|line| line.base_position.1)
            .collect();
        assert_eq!(tops[0], Px(40.0));
        for pair in tops.windows(2) {
            let advance = pair[1] - pair[0];
            assert!(advance >= Px(38.0) && advance <= Px(42.0), "{advance}");
        }
    }

    #[test]
    fn no_jitter_means_exact_positions() {
        let config = config(LayoutOptions::default());
        let mut rng = StdRng::seed_from_u64(3);
        let lines: Vec<TextLine> =
            layout_page_with(&page_with(&["a", "b"]), &config, &JitterBounds::NONE, &mut rng)
                .into_iter()
                .filter_map(|i| i.as_text().cloned())
                .collect();
        assert_eq!(lines[0].position(), (Px(60.0), Px(40.0)));
        assert_eq!(lines[1].position(), (Px(60.0), Px(80.0)));
        assert_eq!(lines[1].size(), Px(26.0));
        assert_eq!(lines[1].style.char_spacing, 20.0);
    }

    #[test]
    fn title_is_centred_on_the_first_page_only() {
        let config = config(LayoutOptions {
            title: "My Essay".into(),
            show_title: true,
            letter_spacing: crate::layout::LetterSpacing::Wide,
            ..Default::default()
        });
        let text = vec!["line"; 20].join("\n");
        let pages = paginate(&text, &config);
        let mut rng = StdRng::seed_from_u64(5);

        let first = layout_page(&pages[0], &config, &mut rng);
        let title = first
            .iter()
            .find_map(|i| match i {
                DrawInstruction::Title(t) => Some(t.clone()),
                _ => None,
            })
            .expect("title on page 0");
        assert_eq!(title.content, "My Essay");
        assert_eq!(title.base_position, (Px(300.0), Px(30.0)));
        assert_eq!(title.style.align, Align::Centre);
        assert!(title.style.bold);
        assert_eq!(title.style.char_spacing, 30.0);
        assert_eq!(title.jitter, Jitter::default());

        let second = layout_page(&pages[1], &config, &mut rng);
        assert!(!second.iter().any(|i| i.tag() == ShapeTag::Title));
    }
}
