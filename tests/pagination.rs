use handwrite_gen::layout::{
    layout_page, page_count, paginate, split_lines, LayoutConfig, LayoutOptions, LetterSpacing,
    Ruling,
};
use handwrite_gen::{DrawInstruction, FontFamily, Px};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A long body of text, broken into lines of varying length with the odd
/// blank line thrown in
fn body(words: usize) -> String {
    let text = lipsum::lipsum(words);
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut lines = Vec::new();
    for (n, chunk) in words.chunks(7).enumerate() {
        lines.push(chunk.join(" "));
        if n % 5 == 4 {
            lines.push(String::new());
        }
    }
    lines.join("\n")
}

fn all_configs() -> Vec<LayoutConfig> {
    let mut configs = Vec::new();
    for font in [FontFamily::Caveat, FontFamily::HomemadeApple, FontFamily::Kalam] {
        for show_margins in [true, false] {
            for show_title in [true, false] {
                configs.push(LayoutConfig::from_options(&LayoutOptions {
                    font,
                    show_margins,
                    show_title,
                    title: "Lecture notes".into(),
                    ..Default::default()
                }));
            }
        }
    }
    configs
}

#[test]
fn pagination_never_loses_or_reorders_lines() {
    for words in [0, 3, 60, 400, 2000] {
        let text = body(words);
        for config in all_configs() {
            let pages = paginate(&text, &config);
            let rejoined: Vec<&str> = pages
                .iter()
                .flat_map(|page| page.lines.iter().map(String::as_str))
                .collect();
            assert_eq!(rejoined, split_lines(&text));

            let expected = split_lines(&text)
                .len()
                .div_ceil(config.lines_per_page())
                .max(1);
            assert_eq!(pages.len(), expected);
            assert_eq!(page_count(&text, &config), expected);

            let (last, full) = pages.split_last().unwrap();
            assert!(full.iter().all(|p| p.lines.len() == config.lines_per_page()));
            assert!(last.lines.len() <= config.lines_per_page());
            assert!(pages.iter().enumerate().all(|(i, p)| p.index == i));
        }
    }
}

#[test]
fn hiding_margins_widens_the_writing_area() {
    for show_title in [true, false] {
        let with = LayoutConfig::from_options(&LayoutOptions {
            show_title,
            ..Default::default()
        });
        let without = LayoutConfig::from_options(&LayoutOptions {
            show_margins: false,
            show_title,
            ..Default::default()
        });
        assert!(without.margins.left < with.margins.left);
        assert!(without.margins.right < with.margins.right);
        assert!(without.content_width() > with.content_width());
    }
}

#[test]
fn every_written_line_stays_within_its_jitter_bounds() {
    let text = body(2000);
    for spacing in [LetterSpacing::Tight, LetterSpacing::ExtraWide] {
        let config = LayoutConfig::from_options(&LayoutOptions {
            letter_spacing: spacing,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(2024);
        for page in paginate(&text, &config) {
            for instruction in layout_page(&page, &config, &mut rng) {
                if let DrawInstruction::Text(line) = instruction {
                    assert!(line.jitter.position.abs() <= Px(1.0));
                    assert!(line.jitter.size.abs() <= Px(1.0));
                    assert!(line.jitter.angle.abs() <= 0.25);
                    assert_eq!(line.style.char_spacing, spacing.body());
                    assert_eq!(line.base_position.0, config.margins.left);
                }
            }
        }
    }
}

#[test]
fn same_seed_same_handwriting() {
    let config = LayoutConfig::from_options(&LayoutOptions {
        page_type: Ruling::Graph,
        ..Default::default()
    });
    let pages = paginate(&body(100), &config);
    let first = layout_page(&pages[0], &config, &mut StdRng::seed_from_u64(5));
    let second = layout_page(&pages[0], &config, &mut StdRng::seed_from_u64(5));
    assert_eq!(first, second);
}
