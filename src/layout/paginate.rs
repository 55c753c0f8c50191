use super::config::LayoutConfig;
use crate::page::Page;
use tracing::debug;

/// Split text into its lines, keeping empty lines. Empty text has no lines at
/// all rather than a single empty one.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// How many pages a text takes: `ceil(lines / lines_per_page)`, and never fewer than one
pub fn page_count(text: &str, config: &LayoutConfig) -> usize {
    split_lines(text)
        .len()
        .div_ceil(config.lines_per_page())
        .max(1)
}

/// Distribute the lines of `text` over pages of `config.lines_per_page()` lines
/// each, in input order. Every line lands on exactly one page, and every page
/// but the last is full. Empty text yields a single empty page so that there
/// is always a page to show.
///
/// # Example
///
/// ```
/// use handwrite_gen::layout::{paginate, LayoutConfig};
///
/// let pages = paginate("dear diary,\n\ntoday I wrote a crate", &LayoutConfig::default());
/// assert_eq!(pages.len(), 1);
/// assert_eq!(pages[0].lines, vec!["dear diary,", "", "today I wrote a crate"]);
/// ```
pub fn paginate(text: &str, config: &LayoutConfig) -> Vec<Page> {
    let per_page = config.lines_per_page();
    let lines = split_lines(text);

    let mut pages: Vec<Page> = lines
        .chunks(per_page)
        .enumerate()
        .map(|(index, chunk)| Page {
            index,
            lines: chunk.iter().map(|line| line.to_string()).collect(),
            has_title: false,
        })
        .collect();

    if pages.is_empty() {
        pages.push(Page::new(0));
    }
    pages[0].has_title = config.title.is_some();

    debug!(
        lines = lines.len(),
        per_page,
        pages = pages.len(),
        "paginated text"
    );
    pages
}
