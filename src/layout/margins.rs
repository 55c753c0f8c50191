use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Px;

/// Margins are used when laying out lines on a page. Nothing prevents a long line
/// from running past the right margin; the margins are guidelines for where
/// lines start and how many fit on a page. The bottom margin mirrors the top.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Margins {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
}

impl Margins {
    /// Top, right, bottom, left
    pub fn trbl(top: Px, right: Px, bottom: Px, left: Px) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The margins of a handwritten page:
    /// * with margin guides shown, 60px on the left and 40px on the right,
    ///   otherwise 20px on each side
    /// * 80px top and bottom when a title is shown, otherwise 40px
    pub fn for_page(show_margins: bool, show_title: bool) -> Margins {
        let (left, right) = if show_margins {
            (Px(60.0), Px(40.0))
        } else {
            (Px(20.0), Px(20.0))
        };
        let vertical = if show_title { Px(80.0) } else { Px(40.0) };
        Margins::trbl(vertical, right, vertical, left)
    }

    /// The area of the page lines are written in
    pub fn content_box(&self, page: PageSize) -> Rect {
        Rect {
            x1: self.left,
            y1: self.top,
            x2: page.0 - self.right,
            y2: page.1 - self.bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::CANVAS;

    #[test]
    fn hiding_margins_widens_the_content() {
        let shown = Margins::for_page(true, false);
        let hidden = Margins::for_page(false, false);
        assert!(hidden.left < shown.left);
        assert!(hidden.right < shown.right);
        let (shown, hidden) = (shown.content_box(CANVAS), hidden.content_box(CANVAS));
        assert_eq!(shown.width(), Px(500.0));
        assert_eq!(hidden.width(), Px(560.0));
        assert_eq!(hidden.x1, Px(20.0));
    }

    #[test]
    fn title_pushes_the_top_margin_down() {
        assert_eq!(Margins::for_page(true, true).top, Px(80.0));
        assert_eq!(Margins::for_page(true, false).top, Px(40.0));
        let content = Margins::for_page(false, true).content_box(CANVAS);
        assert_eq!(content.height(), Px(640.0));
    }
}
