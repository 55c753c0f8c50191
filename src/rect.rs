use crate::units::Px;

/// An axis-aligned box on the page. Canvas coordinates grow rightwards and
/// downwards, so `(x1, y1)` is the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x1: Px,
    pub y1: Px,
    pub x2: Px,
    pub y2: Px,
}

impl Rect {
    /// A box of the given size with its corner at the origin
    pub fn from_size(width: Px, height: Px) -> Rect {
        Rect {
            x1: Px(0.0),
            y1: Px(0.0),
            x2: width,
            y2: height,
        }
    }

    pub fn width(&self) -> Px {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Px {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect::new(*r.x1, *r.y1, *r.x2, *r.y2)
    }
}
