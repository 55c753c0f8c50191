//! Turn typed text into pages that look handwritten.
//!
//! Text is paginated and laid out by the pure functions in [layout], realized
//! on a [Canvas], rasterized and finally exported as images or a PDF through a
//! [Document]. [Editor] ties these together into an editing session.

mod assets;
pub use assets::*;

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod editor;
pub use editor::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// The page layout engine: pagination and draw instructions
pub mod layout;

mod page;
pub use page::*;

/// Page sizes
pub mod pagesize;

mod raster;
pub use raster::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, for post-processing exported documents
pub use pdf_writer;
