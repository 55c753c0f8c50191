//! The page layout engine.
//!
//! Layout is a pure function of the input text and a [`LayoutConfig`]:
//!
//! - [`paginate`] splits the text into lines and distributes them over pages
//!   of [`LayoutConfig::lines_per_page`] lines each, never losing, duplicating or
//!   reordering a line
//! - [`layout_page`] turns one page into [`DrawInstruction`](crate::DrawInstruction)s:
//!   paper, ruling, margin guides, the title and the written lines, each line
//!   nudged by a little random [`Jitter`](crate::Jitter) drawn from an injected
//!   random source
//!
//! Realizing the instructions on a drawing surface is left to
//! [`Canvas`](crate::Canvas).
//!
//! # Example
//!
//! ```
//! use handwrite_gen::layout::{layout_page, paginate, LayoutConfig, LayoutOptions, Ruling};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let options = LayoutOptions {
//!     page_type: Ruling::Graph,
//!     ..Default::default()
//! };
//! let config = LayoutConfig::from_options(&options);
//! let pages = paginate("Hello,\nworld!", &config);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let instructions = layout_page(&pages[0], &config, &mut rng);
//! assert!(!instructions.is_empty());
//! ```

mod config;
mod draw;
mod margins;
mod paginate;

pub use config::*;
pub use draw::*;
pub use margins::*;
pub use paginate::*;
