//! Auto-fit layout for invitation cards.
//!
//! A card's width comes from its paper size; its height is computed from the
//! content before a canvas exists. [`ScaleProfile`] derives every metric from
//! the width, [`LayoutPlan`] pairs it with the estimated height and
//! [`LayoutEngine`] positions and paints the blocks.

use cardfit_types::Size;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid card width '{0}': must be a positive number of pixels.")]
    InvalidWidth(String),
    #[error("Unknown paper size '{name}'. Available: {}", .available.join(", "))]
    UnknownPaperSize { name: String, available: Vec<String> },
    #[error("Invalid value for '{field}': {message}")]
    Configuration { field: String, message: String },
    #[error(
        "Canvas is {}x{} but the card needs {}x{}.",
        .actual.width, .actual.height, .expected.width, .expected.height
    )]
    CanvasMismatch { expected: Size, actual: Size },
}

impl LayoutError {
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        LayoutError::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub mod blocks;
pub mod config;
pub mod elements;
pub mod engine;
pub mod fonts;
pub mod ornament;
pub mod painting;
pub mod paper;
pub mod plan;
pub mod scale;
pub mod text;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::blocks::{Block, estimate_height};
pub use self::config::{LayoutConfig, OverflowPolicy};
pub use self::elements::{Align, DrawCommand};
pub use self::engine::{BlockSpan, CardLayout, LayoutEngine};
pub use self::fonts::{FontHandle, FontLibrary, FontSource};
pub use self::painting::{Canvas, paint};
pub use self::paper::{DPI, PaperProfile, PaperSizeRegistry, PaperSpec};
pub use self::plan::LayoutPlan;
pub use self::scale::{FontSizes, REFERENCE_WIDTH, ScaleProfile};
pub use self::text::{PlacedGlyph, ShapedLine, shape_line};
