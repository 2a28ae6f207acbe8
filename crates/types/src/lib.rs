pub mod color;
pub mod content;
pub mod geometry;

pub use color::Color;
pub use content::{CardContent, Palette, Participant};
pub use geometry::{Point, Rect, Size};
