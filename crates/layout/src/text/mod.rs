pub mod shaper;

pub use shaper::{PlacedGlyph, ShapedLine, shape_line};
