use crate::text::ShapedLine;
use cardfit_types::{Color, Point, Rect};

/// One paint operation produced by the layout engine.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Flood the whole canvas.
    Fill { color: Color },
    FillRect { rect: Rect, color: Color },
    /// Outline whose stroke lies entirely inside `rect`.
    StrokeRect { rect: Rect, width: f32, color: Color },
    /// Closed, unfilled polygon.
    StrokePolygon {
        points: Vec<Point>,
        width: f32,
        color: Color,
    },
    /// A shaped line whose box starts at `origin` (top-left, not baseline).
    Text {
        origin: Point,
        line: ShapedLine,
        color: Color,
    },
}

/// How a text line is positioned horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Starts at a fixed x offset; never measured.
    Left(u32),
    /// `x = floor((canvas_width - text_width) / 2)`.
    Center,
}
