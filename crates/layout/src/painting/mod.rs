//! The drawing surface abstraction and the pass that replays a layout onto it.

use crate::elements::DrawCommand;
use crate::engine::CardLayout;
use crate::text::ShapedLine;
use cardfit_types::{Color, Point, Rect, Size};

/// A raster surface a card can be painted on.
///
/// Implementations own their pixels exclusively; a canvas is never shared
/// between renders.
pub trait Canvas {
    fn size(&self) -> Size;

    fn fill(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Strokes the outline of `rect` with the stroke kept inside its bounds.
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color);

    fn stroke_polygon(&mut self, points: &[Point], width: f32, color: Color);

    /// Draws `line` with its top-left corner at `origin`.
    fn draw_text(&mut self, origin: Point, line: &ShapedLine, color: Color);
}

/// Replays every command of `layout` in order.
pub fn paint(layout: &CardLayout, canvas: &mut dyn Canvas) {
    for command in &layout.commands {
        match command {
            DrawCommand::Fill { color } => canvas.fill(*color),
            DrawCommand::FillRect { rect, color } => canvas.fill_rect(*rect, *color),
            DrawCommand::StrokeRect { rect, width, color } => {
                canvas.stroke_rect(*rect, *width, *color)
            }
            DrawCommand::StrokePolygon {
                points,
                width,
                color,
            } => canvas.stroke_polygon(points, *width, *color),
            DrawCommand::Text {
                origin,
                line,
                color,
            } => canvas.draw_text(*origin, line, *color),
        }
    }
}
