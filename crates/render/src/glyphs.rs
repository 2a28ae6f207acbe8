use tiny_skia::{Path, PathBuilder};
use ttf_parser::OutlineBuilder;

/// Converts font-unit outlines into a device-space path. Font space grows
/// upward, so y is flipped around the baseline.
pub(crate) struct GlyphPathBuilder {
    builder: PathBuilder,
    origin_x: f32,
    baseline: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    pub(crate) fn new(origin_x: f32, baseline: f32, scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x,
            baseline,
            scale,
        }
    }

    pub(crate) fn finish(self) -> Option<Path> {
        self.builder.finish()
    }

    fn x(&self, x: f32) -> f32 {
        self.origin_x + x * self.scale
    }

    fn y(&self, y: f32) -> f32 {
        self.baseline - y * self.scale
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.x(x), self.y(y));
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.x(x), self.y(y));
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1, x, y) = (self.x(x1), self.y(y1), self.x(x), self.y(y));
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = (self.x(x1), self.y(y1));
        let (x2, y2) = (self.x(x2), self.y(y2));
        let (x, y) = (self.x(x), self.y(y));
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_font_space_around_the_baseline() {
        let mut builder = GlyphPathBuilder::new(10.0, 100.0, 0.5);
        builder.move_to(0.0, 0.0);
        builder.line_to(100.0, 0.0);
        builder.line_to(100.0, 200.0);
        builder.close();
        let bounds = builder.finish().unwrap().bounds();
        assert_eq!(bounds.left(), 10.0);
        assert_eq!(bounds.right(), 60.0);
        assert_eq!(bounds.top(), 0.0);
        assert_eq!(bounds.bottom(), 100.0);
    }

    #[test]
    fn empty_outline_yields_no_path() {
        assert!(GlyphPathBuilder::new(0.0, 0.0, 1.0).finish().is_none());
    }
}
