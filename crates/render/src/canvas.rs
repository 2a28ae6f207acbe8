use crate::RenderError;
use crate::glyphs::GlyphPathBuilder;
use cardfit_layout::fonts::{FIXED_ADVANCE_EM, OutlineFont};
use cardfit_layout::{Canvas, FontSource, ShapedLine};
use cardfit_types::{Color, Point, Rect, Size};
use tiny_skia::{FillRule, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};
use ttf_parser::GlyphId;

/// An RGBA pixmap a single card is painted onto.
pub struct RasterCanvas {
    pixmap: Pixmap,
}

impl std::fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl RasterCanvas {
    /// Allocates a transparent canvas of exactly `size` pixels.
    pub fn new(size: Size) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(size.width, size.height).ok_or(RenderError::CanvasAllocation {
            width: size.width,
            height: size.height,
        })?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha color of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color {
            r: p.red(),
            g: p.green(),
            b: p.blue(),
            a: p.alpha(),
        })
    }

    fn draw_outline_text(
        &mut self,
        font: &OutlineFont,
        origin: Point,
        line: &ShapedLine,
        paint: &Paint,
    ) {
        let Ok(face) = ttf_parser::Face::parse(font.data(), font.index()) else {
            log::warn!("Font '{}' could not be reparsed for drawing", font.family());
            return;
        };
        let scale = line.font.size() / f32::from(face.units_per_em());
        let baseline = origin.y + line.font.ascent();
        for glyph in &line.glyphs {
            let mut builder = GlyphPathBuilder::new(origin.x + glyph.x, baseline + glyph.y, scale);
            if face.outline_glyph(GlyphId(glyph.id), &mut builder).is_none() {
                continue;
            }
            if let Some(path) = builder.finish() {
                self.pixmap
                    .fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }

    /// The built-in face draws every visible character as a solid box
    /// spanning the ascent.
    fn draw_fixed_text(&mut self, origin: Point, line: &ShapedLine, paint: &Paint) {
        let advance = FIXED_ADVANCE_EM * line.font.size();
        let height = line.font.ascent();
        for glyph in &line.glyphs {
            let left = origin.x + glyph.x + advance * 0.1;
            let rect = tiny_skia::Rect::from_xywh(left, origin.y + glyph.y, advance * 0.8, height);
            if let Some(rect) = rect {
                self.pixmap.fill_rect(rect, paint, Transform::identity(), None);
            }
        }
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

impl Canvas for RasterCanvas {
    fn size(&self) -> Size {
        Size::new(self.pixmap.width(), self.pixmap.height())
    }

    fn fill(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &paint_for(color), Transform::identity(), None);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        let half = width / 2.0;
        let Some(inner) = tiny_skia::Rect::from_ltrb(
            rect.x + half,
            rect.y + half,
            rect.right() - half,
            rect.bottom() - half,
        ) else {
            return;
        };
        let path = PathBuilder::from_rect(inner);
        let stroke = Stroke {
            width,
            line_join: LineJoin::Miter,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint_for(color), &stroke, Transform::identity(), None);
    }

    fn stroke_polygon(&mut self, points: &[Point], width: f32, color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        builder.close();
        let Some(path) = builder.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint_for(color), &stroke, Transform::identity(), None);
    }

    fn draw_text(&mut self, origin: Point, line: &ShapedLine, color: Color) {
        let paint = paint_for(color);
        match line.font.source() {
            FontSource::Outline(font) => self.draw_outline_text(font, origin, line, &paint),
            FontSource::FixedMetric => self.draw_fixed_text(origin, line, &paint),
        }
    }
}
