use crate::fonts::{FIXED_ADVANCE_EM, FontHandle, FontSource, OutlineFont};
use rustybuzz::UnicodeBuffer;
use std::cell::RefCell;

// Reuse buffer to avoid allocations when shaping many short lines
thread_local! {
    static SCRATCH_BUFFER: RefCell<Option<UnicodeBuffer>> =
        RefCell::new(Some(UnicodeBuffer::new()));
}

/// A glyph positioned relative to the line's origin on the baseline.
/// `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub id: u16,
    pub x: f32,
    pub y: f32,
}

/// A single line of text shaped with one font.
#[derive(Debug, Clone)]
pub struct ShapedLine {
    pub text: String,
    pub font: FontHandle,
    pub glyphs: Vec<PlacedGlyph>,
    pub width: f32,
}

/// Shapes `text` as one unbroken line. Measuring and drawing both go through
/// here so that centered text lands where its measured width says it will.
pub fn shape_line(font: &FontHandle, text: &str) -> ShapedLine {
    let (glyphs, width) = match font.source() {
        FontSource::Outline(outline) => shape_outline(outline, font.size(), text)
            .unwrap_or_else(|| shape_fixed(font.size(), text)),
        FontSource::FixedMetric => shape_fixed(font.size(), text),
    };
    ShapedLine {
        text: text.to_string(),
        font: font.clone(),
        glyphs,
        width,
    }
}

fn shape_outline(font: &OutlineFont, size: f32, text: &str) -> Option<(Vec<PlacedGlyph>, f32)> {
    let face = font.as_face()?;
    let scale = size / f32::from(font.units_per_em());

    let mut buffer = SCRATCH_BUFFER
        .with(|b| b.borrow_mut().take())
        .unwrap_or_else(UnicodeBuffer::new);
    buffer.push_str(text);
    let output = rustybuzz::shape(&face, &[], buffer);

    let mut glyphs = Vec::with_capacity(output.len());
    let mut pen = 0.0f32;
    for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
        glyphs.push(PlacedGlyph {
            id: u16::try_from(info.glyph_id).unwrap_or(0),
            x: pen + pos.x_offset as f32 * scale,
            y: -(pos.y_offset as f32) * scale,
        });
        pen += pos.x_advance as f32 * scale;
    }

    SCRATCH_BUFFER.with(|b| *b.borrow_mut() = Some(output.clear()));
    Some((glyphs, pen))
}

/// Every character advances the same amount; whitespace advances without a glyph.
fn shape_fixed(size: f32, text: &str) -> (Vec<PlacedGlyph>, f32) {
    let advance = FIXED_ADVANCE_EM * size;
    let mut count = 0usize;
    let mut glyphs = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        if !ch.is_whitespace() {
            glyphs.push(PlacedGlyph {
                id: 1,
                x: i as f32 * advance,
                y: 0.0,
            });
        }
        count = i + 1;
    }
    (glyphs, count as f32 * advance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardfit_traits::FontWeight;

    #[test]
    fn fixed_metric_lines_skip_whitespace_glyphs() {
        let font = FontHandle::fixed_metric(FontWeight::Regular, 10.0);
        let line = shape_line(&font, "a b");
        assert_eq!(line.glyphs.len(), 2);
        assert!((line.width - 18.0).abs() < 1e-4);
        assert!((line.glyphs[1].x - 12.0).abs() < 1e-4);
    }

    #[test]
    fn empty_text_has_zero_width() {
        let font = FontHandle::fixed_metric(FontWeight::Bold, 30.0);
        let line = shape_line(&font, "");
        assert!(line.glyphs.is_empty());
        assert_eq!(line.width, 0.0);
    }
}
