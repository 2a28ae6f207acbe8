//! Width-derived visual metrics.
//!
//! Every metric is authored at [`REFERENCE_WIDTH`] and scaled linearly with
//! the target width, truncating toward zero. Stroke-like metrics carry a
//! floor so they stay visible on small cards.

use crate::LayoutError;

/// The A5 width (at 300 DPI) all base constants were authored against.
pub const REFERENCE_WIDTH: u32 = 1748;

const BORDER_WIDTH: u32 = 20;
const BORDER_THICKNESS: u32 = 8;
const MIN_BORDER_THICKNESS: u32 = 4;
const PADDING: u32 = 80;
const LINE_SPACING: u32 = 35;
const SECTION_SPACING: u32 = 60;
const TITLE_FONT: u32 = 72;
const SUBTITLE_FONT: u32 = 48;
const HEADING_FONT: u32 = 36;
const BODY_FONT: u32 = 28;
const SMALL_FONT: u32 = 24;
const ORNAMENT_SIZE: u32 = 30;
const BOX_PADDING: u32 = 30;
const BOX_LINE_HEIGHT: u32 = 45;
const BOX_STROKE: u32 = 3;
const ORNAMENT_STROKE: u32 = 2;
const MIN_STROKE: u32 = 2;

/// Pixel font sizes for each text role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSizes {
    pub title: u32,
    pub subtitle: u32,
    pub heading: u32,
    pub body: u32,
    pub small: u32,
}

/// All scaled metrics for one card width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleProfile {
    pub width: u32,
    pub scale_factor: f64,
    pub border_width: u32,
    pub border_thickness: u32,
    pub padding: u32,
    pub line_spacing: u32,
    pub section_spacing: u32,
    pub font_sizes: FontSizes,
    pub ornament_size: u32,
    pub box_padding: u32,
    pub box_line_height: u32,
    pub box_stroke_width: u32,
    pub ornament_stroke_width: u32,
}

impl ScaleProfile {
    /// Derives the profile for `width` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidWidth`] when `width <= 0`.
    pub fn derive(width: i64) -> Result<Self, LayoutError> {
        let width = u32::try_from(width)
            .ok()
            .filter(|w| *w > 0)
            .ok_or_else(|| LayoutError::InvalidWidth(width.to_string()))?;

        let scaled = |base: u32| scale(base, width);
        let clamped = |base: u32, min: u32| scale(base, width).max(min);

        Ok(Self {
            width,
            scale_factor: f64::from(width) / f64::from(REFERENCE_WIDTH),
            border_width: scaled(BORDER_WIDTH),
            border_thickness: clamped(BORDER_THICKNESS, MIN_BORDER_THICKNESS),
            padding: scaled(PADDING),
            line_spacing: scaled(LINE_SPACING),
            section_spacing: scaled(SECTION_SPACING),
            font_sizes: FontSizes {
                title: scaled(TITLE_FONT),
                subtitle: scaled(SUBTITLE_FONT),
                heading: scaled(HEADING_FONT),
                body: scaled(BODY_FONT),
                small: scaled(SMALL_FONT),
            },
            ornament_size: scaled(ORNAMENT_SIZE),
            box_padding: scaled(BOX_PADDING),
            box_line_height: scaled(BOX_LINE_HEIGHT),
            box_stroke_width: clamped(BOX_STROKE, MIN_STROKE),
            ornament_stroke_width: clamped(ORNAMENT_STROKE, MIN_STROKE),
        })
    }

    /// Left edge of agenda items: `floor(padding * 1.3)`.
    pub fn agenda_indent(&self) -> u32 {
        mul_ratio(self.padding, 13, 10)
    }

    /// Widest line any text block may hold.
    pub fn max_line_width(&self) -> u32 {
        self.width.saturating_sub(self.padding.saturating_mul(2))
    }
}

/// `floor(base * width / REFERENCE_WIDTH)` in exact integer arithmetic, so
/// results never depend on floating-point rounding.
fn scale(base: u32, width: u32) -> u32 {
    mul_ratio(base, width, REFERENCE_WIDTH)
}

/// `floor(value * num / den)` without intermediate overflow.
pub(crate) fn mul_ratio(value: u32, num: u32, den: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(num) / u64::from(den);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
