use crate::painting::Canvas;
use crate::text::ShapedLine;
use cardfit_types::{CardContent, Color, Palette, Point, Rect, Size};

/// Card content with two introduction lines and the requested number of
/// agenda items and detail lines. Every line fits a 1000px card.
pub fn sample_content(agenda_items: usize, detail_lines: usize) -> CardContent {
    CardContent {
        title: "Honey Sensory Test".into(),
        subtitle: "Tasting Session".into(),
        greeting_prefix: "Dear".into(),
        greeting_suffix: ",".into(),
        introduction_lines: vec![
            "You are invited to our tasting panel.".into(),
            "Please arrive ten minutes early.".into(),
        ],
        event_detail_lines: (1..=detail_lines).map(|i| format!("Detail line {i}")).collect(),
        agenda_title: "Agenda".into(),
        agenda_items: (1..=agenda_items).map(|i| format!("Agenda item {i}")).collect(),
        thanks_text: "Thank you for taking part!".into(),
        closing_text: "Best regards,".into(),
        signature_text: "The Organizers".into(),
        colors: Palette {
            background: Color::rgb(0xFF, 0xF8, 0xE7),
            accent: Color::rgb(0xC7, 0x8A, 0x1E),
            text: Color::rgb(0x33, 0x2A, 0x1F),
            box_background: Color::rgb(0xFF, 0xEE, 0xC2),
        },
    }
}

/// A canvas that records the name of every call it receives.
#[derive(Debug)]
pub struct RecordingCanvas {
    size: Size,
    pub calls: Vec<&'static str>,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, _: Color) {
        self.calls.push("fill");
    }

    fn fill_rect(&mut self, _: Rect, _: Color) {
        self.calls.push("fill_rect");
    }

    fn stroke_rect(&mut self, _: Rect, _: f32, _: Color) {
        self.calls.push("stroke_rect");
    }

    fn stroke_polygon(&mut self, _: &[Point], _: f32, _: Color) {
        self.calls.push("stroke_polygon");
    }

    fn draw_text(&mut self, _: Point, _: &ShapedLine, _: Color) {
        self.calls.push("draw_text");
    }
}
