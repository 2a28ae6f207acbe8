//! The cursor-driven card layout.
//!
//! `LayoutEngine::layout` validates the content, then walks [`Block::ORDER`]
//! emitting draw commands for each block at the cursor and stepping the cursor
//! by [`Block::advance`]. Nothing is drawn until the whole card has been laid
//! out, so a rejected card never leaves a half-painted canvas behind.

use crate::LayoutError;
use crate::blocks::{Block, details_box_height};
use crate::config::{LayoutConfig, OverflowPolicy};
use crate::elements::{Align, DrawCommand};
use crate::fonts::{FontHandle, FontLibrary};
use crate::ornament::{hexagon, ornament_centers};
use crate::painting::{Canvas, paint};
use crate::plan::LayoutPlan;
use crate::scale::ScaleProfile;
use crate::text::{ShapedLine, shape_line};
use cardfit_traits::FontWeight;
use cardfit_types::{CardContent, Color, Participant, Point, Rect, Size};

/// Where a block started and how far it moved the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub block: Block,
    pub top: u32,
    pub height: u32,
}

/// A fully positioned card, ready to paint.
#[derive(Debug, Clone)]
pub struct CardLayout {
    pub size: Size,
    pub commands: Vec<DrawCommand>,
    pub spans: Vec<BlockSpan>,
    /// Cursor position after the last block; always equals `size.height`.
    pub cursor_end: u32,
}

impl CardLayout {
    /// Text commands in paint order.
    pub fn text_commands(&self) -> impl Iterator<Item = (&Point, &ShapedLine, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text {
                origin,
                line,
                color,
            } => Some((origin, line, color)),
            _ => None,
        })
    }
}

struct CardFonts {
    title: FontHandle,
    subtitle: FontHandle,
    heading: FontHandle,
    body: FontHandle,
}

impl CardFonts {
    fn resolve(library: &FontLibrary, profile: &ScaleProfile) -> Self {
        let sizes = profile.font_sizes;
        let fonts = Self {
            title: library.resolve(FontWeight::Bold, sizes.title),
            subtitle: library.resolve(FontWeight::Bold, sizes.subtitle),
            heading: library.resolve(FontWeight::Bold, sizes.heading),
            body: library.resolve(FontWeight::Regular, sizes.body),
        };
        for font in [&fonts.title, &fonts.body] {
            log::debug!(
                "{:?} text uses '{}' at {}px",
                font.weight(),
                font.family(),
                font.size()
            );
        }
        fonts
    }
}

/// Lays out and paints cards. Cheap to clone; the font library is shared.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    fonts: FontLibrary,
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(fonts: FontLibrary) -> Self {
        Self {
            fonts,
            config: LayoutConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays the card out and paints it onto `canvas`, which must already have
    /// the plan's dimensions.
    pub fn render(
        &self,
        plan: &LayoutPlan,
        content: &CardContent,
        participant: &Participant,
        canvas: &mut dyn Canvas,
    ) -> Result<CardLayout, LayoutError> {
        if canvas.size() != plan.size() {
            return Err(LayoutError::CanvasMismatch {
                expected: plan.size(),
                actual: canvas.size(),
            });
        }
        let layout = self.layout(plan, content, participant)?;
        paint(&layout, canvas);
        Ok(layout)
    }

    /// Checks everything about `content` that does not depend on who the
    /// card is for, so a batch can fail before any participant is rendered.
    pub fn preflight(&self, plan: &LayoutPlan, content: &CardContent) -> Result<(), LayoutError> {
        self.layout(plan, content, &Participant::new("-")).map(|_| ())
    }

    /// Positions every element of the card without drawing anything.
    pub fn layout(
        &self,
        plan: &LayoutPlan,
        content: &CardContent,
        participant: &Participant,
    ) -> Result<CardLayout, LayoutError> {
        validate_content(content, participant)?;

        let profile = plan.profile();
        let fonts = CardFonts::resolve(&self.fonts, profile);
        let mut builder = LayoutBuilder {
            plan,
            overflow: self.config.overflow,
            commands: Vec::new(),
        };

        builder.frame(content);

        let mut cursor = 0u32;
        let mut spans = Vec::with_capacity(Block::ORDER.len());
        for block in Block::ORDER {
            builder.place(block, cursor, content, participant, &fonts)?;
            let height = block.advance(profile, content);
            log::debug!("{:?} at y={} (+{})", block, cursor, height);
            spans.push(BlockSpan {
                block,
                top: cursor,
                height,
            });
            cursor = cursor.saturating_add(height);
        }
        debug_assert_eq!(cursor, plan.height(), "cursor diverged from the height estimate");

        Ok(CardLayout {
            size: plan.size(),
            commands: builder.commands,
            spans,
            cursor_end: cursor,
        })
    }
}

fn validate_content(content: &CardContent, participant: &Participant) -> Result<(), LayoutError> {
    if content.title.trim().is_empty() {
        return Err(LayoutError::configuration("title", "must not be empty"));
    }
    if participant.display_name.trim().is_empty() {
        return Err(LayoutError::configuration(
            "participant",
            "display name must not be empty",
        ));
    }
    let participant_line = std::iter::once(("participant", participant.display_name.as_str()));
    for (field, line) in content.lines().chain(participant_line) {
        if line.contains(['\n', '\r']) {
            return Err(LayoutError::configuration(
                field,
                format!("must be a single line, got {:?}", line),
            ));
        }
    }
    Ok(())
}

struct LayoutBuilder<'a> {
    plan: &'a LayoutPlan,
    overflow: OverflowPolicy,
    commands: Vec<DrawCommand>,
}

impl LayoutBuilder<'_> {
    /// Background, border and ornaments.
    fn frame(&mut self, content: &CardContent) {
        let profile = self.plan.profile();
        let colors = content.colors;
        let (w, h) = (self.plan.width() as f32, self.plan.height() as f32);
        let inset = profile.border_width as f32;

        self.commands.push(DrawCommand::Fill {
            color: colors.background,
        });
        self.commands.push(DrawCommand::StrokeRect {
            rect: Rect::from_edges(inset, inset, w - inset, h - inset),
            width: profile.border_thickness as f32,
            color: colors.accent,
        });
        for center in ornament_centers(self.plan) {
            self.commands.push(DrawCommand::StrokePolygon {
                points: hexagon(center, profile.ornament_size as f32),
                width: profile.ornament_stroke_width as f32,
                color: colors.accent,
            });
        }
    }

    fn place(
        &mut self,
        block: Block,
        top: u32,
        content: &CardContent,
        participant: &Participant,
        fonts: &CardFonts,
    ) -> Result<(), LayoutError> {
        let profile = *self.plan.profile();
        let colors = content.colors;
        let left = Align::Left(profile.padding);

        match block {
            Block::TopPadding | Block::BottomPadding => {}
            Block::Title => {
                let font = &fonts.title;
                self.text("title", &content.title, font, Align::Center, top, colors.accent)?;
            }
            Block::Subtitle => {
                let font = &fonts.subtitle;
                self.text("subtitle", &content.subtitle, font, Align::Center, top, colors.accent)?;
            }
            Block::Greeting => {
                let greeting = format!(
                    "{} {}{}",
                    content.greeting_prefix, participant.display_name, content.greeting_suffix
                );
                self.text("greeting", &greeting, &fonts.heading, left, top, colors.text)?;
            }
            Block::Introduction => {
                for (i, line) in content.introduction_lines.iter().enumerate() {
                    let y = top + i as u32 * profile.line_spacing;
                    self.text("introduction_lines", line, &fonts.body, left, y, colors.text)?;
                }
            }
            Block::DetailsBox => {
                let box_height = details_box_height(&profile, content.event_detail_lines.len());
                let rect = Rect::new(
                    profile.padding as f32,
                    top as f32,
                    profile.width.saturating_sub(2 * profile.padding) as f32,
                    box_height as f32,
                );
                self.commands.push(DrawCommand::FillRect {
                    rect,
                    color: colors.box_background,
                });
                self.commands.push(DrawCommand::StrokeRect {
                    rect,
                    width: profile.box_stroke_width as f32,
                    color: colors.accent,
                });
                let inner = Align::Left(profile.padding + profile.box_padding);
                for (i, line) in content.event_detail_lines.iter().enumerate() {
                    let y = top + profile.box_padding + i as u32 * profile.box_line_height;
                    self.text("event_detail_lines", line, &fonts.body, inner, y, colors.text)?;
                }
            }
            Block::AgendaHeading => {
                let heading = &content.agenda_title;
                let font = &fonts.heading;
                self.text("agenda_title", heading, font, Align::Center, top, colors.accent)?;
            }
            Block::AgendaItems => {
                let indent = Align::Left(profile.agenda_indent());
                for (i, item) in content.agenda_items.iter().enumerate() {
                    let y = top + i as u32 * profile.line_spacing;
                    let numbered = format!("{}. {}", i + 1, item);
                    self.text("agenda_items", &numbered, &fonts.body, indent, y, colors.text)?;
                }
            }
            Block::Thanks => {
                let thanks = &content.thanks_text;
                self.text("thanks_text", thanks, &fonts.body, Align::Center, top, colors.text)?;
            }
            Block::Closing => {
                let closing = &content.closing_text;
                self.text("closing_text", closing, &fonts.body, left, top, colors.text)?;
                let y = top + profile.line_spacing;
                let signature = &content.signature_text;
                self.text("signature_text", signature, &fonts.heading, left, y, colors.accent)?;
            }
        }
        Ok(())
    }

    fn text(
        &mut self,
        field: &str,
        text: &str,
        font: &FontHandle,
        align: Align,
        y: u32,
        color: Color,
    ) -> Result<(), LayoutError> {
        let line = shape_line(font, text);
        let limit = self.plan.profile().max_line_width() as f32;
        if line.width > limit {
            match self.overflow {
                OverflowPolicy::Reject => {
                    return Err(LayoutError::configuration(
                        field,
                        format!(
                            "line {:?} is {:.0}px wide but only {:.0}px fit between the margins",
                            text, line.width, limit
                        ),
                    ));
                }
                OverflowPolicy::Allow => log::warn!(
                    "Line in '{}' overflows the margins by {:.0}px: {:?}",
                    field,
                    line.width - limit,
                    text
                ),
            }
        }

        let x = match align {
            Align::Left(x) => x as f32,
            Align::Center => ((self.plan.width() as f32 - line.width) / 2.0).floor(),
        };
        self.commands.push(DrawCommand::Text {
            origin: Point::new(x, y as f32),
            line,
            color,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::estimate_height;
    use crate::test_utils::{RecordingCanvas, sample_content};

    fn engine() -> LayoutEngine {
        LayoutEngine::new(FontLibrary::new())
    }

    fn plan_for(width: i64, content: &CardContent) -> LayoutPlan {
        LayoutPlan::new(ScaleProfile::derive(width).unwrap(), content).unwrap()
    }

    #[test]
    fn cursor_ends_exactly_at_estimated_height() {
        let participant = Participant::new("Ada Lovelace");
        for width in [1000, 1748, 2480] {
            for agenda in [0, 1, 5, 20] {
                for details in [0, 1, 3] {
                    let content = sample_content(agenda, details);
                    let profile = ScaleProfile::derive(width).unwrap();
                    let plan = LayoutPlan::new(profile, &content).unwrap();
                    let layout = engine().layout(&plan, &content, &participant).unwrap();

                    assert_eq!(layout.cursor_end, estimate_height(&profile, &content));
                    let (signature, _, _) = layout.text_commands().last().unwrap();
                    let below = profile.line_spacing + profile.padding;
                    assert_eq!(signature.y as u32 + below, plan.height());
                    let spans: u32 = layout.spans.iter().map(|s| s.height).sum();
                    assert_eq!(spans, plan.height());
                }
            }
        }
    }

    #[test]
    fn centered_text_is_symmetric() {
        let content = sample_content(5, 3);
        let plan = plan_for(1748, &content);
        let layout = engine().layout(&plan, &content, &Participant::new("Ada")).unwrap();
        let width = plan.width() as f32;

        let centered = [
            &content.title,
            &content.subtitle,
            &content.agenda_title,
            &content.thanks_text,
        ];
        for text in centered {
            let (origin, line, _) = layout
                .text_commands()
                .find(|(_, line, _)| &line.text == text)
                .unwrap();
            let right_gap = width - (origin.x + line.width);
            assert!((right_gap - origin.x).abs() <= 1.0, "{text}: {} vs {}", origin.x, right_gap);
        }
    }

    #[test]
    fn left_aligned_blocks_use_fixed_offsets() {
        let content = sample_content(2, 1);
        let plan = plan_for(1748, &content);
        let layout = engine().layout(&plan, &content, &Participant::new("Ada")).unwrap();

        let find = |text: &str| {
            layout
                .text_commands()
                .find(|(_, line, _)| line.text == text)
                .map(|(origin, _, _)| *origin)
                .unwrap()
        };
        assert_eq!(find("Dear Ada,").x, 80.0);
        assert_eq!(find("1. Agenda item 1").x, 104.0);
        assert_eq!(find("2. Agenda item 2").y - find("1. Agenda item 1").y, 35.0);
        assert_eq!(find("Detail line 1").x, 110.0);

        let details = layout.spans.iter().find(|s| s.block == Block::DetailsBox).unwrap();
        assert_eq!(find("Detail line 1").y, (details.top + 30) as f32);
    }

    #[test]
    fn signature_sits_one_line_below_closing() {
        let content = sample_content(1, 1);
        let plan = plan_for(1748, &content);
        let layout = engine().layout(&plan, &content, &Participant::new("Ada")).unwrap();
        let texts: Vec<_> = layout.text_commands().collect();
        let (closing, _, _) = texts[texts.len() - 2];
        let (signature, line, color) = texts[texts.len() - 1];
        assert_eq!(line.text, content.signature_text);
        assert_eq!(*color, content.colors.accent);
        assert_eq!(signature.y - closing.y, 35.0);
        assert_eq!(signature.y as u32 + 35 + 80, plan.height());
    }

    #[test]
    fn frame_has_border_and_nine_ornaments() {
        let content = sample_content(0, 0);
        let plan = plan_for(1748, &content);
        let layout = engine().layout(&plan, &content, &Participant::new("Ada")).unwrap();

        assert!(matches!(layout.commands[0], DrawCommand::Fill { .. }));
        match &layout.commands[1] {
            DrawCommand::StrokeRect { rect, width, .. } => {
                let bottom = plan.height() as f32 - 20.0;
                assert_eq!(*rect, Rect::from_edges(20.0, 20.0, 1728.0, bottom));
                assert_eq!(*width, 8.0);
            }
            other => panic!("expected border, got {other:?}"),
        }
        let hexagons = layout
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolygon { points, .. } if points.len() == 6))
            .count();
        assert_eq!(hexagons, 9);
    }

    #[test]
    fn overflowing_line_is_rejected_before_drawing() {
        let mut content = sample_content(1, 1);
        content.agenda_items[0] = "x".repeat(400);
        let plan = plan_for(1000, &content);
        let mut canvas = RecordingCanvas::new(plan.size());

        let err = engine()
            .render(&plan, &content, &Participant::new("Ada"), &mut canvas)
            .unwrap_err();
        assert!(matches!(
            &err,
            LayoutError::Configuration { field, .. } if field == "agenda_items"
        ));
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn overflow_can_be_allowed() {
        let mut content = sample_content(1, 1);
        content.thanks_text = "y".repeat(400);
        let plan = plan_for(1000, &content);
        let engine = engine().with_config(LayoutConfig {
            overflow: OverflowPolicy::Allow,
        });
        let layout = engine.layout(&plan, &content, &Participant::new("Ada")).unwrap();
        assert_eq!(layout.cursor_end, plan.height());
    }

    #[test]
    fn malformed_content_fails_fast() {
        let content = sample_content(1, 1);
        let plan = plan_for(1748, &content);

        let mut untitled = content.clone();
        untitled.title = "  ".into();
        assert!(matches!(
            engine().layout(&plan, &untitled, &Participant::new("Ada")),
            Err(LayoutError::Configuration { field, .. }) if field == "title"
        ));

        let mut multiline = content.clone();
        multiline.event_detail_lines[0] = "one\ntwo".into();
        assert!(matches!(
            engine().layout(&plan, &multiline, &Participant::new("Ada")),
            Err(LayoutError::Configuration { field, .. }) if field == "event_detail_lines"
        ));

        assert!(engine().layout(&plan, &content, &Participant::new("")).is_err());
    }

    #[test]
    fn preflight_catches_content_errors_only() {
        let mut content = sample_content(1, 1);
        let plan = plan_for(1748, &content);
        assert!(engine().preflight(&plan, &content).is_ok());

        content.closing_text = "z".repeat(200);
        assert!(matches!(
            engine().preflight(&plan, &content),
            Err(LayoutError::Configuration { field, .. }) if field == "closing_text"
        ));
    }

    #[test]
    fn render_paints_every_command_on_a_matching_canvas() {
        let content = sample_content(3, 2);
        let plan = plan_for(1240, &content);
        let mut canvas = RecordingCanvas::new(plan.size());
        let layout = engine()
            .render(&plan, &content, &Participant::new("Grace Hopper"), &mut canvas)
            .unwrap();
        assert_eq!(canvas.calls.len(), layout.commands.len());
        assert_eq!(canvas.calls[0], "fill");

        let mut wrong = RecordingCanvas::new(Size::new(plan.width(), plan.height() + 1));
        assert!(matches!(
            engine().render(&plan, &content, &Participant::new("Grace"), &mut wrong),
            Err(LayoutError::CanvasMismatch { .. })
        ));
    }
}
