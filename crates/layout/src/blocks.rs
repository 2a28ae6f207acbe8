//! Vertical blocks of a card and the height each one occupies.
//!
//! Both the height estimate and the renderer's cursor walk [`Block::ORDER`]
//! and step by [`Block::advance`], so the canvas always ends exactly where
//! the last block does.

use crate::scale::{ScaleProfile, mul_ratio};
use cardfit_types::CardContent;

/// One band of the card, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    TopPadding,
    Title,
    Subtitle,
    Greeting,
    Introduction,
    DetailsBox,
    AgendaHeading,
    AgendaItems,
    Thanks,
    Closing,
    BottomPadding,
}

impl Block {
    /// Render order.
    pub const ORDER: [Block; 11] = [
        Block::TopPadding,
        Block::Title,
        Block::Subtitle,
        Block::Greeting,
        Block::Introduction,
        Block::DetailsBox,
        Block::AgendaHeading,
        Block::AgendaItems,
        Block::Thanks,
        Block::Closing,
        Block::BottomPadding,
    ];

    /// Pixels the cursor moves past this block.
    pub fn advance(self, profile: &ScaleProfile, content: &CardContent) -> u32 {
        let p = profile;
        match self {
            Block::TopPadding | Block::BottomPadding => p.padding,
            Block::Title => mul_ratio(p.font_sizes.title, 13, 10),
            Block::Subtitle | Block::Greeting => p.section_spacing,
            Block::Introduction => {
                lines_height(content.introduction_lines.len(), p.line_spacing)
                    .saturating_add(p.section_spacing)
            }
            Block::DetailsBox => details_box_height(p, content.event_detail_lines.len())
                .saturating_add(p.section_spacing),
            Block::AgendaHeading => mul_ratio(p.font_sizes.heading, 3, 2),
            Block::AgendaItems => lines_height(content.agenda_items.len(), p.line_spacing)
                .saturating_add(p.section_spacing),
            Block::Thanks => p.line_spacing.saturating_add(p.section_spacing),
            Block::Closing => p.line_spacing.saturating_mul(2),
        }
    }
}

/// Height of the event details box, excluding the spacing after it.
/// An empty box still reserves its top and bottom padding.
pub fn details_box_height(profile: &ScaleProfile, lines: usize) -> u32 {
    lines_height(lines, profile.box_line_height)
        .saturating_add(profile.box_padding.saturating_mul(2))
}

fn lines_height(count: usize, step: u32) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(step)
}

/// Canvas height needed to hold `content` at `profile`'s width.
pub fn estimate_height(profile: &ScaleProfile, content: &CardContent) -> u32 {
    Block::ORDER
        .iter()
        .fold(0u32, |height, block| height.saturating_add(block.advance(profile, content)))
}
