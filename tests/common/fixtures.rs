use cardfit::{CardContent, Color, Palette, Participant};

/// The honey tasting event every demo starts from.
pub fn honey_content() -> CardContent {
    CardContent {
        title: "Honey Sensory Test".into(),
        subtitle: "& Lunch Gathering".into(),
        greeting_prefix: "Dear".into(),
        greeting_suffix: ",".into(),
        introduction_lines: vec![
            "We are delighted to invite you to join us for an exciting".into(),
            "honey sensory evaluation session followed by lunch.".into(),
        ],
        event_detail_lines: vec![
            "Date: Friday, November 1, 2025".into(),
            "Time: 11:00 AM - 2:00 PM".into(),
            "Location: Sensory Lab".into(),
        ],
        agenda_title: "AGENDA".into(),
        agenda_items: vec![
            "Short Briefing".into(),
            "Sensory Evaluation".into(),
            "Lunch Together".into(),
            "Dhuhr Prayer in Congregation".into(),
            "Casual Conversation".into(),
        ],
        thanks_text: "We look forward to your presence and valuable insights!".into(),
        closing_text: "Warm regards,".into(),
        signature_text: "The Organizing Team".into(),
        colors: Palette {
            background: Color::rgb(0xFF, 0xF8, 0xE7),
            accent: Color::rgb(0xD4, 0xA5, 0x74),
            text: Color::rgb(0x2C, 0x18, 0x10),
            box_background: Color::WHITE,
        },
    }
}

/// Honey content with `agenda` agenda items and `details` detail lines.
pub fn content_with(agenda: usize, details: usize) -> CardContent {
    CardContent {
        agenda_items: (1..=agenda).map(|i| format!("Agenda point {i}")).collect(),
        event_detail_lines: (1..=details).map(|i| format!("Detail {i}")).collect(),
        ..honey_content()
    }
}

pub fn participants(names: &[&str]) -> Vec<Participant> {
    names.iter().copied().map(Participant::from).collect()
}
