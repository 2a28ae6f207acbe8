//! The content payload of a card, shared read-only by every participant's render.

use crate::Color;
use serde::{Deserialize, Serialize};

/// The four colors a card is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub accent: Color,
    pub text: Color,
    pub box_background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            accent: Color::BLACK,
            text: Color::BLACK,
            box_background: Color::WHITE,
        }
    }
}

/// Everything printed on a card except the participant's name.
///
/// Each string is a single pre-fitted line; the layout engine never wraps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardContent {
    pub title: String,
    pub subtitle: String,
    pub greeting_prefix: String,
    pub greeting_suffix: String,
    pub introduction_lines: Vec<String>,
    pub event_detail_lines: Vec<String>,
    pub agenda_title: String,
    pub agenda_items: Vec<String>,
    pub thanks_text: String,
    pub closing_text: String,
    pub signature_text: String,
    pub colors: Palette,
}

impl CardContent {
    /// Iterates over every single-line field together with its name, in render order.
    pub fn lines(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let singles = [
            ("title", self.title.as_str()),
            ("subtitle", self.subtitle.as_str()),
            ("greeting_prefix", self.greeting_prefix.as_str()),
            ("greeting_suffix", self.greeting_suffix.as_str()),
        ];
        let trailing = [
            ("agenda_title", self.agenda_title.as_str()),
            ("thanks_text", self.thanks_text.as_str()),
            ("closing_text", self.closing_text.as_str()),
            ("signature_text", self.signature_text.as_str()),
        ];
        singles
            .into_iter()
            .chain(
                self.introduction_lines
                    .iter()
                    .map(|l| ("introduction_lines", l.as_str())),
            )
            .chain(
                self.event_detail_lines
                    .iter()
                    .map(|l| ("event_detail_lines", l.as_str())),
            )
            .chain(
                self.agenda_items
                    .iter()
                    .map(|l| ("agenda_items", l.as_str())),
            )
            .chain(trailing)
    }
}

/// The person a card is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub display_name: String,
}

impl Participant {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
