//! Event configuration files.
//!
//! A configuration is a JSON document describing one event: its texts, its
//! colors and, optionally, who is invited, the paper size and where cards go.

use crate::error::PipelineError;
use crate::output::DEFAULT_OUTPUT_FOLDER;
use cardfit_layout::{LayoutError, PaperSpec};
use cardfit_types::{CardContent, Color, Palette, Participant};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventConfig {
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub paper_size: PaperSpec,
    #[serde(default = "default_output_folder")]
    pub output_folder: PathBuf,
    pub event: EventDetails,
    #[serde(default)]
    pub agenda: Vec<String>,
    #[serde(default)]
    pub texts: EventTexts,
    #[serde(default)]
    pub colors: EventColors,
}

fn default_output_folder() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FOLDER)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTexts {
    pub greeting_prefix: String,
    pub greeting_suffix: String,
    pub introduction: Vec<String>,
    pub agenda_title: String,
    pub thanks: String,
    pub closing: String,
    pub signature: String,
}

impl Default for EventTexts {
    fn default() -> Self {
        Self {
            greeting_prefix: "Dear".to_string(),
            greeting_suffix: ",".to_string(),
            introduction: Vec::new(),
            agenda_title: "AGENDA".to_string(),
            thanks: String::new(),
            closing: String::new(),
            signature: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventColors {
    pub background: Color,
    pub accent: Color,
    pub text: Color,
    #[serde(rename = "box_bg")]
    pub box_background: Color,
}

impl Default for EventColors {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            background: palette.background,
            accent: palette.accent,
            text: palette.text,
            box_background: palette.box_background,
        }
    }
}

impl From<EventColors> for Palette {
    fn from(colors: EventColors) -> Self {
        Palette {
            background: colors.background,
            accent: colors.accent,
            text: colors.text,
            box_background: colors.box_background,
        }
    }
}

impl EventConfig {
    pub fn from_json(source: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads and parses a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read configuration from '{}': {}", path.display(), e),
            ))
        })?;
        let config = Self::from_json(&source)?;
        log::debug!(
            "Loaded '{}' ({} participants, paper {})",
            config.event.title,
            config.participants.len(),
            config.paper_size
        );
        Ok(config)
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.participants.iter().map(|p| Participant::new(p.as_str())).collect()
    }

    /// Builds the card content, reporting the JSON path of the first invalid field.
    pub fn card_content(&self) -> Result<CardContent, PipelineError> {
        if self.event.title.trim().is_empty() {
            return Err(LayoutError::configuration("event.title", "is required").into());
        }

        let texts = &self.texts;
        let singles = [
            ("event.title", &self.event.title),
            ("event.subtitle", &self.event.subtitle),
            ("texts.greeting_prefix", &texts.greeting_prefix),
            ("texts.greeting_suffix", &texts.greeting_suffix),
            ("texts.agenda_title", &texts.agenda_title),
            ("texts.thanks", &texts.thanks),
            ("texts.closing", &texts.closing),
            ("texts.signature", &texts.signature),
        ];
        for (path, value) in singles {
            check_single_line(path, value)?;
        }
        let lists = [
            ("event.details", &self.event.details),
            ("agenda", &self.agenda),
            ("texts.introduction", &texts.introduction),
        ];
        for (path, values) in lists {
            for (i, value) in values.iter().enumerate() {
                check_single_line(&format!("{}[{}]", path, i), value)?;
            }
        }

        Ok(CardContent {
            title: self.event.title.clone(),
            subtitle: self.event.subtitle.clone(),
            greeting_prefix: texts.greeting_prefix.clone(),
            greeting_suffix: texts.greeting_suffix.clone(),
            introduction_lines: texts.introduction.clone(),
            event_detail_lines: self.event.details.clone(),
            agenda_title: texts.agenda_title.clone(),
            agenda_items: self.agenda.clone(),
            thanks_text: texts.thanks.clone(),
            closing_text: texts.closing.clone(),
            signature_text: texts.signature.clone(),
            colors: self.colors.into(),
        })
    }
}

fn check_single_line(path: &str, value: &str) -> Result<(), PipelineError> {
    if value.contains(['\n', '\r']) {
        return Err(LayoutError::configuration(path, "must not contain line breaks").into());
    }
    Ok(())
}

/// Reads one participant name per line. Blank lines and lines starting with
/// `#` are skipped.
pub fn read_participants<P: AsRef<Path>>(path: P) -> Result<Vec<Participant>, PipelineError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| {
        PipelineError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read participants from '{}': {}", path.display(), e),
        ))
    })?;
    Ok(source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Participant::from)
        .collect())
}
