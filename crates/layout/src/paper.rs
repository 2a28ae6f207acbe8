//! Paper presets.
//!
//! A paper size only fixes the card *width*; the height always comes from
//! the content. Widths are pixels at [`DPI`].

use crate::LayoutError;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// Print resolution every card is authored for.
pub const DPI: u32 = 300;

const BUILTIN_PRESETS: &[(&str, u32)] = &[
    ("A4", 2480),       // 210 mm
    ("A5", 1748),       // 148 mm
    ("A6", 1240),       // 105 mm
    ("LETTER", 2550),   // 8.5 in
    ("CARD_5X7", 1500), // 5 in
    ("SQUARE", 2000),
];

/// A resolved paper width with the label used in output file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaperProfile {
    name: String,
    width_px: u32,
}

impl PaperProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Synthesizes a profile for an explicit pixel width.
    pub fn custom(width: i64) -> Result<Self, LayoutError> {
        let width_px = positive_width(width)?;
        Ok(Self {
            name: format!("CUSTOM_{}", width_px),
            width_px,
        })
    }
}

fn positive_width(width: i64) -> Result<u32, LayoutError> {
    u32::try_from(width)
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(|| LayoutError::InvalidWidth(width.to_string()))
}

/// What a caller asks for: a preset name or a pixel width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaperSpec {
    Named(String),
    Width(i64),
}

impl Default for PaperSpec {
    fn default() -> Self {
        PaperSpec::Named("A5".to_string())
    }
}

impl FromStr for PaperSpec {
    type Err = std::convert::Infallible;

    /// Integers (including negative ones, which fail later at resolution) become
    /// [`PaperSpec::Width`]; everything else is treated as a preset name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(width) => PaperSpec::Width(width),
            Err(_) => PaperSpec::Named(s.to_string()),
        })
    }
}

impl fmt::Display for PaperSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperSpec::Named(name) => f.write_str(name),
            PaperSpec::Width(width) => write!(f, "{}px", width),
        }
    }
}

impl From<&str> for PaperSpec {
    fn from(s: &str) -> Self {
        PaperSpec::Named(s.to_string())
    }
}

impl From<i64> for PaperSpec {
    fn from(width: i64) -> Self {
        PaperSpec::Width(width)
    }
}

impl From<u32> for PaperSpec {
    fn from(width: u32) -> Self {
        PaperSpec::Width(i64::from(width))
    }
}

impl Serialize for PaperSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PaperSpec::Named(name) => serializer.serialize_str(name),
            PaperSpec::Width(width) => serializer.serialize_i64(*width),
        }
    }
}

impl<'de> Deserialize<'de> for PaperSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PaperSpecDef {
            Width(i64),
            Str(String),
        }

        let def = PaperSpecDef::deserialize(deserializer).map_err(|_: D::Error| {
            <D::Error as de::Error>::custom(
                "paper_size must be a preset name or an integer pixel width",
            )
        })?;
        match def {
            PaperSpecDef::Width(width) => Ok(PaperSpec::Width(width)),
            PaperSpecDef::Str(name) => Ok(PaperSpec::Named(name)),
        }
    }
}

/// An immutable name → width lookup.
///
/// Extension happens by building a new registry with [`PaperSizeRegistry::with_preset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperSizeRegistry {
    presets: Vec<PaperProfile>,
}

impl Default for PaperSizeRegistry {
    fn default() -> Self {
        Self {
            presets: BUILTIN_PRESETS
                .iter()
                .map(|(name, width_px)| PaperProfile {
                    name: (*name).to_string(),
                    width_px: *width_px,
                })
                .collect(),
        }
    }
}

impl PaperSizeRegistry {
    /// A registry holding the built-in presets.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with no presets; only custom widths resolve.
    pub fn empty() -> Self {
        Self {
            presets: Vec::new(),
        }
    }

    /// Returns a registry that also knows `name`. Names are stored upper-case;
    /// registering an existing name replaces its width.
    pub fn with_preset(mut self, name: &str, width: i64) -> Result<Self, LayoutError> {
        let width_px = positive_width(width)?;
        let name = name.trim().to_uppercase();
        match self.presets.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.width_px = width_px,
            None => self.presets.push(PaperProfile { name, width_px }),
        }
        Ok(self)
    }

    /// Preset names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&PaperProfile> {
        let wanted = name.trim();
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
    }

    pub fn resolve(&self, spec: &PaperSpec) -> Result<PaperProfile, LayoutError> {
        match spec {
            PaperSpec::Width(width) => PaperProfile::custom(*width),
            PaperSpec::Named(name) => {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| LayoutError::UnknownPaperSize {
                        name: name.clone(),
                        available: self.names(),
                    })
            }
        }
    }
}
