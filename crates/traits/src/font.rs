//! FontProvider trait for abstracting font loading.
//!
//! The layout engine asks providers for raw font bytes by family and weight.
//! Providers never decide fallback order; that is the font library's job.

use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// The two weights a card uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    /// Returns the numeric weight value (100-900 scale).
    pub fn numeric_value(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum FontError {
    #[error("Font not found: family '{family}' ({weight:?})")]
    NotFound { family: String, weight: FontWeight },

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidData(String),
}

/// Shared font data type (reference-counted bytes).
pub type SharedFontData = Arc<Vec<u8>>;

/// A request for one face of a family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontQuery {
    pub family: String,
    pub weight: FontWeight,
}

impl FontQuery {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weight: FontWeight::Regular,
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

/// A source of font binaries.
pub trait FontProvider: Send + Sync + Debug {
    /// Load the font bytes that match the query exactly.
    fn load_font(&self, query: &FontQuery) -> Result<SharedFontData, FontError>;

    /// Families this provider can serve, in registration order.
    fn families(&self) -> Vec<String>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory font provider.
///
/// Fonts must be registered before use. This works in any environment,
/// including tests that must not depend on installed system fonts.
#[derive(Debug, Default)]
pub struct InMemoryFontProvider {
    fonts: RwLock<Vec<(FontQuery, SharedFontData)>>,
}

impl InMemoryFontProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a face. A later registration of the same family and weight
    /// replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns `FontError::LoadFailed` if the internal lock is poisoned.
    pub fn add_font(
        &self,
        family: impl Into<String>,
        weight: FontWeight,
        data: Vec<u8>,
    ) -> Result<(), FontError> {
        let query = FontQuery::new(family).with_weight(weight);
        let mut fonts = self.fonts.write().map_err(|_| FontError::LoadFailed {
            path: query.family.clone(),
            message: "font store lock poisoned".to_string(),
        })?;
        let data = Arc::new(data);
        match fonts
            .iter_mut()
            .find(|(q, _)| q.family.eq_ignore_ascii_case(&query.family) && q.weight == weight)
        {
            Some(slot) => slot.1 = data,
            None => fonts.push((query, data)),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fonts.read().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FontProvider for InMemoryFontProvider {
    fn load_font(&self, query: &FontQuery) -> Result<SharedFontData, FontError> {
        let fonts = self.fonts.read().map_err(|_| FontError::LoadFailed {
            path: query.family.clone(),
            message: "font store lock poisoned".to_string(),
        })?;
        fonts
            .iter()
            .find(|(q, _)| q.family.eq_ignore_ascii_case(&query.family) && q.weight == query.weight)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| FontError::NotFound {
                family: query.family.clone(),
                weight: query.weight,
            })
    }

    fn families(&self) -> Vec<String> {
        let Ok(fonts) = self.fonts.read() else {
            return Vec::new();
        };
        let mut families: Vec<String> = Vec::new();
        for (q, _) in fonts.iter() {
            if !families.iter().any(|f| f.eq_ignore_ascii_case(&q.family)) {
                families.push(q.family.clone());
            }
        }
        families
    }

    fn name(&self) -> &'static str {
        "InMemoryFontProvider"
    }
}
