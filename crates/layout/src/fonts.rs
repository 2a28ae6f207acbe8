//! Font resolution for card rendering.
//!
//! `FontLibrary` turns a (weight, size) request into a [`FontHandle`] by walking
//! an ordered candidate chain:
//!
//! 1. fonts registered through injected [`FontProvider`]s
//! 2. named and generic families from the fontdb database (feature: `system-fonts`)
//! 3. a built-in fixed-metric face
//!
//! Resolution never fails. Landing on the built-in face is logged once per
//! weight as a degraded resolution.

use cardfit_traits::{FontProvider, FontQuery, FontWeight, SharedFontData};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Advance of every character of the built-in face, in ems.
pub const FIXED_ADVANCE_EM: f32 = 0.6;
/// Ascent of the built-in face, in ems.
pub const FIXED_ASCENT_EM: f32 = 0.8;

/// One step of the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontCandidate {
    Family(&'static str),
    Serif,
    SansSerif,
}

const BOLD_CHAIN: &[FontCandidate] = &[
    FontCandidate::Family("DejaVu Serif"),
    FontCandidate::Family("DejaVu Sans"),
    FontCandidate::Serif,
    FontCandidate::SansSerif,
];

const REGULAR_CHAIN: &[FontCandidate] = &[
    FontCandidate::Family("DejaVu Sans"),
    FontCandidate::SansSerif,
];

/// The system-font part of the chain for `weight`, most preferred first.
pub fn fallback_chain(weight: FontWeight) -> &'static [FontCandidate] {
    match weight {
        FontWeight::Bold => BOLD_CHAIN,
        FontWeight::Regular => REGULAR_CHAIN,
    }
}

/// A parsed, validated outline face.
pub struct OutlineFont {
    family: String,
    data: SharedFontData,
    index: u32,
    units_per_em: u16,
    ascender: i16,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl OutlineFont {
    /// Parses the face header; returns `None` for data that is not a usable font.
    pub fn from_data(family: impl Into<String>, data: SharedFontData, index: u32) -> Option<Self> {
        let (units_per_em, ascender) = {
            let face = rustybuzz::Face::from_slice(&data, index)?;
            let face: &rustybuzz::ttf_parser::Face = &face;
            (face.units_per_em(), face.ascender())
        };
        if units_per_em == 0 {
            return None;
        }
        Some(Self {
            family: family.into(),
            data,
            index,
            units_per_em,
            ascender,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Creates a lightweight shaping view over the font data.
    pub fn as_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.index)
    }
}

/// Where a resolved font's glyphs come from.
#[derive(Debug, Clone)]
pub enum FontSource {
    Outline(Arc<OutlineFont>),
    FixedMetric,
}

/// A font at a concrete pixel size, ready for measuring and drawing.
#[derive(Debug, Clone)]
pub struct FontHandle {
    source: FontSource,
    weight: FontWeight,
    size: f32,
}

impl FontHandle {
    pub fn new(source: FontSource, weight: FontWeight, size: f32) -> Self {
        Self {
            source,
            weight,
            size,
        }
    }

    /// The built-in face at `size` pixels.
    pub fn fixed_metric(weight: FontWeight, size: f32) -> Self {
        Self::new(FontSource::FixedMetric, weight, size)
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, FontSource::FixedMetric)
    }

    pub fn family(&self) -> &str {
        match &self.source {
            FontSource::Outline(font) => font.family(),
            FontSource::FixedMetric => "built-in fixed-metric",
        }
    }

    /// Distance from the top of a line to its baseline, in pixels.
    pub fn ascent(&self) -> f32 {
        match &self.source {
            FontSource::Outline(font) => {
                f32::from(font.ascender) * self.size / f32::from(font.units_per_em)
            }
            FontSource::FixedMetric => FIXED_ASCENT_EM * self.size,
        }
    }
}

/// Thread-safe font resolution with a per-weight cache.
#[derive(Clone)]
pub struct FontLibrary {
    /// fontdb database for system fonts (only available with system-fonts feature)
    #[cfg(feature = "system-fonts")]
    db: Arc<RwLock<fontdb::Database>>,

    /// External font providers, consulted before the database.
    providers: Vec<Arc<dyn FontProvider>>,

    /// Resolved sources keyed by weight. Sizes never change which face wins.
    resolved: Arc<RwLock<HashMap<FontWeight, FontSource>>>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("FontLibrary");
        s.field("providers", &self.providers.len());
        #[cfg(feature = "system-fonts")]
        s.field("system_faces", &self.db.read().map(|db| db.len()).unwrap_or(0));
        s.finish()
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Creates a library with no fonts; every request resolves to the built-in face
    /// until providers or font directories are added.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "system-fonts")]
            db: Arc::new(RwLock::new(fontdb::Database::new())),
            providers: Vec::new(),
            resolved: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Creates a font library using only the provided FontProvider.
    pub fn from_provider(provider: Arc<dyn FontProvider>) -> Self {
        Self::new().with_provider(provider)
    }

    /// Adds an external font provider. Providers are consulted in the order added.
    pub fn with_provider(mut self, provider: Arc<dyn FontProvider>) -> Self {
        log::debug!("Adding font provider '{}'", provider.name());
        self.providers.push(provider);
        self.reset_cache();
        self
    }

    /// Scans the host for installed fonts.
    #[cfg(feature = "system-fonts")]
    pub fn with_system_fonts(mut self, enable: bool) -> Self {
        if enable {
            if let Ok(mut db) = self.db.write() {
                db.load_system_fonts();
                log::debug!("Loaded {} system font faces", db.len());
            }
            self.reset_cache();
        }
        self
    }

    /// Adds every font file found under `path`.
    #[cfg(feature = "system-fonts")]
    pub fn with_font_dir<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        if let Ok(mut db) = self.db.write() {
            db.load_fonts_dir(path.as_ref());
            log::debug!(
                "Font database holds {} faces after scanning {}",
                db.len(),
                path.as_ref().display()
            );
        }
        self.reset_cache();
        self
    }

    fn reset_cache(&mut self) {
        self.resolved = Arc::new(RwLock::new(HashMap::new()));
    }

    /// Resolves a font for `weight` at `size` pixels. Never fails.
    pub fn resolve(&self, weight: FontWeight, size: u32) -> FontHandle {
        FontHandle::new(self.resolve_source(weight), weight, size as f32)
    }

    /// Walks the fallback chain for `weight`, caching the winner.
    pub fn resolve_source(&self, weight: FontWeight) -> FontSource {
        if let Ok(cache) = self.resolved.read()
            && let Some(source) = cache.get(&weight)
        {
            return source.clone();
        }

        let source = self
            .resolve_from_providers(weight)
            .or_else(|| self.resolve_from_system(weight))
            .map(FontSource::Outline)
            .unwrap_or_else(|| {
                log::warn!(
                    "FontResolutionDegraded: no {:?} font found, using the fixed-metric face",
                    weight
                );
                FontSource::FixedMetric
            });

        if let Ok(mut cache) = self.resolved.write() {
            return cache.entry(weight).or_insert(source).clone();
        }
        source
    }

    fn resolve_from_providers(&self, weight: FontWeight) -> Option<Arc<OutlineFont>> {
        let named = fallback_chain(weight).iter().filter_map(|c| match c {
            FontCandidate::Family(name) => Some(name.to_string()),
            _ => None,
        });
        for provider in &self.providers {
            let families: Vec<String> =
                provider.families().into_iter().chain(named.clone()).collect();
            for family in families {
                let query = FontQuery::new(family.as_str()).with_weight(weight);
                match provider.load_font(&query) {
                    Ok(data) => match OutlineFont::from_data(family.as_str(), data, 0) {
                        Some(font) => {
                            log::debug!(
                                "Resolved {:?} to '{}' via {}",
                                weight,
                                family,
                                provider.name()
                            );
                            return Some(Arc::new(font));
                        }
                        None => log::debug!(
                            "Skipping unparsable font '{}' from {}",
                            family,
                            provider.name()
                        ),
                    },
                    Err(e) => log::debug!("{}: {}", provider.name(), e),
                }
            }
        }
        None
    }

    #[cfg(feature = "system-fonts")]
    fn resolve_from_system(&self, weight: FontWeight) -> Option<Arc<OutlineFont>> {
        let db = self.db.read().ok()?;
        for candidate in fallback_chain(weight) {
            let family = match candidate {
                FontCandidate::Family(name) => fontdb::Family::Name(name),
                FontCandidate::Serif => fontdb::Family::Serif,
                FontCandidate::SansSerif => fontdb::Family::SansSerif,
            };
            let query = fontdb::Query {
                families: &[family],
                weight: fontdb::Weight(weight.numeric_value()),
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };
            let Some(id) = db.query(&query) else {
                log::debug!("  → {:?} not installed", candidate);
                continue;
            };
            let name = db
                .face(id)
                .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
                .unwrap_or_else(|| format!("{:?}", candidate));
            let font = db.with_face_data(id, |data, index| {
                OutlineFont::from_data(name.as_str(), Arc::new(data.to_vec()), index)
            });
            if let Some(Some(font)) = font {
                log::debug!("Resolved {:?} to system font '{}'", weight, name);
                return Some(Arc::new(font));
            }
            log::debug!("  → system font '{}' could not be parsed", name);
        }
        None
    }

    #[cfg(not(feature = "system-fonts"))]
    fn resolve_from_system(&self, _weight: FontWeight) -> Option<Arc<OutlineFont>> {
        None
    }
}
