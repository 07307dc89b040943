use std::collections::BTreeMap;

/// Why a glyph could not be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingReason {
    /// The character has no glyph naming convention (punctuation, CJK, ...).
    Unsupported,
    /// The catalog has no asset for the glyph variant.
    Missing,
    /// The asset exists but its metadata could not be read or is degenerate.
    Unreadable,
}

/// Metadata of one glyph image as reported by a [`GlyphCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GlyphSource {
    /// Source image width in pixels.
    pub width: u32,
    /// Source image height in pixels.
    pub height: u32,
    /// Opaque reference the renderer uses to load the pixels.
    pub asset_ref: String,
}

/// Glyph image lookup keyed by variant name (see [`glyph_variant_name`]).
///
/// Only metadata is consumed; pixels stay with the renderer.
pub trait GlyphCatalog {
    /// Resolve a glyph variant to its metadata.
    fn resolve(&self, variant: &str) -> Result<GlyphSource, MissingReason>;
}

impl GlyphCatalog for BTreeMap<String, GlyphSource> {
    fn resolve(&self, variant: &str) -> Result<GlyphSource, MissingReason> {
        self.get(variant).cloned().ok_or(MissingReason::Missing)
    }
}

/// A character resolved to a placeable glyph.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GlyphAsset {
    /// Queried character.
    pub ch: char,
    /// Source width in pixels (> 0).
    pub source_w: u32,
    /// Source height in pixels (> 0).
    pub source_h: u32,
    /// Renderer asset reference.
    pub asset_ref: String,
}

/// A character that could not be resolved; layout proceeds without it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MissingGlyph {
    /// Queried character.
    pub ch: char,
    /// Failure reason.
    pub reason: MissingReason,
}

/// Outcome of resolving one character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlyphResolution {
    /// Placeable glyph.
    Found(GlyphAsset),
    /// Reported, not placed.
    Missing(MissingGlyph),
}

/// Asset variant name for `ch`: `A_upper`, `a_lower`, or the digit itself.
///
/// Upper and lower case share a letter but not an image, and case-insensitive file systems
/// cannot tell `A.png` from `a.png`, hence the suffixes.
pub fn glyph_variant_name(ch: char) -> Option<String> {
    if ch.is_ascii_uppercase() {
        Some(format!("{ch}_upper"))
    } else if ch.is_ascii_lowercase() {
        Some(format!("{ch}_lower"))
    } else if ch.is_ascii_digit() {
        Some(ch.to_string())
    } else {
        None
    }
}

/// Resolve one character. Whitespace separates letters and yields `None`.
pub fn resolve_glyph<C>(ch: char, catalog: &C) -> Option<GlyphResolution>
where
    C: GlyphCatalog + ?Sized,
{
    if ch.is_whitespace() {
        return None;
    }
    let missing = |reason| Some(GlyphResolution::Missing(MissingGlyph { ch, reason }));
    let Some(variant) = glyph_variant_name(ch) else {
        return missing(MissingReason::Unsupported);
    };
    match catalog.resolve(&variant) {
        Ok(src) if src.width == 0 || src.height == 0 => missing(MissingReason::Unreadable),
        Ok(src) => Some(GlyphResolution::Found(GlyphAsset {
            ch,
            source_w: src.width,
            source_h: src.height,
            asset_ref: src.asset_ref,
        })),
        Err(reason) => missing(reason),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/letters/catalog.rs"]
mod tests;
