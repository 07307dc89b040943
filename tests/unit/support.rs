//! Deterministic collaborators shared by unit tests.

use std::collections::BTreeMap;

use crate::{
    letters::catalog::{GlyphCatalog, GlyphSource, MissingReason},
    metrics::text::{FontRef, TextMetrics, TextSize},
};

/// Monospace-ish metrics: ASCII advances 0.6em, everything else 1em; line height 1em.
pub(crate) struct FakeMetrics;

impl TextMetrics for FakeMetrics {
    fn measure(&self, text: &str, _font: &FontRef, size_px: u32) -> anyhow::Result<TextSize> {
        let em = f64::from(size_px);
        let width: f64 = text
            .chars()
            .map(|ch| if ch.is_ascii() { 0.6 * em } else { em })
            .sum();
        Ok(TextSize {
            width: width.round() as u32,
            height: size_px,
        })
    }
}

/// Metrics that fail every call.
pub(crate) struct BrokenMetrics;

impl TextMetrics for BrokenMetrics {
    fn measure(&self, _text: &str, _font: &FontRef, _size_px: u32) -> anyhow::Result<TextSize> {
        anyhow::bail!("rasterizer unavailable")
    }
}

/// Catalog with every ASCII letter and digit at the given source size.
pub(crate) fn alphabet_catalog(source_w: u32, source_h: u32) -> BTreeMap<String, GlyphSource> {
    let mut map = BTreeMap::new();
    for ch in ('A'..='Z').chain('a'..='z').chain('0'..='9') {
        let name = crate::letters::catalog::glyph_variant_name(ch).unwrap();
        map.insert(
            name.clone(),
            GlyphSource {
                width: source_w,
                height: source_h,
                asset_ref: format!("letters/{name}.png"),
            },
        );
    }
    map
}

/// Catalog that reports every lookup with a fixed reason.
pub(crate) struct EmptyCatalog(pub(crate) MissingReason);

impl GlyphCatalog for EmptyCatalog {
    fn resolve(&self, _variant: &str) -> Result<GlyphSource, MissingReason> {
        Err(self.0)
    }
}

pub(crate) fn font() -> FontRef {
    FontRef::new("test")
}
