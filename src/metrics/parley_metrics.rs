use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{ReelError, ReelResult},
    metrics::text::{FontRef, TextMetrics, TextSize},
};

/// Brush type for measurement-only layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MeasureBrush;

struct ParleyContexts {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
}

/// [`TextMetrics`] backed by Parley shaping over caller-supplied font bytes.
///
/// Fonts are registered up front under a [`FontRef`] key; reading the bytes from disk is the
/// caller's job.
pub struct ParleyTextMetrics {
    contexts: Mutex<ParleyContexts>,
    families: BTreeMap<FontRef, String>,
}

impl std::fmt::Debug for ParleyTextMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyTextMetrics")
            .field("families", &self.families)
            .finish_non_exhaustive()
    }
}

impl Default for ParleyTextMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyTextMetrics {
    /// Provider with no fonts registered.
    pub fn new() -> Self {
        Self {
            contexts: Mutex::new(ParleyContexts {
                font_ctx: parley::FontContext::default(),
                layout_ctx: parley::LayoutContext::new(),
            }),
            families: BTreeMap::new(),
        }
    }

    /// Register font bytes under `font`, returning the detected family name.
    pub fn register_font(&mut self, font: FontRef, font_bytes: Vec<u8>) -> ReelResult<String> {
        let ctx = self
            .contexts
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        let families = ctx
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ReelError::invalid_config(format!(
                "no font families registered from bytes for '{}'",
                font.as_str()
            ))
        })?;
        let family_name = ctx
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::invalid_config("registered font family has no name"))?
            .to_string();
        tracing::debug!(font = font.as_str(), family = %family_name, "registered font");
        self.families.insert(font, family_name.clone());
        Ok(family_name)
    }

    /// Whether `font` has been registered.
    pub fn has_font(&self, font: &FontRef) -> bool {
        self.families.contains_key(font)
    }
}

impl TextMetrics for ParleyTextMetrics {
    fn measure(&self, text: &str, font: &FontRef, size_px: u32) -> anyhow::Result<TextSize> {
        let family_name = self
            .families
            .get(font)
            .with_context(|| format!("font '{}' is not registered", font.as_str()))?;
        if size_px == 0 {
            anyhow::bail!("font size must be > 0");
        }

        let mut guard = self.contexts.lock().unwrap_or_else(PoisonError::into_inner);
        let ParleyContexts {
            font_ctx,
            layout_ctx,
        } = &mut *guard;
        let mut builder = layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px as f32));
        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);

        Ok(TextSize {
            width: layout.width().ceil().max(0.0) as u32,
            height: layout.height().ceil().max(0.0) as u32,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metrics/parley_metrics.rs"]
mod tests;
