use crate::{
    foundation::error::{ReelError, ReelResult},
    foundation::math::{px_u32, round_px},
    letters::catalog::{GlyphAsset, GlyphCatalog, GlyphResolution, MissingGlyph, resolve_glyph},
};

/// Knobs for packing a horizontal run of glyph images.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LetterPackParams {
    /// Height glyphs are scaled down to (never up).
    pub target_height: u32,
    /// Width budget for the pre-extra-scale run.
    pub available_width: u32,
    /// Gap between glyphs before scaling.
    pub gap_base: f64,
    /// Deliberate oversizing applied after width fitting, at least 1.
    pub extra_scale: f64,
    /// Screen x of the run anchor; entries are offset from it.
    pub anchor_x: i64,
}

impl Default for LetterPackParams {
    fn default() -> Self {
        Self {
            target_height: 260,
            available_width: 800,
            gap_base: 24.0,
            extra_scale: 1.0,
            anchor_x: 0,
        }
    }
}

impl LetterPackParams {
    /// Reject knobs that cannot produce a layout.
    pub fn validate(&self) -> ReelResult<()> {
        if self.target_height == 0 {
            return Err(ReelError::invalid_config("letter target_height must be > 0"));
        }
        if !self.extra_scale.is_finite() || self.extra_scale < 1.0 {
            return Err(ReelError::invalid_config(
                "letter extra_scale must be finite and >= 1",
            ));
        }
        if !self.gap_base.is_finite() || self.gap_base < 0.0 {
            return Err(ReelError::invalid_config(
                "letter gap_base must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// One placed glyph, relative to the shared baseline anchor.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LetterLayoutEntry {
    /// Character drawn.
    pub ch: char,
    /// Renderer asset reference.
    pub asset_ref: String,
    /// Pixel width (>= 1).
    pub width: u32,
    /// Pixel height (>= 1).
    pub height: u32,
    /// Final scale applied to the source image.
    pub scale: f64,
    /// Left edge relative to the anchor.
    pub x_offset: i64,
}

/// Horizontal extent of a packed run, relative to the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PackBounds {
    /// Leftmost entry edge.
    pub x_offset: i64,
    /// Rightmost entry edge (`max(x + width)`).
    pub w: i64,
    /// Tallest entry.
    pub h: u32,
}

impl PackBounds {
    /// Visible width of the run (`w - x_offset`).
    pub fn span(&self) -> i64 {
        (self.w - self.x_offset).max(0)
    }
}

/// Result of [`plan_letters`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct LetterPlan {
    /// Placed glyphs in sequence order.
    pub entries: Vec<LetterLayoutEntry>,
    /// Characters that were skipped.
    pub missing: Vec<MissingGlyph>,
    /// Gap between glyphs in pixels.
    pub gap: u32,
    /// Extent of the run.
    pub bbox: PackBounds,
    /// Uniform fit factor, always in `(0, 1]`.
    pub adjust: f64,
    /// Width of the run at `adjust` without extra-scale (<= `available_width`).
    pub fitted_width: f64,
}

/// Fit a run of glyph images into the available width.
///
/// Only `adjust` scales the run down to fit; `extra_scale` is applied afterwards regardless of
/// overflow. Each glyph is pulled back by half its fitted width from the cursor, so the anchor
/// marks the center of the first glyph.
pub fn plan_letters<C>(
    sequence: &str,
    catalog: &C,
    params: &LetterPackParams,
) -> ReelResult<LetterPlan>
where
    C: GlyphCatalog + ?Sized,
{
    params.validate()?;

    let mut glyphs = Vec::<GlyphAsset>::new();
    let mut missing = Vec::<MissingGlyph>::new();
    for ch in sequence.chars() {
        match resolve_glyph(ch, catalog) {
            Some(GlyphResolution::Found(glyph)) => glyphs.push(glyph),
            Some(GlyphResolution::Missing(m)) => {
                tracing::warn!(ch = %m.ch, reason = ?m.reason, "letter glyph skipped");
                missing.push(m);
            }
            None => {}
        }
    }

    if glyphs.is_empty() {
        return Ok(LetterPlan {
            missing,
            adjust: 1.0,
            ..LetterPlan::default()
        });
    }

    let count = glyphs.len();
    let extra = params.extra_scale;
    let target = f64::from(params.target_height);
    let base_scales: Vec<f64> = glyphs
        .iter()
        .map(|g| (target / f64::from(g.source_h)).min(1.0))
        .collect();
    let gaps = params.gap_base * ((count - 1) as f64);

    let base_total = glyphs
        .iter()
        .zip(&base_scales)
        .map(|(g, s)| f64::from(g.source_w) * s * extra)
        .sum::<f64>()
        + gaps * extra;
    let adjust = if base_total <= 0.0 {
        1.0
    } else {
        (f64::from(params.available_width) / base_total).min(1.0)
    };
    let fitted_width = adjust
        * (glyphs
            .iter()
            .zip(&base_scales)
            .map(|(g, s)| f64::from(g.source_w) * s)
            .sum::<f64>()
            + gaps);

    let gap_px = round_px(params.gap_base * extra * adjust).max(0);
    let mut entries = Vec::with_capacity(count);
    let mut cursor = 0i64;
    let mut min_x = i64::MAX;
    for (idx, (glyph, &base)) in glyphs.into_iter().zip(&base_scales).enumerate() {
        let scale = base * adjust * extra;
        let width = round_px(f64::from(glyph.source_w) * scale).max(1);
        let height = round_px(f64::from(glyph.source_h) * scale).max(1);
        let extend_left = round_px(f64::from(glyph.source_w) * base * adjust * 0.5);
        let x = cursor - extend_left;
        min_x = min_x.min(x);

        entries.push(LetterLayoutEntry {
            ch: glyph.ch,
            asset_ref: glyph.asset_ref,
            width: px_u32(width),
            height: px_u32(height),
            scale,
            x_offset: x,
        });

        cursor += width;
        if idx + 1 < count {
            cursor += gap_px;
        }
    }

    let deficit = -(params.anchor_x + min_x);
    if deficit > 0 {
        tracing::debug!(deficit, "letter run shifted right to stay on screen");
        for entry in &mut entries {
            entry.x_offset += deficit;
        }
        min_x += deficit;
    }

    let bbox = PackBounds {
        x_offset: min_x,
        w: entries
            .iter()
            .map(|e| e.x_offset + i64::from(e.width))
            .max()
            .unwrap_or(0),
        h: entries.iter().map(|e| e.height).max().unwrap_or(0),
    };

    Ok(LetterPlan {
        entries,
        missing,
        gap: px_u32(gap_px),
        bbox,
        adjust,
        fitted_width,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/letters/planner.rs"]
mod tests;
