use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    foundation::error::{ReelError, ReelResult},
    foundation::math::{round_px, round6},
    progress::bands::{BandMask, ColorSpan},
};

/// Upper bound on `countdown * fps`, the number of frame steps in one plan.
pub const MAX_PROGRESS_STEPS: f64 = 1_000_000.0;

/// Style knobs for segment plans.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SegmenterParams {
    /// Corner radius of a full-width bar; narrower bars use at most half their width.
    pub corner_radius: f64,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            corner_radius: 12.0,
        }
    }
}

/// The bar state held constant over `[start, end)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProgressSegment {
    /// Segment start in seconds.
    pub start: f64,
    /// Segment end in seconds.
    pub end: f64,
    /// Visible bar width in pixels.
    pub width: u32,
    /// Left edge of the visible bar (bar-relative); equals the bar width when nothing is visible.
    pub x_start: u32,
    /// Visible band slices, left to right.
    pub color_spans: Vec<ColorSpan>,
    /// Corner radius to draw with.
    pub corner_radius: f64,
}

/// Plans the shrinking progress bar.
///
/// Owns a width-keyed cache of band masks. Entries are deterministic, so two threads racing to
/// fill the same width store equal values and either one may win.
#[derive(Debug, Default)]
pub struct ProgressSegmenter {
    params: SegmenterParams,
    masks: RwLock<HashMap<u32, Arc<BandMask>>>,
}

impl ProgressSegmenter {
    /// Segmenter with the given style.
    pub fn new(params: SegmenterParams) -> Self {
        Self {
            params,
            masks: RwLock::new(HashMap::new()),
        }
    }

    /// Style in use.
    pub fn params(&self) -> SegmenterParams {
        self.params
    }

    /// Band mask for `width`, built once per width.
    pub fn band_mask(&self, width: u32) -> Arc<BandMask> {
        {
            let masks = self.masks.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(mask) = masks.get(&width) {
                return Arc::clone(mask);
            }
        }
        let mask = Arc::new(BandMask::new(width));
        let mut masks = self.masks.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(masks.entry(width).or_insert(mask))
    }

    /// Number of widths currently cached.
    pub fn cached_widths(&self) -> usize {
        self.masks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Per-frame-step plan of the bar over a countdown, plus a trailing empty segment up to
    /// `total_duration`.
    ///
    /// The visible width never grows: rounding can only keep it equal or shrink it, and once it
    /// reaches zero it stays there. While time remains the bar keeps at least one pixel.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn plan_segments(
        &self,
        countdown: f64,
        total_duration: f64,
        fps: f64,
        width: u32,
    ) -> ReelResult<Vec<ProgressSegment>> {
        if !countdown.is_finite() || countdown < 0.0 {
            return Err(ReelError::invalid_config(format!(
                "countdown must be finite and >= 0 (got {countdown})"
            )));
        }
        if !fps.is_finite() || fps <= 0.0 || width == 0 {
            return Ok(Vec::new());
        }
        let total = if total_duration.is_finite() {
            total_duration.max(countdown)
        } else {
            countdown
        };

        if countdown == 0.0 {
            return Ok(vec![self.empty_segment(0.0, total, width)]);
        }

        let frames = (countdown * fps).ceil();
        if frames > MAX_PROGRESS_STEPS {
            return Err(ReelError::invalid_config(format!(
                "countdown {countdown}s at {fps} fps needs {frames} steps, over {MAX_PROGRESS_STEPS}"
            )));
        }
        let mask = self.band_mask(width);
        let steps = frames.max(1.0) as u64;
        let step = countdown / steps as f64;
        let full = i64::from(width);

        let mut segments = Vec::with_capacity(steps as usize + 1);
        let mut prev_visible = full;
        for i in 0..steps {
            let start = i as f64 * step;
            let end = if i + 1 == steps {
                countdown
            } else {
                (i + 1) as f64 * step
            };
            let ratio = (countdown - start) / countdown;
            let raw = round_px(full as f64 * ratio);

            let mut visible = prev_visible.min(raw.max(0));
            if ratio > 0.0 && prev_visible > 0 {
                visible = visible.max(1);
            }
            prev_visible = visible;

            let visible = visible as u32;
            let x_start = if visible > 0 { width - visible } else { width };
            segments.push(ProgressSegment {
                start: round6(start),
                end: round6(end),
                width: visible,
                x_start,
                color_spans: mask.spans(x_start, x_start + visible),
                corner_radius: round6(self.params.corner_radius.min(f64::from(visible) * 0.5)),
            });
        }
        segments.push(self.empty_segment(countdown, total, width));

        tracing::debug!(segments = segments.len(), steps, "planned progress segments");
        Ok(segments)
    }

    fn empty_segment(&self, start: f64, end: f64, width: u32) -> ProgressSegment {
        ProgressSegment {
            start: round6(start),
            end: round6(end),
            width: 0,
            x_start: width,
            color_spans: Vec::new(),
            corner_radius: 0.0,
        }
    }
}

/// Segment active at time `t`: `[start, end)`, with the final segment also covering its end.
pub fn segment_at(segments: &[ProgressSegment], t: f64) -> Option<&ProgressSegment> {
    let last = segments.last()?;
    if t.is_nan() || t < segments[0].start || t > last.end {
        return None;
    }
    let idx = segments.partition_point(|s| s.end <= t);
    segments.get(idx).or(Some(last))
}

#[cfg(test)]
#[path = "../../tests/unit/progress/segmenter.rs"]
mod tests;
