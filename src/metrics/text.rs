use crate::foundation::error::{ReelError, ReelResult};

/// Opaque reference to a font known to the [`TextMetrics`] provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct FontRef(pub String);

impl FontRef {
    /// Build a font reference from any string-like key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Measured ink box of a run of text, in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TextSize {
    /// Advance width.
    pub width: u32,
    /// Line height.
    pub height: u32,
}

/// Font-backed text measurement, consumed but never implemented by the layout core.
pub trait TextMetrics {
    /// Measure `text` set in `font` at `size_px`.
    fn measure(&self, text: &str, font: &FontRef, size_px: u32) -> anyhow::Result<TextSize>;
}

/// Measure through `metrics`, turning provider failures into [`ReelError::Measurement`].
pub(crate) fn measure_text<M>(
    metrics: &M,
    text: &str,
    font: &FontRef,
    size_px: u32,
) -> ReelResult<TextSize>
where
    M: TextMetrics + ?Sized,
{
    metrics.measure(text, font, size_px).map_err(|err| {
        ReelError::measurement(format!(
            "measuring {text:?} with font '{}' at {size_px}px: {err:#}",
            font.as_str()
        ))
    })
}

/// Largest font size in `[min_size, start_size]` whose measurement fits the limits.
///
/// Starts with one proportional jump and then decrements by one pixel. Stops at `min_size`
/// even if the text still does not fit; the returned size tells the caller what was measured.
pub(crate) fn fit_font_size<M>(
    metrics: &M,
    text: &str,
    font: &FontRef,
    start_size: u32,
    min_size: u32,
    max_width: u32,
    max_height: u32,
) -> ReelResult<(u32, TextSize)>
where
    M: TextMetrics + ?Sized,
{
    let min_size = min_size.max(1);
    let mut size = start_size.max(min_size);
    let mut measured = measure_text(metrics, text, font, size)?;
    let fits = |m: TextSize| m.width <= max_width && m.height <= max_height;

    if !fits(measured) && measured.width > 0 && measured.height > 0 {
        let ratio_w = f64::from(max_width) / f64::from(measured.width);
        let ratio_h = f64::from(max_height) / f64::from(measured.height);
        let jump = (f64::from(size) * ratio_w.min(ratio_h)).floor() as u32;
        let jump = jump.clamp(min_size, size);
        if jump < size {
            size = jump;
            measured = measure_text(metrics, text, font, size)?;
        }
    }
    while !fits(measured) && size > min_size {
        size -= 1;
        measured = measure_text(metrics, text, font, size)?;
    }
    Ok((size, measured))
}

#[cfg(test)]
#[path = "../../tests/unit/metrics/text.rs"]
mod tests;
