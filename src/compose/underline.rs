use crate::{
    compose::model::RevealUnderline,
    foundation::core::{BoundingBox, Canvas},
    foundation::error::ReelResult,
    foundation::math::round_px,
    metrics::text::{FontRef, TextMetrics, measure_text},
};

/// Offset below the baseline used when the reserved band cannot hold the stroke.
pub const UNDERLINE_BASELINE_FALLBACK: i64 = 24;

/// Minimum horizontal inset of an underline relative to its glyph.
pub const UNDERLINE_MIN_GAP: i64 = 4;

/// Inputs for placing reveal underlines.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UnderlineFrame<'a> {
    pub(crate) text: &'a str,
    pub(crate) font: &'a FontRef,
    pub(crate) font_size: u32,
    pub(crate) text_box: BoundingBox,
    pub(crate) reveal_box: BoundingBox,
    pub(crate) thickness: u32,
    pub(crate) canvas: Canvas,
}

/// One underline per non-whitespace character of the reveal word.
///
/// Glyph x positions come from measuring the prefix before each character, so kerning inside
/// the run is respected as far as the metrics provider reports it.
pub(crate) fn place_underlines<M>(
    frame: &UnderlineFrame<'_>,
    metrics: &M,
) -> ReelResult<Vec<RevealUnderline>>
where
    M: TextMetrics + ?Sized,
{
    let thickness = i64::from(frame.thickness.max(1));
    let baseline = i64::from(frame.text_box.bottom());
    let reserve = i64::from(frame.reveal_box.bottom()) - baseline;
    let mut y = if reserve >= thickness {
        baseline + (reserve - thickness) / 2
    } else {
        baseline + UNDERLINE_BASELINE_FALLBACK
    };
    y = y.min(i64::from(frame.canvas.height) - thickness).max(0);

    let mut out = Vec::new();
    let mut buf = [0u8; 4];
    for (index, (byte_idx, ch)) in frame.text.char_indices().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let prefix = &frame.text[..byte_idx];
        let left = if prefix.is_empty() {
            0
        } else {
            i64::from(measure_text(metrics, prefix, frame.font, frame.font_size)?.width)
        };
        let glyph_w = i64::from(
            measure_text(metrics, ch.encode_utf8(&mut buf), frame.font, frame.font_size)?.width,
        );
        if glyph_w == 0 {
            continue;
        }

        let gap = UNDERLINE_MIN_GAP.max(round_px(glyph_w as f64 / 10.0));
        let w = (glyph_w - gap).max(1);
        let x = i64::from(frame.text_box.x) + left + (glyph_w - w) / 2;
        out.push(RevealUnderline {
            index,
            ch,
            bbox: BoundingBox::from_signed(x, y, w, thickness)?,
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/underline.rs"]
mod tests;
