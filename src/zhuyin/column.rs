use crate::{
    foundation::error::{ReelError, ReelResult},
    foundation::math::round_px,
    metrics::text::{FontRef, TextMetrics, TextSize, measure_text},
    typography::resolver::TONE_NEUTRAL,
};

/// Where the tone mark sits relative to the main stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneAlignment {
    /// No tone mark.
    #[default]
    None,
    /// Above the stack, horizontally centered on it (neutral tone).
    Center,
    /// To the right of the stack, at half its height (2nd/3rd/4th tones).
    Right,
}

/// Knobs for stacking one Zhuyin column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnParams {
    /// Shrink-to-fit floor.
    pub min_font_size: u32,
    /// Vertical gap between stacked symbols.
    pub symbol_spacing: u32,
    /// Gap between the stack and its tone mark.
    pub tone_gap: u32,
}

impl Default for ColumnParams {
    fn default() -> Self {
        Self {
            min_font_size: 12,
            symbol_spacing: 2,
            tone_gap: 2,
        }
    }
}

/// Vertical placement of one Zhuyin column. Y values are absolute; widths feed the composer.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ColumnPlan {
    /// Font size the stack was measured at.
    pub font_size: u32,
    /// Top of the main stack.
    pub main_start_y: i64,
    /// Main box height, clamped to the host character height.
    pub main_box_height: u32,
    /// Widest stacked symbol.
    pub main_box_width: u32,
    /// Unclamped stack height (symbols plus spacing).
    pub stacked_height: u32,
    /// Top of each symbol relative to `main_start_y`.
    pub symbol_offsets: Vec<u32>,
    /// Measured size of each symbol.
    pub symbol_sizes: Vec<TextSize>,
    /// Top of the tone mark.
    pub tone_start_y: Option<i64>,
    /// Measured tone mark height.
    pub tone_box_height: Option<u32>,
    /// Measured tone mark width.
    pub tone_box_width: Option<u32>,
    /// Tone placement rule that was applied.
    pub tone_alignment: ToneAlignment,
}

struct Stack {
    sizes: Vec<TextSize>,
    height: u32,
}

fn measure_stack<M>(
    symbols: &[char],
    size: u32,
    spacing: u32,
    metrics: &M,
    font: &FontRef,
) -> ReelResult<Stack>
where
    M: TextMetrics + ?Sized,
{
    let mut sizes = Vec::with_capacity(symbols.len());
    let mut buf = [0u8; 4];
    for sym in symbols {
        sizes.push(measure_text(metrics, sym.encode_utf8(&mut buf), font, size)?);
    }
    let spacing_total = spacing * (symbols.len().saturating_sub(1) as u32);
    let height = sizes.iter().map(|s| s.height).sum::<u32>() + spacing_total;
    Ok(Stack { sizes, height })
}

/// Stack `main_symbols` vertically beside a host character starting at `cursor_y`.
///
/// The font shrinks one pixel at a time until the stack fits the host height or the
/// `min_font_size` floor is reached, so the loop always terminates.
pub fn layout_column<M>(
    host_char_height: u32,
    main_symbols: &[char],
    tone: Option<char>,
    cursor_y: i64,
    params: &ColumnParams,
    metrics: &M,
    font: &FontRef,
) -> ReelResult<ColumnPlan>
where
    M: TextMetrics + ?Sized,
{
    if params.min_font_size == 0 {
        return Err(ReelError::invalid_config("zhuyin min_font_size must be > 0"));
    }

    let count = main_symbols.len().max(1) as f64;
    let initial = round_px(f64::from(host_char_height) / count).max(0) as u32;
    let mut size = initial.max(params.min_font_size);

    let mut stack = measure_stack(main_symbols, size, params.symbol_spacing, metrics, font)?;
    while stack.height > host_char_height && size > params.min_font_size {
        size -= 1;
        stack = measure_stack(main_symbols, size, params.symbol_spacing, metrics, font)?;
    }
    if stack.height > host_char_height {
        tracing::debug!(
            size,
            stacked = stack.height,
            host = host_char_height,
            "zhuyin stack taller than host at min font size"
        );
    }

    let main_start_y = if main_symbols.is_empty() {
        cursor_y
    } else {
        cursor_y + (i64::from(host_char_height) - i64::from(stack.height)).max(0) / 2
    };

    let mut symbol_offsets = Vec::with_capacity(stack.sizes.len());
    let mut y = 0u32;
    for s in &stack.sizes {
        symbol_offsets.push(y);
        y += s.height + params.symbol_spacing;
    }

    let mut plan = ColumnPlan {
        font_size: size,
        main_start_y,
        main_box_height: stack.height.min(host_char_height),
        main_box_width: stack.sizes.iter().map(|s| s.width).max().unwrap_or(0),
        stacked_height: stack.height,
        symbol_offsets,
        symbol_sizes: stack.sizes,
        ..ColumnPlan::default()
    };

    if let Some(tone) = tone {
        let mut buf = [0u8; 4];
        let tone_size = measure_text(metrics, tone.encode_utf8(&mut buf), font, size)?;
        let (start_y, alignment) = if tone == TONE_NEUTRAL {
            (
                main_start_y - i64::from(tone_size.height) - i64::from(params.tone_gap),
                ToneAlignment::Center,
            )
        } else {
            (
                cursor_y + i64::from(stack.height / 2),
                ToneAlignment::Right,
            )
        };
        plan.tone_start_y = Some(start_y);
        plan.tone_box_height = Some(tone_size.height);
        plan.tone_box_width = Some(tone_size.width);
        plan.tone_alignment = alignment;
    }

    Ok(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/zhuyin/column.rs"]
mod tests;
