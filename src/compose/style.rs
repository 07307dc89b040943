use crate::{
    foundation::error::{ReelError, ReelResult},
    metrics::text::FontRef,
    zhuyin::column::ColumnParams,
};

/// Element tag used to pick per-element styling such as padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Letter glyph run (or letter text).
    Letters,
    /// Han characters with their Zhuyin columns.
    WordZh,
    /// Countdown timer label.
    Timer,
    /// Revealed English word.
    Reveal,
    /// Progress bar track.
    ProgressBar,
}

/// Font keys handed to the text metrics provider.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontSet {
    /// Latin text: letters in text mode and the reveal.
    pub latin: FontRef,
    /// Han characters.
    pub han: FontRef,
    /// Zhuyin symbols and tone marks.
    pub zhuyin: FontRef,
    /// Timer digits.
    pub timer: FontRef,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            latin: FontRef::new("latin"),
            han: FontRef::new("han"),
            zhuyin: FontRef::new("zhuyin"),
            timer: FontRef::new("timer"),
        }
    }
}

/// Letter run sizing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LetterStyle {
    /// Glyph image height before any shrink.
    pub target_height: u32,
    /// Gap between glyphs before scaling.
    pub gap_base: f64,
    /// Emphasis scale applied after fitting, at least 1.
    pub extra_scale: f64,
    /// Font size when letters are drawn as text.
    pub text_font_size: u32,
    /// Shrink floor for text mode.
    pub min_font_size: u32,
}

impl Default for LetterStyle {
    fn default() -> Self {
        Self {
            target_height: 260,
            gap_base: 24.0,
            extra_scale: 1.0,
            text_font_size: 200,
            min_font_size: 24,
        }
    }
}

/// Han row sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WordStyle {
    /// Han font size before any shrink.
    pub font_size: u32,
    /// Shrink floor.
    pub min_font_size: u32,
    /// Gap between a Han character and its Zhuyin column.
    pub zhuyin_gap: u32,
    /// Gap between consecutive character units.
    pub char_gap: u32,
}

impl Default for WordStyle {
    fn default() -> Self {
        Self {
            font_size: 220,
            min_font_size: 40,
            zhuyin_gap: 8,
            char_gap: 24,
        }
    }
}

/// Timer label sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimerStyle {
    /// Label font size.
    pub font_size: u32,
    /// Padding around the label on every side.
    pub padding: u32,
}

impl Default for TimerStyle {
    fn default() -> Self {
        Self {
            font_size: 64,
            padding: 16,
        }
    }
}

/// Reveal sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealStyle {
    /// Font size before any shrink.
    pub font_size: u32,
    /// Shrink floor.
    pub min_font_size: u32,
    /// Height of the band kept below the text for underlines.
    pub underline_reserve: u32,
    /// Underline stroke thickness.
    pub underline_thickness: u32,
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self {
            font_size: 120,
            min_font_size: 32,
            underline_reserve: 28,
            underline_thickness: 6,
        }
    }
}

/// Visual parameters of a card. Pixel values refer to the output canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
    /// Margin kept free on every canvas edge.
    pub safe_margin: u32,
    /// Vertical gap between stacked regions (timer band, content, reveal, bar).
    pub region_gap: u32,
    /// Horizontal gap between the letters and word columns.
    pub column_gutter: u32,
    /// Progress bar thickness.
    pub progress_bar_height: u32,
    /// Font keys.
    pub fonts: FontSet,
    /// Letter run sizing.
    pub letters: LetterStyle,
    /// Han row sizing.
    pub word: WordStyle,
    /// Zhuyin column stacking.
    pub zhuyin: ColumnParams,
    /// Timer sizing.
    pub timer: TimerStyle,
    /// Reveal sizing.
    pub reveal: RevealStyle,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            safe_margin: 60,
            region_gap: 24,
            column_gutter: 80,
            progress_bar_height: 24,
            fonts: FontSet::default(),
            letters: LetterStyle::default(),
            word: WordStyle::default(),
            zhuyin: ColumnParams::default(),
            timer: TimerStyle::default(),
            reveal: RevealStyle::default(),
        }
    }
}

impl LayoutStyle {
    /// Padding added around the measured content of an element.
    pub fn padding(&self, kind: ElementKind) -> u32 {
        match kind {
            ElementKind::Timer => self.timer.padding,
            ElementKind::Letters
            | ElementKind::WordZh
            | ElementKind::Reveal
            | ElementKind::ProgressBar => 0,
        }
    }

    /// Reject styles that cannot produce a layout.
    pub fn validate(&self) -> ReelResult<()> {
        let sizes = [
            ("letters.target_height", self.letters.target_height),
            ("letters.text_font_size", self.letters.text_font_size),
            ("word.font_size", self.word.font_size),
            ("timer.font_size", self.timer.font_size),
            ("reveal.font_size", self.reveal.font_size),
            ("progress_bar_height", self.progress_bar_height),
            ("zhuyin.min_font_size", self.zhuyin.min_font_size),
        ];
        for (name, v) in sizes {
            if v == 0 {
                return Err(ReelError::invalid_config(format!("style {name} must be > 0")));
            }
        }
        if !self.letters.gap_base.is_finite() || self.letters.gap_base < 0.0 {
            return Err(ReelError::invalid_config(
                "style letters.gap_base must be finite and >= 0",
            ));
        }
        if !self.letters.extra_scale.is_finite() || self.letters.extra_scale < 1.0 {
            return Err(ReelError::invalid_config(
                "style letters.extra_scale must be finite and >= 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/style.rs"]
mod tests;
