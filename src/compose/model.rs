use crate::{
    compose::style::ElementKind,
    foundation::core::{BoundingBox, Canvas},
    foundation::error::{ReelError, ReelResult},
    letters::catalog::MissingGlyph,
    zhuyin::column::ToneAlignment,
};

/// How the letters were drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LettersMode {
    /// Glyph images from the catalog.
    Image,
    /// Latin font text.
    Text,
}

/// One placed glyph image.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlacedLetter {
    /// Source character.
    pub ch: char,
    /// Renderer asset reference.
    pub asset_ref: String,
    /// Canvas box of the scaled image.
    pub bbox: BoundingBox,
    /// Applied image scale.
    pub scale: f64,
}

/// The letters element.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LettersLayout {
    /// Drawing mode.
    pub mode: LettersMode,
    /// Union of everything drawn; `None` when nothing could be placed.
    pub bbox: Option<BoundingBox>,
    /// Glyph placements (image mode only).
    pub glyphs: Vec<PlacedLetter>,
    /// Gap between glyphs (image mode only).
    pub gap: u32,
    /// Font size (text mode only).
    pub font_size: Option<u32>,
}

/// One Han character of the word row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlacedHan {
    /// The character.
    pub ch: char,
    /// Canvas box of the character.
    pub bbox: BoundingBox,
}

/// The Han word row (without its Zhuyin columns).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordZhLayout {
    /// Han characters in reading order.
    pub text: String,
    /// Final Han font size.
    pub font_size: u32,
    /// Per-character boxes.
    pub chars: Vec<PlacedHan>,
    /// Union of characters and their Zhuyin columns.
    pub bbox: BoundingBox,
}

/// Zhuyin column next to one Han character.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ZhuyinColumn {
    /// The Han character this column annotates.
    pub host_char: char,
    /// Stacked symbols, top to bottom.
    pub main_symbols: Vec<char>,
    /// Tone mark, if any.
    pub tone_symbol: Option<char>,
    /// Union of the main stack and the tone mark.
    pub bbox: BoundingBox,
    /// Main stack box.
    pub main_bbox: BoundingBox,
    /// Tone mark box.
    pub tone_bbox: Option<BoundingBox>,
    /// Tone placement.
    pub tone_alignment: ToneAlignment,
    /// Zhuyin font size.
    pub font_size: u32,
    /// Per-symbol top offsets within the main stack.
    pub symbol_offsets: Vec<u32>,
}

/// The countdown timer. Always computed so toggling visibility keeps the layout stable.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimerLayout {
    /// Box including padding.
    pub bbox: BoundingBox,
    /// Widest label the timer shows (its first one).
    pub label: String,
    /// Label font size.
    pub font_size: u32,
    /// Whether the timer is drawn.
    pub visible: bool,
}

/// The revealed English word.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealLayout {
    /// Displayed word.
    pub text: String,
    /// Final font size.
    pub font_size: u32,
    /// Text plus the underline band.
    pub bbox: BoundingBox,
    /// Text only.
    pub text_bbox: BoundingBox,
}

/// Underline under one reveal character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RevealUnderline {
    /// Char index in the reveal text.
    pub index: usize,
    /// Underlined character.
    pub ch: char,
    /// Underline stroke box.
    pub bbox: BoundingBox,
}

/// Everything a renderer needs to draw one card.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutResult {
    /// Output canvas.
    pub canvas: Canvas,
    /// Letters element.
    pub letters: LettersLayout,
    /// Han row, absent when the word has no Han characters.
    pub word_zh: Option<WordZhLayout>,
    /// One column per Han character that has a reading.
    pub zhuyin_columns: Vec<ZhuyinColumn>,
    /// Timer.
    pub timer: TimerLayout,
    /// Reveal, absent for a blank English word.
    pub reveal: Option<RevealLayout>,
    /// Reveal underlines, whitespace excluded.
    pub reveal_underlines: Vec<RevealUnderline>,
    /// Progress bar track, absent when disabled.
    pub progress_bar: Option<BoundingBox>,
    /// Top edge of the progress bar.
    pub progress_bar_y: Option<u32>,
    /// Letters that could not be placed.
    pub missing: Vec<MissingGlyph>,
}

impl LayoutResult {
    /// Boxes of the elements that must not overlap each other.
    pub fn element_boxes(&self) -> Vec<(ElementKind, BoundingBox)> {
        let mut out = Vec::with_capacity(4);
        if let Some(b) = self.letters.bbox {
            out.push((ElementKind::Letters, b));
        }
        if let Some(w) = &self.word_zh {
            out.push((ElementKind::WordZh, w.bbox));
        }
        if let Some(r) = &self.reveal {
            out.push((ElementKind::Reveal, r.bbox));
        }
        if self.timer.visible {
            out.push((ElementKind::Timer, self.timer.bbox));
        }
        out
    }

    /// Check that every element fits the canvas and no two elements overlap.
    ///
    /// The progress bar takes part in the overlap check. Reveal underlines must fit the canvas
    /// and stay clear of every element except the reveal they belong to.
    pub fn check_invariants(&self) -> ReelResult<()> {
        let mut elements = self.element_boxes();
        elements.extend(self.progress_bar.map(|b| (ElementKind::ProgressBar, b)));
        for (kind, b) in &elements {
            if !b.fits_canvas(self.canvas) {
                return Err(ReelError::layout(format!(
                    "{kind:?} box {b:?} leaves the {}x{} canvas",
                    self.canvas.width, self.canvas.height
                )));
            }
        }
        for (i, (ka, a)) in elements.iter().enumerate() {
            for (kb, b) in &elements[i + 1..] {
                if a.overlaps(b) {
                    return Err(ReelError::layout(format!("{ka:?} overlaps {kb:?}")));
                }
            }
        }
        for u in &self.reveal_underlines {
            if !u.bbox.fits_canvas(self.canvas) {
                return Err(ReelError::layout(format!(
                    "underline {:?} box {:?} leaves the {}x{} canvas",
                    u.ch, u.bbox, self.canvas.width, self.canvas.height
                )));
            }
            let hit = elements
                .iter()
                .find(|(kind, b)| *kind != ElementKind::Reveal && u.bbox.overlaps(b));
            if let Some((kind, _)) = hit {
                return Err(ReelError::layout(format!(
                    "underline {:?} overlaps {kind:?}",
                    u.ch
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/model.rs"]
mod tests;
