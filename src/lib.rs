//! Wordreel turns a vocabulary card into a deterministic, renderer-agnostic plan.
//!
//! A card is an English word with a letter hint, a Chinese word annotated with Zhuyin, and a
//! countdown before the word is revealed. Wordreel computes where everything goes and when
//! things happen; drawing pixels and encoding video are left to the caller.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: Han characters are mapped to Zhuyin readings ([`TypographyResolver`]).
//! 2. **Measure**: text is measured through an injected [`TextMetrics`] provider
//!    ([`ParleyTextMetrics`] when real fonts are available).
//! 3. **Compose**: letters, Han row, Zhuyin columns, timer, reveal and progress bar are placed
//!    on the canvas ([`compose_layout`]).
//! 4. **Schedule**: timer ticks, beeps, reveal and fades ([`schedule_events`]) and the shrinking
//!    progress bar ([`ProgressSegmenter::plan_segments`]).
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs serialize to identical bytes.
//! - **No IO**: glyph images, fonts and dictionaries come in through traits.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod foundation;
mod letters;
mod metrics;
mod progress;
mod timeline;
mod typography;
mod zhuyin;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;

pub use compose::clip::{ClipPlan, plan_clip};
pub use compose::composer::{LayoutEnv, MAX_SHRINK_ATTEMPTS, SHRINK_FACTOR, compose_layout};
pub use compose::config::LayoutConfig;
pub use compose::model::{
    LayoutResult, LettersLayout, LettersMode, PlacedHan, PlacedLetter, RevealLayout,
    RevealUnderline, TimerLayout, WordZhLayout, ZhuyinColumn,
};
pub use compose::style::{
    ElementKind, FontSet, LayoutStyle, LetterStyle, RevealStyle, TimerStyle, WordStyle,
};
pub use compose::underline::{UNDERLINE_BASELINE_FALLBACK, UNDERLINE_MIN_GAP};
pub use foundation::core::{BoundingBox, Canvas, Point, Rect, Rgba8};
pub use foundation::error::{ReelError, ReelResult};
pub use letters::catalog::{
    GlyphAsset, GlyphCatalog, GlyphResolution, GlyphSource, MissingGlyph, MissingReason,
    glyph_variant_name, resolve_glyph,
};
pub use letters::planner::{LetterLayoutEntry, LetterPackParams, LetterPlan, PackBounds, plan_letters};
pub use metrics::parley_metrics::ParleyTextMetrics;
pub use metrics::text::{FontRef, TextMetrics, TextSize};
pub use progress::bands::{Band, BandKind, BandMask, ColorSpan, band_layout};
pub use progress::segmenter::{
    MAX_PROGRESS_STEPS, ProgressSegment, ProgressSegmenter, SegmenterParams, segment_at,
};
pub use timeline::formatter::{
    EventKind, MAX_COUNTDOWN_SEC, TimelineConfig, TimelineEvent, TimerTick, beep_schedule,
    format_countdown, schedule_events, timer_ticks,
};
pub use typography::resolver::{
    CharPhonetics, PhoneticDictionary, PhoneticSplit, TONE_DIPPING, TONE_FALLING, TONE_MARKS,
    TONE_NEUTRAL, TONE_RISING, TypographyResolver, extract_han_chars, is_han_character,
    is_tone_mark, is_zhuyin_symbol, split_phonetic_symbols,
};
pub use typography::table::zhuyin_for;
pub use zhuyin::column::{ColumnParams, ColumnPlan, ToneAlignment, layout_column};
