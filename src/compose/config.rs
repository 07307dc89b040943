use serde::Deserialize;

use crate::{
    foundation::core::Canvas,
    foundation::error::{ReelError, ReelResult},
    progress::segmenter::MAX_PROGRESS_STEPS,
    timeline::formatter::TimelineConfig,
};

/// One word card: what to show and how long.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutConfig {
    /// Letters drawn as glyph images or text (e.g. `"I i"`).
    pub letters: String,
    /// English target word typed in by the reveal.
    pub word_en: String,
    /// Chinese word; may mix Zhuyin and Han characters, only Han characters are laid out.
    pub word_zh: String,
    /// Countdown length in seconds.
    pub countdown_sec: f64,
    /// Time the revealed word stays on screen.
    pub reveal_hold_sec: f64,
    /// Whether the countdown timer is drawn.
    pub timer_visible: bool,
    /// Whether the progress bar is drawn.
    pub progress_bar: bool,
    /// Letters from glyph images (`true`) or from the Latin font (`false`).
    pub letters_as_image: bool,
    /// Output canvas.
    pub canvas: Canvas,
    /// Fade-in length.
    #[serde(default)]
    pub fade_in_sec: f64,
    /// Fade-out length.
    #[serde(default)]
    pub fade_out_sec: f64,
    /// Frame rate used for progress segments.
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Number of warning beeps.
    #[serde(default = "default_beep_count")]
    pub beep_count: u32,
}

fn default_fps() -> f64 {
    30.0
}

fn default_beep_count() -> u32 {
    3
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            letters: String::new(),
            word_en: String::new(),
            word_zh: String::new(),
            countdown_sec: 10.0,
            reveal_hold_sec: 3.0,
            timer_visible: true,
            progress_bar: true,
            letters_as_image: true,
            canvas: Canvas::default(),
            fade_in_sec: 0.0,
            fade_out_sec: 0.0,
            fps: default_fps(),
            beep_count: default_beep_count(),
        }
    }
}

impl LayoutConfig {
    /// Card with default timing and canvas.
    pub fn new(
        letters: impl Into<String>,
        word_en: impl Into<String>,
        word_zh: impl Into<String>,
    ) -> Self {
        Self {
            letters: letters.into(),
            word_en: word_en.into(),
            word_zh: word_zh.into(),
            ..Self::default()
        }
    }

    /// Timing view of this card.
    pub fn timeline(&self) -> TimelineConfig {
        TimelineConfig {
            countdown_sec: self.countdown_sec,
            reveal_hold_sec: self.reveal_hold_sec,
            fade_in_sec: self.fade_in_sec,
            fade_out_sec: self.fade_out_sec,
            timer_visible: self.timer_visible,
            beep_count: self.beep_count,
            clip_duration_sec: None,
        }
    }

    /// Total clip length in seconds.
    pub fn total_duration(&self) -> f64 {
        self.timeline().total_duration()
    }

    /// Reject cards that cannot be laid out or timed.
    pub fn validate(&self) -> ReelResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        self.timeline().validate()?;
        if self.fps.is_nan() {
            return Err(ReelError::invalid_config("fps must be a number"));
        }
        if self.fps.is_finite() && (self.countdown_sec * self.fps).ceil() > MAX_PROGRESS_STEPS {
            return Err(ReelError::invalid_config(format!(
                "countdown {}s at {} fps exceeds {MAX_PROGRESS_STEPS} progress steps",
                self.countdown_sec, self.fps
            )));
        }
        Ok(())
    }

    /// Read a legacy loosely-typed JSON object.
    ///
    /// Numbers may be numeric strings, booleans may be `0`/`1` or `"true"`/`"false"`, and the
    /// canvas may be `[w, h]` or `{"width", "height"}`. Unknown keys are ignored.
    pub fn from_loose_map(value: &serde_json::Value) -> ReelResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| ReelError::serde("layout config must be a JSON object"))?;
        for key in map.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                tracing::debug!(key = %key, "ignoring unknown layout config key");
            }
        }

        let def = LooseConfigDef::deserialize(value)?;
        let defaults = Self::default();
        let cfg = Self {
            letters: def.letters.unwrap_or_default(),
            word_en: def.word_en.unwrap_or_default(),
            word_zh: def.word_zh.unwrap_or_default(),
            countdown_sec: number_or("countdown_sec", def.countdown_sec, defaults.countdown_sec)?,
            reveal_hold_sec: number_or(
                "reveal_hold_sec",
                def.reveal_hold_sec,
                defaults.reveal_hold_sec,
            )?,
            timer_visible: bool_or("timer_visible", def.timer_visible, defaults.timer_visible)?,
            progress_bar: bool_or("progress_bar", def.progress_bar, defaults.progress_bar)?,
            letters_as_image: bool_or(
                "letters_as_image",
                def.letters_as_image,
                defaults.letters_as_image,
            )?,
            canvas: match def.canvas {
                Some(LooseCanvas::Arr([width, height]) | LooseCanvas::Obj { width, height }) => {
                    Canvas { width, height }
                }
                None => defaults.canvas,
            },
            fade_in_sec: number_or("fade_in_sec", def.fade_in_sec, defaults.fade_in_sec)?,
            fade_out_sec: number_or("fade_out_sec", def.fade_out_sec, defaults.fade_out_sec)?,
            fps: number_or("fps", def.fps, defaults.fps)?,
            beep_count: {
                let n = number_or("beep_count", def.beep_count, f64::from(defaults.beep_count))?;
                if n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
                    return Err(ReelError::serde(format!(
                        "beep_count must be a non-negative integer (got {n})"
                    )));
                }
                n as u32
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

const KNOWN_KEYS: [&str; 13] = [
    "letters",
    "word_en",
    "word_zh",
    "countdown_sec",
    "reveal_hold_sec",
    "timer_visible",
    "progress_bar",
    "letters_as_image",
    "canvas",
    "fade_in_sec",
    "fade_out_sec",
    "fps",
    "beep_count",
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LooseConfigDef {
    letters: Option<String>,
    word_en: Option<String>,
    word_zh: Option<String>,
    countdown_sec: Option<LooseNumber>,
    reveal_hold_sec: Option<LooseNumber>,
    timer_visible: Option<LooseBool>,
    progress_bar: Option<LooseBool>,
    letters_as_image: Option<LooseBool>,
    canvas: Option<LooseCanvas>,
    fade_in_sec: Option<LooseNumber>,
    fade_out_sec: Option<LooseNumber>,
    fps: Option<LooseNumber>,
    beep_count: Option<LooseNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Num(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseBool {
    Bool(bool),
    Num(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseCanvas {
    Arr([u32; 2]),
    Obj { width: u32, height: u32 },
}

fn number_or(key: &str, v: Option<LooseNumber>, default: f64) -> ReelResult<f64> {
    match v {
        None => Ok(default),
        Some(LooseNumber::Num(n)) => Ok(n),
        Some(LooseNumber::Text(s)) => s.trim().parse::<f64>().map_err(|_| {
            ReelError::serde(format!("{key}: expected a number, got {s:?}"))
        }),
    }
}

fn bool_or(key: &str, v: Option<LooseBool>, default: bool) -> ReelResult<bool> {
    match v {
        None => Ok(default),
        Some(LooseBool::Bool(b)) => Ok(b),
        Some(LooseBool::Num(0)) => Ok(false),
        Some(LooseBool::Num(1)) => Ok(true),
        Some(LooseBool::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            _ => Err(ReelError::serde(format!(
                "{key}: expected a boolean, got {s:?}"
            ))),
        },
        Some(LooseBool::Num(n)) => Err(ReelError::serde(format!(
            "{key}: expected 0 or 1, got {n}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/config.rs"]
mod tests;
