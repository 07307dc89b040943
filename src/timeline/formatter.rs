use crate::{
    foundation::error::{ReelError, ReelResult},
    foundation::math::round6,
};

/// Longest countdown a card may run, in seconds.
pub const MAX_COUNTDOWN_SEC: f64 = 3600.0;

/// Kind of scheduled overlay event. Declaration order breaks ties between equal times.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum EventKind {
    /// Clip fades in from black.
    #[serde(rename = "fadein")]
    FadeIn,
    /// Countdown label changes.
    #[serde(rename = "timerTick")]
    TimerTick,
    /// Short warning beep.
    #[serde(rename = "beep")]
    Beep,
    /// Target word starts typing in.
    #[serde(rename = "reveal")]
    Reveal,
    /// Clip fades out to black.
    #[serde(rename = "fadeout")]
    FadeOut,
}

/// A time-indexed event for the composition layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineEvent {
    /// Event kind.
    pub kind: EventKind,
    /// Start time in seconds.
    pub time: f64,
    /// Duration in seconds for events that span time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Text payload (timer label).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Timing knobs for one clip.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineConfig {
    /// Countdown length; the reveal starts when it ends.
    pub countdown_sec: f64,
    /// How long the revealed word stays on screen.
    pub reveal_hold_sec: f64,
    /// Fade-in length at clip start (0 disables).
    pub fade_in_sec: f64,
    /// Fade-out length at clip end (0 disables).
    pub fade_out_sec: f64,
    /// Whether timer ticks are scheduled.
    pub timer_visible: bool,
    /// Number of warning beeps before the countdown ends.
    pub beep_count: u32,
    /// Explicit clip length; defaults to `countdown_sec + reveal_hold_sec`.
    pub clip_duration_sec: Option<f64>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            countdown_sec: 10.0,
            reveal_hold_sec: 3.0,
            fade_in_sec: 0.0,
            fade_out_sec: 0.0,
            timer_visible: true,
            beep_count: 3,
            clip_duration_sec: None,
        }
    }
}

fn non_negative(name: &str, v: f64) -> ReelResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(ReelError::invalid_config(format!(
            "{name} must be finite and >= 0 (got {v})"
        )));
    }
    Ok(())
}

impl TimelineConfig {
    /// Total clip length in seconds.
    pub fn total_duration(&self) -> f64 {
        self.clip_duration_sec
            .unwrap_or(self.countdown_sec + self.reveal_hold_sec)
    }

    /// Reject timings that cannot form a clip.
    pub fn validate(&self) -> ReelResult<()> {
        non_negative("countdown_sec", self.countdown_sec)?;
        if self.countdown_sec > MAX_COUNTDOWN_SEC {
            return Err(ReelError::invalid_config(format!(
                "countdown_sec {} exceeds {MAX_COUNTDOWN_SEC}s",
                self.countdown_sec
            )));
        }
        non_negative("reveal_hold_sec", self.reveal_hold_sec)?;
        non_negative("fade_in_sec", self.fade_in_sec)?;
        non_negative("fade_out_sec", self.fade_out_sec)?;
        if let Some(clip) = self.clip_duration_sec {
            non_negative("clip_duration_sec", clip)?;
        }

        let total = self.total_duration();
        if self.countdown_sec > total {
            return Err(ReelError::invalid_config(format!(
                "reveal at {}s is beyond clip duration {total}s",
                self.countdown_sec
            )));
        }
        if self.fade_out_sec > 0.0 && self.fade_out_sec >= total {
            return Err(ReelError::invalid_config(format!(
                "fade_out_sec {} must be shorter than clip duration {total}s",
                self.fade_out_sec
            )));
        }
        if self.fade_in_sec > 0.0 && self.fade_in_sec >= total {
            return Err(ReelError::invalid_config(format!(
                "fade_in_sec {} must be shorter than clip duration {total}s",
                self.fade_in_sec
            )));
        }
        Ok(())
    }
}

/// `MM:SS` label for a whole number of seconds. Minutes are not wrapped at 60.
pub fn format_countdown(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// One countdown label change.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimerTick {
    /// Time the label appears.
    pub time: f64,
    /// Label text.
    pub label: String,
}

/// Label changes for a countdown: one per whole second, ending on `00:00` at `countdown`.
///
/// Countdowns that are negative, non-finite or longer than [`MAX_COUNTDOWN_SEC`] have no ticks.
pub fn timer_ticks(countdown: f64) -> Vec<TimerTick> {
    if !countdown.is_finite() || !(0.0..=MAX_COUNTDOWN_SEC).contains(&countdown) {
        return Vec::new();
    }
    let top = countdown.ceil() as u64;
    let whole = countdown.floor() as u64;
    let mut ticks: Vec<TimerTick> = (0..=whole)
        .map(|t| TimerTick {
            time: t as f64,
            label: format_countdown(top - t),
        })
        .collect();
    if top != whole {
        ticks.push(TimerTick {
            time: round6(countdown),
            label: format_countdown(0),
        });
    }
    ticks
}

/// Beep times at `countdown - k` for `k = beep_count..=1`, dropping negative times.
pub fn beep_schedule(countdown: f64, beep_count: u32) -> Vec<f64> {
    if !countdown.is_finite() || countdown <= 0.0 {
        return Vec::new();
    }
    (1..=beep_count)
        .rev()
        .map(|k| countdown - f64::from(k))
        .filter(|&t| t >= 0.0)
        .map(round6)
        .collect()
}

/// All overlay events of a clip, sorted by time (ties ordered by [`EventKind`]).
#[tracing::instrument(level = "debug")]
pub fn schedule_events(config: &TimelineConfig) -> ReelResult<Vec<TimelineEvent>> {
    config.validate()?;
    let total = config.total_duration();
    let mut events = Vec::<TimelineEvent>::new();

    if config.fade_in_sec > 0.0 {
        events.push(TimelineEvent {
            kind: EventKind::FadeIn,
            time: 0.0,
            duration: Some(round6(config.fade_in_sec)),
            label: None,
        });
    }
    if config.timer_visible {
        events.extend(timer_ticks(config.countdown_sec).into_iter().map(|tick| {
            TimelineEvent {
                kind: EventKind::TimerTick,
                time: tick.time,
                duration: None,
                label: Some(tick.label),
            }
        }));
    }
    events.extend(
        beep_schedule(config.countdown_sec, config.beep_count)
            .into_iter()
            .map(|time| TimelineEvent {
                kind: EventKind::Beep,
                time,
                duration: None,
                label: None,
            }),
    );
    events.push(TimelineEvent {
        kind: EventKind::Reveal,
        time: round6(config.countdown_sec),
        duration: Some(round6(
            config.reveal_hold_sec.min(total - config.countdown_sec),
        )),
        label: None,
    });
    if config.fade_out_sec > 0.0 {
        events.push(TimelineEvent {
            kind: EventKind::FadeOut,
            time: round6(total - config.fade_out_sec),
            duration: Some(round6(config.fade_out_sec)),
            label: None,
        });
    }

    events.sort_by(|a, b| a.time.total_cmp(&b.time).then(a.kind.cmp(&b.kind)));
    tracing::debug!(events = events.len(), total, "scheduled timeline");
    Ok(events)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/formatter.rs"]
mod tests;
