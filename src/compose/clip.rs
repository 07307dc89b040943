use crate::{
    compose::composer::{LayoutEnv, compose_layout},
    compose::config::LayoutConfig,
    compose::model::LayoutResult,
    foundation::error::ReelResult,
    progress::segmenter::{ProgressSegment, ProgressSegmenter},
    timeline::formatter::{TimelineEvent, schedule_events},
};

/// Layout, events and progress bar plan for one card.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipPlan {
    /// Element placement.
    pub layout: LayoutResult,
    /// Ordered timeline events.
    pub events: Vec<TimelineEvent>,
    /// Progress bar segments; empty when the bar is disabled.
    pub progress: Vec<ProgressSegment>,
    /// Clip length in seconds.
    pub total_duration: f64,
}

/// Plan everything a renderer needs for one card.
pub fn plan_clip(
    config: &LayoutConfig,
    env: &LayoutEnv<'_>,
    segmenter: &ProgressSegmenter,
) -> ReelResult<ClipPlan> {
    let layout = compose_layout(config, env)?;
    let timeline = config.timeline();
    let events = schedule_events(&timeline)?;
    let total_duration = timeline.total_duration();
    let progress = match layout.progress_bar {
        Some(bar) => {
            segmenter.plan_segments(config.countdown_sec, total_duration, config.fps, bar.w)?
        }
        None => Vec::new(),
    };
    Ok(ClipPlan {
        layout,
        events,
        progress,
        total_duration,
    })
}
