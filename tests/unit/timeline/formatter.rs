use super::*;

fn config(countdown_sec: f64) -> TimelineConfig {
    TimelineConfig {
        countdown_sec,
        ..TimelineConfig::default()
    }
}

#[test]
fn countdown_labels_are_zero_padded() {
    assert_eq!(format_countdown(0), "00:00");
    assert_eq!(format_countdown(9), "00:09");
    assert_eq!(format_countdown(75), "01:15");
    assert_eq!(format_countdown(6000), "100:00");
}

#[test]
fn ten_second_countdown_ends_on_zero() {
    let ticks = timer_ticks(10.0);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[0].label, "00:10");
    let last: Vec<&str> = ticks[7..].iter().map(|t| t.label.as_str()).collect();
    assert_eq!(last, vec!["00:03", "00:02", "00:01", "00:00"]);
    assert_eq!(ticks[10].time, 10.0);
}

#[test]
fn fractional_countdown_gets_final_zero_tick() {
    let ticks = timer_ticks(2.5);
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["00:03", "00:02", "00:01", "00:00"]);
    assert_eq!(ticks[3].time, 2.5);
}

#[test]
fn beeps_precede_the_end_of_the_countdown() {
    assert_eq!(beep_schedule(10.0, 3), vec![7.0, 8.0, 9.0]);
    assert_eq!(beep_schedule(2.0, 3), vec![0.0, 1.0]);
    assert!(beep_schedule(0.0, 3).is_empty());
    assert!(beep_schedule(10.0, 0).is_empty());
}

#[test]
fn events_are_sorted_with_reveal_at_countdown_end() {
    let cfg = TimelineConfig {
        fade_in_sec: 0.5,
        fade_out_sec: 1.0,
        ..config(10.0)
    };
    let events = schedule_events(&cfg).unwrap();
    assert!(events.windows(2).all(|w| w[0].time <= w[1].time));
    assert_eq!(events[0].kind, EventKind::FadeIn);

    let reveal = events.iter().find(|e| e.kind == EventKind::Reveal).unwrap();
    assert_eq!(reveal.time, 10.0);
    assert_eq!(reveal.duration, Some(3.0));

    let fade_out = events.last().unwrap();
    assert_eq!(fade_out.kind, EventKind::FadeOut);
    assert_eq!(fade_out.time, 12.0);

    // The final tick and the reveal share t=10; the tick comes first.
    let at_ten: Vec<EventKind> = events
        .iter()
        .filter(|e| e.time == 10.0)
        .map(|e| e.kind)
        .collect();
    assert_eq!(at_ten, vec![EventKind::TimerTick, EventKind::Reveal]);
}

#[test]
fn hidden_timer_schedules_no_ticks() {
    let cfg = TimelineConfig {
        timer_visible: false,
        ..config(5.0)
    };
    let events = schedule_events(&cfg).unwrap();
    assert!(events.iter().all(|e| e.kind != EventKind::TimerTick));
    assert_eq!(
        events.iter().filter(|e| e.kind == EventKind::Beep).count(),
        3
    );
}

#[test]
fn invalid_timings_are_rejected() {
    assert!(schedule_events(&config(-1.0)).is_err());
    assert!(schedule_events(&config(f64::NAN)).is_err());

    let fade_too_long = TimelineConfig {
        fade_out_sec: 13.0,
        ..config(10.0)
    };
    let err = schedule_events(&fade_too_long).unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfiguration(_)));

    let reveal_past_end = TimelineConfig {
        clip_duration_sec: Some(8.0),
        ..config(10.0)
    };
    assert!(schedule_events(&reveal_past_end).is_err());
}

#[test]
fn explicit_clip_duration_truncates_reveal_hold() {
    let cfg = TimelineConfig {
        clip_duration_sec: Some(11.5),
        ..config(10.0)
    };
    let events = schedule_events(&cfg).unwrap();
    let reveal = events.iter().find(|e| e.kind == EventKind::Reveal).unwrap();
    assert_eq!(reveal.duration, Some(1.5));
}

#[test]
fn event_kinds_serialize_with_wire_names() {
    let json = serde_json::to_string(&EventKind::TimerTick).unwrap();
    assert_eq!(json, "\"timerTick\"");
    let json = serde_json::to_string(&EventKind::FadeOut).unwrap();
    assert_eq!(json, "\"fadeout\"");
}

#[test]
fn countdown_length_is_bounded() {
    assert!(config(MAX_COUNTDOWN_SEC).validate().is_ok());
    let err = schedule_events(&config(1e15)).unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfiguration(_)), "{err}");
    assert!(timer_ticks(1e15).is_empty());
    assert_eq!(timer_ticks(MAX_COUNTDOWN_SEC)[0].label, "60:00");
}
