use super::*;
use serde_json::json;

#[test]
fn defaults_match_a_ten_second_card() {
    let cfg = LayoutConfig::new("I i", "Ice", "冰");
    assert_eq!(cfg.countdown_sec, 10.0);
    assert_eq!(cfg.reveal_hold_sec, 3.0);
    assert_eq!(cfg.canvas, Canvas { width: 1920, height: 1080 });
    assert_eq!(cfg.fps, 30.0);
    assert_eq!(cfg.beep_count, 3);
    assert!(cfg.timer_visible && cfg.progress_bar && cfg.letters_as_image);
    assert_eq!(cfg.total_duration(), 13.0);
    cfg.validate().unwrap();
}

#[test]
fn loose_map_coerces_legacy_values() {
    let cfg = LayoutConfig::from_loose_map(&json!({
        "letters": "I i",
        "word_en": "Ice",
        "word_zh": "ㄅㄧㄥ冰",
        "countdown_sec": "12.5",
        "reveal_hold_sec": 4,
        "timer_visible": 0,
        "progress_bar": "true",
        "letters_as_image": "FALSE",
        "canvas": [1280, 720],
        "fps": "24",
        "beep_count": "2",
    }))
    .unwrap();

    assert_eq!(cfg.countdown_sec, 12.5);
    assert_eq!(cfg.reveal_hold_sec, 4.0);
    assert!(!cfg.timer_visible);
    assert!(cfg.progress_bar);
    assert!(!cfg.letters_as_image);
    assert_eq!(cfg.canvas, Canvas { width: 1280, height: 720 });
    assert_eq!(cfg.fps, 24.0);
    assert_eq!(cfg.beep_count, 2);
    assert_eq!(cfg.word_zh, "ㄅㄧㄥ冰");
}

#[test]
fn loose_map_accepts_object_canvas_and_ignores_unknown_keys() {
    let cfg = LayoutConfig::from_loose_map(&json!({
        "word_en": "Cat",
        "canvas": {"width": 1080, "height": 1920},
        "background": "black",
        "music": null,
    }))
    .unwrap();
    assert_eq!(cfg.canvas, Canvas { width: 1080, height: 1920 });
    assert_eq!(cfg.word_en, "Cat");
    assert_eq!(cfg.countdown_sec, 10.0);
}

#[test]
fn loose_map_rejects_garbage() {
    assert!(matches!(
        LayoutConfig::from_loose_map(&json!("nope")),
        Err(ReelError::Serde(_))
    ));
    assert!(matches!(
        LayoutConfig::from_loose_map(&json!({"countdown_sec": "ten"})),
        Err(ReelError::Serde(_))
    ));
    assert!(matches!(
        LayoutConfig::from_loose_map(&json!({"timer_visible": 2})),
        Err(ReelError::Serde(_))
    ));
    assert!(matches!(
        LayoutConfig::from_loose_map(&json!({"beep_count": 1.5})),
        Err(ReelError::Serde(_))
    ));
}

#[test]
fn loose_map_runs_validation() {
    assert!(matches!(
        LayoutConfig::from_loose_map(&json!({"countdown_sec": -1})),
        Err(ReelError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        LayoutConfig::from_loose_map(&json!({"canvas": [0, 720]})),
        Err(ReelError::InvalidConfiguration(_))
    ));
}

#[test]
fn validate_rejects_long_fades() {
    let mut cfg = LayoutConfig::new("A", "A", "");
    cfg.fade_out_sec = 13.0;
    assert!(matches!(
        cfg.validate(),
        Err(ReelError::InvalidConfiguration(_))
    ));
}

#[test]
fn timeline_view_carries_timing() {
    let mut cfg = LayoutConfig::new("A", "A", "");
    cfg.fade_in_sec = 0.5;
    cfg.timer_visible = false;
    let t = cfg.timeline();
    assert_eq!(t.countdown_sec, 10.0);
    assert_eq!(t.fade_in_sec, 0.5);
    assert!(!t.timer_visible);
    assert_eq!(t.clip_duration_sec, None);
}

#[test]
fn validate_bounds_countdown_frames() {
    let mut cfg = LayoutConfig::new("A", "A", "");
    cfg.countdown_sec = 1e12;
    assert!(matches!(
        cfg.validate(),
        Err(ReelError::InvalidConfiguration(_))
    ));

    let mut cfg = LayoutConfig::new("A", "A", "");
    cfg.fps = 1e9;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("progress steps"), "{err}");
}
