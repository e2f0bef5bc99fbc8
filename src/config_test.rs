#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_config_is_valid() {
    assert!(EngineConfig::default().validate().is_ok());
}

#[test]
fn defaults_mirror_constants() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.snap_threshold, 12.0);
    assert_eq!(cfg.wall_snap_radius, 18.0);
    assert_eq!(cfg.angle_snap_deg, 15.0);
    assert_eq!(cfg.paste_offset, 48.0);
    assert_eq!(cfg.history_limit, 100);
    assert_eq!(cfg.default_label_text, "Label");
}

#[test]
fn partial_json_keeps_defaults() {
    let Ok(cfg) = EngineConfig::from_json(r#"{ "pasteOffset": 24, "angleSnapDeg": 45 }"#) else {
        panic!("config should parse");
    };
    assert_eq!(cfg.paste_offset, 24.0);
    assert_eq!(cfg.angle_snap_deg, 45.0);
    assert_eq!(cfg.zoom_factor, 1.08);
}

#[test]
fn rejects_malformed_json() {
    assert!(matches!(EngineConfig::from_json("[1, 2"), Err(ConfigError::Json(_))));
}

#[test]
fn rejects_non_positive_radius() {
    let result = EngineConfig::from_json(r#"{ "snapThreshold": 0 }"#);
    assert!(matches!(result, Err(ConfigError::Invalid { field: "snapThreshold", .. })));
}

#[test]
fn rejects_inverted_zoom_range() {
    let cfg = EngineConfig { min_zoom: 2.0, max_zoom: 1.0, ..EngineConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { field: "maxZoom", .. })));
}

#[test]
fn rejects_zero_history() {
    let cfg = EngineConfig { history_limit: 0, ..EngineConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { field: "historyLimit", .. })));
}

#[test]
fn rejects_shrinking_zoom_factor() {
    let cfg = EngineConfig { zoom_factor: 0.9, ..EngineConfig::default() };
    let err = cfg.validate().err().map(|e| e.to_string()).unwrap_or_default();
    assert_eq!(err, "zoomFactor must be greater than 1, got 0.9");
}
