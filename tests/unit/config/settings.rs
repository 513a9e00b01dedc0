use super::*;

#[test]
fn defaults_are_valid_and_match_reference_values() {
    let cfg = SynthConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.size_px, 256);
    assert_eq!(cfg.mask_threshold, 0.3);
    assert_eq!(cfg.strokes, StrokeCountRange { min: 3, max: 4 });
    assert_eq!(cfg.boxy_probability, 0.05);
    assert_eq!(cfg.acceptance.max_overlap_ratio, 0.25);
    assert_eq!(cfg.acceptance.max_span_ratio, 0.4);
    assert_eq!(cfg.viewbox, ViewBox::default());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = SynthConfig::from_json_str(
        r#"{ "size_px": 64, "strokes": { "min": 1, "max": 5 }, "acceptance": { "max_span_ratio": 0.5 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.size_px, 64);
    assert_eq!(cfg.strokes, StrokeCountRange { min: 1, max: 5 });
    assert_eq!(cfg.acceptance.max_span_ratio, 0.5);
    assert_eq!(cfg.acceptance.max_overlap_ratio, 0.25);
    assert_eq!(cfg.sampler, SamplerConfig::default());
}

#[test]
fn partial_nested_sections_keep_field_defaults() {
    let cfg = SynthConfig::from_json_str(
        r#"{ "strokes": { "max": 5 }, "viewbox": { "width": 500.0 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.strokes, StrokeCountRange { min: 3, max: 5 });
    assert_eq!(cfg.viewbox.width, 500.0);
    assert_eq!(cfg.viewbox.min_x, -10.0);
    assert_eq!(cfg.viewbox.height, 1000.0);
    cfg.validate().unwrap();

    let cfg = SynthConfig::from_json_str(r#"{ "strokes": {} }"#).unwrap();
    assert_eq!(cfg.strokes, StrokeCountRange::default());
}

#[test]
fn json_roundtrip_preserves_config() {
    let cfg = SynthConfig {
        size_px: 128,
        boxy_probability: 0.0,
        ..SynthConfig::default()
    };
    let back = SynthConfig::from_json_str(&cfg.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn malformed_json_is_serde_error() {
    let err = SynthConfig::from_json_str("{ size_px: }").unwrap_err();
    assert!(matches!(err, SynthError::Serde(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let bad = [
        SynthConfig {
            size_px: 0,
            ..SynthConfig::default()
        },
        SynthConfig {
            mask_threshold: 1.0,
            ..SynthConfig::default()
        },
        SynthConfig {
            strokes: StrokeCountRange { min: 0, max: 2 },
            ..SynthConfig::default()
        },
        SynthConfig {
            strokes: StrokeCountRange { min: 4, max: 3 },
            ..SynthConfig::default()
        },
        SynthConfig {
            boxy_probability: 1.5,
            ..SynthConfig::default()
        },
        SynthConfig {
            max_attempts: 0,
            ..SynthConfig::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(cfg.validate(), Err(SynthError::Validation(_))));
    }
}

#[test]
fn missing_config_file_is_reported() {
    let err = SynthConfig::load(Path::new("target/does-not-exist.json")).unwrap_err();
    assert!(err.to_string().contains("read config"));
}
