use std::path::PathBuf;

use globe_viewer::config::GlobeConfig;
use globe_viewer::core::ResizePolicy;
use globe_viewer::GlobeError;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("globe-viewer-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_defaults_match_stock_scene() {
    let config = GlobeConfig::default();
    assert_eq!(config.camera.fov_degrees, 75.0);
    assert_eq!(config.camera.distance, 5.0);
    assert_eq!(config.globe.axial_tilt_degrees, 23.4);
    assert_eq!(config.globe.detail, 12);
    assert_eq!(config.globe.spin_rate, 0.002);
    assert_eq!(config.globe.clouds_spin_rate, 0.0028);
    assert_eq!(config.stars.count, 2000);
    assert_eq!(config.fresnel.rim_color, 0x0088ff);
    assert_eq!(config.controls.damping_factor, 0.03);
    assert_eq!(config.window.resize_policy, ResizePolicy::Track);
    assert!(!config.loading.enabled);
}

#[test]
fn test_partial_json_overrides_only_named_fields() {
    let path = temp_file(
        "partial.json",
        r#"{
            "stars": { "count": 10, "seed": 5 },
            "window": { "resize_policy": "frozen" },
            "loading": { "enabled": true }
        }"#,
    );

    let config = GlobeConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.stars.count, 10);
    assert_eq!(config.stars.seed, Some(5));
    assert_eq!(config.stars.max_radius, 50.0);
    assert_eq!(config.window.resize_policy, ResizePolicy::Frozen);
    assert_eq!(config.window.width, 1280);
    assert!(config.loading.enabled);
    assert_eq!(config.globe, GlobeConfig::default().globe);
}

#[test]
fn test_json_round_trip() {
    let mut config = GlobeConfig::default();
    config.globe.clouds_scale = 1.01;
    config.textures.directory = PathBuf::from("assets/earth");

    let json = serde_json::to_string_pretty(&config).unwrap();
    let back: GlobeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("globe-viewer-does-not-exist.json");
    let err = GlobeConfig::load(&path).unwrap_err();
    assert!(matches!(err, GlobeError::ConfigIo { .. }));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let path = temp_file("broken.json", "{ \"stars\": ");
    let err = GlobeConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, GlobeError::ConfigParse { .. }));
}

#[test]
fn test_inverted_star_shell_is_rejected() {
    let path = temp_file(
        "inverted.json",
        r#"{ "stars": { "min_radius": 60.0, "max_radius": 50.0 } }"#,
    );
    let err = GlobeConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, GlobeError::InvalidConfig(_)));
}

#[test]
fn test_validation_catches_bad_values() {
    let cases: [fn(&mut GlobeConfig); 7] = [
        |c| c.window.width = 0,
        |c| c.camera.fov_degrees = 180.0,
        |c| c.camera.near = 0.0,
        |c| c.controls.damping_factor = 1.5,
        |c| c.controls.min_distance = 200.0,
        |c| c.globe.radius = 0.0,
        |c| c.loading.fade_seconds = -1.0,
    ];

    for (i, mutate) in cases.into_iter().enumerate() {
        let mut config = GlobeConfig::default();
        mutate(&mut config);
        assert!(config.validate().is_err(), "case {} passed validation", i);
    }
}

#[test]
fn test_shipped_sample_config_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/globe.json");
    let config = GlobeConfig::load(&path).unwrap();
    config.validate().unwrap();

    assert!(config.loading.enabled);
    assert_eq!(config.stars.seed, Some(2024));
    assert_eq!(config.window.resize_policy, ResizePolicy::Track);
    assert_eq!(config.fresnel.rim_color, 0x0088ff);
    assert_eq!(config.globe.detail, 12);
    assert_eq!(config.camera.near, GlobeConfig::default().camera.near);

    let json = serde_json::to_string(&config).unwrap();
    let back: GlobeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
