//! Loading validation configuration from JSON.

use std::path::Path;

use benchcheck_core::{BenchmarkMode, ContentDigest, ValidationConfig, ValidationError};

const DIGEST: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

#[test]
fn full_document_parses() {
    let json = format!(
        r#"{{
            "scenes": {{
                "scenes/luxball/render.cfg": {{
                    "expected_digest": "{DIGEST}",
                    "reference_images": {{
                        "ocl_gpu": "reference.raw",
                        "native_path": "reference-native.raw"
                    }}
                }}
            }},
            "asset_filter": {{ "extensions": ["lxs", "ply"], "excluded_dir": "vr" }},
            "tolerance": {{ "gamma": 2.4, "luminance": 80.0, "color_tolerance": 5.0 }}
        }}"#
    );

    let config = ValidationConfig::from_json_str(&json).unwrap();
    let profile = config.profile("scenes/luxball/render.cfg").unwrap();
    assert_eq!(profile.expected_digest, DIGEST.parse::<ContentDigest>().unwrap());
    assert_eq!(
        profile.reference_for(BenchmarkMode::NativePath).unwrap(),
        Path::new("reference-native.raw")
    );
    assert!(profile.reference_for(BenchmarkMode::OclCpu).is_err());
    assert_eq!(config.asset_filter.excluded_dir, "vr");
    assert_eq!(config.tolerance.gamma, 2.4);
}

#[test]
fn omitted_sections_use_defaults() {
    let json = format!(r#"{{ "scenes": {{ "a/b.cfg": {{ "expected_digest": "{DIGEST}" }} }} }}"#);
    let config = ValidationConfig::from_json_str(&json).unwrap();

    assert!(config.is_validated("a/b.cfg"));
    assert_eq!(config.asset_filter.excluded_dir, "luxvr-scene");
    assert!(config.asset_filter.extensions.iter().any(|e| e == "lxs"));
    assert_eq!(config.tolerance.luminance, 100.0);
}

#[test]
fn bad_digest_is_config_error() {
    let json = r#"{ "scenes": { "a/b.cfg": { "expected_digest": "not-a-digest" } } }"#;
    assert!(matches!(
        ValidationConfig::from_json_str(json),
        Err(ValidationError::Config(_))
    ));
}

#[test]
fn from_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("benchcheck.json");
    let config = ValidationConfig::default().with_scene(
        "scenes/sala/render.cfg",
        benchcheck_core::SceneProfile::uniform_reference(
            ContentDigest::compute(b"sala"),
            "reference.raw",
        ),
    );
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = ValidationConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ValidationConfig::from_json_file(&dir.path().join("absent.json")),
        Err(ValidationError::Io(_))
    ));
}
