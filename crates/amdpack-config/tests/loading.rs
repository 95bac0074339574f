use std::fs;

use amdpack_config::{
    load_configuration, BundleItem, CompressionType, ConfigDiscovery, ConfigError,
};
use tempfile::TempDir;

#[test]
fn loads_json_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("amdpack.json");
    fs::write(
        &path,
        r#"{
            "baseUrl": "scripts",
            "paths": { "jquery": "lib/jquery-1.9.1" },
            "autoBundles": {
                "main": {
                    "outputPath": "bundles",
                    "compressionType": "standard",
                    "include": [{ "file": "app/main" }, { "directory": "app/views" }],
                    "exclude": [{ "file": "jquery" }]
                }
            }
        }"#,
    )
    .unwrap();

    let config = load_configuration(&[&path]).unwrap();
    let bundle = config.bundle("main").unwrap();

    assert_eq!(bundle.compression_type, CompressionType::Standard);
    assert_eq!(
        bundle.includes,
        vec![
            BundleItem::File("app/main".into()),
            BundleItem::Directory("app/views".into())
        ]
    );
    assert_eq!(bundle.excludes, vec![BundleItem::File("jquery".into())]);
    assert_eq!(bundle.base_url, dir.path().join("scripts"));
    assert_eq!(config.paths["jquery"], "lib/jquery-1.9.1");
}

#[test]
fn loads_toml_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("amdpack.toml");
    fs::write(
        &path,
        r#"
baseUrl = "js"

[autoBundles.admin]
outputPath = "dist/admin.js"
include = [{ directory = "admin" }]
"#,
    )
    .unwrap();

    let config = load_configuration(&[&path]).unwrap();
    let bundle = config.bundle("admin").unwrap();

    assert_eq!(bundle.includes, vec![BundleItem::Directory("admin".into())]);
    assert_eq!(bundle.output_path.to_str(), Some("dist/admin.js"));
    assert_eq!(bundle.config_path, path);
}

#[test]
fn malformed_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("amdpack.json");
    fs::write(&path, r#"{ "autoBundles": { "main": { "include": "nope" } } }"#).unwrap();

    let err = load_configuration(&[&path]).unwrap_err();
    match err {
        ConfigError::Parse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn missing_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = load_configuration(&[dir.path().join("missing.json")]).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("amdpack.yaml");
    fs::write(&path, "baseUrl: .").unwrap();

    let err = load_configuration(&[&path]).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn discovery_merges_all_documents() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("amdpack.json"),
        r#"{ "autoBundles": { "main": { "outputPath": "out", "include": [{ "file": "a" }] } } }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("admin.amdpack.json"),
        r#"{ "autoBundles": { "admin": { "outputPath": "out", "include": [{ "file": "b" }] } } }"#,
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    let ids: Vec<_> = config.bundles.iter().map(|b| b.id.as_str()).collect();

    assert_eq!(ids, vec!["main", "admin"]);
    assert_eq!(config.documents.len(), 2);
    assert_ne!(
        config.bundle("main").unwrap().config_path,
        config.bundle("admin").unwrap().config_path
    );
}
