//! Tests for `write_json`.

use std::collections::BTreeMap;

use shoedex_core::ProductRecord;
use shoedex_scraper::{write_json, ScraperError};

fn records() -> Vec<ProductRecord> {
    vec![
        ProductRecord {
            title: "Nike Air Force 1 '07".to_owned(),
            subtitle: "Giày Nam".to_owned(),
            price: 2_929_000,
            source_url: "https://www.nike.com/vn/t/air-force-1-07/CW2288-111".to_owned(),
            images_by_color: BTreeMap::from([
                ("Trắng/Trắng".to_owned(), "https://static.nike.com/af1-white.png".to_owned()),
                ("Black".to_owned(), "https://static.nike.com/af1-black.png".to_owned()),
            ]),
            available_sizes: vec!["EU 40".to_owned(), "EU 42.5".to_owned()],
        },
        ProductRecord {
            title: "Nike Pegasus 41".to_owned(),
            subtitle: "Giày Chạy Bộ Nam".to_owned(),
            price: 3_829_000,
            source_url: "https://www.nike.com/vn/t/pegasus-41/FD2722-002".to_owned(),
            images_by_color: BTreeMap::from([(
                "Default".to_owned(),
                "https://static.nike.com/a/600x600_144_600.jpg".to_owned(),
            )]),
            available_sizes: Vec::new(),
        },
    ]
}

#[test]
fn round_trip_preserves_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nike_products.json");
    let original = records();

    write_json(&original, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: Vec<ProductRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn non_ascii_is_written_literally_and_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    write_json(&records(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"subtitle\": \"Giày Nam\""), "got: {text}");
    assert!(text.contains("Trắng/Trắng"));
    assert!(!text.contains("\\u"), "non-ASCII must not be escaped");
    assert!(text.starts_with("[\n    {"), "expected four-space indent, got: {text}");
    assert!(text.contains("\"url\": \"https://www.nike.com/vn/t/pegasus-41/FD2722-002\""));
    assert!(text.contains("\"image_url\""));
}

#[test]
fn existing_file_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    std::fs::write(&path, "stale content that is longer than an empty array").unwrap();

    write_json(&[], &path).unwrap();

    let parsed: Vec<ProductRecord> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn unwritable_path_is_a_sink_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("out.json");

    let err = write_json(&records(), &path).unwrap_err();
    assert!(
        matches!(err, ScraperError::SinkWrite { .. }),
        "expected SinkWrite, got: {err:?}"
    );
}

#[cfg(target_os = "linux")]
#[test]
fn io_failure_during_serialization_is_a_sink_write_error() {
    // Enough records to overflow the write buffer before the final flush.
    let many: Vec<ProductRecord> = records().into_iter().cycle().take(400).collect();
    let err = write_json(&many, std::path::Path::new("/dev/full")).unwrap_err();
    assert!(
        matches!(err, ScraperError::SinkWrite { ref path, .. } if path == "/dev/full"),
        "expected SinkWrite, got: {err:?}"
    );
}
