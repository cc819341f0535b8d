
use chrono::{TimeZone, Utc};
use search_capture::config::FileNamingConfig;
use search_capture::naming::{generate_path, output_path, query_fingerprint, query_preview};
use tempfile::tempdir;

use crate::test_utils::naming_in;

#[test]
fn fingerprint_is_truncated_md5() {
    assert_eq!(query_fingerprint("hello"), "5d41402a");
    assert_eq!(query_fingerprint("hello").len(), 8);
}

#[test]
fn empty_query_uses_default_fingerprint() {
    assert_eq!(query_fingerprint(""), "default");
}

#[test]
fn path_follows_template() {
    let dir = tempdir().unwrap();
    let config = naming_in(dir.path());
    let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();

    let path = generate_path(&config, "deepseek-r1-search", "hello", &ts).unwrap();
    assert_eq!(path, dir.path().join("deepseek-r1-search_20240309_070501_5d41402a.txt"));
}

#[test]
fn missing_output_dir_is_created() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let config = naming_in(&nested);
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let path = generate_path(&config, "hunyuan", "", &ts).unwrap();
    assert!(nested.is_dir());
    assert_eq!(path.file_name().unwrap(), "hunyuan_20240101_000000_default.txt");
}

#[test]
fn long_query_does_not_change_the_path() {
    let dir = tempdir().unwrap();
    let config = FileNamingConfig { max_query_length: 5, ..naming_in(dir.path()) };
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let query = "a question much longer than five characters";

    let short = generate_path(&config, "m", query, &ts).unwrap();
    let long = generate_path(&FileNamingConfig { max_query_length: 500, ..config.clone() }, "m", query, &ts).unwrap();
    assert_eq!(short, long);
    assert!(short.to_string_lossy().contains(&query_fingerprint(query)));
}

#[test]
fn custom_template_and_timestamp_format() {
    let dir = tempdir().unwrap();
    let config = FileNamingConfig {
        filename_format: "{query_hash}-{model}-{timestamp}.log".to_string(),
        timestamp_format: "%Y%m%d".to_string(),
        ..naming_in(dir.path())
    };
    let ts = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();

    let path = generate_path(&config, "hunyuan-t1", "hello", &ts).unwrap();
    assert_eq!(path.file_name().unwrap(), "5d41402a-hunyuan-t1-20251231.log");
}

#[test]
fn output_path_uses_current_time() {
    let dir = tempdir().unwrap();
    let path = output_path(&naming_in(dir.path()), "deepseek-v3", "hello").unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("deepseek-v3_"));
    assert!(name.ends_with("_5d41402a.txt"));
}

#[test]
fn preview_marks_truncation() {
    assert_eq!(query_preview("abcdef", 3), "abc...");
    assert_eq!(query_preview("abc", 3), "abc");
    assert_eq!(query_preview("就业率较高", 2), "就业...");
}
