
use search_capture::error::PersistenceError;
use search_capture::extract::{extract, CitationRecord};
use serde_json::json;
use tempfile::tempdir;

use crate::test_utils::{init_tracing, search_line, text_line, write_capture};

#[test]
fn end_to_end_text_and_single_citation() {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = write_capture(
        dir.path(),
        "capture.txt",
        &[
            r#"{"type":"text","msg":"Hello "}"#,
            r#"{"type":"text","msg":"world"}"#,
            r#"{"type":"searchGuid","docs":[{"title":"A","url":"http://x","webSiteSource":"X","publish_time":"2024","quote":"short quote"}]}"#,
        ],
    );

    let extraction = extract(&path).unwrap();
    assert_eq!(extraction.narrative, "Hello world");
    assert_eq!(
        extraction.citations,
        vec![CitationRecord {
            title: "A".into(),
            url: "http://x".into(),
            source: "X".into(),
            publish_time: "2024".into(),
            quote: "short quote".into(),
        }]
    );
}

#[test]
fn empty_file_yields_nothing() {
    let dir = tempdir().unwrap();
    let path = write_capture(dir.path(), "empty.txt", &[]);

    let extraction = extract(&path).unwrap();
    assert_eq!(extraction.narrative, "");
    assert!(extraction.citations.is_empty());
}

#[test]
fn narrative_is_concatenated_without_separator() {
    let dir = tempdir().unwrap();
    let parts = ["第一", " second ", "", "third\n"];
    let lines: Vec<String> = parts.iter().map(|p| text_line(p)).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let path = write_capture(dir.path(), "text.txt", &refs);

    let extraction = extract(&path).unwrap();
    assert_eq!(extraction.narrative, parts.concat());
}

#[test]
fn invalid_line_between_text_lines_is_skipped() {
    let dir = tempdir().unwrap();
    let path = write_capture(
        dir.path(),
        "noisy.txt",
        &[r#"{"type":"text","msg":"before "}"#, r#"{"type":"text","msg": oops"#, r#"{"type":"text","msg":"after"}"#],
    );

    let extraction = extract(&path).unwrap();
    assert_eq!(extraction.narrative, "before after");
}

#[test]
fn citation_count_matches_documents_in_order() {
    let dir = tempdir().unwrap();
    let first = search_line(json!([{ "title": "1" }, { "title": "2" }]));
    let second = search_line(json!([{ "title": "3" }]));
    let path = write_capture(
        dir.path(),
        "docs.txt",
        &[&first, r#"{"type":"text","msg":"between"}"#, &second, r#"{"type":"searchGuid","docs":[]}"#],
    );

    let extraction = extract(&path).unwrap();
    let titles: Vec<&str> = extraction.citations.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["1", "2", "3"]);
}

#[test]
fn missing_fields_default_to_empty() {
    let dir = tempdir().unwrap();
    let line = search_line(json!([{ "title": "No quote", "url": "http://y" }]));
    let path = write_capture(dir.path(), "partial.txt", &[&line]);

    let extraction = extract(&path).unwrap();
    let citation = &extraction.citations[0];
    assert_eq!(citation.title, "No quote");
    assert_eq!(citation.url, "http://y");
    assert_eq!(citation.source, "");
    assert_eq!(citation.publish_time, "");
    assert_eq!(citation.quote, "");
}

#[test]
fn long_quote_is_truncated_at_200_chars() {
    let dir = tempdir().unwrap();
    let exact = "a".repeat(200);
    let over = "b".repeat(201);
    let line = search_line(json!([{ "quote": exact }, { "quote": over }]));
    let path = write_capture(dir.path(), "quotes.txt", &[&line]);

    let extraction = extract(&path).unwrap();
    assert_eq!(extraction.citations[0].quote, exact);
    assert_eq!(extraction.citations[1].quote, format!("{}...", "b".repeat(200)));
}

#[test]
fn unknown_types_and_shapes_are_ignored() {
    let dir = tempdir().unwrap();
    let path = write_capture(
        dir.path(),
        "mixed.txt",
        &[
            "",
            "   ",
            "plain streamed text",
            r#"{"type":"thinking","msg":"hidden"}"#,
            r#"{"msg":"no type"}"#,
            r#"{"type":"text"}"#,
            r#"{"type":"searchGuid"}"#,
            r#"[1,2,3]"#,
            r#"  {"type":"text","msg":"kept"}  "#,
        ],
    );

    let extraction = extract(&path).unwrap();
    assert_eq!(extraction.narrative, "kept");
    assert!(extraction.citations.is_empty());
}

#[test]
fn extraction_is_idempotent() {
    let dir = tempdir().unwrap();
    let docs = search_line(json!([{ "title": "T", "quote": "q".repeat(250) }]));
    let path = write_capture(dir.path(), "again.txt", &[r#"{"type":"text","msg":"x"}"#, &docs]);

    let first = extract(&path).unwrap();
    let second = extract(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempdir().unwrap();
    let err = extract(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, PersistenceError::Open { .. }));
}
