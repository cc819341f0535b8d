use search_capture::extract::CitationRecord;
use search_capture::report::{
    render, render_to_string, CONTENT_HEADING, LINKS_HEADING, PUBLISHED_LABEL, SOURCE_LABEL, SUMMARY_LABEL, URL_LABEL,
};
use tempfile::tempdir;

fn citation(n: u32) -> CitationRecord {
    CitationRecord {
        title: format!("Title {n}"),
        url: format!("http://example.test/{n}"),
        source: format!("Site {n}"),
        publish_time: "2024-05-01".to_string(),
        quote: format!("quote {n}"),
    }
}

#[test]
fn report_layout() {
    let report = render_to_string("Hello world", &[citation(1), citation(2)]);
    let banner = "=".repeat(50);
    let separator = "-".repeat(30);
    let expected = format!(
        "{banner}\nContent\n{banner}\nHello world\n\n\
         {banner}\nRelated Links\n{banner}\n\
         \n1. Title 1\n   Source: Site 1\n   Published: 2024-05-01\n   URL: http://example.test/1\n   Summary: quote 1\n{separator}\n\
         \n2. Title 2\n   Source: Site 2\n   Published: 2024-05-01\n   URL: http://example.test/2\n   Summary: quote 2\n{separator}\n"
    );
    assert_eq!(report, expected);
}

#[test]
fn no_citations_still_renders_both_sections() {
    let report = render_to_string("", &[]);
    let banner = "=".repeat(50);
    assert!(report.starts_with(&format!("{banner}\nContent\n{banner}\n\n\n")));
    assert!(report.ends_with(&format!("Related Links\n{banner}\n")));
}

#[test]
fn render_overwrites_destination() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("report.txt");
    std::fs::write(&dest, "stale contents that are much longer than needed".repeat(100)).unwrap();

    render("fresh", &[citation(7)], &dest).unwrap();

    let written = std::fs::read_to_string(&dest).unwrap();
    assert_eq!(written, render_to_string("fresh", &[citation(7)]));
    assert!(!written.contains("stale"));
}

#[test]
fn labels_come_from_the_heading_constants() {
    let report = render_to_string("body", &[citation(3)]);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[1], CONTENT_HEADING);
    assert!(lines.contains(&LINKS_HEADING));
    assert!(lines.contains(&format!("   {SOURCE_LABEL}: Site 3").as_str()));
    assert!(lines.contains(&format!("   {PUBLISHED_LABEL}: 2024-05-01").as_str()));
    assert!(lines.contains(&format!("   {URL_LABEL}: http://example.test/3").as_str()));
    assert!(lines.contains(&format!("   {SUMMARY_LABEL}: quote 3").as_str()));
}
