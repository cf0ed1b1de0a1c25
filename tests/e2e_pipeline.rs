// LogPage - tests/e2e_pipeline.rs
//
// End-to-end tests for the request pipeline.
//
// These tests exercise the real filesystem, real config defaults, real
// chrono timestamp arithmetic and the real regex tag matcher, from a raw
// log file on disk to a rendered page. No mocks, no stubs.

use logpage::app::request::{RawRequest, RequestContext};
use logpage::core::export::{write_view, OutputFormat};
use logpage::core::model::PageView;
use logpage::platform::config::AppConfig;
use logpage::util::error::{InputError, LogPageError};
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn serve(path: &PathBuf, raw: RawRequest, config: &AppConfig) -> PageView {
    let context = RequestContext::open(path, config).expect("fixture should open");
    let (request, issues) = raw.validate(config);
    assert!(issues.is_empty(), "unexpected validation issues: {issues:?}");
    context.render(&request, config).expect("render should succeed")
}

fn line_numbers(view: &PageView) -> Vec<u64> {
    view.rows
        .iter()
        .map(|r| r[0].parse().expect("first cell is a line number"))
        .collect()
}

fn filters(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

// =============================================================================
// Fixture-driven requests
// =============================================================================

/// Tag filtering is case-insensitive and keeps dateless lines that carry the tag.
#[test]
fn e2e_filter_by_tag() {
    let view = serve(
        &fixture("device_sample.txt"),
        RawRequest {
            filters: filters(&["System"]),
            ..Default::default()
        },
        &AppConfig::default(),
    );
    assert_eq!(line_numbers(&view), vec![1, 6, 8, 11]);
    assert_eq!(
        view.columns,
        vec!["Line Number", "Date", "Time", "Tag 1", "Tag 2", "Tag 3", "Tag 4"]
    );
    assert!(view.rows.iter().all(|r| r.len() == view.columns.len()));
    assert_eq!(view.total_pages, 1);
}

/// Shift, range and tag filters combined; the range sees shifted timestamps.
#[test]
fn e2e_shift_then_range_then_tag() {
    let view = serve(
        &fixture("device_sample.txt"),
        RawRequest {
            filters: filters(&["system"]),
            shift: Some("2".into()),
            start: Some("2024-01-02".into()),
            end: Some("2024-01-05".into()),
            ..Default::default()
        },
        &AppConfig::default(),
    );
    assert_eq!(line_numbers(&view), vec![6, 8, 11]);
    assert_eq!(view.rows[1][1], "2024-01-02");
    assert_eq!(view.rows[1][2], "(02:15:00):");
    assert_eq!(view.rows[2][2], "(10:45:10):");
}

/// Dateless lines (including an impossible calendar date) survive any range.
#[test]
fn e2e_range_keeps_dateless_lines() {
    let view = serve(
        &fixture("device_sample.txt"),
        RawRequest {
            start: Some("2024-01-02".into()),
            end: Some("2024-01-02".into()),
            ..Default::default()
        },
        &AppConfig::default(),
    );
    assert_eq!(line_numbers(&view), vec![6, 7, 8]);
}

/// Reversed dates are swapped rather than producing an empty result.
#[test]
fn e2e_reversed_dates_are_swapped() {
    let view = serve(
        &fixture("device_sample.txt"),
        RawRequest {
            filters: filters(&["data"]),
            start: Some("2024-01-03".into()),
            end: Some("2024-01-01".into()),
            ..Default::default()
        },
        &AppConfig::default(),
    );
    assert_eq!(line_numbers(&view), vec![2, 7, 9]);
}

/// A file without any timestamps gets generic column names and no bounds.
#[test]
fn e2e_plain_file_generic_columns() {
    let view = serve(
        &fixture("plain_notes.txt"),
        RawRequest {
            start: Some("2024-01-01".into()),
            end: Some("2024-01-31".into()),
            ..Default::default()
        },
        &AppConfig::default(),
    );
    assert_eq!(line_numbers(&view), vec![1, 2, 3, 5]);
    assert_eq!(view.columns[0], "Line Number");
    assert_eq!(view.columns[1], "Column 1");
    assert!(view.bounds.is_none());
}

/// The observed bounds ignore dateless and malformed lines.
#[test]
fn e2e_bounds_scan() {
    let mut context =
        RequestContext::open(&fixture("device_sample.txt"), &AppConfig::default()).unwrap();
    let bounds = context.bounds().expect("fixture has timestamps");
    assert_eq!(bounds.min.to_string(), "2024-01-01 10:00:00");
    assert_eq!(bounds.max.to_string(), "2024-01-05 08:45:10");
}

/// No surviving lines is a distinct outcome, not an error.
#[test]
fn e2e_empty_result_message() {
    let view = serve(
        &fixture("device_sample.txt"),
        RawRequest {
            filters: filters(&["nonexistent"]),
            ..Default::default()
        },
        &AppConfig::default(),
    );
    assert!(view.is_empty_result());
    assert_eq!(view.total_pages, 1);
    assert!(view.rows.is_empty());

    let mut buf = Vec::new();
    write_view(&view, OutputFormat::Text, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "No matching log lines found.\n");
}

// =============================================================================
// Pagination over generated files
// =============================================================================

fn write_generated(dir: &tempfile::TempDir, lines: usize) -> PathBuf {
    let path = dir.path().join("generated.txt");
    let content: String = (0..lines)
        .map(|i| format!("2024-03-01 (08:00:00): [Data] reading {i}\n"))
        .collect();
    fs::write(&path, content).unwrap();
    path
}

/// 2500 matching lines at 1000 per page: three pages, the last holding 500.
#[test]
fn e2e_pagination_2500_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_generated(&dir, 2500);
    let config = AppConfig::default();

    let page = |n: &str| {
        serve(
            &path,
            RawRequest {
                filters: filters(&["data"]),
                page: Some(n.into()),
                ..Default::default()
            },
            &config,
        )
    };

    let p3 = page("3");
    assert_eq!(p3.total_pages, 3);
    assert_eq!(p3.rows.len(), 500);
    assert_eq!(p3.rows[0][0], "2001");
    assert_eq!(p3.rows[499][0], "2500");

    let p4 = page("4");
    assert!(p4.rows.is_empty());
    assert_eq!(p4.total_pages, 3);
    assert_eq!(p4.current_page, 4);
}

/// A memory-mapped file walked in two passes yields the same page as a
/// buffered read.
#[test]
fn e2e_large_file_path_matches_small_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_generated(&dir, 1200);

    let small = AppConfig::default();
    let large = AppConfig {
        large_file_threshold: 16,
        ..AppConfig::default()
    };
    let raw = RawRequest {
        filters: filters(&["data"]),
        page: Some("2".into()),
        ..Default::default()
    };

    let a = serve(&path, raw.clone(), &small);
    let b = serve(&path, raw, &large);
    assert_eq!(a, b);
    assert_eq!(a.rows.len(), 200);
}

/// A configured page size replaces the default.
#[test]
fn e2e_configured_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_generated(&dir, 25);
    let config = AppConfig {
        page_size: 10,
        ..AppConfig::default()
    };
    let view = serve(&path, RawRequest::default(), &config);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.rows.len(), 10);
}

// =============================================================================
// Input validation
// =============================================================================

/// Only configured file types are accepted.
#[test]
fn e2e_rejects_disallowed_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.log");
    fs::write(&path, "2024-01-01 (10:00:00): [System] boot\n").unwrap();

    let result = RequestContext::open(&path, &AppConfig::default());
    assert!(
        matches!(
            result,
            Err(LogPageError::Input(InputError::DisallowedFileName { .. }))
        ),
        "expected DisallowedFileName, got {result:?}"
    );

    let config = AppConfig {
        include_patterns: vec!["*.log".to_string()],
        ..AppConfig::default()
    };
    assert!(RequestContext::open(&path, &config).is_ok());
}

/// Bad parameters degrade to neutral values and are reported, not fatal.
#[test]
fn e2e_bad_parameters_degrade_gracefully() {
    let config = AppConfig::default();
    let context = RequestContext::open(&fixture("device_sample.txt"), &config).unwrap();
    let raw = RawRequest {
        shift: Some("later".into()),
        start: Some("yesterday".into()),
        page: Some("first".into()),
        ..Default::default()
    };
    let (request, issues) = raw.validate(&config);
    assert_eq!(issues.len(), 3);

    let view = context.render(&request, &config).unwrap();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.total_rows, 9);
    assert_eq!(view.rows[0][2], "(10:00:00):");
}

/// JSON output carries the page and its metadata.
#[test]
fn e2e_json_output() {
    let view = serve(
        &fixture("device_sample.txt"),
        RawRequest {
            filters: filters(&["notification"]),
            ..Default::default()
        },
        &AppConfig::default(),
    );
    let mut buf = Vec::new();
    write_view(&view, OutputFormat::Json, &mut buf).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value["total_rows"], 1);
    assert_eq!(value["rows"][0][0], "5");
    assert_eq!(value["bounds"]["min"], "2024-01-01T10:00:00");
}
