// LogPage - app/request.rs
//
// Request layer between the front end and the core pipeline:
//   - turns raw, untrusted parameter strings into a validated ViewRequest,
//     recording recoverable validation issues instead of failing;
//   - holds the request-scoped context (the opened file and its date bounds,
//     computed at most once per context).

use crate::core::filter::FilterSpec;
use crate::core::model::{DateBounds, PageView, TagMatchMode};
use crate::core::pipeline::{render_page, scan_bounds, ViewRequest};
use crate::core::shift::max_shift_hours;
use crate::platform::config::AppConfig;
use crate::platform::fs::{open_log, LogSource};
use crate::util::constants::INPUT_DATE_FORMAT;
use crate::util::error::{InputError, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Request parameters exactly as received.
#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    /// Tag keywords; each entry may itself be a comma-separated list.
    pub filters: Vec<String>,
    pub shift: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub page: Option<String>,
    /// Overrides the configured tag match mode when set.
    pub tag_match: Option<TagMatchMode>,
}

impl RawRequest {
    /// Validate into a `ViewRequest`.
    ///
    /// Never fails: each unusable parameter yields an `InputError` in the
    /// returned list and falls back to its neutral value (no filter bound,
    /// zero shift, page 1).
    pub fn validate(&self, config: &AppConfig) -> (ViewRequest, Vec<InputError>) {
        let mut issues = Vec::new();

        let tags: Vec<String> = self
            .filters
            .iter()
            .flat_map(|f| f.split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let mode = self.tag_match.unwrap_or(config.tag_match);

        let shift_hours = match self.shift.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(raw) => match raw.parse::<i64>() {
                Ok(hours) if hours.unsigned_abs() > max_shift_hours().unsigned_abs() => {
                    issues.push(InputError::ShiftOutOfRange {
                        hours,
                        max_hours: max_shift_hours(),
                    });
                    0
                }
                Ok(hours) => hours,
                Err(e) => {
                    issues.push(InputError::InvalidShift {
                        value: raw.to_string(),
                        source: e,
                    });
                    0
                }
            },
        };

        let start = parse_date("start", self.start.as_deref(), &mut issues);
        let end = parse_date("end", self.end.as_deref(), &mut issues);

        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n >= 1 => usize::try_from(n).unwrap_or(usize::MAX),
                // Non-positive pages clamp to the first page.
                Ok(_) => 1,
                Err(_) => {
                    issues.push(InputError::InvalidPage {
                        value: raw.to_string(),
                    });
                    1
                }
            },
        };

        for issue in &issues {
            tracing::warn!(issue = %issue, "Request parameter rejected");
        }

        let request = ViewRequest {
            filters: FilterSpec::new(tags, mode),
            shift_hours,
            start,
            end,
            page,
        };
        (request, issues)
    }
}

fn parse_date(
    field: &'static str,
    raw: Option<&str>,
    issues: &mut Vec<InputError>,
) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            issues.push(InputError::InvalidDate {
                field,
                value: raw.to_string(),
                source: e,
            });
            None
        }
    }
}

/// The file a request operates on, plus facts derived from it.
#[derive(Debug)]
pub struct RequestContext {
    path: PathBuf,
    source: LogSource,
    /// Raw (unshifted) bounds; `None` until first computed.
    bounds: Option<Option<DateBounds>>,
}

impl RequestContext {
    /// Validate and open `path`.
    pub fn open(path: &Path, config: &AppConfig) -> Result<Self> {
        let source = open_log(path, config)?;
        Ok(Self {
            path: path.to_path_buf(),
            source,
            bounds: None,
        })
    }

    /// Context over text already in memory.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: LogSource::Owned(text.into().into_bytes()),
            bounds: None,
        }
    }

    /// The file's raw timestamp bounds, scanned on first use.
    pub fn bounds(&mut self) -> Option<DateBounds> {
        if let Some(cached) = self.bounds {
            return cached;
        }
        let scanned = scan_bounds(self.source.bytes());
        tracing::debug!(file = %self.path.display(), bounds = ?scanned, "Date bounds scanned");
        self.bounds = Some(scanned);
        scanned
    }

    /// Run the pipeline for `request`.
    ///
    /// Reuses cached bounds when present; otherwise the pipeline gathers
    /// them during its own walk and they are not cached (they are shifted).
    pub fn render(&self, request: &ViewRequest, config: &AppConfig) -> Result<PageView> {
        let known = self.bounds.flatten();
        let view = render_page(self.source.bytes(), request, known, &config.view_config())?;
        tracing::info!(
            file = %self.path.display(),
            rows = view.total_rows,
            page = view.current_page,
            pages = view.total_pages,
            "Request served"
        );
        Ok(view)
    }
}
