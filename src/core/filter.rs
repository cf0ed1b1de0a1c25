// LogPage - core/filter.rs
//
// Date-range and tag filters for parsed records.
// Both filters are AND-combined by the pipeline.
// Core layer: pure logic, no I/O.

use crate::core::model::{DateBounds, ParsedRecord, RangeSummary, TagMatchMode};
use crate::util::constants::ALL_TAGS_SENTINEL;
use crate::util::error::FilterError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Regex, RegexBuilder};

// =============================================================================
// Date range
// =============================================================================

/// Inclusive time window. An unset bound imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// Window from midnight of `start` to 23:59:59 of `end`.
    ///
    /// Reversed dates are swapped rather than rejected.
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) if s > e => {
                tracing::debug!(start = %s, end = %e, "Start date after end date; swapping");
                (Some(e), Some(s))
            }
            other => other,
        };
        Self {
            start: start.map(|d| d.and_time(NaiveTime::MIN)),
            end: end.and_then(|d| d.and_hms_opt(23, 59, 59)),
        }
    }

    /// True when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Tighten the window to the file's observed bounds.
    ///
    /// Only ever narrows: a start before the earliest timestamp moves up to
    /// it, an end after the latest moves down to it, and unset bounds stay
    /// unset. A window that misses the bounds entirely is returned as is,
    /// so the result always has `start <= end`. The set of kept lines is
    /// unchanged by clamping.
    pub fn clamp_to(self, bounds: &DateBounds) -> Self {
        let clamped = Self {
            start: self.start.map(|s| s.max(bounds.min)),
            end: self.end.map(|e| e.min(bounds.max)),
        };
        match (clamped.start, clamped.end) {
            (Some(s), Some(e)) if s > e => {
                tracing::debug!(
                    start = ?self.start,
                    end = ?self.end,
                    "Date window lies outside the file's bounds; left unclamped"
                );
                self
            }
            _ => clamped,
        }
    }

    /// Whether `record` falls inside the window. Dateless records always do.
    pub fn keep(&self, record: &ParsedRecord) -> bool {
        let Some(ts) = record.timestamp else {
            return true;
        };
        if let Some(start) = self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if ts > end {
                return false;
            }
        }
        true
    }

    pub fn summary(&self) -> RangeSummary {
        RangeSummary {
            start: self.start,
            end: self.end,
        }
    }
}

// =============================================================================
// Tag filter
// =============================================================================

/// Tag keywords selected by the user, plus the matching mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Keywords as entered; case is ignored when matching.
    pub tags: Vec<String>,
    pub mode: TagMatchMode,
}

impl FilterSpec {
    pub fn new<I, S>(tags: I, mode: TagMatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            mode,
        }
    }

    /// True when the filter selects every record: no keywords, or the "all"
    /// sentinel among them.
    pub fn matches_everything(&self) -> bool {
        self.tags.is_empty()
            || self
                .tags
                .iter()
                .any(|t| t.trim().eq_ignore_ascii_case(ALL_TAGS_SENTINEL))
    }
}

/// Compiled tag matcher. Built once per request.
#[derive(Debug, Clone)]
pub struct TagFilter {
    /// `None` when the filter selects everything.
    matcher: Option<Regex>,
}

impl TagFilter {
    /// Compile `spec` into a single case-insensitive alternation.
    ///
    /// Keywords are matched literally. Blank keywords are ignored; a filter
    /// holding only blank keywords selects everything.
    pub fn new(spec: &FilterSpec) -> Result<Self, FilterError> {
        if spec.matches_everything() {
            return Ok(Self { matcher: None });
        }

        let alternatives: Vec<String> = spec
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Ok(Self { matcher: None });
        }

        let body = alternatives.join("|");
        let pattern = match spec.mode {
            TagMatchMode::Bracket => format!(r"\[(?:{body})\]"),
            TagMatchMode::Substring => format!("(?:{body})"),
        };

        let matcher = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| FilterError::InvalidTagPattern {
                pattern: pattern.clone(),
                source: e,
            })?;

        tracing::debug!(pattern = %pattern, mode = %spec.mode, "Tag matcher compiled");
        Ok(Self {
            matcher: Some(matcher),
        })
    }

    pub fn is_pass_all(&self) -> bool {
        self.matcher.is_none()
    }

    /// Whether `record` carries at least one selected tag.
    pub fn keep(&self, record: &ParsedRecord) -> bool {
        match &self.matcher {
            None => true,
            Some(re) => re.is_match(&record.display),
        }
    }
}
