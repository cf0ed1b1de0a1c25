// LogPage - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no platform
// dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// Parsed record (output of line parsing)
// =============================================================================

/// One non-blank input line after prefix recognition.
///
/// Produced by `parser::parse_line`, optionally re-based by `shift::shift`,
/// then judged by the filters and tokenised by the table builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRecord {
    /// 1-based physical line number in the source file. Blank lines consume
    /// a number even though they never produce a record.
    pub line_number: u64,

    /// Instant from the `YYYY-MM-DD (HH:MM:SS):` prefix, after any shift.
    /// `None` marks a dateless line.
    pub timestamp: Option<NaiveDateTime>,

    /// Text after the prefix, or the whole trimmed line when there is none.
    pub remainder: String,

    /// Text shown downstream: the remainder reattached to its (possibly
    /// shifted) prefix. Equal to the trimmed input line when unshifted.
    pub display: String,
}

impl ParsedRecord {
    /// True when the line carried no recognised timestamp prefix.
    pub fn is_dateless(&self) -> bool {
        self.timestamp.is_none()
    }
}

// =============================================================================
// Date bounds
// =============================================================================

/// Observed minimum and maximum timestamp of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDateTime,
    pub max: NaiveDateTime,
}

impl DateBounds {
    /// Bounds containing a single instant.
    pub fn at(instant: NaiveDateTime) -> Self {
        Self {
            min: instant,
            max: instant,
        }
    }

    /// Widen the bounds to include `instant`.
    pub fn include(&mut self, instant: NaiveDateTime) {
        if instant < self.min {
            self.min = instant;
        }
        if instant > self.max {
            self.max = instant;
        }
    }

    /// Fold `instant` into optional bounds.
    pub fn extend(bounds: &mut Option<DateBounds>, instant: NaiveDateTime) {
        match bounds {
            Some(b) => b.include(instant),
            None => *bounds = Some(DateBounds::at(instant)),
        }
    }

    /// Calendar date of the earliest instant.
    pub fn min_date(&self) -> NaiveDate {
        self.min.date()
    }

    /// Calendar date of the latest instant.
    pub fn max_date(&self) -> NaiveDate {
        self.max.date()
    }
}

// =============================================================================
// Tag match mode
// =============================================================================

/// How a tag keyword is located in a line's display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatchMode {
    /// The keyword must appear wrapped in brackets, e.g. `[System]`.
    #[default]
    Bracket,

    /// Legacy mode: the keyword may appear anywhere.
    Substring,
}

impl TagMatchMode {
    pub fn label(&self) -> &'static str {
        match self {
            TagMatchMode::Bracket => "bracket",
            TagMatchMode::Substring => "substring",
        }
    }
}

impl std::fmt::Display for TagMatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Page view (output of the pipeline)
// =============================================================================

/// Effective date window reported alongside a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RangeSummary {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// Everything the front end needs to render one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Column headers; every row has exactly this many cells.
    pub columns: Vec<String>,

    /// Rows of the requested page. The first cell is the line number; short
    /// rows are padded with empty cells.
    pub rows: Vec<Vec<String>>,

    /// Total number of pages, never less than 1.
    pub total_pages: usize,

    /// The page that was requested, after clamping to at least 1.
    pub current_page: usize,

    /// Number of lines that survived filtering across all pages.
    pub total_rows: usize,

    /// Set instead of a table when no line survived filtering.
    pub empty_result_message: Option<String>,

    /// Date window actually applied, after swapping and clamping.
    pub effective_range: RangeSummary,

    /// Observed (shifted) timestamp bounds of the file, if it has any.
    pub bounds: Option<DateBounds>,
}

impl PageView {
    /// True when the filtered result was empty.
    pub fn is_empty_result(&self) -> bool {
        self.empty_result_message.is_some()
    }
}
