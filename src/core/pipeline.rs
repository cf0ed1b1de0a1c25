// LogPage - core/pipeline.rs
//
// Per-request processing: parse -> shift -> date range -> tags -> table ->
// page. Pure with respect to its inputs; the caller supplies the file text.
//
// Two strategies produce identical views:
//   - Buffered: keep every surviving record in memory, tabulate, then slice.
//   - TwoPass: pass 1 counts survivors and sizes the schema; pass 2 re-walks
//     the text and materialises only the requested page. Memory is bounded
//     by the page size instead of the file size.

use crate::core::filter::{DateRange, FilterSpec, TagFilter};
use crate::core::model::{DateBounds, PageView, ParsedRecord};
use crate::core::paginate::{page_bounds, paginate, total_pages};
use crate::core::parser::records;
use crate::core::shift::{shift, shift_instant, try_shift};
use crate::core::table::{build_table, TableOutcome, TableRow, TableShape};
use crate::util::constants::{
    DEFAULT_LARGE_FILE_THRESHOLD, DEFAULT_PAGE_SIZE, EMPTY_RESULT_MESSAGE,
};
use crate::util::error::FilterError;
use chrono::NaiveDate;

/// How the pipeline walks the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStrategy {
    Buffered,
    TwoPass,
    /// Buffered below `ViewConfig::two_pass_threshold` bytes, two-pass above.
    Auto,
}

/// Immutable pipeline configuration, built once from `AppConfig`.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub page_size: usize,
    pub strategy: PassStrategy,
    pub two_pass_threshold: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            strategy: PassStrategy::Auto,
            two_pass_threshold: DEFAULT_LARGE_FILE_THRESHOLD,
        }
    }
}

impl ViewConfig {
    fn resolve_strategy(&self, content_len: usize) -> PassStrategy {
        match self.strategy {
            PassStrategy::Auto if content_len as u64 > self.two_pass_threshold => {
                PassStrategy::TwoPass
            }
            PassStrategy::Auto => PassStrategy::Buffered,
            fixed => fixed,
        }
    }
}

/// Validated request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub filters: FilterSpec,
    pub shift_hours: i64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// 1-based; 0 is treated as 1.
    pub page: usize,
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self {
            filters: FilterSpec::default(),
            shift_hours: 0,
            start: None,
            end: None,
            page: 1,
        }
    }
}

/// Observed timestamp bounds of `content`, before any shift.
///
/// A single full scan of every line: O(lines), no sampling.
pub fn scan_bounds(content: &[u8]) -> Option<DateBounds> {
    let mut bounds = None;
    for record in records(content) {
        if let Some(ts) = record.timestamp {
            DateBounds::extend(&mut bounds, ts);
        }
    }
    bounds
}

/// Move raw bounds by `hours`, matching what `shift` does to each record:
/// an endpoint the shift cannot represent stays where it was.
pub fn shift_bounds(bounds: DateBounds, hours: i64) -> DateBounds {
    DateBounds {
        min: shift_instant(bounds.min, hours).unwrap_or(bounds.min),
        max: shift_instant(bounds.max, hours).unwrap_or(bounds.max),
    }
}

/// Filters compiled for one request.
struct Stages {
    shift_hours: i64,
    range: DateRange,
    tags: TagFilter,
}

impl Stages {
    fn new(request: &ViewRequest) -> Result<Self, FilterError> {
        Ok(Self {
            shift_hours: request.shift_hours,
            range: DateRange::from_dates(request.start, request.end),
            tags: TagFilter::new(&request.filters)?,
        })
    }

    /// Shift and judge one record; `Some` if it survives.
    fn admit(&self, record: ParsedRecord) -> Option<ParsedRecord> {
        let record = shift(record, self.shift_hours);
        (self.range.keep(&record) && self.tags.keep(&record)).then_some(record)
    }
}

/// Produce the requested page of `content`.
///
/// `known_bounds` are raw (unshifted) bounds the caller already holds, e.g.
/// from an earlier `scan_bounds`; when absent they are gathered during the
/// walk.
pub fn render_page(
    content: &[u8],
    request: &ViewRequest,
    known_bounds: Option<DateBounds>,
    config: &ViewConfig,
) -> Result<PageView, FilterError> {
    let stages = Stages::new(request)?;
    let current_page = request.page.max(1);
    let page_size = config.page_size.max(1);
    let strategy = config.resolve_strategy(content.len());

    let (shape, rows, walk) = match strategy {
        PassStrategy::Buffered | PassStrategy::Auto => {
            buffered(content, &stages, current_page, page_size)
        }
        PassStrategy::TwoPass => two_pass(content, &stages, current_page, page_size),
    };

    if walk.unshifted > 0 {
        tracing::warn!(
            hours = request.shift_hours,
            lines = walk.unshifted,
            "Time shift leaves the representable date range; lines left unshifted"
        );
    }

    let bounds = match known_bounds {
        Some(b) => Some(shift_bounds(b, request.shift_hours)),
        None => walk.bounds,
    };
    let effective = match &bounds {
        Some(b) if !stages.range.is_unbounded() => stages.range.clamp_to(b),
        _ => stages.range,
    };

    tracing::debug!(
        strategy = ?strategy,
        kept = shape.rows,
        dateless = walk.dateless,
        columns = shape.width(),
        tag_filter = !stages.tags.is_pass_all(),
        page = current_page,
        page_size,
        "Page rendered"
    );

    let (columns, empty_result_message) = if shape.rows == 0 {
        (Vec::new(), Some(EMPTY_RESULT_MESSAGE.to_string()))
    } else {
        (shape.column_names(), None)
    };

    Ok(PageView {
        columns,
        rows,
        total_pages: total_pages(shape.rows, page_size),
        current_page,
        total_rows: shape.rows,
        empty_result_message,
        effective_range: effective.summary(),
        bounds,
    })
}

/// Facts gathered while walking every record once.
#[derive(Debug, Default)]
struct WalkStats {
    /// Shifted timestamps of all records, kept or not.
    bounds: Option<DateBounds>,
    /// Records whose shift overflowed.
    unshifted: u64,
    /// Kept records without a timestamp.
    dateless: u64,
}

type Walk = (TableShape, Vec<Vec<String>>, WalkStats);

fn buffered(content: &[u8], stages: &Stages, page: usize, page_size: usize) -> Walk {
    let mut stats = WalkStats::default();
    let mut shape = TableShape::default();
    let mut kept = Vec::new();

    for record in records(content) {
        let Some(record) = admit_tracking(stages, record, &mut stats) else {
            continue;
        };
        shape.observe(&record);
        kept.push(record);
    }

    let rows = match build_table(&kept) {
        TableOutcome::NoData => Vec::new(),
        TableOutcome::Table(table) => paginate(&table.rows, page, page_size).0.to_vec(),
    };
    (shape, rows, stats)
}

fn two_pass(content: &[u8], stages: &Stages, page: usize, page_size: usize) -> Walk {
    // Pass 1: count, size the schema, gather bounds.
    let mut stats = WalkStats::default();
    let mut shape = TableShape::default();
    for record in records(content) {
        if let Some(record) = admit_tracking(stages, record, &mut stats) {
            shape.observe(&record);
        }
    }

    // Pass 2: materialise only the requested slice.
    let wanted = page_bounds(shape.rows, page, page_size);
    let width = shape.width();
    let mut rows = Vec::with_capacity(wanted.len());
    if !wanted.is_empty() {
        let survivors = records(content).filter_map(|r| stages.admit(r));
        for record in survivors.skip(wanted.start).take(wanted.len()) {
            rows.push(TableRow::from_record(&record).padded(width));
        }
    }
    (shape, rows, stats)
}

/// `Stages::admit`, also recording bounds and counts into `stats`.
fn admit_tracking(
    stages: &Stages,
    record: ParsedRecord,
    stats: &mut WalkStats,
) -> Option<ParsedRecord> {
    let record = try_shift(record, stages.shift_hours).unwrap_or_else(|unshifted| {
        stats.unshifted += 1;
        unshifted
    });
    if let Some(ts) = record.timestamp {
        DateBounds::extend(&mut stats.bounds, ts);
    }
    let keep = stages.range.keep(&record) && stages.tags.keep(&record);
    if keep && record.is_dateless() {
        stats.dateless += 1;
    }
    keep.then_some(record)
}
