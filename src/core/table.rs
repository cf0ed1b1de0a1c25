// LogPage - core/table.rs
//
// Tokenisation of kept records into ragged rows and derivation of the
// column schema shared by every row of a request.

use crate::core::model::ParsedRecord;
use crate::util::constants::{
    DATE_COLUMN, GENERIC_COLUMN_PREFIX, LINE_NUMBER_COLUMN, TAG_COLUMN_PREFIX, TIME_COLUMN,
};

/// One kept line: its line number followed by its whitespace-split tokens.
///
/// Rows are ragged; `padded` widens a row to the schema's column count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line_number: u64,
    pub tokens: Vec<String>,
}

impl TableRow {
    pub fn from_record(record: &ParsedRecord) -> Self {
        Self {
            line_number: record.line_number,
            tokens: record.display.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Cell count including the line-number cell.
    pub fn len(&self) -> usize {
        self.tokens.len() + 1
    }

    /// Always false: every row has at least its line-number cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Cells widened with empty strings to `width`. Never truncates.
    pub fn padded(&self, width: usize) -> Vec<String> {
        let mut cells = Vec::with_capacity(width.max(self.len()));
        cells.push(self.line_number.to_string());
        cells.extend(self.tokens.iter().cloned());
        if cells.len() < width {
            cells.resize(width, String::new());
        }
        cells
    }
}

/// Column count and naming facts gathered over the kept records.
///
/// Fed one record at a time so the pipeline can size the schema during its
/// counting pass without holding any rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableShape {
    /// Number of rows observed.
    pub rows: usize,
    /// Longest row, counting the line-number cell.
    pub max_columns: usize,
    /// Whether any observed record carried a timestamp.
    pub timestamped: bool,
}

impl TableShape {
    pub fn observe(&mut self, record: &ParsedRecord) {
        let width = record.display.split_whitespace().count() + 1;
        self.rows += 1;
        self.max_columns = self.max_columns.max(width);
        self.timestamped |= record.timestamp.is_some();
    }

    /// Schema width: the longest row, or 1 when nothing was observed.
    pub fn width(&self) -> usize {
        self.max_columns.max(1)
    }

    /// Column headers for this shape.
    ///
    /// With timestamps in play the first two token columns are the prefix's
    /// date and time and the rest are numbered tags; otherwise every token
    /// column gets a generic numbered name.
    pub fn column_names(&self) -> Vec<String> {
        let width = self.width();
        let mut names = Vec::with_capacity(width);
        names.push(LINE_NUMBER_COLUMN.to_string());
        for i in 1..width {
            let name = if self.timestamped {
                match i {
                    1 => DATE_COLUMN.to_string(),
                    2 => TIME_COLUMN.to_string(),
                    n => format!("{TAG_COLUMN_PREFIX} {}", n - 2),
                }
            } else {
                format!("{GENERIC_COLUMN_PREFIX} {i}")
            };
            names.push(name);
        }
        names
    }
}

/// A complete table: schema plus padded rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Result of tabulating a set of kept records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// Nothing survived filtering.
    NoData,
    Table(Table),
}

/// Tabulate `kept` in order.
pub fn build_table(kept: &[ParsedRecord]) -> TableOutcome {
    if kept.is_empty() {
        return TableOutcome::NoData;
    }

    let mut shape = TableShape::default();
    for record in kept {
        shape.observe(record);
    }
    let width = shape.width();

    let rows = kept
        .iter()
        .map(|r| TableRow::from_record(r).padded(width))
        .collect();

    TableOutcome::Table(Table {
        columns: shape.column_names(),
        rows,
    })
}
