// LogPage - core/export.rs
//
// Rendering of a page view as an aligned text table, CSV, or JSON.
// Core layer: writes to any Write trait object.

use crate::core::model::PageView;
use crate::util::error::ExportError;
use std::io::Write;

/// Output format for a rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Render `view` in `format`.
pub fn write_view<W: Write>(
    view: &PageView,
    format: OutputFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Text => export_text(view, writer),
        OutputFormat::Csv => export_csv(view, writer).map(|_| ()),
        OutputFormat::Json => export_json(view, writer),
    }
}

/// Aligned plain-text table followed by a pagination footer.
///
/// An empty result prints the empty-result message instead of a table.
pub fn export_text<W: Write>(view: &PageView, mut writer: W) -> Result<(), ExportError> {
    let io = |e| ExportError::Io { source: e };

    if let Some(ref message) = view.empty_result_message {
        writeln!(writer, "{message}").map_err(io)?;
        return Ok(());
    }

    let mut widths: Vec<usize> = view.columns.iter().map(|c| c.chars().count()).collect();
    for row in &view.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    write_aligned(&mut writer, &view.columns, &widths).map_err(io)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_aligned(&mut writer, &rule, &widths).map_err(io)?;
    for row in &view.rows {
        write_aligned(&mut writer, row, &widths).map_err(io)?;
    }

    writeln!(
        writer,
        "\nPage {} of {} ({} matching lines)",
        view.current_page, view.total_pages, view.total_rows
    )
    .map_err(io)?;
    Ok(())
}

fn write_aligned<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let width = widths.get(i).copied().unwrap_or(0);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    writeln!(writer, "{}", line.trim_end())
}

/// Header row of column names, then the page's rows. Returns the number of
/// data rows written. An empty result writes nothing.
pub fn export_csv<W: Write>(view: &PageView, writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if view.is_empty_result() {
        csv_writer
            .flush()
            .map_err(|e| ExportError::Io { source: e })?;
        return Ok(0);
    }

    csv_writer
        .write_record(&view.columns)
        .map_err(|e| ExportError::Csv { source: e })?;

    let mut count = 0;
    for row in &view.rows {
        csv_writer
            .write_record(row)
            .map_err(|e| ExportError::Csv { source: e })?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| ExportError::Io { source: e })?;
    Ok(count)
}

/// The whole view, including pagination metadata, as pretty JSON.
pub fn export_json<W: Write>(view: &PageView, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, view).map_err(|e| ExportError::Json { source: e })
}
