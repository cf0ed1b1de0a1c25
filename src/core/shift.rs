// LogPage - core/shift.rs
//
// Re-basing of prefix timestamps by a flat hour offset.
// No timezone conversion: the offset is plain calendar arithmetic.

use crate::core::model::ParsedRecord;
use crate::util::constants::{PREFIX_DATE_FORMAT, PREFIX_TIME_FORMAT};
use chrono::{NaiveDateTime, TimeDelta};

/// Shift `record`'s timestamp by `hours` and rebuild its display text.
///
/// Dateless records and a zero offset return the record untouched, so the
/// original text survives byte-for-byte. An offset that would leave chrono's
/// representable range also leaves the record untouched.
pub fn shift(record: ParsedRecord, hours: i64) -> ParsedRecord {
    try_shift(record, hours).unwrap_or_else(|unshifted| unshifted)
}

/// Like `shift`, but hands the record back in `Err` when the shifted
/// instant is not representable.
pub fn try_shift(record: ParsedRecord, hours: i64) -> Result<ParsedRecord, ParsedRecord> {
    let Some(instant) = record.timestamp else {
        return Ok(record);
    };
    if hours == 0 {
        return Ok(record);
    }

    let Some(shifted) = shift_instant(instant, hours) else {
        tracing::trace!(
            line = record.line_number,
            hours,
            text = crate::util::logging::preview(&record.display),
            "Shifted timestamp out of range"
        );
        return Err(record);
    };

    let display = format_prefixed(shifted, &record.remainder);
    Ok(ParsedRecord {
        timestamp: Some(shifted),
        display,
        ..record
    })
}

/// Largest offset, in hours, that can move some representable instant to
/// another. Any larger offset overflows for every timestamp.
pub fn max_shift_hours() -> i64 {
    NaiveDateTime::MAX
        .signed_duration_since(NaiveDateTime::MIN)
        .num_hours()
}

/// `instant + hours`, or `None` on overflow.
pub fn shift_instant(instant: NaiveDateTime, hours: i64) -> Option<NaiveDateTime> {
    let delta = TimeDelta::try_hours(hours)?;
    instant.checked_add_signed(delta)
}

/// Serialise `instant` as a line prefix followed by `remainder` verbatim.
pub fn format_prefixed(instant: NaiveDateTime, remainder: &str) -> String {
    format!(
        "{} ({}):{}",
        instant.format(PREFIX_DATE_FORMAT),
        instant.format(PREFIX_TIME_FORMAT),
        remainder
    )
}
