// LogPage - core/parser.rs
//
// Recognition of the `YYYY-MM-DD (HH:MM:SS):` line prefix.
// Core layer: works on borrowed text, never touches the filesystem.

use crate::core::model::ParsedRecord;
use crate::util::constants::TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

/// Outcome of prefix recognition on one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognized<'a> {
    /// The line opens with a valid timestamp prefix.
    Timestamped {
        instant: NaiveDateTime,
        /// Everything after the `):`, including any leading space.
        remainder: &'a str,
    },

    /// No prefix, or the prefix names an impossible date/time.
    Plain { text: &'a str },
}

fn prefix_regex() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        // ASCII digit classes: `\d` would also accept non-ASCII digits that
        // chrono then refuses.
        Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2}) \(([0-9]{2}:[0-9]{2}:[0-9]{2})\):(?s)(.*)")
            .expect("prefix regex is valid")
    })
}

/// Classify a trimmed line as timestamped or plain.
///
/// A line whose prefix is shaped correctly but names an impossible instant
/// (`2024-02-30`, `25:00:00`) is plain, not an error.
pub fn recognize(line: &str) -> Recognized<'_> {
    let Some(caps) = prefix_regex().captures(line) else {
        return Recognized::Plain { text: line };
    };

    // All three groups are mandatory in the pattern.
    let (Some(date), Some(time), Some(rest)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return Recognized::Plain { text: line };
    };

    let joined = format!("{} {}", date.as_str(), time.as_str());
    match NaiveDateTime::parse_from_str(&joined, TIMESTAMP_FORMAT) {
        Ok(instant) => Recognized::Timestamped {
            instant,
            remainder: rest.as_str(),
        },
        Err(e) => {
            tracing::trace!(prefix = %joined, error = %e, "Prefix shaped but not a valid instant");
            Recognized::Plain { text: line }
        }
    }
}

/// Parse one physical line into a record.
///
/// Returns `None` for lines that are blank after trimming; the caller still
/// counts them when numbering subsequent lines.
pub fn parse_line(line_number: u64, raw: &str) -> Option<ParsedRecord> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let record = match recognize(trimmed) {
        Recognized::Timestamped { instant, remainder } => ParsedRecord {
            line_number,
            timestamp: Some(instant),
            remainder: remainder.to_string(),
            display: trimmed.to_string(),
        },
        Recognized::Plain { text } => ParsedRecord {
            line_number,
            timestamp: None,
            remainder: text.to_string(),
            display: text.to_string(),
        },
    };
    Some(record)
}

/// Iterate the records of `content` in file order.
///
/// Line numbers are 1-based physical positions; blank lines are skipped but
/// still advance the counter. Both `\n` and `\r\n` endings are accepted.
/// Each line is decoded on its own; invalid UTF-8 is replaced lossily.
pub fn records(content: &[u8]) -> impl Iterator<Item = ParsedRecord> + '_ {
    content
        .split(|&b| b == b'\n')
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx as u64 + 1, &String::from_utf8_lossy(line)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_recognize_timestamped_line() {
        match recognize("2024-01-01 (10:00:00): [System] boot") {
            Recognized::Timestamped { instant, remainder } => {
                assert_eq!(instant, ts("2024-01-01 10:00:00"));
                assert_eq!(remainder, " [System] boot");
            }
            other => panic!("expected Timestamped, got {other:?}"),
        }
    }

    #[test]
    fn test_recognize_plain_line() {
        assert_eq!(
            recognize("[System] no timestamp here"),
            Recognized::Plain {
                text: "[System] no timestamp here"
            }
        );
    }

    #[test]
    fn test_recognize_prefix_must_start_the_line() {
        assert!(matches!(
            recognize("x 2024-01-01 (10:00:00): late prefix"),
            Recognized::Plain { .. }
        ));
    }

    #[test]
    fn test_recognize_rejects_other_timestamp_shapes() {
        for line in [
            "2024-01-01 10:00:00: no parens",
            "2024-01-01 (10:00:00) missing colon",
            "2024/01/01 (10:00:00): slashes",
            "24-01-01 (10:00:00): short year",
        ] {
            assert!(
                matches!(recognize(line), Recognized::Plain { .. }),
                "should be plain: {line}"
            );
        }
    }

    /// Regression: an impossible calendar date must demote the line to
    /// plain instead of surfacing an error.
    #[test]
    fn test_recognize_invalid_calendar_date_is_plain() {
        assert!(matches!(
            recognize("2024-02-30 (10:00:00): bad date"),
            Recognized::Plain { .. }
        ));
        assert!(matches!(
            recognize("2024-01-01 (25:00:00): bad hour"),
            Recognized::Plain { .. }
        ));
    }

    #[test]
    fn test_recognize_empty_remainder() {
        match recognize("2024-01-01 (10:00:00):") {
            Recognized::Timestamped { remainder, .. } => assert_eq!(remainder, ""),
            other => panic!("expected Timestamped, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_line_trims_and_keeps_display() {
        let rec = parse_line(7, "  2024-01-01 (10:00:00):[Data] x  \r").unwrap();
        assert_eq!(rec.line_number, 7);
        assert_eq!(rec.timestamp, Some(ts("2024-01-01 10:00:00")));
        assert_eq!(rec.remainder, "[Data] x");
        assert_eq!(rec.display, "2024-01-01 (10:00:00):[Data] x");
    }

    #[test]
    fn test_parse_line_plain_uses_trimmed_text() {
        let rec = parse_line(1, "\t hello world \t").unwrap();
        assert!(rec.is_dateless());
        assert_eq!(rec.remainder, "hello world");
        assert_eq!(rec.display, "hello world");
    }

    #[test]
    fn test_parse_line_blank_is_none() {
        assert!(parse_line(1, "").is_none());
        assert!(parse_line(2, "   \t ").is_none());
    }

    #[test]
    fn test_records_number_physical_lines() {
        let content = "first\n\n   \n2024-01-01 (10:00:00): fourth\r\nfifth\n";
        let numbers: Vec<u64> = records(content.as_bytes()).map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![1, 4, 5]);
    }

    #[test]
    fn test_records_decode_invalid_utf8_per_line() {
        let content = b"2024-01-01 (10:00:00): ok \xff [Data]\nclean line\n";
        let parsed: Vec<ParsedRecord> = records(content).collect();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].timestamp.is_some());
        assert_eq!(parsed[0].remainder, " ok \u{FFFD} [Data]");
        assert_eq!(parsed[1].display, "clean line");
    }
}
