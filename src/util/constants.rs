// LogPage - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogPage";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogPage";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Line grammar
// =============================================================================

/// chrono format of the instant carried by the `YYYY-MM-DD (HH:MM:SS):` prefix
/// once the date and time captures are joined with a single space.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// chrono format of the date half of the prefix.
pub const PREFIX_DATE_FORMAT: &str = "%Y-%m-%d";

/// chrono format of the time half of the prefix.
pub const PREFIX_TIME_FORMAT: &str = "%H:%M:%S";

/// Format accepted for user-supplied start/end dates.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Filtering
// =============================================================================

/// Filter keyword that disables tag filtering entirely.
pub const ALL_TAGS_SENTINEL: &str = "all";

/// Tag keywords used by the log producers this tool was written for.
/// Informational only: any keyword is accepted as a filter.
pub const KNOWN_TAGS: &[&str] = &["system", "data", "debug", "notification"];

// =============================================================================
// Table layout
// =============================================================================

/// Header of the first column of every table.
pub const LINE_NUMBER_COLUMN: &str = "Line Number";

/// Header of the first token column when the kept lines carry timestamps.
pub const DATE_COLUMN: &str = "Date";

/// Header of the second token column when the kept lines carry timestamps.
pub const TIME_COLUMN: &str = "Time";

/// Prefix of the remaining token columns when the kept lines carry timestamps.
pub const TAG_COLUMN_PREFIX: &str = "Tag";

/// Prefix of every token column when no kept line carries a timestamp.
pub const GENERIC_COLUMN_PREFIX: &str = "Column";

/// Message handed back instead of a table when no line survives filtering.
pub const EMPTY_RESULT_MESSAGE: &str = "No matching log lines found.";

// =============================================================================
// Pagination limits
// =============================================================================

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 1_000;

/// Minimum sensible page size.
pub const MIN_PAGE_SIZE: usize = 1;

/// Hard upper bound on page size (one page is materialised in memory).
pub const MAX_PAGE_SIZE: usize = 100_000;

// =============================================================================
// Input limits
// =============================================================================

/// Default file name patterns accepted as input.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["*.txt"];

/// Largest file accepted for processing, in bytes.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024; // 1 GiB

/// Hard upper bound on the configurable maximum file size.
pub const ABSOLUTE_MAX_FILE_SIZE: u64 = DEFAULT_MAX_FILE_SIZE;

/// File size threshold in bytes above which the file is memory-mapped
/// instead of read onto the heap.
pub const DEFAULT_LARGE_FILE_THRESHOLD: u64 = 100 * 1024 * 1024; // 100 MB

/// Retry limits for transient I/O errors.
pub const MAX_READ_RETRIES: u32 = 3;
pub const READ_RETRY_DELAYS_MS: [u64; 3] = [50, 100, 200];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of a log line included in debug output.
/// Prevents accidental exposure of sensitive data in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
