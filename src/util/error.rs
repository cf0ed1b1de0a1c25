// LogPage - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogPage operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogPageError {
    /// The input file or a request parameter was rejected.
    Input(InputError),

    /// Filter construction failed.
    Filter(FilterError),

    /// Rendering a page failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogPageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "Input error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogPageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors related to the input file and raw request parameters.
///
/// The parameter variants (`InvalidDate`, `InvalidShift`, `ShiftOutOfRange`,
/// `InvalidPage`) are
/// recoverable: the request layer records them as validation issues and
/// substitutes a neutral value instead of failing.
#[derive(Debug)]
pub enum InputError {
    /// The input file does not exist.
    NotFound { path: PathBuf },

    /// The input path is not a regular file.
    NotAFile { path: PathBuf },

    /// The file name matches none of the configured include patterns.
    DisallowedFileName {
        path: PathBuf,
        patterns: Vec<String>,
    },

    /// The file exceeds the configured maximum size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A start or end date could not be parsed.
    InvalidDate {
        field: &'static str,
        value: String,
        source: chrono::ParseError,
    },

    /// The time shift is not an integer number of hours.
    InvalidShift {
        value: String,
        source: std::num::ParseIntError,
    },

    /// The time shift would move every timestamp outside the representable
    /// date range.
    ShiftOutOfRange { hours: i64, max_hours: i64 },

    /// The page index is not a positive integer.
    InvalidPage { value: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Input file '{}' does not exist", path.display())
            }
            Self::NotAFile { path } => {
                write!(f, "Input path '{}' is not a regular file", path.display())
            }
            Self::DisallowedFileName { path, patterns } => write!(
                f,
                "Input file '{}' is not an accepted file type. Accepted patterns: {}",
                path.display(),
                patterns.join(", ")
            ),
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Input file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::InvalidDate {
                field,
                value,
                source,
            } => write!(
                f,
                "{field} date '{value}' is not a valid YYYY-MM-DD date ({source}); ignoring it"
            ),
            Self::InvalidShift { value, source } => write!(
                f,
                "Time shift '{value}' is not an integer number of hours ({source}); using 0"
            ),
            Self::ShiftOutOfRange { hours, max_hours } => write!(
                f,
                "Time shift of {hours} hours exceeds the supported {max_hours} hours; using 0"
            ),
            Self::InvalidPage { value } => {
                write!(f, "Page '{value}' is not a positive integer; using page 1")
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidDate { source, .. } => Some(source),
            Self::InvalidShift { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InputError> for LogPageError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to filter construction.
#[derive(Debug)]
pub enum FilterError {
    /// The tag matcher could not be compiled (e.g. it exceeds the regex
    /// engine's size limit because of a very long tag list).
    InvalidTagPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTagPattern { pattern, source } => {
                write!(f, "Cannot build tag matcher '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTagPattern { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for LogPageError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to rendering a page.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the output.
    Io { source: io::Error },

    /// CSV serialisation error.
    Csv { source: csv::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "Output I/O error: {source}"),
            Self::Csv { source } => write!(f, "CSV output error: {source}"),
            Self::Json { source } => write!(f, "JSON output error: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Csv { source } => Some(source),
            Self::Json { source } => Some(source),
        }
    }
}

impl From<ExportError> for LogPageError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// An include pattern is not a valid glob.
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "Config include pattern '{pattern}' is invalid: {source}")
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogPageError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LogPage results.
pub type Result<T> = std::result::Result<T, LogPageError>;
