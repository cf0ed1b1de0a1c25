// LogPage - platform/fs.rs
//
// Input file validation and reading.
//
// Small files are read onto the heap with transient-error retries; files
// above the large-file threshold are memory-mapped so the pipeline's
// two-pass walk does not double the file's footprint.

use crate::platform::config::AppConfig;
use crate::util::constants::{MAX_READ_RETRIES, READ_RETRY_DELAYS_MS};
use crate::util::error::{InputError, LogPageError};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Raw bytes of an input file, owned or mapped.
///
/// Never validated as a whole: the parser decodes each line on its own.
pub enum LogSource {
    /// Heap copy.
    Owned(Vec<u8>),
    /// Read-only mapping.
    Mapped(memmap2::Mmap),
}

impl LogSource {
    /// The file's bytes.
    pub fn bytes(&self) -> &[u8] {
        match self {
            LogSource::Owned(b) => b,
            LogSource::Mapped(m) => m,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, LogSource::Mapped(_))
    }
}

impl std::fmt::Debug for LogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogSource::Owned(s) => f.debug_tuple("Owned").field(&s.len()).finish(),
            LogSource::Mapped(m) => f.debug_tuple("Mapped").field(&m.len()).finish(),
        }
    }
}

/// True when the file name matches one of `patterns` (case-insensitive).
///
/// Invalid patterns never match; they are reported at config load.
pub fn is_allowed_file(path: &Path, patterns: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };
    patterns
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .any(|p| p.matches_with(name, options))
}

/// Validate `path` against `config` and read it.
pub fn open_log(path: &Path, config: &AppConfig) -> Result<LogSource, LogPageError> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LogPageError::from(InputError::NotFound {
            path: path.to_path_buf(),
        }),
        _ => io_error(path, "metadata", e),
    })?;

    if !metadata.is_file() {
        return Err(InputError::NotAFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    if !is_allowed_file(path, &config.include_patterns) {
        return Err(InputError::DisallowedFileName {
            path: path.to_path_buf(),
            patterns: config.include_patterns.clone(),
        }
        .into());
    }

    let size = metadata.len();
    if size > config.max_file_size {
        return Err(InputError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: config.max_file_size,
        }
        .into());
    }

    let source = if size > config.large_file_threshold {
        read_large_file(path)?
    } else {
        LogSource::Owned(read_small_file_with_retry(path)?)
    };

    tracing::debug!(
        file = %path.display(),
        size,
        mapped = source.is_mapped(),
        "Input file opened"
    );
    Ok(source)
}

/// Map a large file read-only.
fn read_large_file(path: &Path) -> Result<LogSource, LogPageError> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, "open", e))?;
    // SAFETY: the file is read-only and we do not mutate the map.
    // We accept the documented risk that external modification of the file
    // during the map's lifetime could produce undefined behaviour, which is
    // acceptable for a viewer reading already-written logs.
    let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(|e| io_error(path, "mmap", e))?;
    Ok(LogSource::Mapped(mmap))
}

/// Read a small file with transient-error retries.
fn read_small_file_with_retry(path: &Path) -> Result<Vec<u8>, LogPageError> {
    let mut last_err: Option<io::Error> = None;

    for attempt in 0..MAX_READ_RETRIES {
        match std::fs::read(path) {
            Ok(bytes) => return Ok(bytes),
            Err(e) if is_transient_error(&e) => {
                tracing::debug!(
                    file = %path.display(),
                    attempt = attempt + 1,
                    error = %e,
                    "Transient I/O error, retrying"
                );
                std::thread::sleep(Duration::from_millis(
                    READ_RETRY_DELAYS_MS[attempt as usize],
                ));
                last_err = Some(e);
            }
            Err(e) => return Err(io_error(path, "read", e)),
        }
    }

    Err(io_error(
        path,
        "read",
        last_err.unwrap_or_else(|| io::Error::other("Unknown read error")),
    ))
}

/// Returns true for transient I/O errors that are worth retrying.
fn is_transient_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
    )
}

fn io_error(path: &Path, operation: &'static str, source: io::Error) -> LogPageError {
    LogPageError::Io {
        path: PathBuf::from(path),
        operation,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config() -> AppConfig {
        AppConfig::default()
    }

    #[test]
    fn test_allowed_file_patterns() {
        let patterns = vec!["*.txt".to_string()];
        assert!(is_allowed_file(Path::new("/tmp/app.txt"), &patterns));
        assert!(is_allowed_file(Path::new("APP.TXT"), &patterns));
        assert!(!is_allowed_file(Path::new("app.log"), &patterns));
        assert!(!is_allowed_file(Path::new("txt"), &patterns));
        assert!(!is_allowed_file(Path::new("/"), &patterns));
    }

    #[test]
    fn test_open_small_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "2024-01-01 (10:00:00): [System] boot\n").unwrap();
        let source = open_log(&path, &config()).unwrap();
        assert!(!source.is_mapped());
        assert!(source.bytes().starts_with(b"2024-01-01 (10:00:00): [System]"));
    }

    #[test]
    fn test_open_large_file_is_mapped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();
        let cfg = AppConfig {
            large_file_threshold: 4,
            ..config()
        };
        let source = open_log(&path, &cfg).unwrap();
        assert!(source.is_mapped());
        assert_eq!(source.bytes(), b"line one\nline two\n");
    }

    #[test]
    fn test_invalid_utf8_is_kept_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.txt");
        let content: &[u8] = b"ok \xff\xfe end\n";
        std::fs::write(&path, content).unwrap();
        for (threshold, mapped) in [(4, true), (1024, false)] {
            let cfg = AppConfig {
                large_file_threshold: threshold,
                ..config()
            };
            let source = open_log(&path, &cfg).unwrap();
            assert_eq!(source.is_mapped(), mapped);
            assert_eq!(source.bytes(), content);
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = open_log(&dir.path().join("absent.txt"), &config());
        assert!(matches!(
            result,
            Err(LogPageError::Input(InputError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = open_log(dir.path(), &config());
        assert!(matches!(
            result,
            Err(LogPageError::Input(InputError::NotAFile { .. }))
        ));
    }

    #[test]
    fn test_disallowed_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.exe");
        std::fs::write(&path, "x").unwrap();
        assert!(matches!(
            open_log(&path, &config()),
            Err(LogPageError::Input(InputError::DisallowedFileName { .. }))
        ));
    }

    #[test]
    fn test_oversized_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "0123456789").unwrap();
        let cfg = AppConfig {
            max_file_size: 5,
            ..config()
        };
        assert!(matches!(
            open_log(&path, &cfg),
            Err(LogPageError::Input(InputError::FileTooLarge { size: 10, .. }))
        ));
    }
}
