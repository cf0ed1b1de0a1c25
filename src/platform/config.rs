// LogPage - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::TagMatchMode;
use crate::core::pipeline::{PassStrategy, ViewConfig};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogPage configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logpage/ or %APPDATA%\LogPage\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[paging]` section.
    pub paging: PagingSection,
    /// `[input]` section.
    pub input: InputSection,
    /// `[filter]` section.
    pub filter: FilterSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[paging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct PagingSection {
    /// Rows per page.
    pub page_size: Option<usize>,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Glob patterns a file name must match to be accepted.
    pub include_patterns: Option<Vec<String>>,
    /// Largest accepted file in bytes.
    pub max_file_size_bytes: Option<u64>,
    /// Files above this size are memory-mapped and paged in two passes.
    pub large_file_threshold_bytes: Option<u64>,
}

/// `[filter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// "bracket" or "substring".
    pub tag_match: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Immutable once loaded; passed by reference into the request layer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Paging --
    pub page_size: usize,

    // -- Input --
    pub include_patterns: Vec<String>,
    pub max_file_size: u64,
    pub large_file_threshold: u64,

    // -- Filter --
    pub tag_match: TagMatchMode,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: constants::DEFAULT_PAGE_SIZE,
            include_patterns: constants::DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            large_file_threshold: constants::DEFAULT_LARGE_FILE_THRESHOLD,
            tag_match: TagMatchMode::default(),
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Pipeline configuration derived from this config.
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            page_size: self.page_size,
            strategy: PassStrategy::Auto,
            two_pass_threshold: self.large_file_threshold,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal issues.
/// If the file does not exist, returns defaults with no issues (first run).
/// If the file is unreadable or unparseable, returns defaults plus the error.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut issues: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), issues);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            issues.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), issues);
        }
    };

    match toml::from_str::<RawConfig>(&content) {
        Ok(raw) => {
            tracing::info!(path = %config_path.display(), "Loaded config.toml");
            let config = validate(raw, &mut issues);
            (config, issues)
        }
        Err(e) => {
            issues.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            (AppConfig::default(), issues)
        }
    }
}

/// Validate each field against named constants, accumulating all issues.
pub fn validate(raw: RawConfig, issues: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Paging: page_size --
    if let Some(size) = raw.paging.page_size {
        if (constants::MIN_PAGE_SIZE..=constants::MAX_PAGE_SIZE).contains(&size) {
            config.page_size = size;
        } else {
            issues.push(out_of_range(
                "paging.page_size",
                size,
                format!(
                    "{}-{} (using default {})",
                    constants::MIN_PAGE_SIZE,
                    constants::MAX_PAGE_SIZE,
                    constants::DEFAULT_PAGE_SIZE
                ),
            ));
        }
    }

    // -- Input: include_patterns --
    if let Some(patterns) = raw.input.include_patterns {
        let mut valid = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            match glob::Pattern::new(&pattern) {
                Ok(_) => valid.push(pattern),
                Err(e) => issues.push(ConfigError::InvalidPattern { pattern, source: e }),
            }
        }
        if valid.is_empty() {
            issues.push(out_of_range(
                "input.include_patterns",
                "[]",
                "at least one valid glob pattern (using default)".to_string(),
            ));
        } else {
            config.include_patterns = valid;
        }
    }

    // -- Input: max_file_size_bytes --
    if let Some(size) = raw.input.max_file_size_bytes {
        if (1..=constants::ABSOLUTE_MAX_FILE_SIZE).contains(&size) {
            config.max_file_size = size;
        } else {
            issues.push(out_of_range(
                "input.max_file_size_bytes",
                size,
                format!("1-{} (using default)", constants::ABSOLUTE_MAX_FILE_SIZE),
            ));
        }
    }

    // -- Input: large_file_threshold_bytes --
    if let Some(threshold) = raw.input.large_file_threshold_bytes {
        if threshold >= 1 {
            config.large_file_threshold = threshold;
        } else {
            issues.push(out_of_range(
                "input.large_file_threshold_bytes",
                threshold,
                "at least 1 (using default)".to_string(),
            ));
        }
    }

    // -- Filter: tag_match --
    if let Some(ref mode) = raw.filter.tag_match {
        match mode.to_lowercase().as_str() {
            "bracket" => config.tag_match = TagMatchMode::Bracket,
            "substring" => config.tag_match = TagMatchMode::Substring,
            _ => issues.push(out_of_range(
                "filter.tag_match",
                mode,
                "\"bracket\" or \"substring\" (using bracket)".to_string(),
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            issues.push(out_of_range(
                "logging.level",
                level,
                "error, warn, info, debug, trace (using info)".to_string(),
            ));
        }
    }

    config
}

fn out_of_range(field: &str, value: impl ToString, expected: String) -> ConfigError {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}
