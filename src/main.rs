// LogPage - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. Request validation and pipeline invocation
// 4. Rendering the requested page to stdout

use clap::{CommandFactory, FromArgMatches, Parser, ValueEnum};
use logpage::app::request::{RawRequest, RequestContext};
use logpage::core::export::{write_view, OutputFormat};
use logpage::core::model::TagMatchMode;
use logpage::platform::config::{load_config, PlatformPaths};
use logpage::util;
use std::io::Write;
use std::path::PathBuf;

/// LogPage - filter a log file by tag and date and page through it as a table.
///
/// Lines may start with a `YYYY-MM-DD (HH:MM:SS):` prefix; such timestamps
/// can be re-based by a whole number of hours before date filtering.
#[derive(Parser, Debug)]
#[command(name = "logpage", version, about)]
struct Cli {
    /// Log file to view.
    path: PathBuf,

    /// Tag to keep, e.g. `system` matches `[System]`. Repeatable or comma-separated.
    #[arg(short = 'f', long = "filter")]
    filters: Vec<String>,

    /// Hours to add to every timestamp before filtering and display.
    #[arg(short = 's', long = "shift", allow_hyphen_values = true)]
    shift: Option<String>,

    /// First day to include (YYYY-MM-DD).
    #[arg(long = "start")]
    start: Option<String>,

    /// Last day to include (YYYY-MM-DD).
    #[arg(long = "end")]
    end: Option<String>,

    /// Page to show (1-based).
    #[arg(short = 'p', long = "page", allow_hyphen_values = true)]
    page: Option<String>,

    /// Output format.
    #[arg(short = 'o', long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Match tags anywhere in the line instead of as `[tag]`.
    #[arg(long = "substring")]
    substring: bool,

    /// Print the file's first and last timestamp dates and exit.
    #[arg(long = "bounds")]
    bounds: bool,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Csv,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = parse_cli();

    // Config first so its [logging] level can feed the subscriber.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (config, config_issues) = load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        file = %cli.path.display(),
        "LogPage starting"
    );

    for issue in &config_issues {
        tracing::warn!(error = %issue, "Config loading warning");
        eprintln!("warning: {issue}");
    }

    if let Err(e) = run(&cli, &config) {
        tracing::error!(error = %e, "Request failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// The CLI definition, with the known tag keywords listed in the help text.
fn command() -> clap::Command {
    let after_help = format!(
        "Known tags: {} (or \"{}\" for every line).",
        util::constants::KNOWN_TAGS.join(", "),
        util::constants::ALL_TAGS_SENTINEL
    );
    Cli::command().after_help(after_help)
}

fn parse_cli() -> Cli {
    let matches = command().get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn run(cli: &Cli, config: &logpage::platform::config::AppConfig) -> util::error::Result<()> {
    let mut context = RequestContext::open(&cli.path, config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.bounds {
        let line = match context.bounds() {
            Some(b) => format!("{} {}", b.min_date(), b.max_date()),
            None => "no timestamps".to_string(),
        };
        writeln!(out, "{line}").map_err(|e| util::error::ExportError::Io { source: e })?;
        return Ok(());
    }

    let raw = RawRequest {
        filters: cli.filters.clone(),
        shift: cli.shift.clone(),
        start: cli.start.clone(),
        end: cli.end.clone(),
        page: cli.page.clone(),
        tag_match: cli.substring.then_some(TagMatchMode::Substring),
    };
    let (request, issues) = raw.validate(config);
    for issue in &issues {
        eprintln!("warning: {issue}");
    }

    let view = context.render(&request, config)?;
    write_view(&view, cli.format.into(), &mut out)?;
    Ok(())
}
