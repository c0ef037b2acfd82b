use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use filedate_core::{CancellationToken, CancelledError, ProcessControl, RestoreOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "filedate",
    version,
    about = "Restore file dates based on patterns found in their filenames",
    after_help = "Examples:\n  filedate ./photos\n  filedate ./photos --dry-run --verbose\n  filedate ./photos --ext jpg jpeg png"
)]
struct Cli {
    /// Folder for recursive processing
    folder: PathBuf,

    /// Run in simulation mode (does not modify files)
    #[arg(short = 's', long)]
    dry_run: bool,

    /// Show detailed information during processing
    #[arg(short, long)]
    verbose: bool,

    /// Only process files with these extensions (ex: jpg png mp4)
    #[arg(short, long = "ext", value_name = "EXTENSION", num_args = 1..)]
    ext: Option<Vec<String>>,

    /// Logging detail level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log: LogLevel,

    /// Ignore non-media files (text, code, documents)
    #[arg(long)]
    ignore_text: bool,

    /// Write a JSON report of every analyzed file
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

fn init_logging(level: LogLevel, verbose: bool) {
    let level = if verbose { level.max(LogLevel::Debug) } else { level };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log, cli.verbose);

    let options = RestoreOptions {
        root: cli.folder,
        dry_run: cli.dry_run,
        extensions: cli.ext,
        media_only: cli.ignore_text,
    };

    if let Some(exts) = &options.extensions {
        tracing::info!("Processing only files with extensions: {}", exts.join(", "));
    } else if options.media_only {
        tracing::info!("Ignoring text files. Processing only media files.");
    }
    let mode = if options.dry_run { "SIMULATION" } else { "PRODUCTION" };
    tracing::info!("Starting in {} mode", mode);
    tracing::info!("Source folder: {}", options.root.display());

    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;
    let control = ProcessControl::new().with_cancel_token(token);

    let t_total = std::time::Instant::now();
    let result = match filedate_core::process(&options, &control) {
        Ok(result) => result,
        Err(e) if e.is::<CancelledError>() => {
            tracing::warn!("Process interrupted by user.");
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    tracing::info!("Processing completed in {:.2} seconds", t_total.elapsed().as_secs_f64());
    tracing::info!("Total files analyzed: {}", result.total_files);
    tracing::info!("Files with restored dates: {}", result.restored);
    tracing::info!("Files without recognized patterns: {}", result.unrecognized.len());
    if result.failed > 0 {
        tracing::warn!("Files that could not be updated: {}", result.failed);
    }
    if !result.unrecognized.is_empty() {
        tracing::debug!("Files without recognized pattern:");
        for path in &result.unrecognized {
            tracing::debug!("  - {}", path.display());
        }
    }

    if let Some(report) = &cli.report {
        let writer = BufWriter::new(File::create(report)?);
        serde_json::to_writer_pretty(writer, &result)?;
        tracing::info!("Report written to {}", report.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["filedate", "./photos", "-s", "--log", "debug", "-e", "jpg", "png"]);
        assert!(cli.dry_run);
        assert_eq!(cli.log, LogLevel::Debug);
        assert_eq!(cli.ext, Some(vec!["jpg".to_string(), "png".to_string()]));
        assert_eq!(cli.folder, PathBuf::from("./photos"));
    }

    #[test]
    fn test_verbose_never_lowers_level() {
        assert_eq!(LogLevel::Info.max(LogLevel::Debug), LogLevel::Debug);
        assert_eq!(LogLevel::Trace.max(LogLevel::Debug), LogLevel::Trace);
    }
}
