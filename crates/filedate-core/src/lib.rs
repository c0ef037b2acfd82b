pub mod cancel;
pub mod date;
pub mod media;
pub mod scan;
pub mod updater;

use std::path::PathBuf;

use chrono::{DateTime, Local};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::date::{ExtractionResult, ValidityWindow};
use crate::media::{FileFilter, MediaFile};
use crate::updater::UpdateOutcome;

pub use cancel::{CancellationToken, CancelledError};
pub use date::{extract, extract_at, normalize, MIN_VALID_TIMESTAMP};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreOptions {
    /// Folder to process recursively
    pub root: PathBuf,
    /// Report what would change without touching any file
    #[serde(default)]
    pub dry_run: bool,
    /// Only analyze files with these extensions
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    /// Only analyze image and video files (ignored when `extensions` is set)
    #[serde(default)]
    pub media_only: bool,
}

/// Control options for process execution (cancellation).
#[derive(Debug, Clone, Default)]
pub struct ProcessControl {
    pub cancel_token: Option<CancellationToken>,
}

impl ProcessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_token.as_ref().is_some_and(|t| t.is_cancelled())
    }

    fn check(&self) -> Result<(), CancelledError> {
        match &self.cancel_token {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Restored {
        timestamp: DateTime<Local>,
        pattern: String,
        explanation: String,
        dry_run: bool,
    },
    Unrecognized,
    Failed {
        timestamp: DateTime<Local>,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestoreResult {
    /// Files that passed the filter and were analyzed
    pub total_files: u64,
    /// Files with a recognized date (applied, or reported in a dry run)
    pub restored: u64,
    /// Files with a recognized date that could not be updated
    pub failed: u64,
    /// Files rejected by the extension filter
    #[serde(default)]
    pub filtered_out: u64,
    pub unrecognized: Vec<PathBuf>,
    /// One entry per analyzed file, sorted by path
    #[serde(default)]
    pub entries: Vec<FileReport>,
}

/// Extract the date from one file's name and apply it.
///
/// Never fails: filesystem errors end up in [`FileStatus::Failed`] so the
/// rest of the batch keeps going.
pub fn restore_file(file: &MediaFile, window: &ValidityWindow, dry_run: bool) -> FileReport {
    let path = file.path.display();
    let status = match date::extract_at(&file.filename, window) {
        ExtractionResult::NotFound => {
            tracing::debug!("{} => pattern not recognized, date unchanged", path);
            FileStatus::Unrecognized
        }
        ExtractionResult::Found {
            timestamp,
            explanation,
            pattern_label,
        } => match updater::apply(&file.path, timestamp, dry_run) {
            Ok(outcome) => {
                match outcome {
                    UpdateOutcome::DryRun { .. } => {
                        tracing::info!("[SIMULATION] {} => {} ({})", path, timestamp, explanation)
                    }
                    UpdateOutcome::Applied { created_set, .. } => {
                        tracing::info!("{} => {} ({})", path, timestamp, explanation);
                        tracing::trace!(created_set, "{}", path);
                    }
                }
                FileStatus::Restored {
                    timestamp,
                    pattern: pattern_label.to_string(),
                    explanation,
                    dry_run,
                }
            }
            Err(e) => {
                tracing::error!("Error changing date of {}: {}", path, e);
                FileStatus::Failed {
                    timestamp,
                    error: e.to_string(),
                }
            }
        },
    };
    FileReport {
        path: file.path.clone(),
        status,
    }
}

/// Walk `options.root`, restore every recognized file, and summarize.
pub fn process(options: &RestoreOptions, control: &ProcessControl) -> anyhow::Result<RestoreResult> {
    if !options.root.is_dir() {
        anyhow::bail!("{} is not a valid directory", options.root.display());
    }
    control.check()?;

    let filter = FileFilter::new(options.extensions.as_deref(), options.media_only);
    let scan = scan::scan_dir(&options.root, &filter);
    let window = ValidityWindow::now();
    tracing::debug!(
        "Analyzing {} file(s), {} filtered out, accepting dates from {} to {}",
        scan.files.len(),
        scan.filtered_out,
        window.min(),
        window.max()
    );

    let mut result = restore_batch(&scan.files, &window, options.dry_run, control)?;
    result.filtered_out = scan.filtered_out;
    Ok(result)
}

/// Restore already scanned `files` in parallel and tally the outcome.
///
/// A file that fails to update is recorded and the others carry on.
pub fn restore_batch(
    files: &[MediaFile],
    window: &ValidityWindow,
    dry_run: bool,
    control: &ProcessControl,
) -> Result<RestoreResult, CancelledError> {
    let reports: Vec<Option<FileReport>> = files
        .par_iter()
        .map(|file| {
            if control.is_cancelled() {
                return None;
            }
            Some(restore_file(file, window, dry_run))
        })
        .collect();
    control.check()?;

    let mut result = RestoreResult {
        total_files: files.len() as u64,
        ..Default::default()
    };
    for report in reports.into_iter().flatten() {
        match &report.status {
            FileStatus::Restored { .. } => result.restored += 1,
            FileStatus::Failed { .. } => result.failed += 1,
            FileStatus::Unrecognized => result.unrecognized.push(report.path.clone()),
        }
        result.entries.push(report);
    }

    Ok(result)
}
