use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use filetime::FileTime;
use thiserror::Error;

/// Why a timestamp could not be applied to a file.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File not found: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UpdateError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            io::ErrorKind::NotFound => Self::NotFound { path, source },
            _ => Self::Io { path, source },
        }
    }
}

/// What happened to a file that had a date in its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing was touched; `timestamp` is what would have been applied.
    DryRun { timestamp: DateTime<Local> },
    Applied {
        timestamp: DateTime<Local>,
        /// Whether the platform let us set the creation time too
        created_set: bool,
    },
}

/// Set the access, modification and (where supported) creation time of
/// `path` to the instant `timestamp`. With `dry_run` the file is left alone.
pub fn apply(path: &Path, timestamp: DateTime<Local>, dry_run: bool) -> Result<UpdateOutcome, UpdateError> {
    if dry_run {
        return Ok(UpdateOutcome::DryRun { timestamp });
    }

    let ft = FileTime::from_unix_time(timestamp.timestamp(), timestamp.timestamp_subsec_nanos());
    filetime::set_file_times(path, ft, ft).map_err(|e| UpdateError::from_io(path, e))?;

    let created_set = match set_created(path, timestamp) {
        Ok(set) => set,
        Err(e) => {
            tracing::warn!("Could not set creation time of {}: {}", path.display(), e);
            false
        }
    };

    Ok(UpdateOutcome::Applied {
        timestamp,
        created_set,
    })
}

#[cfg(any(windows, target_os = "macos"))]
fn set_created(path: &Path, local: DateTime<Local>) -> io::Result<bool> {
    use std::fs::{File, FileTimes};
    #[cfg(target_os = "macos")]
    use std::os::macos::fs::FileTimesExt;
    #[cfg(windows)]
    use std::os::windows::fs::FileTimesExt;

    let file = File::options().write(true).open(path)?;
    file.set_times(FileTimes::new().set_created(local.into()))?;
    Ok(true)
}

#[cfg(not(any(windows, target_os = "macos")))]
fn set_created(path: &Path, _local: DateTime<Local>) -> io::Result<bool> {
    tracing::debug!("Creation time is not settable here, left unchanged for {}", path.display());
    Ok(false)
}
