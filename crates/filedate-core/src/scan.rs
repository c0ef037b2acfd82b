use std::fs;
use std::path::Path;

use crate::media::{FileFilter, MediaFile};

/// Result of walking the input folder
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Regular files accepted by the filter, sorted by path
    pub files: Vec<MediaFile>,
    /// Files rejected by the filter
    pub filtered_out: u64,
}

/// Recursively collect regular files under `root` that pass `filter`.
/// Unreadable directories are logged and skipped.
pub fn scan_dir(root: &Path, filter: &FileFilter) -> ScanResult {
    let mut result = ScanResult::default();
    scan_dir_recursive(root, filter, &mut result);
    result.files.sort_by(|a, b| a.path.cmp(&b.path));
    result
}

fn scan_dir_recursive(dir: &Path, filter: &FileFilter, result: &mut ScanResult) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Error walking directory {}: {}", dir.display(), e);
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            scan_dir_recursive(&path, filter, result);
        } else if path.is_file() {
            let file = MediaFile::new(path);
            if filter.accepts(&file.filename) {
                result.files.push(file);
            } else {
                tracing::debug!("Skipping {} (extension doesn't match)", file.path.display());
                result.filtered_out += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_scan_nested_with_filter() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        File::create(root.join("20181128_110755.jpg")).unwrap();
        File::create(root.join("a/notes.txt")).unwrap();
        File::create(root.join("a/b/VID-20200615-WA0127.mp4")).unwrap();

        let all = scan_dir(root, &FileFilter::All);
        assert_eq!(all.files.len(), 3);
        assert_eq!(all.filtered_out, 0);

        let media = scan_dir(root, &FileFilter::MediaOnly);
        let names: Vec<_> = media.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["20181128_110755.jpg", "VID-20200615-WA0127.mp4"]);
        assert_eq!(media.filtered_out, 1);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let result = scan_dir(&dir.path().join("missing"), &FileFilter::All);
        assert!(result.files.is_empty());
    }
}
