use std::path::PathBuf;

/// A file found by the directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Full path, as joined during the walk
    pub path: PathBuf,
    /// Just the filename (the only part the extractor looks at)
    pub filename: String,
}

impl MediaFile {
    pub fn new(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, filename }
    }
}

/// Which files of the walk get analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFilter {
    All,
    /// Case-insensitive filename suffixes, each starting with a dot
    Extensions(Vec<String>),
    /// Files whose guessed MIME type is image/* or video/*
    MediaOnly,
}

impl FileFilter {
    /// Build a filter from user options. Explicit extensions win over
    /// `media_only`; `jpg`, `.jpg` and `JPG` are all accepted.
    pub fn new(extensions: Option<&[String]>, media_only: bool) -> Self {
        match extensions {
            Some(exts) if !exts.is_empty() => Self::Extensions(
                exts.iter()
                    .map(|e| format!(".{}", e.trim_start_matches('.').to_lowercase()))
                    .collect(),
            ),
            _ if media_only => Self::MediaOnly,
            _ => Self::All,
        }
    }

    pub fn accepts(&self, filename: &str) -> bool {
        match self {
            Self::All => true,
            Self::Extensions(exts) => {
                let lower = filename.to_lowercase();
                exts.iter().any(|ext| lower.ends_with(ext.as_str()))
            }
            Self::MediaOnly => mime_guess::from_path(filename).iter().any(|mime| {
                mime.type_() == mime_guess::mime::IMAGE || mime.type_() == mime_guess::mime::VIDEO
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_file_basename() {
        let m = MediaFile::new(PathBuf::from("photos/2018/IMG_20180507_192217158.jpg"));
        assert_eq!(m.filename, "IMG_20180507_192217158.jpg");
    }

    #[test]
    fn test_extension_filter_normalizes_entries() {
        let exts = vec!["jpg".to_string(), ".MP4".to_string()];
        let filter = FileFilter::new(Some(&exts), true);
        assert_eq!(filter, FileFilter::Extensions(vec![".jpg".into(), ".mp4".into()]));
        assert!(filter.accepts("a.JPG"));
        assert!(filter.accepts("clip.mp4"));
        assert!(!filter.accepts("notes.txt"));
        assert!(!filter.accepts("jpg"));
    }

    #[test]
    fn test_media_only_filter() {
        let filter = FileFilter::new(None, true);
        assert_eq!(filter, FileFilter::MediaOnly);
        assert!(filter.accepts("20181128_110755.jpg"));
        assert!(filter.accepts("VID-20200615-WA0127.mp4"));
        assert!(filter.accepts("movie.MOV"));
        assert!(!filter.accepts("README.md"));
        assert!(!filter.accepts("script.py"));
        assert!(!filter.accepts("no_extension"));
    }

    #[test]
    fn test_no_filter_accepts_everything() {
        let filter = FileFilter::new(Some(&[]), false);
        assert_eq!(filter, FileFilter::All);
        assert!(filter.accepts("anything.txt"));
    }
}
