//! File discovery for finding eligible images in a directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::PairingConfig;
use crate::error::{PipelineError, PipelineResult};

/// Discovers eligible image files in directories.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    config: PairingConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: PairingConfig) -> Self {
        Self { config }
    }

    /// List the eligible images directly inside `dir`.
    ///
    /// Subdirectories are not descended into. Failing to read `dir` itself is
    /// an error; individual entries that vanish mid-listing are skipped.
    pub fn discover(&self, dir: &Path) -> PipelineResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(PipelineError::Discovery {
                path: dir.to_path_buf(),
                message: "not a directory".to_string(),
            });
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Depth 0 is `dir` itself: the listing failed outright
                Err(e) if e.depth() == 0 => {
                    return Err(PipelineError::Discovery {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.is_supported(entry.path()) {
                files.push(entry.into_path());
            }
        }

        // Sorted so that seeded pairings are reproducible across platforms
        files.sort();
        tracing::debug!("Discovered {} eligible image(s) in {:?}", files.len(), dir);
        Ok(files)
    }

    /// Check if a file has an eligible extension.
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(PairingConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.JpEg")));
        assert!(!discovery.is_supported(Path::new("test.png")));
        assert!(!discovery.is_supported(Path::new("test.jpg.txt")));
        assert!(!discovery.is_supported(Path::new("jpg")));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.JPEG");
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "raw.png");

        let discovery = FileDiscovery::new(PairingConfig::default());
        let files = discovery.discover(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.JPEG"]);
    }

    #[test]
    fn test_discover_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.jpg");
        let nested = dir.path().join("nested.jpg");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested, "inner.jpg");

        let discovery = FileDiscovery::new(PairingConfig::default());
        let files = discovery.discover(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.jpg"));
    }

    #[test]
    fn test_discover_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let discovery = FileDiscovery::new(PairingConfig::default());
        let result = discovery.discover(&dir.path().join("nope"));
        assert!(matches!(result, Err(PipelineError::Discovery { .. })));
    }

    #[test]
    fn test_discover_file_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "single.jpg");

        let discovery = FileDiscovery::new(PairingConfig::default());
        let result = discovery.discover(&dir.path().join("single.jpg"));
        assert!(matches!(result, Err(PipelineError::Discovery { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_unreadable_dir_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        touch(&locked, "hidden.jpg");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users read through mode 000; nothing to check then.
        let readable = std::fs::read_dir(&locked).is_ok();

        let discovery = FileDiscovery::new(PairingConfig::default());
        let result = discovery.discover(&locked);
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        if readable {
            assert_eq!(result.unwrap().len(), 1);
        } else {
            match result {
                Err(PipelineError::Discovery { path, .. }) => assert_eq!(path, locked),
                other => panic!("expected a discovery error, got {other:?}"),
            }
        }
    }
}
