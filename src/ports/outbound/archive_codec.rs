use crate::shared::Result;
use std::path::{Path, PathBuf};

/// File extensions recognised as archives when extracting a directory
pub const ARCHIVE_EXTENSIONS: &[&str] = &["jar", "zip", "war"];

/// True for `*.jar`, `*.zip` and `*.war` file names (case-insensitive).
pub fn is_archive_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Result of extracting every archive in a directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Directories that were produced
    pub extracted: Vec<PathBuf>,
    /// Archives that could not be read, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// ArchiveExtractor port for decompressing archives
pub trait ArchiveExtractor: Send + Sync {
    /// Decompresses `archive` into `dest`, preserving internal paths
    ///
    /// # Errors
    /// Returns an error if the archive is not a readable zip file or `dest`
    /// cannot be written
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()>;

    /// Decompresses every archive in `dir` into a sibling directory named
    /// after the archive without its extension
    ///
    /// Malformed archives are skipped and listed in the report. The archives
    /// themselves are left in place.
    ///
    /// # Errors
    /// Returns an error only if `dir` cannot be listed
    fn extract_all(&self, dir: &Path) -> Result<ExtractionReport> {
        let mut archives: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_archive_file(path))
            .collect();
        archives.sort();

        let mut report = ExtractionReport::default();
        for archive in archives {
            let dest = archive.with_extension("");
            match self.extract(&archive, &dest) {
                Ok(()) => report.extracted.push(dest),
                Err(e) => {
                    tracing::warn!(archive = %archive.display(), error = %e, "skipping unreadable archive");
                    let _ = std::fs::remove_dir_all(&dest);
                    report.skipped.push((archive, format!("{:#}", e)));
                }
            }
        }
        Ok(report)
    }
}

/// ArchiveRepackager port for compressing a directory tree into an archive
pub trait ArchiveRepackager: Send + Sync {
    /// Writes `archive` with one entry per regular file under `tree`
    ///
    /// # Returns
    /// The number of entries written
    ///
    /// # Errors
    /// Returns an error if the tree cannot be read or the archive cannot be
    /// written; no partial archive is left at `archive`
    fn repackage(&self, tree: &Path, archive: &Path) -> Result<usize>;
}
