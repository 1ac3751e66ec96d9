use crate::shared::fs_util;
use crate::shared::security::is_contained_relative_path;
use crate::shared::Result;
use crate::trimming::domain::TypeId;
use anyhow::Context;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Result of pruning one staged archive tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Unused types whose class file was deleted
    pub removed: BTreeSet<TypeId>,
    /// Unused types with no class file in the tree
    pub not_found: BTreeSet<TypeId>,
    /// Directories removed because pruning left them empty
    pub removed_directories: usize,
}

/// SelectiveClassPruner service for deleting unused compiled types
///
/// Copies an extracted archive into a destination tree and removes the
/// class files of every unused type. The source tree is only ever read.
pub struct SelectiveClassPruner;

impl SelectiveClassPruner {
    /// Produces `dest` as a copy of `source` minus the class files of `unused`.
    ///
    /// `dest` is cleared first, so running this twice with the same inputs
    /// yields the same tree. Directories left empty are removed afterwards.
    ///
    /// # Errors
    /// Returns an error if copying or deleting fails; the caller decides whether
    /// that fails only this dependency or the whole run.
    pub fn prune(source: &Path, dest: &Path, unused: &BTreeSet<TypeId>) -> Result<PruneReport> {
        if !source.is_dir() {
            anyhow::bail!(
                "Extracted archive directory does not exist: {}",
                source.display()
            );
        }

        fs_util::reset_dir(dest)?;
        fs_util::copy_dir_recursive(source, dest).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                dest.display()
            )
        })?;

        let mut report = PruneReport::default();
        for type_id in unused {
            let relative = type_id.class_file_path();
            if !is_contained_relative_path(&relative) {
                anyhow::bail!(
                    "Security: type {} maps outside the archive tree",
                    type_id
                );
            }

            let file = dest.join(&relative);
            match fs::remove_file(&file) {
                Ok(()) => {
                    tracing::trace!(file = %file.display(), "removed unused class file");
                    report.removed.insert(type_id.clone());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    report.not_found.insert(type_id.clone());
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to delete {}", file.display()));
                }
            }
        }

        report.removed_directories = fs_util::remove_empty_dirs(dest)?;
        Ok(report)
    }
}
