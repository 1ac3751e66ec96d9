use crate::ports::outbound::{ArchiveExtractor, ArchiveRepackager};
use crate::shared::error::TrimError;
use crate::shared::fs_util;
use crate::shared::security::{is_contained_relative_path, validate_regular_file};
use crate::shared::Result;
use anyhow::Context;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Component, Path};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Entry that must come first for streaming JAR readers
const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// ZipArchiveCodec adapter for JAR, WAR and ZIP archives
///
/// Implements both archive ports with the `zip` crate. Repackaged archives
/// are byte-for-byte reproducible: entries are ordered and carry a fixed
/// timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveCodec;

impl ZipArchiveCodec {
    pub fn new() -> Self {
        Self
    }

    /// Entry names in archive order: the manifest first, then byte order.
    fn entry_names(tree: &Path) -> Result<Vec<String>> {
        let mut names = fs_util::list_files_sorted(tree)?
            .iter()
            .map(|relative| {
                relative
                    .components()
                    .map(|component| match component {
                        Component::Normal(part) => Ok(part.to_string_lossy().into_owned()),
                        _ => Err(anyhow::anyhow!(
                            "Unexpected path component in {}",
                            relative.display()
                        )),
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(|parts| parts.join("/"))
            })
            .collect::<Result<Vec<_>>>()?;

        names.sort_by(|a, b| {
            (a != MANIFEST_ENTRY)
                .cmp(&(b != MANIFEST_ENTRY))
                .then_with(|| a.as_bytes().cmp(b.as_bytes()))
        });
        Ok(names)
    }
}

impl ArchiveExtractor for ZipArchiveCodec {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        validate_regular_file(archive, "Archive")?;

        let file = File::open(archive)
            .with_context(|| format!("Failed to open archive {}", archive.display()))?;
        let mut zip = ZipArchive::new(BufReader::new(file)).map_err(|e| TrimError::InvalidArchive {
            path: archive.to_path_buf(),
            details: e.to_string(),
        })?;

        fs_util::reset_dir(dest)?;
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| TrimError::InvalidArchive {
                path: archive.to_path_buf(),
                details: e.to_string(),
            })?;

            let relative = match entry.enclosed_name() {
                Some(relative) if is_contained_relative_path(&relative) => relative,
                _ => {
                    tracing::warn!(
                        archive = %archive.display(),
                        entry = entry.name(),
                        "skipping archive entry outside the extraction directory"
                    );
                    continue;
                }
            };

            let target = dest.join(&relative);
            if entry.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
            io::copy(&mut entry, &mut out).map_err(|e| TrimError::InvalidArchive {
                path: archive.to_path_buf(),
                details: format!("{}: {}", relative.display(), e),
            })?;
        }

        tracing::debug!(archive = %archive.display(), entries = zip.len(), "extracted archive");
        Ok(())
    }
}

impl ArchiveRepackager for ZipArchiveCodec {
    fn repackage(&self, tree: &Path, archive: &Path) -> Result<usize> {
        let names = Self::entry_names(tree)?;

        let parent = match archive.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;

        let temp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644);

        let mut writer = ZipWriter::new(temp);
        for name in &names {
            writer.start_file(name.as_str(), options)?;
            let mut source = File::open(tree.join(name))
                .with_context(|| format!("Failed to read {}", tree.join(name).display()))?;
            io::copy(&mut source, &mut writer)?;
        }
        let temp = writer.finish()?;

        temp.persist(archive).map_err(|e| TrimError::FileWriteError {
            path: archive.to_path_buf(),
            details: e.error.to_string(),
        })?;

        tracing::debug!(archive = %archive.display(), entries = names.len(), "repackaged archive");
        Ok(names.len())
    }
}
