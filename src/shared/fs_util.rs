//! Stateless filesystem helpers shared by the staging, pruning and
//! repackaging steps.

use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Removes `dir` if it exists and recreates it empty.
pub fn reset_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to clear directory {}", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))
}

/// Recursively copies every regular file and directory of `src` into `dest`.
///
/// Symbolic links are not followed and not copied.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create directory {}", dest.display()))?;

    for entry in fs::read_dir(src).with_context(|| format!("Failed to read {}", src.display()))? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let target = dest.join(entry.file_name());

        if file_type.is_symlink() {
            tracing::warn!(path = %entry.path().display(), "skipping symbolic link while copying");
        } else if file_type.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Removes every directory under `root` that contains no files, including
/// parents that become empty once their children are gone. `root` itself is kept.
///
/// Returns the number of directories removed.
pub fn remove_empty_dirs(root: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(root).with_context(|| format!("Failed to read {}", root.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            removed += remove_empty_subtree(&entry.path())?;
        }
    }
    Ok(removed)
}

fn remove_empty_subtree(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            removed += remove_empty_subtree(&entry.path())?;
        }
    }

    if fs::read_dir(dir)?.next().is_none() {
        fs::remove_dir(dir)
            .with_context(|| format!("Failed to remove empty directory {}", dir.display()))?;
        removed += 1;
    }
    Ok(removed)
}

/// Lists every regular file under `root` as a path relative to `root`,
/// sorted so callers get the same order on every platform and run.
pub fn list_files_sorted(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            collect_files(root, &path, files)?;
        } else if file_type.is_file() {
            let relative = path
                .strip_prefix(root)
                .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;
            files.push(relative.to_path_buf());
        }
    }
    Ok(())
}

/// Lists every directory under `root` (recursively) that has no entries.
pub fn find_empty_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut empty = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            let path = entry.path();
            if fs::read_dir(&path)?.next().is_none() {
                empty.push(path.clone());
            }
            empty.extend(find_empty_dirs(&path)?);
        }
    }
    Ok(empty)
}

/// Writes `content` to `path` through a temporary file in the same directory,
/// renaming it into place only once everything has been written.
pub fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path)
        .map_err(|e| anyhow::anyhow!("Failed to move file into {}: {}", path.display(), e))?;
    Ok(())
}
