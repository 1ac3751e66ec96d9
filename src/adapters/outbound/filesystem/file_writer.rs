use crate::ports::outbound::OutputPresenter;
use crate::shared::error::TrimError;
use crate::shared::fs_util::write_atomically;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing output to files
///
/// This adapter implements the OutputPresenter port for file output.
/// Content is written through a temporary file and renamed into place.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Rejects existing outputs that are symbolic links
    fn validate_output_security(&self) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(&self.output_path) {
            if metadata.is_symlink() {
                return Err(TrimError::FileWriteError {
                    path: self.output_path.clone(),
                    details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_output_security()?;

        write_atomically(&self.output_path, content.as_bytes()).map_err(|e| {
            TrimError::FileWriteError {
                path: self.output_path.clone(),
                details: format!("{:#}", e),
            }
        })?;

        tracing::info!(path = %self.output_path.display(), "wrote run results");
        Ok(())
    }
}
