use super::coordinate::ArtifactCoordinate;
use std::path::{Path, PathBuf};

/// Packaging kind passed to the installer for trimmed archives
pub const DEFAULT_PACKAGING: &str = "jar";

/// One installation of a trimmed archive into an artifact repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    repository: String,
    packaging: String,
    archive: PathBuf,
    coordinate: ArtifactCoordinate,
}

impl InstallRequest {
    pub fn new(
        repository: impl Into<String>,
        packaging: impl Into<String>,
        archive: impl Into<PathBuf>,
        coordinate: ArtifactCoordinate,
    ) -> Self {
        Self {
            repository: repository.into(),
            packaging: packaging.into(),
            archive: archive.into(),
            coordinate,
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    pub fn coordinate(&self) -> &ArtifactCoordinate {
        &self.coordinate
    }

    /// Installer arguments: `deploy:deploy-file -Durl=.. -Dpackaging=.. -Dfile=.. -DgroupId=.. -DartifactId=.. -Dversion=..`
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "deploy:deploy-file".to_string(),
            format!("-Durl={}", self.repository),
            format!("-Dpackaging={}", self.packaging),
            format!("-Dfile={}", self.archive.display()),
            format!("-DgroupId={}", self.coordinate.group_id),
            format!("-DartifactId={}", self.coordinate.artifact_id),
            format!("-Dversion={}", self.coordinate.version),
        ]
    }
}
