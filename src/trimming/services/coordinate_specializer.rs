use crate::shared::Result;
use crate::trimming::domain::{ArtifactCoordinate, SpecializedDependency, Version};
use chrono::{DateTime, Utc};

/// Default suffix appended to the artifact id of trimmed archives
pub const DEFAULT_ARTIFACT_SUFFIX: &str = "-debloated";

/// How the specialized version is derived from the original one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionPolicy {
    /// Keep the original version unchanged
    #[default]
    Keep,
    /// Append `-trimmed-<yyyyMMddHHmmss>` of the run's trim epoch
    EpochSuffix,
}

/// CoordinateSpecializer service for naming trimmed archives
///
/// Derives the coordinate a trimmed archive is published under. The group
/// stays the same, the artifact gets a fixed suffix and the version follows
/// the configured [`VersionPolicy`]. Appending fixed text is injective, so
/// two distinct originals never map to the same specialized coordinate.
#[derive(Debug, Clone)]
pub struct CoordinateSpecializer {
    artifact_suffix: String,
    version_policy: VersionPolicy,
    trim_epoch: DateTime<Utc>,
}

impl CoordinateSpecializer {
    pub fn new(
        artifact_suffix: impl Into<String>,
        version_policy: VersionPolicy,
        trim_epoch: DateTime<Utc>,
    ) -> Self {
        Self {
            artifact_suffix: artifact_suffix.into(),
            version_policy,
            trim_epoch,
        }
    }

    pub fn artifact_suffix(&self) -> &str {
        &self.artifact_suffix
    }

    /// Returns the mapping from `original` to its specialized coordinate.
    ///
    /// # Errors
    /// Returns an error if the suffixed artifact id or version is not a valid identifier
    pub fn specialize(&self, original: &ArtifactCoordinate) -> Result<SpecializedDependency> {
        let artifact_id = original.artifact_id.with_suffix(&self.artifact_suffix)?;
        let version = match self.version_policy {
            VersionPolicy::Keep => original.version.clone(),
            VersionPolicy::EpochSuffix => Version::new(format!(
                "{}-trimmed-{}",
                original.version,
                self.trim_epoch.format("%Y%m%d%H%M%S")
            ))?,
        };

        let specialized =
            ArtifactCoordinate::new(original.group_id.clone(), artifact_id, version);
        Ok(SpecializedDependency::new(original.clone(), specialized))
    }
}
