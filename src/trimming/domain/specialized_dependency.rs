use super::coordinate::ArtifactCoordinate;
use serde::Serialize;

/// Maps an original dependency to the coordinate its trimmed archive is published under
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SpecializedDependency {
    original: ArtifactCoordinate,
    specialized: ArtifactCoordinate,
}

impl SpecializedDependency {
    pub fn new(original: ArtifactCoordinate, specialized: ArtifactCoordinate) -> Self {
        Self {
            original,
            specialized,
        }
    }

    pub fn original(&self) -> &ArtifactCoordinate {
        &self.original
    }

    pub fn specialized(&self) -> &ArtifactCoordinate {
        &self.specialized
    }

    /// True when a declaration with this group and artifact refers to the original.
    pub fn matches_original(&self, group_id: &str, artifact_id: &str) -> bool {
        self.original.group_id.as_str() == group_id
            && self.original.artifact_id.as_str() == artifact_id
    }
}

impl std::fmt::Display for SpecializedDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.original, self.specialized)
    }
}
