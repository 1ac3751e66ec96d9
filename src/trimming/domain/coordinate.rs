use crate::shared::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Maximum length for group and artifact identifiers (security limit)
const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Maximum length for versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Validates a group or artifact identifier.
///
/// Identifiers end up as installer arguments and as file names, so only the
/// characters Maven itself accepts are allowed.
fn validate_identifier(value: &str, kind: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", kind);
    }

    if value.len() > MAX_IDENTIFIER_LENGTH {
        anyhow::bail!(
            "{} is too long ({} bytes). Maximum allowed: {} bytes",
            kind,
            value.len(),
            MAX_IDENTIFIER_LENGTH
        );
    }

    if !value
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        anyhow::bail!(
            "{} '{}' contains invalid characters. Only alphanumeric, hyphens, underscores and dots are allowed.",
            kind,
            value
        );
    }

    Ok(())
}

/// NewType wrapper for a Maven groupId
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_identifier(&value, "Group id")?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for a Maven artifactId
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_identifier(&value, "Artifact id")?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a new artifact id with `suffix` appended.
    pub fn with_suffix(&self, suffix: &str) -> Result<Self> {
        Self::new(format!("{}{}", self.0, suffix))
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for an artifact version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        if version.is_empty() {
            anyhow::bail!("Version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if !version
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '+' || c == '_')
        {
            anyhow::bail!(
                "Version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, underscores and plus are allowed.",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dependency scope (compile, runtime, test, provided, system, ...)
///
/// Scopes are compared case-insensitively, so the value is stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    pub fn new(scope: impl Into<String>) -> Self {
        Self(scope.into().trim().to_lowercase())
    }

    pub fn compile() -> Self {
        Self::new("compile")
    }

    pub fn test() -> Self {
        Self::new("test")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The (group, artifact, version) triple identifying one published artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArtifactCoordinate {
    pub group_id: GroupId,
    pub artifact_id: ArtifactId,
    pub version: Version,
}

impl ArtifactCoordinate {
    pub fn new(group_id: GroupId, artifact_id: ArtifactId, version: Version) -> Self {
        Self {
            group_id,
            artifact_id,
            version,
        }
    }

    /// Parses `group:artifact:version`.
    pub fn parse(coordinate: &str) -> Result<Self> {
        let parts: Vec<&str> = coordinate.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact, version] => Ok(Self::new(
                GroupId::new(*group)?,
                ArtifactId::new(*artifact)?,
                Version::new(*version)?,
            )),
            _ => anyhow::bail!(
                "Invalid coordinate '{}'. Expected the form group:artifact:version",
                coordinate
            ),
        }
    }
}

impl std::fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// One resolved dependency: its coordinate, scope and archive on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCoordinate {
    coordinate: ArtifactCoordinate,
    scope: Scope,
    archive: PathBuf,
}

impl DependencyCoordinate {
    pub fn new(coordinate: ArtifactCoordinate, scope: Scope, archive: PathBuf) -> Self {
        Self {
            coordinate,
            scope,
            archive,
        }
    }

    pub fn coordinate(&self) -> &ArtifactCoordinate {
        &self.coordinate
    }

    pub fn group_id(&self) -> &GroupId {
        &self.coordinate.group_id
    }

    pub fn artifact_id(&self) -> &ArtifactId {
        &self.coordinate.artifact_id
    }

    pub fn version(&self) -> &Version {
        &self.coordinate.version
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// File name of the archive (`util-1.0.jar`), falling back to the coordinate.
    pub fn archive_file_name(&self) -> String {
        self.archive
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| {
                format!(
                    "{}-{}.jar",
                    self.coordinate.artifact_id, self.coordinate.version
                )
            })
    }

    /// `group:artifact:version`, the form used by trim selections.
    pub fn coordinate_string(&self) -> String {
        self.coordinate.to_string()
    }
}

impl std::fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.coordinate, self.scope)
    }
}
