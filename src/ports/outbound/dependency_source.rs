use crate::shared::Result;
use crate::trimming::domain::DependencyCoordinate;

/// Packaging kind of projects that produce no archive of their own
pub const POM_PACKAGING: &str = "pom";

/// The project being trimmed and its resolved dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProject {
    /// Packaging kind of the project itself (`jar`, `war`, `pom`, ...)
    pub packaging: String,
    /// Every resolved dependency with its archive on disk
    pub dependencies: Vec<DependencyCoordinate>,
}

impl ResolvedProject {
    pub fn new(packaging: impl Into<String>, dependencies: Vec<DependencyCoordinate>) -> Self {
        Self {
            packaging: packaging.into(),
            dependencies,
        }
    }

    /// Aggregator projects (`pom` packaging) have nothing to trim.
    pub fn is_aggregator(&self) -> bool {
        self.packaging.eq_ignore_ascii_case(POM_PACKAGING)
    }
}

/// DependencySource port for resolving the project's dependencies
///
/// This port abstracts whatever resolved the dependency graph upstream
/// (a build tool, a report file) and located each archive on disk.
pub trait DependencySource {
    /// Resolves the project packaging and its dependencies
    ///
    /// # Errors
    /// Returns an error if:
    /// - The underlying source cannot be read
    /// - A dependency coordinate is malformed
    fn resolve(&self) -> Result<ResolvedProject>;
}
