use crate::shared::Result;
use crate::trimming::domain::{DependencyCoordinate, TypeUsageRecord};

/// UsageAnalyzer port for classifying the types of a dependency
///
/// This port abstracts the static analysis that decides which types of a
/// dependency the project actually reaches.
pub trait UsageAnalyzer {
    /// Returns the declared and used types of `dependency`
    ///
    /// # Errors
    /// Returns an error if the analysis has no result for the dependency
    fn classify(&self, dependency: &DependencyCoordinate) -> Result<TypeUsageRecord>;
}
