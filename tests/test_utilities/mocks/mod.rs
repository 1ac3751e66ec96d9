/// Mock implementations for testing
mod mock_artifact_publisher;
mod mock_dependency_source;
mod mock_progress_reporter;
mod mock_usage_analyzer;

#[allow(unused_imports)]
pub use mock_artifact_publisher::MockArtifactPublisher;
#[allow(unused_imports)]
pub use mock_dependency_source::MockDependencySource;
#[allow(unused_imports)]
pub use mock_progress_reporter::MockProgressReporter;
#[allow(unused_imports)]
pub use mock_usage_analyzer::MockUsageAnalyzer;
