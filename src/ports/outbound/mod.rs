/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, external processes, console, etc.).
pub mod archive_codec;
pub mod artifact_publisher;
pub mod dependency_source;
pub mod output_presenter;
pub mod progress_reporter;
pub mod usage_analyzer;

pub use archive_codec::{is_archive_file, ArchiveExtractor, ArchiveRepackager, ExtractionReport};
pub use artifact_publisher::ArtifactPublisher;
pub use dependency_source::{DependencySource, ResolvedProject, POM_PACKAGING};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use usage_analyzer::UsageAnalyzer;
