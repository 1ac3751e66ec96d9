//! jartrim - trims unused classes out of JAR dependencies
//!
//! Given an analysis report listing each dependency archive with the types it
//! declares and the types the project actually uses, jartrim stages the
//! archives, deletes the unused class files from the selected ones,
//! repackages and installs them under specialized coordinates, and writes
//! build descriptor variants substituting the trimmed archives.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`trimming`): Coordinates, type usage, combinations and pure services
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use jartrim::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! # async fn run() -> Result<()> {
//! let report = JsonAnalysisReport::load(Path::new("target/jartrim-report.json"), &[])?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! let use_case = TrimDependenciesUseCase::new(
//!     report.clone(),
//!     report,
//!     ZipArchiveCodec::new(),
//!     ZipArchiveCodec::new(),
//!     DisabledArtifactPublisher,
//!     &progress_reporter,
//! );
//!
//! let selection = TrimSelection::new(
//!     vec!["org.acme:util:1.0"],
//!     vec![Scope::test()],
//!     SelectionPolicy::ExplicitOnly,
//! );
//! let mut request = TrimRequest::new(StagingLayout::new("target", None), selection, "");
//! request.descriptor_variants = Some(DescriptorVariantsRequest::new(
//!     PathBuf::from("pom-debloated.xml"),
//!     vec![VariantMode::AllCombinations],
//! ));
//!
//! let response = use_case.execute(request).await?;
//! println!("{:?}", response.summary());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod logging;
pub mod ports;
pub mod shared;
pub mod trimming;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::archive::ZipArchiveCodec;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::FileSystemWriter;
    pub use crate::adapters::outbound::process::{
        DisabledArtifactPublisher, ProcessArtifactPublisher,
    };
    pub use crate::adapters::outbound::report::JsonAnalysisReport;
    pub use crate::application::dto::{
        DescriptorVariantsRequest, DescriptorVariantsResponse, RunSummary, TrimRequest,
        TrimResponse, VariantMode,
    };
    pub use crate::application::use_cases::{
        GenerateDescriptorVariantsUseCase, TrimDependenciesUseCase,
    };
    pub use crate::ports::outbound::{
        ArchiveExtractor, ArchiveRepackager, ArtifactPublisher, DependencySource,
        OutputPresenter, ProgressReporter, ResolvedProject, UsageAnalyzer,
    };
    pub use crate::shared::error::{ExitCode, TrimError};
    pub use crate::shared::Result;
    pub use crate::trimming::domain::{
        ArtifactCoordinate, DependencyCoordinate, DependencyOutcome, InstallRequest, Scope,
        SelectionPolicy, SpecializedDependency, StagingLayout, TrimSelection, TrimStage, TypeId,
        TypeUsageRecord,
    };
    pub use crate::trimming::services::{CoordinateSpecializer, VersionPolicy};
}
