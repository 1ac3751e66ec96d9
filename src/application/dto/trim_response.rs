use crate::shared::error::ExitCode;
use crate::trimming::domain::{DependencyOutcome, DependencyReport, SpecializedDependency};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// One descriptor variant that could not be written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// DescriptorVariantsResponse - outcome of descriptor variant generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DescriptorVariantsResponse {
    /// Written descriptors, in enumeration order
    pub written: Vec<PathBuf>,
    /// Variants that were skipped because producing them failed
    pub failed: Vec<VariantFailure>,
}

/// Counts of dependency outcomes in one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub trimmed: usize,
    pub publish_failed: usize,
    pub failed: usize,
    pub passed_through: usize,
}

/// TrimResponse - response DTO of the dependency trimming use case
///
/// Serialized as the optional run results file.
#[derive(Debug, Clone, Serialize)]
pub struct TrimResponse {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Why the run did nothing, if it was skipped
    pub skipped: Option<String>,
    /// Outcome of every resolved dependency, in resolution order
    pub dependencies: Vec<DependencyReport>,
    /// Every trimmed dependency, sorted by original coordinate
    pub specialized: Vec<SpecializedDependency>,
    /// Descriptor variants, when requested
    pub descriptors: Option<DescriptorVariantsResponse>,
    /// Set when the whole descriptor step failed
    pub descriptor_error: Option<String>,
}

impl TrimResponse {
    pub fn skipped(run_id: Uuid, started_at: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Self {
            run_id,
            started_at,
            finished_at: Utc::now(),
            skipped: Some(reason.into()),
            dependencies: Vec::new(),
            specialized: Vec::new(),
            descriptors: None,
            descriptor_error: None,
        }
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for report in &self.dependencies {
            match &report.outcome {
                DependencyOutcome::PassedThrough => summary.passed_through += 1,
                DependencyOutcome::Trimmed {
                    publish_error: None,
                    ..
                } => summary.trimmed += 1,
                DependencyOutcome::Trimmed { .. } => summary.publish_failed += 1,
                DependencyOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    /// True when any dependency, publish or descriptor variant failed
    pub fn has_failures(&self) -> bool {
        self.dependencies.iter().any(|r| r.outcome.is_failure())
            || self.descriptor_error.is_some()
            || self
                .descriptors
                .as_ref()
                .is_some_and(|d| !d.failed.is_empty())
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.has_failures() {
            ExitCode::PartialFailure
        } else {
            ExitCode::Success
        }
    }
}
