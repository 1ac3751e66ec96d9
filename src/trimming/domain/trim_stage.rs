use super::specialized_dependency::SpecializedDependency;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use super::type_usage::TypeId;

/// Stages of one trimming run.
///
/// `Extracting` through `Publishing` repeat for each selected dependency;
/// `Combining` runs once over everything that was trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimStage {
    NotStarted,
    Extracting,
    Pruning,
    Repackaging,
    Publishing,
    Combining,
    Done,
}

impl TrimStage {
    pub fn label(&self) -> &'static str {
        match self {
            TrimStage::NotStarted => "not started",
            TrimStage::Extracting => "extracting",
            TrimStage::Pruning => "pruning",
            TrimStage::Repackaging => "repackaging",
            TrimStage::Publishing => "publishing",
            TrimStage::Combining => "combining",
            TrimStage::Done => "done",
        }
    }
}

impl std::fmt::Display for TrimStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What happened to one dependency during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DependencyOutcome {
    /// Not selected, or in an ignored scope; its archive is left untouched
    PassedThrough,
    /// Trimmed and repackaged; `publish_error` is set when installation failed
    Trimmed {
        specialized: SpecializedDependency,
        trimmed_archive: PathBuf,
        removed_types: BTreeSet<TypeId>,
        publish_error: Option<String>,
    },
    /// A dependency-scoped failure at `stage`
    Failed { stage: TrimStage, reason: String },
}

impl DependencyOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DependencyOutcome::Failed { .. }
                | DependencyOutcome::Trimmed {
                    publish_error: Some(_),
                    ..
                }
        )
    }
}

/// Outcome of one dependency, keyed by its coordinate string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub coordinate: String,
    pub outcome: DependencyOutcome,
}

impl DependencyReport {
    pub fn new(coordinate: impl Into<String>, outcome: DependencyOutcome) -> Self {
        Self {
            coordinate: coordinate.into(),
            outcome,
        }
    }
}
