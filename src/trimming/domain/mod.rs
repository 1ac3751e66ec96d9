pub mod combination;
pub mod coordinate;
pub mod install_request;
pub mod specialized_dependency;
pub mod staging_layout;
pub mod trim_selection;
pub mod trim_stage;
pub mod type_usage;

pub use combination::{single_variant_path, Combination};
pub use coordinate::{ArtifactCoordinate, ArtifactId, DependencyCoordinate, GroupId, Scope, Version};
pub use install_request::{InstallRequest, DEFAULT_PACKAGING};
pub use specialized_dependency::SpecializedDependency;
pub use staging_layout::StagingLayout;
pub use trim_selection::{SelectionPolicy, TrimSelection};
pub use trim_stage::{DependencyOutcome, DependencyReport, TrimStage};
pub use type_usage::{format_type_set, TypeId, TypeUsageRecord};
