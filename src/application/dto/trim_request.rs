use crate::trimming::domain::{StagingLayout, TrimSelection, DEFAULT_PACKAGING};
use crate::trimming::services::{VersionPolicy, DEFAULT_ARTIFACT_SUFFIX};
use std::path::PathBuf;

/// Default number of dependencies trimmed at the same time
pub const DEFAULT_MAX_PARALLEL: usize = 4;

/// Which descriptor variants to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VariantMode {
    /// One descriptor with every specialized dependency applied
    Single,
    /// One descriptor per subset of the specialized dependencies
    AllCombinations,
}

/// DescriptorVariantsRequest - request DTO for descriptor variant generation
#[derive(Debug, Clone)]
pub struct DescriptorVariantsRequest {
    /// The fully debloated descriptor every variant starts from
    pub base_descriptor: PathBuf,
    /// Requested variant modes; both may be combined
    pub modes: Vec<VariantMode>,
    /// Maximum number of variants written at the same time
    pub max_parallel: usize,
}

impl DescriptorVariantsRequest {
    pub fn new(base_descriptor: PathBuf, modes: Vec<VariantMode>) -> Self {
        let mut modes = modes;
        modes.sort();
        modes.dedup();
        Self {
            base_descriptor,
            modes,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }
}

/// TrimRequest - request DTO for the dependency trimming use case
#[derive(Debug, Clone)]
pub struct TrimRequest {
    /// Where staged, pruned and trimmed files go
    pub layout: StagingLayout,
    /// Which dependencies are trimmed
    pub selection: TrimSelection,
    /// Skip the whole run
    pub skip: bool,
    /// Repository URL or path handed to the installer
    pub repository: String,
    /// Packaging kind handed to the installer
    pub installer_packaging: String,
    /// Suffix of specialized artifact ids
    pub artifact_suffix: String,
    /// How specialized versions are derived
    pub version_policy: VersionPolicy,
    /// Maximum number of dependencies trimmed at the same time
    pub max_parallel: usize,
    /// Descriptor variants to generate once every dependency is trimmed
    pub descriptor_variants: Option<DescriptorVariantsRequest>,
}

impl TrimRequest {
    pub fn new(layout: StagingLayout, selection: TrimSelection, repository: impl Into<String>) -> Self {
        Self {
            layout,
            selection,
            skip: false,
            repository: repository.into(),
            installer_packaging: DEFAULT_PACKAGING.to_string(),
            artifact_suffix: DEFAULT_ARTIFACT_SUFFIX.to_string(),
            version_policy: VersionPolicy::default(),
            max_parallel: DEFAULT_MAX_PARALLEL,
            descriptor_variants: None,
        }
    }
}
