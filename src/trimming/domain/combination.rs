use super::specialized_dependency::SpecializedDependency;
use std::path::{Path, PathBuf};

/// Suffix the upstream step gives to the fully debloated descriptor
const DEBLOATED_STEM_SUFFIX: &str = "-debloated";

/// Marker inserted into every generated descriptor name
const SPECIALIZED_MARKER: &str = "-specialized";

/// One subset of the specialized dependencies, used to produce one descriptor variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    members: Vec<SpecializedDependency>,
    ordinal: usize,
    total: usize,
}

impl Combination {
    pub fn new(members: Vec<SpecializedDependency>, ordinal: usize, total: usize) -> Self {
        Self {
            members,
            ordinal,
            total,
        }
    }

    pub fn members(&self) -> &[SpecializedDependency] {
        &self.members
    }

    /// 1-based position in the enumeration
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Number of specialized dependencies in this subset
    pub fn cardinality(&self) -> usize {
        self.members.len()
    }

    /// Number of specialized dependencies in the whole run
    pub fn total(&self) -> usize {
        self.total
    }

    /// `<stem>-specialized_<ordinal>_<cardinality>_<total>.<ext>` next to `base`.
    ///
    /// The ordinal alone is unique per run, so no two combinations share a file.
    pub fn variant_path(&self, base: &Path) -> PathBuf {
        let suffix = format!(
            "{}_{}_{}_{}",
            SPECIALIZED_MARKER,
            self.ordinal,
            self.cardinality(),
            self.total
        );
        sibling_with_suffix(base, &suffix)
    }
}

/// `<stem>-specialized.<ext>` next to `base`, used when a single variant is produced.
pub fn single_variant_path(base: &Path) -> PathBuf {
    sibling_with_suffix(base, SPECIALIZED_MARKER)
}

fn sibling_with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_suffix(DEBLOATED_STEM_SUFFIX).unwrap_or(&stem);
    let file_name = match base.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    base.with_file_name(file_name)
}
