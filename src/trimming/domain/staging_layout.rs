use super::coordinate::DependencyCoordinate;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Directory (under the build directory) holding extracted original archives
pub const EXTRACTED_DIR_NAME: &str = "dependency";

/// Directory (under the build directory) holding pruned copies
pub const DEBLOATED_DIR_NAME: &str = "dependency-debloated";

/// Default directory (under the build directory) collecting trimmed archives
pub const TRIMMED_ARCHIVES_DIR_NAME: &str = "libs-debloated";

/// On-disk layout of one trimming run
///
/// Every dependency gets its own staged name, so concurrent work on two
/// dependencies never touches the same directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingLayout {
    build_dir: PathBuf,
    trimmed_dir: PathBuf,
}

impl StagingLayout {
    pub fn new(build_dir: impl Into<PathBuf>, trimmed_dir: Option<PathBuf>) -> Self {
        let build_dir = build_dir.into();
        let trimmed_dir = trimmed_dir.unwrap_or_else(|| build_dir.join(TRIMMED_ARCHIVES_DIR_NAME));
        Self {
            build_dir,
            trimmed_dir,
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// `<build>/dependency`
    pub fn extracted_root(&self) -> PathBuf {
        self.build_dir.join(EXTRACTED_DIR_NAME)
    }

    /// `<build>/dependency-debloated`
    pub fn debloated_root(&self) -> PathBuf {
        self.build_dir.join(DEBLOATED_DIR_NAME)
    }

    pub fn trimmed_dir(&self) -> &Path {
        &self.trimmed_dir
    }

    /// Extracted tree of the archive staged as `staged_name`
    pub fn extracted_tree(&self, staged_name: &str) -> PathBuf {
        self.extracted_root().join(archive_stem(staged_name))
    }

    /// Pruned tree of the archive staged as `staged_name`
    pub fn debloated_tree(&self, staged_name: &str) -> PathBuf {
        self.debloated_root().join(archive_stem(staged_name))
    }

    /// Trimmed archive produced for `staged_name`, always with a `.jar` extension
    pub fn trimmed_archive(&self, staged_name: &str) -> PathBuf {
        self.trimmed_dir
            .join(format!("{}.jar", archive_stem(staged_name)))
    }

    /// Assigns each dependency the file name its archive is staged under.
    ///
    /// Extracted trees, pruned trees and trimmed archives are all named after
    /// the stem (the file name without its extension), so stems must be
    /// unique. Archive file names are kept as they are unless two
    /// dependencies share a stem (`util-1.0.jar` and `util-1.0.war`); those
    /// are prefixed with their group id, plus a counter if the group does
    /// not disambiguate either.
    pub fn assign_staged_names(dependencies: &[DependencyCoordinate]) -> HashMap<String, String> {
        let mut by_stem: BTreeMap<String, Vec<(&DependencyCoordinate, String)>> = BTreeMap::new();
        for dependency in dependencies {
            let file_name = dependency.archive_file_name();
            by_stem
                .entry(archive_stem(&file_name).to_string())
                .or_default()
                .push((dependency, file_name));
        }

        let mut assigned = HashMap::new();
        let mut taken: HashSet<String> = by_stem
            .iter()
            .filter(|(_, deps)| deps.len() == 1)
            .map(|(stem, _)| stem.clone())
            .collect();

        for (_, mut deps) in by_stem {
            if deps.len() == 1 {
                if let Some((dependency, file_name)) = deps.pop() {
                    assigned.insert(dependency.coordinate_string(), file_name);
                }
                continue;
            }
            for (dependency, file_name) in deps {
                let mut candidate = format!("{}.{}", dependency.group_id(), file_name);
                let mut counter = 2;
                while taken.contains(archive_stem(&candidate)) {
                    candidate = format!("{}-{}.{}", dependency.group_id(), counter, file_name);
                    counter += 1;
                }
                taken.insert(archive_stem(&candidate).to_string());
                assigned.insert(dependency.coordinate_string(), candidate);
            }
        }

        assigned
    }
}

/// Archive file name without its extension (`util-1.0.jar` → `util-1.0`)
pub fn archive_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
