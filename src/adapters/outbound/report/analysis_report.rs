use crate::ports::outbound::{DependencySource, ResolvedProject, UsageAnalyzer};
use crate::shared::error::TrimError;
use crate::shared::security::read_text_file;
use crate::shared::Result;
use crate::trimming::domain::{
    ArtifactCoordinate, ArtifactId, DependencyCoordinate, GroupId, Scope, TypeUsageRecord, Version,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct ReportFile {
    #[serde(default = "default_packaging")]
    packaging: String,
    #[serde(default)]
    dependencies: Vec<ReportEntry>,
}

#[derive(Debug, Deserialize)]
struct ReportEntry {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(default = "default_scope")]
    scope: String,
    file: PathBuf,
    #[serde(default)]
    all_types: Vec<String>,
    #[serde(default)]
    used_types: Vec<String>,
}

fn default_packaging() -> String {
    "jar".to_string()
}

fn default_scope() -> String {
    "compile".to_string()
}

/// JsonAnalysisReport adapter reading the static analysis results from a JSON file
///
/// Implements both DependencySource and UsageAnalyzer: the report lists each
/// resolved dependency with its archive and the declared and used types.
/// Dependencies matching an ignore pattern are reported as fully used so
/// nothing is ever pruned from them.
#[derive(Debug, Clone)]
pub struct JsonAnalysisReport {
    path: PathBuf,
    project: ResolvedProject,
    usages: HashMap<String, TypeUsageRecord>,
}

impl JsonAnalysisReport {
    /// Loads and validates the report at `path`.
    ///
    /// # Arguments
    /// * `path` - Path of the JSON report
    /// * `ignore_dependencies` - Case-insensitive substrings of `group:artifact:version`
    ///   whose dependencies are treated as fully used
    ///
    /// # Errors
    /// Returns an error if the report is missing, unreadable or malformed
    pub fn load(path: &Path, ignore_dependencies: &[String]) -> Result<Self> {
        if !path.exists() {
            return Err(TrimError::ReportNotFound {
                path: path.to_path_buf(),
                suggestion: "Run the dependency analysis first, or pass the report location with --report."
                    .to_string(),
            }
            .into());
        }

        let content = read_text_file(path, "analysis report").map_err(|e| {
            TrimError::ReportParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        Self::from_json(&content, base_dir, ignore_dependencies)
            .map(|(project, usages)| Self {
                path: path.to_path_buf(),
                project,
                usages,
            })
            .map_err(|e| {
                TrimError::ReportParseError {
                    path: path.to_path_buf(),
                    details: format!("{:#}", e),
                }
                .into()
            })
    }

    fn from_json(
        content: &str,
        base_dir: &Path,
        ignore_dependencies: &[String],
    ) -> Result<(ResolvedProject, HashMap<String, TypeUsageRecord>)> {
        let report: ReportFile = serde_json::from_str(content)?;
        let patterns: Vec<String> = ignore_dependencies
            .iter()
            .map(|p| p.to_lowercase())
            .collect();

        let mut dependencies = Vec::with_capacity(report.dependencies.len());
        let mut usages = HashMap::with_capacity(report.dependencies.len());

        for entry in report.dependencies {
            let coordinate = ArtifactCoordinate::new(
                GroupId::new(entry.group_id)?,
                ArtifactId::new(entry.artifact_id)?,
                Version::new(entry.version)?,
            );
            let archive = if entry.file.is_absolute() {
                entry.file
            } else {
                base_dir.join(entry.file)
            };
            let dependency = DependencyCoordinate::new(coordinate, Scope::new(entry.scope), archive);

            let record = TypeUsageRecord::from_names(entry.all_types, entry.used_types)?;
            let key = dependency.coordinate_string();
            let lowered = key.to_lowercase();
            let record = if patterns.iter().any(|p| lowered.contains(p.as_str())) {
                tracing::debug!(coordinate = %key, "dependency ignored, treating every type as used");
                TypeUsageRecord::fully_used(record.declared().clone())
            } else {
                record
            };

            usages.insert(key, record);
            dependencies.push(dependency);
        }

        Ok((ResolvedProject::new(report.packaging, dependencies), usages))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DependencySource for JsonAnalysisReport {
    fn resolve(&self) -> Result<ResolvedProject> {
        Ok(self.project.clone())
    }
}

impl UsageAnalyzer for JsonAnalysisReport {
    fn classify(&self, dependency: &DependencyCoordinate) -> Result<TypeUsageRecord> {
        let key = dependency.coordinate_string();
        self.usages.get(&key).cloned().ok_or_else(|| {
            anyhow::anyhow!(
                "No analysis result for {} in {}",
                key,
                self.path.display()
            )
        })
    }
}
