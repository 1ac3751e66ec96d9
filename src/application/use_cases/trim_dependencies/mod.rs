use crate::application::dto::{TrimRequest, TrimResponse};
use crate::application::use_cases::GenerateDescriptorVariantsUseCase;
use crate::ports::outbound::{
    ArchiveExtractor, ArchiveRepackager, ArtifactPublisher, DependencySource, ExtractionReport,
    ProgressReporter, UsageAnalyzer,
};
use crate::shared::error::TrimError;
use crate::shared::fs_util;
use crate::shared::security::validate_regular_file;
use crate::shared::time::format_elapsed;
use crate::shared::Result;
use crate::trimming::domain::{
    format_type_set, ArtifactCoordinate, DependencyCoordinate, DependencyOutcome,
    DependencyReport, InstallRequest, SpecializedDependency, StagingLayout, TrimSelection,
    TrimStage, TypeUsageRecord,
};
use crate::trimming::services::{CoordinateSpecializer, SelectiveClassPruner};
use anyhow::Context;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;


/// Registry of specialized coordinates, each mapped to the original that produced it
type SpecializedRegistry = DashMap<ArtifactCoordinate, ArtifactCoordinate>;

/// Failures found while staging, keyed by coordinate string
type StagingFailures = HashMap<String, String>;

/// What the run does with one dependency once it has been classified
enum Plan {
    PassThrough,
    Trim(TypeUsageRecord),
    Fail { stage: TrimStage, reason: String },
}

/// TrimDependenciesUseCase - Core use case for dependency trimming
///
/// This use case orchestrates the trimming workflow using generic
/// dependency injection for all infrastructure dependencies:
/// resolve, stage, classify, trim every selected dependency concurrently,
/// then generate descriptor variants from everything that was trimmed.
///
/// # Type Parameters
/// * `DS` - DependencySource implementation
/// * `UA` - UsageAnalyzer implementation
/// * `AX` - ArchiveExtractor implementation
/// * `AR` - ArchiveRepackager implementation
/// * `AP` - ArtifactPublisher implementation
/// * `PR` - ProgressReporter implementation
pub struct TrimDependenciesUseCase<DS, UA, AX, AR, AP, PR> {
    dependency_source: DS,
    usage_analyzer: UA,
    extractor: Arc<AX>,
    repackager: Arc<AR>,
    publisher: AP,
    progress_reporter: PR,
}

impl<DS, UA, AX, AR, AP, PR> TrimDependenciesUseCase<DS, UA, AX, AR, AP, PR>
where
    DS: DependencySource,
    UA: UsageAnalyzer,
    AX: ArchiveExtractor + 'static,
    AR: ArchiveRepackager + 'static,
    AP: ArtifactPublisher,
    PR: ProgressReporter,
{
    /// Creates a new TrimDependenciesUseCase with injected dependencies
    pub fn new(
        dependency_source: DS,
        usage_analyzer: UA,
        extractor: AX,
        repackager: AR,
        publisher: AP,
        progress_reporter: PR,
    ) -> Self {
        Self {
            dependency_source,
            usage_analyzer,
            extractor: Arc::new(extractor),
            repackager: Arc::new(repackager),
            publisher,
            progress_reporter,
        }
    }

    /// Executes the trimming use case
    ///
    /// # Arguments
    /// * `request` - Staging layout, selection and publishing options
    ///
    /// # Returns
    /// TrimResponse with the outcome of every dependency and generated descriptors.
    /// Dependency-scoped failures are reported in the response, not as errors.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The dependencies cannot be resolved or contain duplicates
    /// - The staging directories cannot be prepared
    /// - Two dependencies are specialized onto the same coordinate
    pub async fn execute(&self, request: TrimRequest) -> Result<TrimResponse> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let clock = Instant::now();

        // Step 1: Honour the skip flag
        if request.skip {
            self.progress_reporter
                .report("⏭️  Dependency trimming is skipped.");
            return Ok(TrimResponse::skipped(run_id, started_at, "skip flag set"));
        }

        // Step 2: Resolve dependencies
        let project = self.dependency_source.resolve()?;
        if project.is_aggregator() {
            self.progress_reporter.report(&format!(
                "⏭️  Skipping project with packaging '{}': nothing to trim.",
                project.packaging
            ));
            return Ok(TrimResponse::skipped(
                run_id,
                started_at,
                format!("project packaging is {}", project.packaging),
            ));
        }
        let dependencies = project.dependencies;
        Self::reject_duplicates(&dependencies)?;
        self.progress_reporter.report(&format!(
            "📦 Resolved {} dependenc{}",
            dependencies.len(),
            if dependencies.len() == 1 { "y" } else { "ies" }
        ));
        self.warn_unmatched_selection(&request.selection, &dependencies);

        // Step 3: Stage and extract every archive
        let staged_names = StagingLayout::assign_staged_names(&dependencies);
        let staging_failures = self
            .stage(&request.layout, &dependencies, &staged_names)
            .await?;

        // Step 4: Classify and report type sections
        let plans = self.plan(&request.selection, &dependencies, &staging_failures);

        // Step 5: Trim selected dependencies concurrently
        let specializer = CoordinateSpecializer::new(
            request.artifact_suffix.clone(),
            request.version_policy,
            started_at,
        );
        let registry = SpecializedRegistry::new();
        let mut outcomes: Vec<Option<DependencyOutcome>> = Vec::with_capacity(dependencies.len());
        let mut work = Vec::new();
        for (index, (dependency, plan)) in dependencies.iter().zip(plans).enumerate() {
            match plan {
                Plan::PassThrough => outcomes.push(Some(DependencyOutcome::PassedThrough)),
                Plan::Fail { stage, reason } => {
                    self.report_failure(dependency, stage, &reason);
                    outcomes.push(Some(DependencyOutcome::Failed { stage, reason }));
                }
                Plan::Trim(usage) => {
                    outcomes.push(None);
                    let staged_name = Self::staged_name(&staged_names, dependency);
                    work.push((index, dependency, staged_name, usage));
                }
            }
        }

        let total = work.len();
        if total > 0 {
            self.progress_reporter.report(&format!(
                "✂️  Trimming {} dependenc{}...",
                total,
                if total == 1 { "y" } else { "ies" }
            ));
        }
        let mut in_flight = stream::iter(work)
            .map(|(index, dependency, staged_name, usage)| {
                self.trim_one(
                    index,
                    dependency,
                    staged_name,
                    usage,
                    &request,
                    &specializer,
                    &registry,
                )
            })
            .buffer_unordered(request.max_parallel.max(1));

        // Step 6: Barrier - every trim finishes (or the run aborts) before combining
        let mut finished = 0;
        while let Some(result) = in_flight.next().await {
            let (index, outcome) = result?;
            finished += 1;
            self.progress_reporter.report_progress(
                finished,
                total,
                Some(&dependencies[index].coordinate_string()),
            );
            outcomes[index] = Some(outcome);
        }
        drop(in_flight);

        let reports: Vec<DependencyReport> = dependencies
            .iter()
            .zip(outcomes)
            .map(|(dependency, outcome)| {
                DependencyReport::new(
                    dependency.coordinate_string(),
                    outcome.unwrap_or(DependencyOutcome::PassedThrough),
                )
            })
            .collect();
        let specialized = Self::collect_specialized(&reports);

        // Step 7: Combining
        let mut response = TrimResponse {
            run_id,
            started_at,
            finished_at: started_at,
            skipped: None,
            dependencies: reports,
            specialized,
            descriptors: None,
            descriptor_error: None,
        };
        if let Some(variants) = &request.descriptor_variants {
            let generator = GenerateDescriptorVariantsUseCase::new(&self.progress_reporter);
            match generator.execute(variants, &response.specialized).await {
                Ok(descriptors) => response.descriptors = Some(descriptors),
                Err(e) => {
                    self.progress_reporter.report_error(&format!(
                        "❌ Descriptor variant generation failed: {:#}",
                        e
                    ));
                    response.descriptor_error = Some(format!("{:#}", e));
                }
            }
        }

        // Step 8: Summary
        response.finished_at = Utc::now();
        self.report_summary(&response, clock.elapsed());
        Ok(response)
    }

    /// Rejects resolved sets that list the same (group, artifact, version) twice
    fn reject_duplicates(dependencies: &[DependencyCoordinate]) -> Result<()> {
        let mut seen = HashSet::new();
        for dependency in dependencies {
            let coordinate = dependency.coordinate_string();
            if !seen.insert(coordinate.clone()) {
                return Err(TrimError::DuplicateCoordinate { coordinate }.into());
            }
        }
        Ok(())
    }

    fn warn_unmatched_selection(
        &self,
        selection: &TrimSelection,
        dependencies: &[DependencyCoordinate],
    ) {
        for coordinate in selection.unmatched(dependencies) {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: '{}' does not match any resolved dependency.",
                coordinate
            ));
        }
    }

    fn staged_name(
        staged_names: &HashMap<String, String>,
        dependency: &DependencyCoordinate,
    ) -> String {
        staged_names
            .get(&dependency.coordinate_string())
            .cloned()
            .unwrap_or_else(|| dependency.archive_file_name())
    }

    /// Copies every archive into the staging directory and extracts them.
    ///
    /// Pass-through copies are byte-identical to the resolved archives.
    /// Per-archive problems are returned as staging failures; only a staging
    /// directory that cannot be prepared fails the run.
    async fn stage(
        &self,
        layout: &StagingLayout,
        dependencies: &[DependencyCoordinate],
        staged_names: &HashMap<String, String>,
    ) -> Result<StagingFailures> {
        let extracted_root = layout.extracted_root();
        self.progress_reporter.report(&format!(
            "📂 Staging {} archive(s) in {}",
            dependencies.len(),
            extracted_root.display()
        ));

        let staged: Vec<(String, PathBuf, PathBuf)> = dependencies
            .iter()
            .map(|dependency| {
                (
                    dependency.coordinate_string(),
                    dependency.archive().to_path_buf(),
                    extracted_root.join(Self::staged_name(staged_names, dependency)),
                )
            })
            .collect();
        let layout = layout.clone();
        let extractor = Arc::clone(&self.extractor);

        let (mut failures, extraction) = tokio::task::spawn_blocking(
            move || -> Result<(StagingFailures, ExtractionReport)> {
                fs_util::reset_dir(&layout.extracted_root())?;
                fs_util::reset_dir(&layout.debloated_root())?;
                std::fs::create_dir_all(layout.trimmed_dir()).with_context(|| {
                    format!("Failed to create directory {}", layout.trimmed_dir().display())
                })?;

                let mut failures = StagingFailures::new();
                for (coordinate, archive, target) in &staged {
                    let copied = validate_regular_file(archive, "Dependency archive").and_then(|_| {
                        std::fs::copy(archive, target)
                            .map(|_| ())
                            .with_context(|| format!("Failed to copy {}", archive.display()))
                    });
                    if let Err(e) = copied {
                        failures.insert(coordinate.clone(), format!("{:#}", e));
                    }
                }

                let extraction = extractor.extract_all(&layout.extracted_root())?;
                Ok((failures, extraction))
            },
        )
        .await
        .context("Staging task failed")??;

        let by_staged_path: HashMap<PathBuf, &DependencyCoordinate> = dependencies
            .iter()
            .map(|d| (extracted_root.join(Self::staged_name(staged_names, d)), d))
            .collect();
        for (archive, reason) in extraction.skipped {
            if let Some(dependency) = by_staged_path.get(&archive) {
                failures
                    .entry(dependency.coordinate_string())
                    .or_insert(reason);
            }
        }
        tracing::debug!(
            extracted = extraction.extracted.len(),
            failures = failures.len(),
            "staging finished"
        );

        Ok(failures)
    }

    /// Classifies every dependency, logs its type sections, and decides what happens to it.
    fn plan(
        &self,
        selection: &TrimSelection,
        dependencies: &[DependencyCoordinate],
        staging_failures: &StagingFailures,
    ) -> Vec<Plan> {
        dependencies
            .iter()
            .map(|dependency| {
                let coordinate = dependency.coordinate_string();
                let selected = selection.should_trim(dependency);
                let usage = match self.usage_analyzer.classify(dependency) {
                    Ok(usage) => usage,
                    Err(e) if selected => {
                        return Plan::Fail {
                            stage: TrimStage::Pruning,
                            reason: format!("{:#}", e),
                        }
                    }
                    Err(e) => {
                        tracing::warn!(coordinate = %coordinate, error = %e, "no usage information");
                        return Plan::PassThrough;
                    }
                };
                self.report_type_sections(dependency, &usage);

                if !selected {
                    return Plan::PassThrough;
                }
                match staging_failures.get(&coordinate) {
                    Some(reason) => Plan::Fail {
                        stage: TrimStage::Extracting,
                        reason: reason.clone(),
                    },
                    None => Plan::Trim(usage),
                }
            })
            .collect()
    }

    fn report_type_sections(&self, dependency: &DependencyCoordinate, usage: &TypeUsageRecord) {
        self.progress_reporter.report_section(
            &format!("ALL TYPES ({}) [{}]", dependency, usage.declared().len()),
            &format_type_set(usage.declared()),
        );
        self.progress_reporter.report_section(
            &format!("USED TYPES ({}) [{}]", dependency, usage.used().len()),
            &format_type_set(usage.used()),
        );
        let unused = usage.unused();
        self.progress_reporter.report_section(
            &format!("UNUSED TYPES ({}) [{}]", dependency, unused.len()),
            &format_type_set(&unused),
        );
    }

    /// Extract check, prune, repackage, specialize and publish one dependency.
    ///
    /// Returns an error only for a coordinate collision, which aborts the run.
    #[allow(clippy::too_many_arguments)]
    async fn trim_one(
        &self,
        index: usize,
        dependency: &DependencyCoordinate,
        staged_name: String,
        usage: TypeUsageRecord,
        request: &TrimRequest,
        specializer: &CoordinateSpecializer,
        registry: &SpecializedRegistry,
    ) -> Result<(usize, DependencyOutcome)> {
        let layout = &request.layout;
        let fail = |stage: TrimStage, reason: String| -> Result<(usize, DependencyOutcome)> {
            self.report_failure(dependency, stage, &reason);
            Ok((index, DependencyOutcome::Failed { stage, reason }))
        };

        let source_tree = layout.extracted_tree(&staged_name);
        if !source_tree.is_dir() {
            return fail(
                TrimStage::Extracting,
                format!("{} was not extracted", staged_name),
            );
        }

        let unused = usage.unused();
        let dest_tree = layout.debloated_tree(&staged_name);
        let pruned = {
            let dest_tree = dest_tree.clone();
            tokio::task::spawn_blocking(move || {
                SelectiveClassPruner::prune(&source_tree, &dest_tree, &unused)
            })
            .await
        };
        let prune_report = match pruned.context("Pruning task failed").and_then(|r| r) {
            Ok(report) => report,
            Err(e) => return fail(TrimStage::Pruning, format!("{:#}", e)),
        };
        if !prune_report.not_found.is_empty() {
            tracing::debug!(
                coordinate = %dependency.coordinate_string(),
                types = %format_type_set(&prune_report.not_found),
                "unused types without a class file"
            );
        }

        let trimmed_archive = layout.trimmed_archive(&staged_name);
        let repackaged = {
            let repackager = Arc::clone(&self.repackager);
            let archive = trimmed_archive.clone();
            tokio::task::spawn_blocking(move || repackager.repackage(&dest_tree, &archive)).await
        };
        if let Err(e) = repackaged.context("Repackaging task failed").and_then(|r| r) {
            return fail(TrimStage::Repackaging, format!("{:#}", e));
        }

        let specialized = match specializer.specialize(dependency.coordinate()) {
            Ok(specialized) => specialized,
            Err(e) => return fail(TrimStage::Publishing, format!("{:#}", e)),
        };
        register_specialized(registry, &specialized)?;

        let install = InstallRequest::new(
            request.repository.clone(),
            request.installer_packaging.clone(),
            trimmed_archive.clone(),
            specialized.specialized().clone(),
        );
        let publish_error = match self.publisher.publish(&install).await {
            Ok(()) => None,
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Trimmed {} but publishing {} failed: {:#}",
                    dependency.coordinate_string(),
                    specialized.specialized(),
                    e
                ));
                Some(format!("{:#}", e))
            }
        };

        self.progress_reporter.report(&format!(
            "   {} -> {} ({} type(s) removed)",
            dependency.coordinate_string(),
            specialized.specialized(),
            prune_report.removed.len()
        ));
        Ok((
            index,
            DependencyOutcome::Trimmed {
                specialized,
                trimmed_archive,
                removed_types: prune_report.removed,
                publish_error,
            },
        ))
    }

    fn collect_specialized(reports: &[DependencyReport]) -> Vec<SpecializedDependency> {
        let mut specialized: Vec<SpecializedDependency> = reports
            .iter()
            .filter_map(|report| match &report.outcome {
                DependencyOutcome::Trimmed { specialized, .. } => Some(specialized.clone()),
                _ => None,
            })
            .collect();
        specialized.sort();
        specialized
    }

    fn report_failure(&self, dependency: &DependencyCoordinate, stage: TrimStage, reason: &str) {
        self.progress_reporter.report_error(&format!(
            "❌ Failed to trim {} while {}: {}",
            dependency.coordinate_string(),
            stage,
            reason
        ));
    }

    fn report_summary(&self, response: &TrimResponse, elapsed: std::time::Duration) {
        let summary = response.summary();
        let mut message = format!(
            "Trimming finished in {}: {} trimmed, {} publish failed, {} failed, {} passed through",
            format_elapsed(elapsed),
            summary.trimmed,
            summary.publish_failed,
            summary.failed,
            summary.passed_through
        );
        if let Some(descriptors) = &response.descriptors {
            message.push_str(&format!(
                "; {} descriptor variant(s) written",
                descriptors.written.len()
            ));
            if !descriptors.failed.is_empty() {
                message.push_str(&format!(", {} skipped", descriptors.failed.len()));
            }
        }
        self.progress_reporter.report_completion(&message);
    }
}

/// Commits one specialized coordinate; a second original for the same coordinate is a collision.
fn register_specialized(
    registry: &SpecializedRegistry,
    specialized: &SpecializedDependency,
) -> Result<()> {
    match registry.entry(specialized.specialized().clone()) {
        Entry::Occupied(existing) => Err(TrimError::CoordinateCollision {
            specialized: specialized.specialized().to_string(),
            first: existing.get().to_string(),
            second: specialized.original().to_string(),
        }
        .into()),
        Entry::Vacant(slot) => {
            slot.insert(specialized.original().clone());
            Ok(())
        }
    }
}
