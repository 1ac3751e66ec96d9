use crate::application::dto::{
    DescriptorVariantsRequest, DescriptorVariantsResponse, VariantFailure, VariantMode,
};
use crate::ports::outbound::ProgressReporter;
use crate::shared::error::TrimError;
use crate::shared::fs_util::write_atomically;
use crate::shared::security::read_text_file;
use crate::shared::Result;
use crate::trimming::domain::{single_variant_path, Combination, SpecializedDependency};
use crate::trimming::services::{CombinationEnumerator, DescriptorDocument};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// GenerateDescriptorVariantsUseCase - writes specialized build descriptors
///
/// Starting from the fully debloated base descriptor, writes one descriptor
/// per requested combination of specialized dependencies. Every variant
/// parses its own copy of the base, so variants are written concurrently
/// without sharing any document.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct GenerateDescriptorVariantsUseCase<PR> {
    progress_reporter: PR,
}

impl<PR> GenerateDescriptorVariantsUseCase<PR>
where
    PR: ProgressReporter,
{
    pub fn new(progress_reporter: PR) -> Self {
        Self { progress_reporter }
    }

    /// Executes descriptor variant generation
    ///
    /// # Arguments
    /// * `request` - Base descriptor and requested modes
    /// * `members` - Every specialized dependency of the run
    ///
    /// # Returns
    /// The written descriptors and the variants that had to be skipped
    ///
    /// # Errors
    /// Returns an error, before anything is written, if the base descriptor
    /// cannot be read or parsed or if there are too many members to combine
    pub async fn execute(
        &self,
        request: &DescriptorVariantsRequest,
        members: &[SpecializedDependency],
    ) -> Result<DescriptorVariantsResponse> {
        let base_path = &request.base_descriptor;
        let xml = read_text_file(base_path, "build descriptor").map_err(|e| {
            TrimError::FileReadError {
                path: base_path.clone(),
                details: e.to_string(),
            }
        })?;
        let base = DescriptorDocument::parse(&xml).map_err(|e| TrimError::DescriptorParse {
            path: base_path.clone(),
            details: format!("{:#}", e),
        })?;
        self.warn_undeclared(&base, base_path, members);

        let planned = Self::plan(request, members)?;
        self.progress_reporter.report(&format!(
            "📝 Generating {} descriptor variant(s) from {}",
            planned.len(),
            base_path.display()
        ));

        let xml: Arc<str> = Arc::from(xml);
        let mut results: Vec<(usize, PathBuf, Result<()>)> = stream::iter(planned.into_iter().enumerate())
            .map(|(index, (combination, path))| {
                let xml = Arc::clone(&xml);
                async move {
                    let target = path.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        write_variant(&xml, combination.members(), &target)
                    })
                    .await
                    .map_err(|e| anyhow::anyhow!("Descriptor variant task failed: {}", e))
                    .and_then(|written| written);
                    (index, path, result)
                }
            })
            .buffer_unordered(request.max_parallel.max(1))
            .collect()
            .await;
        results.sort_by_key(|(index, _, _)| *index);

        let mut response = DescriptorVariantsResponse::default();
        for (_, path, result) in results {
            match result {
                Ok(()) => {
                    self.progress_reporter
                        .report(&format!("   Generated {}", display_name(&path)));
                    response.written.push(path);
                }
                Err(e) => {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Skipping descriptor variant {}: {:#}",
                        display_name(&path),
                        e
                    ));
                    response.failed.push(VariantFailure {
                        path,
                        reason: format!("{:#}", e),
                    });
                }
            }
        }

        Ok(response)
    }

    /// Every combination to write with its output path, in mode then ordinal order.
    fn plan(
        request: &DescriptorVariantsRequest,
        members: &[SpecializedDependency],
    ) -> Result<Vec<(Combination, PathBuf)>> {
        let base = &request.base_descriptor;
        let mut planned = Vec::new();
        for mode in &request.modes {
            match mode {
                VariantMode::Single => {
                    planned.push((
                        CombinationEnumerator::everything(members),
                        single_variant_path(base),
                    ));
                }
                VariantMode::AllCombinations => {
                    for combination in CombinationEnumerator::enumerate(members)? {
                        let path = combination.variant_path(base);
                        planned.push((combination, path));
                    }
                }
            }
        }
        Ok(planned)
    }

    fn warn_undeclared(
        &self,
        base: &DescriptorDocument,
        base_path: &Path,
        members: &[SpecializedDependency],
    ) {
        let declarations = base.declarations();
        for member in members {
            let declared = declarations
                .iter()
                .any(|d| member.matches_original(&d.group_id, &d.artifact_id));
            if !declared {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: {} is not declared in {}; its variants equal the base descriptor.",
                    member.original(),
                    base_path.display()
                ));
            }
        }
    }
}

/// Parses a fresh copy of the base, applies `members` and writes it to `path`.
fn write_variant(xml: &str, members: &[SpecializedDependency], path: &Path) -> Result<()> {
    let mut document = DescriptorDocument::parse(xml)?;
    let rewritten = document.apply_all(members);
    tracing::debug!(path = %path.display(), rewritten, "writing descriptor variant");
    write_atomically(path, document.to_xml_string()?.as_bytes())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
