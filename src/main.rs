use jartrim::adapters::outbound::archive::ZipArchiveCodec;
use jartrim::adapters::outbound::console::StderrProgressReporter;
use jartrim::adapters::outbound::filesystem::FileSystemWriter;
use jartrim::adapters::outbound::process::{DisabledArtifactPublisher, ProcessArtifactPublisher};
use jartrim::adapters::outbound::report::JsonAnalysisReport;
use jartrim::application::dto::{DescriptorVariantsRequest, TrimRequest, TrimResponse};
use jartrim::application::use_cases::TrimDependenciesUseCase;
use jartrim::cli::Args;
use jartrim::config::{discover_config, load_config_from_path, Settings, CONFIG_FILENAME};
use jartrim::logging::{init_logging, LogConfig};
use jartrim::ports::outbound::{ArtifactPublisher, OutputPresenter, ProgressReporter};
use jartrim::shared::error::{ExitCode, TrimError};
use jartrim::shared::Result;
use jartrim::trimming::domain::{ArtifactCoordinate, Scope, StagingLayout, TrimSelection};
use std::io::IsTerminal;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(exit_code_for(&e).as_i32());
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Parse command-line arguments
    let args = Args::parse_args();
    let colored = std::io::stderr().is_terminal();
    init_logging(&LogConfig::from_verbosity(args.verbose).with_ansi(colored))?;

    // Load configuration (explicit path, or auto-discovered)
    let config = match &args.config {
        Some(path) => {
            let config = load_config_from_path(path)?;
            eprintln!("📄 Loaded config from: {}", path.display());
            Some(config)
        }
        None => {
            let config = discover_config(Path::new("."))?;
            if config.is_some() {
                eprintln!("📄 Auto-discovered config file: {}", CONFIG_FILENAME);
            }
            config
        }
    };
    let settings = Settings::merge(args, config);
    validate_settings(&settings)?;

    let progress_reporter = StderrProgressReporter::with_colors(colored);
    if settings.skip {
        progress_reporter.report("⏭️  Dependency trimming is skipped.");
        return Ok(ExitCode::Success);
    }

    // Create adapters (Dependency Injection)
    let report = JsonAnalysisReport::load(&settings.report, &settings.ignore_dependencies)?;
    let publisher: Box<dyn ArtifactPublisher> = if settings.publish {
        Box::new(ProcessArtifactPublisher::new(
            settings.installer.clone(),
            settings.installer_timeout,
        ))
    } else {
        Box::new(DisabledArtifactPublisher)
    };

    // Create use case with injected dependencies
    let use_case = TrimDependenciesUseCase::new(
        report.clone(),
        report,
        ZipArchiveCodec::new(),
        ZipArchiveCodec::new(),
        publisher,
        &progress_reporter,
    );

    // Execute use case
    let response = use_case.execute(build_request(&settings)?).await?;

    // Present run results
    if let Some(path) = &settings.result_json {
        write_results(&response, path)?;
    }

    Ok(response.exit_code())
}

/// Rejects trim coordinates that are not `group:artifact:version`.
fn validate_settings(settings: &Settings) -> Result<()> {
    for coordinate in &settings.trim {
        if let Err(e) = ArtifactCoordinate::parse(coordinate) {
            return Err(TrimError::Validation {
                message: format!("Invalid --trim coordinate '{}': {}", coordinate, e),
            }
            .into());
        }
    }
    Ok(())
}

fn build_request(settings: &Settings) -> Result<TrimRequest> {
    let layout = StagingLayout::new(settings.build_dir.clone(), settings.trimmed_dir.clone());
    let selection = TrimSelection::new(
        settings.trim.iter().cloned(),
        settings.ignore_scopes.iter().map(Scope::new),
        settings.selection_policy,
    );

    let mut request = TrimRequest::new(layout, selection, resolve_repository(settings)?);
    request.artifact_suffix = settings.artifact_suffix.clone();
    request.version_policy = settings.version_policy;
    request.max_parallel = settings.jobs;
    if !settings.variant_modes.is_empty() {
        let mut variants = DescriptorVariantsRequest::new(
            settings.descriptor.clone(),
            settings.variant_modes.clone(),
        );
        variants.max_parallel = settings.jobs;
        request.descriptor_variants = Some(variants);
    }
    Ok(request)
}

/// The configured repository, or the local `~/.m2/repository` when publishing.
fn resolve_repository(settings: &Settings) -> Result<String> {
    if let Some(repository) = &settings.repository {
        return Ok(repository.clone());
    }
    if !settings.publish {
        return Ok(String::new());
    }
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .ok_or_else(|| TrimError::Validation {
            message: "Cannot locate the local repository: HOME is not set. Pass --repository."
                .to_string(),
        })?;
    let local = Path::new(&home).join(".m2").join("repository");
    Ok(format!("file://{}", local.display()))
}

fn write_results(response: &TrimResponse, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(response)?;
    FileSystemWriter::new(path.to_path_buf()).present(&json)?;
    eprintln!("📝 Run results written to {}", path.display());
    Ok(())
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<TrimError>() {
        Some(TrimError::Validation { .. }) => ExitCode::InvalidArguments,
        _ => ExitCode::ApplicationError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jartrim::application::dto::VariantMode;
    use std::path::PathBuf;

    fn settings(args: &[&str]) -> Settings {
        use clap::Parser;
        Settings::merge(Args::try_parse_from(args).unwrap(), None)
    }

    #[test]
    fn test_validate_settings_rejects_bad_coordinate() {
        let err = validate_settings(&settings(&["jartrim", "-t", "org.acme:util"])).unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::InvalidArguments);
        assert!(err.to_string().contains("Invalid --trim coordinate 'org.acme:util'"));
    }

    #[test]
    fn test_validate_settings_accepts_coordinates() {
        assert!(validate_settings(&settings(&["jartrim", "-t", "org.acme:util:1.0"])).is_ok());
    }

    #[test]
    fn test_build_request_maps_settings() {
        let settings = settings(&[
            "jartrim",
            "--build-dir",
            "build",
            "--repository",
            "file:///repo",
            "--all-combinations",
            "--jobs",
            "2",
            "--ignore-tests",
        ]);

        let request = build_request(&settings).unwrap();
        assert_eq!(request.repository, "file:///repo");
        assert_eq!(request.layout.build_dir(), Path::new("build"));
        assert_eq!(request.max_parallel, 2);
        assert!(request.selection.is_scope_ignored(&Scope::test()));
        let variants = request.descriptor_variants.unwrap();
        assert_eq!(variants.base_descriptor, PathBuf::from("pom-debloated.xml"));
        assert_eq!(variants.modes, vec![VariantMode::AllCombinations]);
        assert_eq!(variants.max_parallel, 2);
    }

    #[test]
    fn test_repository_not_needed_without_publishing() {
        let settings = settings(&["jartrim", "--no-publish"]);
        assert_eq!(resolve_repository(&settings).unwrap(), "");
    }

    #[test]
    fn test_application_errors_exit_with_three() {
        let err: anyhow::Error = TrimError::DuplicateCoordinate {
            coordinate: "g:a:1".to_string(),
        }
        .into();
        assert_eq!(exit_code_for(&err), ExitCode::ApplicationError);
    }
}
