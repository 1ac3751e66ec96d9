/// Integration tests for the application layer
mod test_utilities;

use jartrim::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_utilities::fixtures::{build_jar, descriptor, jar_entries};
use test_utilities::mocks::*;

type TestUseCase = TrimDependenciesUseCase<
    MockDependencySource,
    MockUsageAnalyzer,
    ZipArchiveCodec,
    ZipArchiveCodec,
    MockArtifactPublisher,
    MockProgressReporter,
>;

fn use_case(
    source: MockDependencySource,
    analyzer: MockUsageAnalyzer,
    publisher: &MockArtifactPublisher,
    reporter: &MockProgressReporter,
) -> TestUseCase {
    TrimDependenciesUseCase::new(
        source,
        analyzer,
        ZipArchiveCodec::new(),
        ZipArchiveCodec::new(),
        publisher.clone(),
        reporter.clone(),
    )
}

fn request(build_dir: &Path, selected: &[&str]) -> TrimRequest {
    TrimRequest::new(
        StagingLayout::new(build_dir, None),
        TrimSelection::new(
            selected.iter().copied(),
            vec![Scope::test()],
            SelectionPolicy::ExplicitOnly,
        ),
        "file:///tmp/m2/repository",
    )
}

fn outcome<'a>(response: &'a TrimResponse, coordinate: &str) -> &'a DependencyOutcome {
    &response
        .dependencies
        .iter()
        .find(|r| r.coordinate == coordinate)
        .unwrap()
        .outcome
}

#[tokio::test]
async fn test_util_scenario_removes_b_keeps_a() {
    let temp = TempDir::new().unwrap();
    let jar = temp.path().join("repo/util-1.0.jar");
    build_jar(&jar, &["org/acme/A.class", "org/acme/B.class"]);
    let build_dir = temp.path().join("target");

    let source = MockDependencySource::new("jar").with_dependency(
        "org.acme:util:1.0",
        Scope::compile(),
        &jar,
    );
    let analyzer = MockUsageAnalyzer::new().with_usage(
        "org.acme:util:1.0",
        &["org.acme.A", "org.acme.B"],
        &["org.acme.A"],
    );
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request(&build_dir, &["org.acme:util:1.0"]))
        .await
        .unwrap();

    // Pruned tree keeps A, drops B
    let pruned = build_dir.join("dependency-debloated/util-1.0");
    assert!(pruned.join("org/acme/A.class").exists());
    assert!(!pruned.join("org/acme/B.class").exists());

    // Trimmed archive under libs-debloated
    let trimmed = build_dir.join("libs-debloated/util-1.0.jar");
    assert_eq!(
        jar_entries(&trimmed),
        vec!["META-INF/MANIFEST.MF", "org/acme/A.class"]
    );

    // Published under the specialized coordinate
    assert_eq!(
        publisher.published_coordinates(),
        vec!["org.acme:util-debloated:1.0"]
    );
    let install = &publisher.get_requests()[0];
    assert_eq!(install.packaging(), "jar");
    assert_eq!(install.archive(), trimmed.as_path());

    assert_eq!(response.specialized.len(), 1);
    assert_eq!(
        response.specialized[0].original().to_string(),
        "org.acme:util:1.0"
    );
    assert_eq!(response.exit_code(), ExitCode::Success);
    assert!(reporter.contains("UNUSED TYPES (org.acme:util:1.0:compile) [1] [org.acme.B]"));
}

#[tokio::test]
async fn test_unselected_dependency_passes_through_byte_identical() {
    let temp = TempDir::new().unwrap();
    let util = temp.path().join("repo/util-1.0.jar");
    let core = temp.path().join("repo/core-2.0.jar");
    build_jar(&util, &["org/acme/A.class", "org/acme/B.class"]);
    build_jar(&core, &["org/acme/core/X.class"]);
    let build_dir = temp.path().join("target");

    let source = MockDependencySource::new("jar")
        .with_dependency("org.acme:util:1.0", Scope::compile(), &util)
        .with_dependency("org.acme:core:2.0", Scope::compile(), &core);
    let analyzer = MockUsageAnalyzer::new()
        .with_usage("org.acme:util:1.0", &["org.acme.A", "org.acme.B"], &["org.acme.A"])
        .with_usage("org.acme:core:2.0", &["org.acme.core.X"], &[]);
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request(&build_dir, &["org.acme:util:1.0"]))
        .await
        .unwrap();

    assert_eq!(
        outcome(&response, "org.acme:core:2.0"),
        &DependencyOutcome::PassedThrough
    );
    assert_eq!(
        fs::read(build_dir.join("dependency/core-2.0.jar")).unwrap(),
        fs::read(&core).unwrap()
    );
    assert!(!build_dir.join("libs-debloated/core-2.0.jar").exists());
    assert_eq!(response.summary().passed_through, 1);
    assert_eq!(response.summary().trimmed, 1);
}

#[tokio::test]
async fn test_archives_sharing_a_stem_are_trimmed_separately() {
    let temp = TempDir::new().unwrap();
    let jar = temp.path().join("a/util-1.0.jar");
    let war = temp.path().join("b/util-1.0.war");
    build_jar(&jar, &["org/acme/A.class", "org/acme/B.class"]);
    build_jar(&war, &["org/web/W.class", "org/web/V.class"]);
    let build_dir = temp.path().join("target");

    let source = MockDependencySource::new("jar")
        .with_dependency("org.acme:util:1.0", Scope::compile(), &jar)
        .with_dependency("org.web:util:1.0", Scope::compile(), &war);
    let analyzer = MockUsageAnalyzer::new()
        .with_usage("org.acme:util:1.0", &["org.acme.A", "org.acme.B"], &["org.acme.A"])
        .with_usage("org.web:util:1.0", &["org.web.W", "org.web.V"], &["org.web.W"]);
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request(&build_dir, &["org.acme:util:1.0", "org.web:util:1.0"]))
        .await
        .unwrap();

    assert_eq!(response.summary().trimmed, 2);
    assert_eq!(
        jar_entries(&build_dir.join("libs-debloated/org.acme.util-1.0.jar")),
        vec!["META-INF/MANIFEST.MF", "org/acme/A.class"]
    );
    assert_eq!(
        jar_entries(&build_dir.join("libs-debloated/org.web.util-1.0.jar")),
        vec!["META-INF/MANIFEST.MF", "org/web/W.class"]
    );
    assert!(!build_dir.join("libs-debloated/util-1.0.jar").exists());
}

#[tokio::test]
async fn test_empty_selection_trims_nothing_by_default() {
    let temp = TempDir::new().unwrap();
    let jar = temp.path().join("repo/util-1.0.jar");
    build_jar(&jar, &["org/acme/A.class", "org/acme/B.class"]);

    let source = MockDependencySource::new("jar").with_dependency(
        "org.acme:util:1.0",
        Scope::compile(),
        &jar,
    );
    let analyzer = MockUsageAnalyzer::new().with_usage(
        "org.acme:util:1.0",
        &["org.acme.A", "org.acme.B"],
        &["org.acme.A"],
    );
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request(&temp.path().join("target"), &[]))
        .await
        .unwrap();

    assert!(response.specialized.is_empty());
    assert!(publisher.get_requests().is_empty());
}

#[tokio::test]
async fn test_empty_selection_trims_everything_when_configured() {
    let temp = TempDir::new().unwrap();
    let util = temp.path().join("repo/util-1.0.jar");
    let junit = temp.path().join("repo/junit-4.13.jar");
    build_jar(&util, &["org/acme/A.class", "org/acme/B.class"]);
    build_jar(&junit, &["org/junit/Test.class"]);

    let source = MockDependencySource::new("jar")
        .with_dependency("org.acme:util:1.0", Scope::compile(), &util)
        .with_dependency("junit:junit:4.13", Scope::test(), &junit);
    let analyzer = MockUsageAnalyzer::new()
        .with_usage("org.acme:util:1.0", &["org.acme.A", "org.acme.B"], &["org.acme.A"])
        .with_usage("junit:junit:4.13", &["org.junit.Test"], &[]);
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let build_dir = temp.path().join("target");
    let mut request = request(&build_dir, &[]);
    request.selection = TrimSelection::new(
        Vec::<String>::new(),
        vec![Scope::test()],
        SelectionPolicy::EmptyMeansAll,
    );

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request)
        .await
        .unwrap();

    assert_eq!(
        publisher.published_coordinates(),
        vec!["org.acme:util-debloated:1.0"]
    );
    assert_eq!(
        outcome(&response, "junit:junit:4.13"),
        &DependencyOutcome::PassedThrough
    );
}

#[tokio::test]
async fn test_two_members_produce_four_descriptors() {
    let temp = TempDir::new().unwrap();
    let util = temp.path().join("repo/util-1.0.jar");
    let core = temp.path().join("repo/core-2.0.jar");
    build_jar(&util, &["org/acme/A.class", "org/acme/B.class"]);
    build_jar(&core, &["org/acme/core/X.class", "org/acme/core/Y.class"]);
    let base = temp.path().join("pom-debloated.xml");
    let base_xml = descriptor(&[
        ("org.acme", "util", "1.0"),
        ("org.acme", "core", "2.0"),
    ]);
    fs::write(&base, &base_xml).unwrap();

    let source = MockDependencySource::new("jar")
        .with_dependency("org.acme:util:1.0", Scope::compile(), &util)
        .with_dependency("org.acme:core:2.0", Scope::compile(), &core);
    let analyzer = MockUsageAnalyzer::new()
        .with_usage("org.acme:util:1.0", &["org.acme.A", "org.acme.B"], &["org.acme.A"])
        .with_usage(
            "org.acme:core:2.0",
            &["org.acme.core.X", "org.acme.core.Y"],
            &["org.acme.core.X"],
        );
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let mut request = request(
        &temp.path().join("target"),
        &["org.acme:util:1.0", "org.acme:core:2.0"],
    );
    request.descriptor_variants = Some(DescriptorVariantsRequest::new(
        base.clone(),
        vec![VariantMode::AllCombinations],
    ));

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request)
        .await
        .unwrap();

    let written = response.descriptors.unwrap().written;
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "pom-specialized_1_0_2.xml",
            "pom-specialized_2_1_2.xml",
            "pom-specialized_3_1_2.xml",
            "pom-specialized_4_2_2.xml",
        ]
    );

    // Members sorted by original coordinate: core first, then util
    let read = |name: &str| fs::read_to_string(temp.path().join(name)).unwrap();
    assert_eq!(read("pom-specialized_1_0_2.xml"), base_xml);

    let core_only = read("pom-specialized_2_1_2.xml");
    assert!(core_only.contains("<artifactId>core-debloated</artifactId>"));
    assert!(core_only.contains("<artifactId>util</artifactId>"));

    let util_only = read("pom-specialized_3_1_2.xml");
    assert!(util_only.contains("<artifactId>util-debloated</artifactId>"));
    assert!(util_only.contains("<artifactId>core</artifactId>"));

    let both = read("pom-specialized_4_2_2.xml");
    assert!(both.contains("<artifactId>core-debloated</artifactId>"));
    assert!(both.contains("<artifactId>util-debloated</artifactId>"));

    // The base descriptor is never modified
    assert_eq!(fs::read_to_string(&base).unwrap(), base_xml);
}

#[tokio::test]
async fn test_single_variant_with_epoch_versions() {
    let temp = TempDir::new().unwrap();
    let util = temp.path().join("repo/util-1.0.jar");
    build_jar(&util, &["org/acme/A.class", "org/acme/B.class"]);
    let base = temp.path().join("pom-debloated.xml");
    fs::write(&base, descriptor(&[("org.acme", "util", "1.0")])).unwrap();

    let source = MockDependencySource::new("jar").with_dependency(
        "org.acme:util:1.0",
        Scope::compile(),
        &util,
    );
    let analyzer = MockUsageAnalyzer::new().with_usage(
        "org.acme:util:1.0",
        &["org.acme.A", "org.acme.B"],
        &["org.acme.A"],
    );
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let mut request = request(&temp.path().join("target"), &["org.acme:util:1.0"]);
    request.version_policy = VersionPolicy::EpochSuffix;
    request.descriptor_variants = Some(DescriptorVariantsRequest::new(
        base,
        vec![VariantMode::Single],
    ));

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request)
        .await
        .unwrap();

    let specialized_version = response.specialized[0].specialized().version.to_string();
    let written = fs::read_to_string(temp.path().join("pom-specialized.xml")).unwrap();
    assert!(written.contains(&format!("<version>{}</version>", specialized_version)));
    assert!(written.contains("<artifactId>util-debloated</artifactId>"));
}

#[tokio::test]
async fn test_publish_failure_is_dependency_scoped() {
    let temp = TempDir::new().unwrap();
    let util = temp.path().join("repo/util-1.0.jar");
    let core = temp.path().join("repo/core-2.0.jar");
    build_jar(&util, &["org/acme/A.class", "org/acme/B.class"]);
    build_jar(&core, &["org/acme/core/X.class", "org/acme/core/Y.class"]);

    let source = MockDependencySource::new("jar")
        .with_dependency("org.acme:util:1.0", Scope::compile(), &util)
        .with_dependency("org.acme:core:2.0", Scope::compile(), &core);
    let analyzer = MockUsageAnalyzer::new()
        .with_usage("org.acme:util:1.0", &["org.acme.A", "org.acme.B"], &["org.acme.A"])
        .with_usage(
            "org.acme:core:2.0",
            &["org.acme.core.X", "org.acme.core.Y"],
            &["org.acme.core.X"],
        );
    let publisher = MockArtifactPublisher::new().failing_for("util-debloated");
    let reporter = MockProgressReporter::new();

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request(
            &temp.path().join("target"),
            &["org.acme:util:1.0", "org.acme:core:2.0"],
        ))
        .await
        .unwrap();

    assert!(matches!(
        outcome(&response, "org.acme:util:1.0"),
        DependencyOutcome::Trimmed {
            publish_error: Some(_),
            ..
        }
    ));
    assert!(matches!(
        outcome(&response, "org.acme:core:2.0"),
        DependencyOutcome::Trimmed {
            publish_error: None,
            ..
        }
    ));
    assert_eq!(publisher.get_requests().len(), 2);
    assert_eq!(response.exit_code(), ExitCode::PartialFailure);
    assert!(reporter
        .errors()
        .iter()
        .any(|m| m.contains("Trimmed org.acme:util:1.0 but publishing")));
}

#[tokio::test]
async fn test_ignored_scope_is_never_trimmed() {
    let temp = TempDir::new().unwrap();
    let junit = temp.path().join("repo/junit-4.13.jar");
    build_jar(&junit, &["org/junit/Test.class", "org/junit/Assert.class"]);

    let source = MockDependencySource::new("jar").with_dependency(
        "junit:junit:4.13",
        Scope::test(),
        &junit,
    );
    let analyzer = MockUsageAnalyzer::new().with_usage(
        "junit:junit:4.13",
        &["org.junit.Test", "org.junit.Assert"],
        &["org.junit.Test"],
    );
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let response = use_case(source, analyzer, &publisher, &reporter)
        .execute(request(&temp.path().join("target"), &["junit:junit:4.13"]))
        .await
        .unwrap();

    assert_eq!(
        outcome(&response, "junit:junit:4.13"),
        &DependencyOutcome::PassedThrough
    );
    assert!(publisher.get_requests().is_empty());
}

#[tokio::test]
async fn test_pom_project_is_skipped() {
    let temp = TempDir::new().unwrap();
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let response = use_case(
        MockDependencySource::new("pom"),
        MockUsageAnalyzer::new(),
        &publisher,
        &reporter,
    )
    .execute(request(&temp.path().join("target"), &[]))
    .await
    .unwrap();

    assert!(response.skipped.is_some());
    assert_eq!(response.exit_code(), ExitCode::Success);
    assert!(!temp.path().join("target").exists());
}

#[tokio::test]
async fn test_duplicate_coordinates_abort_the_run() {
    let temp = TempDir::new().unwrap();
    let jar = temp.path().join("repo/util-1.0.jar");
    build_jar(&jar, &["org/acme/A.class"]);

    let source = MockDependencySource::new("jar")
        .with_dependency("org.acme:util:1.0", Scope::compile(), &jar)
        .with_dependency("org.acme:util:1.0", Scope::test(), &jar);
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();

    let result = use_case(source, MockUsageAnalyzer::new(), &publisher, &reporter)
        .execute(request(&temp.path().join("target"), &[]))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TrimError>(),
        Some(TrimError::DuplicateCoordinate { .. })
    ));
}

#[tokio::test]
async fn test_json_report_drives_the_pipeline() {
    let temp = TempDir::new().unwrap();
    build_jar(
        &temp.path().join("libs/util-1.0.jar"),
        &["org/acme/A.class", "org/acme/B.class"],
    );
    let report_path = temp.path().join("report.json");
    fs::write(
        &report_path,
        r#"{
  "packaging": "jar",
  "dependencies": [
    {
      "group_id": "org.acme", "artifact_id": "util", "version": "1.0",
      "scope": "compile", "file": "libs/util-1.0.jar",
      "all_types": ["org.acme.A", "org.acme.B"], "used_types": ["org.acme.A"]
    }
  ]
}"#,
    )
    .unwrap();

    let report = JsonAnalysisReport::load(&report_path, &[]).unwrap();
    let publisher = MockArtifactPublisher::new();
    let reporter = MockProgressReporter::new();
    let use_case = TrimDependenciesUseCase::new(
        report.clone(),
        report,
        ZipArchiveCodec::new(),
        ZipArchiveCodec::new(),
        publisher.clone(),
        reporter.clone(),
    );

    let build_dir: PathBuf = temp.path().join("target");
    let response = use_case
        .execute(request(&build_dir, &["org.acme:util:1.0"]))
        .await
        .unwrap();

    assert_eq!(response.summary().trimmed, 1);
    assert_eq!(
        jar_entries(&build_dir.join("libs-debloated/util-1.0.jar")),
        vec!["META-INF/MANIFEST.MF", "org/acme/A.class"]
    );
}
