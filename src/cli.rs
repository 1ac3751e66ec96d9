use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Default build directory, relative to the working directory
pub const DEFAULT_BUILD_DIR: &str = "target";

/// Default analysis report file name, inside the build directory
pub const DEFAULT_REPORT_FILE: &str = "jartrim-report.json";

/// Default base descriptor for variant generation
pub const DEFAULT_DESCRIPTOR: &str = "pom-debloated.xml";

/// Default run results file name, inside the build directory
pub const DEFAULT_RESULTS_FILE: &str = "trim-results.json";

/// Parses `--installer-timeout` as whole seconds.
fn parse_timeout(value: &str) -> Result<Duration, String> {
    let seconds: u64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid timeout: {}. Please specify whole seconds", value))?;
    if seconds == 0 {
        return Err("Timeout must be greater than 0 seconds".to_string());
    }
    Ok(Duration::from_secs(seconds))
}

/// Parses `--jobs`, which must be at least 1.
fn parse_jobs(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("Jobs must be at least 1".to_string()),
        Ok(jobs) => Ok(jobs),
        Err(_) => Err(format!("Invalid number of jobs: {}", value)),
    }
}

/// Trim unused classes out of JAR dependencies and generate specialized POM variants
#[derive(Parser, Debug, Default)]
#[command(name = "jartrim")]
#[command(version)]
#[command(about = "Trim unused classes out of JAR dependencies and generate specialized POM variants", long_about = None)]
pub struct Args {
    /// Analysis report listing dependencies with their declared and used types
    /// (defaults to <build-dir>/jartrim-report.json)
    #[arg(short, long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Build directory where archives are staged (defaults to target)
    #[arg(short, long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Dependency to trim as group:artifact:version
    /// Can be specified multiple times: -t org.acme:util:1.0 -t org.acme:core:2.0
    #[arg(short, long = "trim", value_name = "COORDINATE")]
    pub trim: Vec<String>,

    /// Scope whose dependencies are never trimmed (e.g., provided)
    #[arg(long = "ignore-scope", value_name = "SCOPE")]
    pub ignore_scope: Vec<String>,

    /// Never trim test-scoped dependencies
    #[arg(long)]
    pub ignore_tests: bool,

    /// Treat dependencies whose coordinate contains PATTERN as fully used
    #[arg(long = "ignore-dependency", value_name = "PATTERN")]
    pub ignore_dependency: Vec<String>,

    /// Base descriptor for variant generation (defaults to pom-debloated.xml)
    #[arg(short, long, value_name = "FILE")]
    pub descriptor: Option<PathBuf>,

    /// Write one descriptor with every trimmed dependency substituted
    #[arg(long)]
    pub specialized: bool,

    /// Write one descriptor per subset of the trimmed dependencies
    #[arg(long)]
    pub all_combinations: bool,

    /// Skip trimming entirely
    #[arg(long)]
    pub skip: bool,

    /// Do not install trimmed archives into a repository
    #[arg(long)]
    pub no_publish: bool,

    /// Installer program (defaults to mvn)
    #[arg(long, value_name = "PROGRAM")]
    pub installer: Option<String>,

    /// Seconds the installer may run before it is killed (defaults to 300)
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    pub installer_timeout: Option<Duration>,

    /// Repository URL handed to the installer (defaults to the local ~/.m2 repository)
    #[arg(long, value_name = "URL")]
    pub repository: Option<String>,

    /// Directory collecting trimmed archives (defaults to <build-dir>/libs-debloated)
    #[arg(long, value_name = "DIR")]
    pub trimmed_dir: Option<PathBuf>,

    /// Suffix appended to the artifact id of trimmed archives (defaults to -debloated)
    #[arg(long, value_name = "SUFFIX")]
    pub artifact_suffix: Option<String>,

    /// Append -trimmed-<timestamp> to the version of trimmed archives
    #[arg(long)]
    pub epoch_version: bool,

    /// Trim every dependency when no --trim is given
    #[arg(long)]
    pub trim_all_when_empty: bool,

    /// Write the run results as JSON (defaults to <build-dir>/trim-results.json)
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub result_json: Option<Option<PathBuf>>,

    /// Maximum number of dependencies trimmed at the same time (defaults to 4)
    #[arg(short, long, value_name = "N", value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Configuration file (defaults to jartrim.config.yml in the working directory, if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
