use crate::ports::outbound::ArtifactPublisher;
use crate::shared::error::TrimError;
use crate::shared::time::format_elapsed;
use crate::shared::Result;
use crate::trimming::domain::InstallRequest;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Installer program used when none is configured
pub const DEFAULT_INSTALLER: &str = "mvn";

/// Installer timeout used when none is configured
pub const DEFAULT_INSTALLER_TIMEOUT: Duration = Duration::from_secs(300);

/// ProcessArtifactPublisher adapter running an external installer
///
/// Runs `<program> deploy:deploy-file -Durl=.. ...` once per trimmed archive.
/// The process is killed if it outlives the timeout; only its exit status
/// decides success.
#[derive(Debug, Clone)]
pub struct ProcessArtifactPublisher {
    program: PathBuf,
    timeout: Duration,
}

impl ProcessArtifactPublisher {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ProcessArtifactPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_INSTALLER, DEFAULT_INSTALLER_TIMEOUT)
    }
}

#[async_trait]
impl ArtifactPublisher for ProcessArtifactPublisher {
    async fn publish(&self, request: &InstallRequest) -> Result<()> {
        let coordinate = request.coordinate().to_string();
        let failed = |details: String| TrimError::InstallerFailed {
            coordinate: coordinate.clone(),
            details,
        };

        tracing::debug!(
            program = %self.program.display(),
            args = ?request.to_args(),
            "running installer"
        );

        let child = Command::new(&self.program)
            .args(request.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| failed(format!("failed to start '{}': {}", self.program.display(), e)))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output.map_err(|e| failed(e.to_string()))?,
            Err(_) => {
                return Err(failed(format!(
                    "installer did not finish within {}",
                    format_elapsed(self.timeout)
                ))
                .into())
            }
        };

        if !output.status.success() {
            tracing::debug!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "installer output"
            );
            let status = output
                .status
                .code()
                .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit code {}", code));
            return Err(failed(format!("installer failed with {}", status)).into());
        }

        Ok(())
    }
}

/// DisabledArtifactPublisher adapter used when publishing is turned off
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledArtifactPublisher;

#[async_trait]
impl ArtifactPublisher for DisabledArtifactPublisher {
    async fn publish(&self, request: &InstallRequest) -> Result<()> {
        tracing::debug!(coordinate = %request.coordinate(), "publishing disabled, skipping install");
        Ok(())
    }
}
