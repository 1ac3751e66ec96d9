use crate::shared::Result;
use crate::trimming::domain::InstallRequest;
use async_trait::async_trait;

/// ArtifactPublisher port for installing trimmed archives into a repository
///
/// # Async Support
/// Installation usually runs an external program, so the method is async
/// and implementations must be `Send + Sync` to be shared by concurrent
/// per-dependency tasks.
#[async_trait]
pub trait ArtifactPublisher: Send + Sync {
    /// Installs the archive of `request` under its specialized coordinate
    ///
    /// # Errors
    /// Returns an error if the installer cannot be started, does not finish
    /// in time, or reports failure
    async fn publish(&self, request: &InstallRequest) -> Result<()>;
}

#[async_trait]
impl<T: ArtifactPublisher + ?Sized> ArtifactPublisher for Box<T> {
    async fn publish(&self, request: &InstallRequest) -> Result<()> {
        (**self).publish(request).await
    }
}
