use async_trait::async_trait;
use jartrim::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Mock ArtifactPublisher recording every install request
///
/// Requests for artifact ids registered with `failing_for` are recorded and
/// then rejected, like an installer exiting with a non-zero status.
#[derive(Clone, Default)]
pub struct MockArtifactPublisher {
    pub requests: Arc<Mutex<Vec<InstallRequest>>>,
    failing: HashSet<String>,
}

#[allow(dead_code)]
impl MockArtifactPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, artifact_id: &str) -> Self {
        self.failing.insert(artifact_id.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<InstallRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn published_coordinates(&self) -> Vec<String> {
        let mut coordinates: Vec<String> = self
            .get_requests()
            .iter()
            .map(|r| r.coordinate().to_string())
            .collect();
        coordinates.sort();
        coordinates
    }
}

#[async_trait]
impl ArtifactPublisher for MockArtifactPublisher {
    async fn publish(&self, request: &InstallRequest) -> Result<()> {
        self.requests.lock().unwrap().push(request.clone());
        if self
            .failing
            .contains(request.coordinate().artifact_id.as_str())
        {
            return Err(TrimError::InstallerFailed {
                coordinate: request.coordinate().to_string(),
                details: "installer failed with exit code 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
