use jartrim::prelude::*;
use std::path::Path;

/// Mock DependencySource returning a fixed project
#[derive(Clone)]
pub struct MockDependencySource {
    project: ResolvedProject,
}

#[allow(dead_code)]
impl MockDependencySource {
    pub fn new(packaging: &str) -> Self {
        Self {
            project: ResolvedProject::new(packaging, Vec::new()),
        }
    }

    pub fn with_dependency(mut self, coordinate: &str, scope: Scope, archive: &Path) -> Self {
        self.project.dependencies.push(DependencyCoordinate::new(
            ArtifactCoordinate::parse(coordinate).unwrap(),
            scope,
            archive.to_path_buf(),
        ));
        self
    }
}

impl DependencySource for MockDependencySource {
    fn resolve(&self) -> Result<ResolvedProject> {
        Ok(self.project.clone())
    }
}
