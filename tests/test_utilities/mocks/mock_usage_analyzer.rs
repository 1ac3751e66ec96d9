use jartrim::prelude::*;
use std::collections::HashMap;

/// Mock UsageAnalyzer with canned declared/used type sets per coordinate
#[derive(Clone, Default)]
pub struct MockUsageAnalyzer {
    usages: HashMap<String, TypeUsageRecord>,
}

#[allow(dead_code)]
impl MockUsageAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_usage(mut self, coordinate: &str, declared: &[&str], used: &[&str]) -> Self {
        let record =
            TypeUsageRecord::from_names(declared.iter().copied(), used.iter().copied()).unwrap();
        self.usages.insert(coordinate.to_string(), record);
        self
    }
}

impl UsageAnalyzer for MockUsageAnalyzer {
    fn classify(&self, dependency: &DependencyCoordinate) -> Result<TypeUsageRecord> {
        let key = dependency.coordinate_string();
        self.usages
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Mock analyzer has no usage for {}", key))
    }
}
