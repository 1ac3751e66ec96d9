use super::coordinate::{DependencyCoordinate, Scope};
use std::collections::BTreeSet;

/// How an empty trim selection is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Only dependencies explicitly listed are trimmed; an empty selection trims nothing.
    #[default]
    ExplicitOnly,
    /// An empty selection trims every dependency whose scope is not ignored.
    EmptyMeansAll,
}

/// The user's request: which dependencies to trim and which scopes to leave alone
#[derive(Debug, Clone, Default)]
pub struct TrimSelection {
    coordinates: BTreeSet<String>,
    ignored_scopes: BTreeSet<Scope>,
    policy: SelectionPolicy,
}

impl TrimSelection {
    pub fn new<C, S>(coordinates: C, ignored_scopes: S, policy: SelectionPolicy) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator<Item = Scope>,
    {
        Self {
            coordinates: coordinates
                .into_iter()
                .map(|c| c.into().trim().to_string())
                .collect(),
            ignored_scopes: ignored_scopes.into_iter().collect(),
            policy,
        }
    }

    pub fn coordinates(&self) -> &BTreeSet<String> {
        &self.coordinates
    }

    pub fn ignored_scopes(&self) -> &BTreeSet<Scope> {
        &self.ignored_scopes
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn is_scope_ignored(&self, scope: &Scope) -> bool {
        self.ignored_scopes.contains(scope)
    }

    /// A dependency is trimmed when it is selected and its scope is not ignored.
    pub fn should_trim(&self, dependency: &DependencyCoordinate) -> bool {
        if self.is_scope_ignored(dependency.scope()) {
            return false;
        }
        match self.policy {
            SelectionPolicy::EmptyMeansAll if self.coordinates.is_empty() => true,
            _ => self.coordinates.contains(&dependency.coordinate_string()),
        }
    }

    /// Selected coordinates that match none of `dependencies`.
    pub fn unmatched<'a>(&'a self, dependencies: &[DependencyCoordinate]) -> Vec<&'a str> {
        let known: BTreeSet<String> = dependencies
            .iter()
            .map(DependencyCoordinate::coordinate_string)
            .collect();
        self.coordinates
            .iter()
            .filter(|c| !known.contains(*c))
            .map(String::as_str)
            .collect()
    }
}
