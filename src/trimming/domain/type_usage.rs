use crate::shared::Result;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Extension of compiled-type files inside an archive
pub const CLASS_FILE_EXTENSION: &str = "class";

/// Fully qualified name of a compiled type, in dot-separated package notation
/// (`org.acme.Util`, nested types as `org.acme.Util$Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeId(String);

impl TypeId {
    /// Validates a type name.
    ///
    /// Type ids are turned into paths that get deleted, so anything that could
    /// address a file outside the staged tree is refused.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Type name cannot be empty");
        }
        if trimmed.contains('/') || trimmed.contains('\\') {
            anyhow::bail!("Type name '{}' must use dot-separated notation", trimmed);
        }
        if trimmed.split('.').any(|segment| segment.is_empty()) {
            anyhow::bail!("Type name '{}' contains an empty package segment", trimmed);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of the compiled-type file relative to the archive root:
    /// `org.acme.Util` becomes `org/acme/Util.class`.
    pub fn class_file_path(&self) -> PathBuf {
        let mut path: PathBuf = self.0.split('.').collect();
        path.set_extension(CLASS_FILE_EXTENSION);
        path
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Usage classification of one archive, as produced by the usage analyzer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeUsageRecord {
    declared: BTreeSet<TypeId>,
    used: BTreeSet<TypeId>,
}

impl TypeUsageRecord {
    pub fn new(declared: BTreeSet<TypeId>, used: BTreeSet<TypeId>) -> Self {
        Self { declared, used }
    }

    /// Builds a record from raw type names, rejecting invalid ones.
    pub fn from_names<D, U>(declared: D, used: U) -> Result<Self>
    where
        D: IntoIterator,
        D::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        let declared = declared
            .into_iter()
            .map(TypeId::new)
            .collect::<Result<BTreeSet<_>>>()?;
        let used = used.into_iter().map(TypeId::new).collect::<Result<BTreeSet<_>>>()?;
        Ok(Self::new(declared, used))
    }

    /// A record in which every declared type counts as used.
    pub fn fully_used(declared: BTreeSet<TypeId>) -> Self {
        Self {
            used: declared.clone(),
            declared,
        }
    }

    pub fn declared(&self) -> &BTreeSet<TypeId> {
        &self.declared
    }

    pub fn used(&self) -> &BTreeSet<TypeId> {
        &self.used
    }

    /// `declared − used`. Used types the analyzer reports but the archive does
    /// not declare have no effect.
    pub fn unused(&self) -> BTreeSet<TypeId> {
        self.declared.difference(&self.used).cloned().collect()
    }

    /// `declared ∩ used`, the types a trimmed archive keeps.
    pub fn retained(&self) -> BTreeSet<TypeId> {
        self.declared.intersection(&self.used).cloned().collect()
    }
}

/// Renders a set of type ids as `[a.B, c.D]` for the run log.
pub fn format_type_set(types: &BTreeSet<TypeId>) -> String {
    let names: Vec<&str> = types.iter().map(TypeId::as_str).collect();
    format!("[{}]", names.join(", "))
}
