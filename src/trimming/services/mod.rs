mod class_pruner;
mod combination_enumerator;
mod coordinate_specializer;
mod descriptor_document;

pub use class_pruner::{PruneReport, SelectiveClassPruner};
pub use combination_enumerator::{CombinationEnumerator, MAX_COMBINATION_MEMBERS};
pub use coordinate_specializer::{CoordinateSpecializer, VersionPolicy, DEFAULT_ARTIFACT_SUFFIX};
pub use descriptor_document::{DeclaredDependency, DescriptorDocument};
