/// Use cases module containing application business logic orchestration
mod generate_descriptor_variants;
mod trim_dependencies;

pub use generate_descriptor_variants::GenerateDescriptorVariantsUseCase;
pub use trim_dependencies::TrimDependenciesUseCase;
