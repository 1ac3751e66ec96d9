/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod trim_request;
mod trim_response;

pub use trim_request::{DescriptorVariantsRequest, TrimRequest, VariantMode, DEFAULT_MAX_PARALLEL};
pub use trim_response::{DescriptorVariantsResponse, RunSummary, TrimResponse, VariantFailure};
