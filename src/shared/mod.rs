/// Shared utilities and error types used across all layers
pub mod error;
pub mod fs_util;
pub mod result;
pub mod security;
pub mod time;

pub use result::Result;
