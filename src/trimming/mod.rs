//! Trimming domain: coordinates, type usage, staging layout and the stateless
//! services that prune, rename and rewrite.
pub mod domain;
pub mod services;
