//! Domain layer types and invariants.

pub mod filter;
pub mod pagination;
pub mod posts;
