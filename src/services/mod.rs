//! Business logic for list retrieval.

pub mod filter;
pub mod task;
