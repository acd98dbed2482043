//! Database models and DTOs shared across the API.

pub mod pagination;
pub mod task;
