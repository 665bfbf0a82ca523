//! Shared plumbing for the employees service crates: logging setup and
//! small response types.

pub mod types;
pub mod utils;
