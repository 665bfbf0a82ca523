//! Storage backends for the employee collection
//!
//! `json_file_store` is the flat-file store used in production;
//! `in_memory` backs unit tests and embedding without a file.

pub mod in_memory;
pub mod json_file_store;

pub use in_memory::InMemoryRepository;
pub use json_file_store::JsonFileStore;
