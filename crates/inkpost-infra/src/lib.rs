//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`.
//! Posts are persisted as a single JSON collection file.

pub mod storage;

pub use storage::JsonFilePostStore;
