//! File-backed post storage.

mod json_file;

pub use json_file::JsonFilePostStore;
