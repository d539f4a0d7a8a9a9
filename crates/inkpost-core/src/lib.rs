//! # Inkpost Core
//!
//! The domain layer of the Inkpost post service.
//! This crate holds the `Post` entity, the store error taxonomy and the
//! `PostStore` port. It performs no I/O.

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::Post;
pub use error::StoreError;
pub use ports::PostStore;
