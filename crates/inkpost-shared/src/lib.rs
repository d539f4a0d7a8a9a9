//! # Inkpost Shared
//!
//! Transport types shared by the HTML pages and the JSON API.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
