//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores and helpers to avoid duplication
//! across backings that persist small maps as JSON.

pub mod json_map_store;
