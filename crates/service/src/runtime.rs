//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_storage_dir` without depending directly on `common`.

use std::path::Path;

/// Ensure the directory that will hold the JSON store file exists.
pub async fn ensure_storage_dir(file_path: impl AsRef<Path>) -> anyhow::Result<()> {
    common::env::ensure_parent_dir(file_path.as_ref()).await
}
