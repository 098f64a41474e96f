//! Command implementations for the common-build CLI

pub mod catalog;
pub mod configure;
pub mod validate;

use anyhow::Result;
use common_build::config::{self, Manifest};
use std::path::PathBuf;

/// Resolve the manifest path (default `.common-build.yaml`) and load it.
pub fn load_manifest(manifest: Option<PathBuf>) -> Result<Manifest> {
    let path = manifest.unwrap_or_else(|| PathBuf::from(".common-build.yaml"));
    if !path.exists() {
        anyhow::bail!("Manifest file not found: {}", path.display());
    }
    Ok(config::from_file(&path)?)
}
