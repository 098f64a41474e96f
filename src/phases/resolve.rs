//! Phase 1: Catalog Resolution
//!
//! Builds the workspace version catalog from the manifest's `catalog:`
//! section. Runs exactly once per pass, before any subproject is applied,
//! so a version conflict aborts the pass with no partial state exposed.

use crate::catalog::VersionCatalog;
use crate::config::Manifest;
use crate::error::Result;
use log::info;

/// Execute Phase 1: resolve the workspace version catalog.
pub fn execute(manifest: &Manifest) -> Result<VersionCatalog> {
    let catalog = VersionCatalog::resolve(&manifest.catalog.imports, &manifest.catalog.overrides)?;
    info!(
        "resolved version catalog: {} pin(s) from {} BOM import(s) and {} override(s)",
        catalog.len(),
        manifest.catalog.imports.len(),
        manifest.catalog.overrides.len()
    );
    Ok(catalog)
}
