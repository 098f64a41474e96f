//! Orchestrator for the complete configuration pass
//!
//! This module coordinates the phases to provide a clean API for one
//! workspace configuration pass: resolve the catalog once, fan out over the
//! subprojects, aggregate the results.

use super::{phase1, phase2};
use crate::collaborators::Collaborators;
use crate::config::Manifest;
use crate::error::Result;
use crate::policy::WorkspaceIdentity;
use crate::report::{WorkspaceReport, WorkspaceStatus};

/// Execute the complete configuration pass (Phases 1-2).
///
/// Phase 1 failures (version conflicts) abort before any subproject is
/// applied and surface as the returned error. Once Phase 2 starts,
/// per-subproject conditions are isolated: they land on the report, and the
/// pass as a whole still comes back `Configured` so the next execution
/// phase may proceed.
pub fn execute_configure(
    manifest: &Manifest,
    collab: &Collaborators<'_>,
) -> Result<WorkspaceReport> {
    // Phase 1: Catalog Resolution (workspace-fatal on conflict)
    let catalog = phase1::execute(manifest)?;

    // Phase 2: Subproject Application
    let subprojects = phase2::execute(manifest, &catalog, collab);

    Ok(WorkspaceReport {
        identity: WorkspaceIdentity {
            group: manifest.workspace.group.clone(),
            version: manifest.workspace.version.clone(),
        },
        status: WorkspaceStatus::Configured,
        catalog_pins: catalog.len(),
        repositories: manifest.workspace.repositories.clone(),
        subprojects,
    })
}
