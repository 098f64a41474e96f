//! # Common Build Library
//!
//! This library provides the core functionality for declaring a shared build
//! policy once and applying it uniformly to every subproject of a
//! multi-module workspace. It is designed to be used by the `common-build`
//! command-line tool but can also be integrated into other applications that
//! need policy propagation across subprojects.
//!
//! ## Quick Example
//!
//! ```
//! use common_build::collaborators::{
//!     Collaborators, OfflineRepositoryClient, RecordingToolchain, StaticQualityRunner,
//! };
//! use common_build::config;
//! use common_build::phases::orchestrator;
//!
//! let manifest = config::parse(r#"
//! workspace:
//!   group: com.example
//!   version: 1.0.0
//! catalog:
//!   overrides:
//!     - { group: org.dbunit, name: dbunit, version: "2.7.2" }
//! subprojects:
//!   - name: example-core
//! "#).unwrap();
//!
//! let toolchain = RecordingToolchain::new();
//! let quality = StaticQualityRunner::clean();
//! let collab = Collaborators {
//!     toolchain: &toolchain,
//!     repository: &OfflineRepositoryClient,
//!     quality: &quality,
//! };
//!
//! let report = orchestrator::execute_configure(&manifest, &collab).unwrap();
//! assert_eq!(report.subprojects.len(), 1);
//! assert_eq!(report.catalog_pins, 1);
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Manifest (`config`)**: Defines the schema for `.common-build.yaml`
//!   workspace manifests — identity, policy template, catalog inputs, and
//!   the subproject set.
//! - **Version Catalog (`catalog`)**: Merges ordered BOM imports with
//!   explicit overrides into one conflict-free version map shared by all
//!   subprojects.
//! - **Policy Template (`policy`)**: The immutable description of the shared
//!   configuration — plugin set, quality gates, publication shape, encoding.
//! - **Quality Gates (`quality`)**: Per-tool check wiring with a single,
//!   auditable failure-tolerance point.
//! - **Publications (`publication`)**: Per-subproject publishing metadata
//!   with distinct compile-time and runtime version mappings.
//! - **Collaborators (`collaborators`)**: Narrow traits for the toolchain,
//!   repository client, quality-tool runner, and publication transport the
//!   orchestrator calls; the library itself performs no I/O.
//! - **Phases (`phases`)**: The two-phase configuration pass — catalog
//!   resolution, then independent per-subproject template application.
//!
//! ## Execution Flow
//!
//! The main entry point is `phases::orchestrator::execute_configure`, which:
//!
//! 1. Resolves the version catalog once, workspace-wide. A version conflict
//!    aborts here, before any subproject is touched.
//! 2. Applies the policy template to every subproject independently (in
//!    parallel), recording warnings, quality findings, and publication
//!    status per subproject.
//! 3. Joins all results into a single `report::WorkspaceReport`.
//!
//! Per-subproject conditions never abort the pass; the report lists them and
//! the workspace still comes back as configured.

pub mod catalog;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod output;
pub mod phases;
pub mod policy;
pub mod publication;
pub mod quality;
pub mod report;
pub mod subproject;

#[cfg(test)]
mod catalog_proptest;
