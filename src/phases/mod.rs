//! Implementation of the 2 phases of the workspace configuration pass.
//!
//! ## Overview
//!
//! The configuration pass follows 2 phases:
//! 1. Catalog Resolution - Merge BOM imports and overrides into the single
//!    workspace version catalog. Any failure here is workspace-fatal and
//!    aborts before a single subproject is touched.
//! 2. Subproject Application - Apply the policy template to every discovered
//!    subproject. Subprojects are independent of each other, so this phase
//!    fans out over a worker pool; per-subproject conditions (resolution
//!    warnings, quality findings, missing publishable artifacts) are
//!    recorded, never fatal.
//!
//! Aggregation into the workspace report happens only after every
//! subproject's apply call has completed, because the workspace summary
//! depends on having seen every outcome.

// Phase modules
pub mod applicator;
pub mod orchestrator;
pub mod resolve;

// Re-export phase modules to preserve public API
pub use applicator as phase2;
pub use resolve as phase1;
