//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `common-build` library. It uses the `thiserror` library to create a
//! single `Error` enum covering all anticipated failure modes, providing
//! clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur while loading a workspace manifest and running the configuration
//!   pass. Each variant corresponds to a specific type of error and includes
//!   contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! ## Severity
//!
//! Only two variants are workspace-fatal and abort the configuration pass
//! before any subproject is touched:
//!
//! - `VersionConflict`: two explicit catalog overrides disagree on an
//!   artifact's version.
//! - `ManifestParse`: the workspace manifest could not be parsed or failed
//!   validation.
//!
//! All other per-subproject conditions (missing catalog entries, quality-gate
//! findings, missing publishable artifacts) are deliberately *not* errors at
//! the workspace level — they are recorded on the subproject's report so the
//! remaining subprojects still configure. `MissingComponent` exists as an
//! error type because the publication builder fails with it, but the
//! applicator converts it into a per-subproject publication status instead of
//! propagating it.

use crate::catalog::ArtifactKey;
use thiserror::Error;

/// Main error type for common-build operations
#[derive(Error, Debug)]
pub enum Error {
    /// Two explicit catalog overrides name the same artifact with different
    /// versions. This is the only workspace-wide resolution failure: BOM
    /// imports shadow each other silently, but overrides are hand-written
    /// and a disagreement between them is a mistake the user must fix.
    #[error("Version conflict for {artifact}: overrides declare both {first} and {second}")]
    VersionConflict {
        artifact: ArtifactKey,
        first: String,
        second: String,
    },

    /// An error occurred while parsing or validating the `.common-build.yaml`
    /// workspace manifest.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Manifest error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ManifestParse {
        message: String,
        /// Optional hint for how to fix the manifest issue
        hint: Option<String>,
    },

    /// A subproject requested a publication but has no buildable primary
    /// artifact to attach it to. Fatal only to that subproject's publication
    /// step; the applicator records it rather than propagating it.
    #[error("No publishable component in subproject '{subproject}': {message}")]
    MissingComponent { subproject: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error aborts the whole configuration pass.
    ///
    /// Workspace-fatal errors are detected before any subproject is applied,
    /// so no partial state is ever exposed alongside them.
    pub fn is_workspace_fatal(&self) -> bool {
        !matches!(self, Error::MissingComponent { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
