//! # Workspace Manifest Schema and Parsing
//!
//! This module defines the data structures that represent the
//! `.common-build.yaml` workspace manifest, as well as the logic for parsing
//! and validating it. The manifest declares everything the configuration
//! pass needs, once, at the workspace level:
//!
//! - **`workspace`**: shared identity (group/version), the repository list,
//!   and dependencies injected into every subproject.
//! - **`policy`**: the policy template — plugin set, quality gates,
//!   publication shape, encoding. Optional; the stock java-library template
//!   is used when omitted.
//! - **`catalog`**: BOM imports and explicit version overrides feeding the
//!   version catalog.
//! - **`subprojects`**: the discovered subprojects with their declared
//!   dependencies and local overrides.
//!
//! ## Parsing
//!
//! [`parse`] is the main entry point for parsing a YAML string into a
//! [`Manifest`]; [`from_file`] reads the manifest from disk first. Both
//! validate the result and attach fix-it hints to the most common mistakes.

use crate::catalog::{Bom, CatalogEntry};
use crate::error::{Error, Result};
use crate::policy::PolicyTemplate;
use crate::subproject::{DependencyDecl, SubprojectSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn default_repositories() -> Vec<String> {
    vec!["mavenCentral".to_string()]
}

/// The `workspace:` section: identity plus workspace-wide dependency policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSection {
    /// Group shared by all subprojects.
    pub group: String,
    /// Version shared by all subprojects.
    pub version: String,
    /// Artifact repositories consulted at build time; recorded here so
    /// resolution warnings can say where deferred lookups will go.
    #[serde(default = "default_repositories")]
    pub repositories: Vec<String>,
    /// Dependencies injected into every subproject in addition to its own
    /// declarations.
    #[serde(default)]
    pub dependencies: Vec<DependencyDecl>,
}

/// The `catalog:` section: inputs to version-catalog resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    /// BOM imports in order; later imports shadow earlier ones.
    #[serde(default)]
    pub imports: Vec<Bom>,
    /// Explicit per-artifact overrides; always win over BOMs.
    #[serde(default)]
    pub overrides: Vec<CatalogEntry>,
}

/// The complete workspace manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub workspace: WorkspaceSection,
    #[serde(default)]
    pub policy: PolicyTemplate,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub subprojects: Vec<SubprojectSpec>,
}

/// Parses a YAML string into a validated [`Manifest`].
pub fn parse(yaml_content: &str) -> Result<Manifest> {
    let manifest: Manifest =
        serde_yaml::from_str(yaml_content).map_err(|e| annotate_parse_error(&e))?;
    validate(&manifest)?;
    Ok(manifest)
}

/// Reads and parses a manifest file from disk.
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Attach a fix-it hint to the parse errors users hit most often.
fn annotate_parse_error(error: &serde_yaml::Error) -> Error {
    let message = error.to_string();
    let hint = if message.contains("missing field `workspace`") {
        Some("the manifest needs a top-level 'workspace:' block with 'group:' and 'version:'".to_string())
    } else if message.contains("missing field `group`") || message.contains("missing field `version`") {
        Some("'group:' and 'version:' are required under 'workspace:'".to_string())
    } else if message.contains("missing field `name`") {
        Some("every subproject and BOM import needs a 'name:'".to_string())
    } else {
        None
    };
    Error::ManifestParse { message, hint }
}

fn validate(manifest: &Manifest) -> Result<()> {
    let mut seen = BTreeSet::new();
    for spec in &manifest.subprojects {
        if spec.name.trim().is_empty() {
            return Err(Error::ManifestParse {
                message: "subproject with empty name".to_string(),
                hint: Some("give every entry under 'subprojects:' a non-empty 'name:'".to_string()),
            });
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(Error::ManifestParse {
                message: format!("duplicate subproject name '{}'", spec.name),
                hint: Some("subproject names must be unique within the workspace".to_string()),
            });
        }
    }

    if manifest.policy.encoding.trim().is_empty() {
        return Err(Error::ManifestParse {
            message: "policy.encoding is empty".to_string(),
            hint: Some("set 'encoding: UTF-8' (or remove the field to use the default)".to_string()),
        });
    }

    Ok(())
}
