//! # Subproject Model
//!
//! Two views of a subproject live here:
//!
//! - [`SubprojectSpec`]: the declared inputs discovered from the workspace
//!   manifest — name, declared dependencies, which compile-like tasks it
//!   owns, and per-subproject policy overrides.
//! - [`Subproject`]: the configured state produced by applying the policy
//!   template. Written only by the single applicator invocation that owns
//!   the subproject during the configuration pass, then frozen before task
//!   execution.
//!
//! Plugin attachment is modeled as set union over `applied_plugins` rather
//! than an imperative action with hidden state, which makes re-application
//! trivially a no-op.

use crate::catalog::ArtifactKey;
use crate::policy::PluginRef;
use crate::publication::PublicationDescriptor;
use crate::quality::{QualityGateBinding, QualityGatePolicy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

fn default_true() -> bool {
    true
}

fn default_compile_tasks() -> Vec<String> {
    vec!["compile".to_string(), "doc".to_string()]
}

/// One dependency declaration of a subproject (or of the whole workspace).
///
/// A declaration without a version is resolved through the version catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDecl {
    pub group: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl DependencyDecl {
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(self.group.clone(), self.name.clone())
    }
}

/// A subproject as declared in the workspace manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SubprojectSpec {
    pub name: String,
    /// Dependencies this subproject declares on top of the workspace-wide
    /// ones.
    #[serde(default)]
    pub dependencies: Vec<DependencyDecl>,
    /// Whether a publication is wired for this subproject at all.
    #[serde(default = "default_true")]
    pub publish: bool,
    /// Whether the subproject builds a primary artifact a publication could
    /// attach to. Aggregator-style subprojects set this to false.
    #[serde(default = "default_true")]
    pub has_primary_artifact: bool,
    /// Compile-like tasks owned by the subproject; the shared encoding is
    /// set on every one of them.
    #[serde(default = "default_compile_tasks")]
    pub compile_tasks: Vec<String>,
    /// Per-subproject quality-gate overrides, replacing the template's
    /// settings for the named tool.
    #[serde(default)]
    pub quality_overrides: Vec<QualityGatePolicy>,
}

impl SubprojectSpec {
    /// A spec with just a name and all defaults, mainly for tests.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            publish: true,
            has_primary_artifact: true,
            compile_tasks: default_compile_tasks(),
            quality_overrides: Vec::new(),
        }
    }
}

/// Where a dependency's effective version came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSource {
    /// The subproject declared the version explicitly.
    Declared,
    /// The version catalog supplied the version.
    Catalog,
    /// The repository client answered the lookup directly.
    Repository,
    /// No version anywhere yet; resolution stays deferred.
    Unresolved,
}

/// One dependency after running it through the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    pub artifact: ArtifactKey,
    pub version: Option<String>,
    pub source: VersionSource,
}

/// Outcome of the publication step for one subproject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationStatus {
    /// A descriptor was built and attached.
    Described(PublicationDescriptor),
    /// The subproject opted out of publishing; silently skipped.
    Skipped,
    /// Publishing was requested but no primary artifact exists. Fatal only
    /// to this step.
    MissingComponent { message: String },
}

impl PublicationStatus {
    pub fn descriptor(&self) -> Option<&PublicationDescriptor> {
        match self {
            PublicationStatus::Described(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}

/// The configured state of one subproject after the template was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subproject {
    pub name: String,
    /// Plugins attached to this subproject. Set semantics: attaching an
    /// already-attached plugin changes nothing.
    pub applied_plugins: BTreeSet<PluginRef>,
    /// The subproject's dependency view after catalog injection.
    pub resolved_dependencies: Vec<ResolvedDependency>,
    /// Encoding assigned per compile-like task.
    pub task_encodings: BTreeMap<String, String>,
    /// The quality gates wired onto this subproject.
    pub quality_bindings: Vec<QualityGateBinding>,
    /// Outcome of the publication step.
    pub publication: PublicationStatus,
}

impl Subproject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            applied_plugins: BTreeSet::new(),
            resolved_dependencies: Vec::new(),
            task_encodings: BTreeMap::new(),
            quality_bindings: Vec::new(),
            publication: PublicationStatus::Skipped,
        }
    }

    /// Attach every plugin in `plugins`. Idempotent by construction.
    pub fn attach_plugins<'a>(&mut self, plugins: impl IntoIterator<Item = &'a PluginRef>) {
        self.applied_plugins.extend(plugins.into_iter().cloned());
    }
}
