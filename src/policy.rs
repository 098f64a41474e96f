//! # Policy Template
//!
//! The policy template is the central, immutable description of the shared
//! configuration the workspace applies to every subproject: which plugins to
//! attach, how the quality gates are set up, what shape published artifacts
//! take, and the source encoding. It is constructed once at
//! workspace-configuration time and then only ever read, shared by reference
//! into each subproject's apply call.
//!
//! All types here are plain value objects with structural equality. The stock
//! template shipped by [`PolicyTemplate::default_java_library`] mirrors the
//! conventional java-library setup: checkstyle/spotbugs/jacoco quality gates
//! with failures tolerated, UTF-8 everywhere, and a `maven` publication with
//! sources and docs companions.

use crate::quality::QualityGatePolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Group and version shared by every subproject in the workspace.
///
/// Set exactly once when the manifest is loaded; never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceIdentity {
    pub group: String,
    pub version: String,
}

impl fmt::Display for WorkspaceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.version)
    }
}

/// Identifier of a build plugin to attach to a subproject.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginRef(pub String);

impl PluginRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape of the publication every publishable subproject produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PublicationShape {
    /// Name of the publication (e.g., "maven").
    pub name: String,
    /// The configuration whose resolution backs the "api" usage mapping.
    pub api_configuration: String,
    /// Whether sources and docs companion artifacts accompany the primary
    /// artifact.
    pub with_sources_and_docs: bool,
}

impl Default for PublicationShape {
    fn default() -> Self {
        Self {
            name: "maven".to_string(),
            api_configuration: "compileClasspath".to_string(),
            with_sources_and_docs: true,
        }
    }
}

/// The shared configuration applied identically to every subproject.
///
/// Read-only for the lifetime of the configuration pass. Equality is
/// structural, so two templates built from the same manifest compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTemplate {
    /// Plugins attached to every subproject. A set: attaching an
    /// already-attached plugin is a no-op.
    pub plugins: BTreeSet<PluginRef>,
    /// Per-tool quality-gate settings, overridable per subproject.
    pub quality: Vec<QualityGatePolicy>,
    /// Publication shape for publishable subprojects.
    pub publication: PublicationShape,
    /// Source encoding set on every compile-like task.
    pub encoding: String,
}

impl Default for PolicyTemplate {
    fn default() -> Self {
        Self::default_java_library()
    }
}

impl PolicyTemplate {
    /// The stock java-library policy: library + publishing plugins, the three
    /// standard quality gates with failures tolerated, UTF-8 sources.
    pub fn default_java_library() -> Self {
        let plugins = [
            "java-library",
            "maven-publish",
            "dependency-management",
            "checkstyle",
            "spotbugs",
            "jacoco",
        ]
        .into_iter()
        .map(PluginRef::new)
        .collect();

        Self {
            plugins,
            quality: vec![
                QualityGatePolicy::new("checkstyle")
                    .with_config_file("config/checkstyle/checkstyle.xml")
                    .with_report_formats(["xml"]),
                QualityGatePolicy::new("spotbugs").with_report_formats(["html"]),
                QualityGatePolicy::new("jacoco").with_report_formats(["xml", "html"]),
            ],
            publication: PublicationShape::default(),
            encoding: "UTF-8".to_string(),
        }
    }
}
