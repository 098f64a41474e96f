//! # Publication Descriptors
//!
//! Builds the per-subproject publishing metadata: coordinates derived from
//! the workspace identity plus the subproject name, and one version-mapping
//! strategy per usage kind. The dual usage mapping is deliberate — published
//! consumers get precise compile-time versus runtime dependency metadata
//! instead of a single flattened graph:
//!
//! - the `api` usage resolves against the subproject's exposed compile-time
//!   configuration (`fromResolutionOfConfiguration(<name>)`),
//! - the `runtime` usage resolves against the full transitive runtime
//!   resolution result (`fromResolutionResult`).
//!
//! Building a descriptor fails with [`Error::MissingComponent`] when the
//! subproject has no buildable primary artifact to attach the publication
//! to. That failure is scoped to the subproject's publication step; the
//! applicator records it and moves on.

use crate::error::{Error, Result};
use crate::policy::{PublicationShape, WorkspaceIdentity};
use crate::subproject::SubprojectSpec;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Usage kinds consumers of a publication distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageKind {
    Api,
    Runtime,
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageKind::Api => f.write_str("api"),
            UsageKind::Runtime => f.write_str("runtime"),
        }
    }
}

/// How dependency versions for one usage are reported to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionStrategy {
    /// Versions come from the resolution of the named configuration.
    FromResolutionOfConfiguration(String),
    /// Versions come from the full transitive resolution result.
    FromResolutionResult,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStrategy::FromResolutionOfConfiguration(name) => {
                write!(f, "fromResolutionOfConfiguration({})", name)
            }
            ResolutionStrategy::FromResolutionResult => f.write_str("fromResolutionResult"),
        }
    }
}

/// Full coordinates of the published artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationCoordinates {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl fmt::Display for PublicationCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Publishing metadata for one subproject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationDescriptor {
    /// Publication name from the shape (e.g., "maven").
    pub name: String,
    pub coordinates: PublicationCoordinates,
    /// Version-mapping strategy per usage kind.
    pub usages: BTreeMap<UsageKind, ResolutionStrategy>,
    /// Companion artifacts published alongside the primary one.
    pub companions: Vec<String>,
}

/// Build the publication descriptor for one subproject.
pub fn build(
    shape: &PublicationShape,
    identity: &WorkspaceIdentity,
    spec: &SubprojectSpec,
) -> Result<PublicationDescriptor> {
    if !spec.has_primary_artifact {
        return Err(Error::MissingComponent {
            subproject: spec.name.clone(),
            message: "subproject builds no primary artifact to publish".to_string(),
        });
    }

    let mut usages = BTreeMap::new();
    usages.insert(
        UsageKind::Api,
        ResolutionStrategy::FromResolutionOfConfiguration(shape.api_configuration.clone()),
    );
    usages.insert(UsageKind::Runtime, ResolutionStrategy::FromResolutionResult);

    let companions = if shape.with_sources_and_docs {
        vec!["sources".to_string(), "docs".to_string()]
    } else {
        Vec::new()
    };

    Ok(PublicationDescriptor {
        name: shape.name.clone(),
        coordinates: PublicationCoordinates {
            group: identity.group.clone(),
            artifact: spec.name.clone(),
            version: identity.version.clone(),
        },
        usages,
        companions,
    })
}
