//! # Version Catalog Resolution
//!
//! This module builds the single conflict-free version map shared by every
//! subproject in the workspace. The catalog is assembled from two inputs:
//!
//! 1. An ordered list of imported BOMs (bills of materials). Each BOM is a
//!    named set of artifact/version pairs imported as a unit. When two BOMs
//!    pin the same artifact, the later import wins silently — BOM authors
//!    expect shadowing, not conflicts.
//! 2. A set of explicit per-artifact overrides. Overrides always win over any
//!    BOM-supplied version. Two overrides that disagree on the same artifact
//!    are a hand-written contradiction and fail resolution with
//!    [`Error::VersionConflict`].
//!
//! Resolution is a pure function of its inputs: no I/O, no shared state, and
//! identical inputs (including BOM import order) always yield an identical
//! catalog. The catalog itself is backed by a `BTreeMap` so iteration order
//! is deterministic as well.
//!
//! Artifact versions are opaque strings compared by equality only. The
//! ecosystems this feeds (`1.0.11.RELEASE`, `2.5.3`, `1.0.2-SNAPSHOT`) do not
//! all follow semver, so no ordering or compatibility semantics are imposed
//! here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies an artifact by group and name, e.g. `org.dbunit:dbunit`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactKey {
    /// The artifact's group identifier (e.g., "org.springframework").
    pub group: String,
    /// The artifact's name within the group (e.g., "spring-core").
    pub name: String,
}

impl ArtifactKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// A single artifact/version pin inside a BOM or override set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl CatalogEntry {
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey::new(self.group.clone(), self.name.clone())
    }
}

/// A named, versioned set of artifact/version pairs imported as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bom {
    /// Display name of the BOM (e.g., "spring-boot-dependencies").
    pub name: String,
    /// The artifact pins this BOM supplies.
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

/// The source a catalog version came from, kept for the workspace summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PinSource {
    /// Supplied by the named BOM import.
    Bom(String),
    /// Supplied by an explicit override.
    Override,
}

/// Mapping from artifact to exactly one resolved version.
///
/// Immutable once resolved; every subproject reads the same instance by
/// reference for the duration of the configuration pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionCatalog {
    entries: BTreeMap<ArtifactKey, (String, PinSource)>,
}

impl VersionCatalog {
    /// Merge BOM imports and explicit overrides into one catalog.
    ///
    /// BOMs are applied in import order, later imports shadowing earlier
    /// ones. Overrides are applied last and win over any BOM. Two overrides
    /// naming the same artifact with different versions fail with
    /// [`Error::VersionConflict`]; repeating the same override is harmless.
    pub fn resolve(imports: &[Bom], overrides: &[CatalogEntry]) -> Result<Self> {
        // Override conflicts are checked first so resolution fails before
        // any merge output could be observed.
        let mut seen: BTreeMap<ArtifactKey, &str> = BTreeMap::new();
        for entry in overrides {
            let key = entry.key();
            if let Some(previous) = seen.get(&key) {
                if *previous != entry.version {
                    return Err(Error::VersionConflict {
                        artifact: key,
                        first: previous.to_string(),
                        second: entry.version.clone(),
                    });
                }
            } else {
                seen.insert(key, entry.version.as_str());
            }
        }

        let mut entries = BTreeMap::new();
        for bom in imports {
            for entry in &bom.entries {
                entries.insert(
                    entry.key(),
                    (entry.version.clone(), PinSource::Bom(bom.name.clone())),
                );
            }
        }
        for entry in overrides {
            entries.insert(entry.key(), (entry.version.clone(), PinSource::Override));
        }

        Ok(Self { entries })
    }

    /// Look up the resolved version for an artifact, if the catalog pins one.
    pub fn version_of(&self, key: &ArtifactKey) -> Option<&str> {
        self.entries.get(key).map(|(version, _)| version.as_str())
    }

    /// Where the pin for an artifact came from, if the catalog pins one.
    pub fn source_of(&self, key: &ArtifactKey) -> Option<&PinSource> {
        self.entries.get(key).map(|(_, source)| source)
    }

    /// Iterate pins in deterministic (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArtifactKey, &str, &PinSource)> {
        self.entries
            .iter()
            .map(|(key, (version, source))| (key, version.as_str(), source))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(group: &str, name: &str, version: &str) -> CatalogEntry {
        CatalogEntry {
            group: group.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    fn bom(name: &str, entries: Vec<CatalogEntry>) -> Bom {
        Bom {
            name: name.to_string(),
            entries,
        }
    }

    #[test]
    fn test_override_wins_over_bom() {
        // The canonical scenario: BOM {A:1.0, B:2.0}, override {A:1.5}.
        let imports = vec![bom(
            "base",
            vec![entry("org", "a", "1.0"), entry("org", "b", "2.0")],
        )];
        let overrides = vec![entry("org", "a", "1.5")];

        let catalog = VersionCatalog::resolve(&imports, &overrides).unwrap();
        assert_eq!(catalog.version_of(&ArtifactKey::new("org", "a")), Some("1.5"));
        assert_eq!(catalog.version_of(&ArtifactKey::new("org", "b")), Some("2.0"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_later_bom_import_wins_silently() {
        let imports = vec![
            bom("first", vec![entry("org", "a", "1.0")]),
            bom("second", vec![entry("org", "a", "1.1")]),
        ];

        let catalog = VersionCatalog::resolve(&imports, &[]).unwrap();
        assert_eq!(catalog.version_of(&ArtifactKey::new("org", "a")), Some("1.1"));
        assert_eq!(
            catalog.source_of(&ArtifactKey::new("org", "a")),
            Some(&PinSource::Bom("second".to_string()))
        );
    }

    #[test]
    fn test_conflicting_overrides_fail() {
        let overrides = vec![
            entry("org.dbunit", "dbunit", "2.7.2"),
            entry("org.dbunit", "dbunit", "2.6.0"),
        ];

        let err = VersionCatalog::resolve(&[], &overrides).unwrap_err();
        match err {
            Error::VersionConflict {
                artifact,
                first,
                second,
            } => {
                assert_eq!(artifact, ArtifactKey::new("org.dbunit", "dbunit"));
                assert_eq!(first, "2.7.2");
                assert_eq!(second, "2.6.0");
            }
            other => panic!("expected VersionConflict, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_identical_overrides_are_harmless() {
        let overrides = vec![
            entry("org.dbunit", "dbunit", "2.7.2"),
            entry("org.dbunit", "dbunit", "2.7.2"),
        ];

        let catalog = VersionCatalog::resolve(&[], &overrides).unwrap();
        assert_eq!(
            catalog.version_of(&ArtifactKey::new("org.dbunit", "dbunit")),
            Some("2.7.2")
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_conflict_detected_before_any_merge_output() {
        // Even with BOMs present, conflicting overrides must fail resolution
        // outright rather than produce a partial catalog.
        let imports = vec![bom("base", vec![entry("org", "a", "1.0")])];
        let overrides = vec![entry("org", "b", "1.0"), entry("org", "b", "2.0")];

        assert!(VersionCatalog::resolve(&imports, &overrides).is_err());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let imports = vec![
            bom("x", vec![entry("g", "a", "1"), entry("g", "b", "2")]),
            bom("y", vec![entry("g", "b", "3"), entry("g", "c", "4")]),
        ];
        let overrides = vec![entry("g", "c", "9")];

        let first = VersionCatalog::resolve(&imports, &overrides).unwrap();
        let second = VersionCatalog::resolve(&imports, &overrides).unwrap();
        assert_eq!(first, second);

        let keys: Vec<String> = first.iter().map(|(k, _, _)| k.to_string()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted, "iteration order should be sorted");
    }

    #[test]
    fn test_empty_inputs_yield_empty_catalog() {
        let catalog = VersionCatalog::resolve(&[], &[]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.version_of(&ArtifactKey::new("g", "a")), None);
    }
}
