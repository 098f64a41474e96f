//! Property-based tests for version catalog resolution.
//!
//! These tests use proptest to generate random BOM/override inputs and
//! verify that the resolver's invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::catalog::{ArtifactKey, Bom, CatalogEntry, VersionCatalog};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn entry_strategy() -> impl Strategy<Value = CatalogEntry> {
        (
            "[a-c]",
            "[a-e]",
            prop::sample::select(vec!["1.0", "2.0", "3.1", "1.0.11.RELEASE"]),
        )
            .prop_map(|(group, name, version)| CatalogEntry {
                group,
                name,
                version: version.to_string(),
            })
    }

    fn boms_strategy() -> impl Strategy<Value = Vec<Bom>> {
        prop::collection::vec(prop::collection::vec(entry_strategy(), 0..6), 0..4).prop_map(
            |bom_entries| {
                bom_entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, entries)| Bom {
                        name: format!("bom-{}", i),
                        entries,
                    })
                    .collect()
            },
        )
    }

    /// Overrides generated as a map, so they never conflict internally.
    fn overrides_strategy() -> impl Strategy<Value = Vec<CatalogEntry>> {
        prop::collection::btree_map(
            ("[a-c]", "[a-e]"),
            prop::sample::select(vec!["7.0", "8.0"]),
            0..5,
        )
        .prop_map(|map: BTreeMap<(String, String), &str>| {
            map.into_iter()
                .map(|((group, name), version)| CatalogEntry {
                    group,
                    name,
                    version: version.to_string(),
                })
                .collect()
        })
    }

    proptest! {
        /// Property: resolution is deterministic (same inputs = same catalog)
        #[test]
        fn resolve_is_deterministic(imports in boms_strategy(), overrides in overrides_strategy()) {
            let first = VersionCatalog::resolve(&imports, &overrides).unwrap();
            let second = VersionCatalog::resolve(&imports, &overrides).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: an override always wins over any BOM-supplied version
        #[test]
        fn overrides_always_win(imports in boms_strategy(), overrides in overrides_strategy()) {
            let catalog = VersionCatalog::resolve(&imports, &overrides).unwrap();
            for entry in &overrides {
                prop_assert_eq!(
                    catalog.version_of(&entry.key()),
                    Some(entry.version.as_str()),
                    "override for {} should win",
                    entry.key()
                );
            }
        }

        /// Property: BOM import order only affects artifacts absent from the
        /// override set — for overridden keys, any permutation of the
        /// imports resolves identically
        #[test]
        fn bom_order_only_matters_for_artifacts_absent_from_overrides(
            imports in boms_strategy(),
            overrides in overrides_strategy(),
        ) {
            let forward = VersionCatalog::resolve(&imports, &overrides).unwrap();
            let mut reversed_imports = imports.clone();
            reversed_imports.reverse();
            let reversed = VersionCatalog::resolve(&reversed_imports, &overrides).unwrap();

            for entry in &overrides {
                prop_assert_eq!(
                    forward.version_of(&entry.key()),
                    reversed.version_of(&entry.key())
                );
            }
        }

        /// Property: every key in the resolved catalog has exactly one
        /// version, drawn from some input
        #[test]
        fn every_pin_comes_from_an_input(imports in boms_strategy(), overrides in overrides_strategy()) {
            let catalog = VersionCatalog::resolve(&imports, &overrides).unwrap();
            for (key, version, _) in catalog.iter() {
                let in_boms = imports.iter().flat_map(|b| &b.entries).any(|e| {
                    &e.key() == key && e.version == version
                });
                let in_overrides = overrides.iter().any(|e| &e.key() == key && e.version == version);
                prop_assert!(in_boms || in_overrides, "pin {}:{} has no source", key, version);
            }
        }

        /// Property: two overrides with the same key and different versions
        /// always fail with a conflict
        #[test]
        fn disagreeing_overrides_always_conflict(
            group in "[a-c]",
            name in "[a-e]",
            extra in prop::collection::vec(entry_strategy(), 0..4),
        ) {
            let mut overrides = vec![
                CatalogEntry { group: group.clone(), name: name.clone(), version: "1.0".to_string() },
                CatalogEntry { group, name, version: "2.0".to_string() },
            ];
            let clash = overrides[0].key();
            overrides.extend(extra.into_iter().filter(|e| e.key() != clash));

            prop_assert!(VersionCatalog::resolve(&[], &overrides).is_err());
        }
    }

    #[test]
    fn artifact_key_ordering_is_stable() {
        let a = ArtifactKey::new("a", "z");
        let b = ArtifactKey::new("b", "a");
        assert!(a < b, "ordering is group-major");
    }
}
