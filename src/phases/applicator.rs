//! Phase 2: Subproject Application
//!
//! Applies the policy template to every discovered subproject:
//!
//! 1. Attach every plugin in the template's plugin set (set union, so
//!    re-attaching is a no-op).
//! 2. Inject the version catalog as the subproject's dependency-version
//!    source; the repository client is consulted for every versionless
//!    declaration and receives the catalog pin as a hint. Artifacts neither
//!    pinned nor resolvable are recorded as warnings, never hard failures,
//!    because repository resolution at build time may still satisfy them.
//! 3. Set the shared encoding on every compile-like task the subproject
//!    owns.
//! 4. Wire the quality gates and run them through the external tool runner.
//! 5. Build the publication descriptor, recording (not propagating) a
//!    missing-component failure.
//!
//! Subprojects never read each other's state, so the fan-out runs on a
//! rayon worker pool. The template and catalog are shared read-only; each
//! subproject's mutable state is written only by the one invocation that
//! owns it. The joined results are sorted by subproject name so the
//! aggregate is deterministic regardless of worker scheduling.

use crate::catalog::VersionCatalog;
use crate::collaborators::{Collaborators, Resolution};
use crate::config::{Manifest, WorkspaceSection};
use crate::policy::{PolicyTemplate, WorkspaceIdentity};
use crate::publication;
use crate::quality;
use crate::report::{DependencyResolutionWarning, SubprojectReport};
use crate::subproject::{
    PublicationStatus, ResolvedDependency, Subproject, SubprojectSpec, VersionSource,
};
use log::{debug, info};
use rayon::prelude::*;

/// Execute Phase 2: apply the template to every subproject in parallel.
pub fn execute(
    manifest: &Manifest,
    catalog: &VersionCatalog,
    collab: &Collaborators<'_>,
) -> Vec<SubprojectReport> {
    let mut reports: Vec<SubprojectReport> = manifest
        .subprojects
        .par_iter()
        .map(|spec| apply_one(&manifest.policy, &manifest.workspace, catalog, spec, collab))
        .collect();

    // Join barrier is behind us; order the results by name so the aggregate
    // is independent of worker scheduling.
    reports.sort_by(|a, b| a.subproject.name.cmp(&b.subproject.name));
    info!("applied shared policy to {} subproject(s)", reports.len());
    reports
}

/// Apply the policy template to one subproject.
///
/// Never fails: per-subproject conditions are recorded on the report. Only
/// this invocation writes the subproject's state.
pub fn apply_one(
    template: &PolicyTemplate,
    workspace: &WorkspaceSection,
    catalog: &VersionCatalog,
    spec: &SubprojectSpec,
    collab: &Collaborators<'_>,
) -> SubprojectReport {
    let mut subproject = Subproject::new(spec.name.clone());
    let mut warnings = Vec::new();

    // 1. Plugins: set union, idempotent.
    subproject.attach_plugins(&template.plugins);

    // 2. Dependency versions through the catalog. Workspace-wide injections
    //    come first, then the subproject's own declarations.
    for decl in workspace.dependencies.iter().chain(&spec.dependencies) {
        let artifact = decl.key();
        let resolved = match &decl.version {
            Some(version) => ResolvedDependency {
                artifact,
                version: Some(version.clone()),
                source: VersionSource::Declared,
            },
            None => {
                let hint = catalog.version_of(&artifact);
                match collab.repository.resolve(&artifact, hint) {
                    Resolution::Resolved { version } => {
                        let source = if hint == Some(version.as_str()) {
                            VersionSource::Catalog
                        } else {
                            VersionSource::Repository
                        };
                        ResolvedDependency {
                            artifact,
                            version: Some(version),
                            source,
                        }
                    }
                    // An unresolved answer falls back to the catalog pin when
                    // one exists; only a miss on both sides becomes a warning.
                    Resolution::Unresolved => match hint {
                        Some(version) => ResolvedDependency {
                            artifact,
                            version: Some(version.to_string()),
                            source: VersionSource::Catalog,
                        },
                        None => {
                            debug!("{}: no version for {} yet", spec.name, artifact);
                            warnings.push(DependencyResolutionWarning {
                                artifact: artifact.clone(),
                            });
                            ResolvedDependency {
                                artifact,
                                version: None,
                                source: VersionSource::Unresolved,
                            }
                        }
                    },
                }
            }
        };
        subproject.resolved_dependencies.push(resolved);
    }

    // 3. Uniform encoding on every compile-like task. Unconditional.
    for task in &spec.compile_tasks {
        collab.toolchain.set_encoding(&spec.name, task, &template.encoding);
        subproject
            .task_encodings
            .insert(task.clone(), template.encoding.clone());
    }

    // 4. Quality gates.
    subproject.quality_bindings = quality::wire(&template.quality, &spec.quality_overrides);
    let findings = quality::evaluate(&subproject.quality_bindings, &spec.name, collab.quality);

    // 5. Publication. A missing component fails this step only.
    let identity = WorkspaceIdentity {
        group: workspace.group.clone(),
        version: workspace.version.clone(),
    };
    subproject.publication = if !spec.publish {
        PublicationStatus::Skipped
    } else {
        match publication::build(&template.publication, &identity, spec) {
            Ok(descriptor) => PublicationStatus::Described(descriptor),
            Err(error) => PublicationStatus::MissingComponent {
                message: error.to_string(),
            },
        }
    };

    SubprojectReport {
        subproject,
        warnings,
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ArtifactKey;
    use crate::collaborators::{
        OfflineRepositoryClient, RecordingToolchain, RepositoryClient, StaticQualityRunner,
    };
    use crate::config;
    use std::sync::Mutex;

    /// Client that records every lookup and resolves exactly the hinted
    /// version, leaving unhinted artifacts deferred.
    #[derive(Default)]
    struct HintRecordingClient {
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl HintRecordingClient {
        fn calls(&self) -> Vec<(String, Option<String>)> {
            self.calls.lock().expect("client lock poisoned").clone()
        }
    }

    impl RepositoryClient for HintRecordingClient {
        fn resolve(&self, artifact: &ArtifactKey, version_hint: Option<&str>) -> Resolution {
            self.calls
                .lock()
                .expect("client lock poisoned")
                .push((artifact.to_string(), version_hint.map(str::to_string)));
            match version_hint {
                Some(version) => Resolution::Resolved {
                    version: version.to_string(),
                },
                None => Resolution::Unresolved,
            }
        }
    }

    /// Client that answers every lookup with one fixed version.
    struct FixedVersionClient(&'static str);

    impl RepositoryClient for FixedVersionClient {
        fn resolve(&self, _artifact: &ArtifactKey, _version_hint: Option<&str>) -> Resolution {
            Resolution::Resolved {
                version: self.0.to_string(),
            }
        }
    }

    fn collaborators<'a>(
        toolchain: &'a RecordingToolchain,
        repository: &'a OfflineRepositoryClient,
        quality: &'a StaticQualityRunner,
    ) -> Collaborators<'a> {
        Collaborators {
            toolchain,
            repository,
            quality,
        }
    }

    fn manifest() -> Manifest {
        config::parse(
            r#"
workspace:
  group: jp.gr.java_conf.stardiopside.silver.commons
  version: 1.0.2-SNAPSHOT
  dependencies:
    - { group: org.projectlombok, name: lombok }
catalog:
  imports:
    - name: base
      entries:
        - { group: org.projectlombok, name: lombok, version: "1.18.20" }
        - { group: org.springframework, name: spring-core, version: "5.3.9" }
subprojects:
  - name: silver-commons-core
    dependencies:
      - { group: org.springframework, name: spring-core }
  - name: silver-commons-support
    dependencies:
      - { group: org.example, name: unpinned }
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_apply_attaches_full_plugin_set() {
        let manifest = manifest();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let collab = collaborators(&toolchain, &OfflineRepositoryClient, &runner);

        let reports = execute(&manifest, &catalog, &collab);
        assert_eq!(reports.len(), 2);
        for report in &reports {
            assert_eq!(report.subproject.applied_plugins, manifest.policy.plugins);
        }
    }

    #[test]
    fn test_apply_resolves_versionless_deps_through_catalog() {
        let manifest = manifest();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let collab = collaborators(&toolchain, &OfflineRepositoryClient, &runner);

        let reports = execute(&manifest, &catalog, &collab);
        let core = &reports[0];
        assert_eq!(core.subproject.name, "silver-commons-core");
        // Workspace-injected lombok plus the subproject's own spring-core.
        assert_eq!(core.subproject.resolved_dependencies.len(), 2);
        assert_eq!(
            core.subproject.resolved_dependencies[0].version.as_deref(),
            Some("1.18.20")
        );
        assert_eq!(
            core.subproject.resolved_dependencies[1].source,
            VersionSource::Catalog
        );
        assert!(core.warnings.is_empty());
    }

    #[test]
    fn test_apply_records_warning_for_catalog_miss() {
        let manifest = manifest();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let collab = collaborators(&toolchain, &OfflineRepositoryClient, &runner);

        let reports = execute(&manifest, &catalog, &collab);
        let support = &reports[1];
        assert_eq!(support.subproject.name, "silver-commons-support");
        assert_eq!(support.warnings.len(), 1);
        assert_eq!(support.warnings[0].artifact.to_string(), "org.example:unpinned");
        assert_eq!(
            support.subproject.resolved_dependencies[1].source,
            VersionSource::Unresolved
        );
    }

    #[test]
    fn test_apply_sets_encoding_on_every_compile_task() {
        let manifest = manifest();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let collab = collaborators(&toolchain, &OfflineRepositoryClient, &runner);

        let reports = execute(&manifest, &catalog, &collab);
        for report in &reports {
            assert_eq!(report.subproject.task_encodings.len(), 2);
            assert_eq!(
                report.subproject.task_encodings.get("compile").map(String::as_str),
                Some("UTF-8")
            );
        }
        // 2 subprojects x 2 compile-like tasks
        assert_eq!(toolchain.assignments().len(), 4);
    }

    #[test]
    fn test_apply_builds_publication_descriptor() {
        let manifest = manifest();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let collab = collaborators(&toolchain, &OfflineRepositoryClient, &runner);

        let reports = execute(&manifest, &catalog, &collab);
        let descriptor = reports[0].subproject.publication.descriptor().unwrap();
        assert_eq!(
            descriptor.coordinates.to_string(),
            "jp.gr.java_conf.stardiopside.silver.commons:silver-commons-core:1.0.2-SNAPSHOT"
        );
    }

    #[test]
    fn test_repository_client_receives_catalog_pin_as_hint() {
        let manifest = manifest();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let client = HintRecordingClient::default();
        let collab = Collaborators {
            toolchain: &toolchain,
            repository: &client,
            quality: &runner,
        };

        let reports = execute(&manifest, &catalog, &collab);
        let calls = client.calls();
        assert!(calls.contains(&(
            "org.springframework:spring-core".to_string(),
            Some("5.3.9".to_string())
        )));
        assert!(calls.contains(&("org.example:unpinned".to_string(), None)));
        // A hinted answer matching the pin keeps the catalog as the source.
        assert_eq!(
            reports[0].subproject.resolved_dependencies[1].source,
            VersionSource::Catalog
        );
    }

    #[test]
    fn test_resolving_client_satisfies_catalog_miss_without_warning() {
        let manifest = manifest();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let client = FixedVersionClient("9.9");
        let collab = Collaborators {
            toolchain: &toolchain,
            repository: &client,
            quality: &runner,
        };

        let reports = execute(&manifest, &catalog, &collab);
        let support = &reports[1];
        assert!(support.warnings.is_empty());
        let unpinned = &support.subproject.resolved_dependencies[1];
        assert_eq!(unpinned.version.as_deref(), Some("9.9"));
        assert_eq!(unpinned.source, VersionSource::Repository);
    }

    #[test]
    fn test_declared_version_never_consults_repository() {
        let manifest = config::parse(
            r#"
workspace:
  group: org.example
  version: "1.0"
subprojects:
  - name: core
    dependencies:
      - { group: org.example, name: pinned-inline, version: "2.0" }
"#,
        )
        .unwrap();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let client = HintRecordingClient::default();
        let collab = Collaborators {
            toolchain: &toolchain,
            repository: &client,
            quality: &runner,
        };

        let reports = execute(&manifest, &catalog, &collab);
        assert!(client.calls().is_empty());
        assert_eq!(
            reports[0].subproject.resolved_dependencies[0].source,
            VersionSource::Declared
        );
    }

    #[test]
    fn test_apply_is_deterministic_across_runs() {
        let manifest = manifest();
        let catalog = crate::phases::resolve::execute(&manifest).unwrap();
        let toolchain = RecordingToolchain::new();
        let runner = StaticQualityRunner::clean();
        let collab = collaborators(&toolchain, &OfflineRepositoryClient, &runner);

        let first = execute(&manifest, &catalog, &collab);
        let second = execute(&manifest, &catalog, &collab);
        assert_eq!(first, second);
    }
}
