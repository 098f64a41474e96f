//! # External Collaborators
//!
//! The orchestrator is a pure in-process configuration library. Everything
//! with real side effects — invoking the toolchain, resolving artifacts from
//! repositories, running quality tools, uploading publications — lives
//! behind the narrow traits in this module. The library only decides *what*
//! to ask of each collaborator; it performs no network or process I/O itself.
//!
//! The traits require `Sync` because subprojects are applied from a rayon
//! worker pool and every worker shares the same collaborator references.
//!
//! Alongside the traits sit the stock implementations the CLI and tests use:
//! a logging toolchain, an offline repository client that defers all
//! resolution, and a canned quality runner.

use crate::catalog::ArtifactKey;
use crate::publication::PublicationDescriptor;
use log::debug;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

/// Compile-toolchain seam. The orchestrator only sets properties on tasks;
/// invocation and diagnostics are the toolchain's responsibility.
pub trait Toolchain: Sync {
    /// Set the source encoding on one compile-like task of a subproject.
    fn set_encoding(&self, subproject: &str, task: &str, encoding: &str);
}

/// Outcome of asking the repository client about one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The client can supply the artifact at this version.
    Resolved { version: String },
    /// The client cannot answer now; resolution stays deferred.
    Unresolved,
}

/// Dependency-repository seam, consulted for every dependency the
/// subproject does not pin itself. `version_hint` carries the catalog pin
/// when the catalog has one.
pub trait RepositoryClient: Sync {
    fn resolve(&self, artifact: &ArtifactKey, version_hint: Option<&str>) -> Resolution;
}

/// What a quality tool reported for one subproject.
#[derive(Debug, Clone, Default)]
pub struct QualityOutcome {
    pub violations: Vec<String>,
    pub report_paths: Vec<String>,
}

/// Quality-tool seam. Report rendering happens on the runner's side; the
/// orchestrator only passes along which formats were requested.
pub trait QualityToolRunner: Sync {
    fn run(&self, tool: &str, subproject: &str, report_formats: &BTreeSet<String>) -> QualityOutcome;
}

/// Result of handing one publication descriptor to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishResult {
    Published,
    Rejected { reason: String },
}

/// Artifact-upload seam, invoked only after the whole workspace has
/// configured.
pub trait PublicationTransport {
    fn publish(&self, descriptor: &PublicationDescriptor) -> PublishResult;
}

/// The collaborator set one configuration pass runs against.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub toolchain: &'a dyn Toolchain,
    pub repository: &'a dyn RepositoryClient,
    pub quality: &'a dyn QualityToolRunner,
}

/// Toolchain that records every encoding assignment, for inspection by tests
/// and `--log-level debug` runs.
#[derive(Debug, Default)]
pub struct RecordingToolchain {
    assignments: Mutex<Vec<(String, String, String)>>,
}

impl RecordingToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(subproject, task, encoding)` triples in assignment order.
    pub fn assignments(&self) -> Vec<(String, String, String)> {
        self.assignments.lock().expect("toolchain lock poisoned").clone()
    }
}

impl Toolchain for RecordingToolchain {
    fn set_encoding(&self, subproject: &str, task: &str, encoding: &str) {
        debug!("{}: set {}.encoding = {}", subproject, task, encoding);
        self.assignments
            .lock()
            .expect("toolchain lock poisoned")
            .push((subproject.to_string(), task.to_string(), encoding.to_string()));
    }
}

/// Repository client for offline configuration passes: every lookup stays
/// unresolved, deferring resolution to the real repository at build time.
#[derive(Debug, Default)]
pub struct OfflineRepositoryClient;

impl RepositoryClient for OfflineRepositoryClient {
    fn resolve(&self, artifact: &ArtifactKey, version_hint: Option<&str>) -> Resolution {
        debug!(
            "deferring resolution of {} (hint: {})",
            artifact,
            version_hint.unwrap_or("none")
        );
        Resolution::Unresolved
    }
}

/// Quality runner that returns canned findings per tool. `clean()` makes
/// every tool come back empty.
#[derive(Debug, Default)]
pub struct StaticQualityRunner {
    findings: HashMap<String, Vec<String>>,
}

impl StaticQualityRunner {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn with_findings(tool: impl Into<String>, violations: Vec<String>) -> Self {
        let mut findings = HashMap::new();
        findings.insert(tool.into(), violations);
        Self { findings }
    }

    pub fn add_findings(mut self, tool: impl Into<String>, violations: Vec<String>) -> Self {
        self.findings.insert(tool.into(), violations);
        self
    }
}

impl QualityToolRunner for StaticQualityRunner {
    fn run(&self, tool: &str, subproject: &str, report_formats: &BTreeSet<String>) -> QualityOutcome {
        let violations = self.findings.get(tool).cloned().unwrap_or_default();
        let report_paths = report_formats
            .iter()
            .map(|format| format!("{}/build/reports/{}/main.{}", subproject, tool, format))
            .collect();
        QualityOutcome {
            violations,
            report_paths,
        }
    }
}
