//! # Workspace Report Aggregation
//!
//! After every subproject's apply call has completed, the per-subproject
//! results are joined into a single [`WorkspaceReport`]: applied plugins,
//! resolution warnings, quality-gate findings, and publication status per
//! subproject, plus the overall pass status. Nothing in here aborts — by
//! the time a report exists, the pass has configured; only a workspace-fatal
//! error before subproject application produces an `aborted` status.
//!
//! The report renders as human-readable text (colorized through
//! [`OutputConfig`]) or as JSON for tooling.

use crate::catalog::ArtifactKey;
use crate::collaborators::{PublicationTransport, PublishResult};
use crate::error::Result;
use crate::output::{emoji, OutputConfig};
use crate::policy::WorkspaceIdentity;
use crate::quality::QualityFinding;
use crate::subproject::{PublicationStatus, Subproject};
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;

/// A dependency with no catalog entry and no explicit version. Non-fatal:
/// resolution is deferred to the artifact repositories at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyResolutionWarning {
    pub artifact: ArtifactKey,
}

impl fmt::Display for DependencyResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no catalog entry for {}; resolution deferred to repositories",
            self.artifact
        )
    }
}

/// Overall outcome of the configuration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceStatus {
    /// Every subproject was applied; warnings and findings may be present.
    Configured,
    /// A workspace-fatal error stopped the pass before any subproject was
    /// touched.
    Aborted,
}

impl WorkspaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceStatus::Configured => "configured",
            WorkspaceStatus::Aborted => "aborted",
        }
    }
}

/// Everything recorded for one subproject during the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubprojectReport {
    pub subproject: Subproject,
    pub warnings: Vec<DependencyResolutionWarning>,
    pub findings: Vec<QualityFinding>,
}

impl SubprojectReport {
    /// Plugin/dependency configuration always succeeds; this flag only goes
    /// false when a non-tolerating quality gate recorded findings.
    pub fn quality_gate_passed(&self) -> bool {
        self.findings.iter().all(|finding| finding.tolerated)
    }
}

/// The aggregated outcome of one workspace configuration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceReport {
    pub identity: WorkspaceIdentity,
    pub status: WorkspaceStatus,
    /// Number of artifact pins in the resolved catalog.
    pub catalog_pins: usize,
    /// Repositories deferred resolutions will consult.
    pub repositories: Vec<String>,
    pub subprojects: Vec<SubprojectReport>,
}

impl WorkspaceReport {
    pub fn total_warnings(&self) -> usize {
        self.subprojects.iter().map(|r| r.warnings.len()).sum()
    }

    pub fn total_findings(&self) -> usize {
        self.subprojects.iter().map(|r| r.findings.len()).sum()
    }

    /// Serialize the report for tooling.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Hand every described publication to the transport, in report order.
    ///
    /// Runs only after the whole workspace has configured; skipped and
    /// failed publication steps are left out.
    pub fn publish_all(
        &self,
        transport: &dyn PublicationTransport,
    ) -> Vec<(String, PublishResult)> {
        self.subprojects
            .iter()
            .filter_map(|report| {
                report
                    .subproject
                    .publication
                    .descriptor()
                    .map(|descriptor| (report.subproject.name.clone(), transport.publish(descriptor)))
            })
            .collect()
    }

    /// Render the per-subproject summary as text.
    pub fn render_text(&self, out: &OutputConfig) -> String {
        let mut text = String::new();
        let _ = writeln!(
            text,
            "{} Workspace {} — {}",
            emoji(out, "🏗️", "[WORKSPACE]"),
            self.identity,
            self.status.as_str()
        );
        let _ = writeln!(
            text,
            "  catalog: {} pinned version(s); repositories: {}",
            self.catalog_pins,
            self.repositories.join(", ")
        );

        for report in &self.subprojects {
            let subproject = &report.subproject;
            let _ = writeln!(text, "  {}", subproject.name);
            let plugins: Vec<&str> = subproject
                .applied_plugins
                .iter()
                .map(|p| p.id())
                .collect();
            let _ = writeln!(text, "    plugins: {}", plugins.join(", "));

            for warning in &report.warnings {
                let _ = writeln!(text, "    {} {}", emoji(out, "⚠️", "[WARN]"), warning);
            }

            for finding in &report.findings {
                let _ = writeln!(
                    text,
                    "    {} {}: {} finding(s){}",
                    emoji(out, "🔍", "[QUALITY]"),
                    finding.tool,
                    finding.violations.len(),
                    if finding.tolerated { " (tolerated)" } else { "" }
                );
            }

            match &subproject.publication {
                PublicationStatus::Described(descriptor) => {
                    let usages: Vec<String> = descriptor
                        .usages
                        .iter()
                        .map(|(kind, strategy)| format!("{}={}", kind, strategy))
                        .collect();
                    let _ = writeln!(
                        text,
                        "    {} publication {} ({})",
                        emoji(out, "📦", "[PUBLISH]"),
                        descriptor.coordinates,
                        usages.join(", ")
                    );
                }
                PublicationStatus::Skipped => {
                    let _ = writeln!(text, "    publication: skipped");
                }
                PublicationStatus::MissingComponent { message } => {
                    let _ = writeln!(
                        text,
                        "    {} publication failed: {}",
                        emoji(out, "❌", "[ERROR]"),
                        message
                    );
                }
            }
        }

        text
    }
}
