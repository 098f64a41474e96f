//! # Quality-Gate Policy
//!
//! Quality gates are the style/bug-pattern/coverage checks run against each
//! subproject. The one deliberate design point here is failure tolerance: a
//! subproject failing a check must never prevent sibling subprojects from
//! configuring. The tolerance decision is concentrated in a single place,
//! [`QualityGateBinding::tolerates_failures`], instead of ad hoc flags
//! scattered per tool, so the policy stays auditable.
//!
//! Wiring a gate does not run the tool. The binding only declares which tool
//! runs against the subproject and which report formats are requested; the
//! actual invocation and rendering belong to the external
//! [`QualityToolRunner`](crate::collaborators::QualityToolRunner).

use crate::collaborators::QualityToolRunner;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn default_true() -> bool {
    true
}

/// Per-tool quality-gate settings, one instance per tool per subproject.
///
/// Derived from the shared policy template; a subproject may carry its own
/// override for a tool, which replaces the template's settings wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct QualityGatePolicy {
    /// Tool identifier (e.g., "checkstyle", "spotbugs", "jacoco").
    pub tool: String,
    /// Whether findings from this tool are tolerated. Defaults to true: the
    /// stock policy records and reports violations but never aborts.
    #[serde(default = "default_true")]
    pub ignore_failures: bool,
    /// Report formats requested from the external renderer.
    #[serde(default)]
    pub report_formats: BTreeSet<String>,
    /// Tool configuration file, relative to the workspace root.
    #[serde(default)]
    pub config_file: Option<String>,
}

impl QualityGatePolicy {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            ignore_failures: true,
            report_formats: BTreeSet::new(),
            config_file: None,
        }
    }

    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_report_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.report_formats = formats.into_iter().map(Into::into).collect();
        self
    }
}

/// A quality gate wired onto one specific subproject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityGateBinding {
    /// The effective policy for this subproject (template or override).
    pub policy: QualityGatePolicy,
}

impl QualityGateBinding {
    /// The single point where the tolerance policy is consulted.
    pub fn tolerates_failures(&self) -> bool {
        self.policy.ignore_failures
    }
}

/// Findings recorded for one tool run against one subproject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityFinding {
    pub tool: String,
    /// Violation messages reported by the tool runner.
    pub violations: Vec<String>,
    /// Paths of the reports the renderer produced.
    pub report_paths: Vec<String>,
    /// Whether the binding tolerated these findings. With the stock policy
    /// this is always true; an untolerated finding marks the subproject's
    /// gate as failed but still never aborts the workspace pass.
    pub tolerated: bool,
}

/// Derive the effective per-tool bindings for one subproject.
///
/// Template policies are taken in template order; a subproject override for
/// the same tool replaces the template entry. Overrides naming tools the
/// template does not carry add new gates at the end.
pub fn wire(template: &[QualityGatePolicy], overrides: &[QualityGatePolicy]) -> Vec<QualityGateBinding> {
    let mut bindings: Vec<QualityGateBinding> = template
        .iter()
        .map(|policy| {
            let effective = overrides
                .iter()
                .find(|o| o.tool == policy.tool)
                .unwrap_or(policy);
            QualityGateBinding {
                policy: effective.clone(),
            }
        })
        .collect();

    for extra in overrides {
        if !bindings.iter().any(|b| b.policy.tool == extra.tool) {
            bindings.push(QualityGateBinding {
                policy: extra.clone(),
            });
        }
    }

    bindings
}

/// Run every wired gate against a subproject and record the findings.
///
/// Violations never propagate as errors from here. Tools that come back
/// clean leave no trace in the result; tools with findings are recorded
/// (and logged when the binding does not tolerate them).
pub fn evaluate(
    bindings: &[QualityGateBinding],
    subproject: &str,
    runner: &dyn QualityToolRunner,
) -> Vec<QualityFinding> {
    let mut findings = Vec::new();

    for binding in bindings {
        let outcome = runner.run(&binding.policy.tool, subproject, &binding.policy.report_formats);
        if outcome.violations.is_empty() {
            continue;
        }

        let tolerated = binding.tolerates_failures();
        if !tolerated {
            warn!(
                "{}: {} reported {} violation(s) and the gate does not tolerate failures",
                subproject,
                binding.policy.tool,
                outcome.violations.len()
            );
        }
        findings.push(QualityFinding {
            tool: binding.policy.tool.clone(),
            violations: outcome.violations,
            report_paths: outcome.report_paths,
            tolerated,
        });
    }

    findings
}
