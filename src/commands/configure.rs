//! Configure command implementation
//!
//! Runs the full 2-phase configuration pass:
//! 1. Resolve the workspace version catalog (fatal on conflict)
//! 2. Apply the policy template to every subproject
//!
//! and prints the per-subproject summary. Only workspace-fatal errors exit
//! non-zero; resolution warnings and tolerated quality findings are part of
//! a successful, configured pass.

use anyhow::Result;
use clap::Args;
use common_build::collaborators::{
    Collaborators, OfflineRepositoryClient, RecordingToolchain, StaticQualityRunner,
};
use common_build::output::{emoji, OutputConfig};
use common_build::phases::orchestrator;
use std::path::PathBuf;

/// Arguments for the configure command
#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Path to the workspace manifest
    #[arg(short, long, value_name = "PATH", env = "COMMON_BUILD_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: String,

    /// Suppress the summary, keep only errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the configure command
pub fn execute(args: ConfigureArgs, out: &OutputConfig) -> Result<()> {
    let manifest = super::load_manifest(args.manifest)?;

    // The CLI configures offline: encodings are logged, artifact resolution
    // stays deferred, and no quality tool is invoked.
    let toolchain = RecordingToolchain::new();
    let repository = OfflineRepositoryClient;
    let quality = StaticQualityRunner::clean();
    let collab = Collaborators {
        toolchain: &toolchain,
        repository: &repository,
        quality: &quality,
    };

    let report = orchestrator::execute_configure(&manifest, &collab)?;

    if args.quiet {
        return Ok(());
    }

    match args.format.as_str() {
        "json" => println!("{}", report.to_json()?),
        _ => {
            print!("{}", report.render_text(out));
            if report.total_warnings() > 0 {
                println!(
                    "{} {} resolution warning(s); see the repository list above",
                    emoji(out, "⚠️", "[WARN]"),
                    report.total_warnings()
                );
            }
        }
    }

    Ok(())
}
