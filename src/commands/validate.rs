//! Validate command implementation
//!
//! Parses the workspace manifest and resolves the version catalog without
//! applying anything. Surfaces exactly the errors that would abort a
//! configure pass: manifest problems and override conflicts.

use anyhow::Result;
use clap::Args;
use common_build::output::{emoji, OutputConfig};
use common_build::phases::resolve;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the workspace manifest
    #[arg(short, long, value_name = "PATH", env = "COMMON_BUILD_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

/// Execute the validate command
pub fn execute(args: ValidateArgs, out: &OutputConfig) -> Result<()> {
    let manifest = super::load_manifest(args.manifest)?;
    let catalog = resolve::execute(&manifest)?;

    println!(
        "{} Manifest valid: {} subproject(s), {} catalog pin(s)",
        emoji(out, "✅", "[OK]"),
        manifest.subprojects.len(),
        catalog.len()
    );
    Ok(())
}
