//! Catalog command implementation
//!
//! Resolves and prints the workspace version catalog, one pin per line in
//! deterministic order, with the source of each pin.

use anyhow::Result;
use clap::Args;
use common_build::catalog::PinSource;
use common_build::output::{emoji, OutputConfig};
use common_build::phases::resolve;
use std::path::PathBuf;

/// Arguments for the catalog command
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Path to the workspace manifest
    #[arg(short, long, value_name = "PATH", env = "COMMON_BUILD_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

/// Execute the catalog command
pub fn execute(args: CatalogArgs, out: &OutputConfig) -> Result<()> {
    let manifest = super::load_manifest(args.manifest)?;
    let catalog = resolve::execute(&manifest)?;

    println!(
        "{} {} pinned version(s)",
        emoji(out, "📌", "[CATALOG]"),
        catalog.len()
    );
    for (key, version, source) in catalog.iter() {
        let origin = match source {
            PinSource::Bom(name) => format!("bom:{}", name),
            PinSource::Override => "override".to_string(),
        };
        println!("{} {} ({})", key, version, origin);
    }
    Ok(())
}
