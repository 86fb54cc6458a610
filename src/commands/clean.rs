//! Remove generated output

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Delete the output directory if present.
pub fn run(out_dir: &Path) -> Result<()> {
    if out_dir.exists() {
        fs::remove_dir_all(out_dir)?;
        tracing::info!("Deleted: {:?}", out_dir);
    }
    Ok(())
}
