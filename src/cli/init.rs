//! Init command - write a readiness.toml template

use crate::config::write_config_template;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub(super) fn run(path: &Path) -> Result<()> {
    let repo_path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !repo_path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", repo_path.display());
    }

    let config_path = write_config_template(&repo_path)?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!(
        "\n{}",
        style("Edit it, then run `readiness analyze` to assess the repository.").dim()
    );
    Ok(())
}
