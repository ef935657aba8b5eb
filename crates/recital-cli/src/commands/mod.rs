pub mod assess;
pub mod batch;
pub mod compare;
pub mod init;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use recital_core::config::{load_config_from, RecitalConfig};
use recital_core::AlignmentStrategy;

/// Load config and apply a `--strategy` flag on top of it.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    strategy: Option<String>,
) -> Result<RecitalConfig> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(s) = strategy {
        config.assessment.strategy = s
            .parse::<AlignmentStrategy>()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    Ok(config)
}
