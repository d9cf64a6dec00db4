use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example config to the default location.
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    let config = setup_at_path(&path)?;
    println!(
        "Created {} (base currency {})",
        path.display(),
        config.base_currency
    );
    Ok(())
}

/// Writes the example config to `path` and returns it as loaded back from
/// disk. An existing file is never overwritten.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    let config = AppConfig::load_from_path(path)?;
    info!(
        config = %path.display(),
        data = %config.default_data_path()?.display(),
        "Created default configuration"
    );
    Ok(config)
}
