use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use quote_config::WidgetConfig;
use quote_core::OutputFormat;

pub(crate) fn handle_config_show(config: &WidgetConfig, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json_str = serde_json::to_string_pretty(config)?;
            println!("{}", json_str);
        }
        OutputFormat::Text => {
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}

pub(crate) fn handle_config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let Some(path) = path.or_else(WidgetConfig::config_path) else {
        bail!("Cannot determine config directory; pass --config PATH");
    };
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, WidgetConfig::default_template())
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    eprintln!("Generated config template at: {}", path.display());
    Ok(())
}
