//! Settings command: show or update the [Materials] section.

use std::path::Path;

use anyhow::{Context, Result};
use mats_core::MaterialsSettings;
use tracing::info;

pub fn run(path: &Path, manage_gold: Option<bool>, show_menubutton: Option<bool>) -> Result<()> {
    let mut settings = MaterialsSettings::load_or_default(path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;

    let changed = manage_gold.is_some() || show_menubutton.is_some();
    if let Some(value) = manage_gold {
        settings.manage_gold = value;
    }
    if let Some(value) = show_menubutton {
        settings.show_menubutton = value;
    }

    if changed {
        settings
            .save(path)
            .with_context(|| format!("Failed to save settings to {}", path.display()))?;
        info!("Saved settings to {}", path.display());
    }

    println!("[{}]", mats_core::config::SETTINGS_SECTION);
    println!("show_menubutton = {}", settings.show_menubutton);
    println!("manage_gold = {}", settings.manage_gold);
    Ok(())
}
