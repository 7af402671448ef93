use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use texbuild_core::FilterSettings;
use texbuild_inventory::PlayerInventory;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/texbuild.json";

/// Client configuration file: the filter settings plus the client toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(flatten)]
    pub settings: FilterSettings,
    /// Start with random placement mode on.
    pub random_mode_enabled: bool,
    /// Draw from backpack and character inventories when the server allows it.
    pub use_entire_inventory: bool,
}

impl ClientConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<ClientConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ClientConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                ClientConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }
}

/// Load a player inventory snapshot. Unlike the config, a bad snapshot is an error.
pub fn load_inventory_snapshot(path: &Path) -> Result<PlayerInventory> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory snapshot {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse inventory snapshot {}", path.display()))
}
