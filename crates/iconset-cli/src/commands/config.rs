//! Show the persisted configuration

use anyhow::{Context, Result};
use iconset_session::{FileStore, PluginConfig};
use std::path::Path;

/// Run the config command
pub async fn run(store_path: &Path) -> Result<()> {
    let store = FileStore::new(store_path);
    let config = match PluginConfig::load(&store)
        .await
        .with_context(|| format!("Failed to read store {}", store_path.display()))?
    {
        Some(config) => config,
        None => {
            tracing::info!("No saved configuration, showing defaults");
            PluginConfig::default()
        }
    };
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
