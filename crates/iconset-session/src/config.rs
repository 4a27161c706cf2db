//! Persisted plugin configuration and the stores that hold it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use iconset_engine::{GenerationRequest, VariantSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Store key of the persisted configuration.
pub const CONFIG_KEY: &str = "icon-variant-config";

/// Errors from a configuration store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid stored JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store backend failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Form settings remembered between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    pub component_name: String,
    pub property_name: String,
    pub variants: Vec<VariantSpec>,
    pub outline_flatten_enabled: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            component_name: "Icon Component".to_string(),
            property_name: "Size".to_string(),
            variants: vec![
                VariantSpec::new("Small", 16.0),
                VariantSpec::new("Medium", 24.0),
                VariantSpec::new("Large", 32.0),
            ],
            outline_flatten_enabled: false,
        }
    }
}

impl PluginConfig {
    /// The settings a request was made with.
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            component_name: request.component_name().to_string(),
            property_name: request.property_name().to_string(),
            variants: request.variants.clone(),
            outline_flatten_enabled: request.outline_flatten_enabled,
        }
    }

    /// Read the configuration from a store. `None` when nothing was saved yet.
    pub async fn load(store: &(impl ConfigStore + ?Sized)) -> Result<Option<Self>> {
        match store.get(CONFIG_KEY).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, store: &(impl ConfigStore + ?Sized)) -> Result<()> {
        store.set(CONFIG_KEY, serde_json::to_value(self)?).await
    }
}

/// Async key-value store of JSON blobs.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Store kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by one JSON object file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<serde_json::Map<String, Value>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Default::default()),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Backend(format!("{} is not a JSON object", self.path.display()))),
        }
    }
}

#[async_trait]
impl ConfigStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value);
        let text = serde_json::to_string_pretty(&Value::Object(entries))?;
        tokio::fs::write(&self.path, text).await?;
        debug!(path = %self.path.display(), key, "store written");
        Ok(())
    }
}
