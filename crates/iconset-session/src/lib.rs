//! Session layer for icon variant generation.
//!
//! Connects the engine to the UI: the JSON message contract, the persisted
//! [`PluginConfig`] behind an async [`ConfigStore`], and a [`Session`] that
//! handles one message at a time and persists configuration as a deferred
//! task after each generation.

pub mod config;
pub mod messages;
pub mod session;

pub use config::{ConfigStore, FileStore, MemoryStore, PluginConfig, StoreError, CONFIG_KEY};
pub use messages::{CreateComponent, PluginMessage, UiMessage};
pub use session::{DeferredReport, DeferredTask, Session};
