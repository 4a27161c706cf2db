//! One UI session against a host.

use iconset_engine::{EngineOptions, GenerationSummary, Generator, Host};
use tracing::{debug, warn};

use crate::config::{ConfigStore, PluginConfig};
use crate::messages::{CreateComponent, PluginMessage, UiMessage};

/// Work queued to run after the synchronous pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum DeferredTask {
    SaveConfig(PluginConfig),
}

/// Outcome of draining the deferred queue.
#[derive(Debug, Default)]
pub struct DeferredReport {
    pub completed: usize,
    pub failures: Vec<(DeferredTask, String)>,
}

/// Handles UI messages one at a time.
///
/// Generation runs synchronously inside [`Session::handle`]. The only awaits
/// are on the config store, and configuration writes caused by a generation
/// wait in a queue until [`Session::run_deferred`] is called.
pub struct Session<H, S> {
    host: H,
    store: S,
    options: EngineOptions,
    deferred: Vec<DeferredTask>,
    last_summary: Option<GenerationSummary>,
}

impl<H: Host, S: ConfigStore> Session<H, S> {
    pub fn new(host: H, store: S, options: EngineOptions) -> Self {
        Self {
            host,
            store,
            options,
            deferred: Vec::new(),
            last_summary: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tasks waiting for [`Session::run_deferred`].
    pub fn pending(&self) -> &[DeferredTask] {
        &self.deferred
    }

    /// Summary of the most recent generation.
    pub fn last_summary(&self) -> Option<&GenerationSummary> {
        self.last_summary.as_ref()
    }

    /// Messages sent when the UI opens.
    pub async fn start(&mut self) -> Vec<PluginMessage> {
        let config = self.load_config().await;
        vec![PluginMessage::LoadConfig { config }, self.selection_changed()]
    }

    /// Handle one UI message. Errors are logged or shown as notices, never returned.
    pub async fn handle(&mut self, message: UiMessage) -> Option<PluginMessage> {
        match message {
            UiMessage::SaveConfig { config } => {
                if let Err(err) = config.save(&self.store).await {
                    warn!(error = %err, "failed to save config");
                }
                None
            }
            UiMessage::RequestConfig => Some(PluginMessage::LoadConfig {
                config: self.load_config().await,
            }),
            UiMessage::CreateComponent(payload) => {
                self.create_component(payload);
                Some(self.selection_changed())
            }
            UiMessage::Cancel => {
                debug!("session closed");
                self.host.close();
                None
            }
        }
    }

    /// Run a generation over the current selection.
    ///
    /// Accepted requests queue a save of their settings.
    pub fn create_component(&mut self, payload: CreateComponent) -> &GenerationSummary {
        let selection = self.host.document().selection().to_vec();
        let request = payload.into_request(selection);
        let summary = Generator::new(&mut self.host, &self.options).run(&request);
        if summary.is_accepted() {
            self.deferred.push(DeferredTask::SaveConfig(PluginConfig::from_request(&request)));
        }
        self.last_summary.insert(summary)
    }

    /// Drain the deferred queue. Failures are logged and reported.
    pub async fn run_deferred(&mut self) -> DeferredReport {
        let mut report = DeferredReport::default();
        for task in std::mem::take(&mut self.deferred) {
            let result = match &task {
                DeferredTask::SaveConfig(config) => config.save(&self.store).await,
            };
            match result {
                Ok(()) => report.completed += 1,
                Err(err) => {
                    warn!(error = %err, "deferred task failed");
                    report.failures.push((task, err.to_string()));
                }
            }
        }
        report
    }

    /// Describe the host selection for the UI.
    pub fn selection_changed(&self) -> PluginMessage {
        let doc = self.host.document();
        let selection = doc.selection();
        let selection_name = match selection {
            [] => None,
            [only] => doc.get(*only).map(|node| node.name.clone()),
            many => Some(format!("{} items", many.len())),
        };
        PluginMessage::SelectionChanged {
            has_selection: !selection.is_empty(),
            selection_name,
        }
    }

    async fn load_config(&self) -> Option<PluginConfig> {
        match PluginConfig::load(&self.store).await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "failed to load config");
                None
            }
        }
    }
}
