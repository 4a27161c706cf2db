//! Generate variant sets for a document

use anyhow::{Context, Result};
use iconset_core::Document;
use iconset_engine::{Canvas, EngineOptions};
use iconset_session::{CreateComponent, FileStore, Session, UiMessage};
use std::path::Path;

/// Run the generate command
pub async fn run(
    document_path: &Path,
    request_path: &Path,
    options_path: Option<&Path>,
    store_path: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let document: Document = read_json(document_path).context("Failed to load document")?;
    let payload: CreateComponent = read_json(request_path).context("Failed to load request")?;
    let options = match options_path {
        Some(path) => read_json(path).context("Failed to load options")?,
        None => EngineOptions::default(),
    };

    let document = generate(document, payload, options, FileStore::new(store_path)).await?;

    let text = serde_json::to_string_pretty(&document)?;
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Run one session over `document` and return the edited document.
async fn generate(
    document: Document,
    payload: CreateComponent,
    options: EngineOptions,
    store: FileStore,
) -> Result<Document> {
    let mut session = Session::new(Canvas::new(document), store, options);
    session.start().await;
    session.handle(UiMessage::CreateComponent(payload)).await;

    let report = session.run_deferred().await;
    for (_, error) in &report.failures {
        tracing::warn!("Could not save configuration: {}", error);
    }

    let mut canvas = session.into_host();
    for notice in canvas.drain_notices() {
        eprintln!("{}", notice.message);
    }
    Ok(canvas.into_document())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}
