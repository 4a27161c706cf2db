//! Iconset CLI
//!
//! Runs variant generation on a JSON document outside an editor.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

/// Iconset - generate icon size variants
#[derive(Parser)]
#[command(name = "iconset")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate variant sets for the document's selection
    Generate {
        /// Document JSON file
        #[arg(short, long)]
        document: PathBuf,

        /// create-component payload JSON file
        #[arg(short, long)]
        request: PathBuf,

        /// Engine options JSON file
        #[arg(long)]
        options: Option<PathBuf>,

        /// Config store file
        #[arg(long, env = "ICONSET_STORE", default_value = "iconset-store.json")]
        store: PathBuf,

        /// Where to write the resulting document (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the persisted configuration
    Config {
        /// Config store file
        #[arg(long, env = "ICONSET_STORE", default_value = "iconset-store.json")]
        store: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            document,
            request,
            options,
            store,
            output,
        } => {
            commands::generate::run(
                &document,
                &request,
                options.as_deref(),
                &store,
                output.as_deref(),
            )
            .await?;
        }
        Commands::Config { store } => {
            commands::config::run(&store).await?;
        }
    }

    Ok(())
}
