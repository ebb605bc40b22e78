use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use tabula::api::ApiClient;
use tabula::app::{App, AppEvent};
use tabula::config::Config;
use tabula::store::ArticleStore;
use tabula::ui;

/// Get the config directory path (~/.config/tabula/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("tabula"))
}

#[derive(Parser, Debug)]
#[command(name = "tabula", about = "Terminal CRUD client for article REST APIs")]
struct Args {
    /// Base URL of the articles API (overrides the config file)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Path to an alternate config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => {
            let config_dir = get_config_dir()?;
            if !config_dir.exists() {
                std::fs::create_dir_all(&config_dir)
                    .context("Failed to create config directory")?;
            }
            config_dir.join("config.toml")
        }
    };

    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let api_url = args.api_url.as_deref().unwrap_or(&config.api_url);
    let api = ApiClient::new(api_url)
        .with_context(|| format!("Invalid API base URL: {}", api_url))?;

    let store = ArticleStore::new(api);
    let mut app = App::new(store, &config);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    // Run the TUI
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
