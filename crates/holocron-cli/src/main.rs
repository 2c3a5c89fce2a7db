//! Holocron - browse the Star Wars character catalog from the terminal.
//!
//! Fetches the full roster from SWAPI, caches it locally for 24 hours, and
//! prints roster listings, name searches, and single-character details.

mod cli;
mod config;
mod render;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use holocron_core::{
    filter_by_name, ApiClient, CacheManager, Catalog, CatalogFetcher, CatalogSource,
    DetailFetcher, FileStore, HttpTransport, MemoryStore,
};

use cli::{Cli, Command};
use config::Config;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    debug!(?config, "Loaded config");

    match cli.command {
        Command::List { refresh } => {
            let catalog = load_catalog(&config, cli.no_cache, refresh).await?;
            let all: Vec<_> = catalog.characters.iter().collect();
            print!("{}", render::render_roster(&all));
            eprintln!("{}", catalog_status(&catalog, all.len()));
        }
        Command::Search { query } => {
            let catalog = load_catalog(&config, cli.no_cache, false).await?;
            let found = filter_by_name(&catalog.characters, &query);
            if found.is_empty() {
                eprintln!("No characters match \"{}\"", query.trim());
            } else {
                print!("{}", render::render_roster(&found));
            }
            eprintln!("{}", catalog_status(&catalog, found.len()));
        }
        Command::Show { id } => {
            let fetcher = DetailFetcher::new(build_client(&config)?);
            let detail = fetcher.fetch(id).await?;
            print!("{}", render::render_detail(&detail));
        }
        Command::ClearCache => {
            build_cache(&config, cli.no_cache)?.clear()?;
            info!("Cleared catalog cache");
            println!("Cache cleared");
        }
        Command::Config { init } => {
            if init {
                if config.init().context("Failed to save config")? {
                    println!("Config written");
                } else {
                    println!("Config file already exists, left unchanged");
                }
            }
            println!("base_url:        {}", config.base_url());
            println!("request_timeout: {}s", config.request_timeout().as_secs());
            println!("cache_dir:       {}", config.cache_dir()?.display());
        }
    }

    Ok(())
}

fn build_client(config: &Config) -> Result<ApiClient> {
    let transport = HttpTransport::with_timeout(config.request_timeout())?;
    Ok(ApiClient::with_transport(Arc::new(transport), config.base_url()))
}

fn build_cache(config: &Config, no_cache: bool) -> Result<CacheManager> {
    if no_cache {
        return Ok(CacheManager::new(MemoryStore::new()));
    }
    let store = FileStore::new(config.cache_dir()?)?;
    Ok(CacheManager::new(store))
}

async fn load_catalog(config: &Config, no_cache: bool, refresh: bool) -> Result<Catalog> {
    let fetcher = CatalogFetcher::new(build_client(config)?, build_cache(config, no_cache)?);
    if refresh {
        fetcher.refresh().await
    } else {
        fetcher.load().await
    }
}

fn catalog_status(catalog: &Catalog, shown: usize) -> String {
    let source = match catalog.source {
        CatalogSource::Cache => format!("cached {}", catalog.age_display(Utc::now())),
        CatalogSource::Network => "fetched from SWAPI".to_string(),
    };
    format!("{} of {} characters ({})", shown, catalog.len(), source)
}
