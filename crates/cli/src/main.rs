//! intelliask command-line tool.
//!
//! Offline companions to the server: sitemap generation from the configured
//! storage, copying a deployed sitemap, and one-shot questions for warming
//! the answer cache. Configuration is the same `INTELLIASK_*` layering the
//! server uses.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use intelliask_client::{GeminiClient, GeminiConfig};
use intelliask_core::{AppConfig, QuestionRegistry, QuestionService, ServiceOptions, open_storage, sitemap};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "intelliask")]
#[command(about = "Question answering cache utilities", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sitemap for all registered questions
    Sitemap {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Override the configured site URL
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Download a deployed sitemap to a local file
    #[command(name = "fetch-sitemap")]
    FetchSitemap {
        /// Sitemap URL
        #[arg(long)]
        url: String,

        /// Destination file
        #[arg(long)]
        out: PathBuf,
    },

    /// Answer one question through the cache and print the answer
    Ask {
        /// Question text
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    match cli.command {
        Commands::Sitemap { out, site_url } => {
            let site_url = site_url.unwrap_or_else(|| config.site_url.clone());
            let xml = render_sitemap(&config, &site_url).await?;
            match out {
                Some(path) => {
                    write_file(&path, &xml).await?;
                    eprintln!("Sitemap written to {}", path.display());
                }
                None => print!("{xml}"),
            }
        }
        Commands::FetchSitemap { url, out } => {
            let xml = fetch_sitemap(&url, &config).await?;
            write_file(&out, &xml).await?;
            eprintln!("Sitemap copied from {url} to {}", out.display());
        }
        Commands::Ask { question } => {
            let storage = open_storage(&config).await?;
            let generator = GeminiClient::new(GeminiConfig::from_app_config(&config))?;
            let service = QuestionService::new(storage, Arc::new(generator), ServiceOptions::from_config(&config));

            let answered = service.submit(&question).await?;
            eprintln!("slug: {} ({})", answered.slug, if answered.cache_hit { "cached" } else { "generated" });
            println!("{}", answered.answer);
        }
    }

    Ok(())
}

async fn render_sitemap(config: &AppConfig, site_url: &str) -> Result<String> {
    let registry = QuestionRegistry::new(open_storage(config).await?);
    let questions = registry.all().await.context("reading question registry")?;
    tracing::info!(entries = questions.len(), "rendering sitemap");
    Ok(sitemap::render(site_url, &questions))
}

async fn fetch_sitemap(url: &str, config: &AppConfig) -> Result<String> {
    let http = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()?;

    let response = http.get(url).send().await.with_context(|| format!("fetching {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("fetching {url} failed with HTTP {status}");
    }
    Ok(response.text().await?)
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("writing {}", path.display()))
}
