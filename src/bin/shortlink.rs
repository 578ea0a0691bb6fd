//! Command-line client for the shortening backend.
//!
//! Uses the same validation, API client and offline cache as the web
//! server, without going through HTTP routes.
//!
//! # Usage
//!
//! ```bash
//! # Check a URL the way the web form does
//! cargo run --bin shortlink -- validate example.com
//!
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin shortlink -- shorten https://example.com --alias promo
//!
//! # Show link info / resolve a short code
//! cargo run --bin shortlink -- info abc123
//! cargo run --bin shortlink -- resolve abc123
//!
//! # Verify that every build asset can be cached from an origin
//! cargo run --bin shortlink -- offline check --manifest build/manifest.json --origin http://localhost:4173
//! ```
//!
//! # Environment Variables
//!
//! - `PUBLIC_API_BASE_URL`: backend base URL (or `--api-base-url`)

use shortlink_web::application::services::LinkService;
use shortlink_web::domain::entities::NewLink;
use shortlink_web::domain::{LoadOutcome, Notifier, Toast, ToastKind, ToastPosition};
use shortlink_web::infrastructure::api::{HttpLinkApi, LinkApi};
use shortlink_web::infrastructure::offline::{
    AssetManifest, HttpNetwork, MemoryCacheStorage, OfflineWorker, WorkerConfig,
};
use shortlink_web::utils::url_validation::{candidate_url, validate_url};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// CLI client for the URL shortener.
#[derive(Parser)]
#[command(name = "shortlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "PUBLIC_API_BASE_URL", global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Check whether a URL would be accepted
    Validate {
        /// URL as a user would type it
        url: String,
    },

    /// Create a short link
    Shorten {
        /// Long URL (prompted for if omitted)
        url: Option<String>,

        /// Custom alias for the short code
        #[arg(short, long)]
        alias: Option<String>,

        /// Expiry timestamp (RFC 3339, e.g. 2030-01-01T00:00:00Z)
        #[arg(short, long)]
        expires_at: Option<DateTime<Utc>>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show backend info for a short code
    Info {
        /// Short code
        code: String,
    },

    /// Resolve a short code the way `GET /{id}` does
    Resolve {
        /// Short code
        code: String,
    },

    /// Offline cache operations
    Offline {
        #[command(subcommand)]
        action: OfflineAction,
    },
}

/// Offline cache subcommands.
#[derive(Subcommand)]
enum OfflineAction {
    /// Install and activate a worker against an origin and report the cache
    Check {
        /// Build asset manifest
        #[arg(short, long, default_value = "build/manifest.json")]
        manifest: PathBuf,

        /// Origin serving the build output
        #[arg(short, long)]
        origin: Url,
    },
}

/// Prints toasts to stderr.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => eprintln!("{} {}", "❌".red(), toast.message.red()),
            ToastKind::Success => eprintln!("{} {}", "✅".green(), toast.message.green()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { url } => handle_validate(&url),
        Commands::Shorten {
            url,
            alias,
            expires_at,
            yes,
        } => {
            let service = link_service(cli.api_base_url)?;
            shorten(&service, url, alias, expires_at, yes).await?;
        }
        Commands::Info { code } => {
            let service = link_service(cli.api_base_url)?;
            show_info(&service, &code).await?;
        }
        Commands::Resolve { code } => {
            let service = link_service(cli.api_base_url)?;
            resolve(&service, &code).await;
        }
        Commands::Offline { action } => match action {
            OfflineAction::Check { manifest, origin } => offline_check(manifest, origin).await?,
        },
    }

    Ok(())
}

fn link_service(api_base_url: Option<String>) -> Result<LinkService> {
    let base_url = api_base_url
        .context("PUBLIC_API_BASE_URL must be set (or pass --api-base-url)")?;
    let api: Arc<dyn LinkApi> = Arc::new(HttpLinkApi::new(&base_url)?);
    Ok(LinkService::new(api))
}

fn handle_validate(url: &str) {
    if validate_url(url, &TerminalNotifier) {
        let normalized = candidate_url(url).unwrap_or_else(|| url.to_string());
        println!("{} {}", "✅ Valid:".green().bold(), normalized.cyan());
    } else {
        std::process::exit(1);
    }
}

/// Creates a short link with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Validate it; invalid input prints the toast and stops
/// 3. Show the request and confirm (unless `--yes` flag)
/// 4. Submit to the backend and print the result
async fn shorten(
    service: &LinkService,
    url: Option<String>,
    alias: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let raw = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Long URL").interact_text()?,
    };

    let Some(long_url) = validate_url(&raw, &TerminalNotifier)
        .then(|| candidate_url(&raw))
        .flatten()
    else {
        return Ok(());
    };

    println!("{}", "Request:".bright_white().bold());
    println!("  URL:     {}", long_url.cyan());
    if let Some(ref alias) = alias {
        println!("  Alias:   {}", alias.cyan());
    }
    if let Some(expires_at) = expires_at {
        println!("  Expires: {}", expires_at.to_rfc3339().cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Submit this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = NewLink {
        long_url,
        custom_alias: alias,
        expires_at,
    };

    let result = service
        .create_link(link)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    TerminalNotifier.notify(Toast::success(
        "Short link created",
        ToastPosition::BottomCenter,
    ));
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

async fn show_info(service: &LinkService, code: &str) -> Result<()> {
    let info = service
        .link_info(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to fetch link info: {}", e))?;

    println!("{}", "📋 Link info".bright_blue().bold());
    println!();
    println!(
        "  Short code: {}",
        info.short_code.as_deref().unwrap_or(code).cyan()
    );
    println!(
        "  Long URL:   {}",
        info.long_url.as_deref().unwrap_or("-").bright_yellow()
    );
    let status = if info.success {
        "OK".green()
    } else {
        "UNAVAILABLE".red()
    };
    println!("  Status:     {}", status);

    for (key, value) in &info.extra {
        println!("  {:<11} {}", format!("{key}:"), value.to_string().bright_black());
    }

    Ok(())
}

async fn resolve(service: &LinkService, code: &str) {
    match service.resolve_redirect(Some(code)).await {
        LoadOutcome::Redirect { location, status } => {
            println!("{} {}", status.to_string().green().bold(), location.cyan());
        }
        LoadOutcome::Error { status, message } => {
            println!("{} {}", status.to_string().red().bold(), message.red());
            std::process::exit(1);
        }
    }
}

/// Runs install and activate against `origin` and lists what was cached.
async fn offline_check(manifest: PathBuf, origin: Url) -> Result<()> {
    println!("{}", "📦 Offline cache check".bright_blue().bold());
    println!();

    let manifest = AssetManifest::load(&manifest)?;
    let config = WorkerConfig::from_manifest(manifest, origin);
    println!("  Cache:  {}", config.cache_name().cyan());
    println!("  Assets: {}", config.asset_count().to_string().cyan());
    println!();

    let worker = OfflineWorker::new(
        config,
        Arc::new(MemoryCacheStorage::new()),
        Arc::new(HttpNetwork::new()?),
    );

    worker
        .install()
        .await
        .map_err(|e| anyhow::anyhow!("Install failed: {}", e))?;
    worker.activate().await?;

    let entries = worker.storage().entries(worker.config().cache_name()).await?;
    for url in &entries {
        println!("  {} {}", "✓".green(), url.path());
    }
    println!();
    println!(
        "{}",
        format!("✅ {} assets cached, worker {}", entries.len(), worker.state().await)
            .green()
            .bold()
    );

    Ok(())
}
