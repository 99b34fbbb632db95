//! CLI administration tool for shortcode-service.
//!
//! Operates directly on the database, so mappings can be inspected and fixed
//! without going through the HTTP API. The same validation and code
//! generation rules apply as for the API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/page
//!
//! # Look up, repoint and remove a code
//! cargo run --bin admin -- resolve aZ3_k9Q
//! cargo run --bin admin -- update aZ3_k9Q https://example.com/other
//! cargo run --bin admin -- delete aZ3_k9Q
//!
//! # Browse stored mappings
//! cargo run --bin admin -- list --limit 50
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `shortcode_service::config`. In particular
//! `DATABASE_URL` / `DB_PATH` select the database and `BASE_URL` is used to
//! print full short URLs.
//!
//! Note that the CLI does not evict the server's redirect cache: a code
//! updated or deleted here may keep redirecting until its cache TTL expires.

use shortcode_service::application::ShortenerError;
use shortcode_service::application::services::{Shortened, ShortenerService};
use shortcode_service::config::{self, Config};
use shortcode_service::domain::repositories::MappingCatalog;
use shortcode_service::infrastructure::persistence::{SqliteMappingRepository, pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing short URL mappings.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short code for a URL (returns the existing one if already shortened)
    Shorten {
        /// Absolute http(s) URL
        url: String,
    },

    /// Show the URL behind a short code
    Resolve { code: String },

    /// Point an existing short code at a new URL
    Update { code: String, new_url: String },

    /// Delete a short code
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List stored mappings, newest first
    List {
        #[arg(short, long, default_value_t = 20)]
        limit: i64,

        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and schema
    Check,
}

/// Services wired against the configured database.
struct Admin {
    config: Config,
    shortener: ShortenerService,
    catalog: Arc<dyn MappingCatalog>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let db = pool::connect(&config.database_url, &config.pool_settings()).await?;
    pool::migrate(&db).await?;

    let repository = Arc::new(SqliteMappingRepository::new(Arc::new(db)));
    let admin = Admin {
        shortener: ShortenerService::new(repository.clone(), config.shortener_settings()),
        catalog: repository,
        config,
    };

    match cli.command {
        Commands::Shorten { url } => shorten(&admin, &url).await?,
        Commands::Resolve { code } => resolve(&admin, &code).await?,
        Commands::Update { code, new_url } => update(&admin, &code, &new_url).await?,
        Commands::Delete { code, yes } => delete(&admin, &code, yes).await?,
        Commands::List { limit, offset } => list(&admin, limit, offset).await?,
        Commands::Db { action } => handle_db_action(&admin, action).await?,
    }

    Ok(())
}

fn short_url(config: &Config, code: &str) -> String {
    format!("{}/{}", config.base_url.trim_end_matches('/'), code)
}

async fn shorten(admin: &Admin, url: &str) -> Result<()> {
    let outcome = admin.shortener.create_short_url(url).await?;

    let label = match &outcome {
        Shortened::Created(_) => "Created".green().bold(),
        Shortened::Existing(_) => "Already shortened".yellow().bold(),
    };

    println!("{}", label);
    println!("  Code:      {}", outcome.short_code().cyan());
    println!(
        "  Short URL: {}",
        short_url(&admin.config, outcome.short_code()).bright_white()
    );
    println!("  Target:    {}", url.bright_black());

    Ok(())
}

async fn resolve(admin: &Admin, code: &str) -> Result<()> {
    let mapping = admin
        .catalog
        .find_mapping(code)
        .await
        .context("Failed to look up short code")?;

    let Some(mapping) = mapping else {
        println!("{} {}", "Not found:".red().bold(), code);
        return Ok(());
    };

    println!("  Code:    {}", mapping.short_code.cyan());
    println!("  Target:  {}", mapping.long_url.bright_white());
    println!(
        "  Created: {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );

    Ok(())
}

async fn update(admin: &Admin, code: &str, new_url: &str) -> Result<()> {
    match admin.shortener.update_long_url(code, new_url).await {
        Ok(()) => {
            println!("{}", "URL updated successfully".green().bold());
            println!("  {} -> {}", code.cyan(), new_url.bright_white());
            Ok(())
        }
        Err(ShortenerError::NotFound { .. }) => {
            println!("{} {}", "Not found:".red().bold(), code);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Deletes a code after confirmation (default: No) unless `--yes` is given.
async fn delete(admin: &Admin, code: &str, skip_confirm: bool) -> Result<()> {
    let Some(mapping) = admin.catalog.find_mapping(code).await? else {
        println!("{} {}", "Not found:".red().bold(), code);
        return Ok(());
    };

    println!("  Code:   {}", mapping.short_code.cyan());
    println!("  Target: {}", mapping.long_url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short code?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    admin.shortener.delete_mapping(code).await?;
    println!("{}", "Short code deleted".green().bold());

    Ok(())
}

/// Prints one page of mappings.
///
/// ```text
///   ID    Code        Created            Target
///   ─────────────────────────────────────────────────────────────
///   12    aZ3_k9Q     2024-01-15 10:30   https://example.com/page
/// ```
async fn list(admin: &Admin, limit: i64, offset: i64) -> Result<()> {
    if limit <= 0 || offset < 0 {
        anyhow::bail!("--limit must be positive and --offset must not be negative");
    }

    let total = admin.catalog.count().await?;
    let mappings = admin.catalog.list(limit, offset).await?;

    if mappings.is_empty() {
        println!("{}", "  No mappings found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<11} {:<18} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<5} {:<11} {:<18} {}",
            mapping.id.to_string().bright_black(),
            mapping.short_code.cyan(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.long_url
        );
    }

    println!();
    println!(
        "  Showing {}-{} of {}",
        offset + 1,
        offset + mappings.len() as i64,
        total.to_string().bright_white().bold()
    );

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(admin: &Admin, action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let count = admin
                .catalog
                .count()
                .await
                .context("Database query failed")?;

            println!("{}", "Database connection OK".green().bold());
            println!("  Database: {}", admin.config.database_url.bright_white());
            println!("  Mappings: {}", count.to_string().bright_green().bold());
        }
    }

    Ok(())
}
