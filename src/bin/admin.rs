//! CLI administration tool for link-registry.
//!
//! Manages short links directly against the database, without going through
//! the HTTP API. Uses the same link service as the server, so code validation,
//! collision retries and visit counting behave identically.
//!
//! # Usage
//!
//! ```bash
//! # List links, optionally filtered
//! cargo run --bin admin -- links list --filter example
//!
//! # Show one link with its visit counter
//! cargo run --bin admin -- links show abc123
//!
//! # Create a link with a generated or chosen code
//! cargo run --bin admin -- links create https://example.com --code promo01
//!
//! # Delete a link (asks for confirmation unless --yes)
//! cargo run --bin admin -- links delete abc123
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server (`DATABASE_URL` or `DB_*` components).

use link_registry::application::services::LinkService;
use link_registry::config;
use link_registry::domain::entities::Link;
use link_registry::infrastructure::persistence::PgLinkRepository;
use link_registry::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing link-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Case-insensitive substring of the code or target URL
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show a single link
    Show { code: String },

    /// Create a link
    Create {
        /// Target URL
        url: String,

        /// Short code (6-8 letters or digits); generated when omitted
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Permanently delete a link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and apply migrations
    Check,
}

type PgLinkService = LinkService<PgLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = server::connect_pool(&config).await?;

    let service = LinkService::new(Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))))
        .with_max_code_attempts(config.code_generation_attempts);

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &service).await?,
        Commands::Db { action } => match action {
            DbAction::Check => db_check(&pool, &service).await?,
        },
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &PgLinkService) -> Result<()> {
    match action {
        LinkAction::List { filter } => list_links(service, filter.as_deref()).await,
        LinkAction::Show { code } => show_link(service, &code).await,
        LinkAction::Create { url, code } => create_link(service, &url, code.as_deref()).await,
        LinkAction::Delete { code, yes } => delete_link(service, &code, yes).await,
    }
}

/// Lists links in a table.
///
/// # Output Format
///
/// ```text
/// Links
///
///   Code      Clicks   Created            Target
///   ──────────────────────────────────────────────────────────────
///   abc123    12       2024-01-15 10:30   https://example.com
/// ```
async fn list_links(service: &PgLinkService, filter: Option<&str>) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = service
        .list(filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<8} {:<18} {}",
            link.code.cyan(),
            link.total_clicks,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());

    Ok(())
}

async fn show_link(service: &PgLinkService, code: &str) -> Result<()> {
    let link = service
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link);

    Ok(())
}

async fn create_link(service: &PgLinkService, url: &str, code: Option<&str>) -> Result<()> {
    let link = service
        .create(url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "Link created".green().bold());
    println!();
    print_link(&link);

    Ok(())
}

/// Deletes a link after showing it and asking for confirmation.
async fn delete_link(service: &PgLinkService, code: &str, skip_confirm: bool) -> Result<()> {
    let link = service
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete link '{}'?", code))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let removed = service
        .remove(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if removed {
        println!("{}", "Link deleted".green().bold());
    } else {
        // Someone else removed it between the lookup and the delete.
        println!("{}", "Link was already gone".yellow());
    }

    Ok(())
}

/// Verifies connectivity, applies migrations, and reports the link count.
async fn db_check(pool: &sqlx::PgPool, service: &PgLinkService) -> Result<()> {
    println!("{}", "Checking database connection...".bright_blue());

    service
        .health_check()
        .await
        .map_err(|e| anyhow::anyhow!("Database unreachable: {}", e))?;
    println!("{}", "  Connected".green());

    server::migrate(pool).await?;
    println!("{}", "  Migrations up to date".green());

    let count = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    println!("  Links stored: {}", count.to_string().bright_white().bold());

    Ok(())
}

fn print_link(link: &Link) {
    println!("  Code:         {}", link.code.cyan().bold());
    println!("  Target:       {}", link.target_url);
    println!(
        "  Created:      {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Clicks:       {}", link.total_clicks);
    match link.last_clicked_at {
        Some(at) => println!("  Last clicked: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  Last clicked: {}", "never".bright_black()),
    }
}
