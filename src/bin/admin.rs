//! CLI administration tool for snipurl.
//!
//! Provides commands for managing accounts, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! cargo run --bin admin -- account create
//!
//! # List accounts
//! cargo run --bin admin -- account list
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use snipurl::config::{DatabaseConfig, mask_connection_string};
use snipurl::domain::entities::{NewAccount, ROLE_USER};
use snipurl::domain::repositories::AccountRepository;
use snipurl::infrastructure::persistence::PgAccountRepository;
use snipurl::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snipurl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Show statistics
    Stats {
        /// Number of most-clicked links to show
        #[arg(short, long, default_value_t = 5)]
        top: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let db = DatabaseConfig::from_env().context("Database is not configured")?;
    db.validate()?;

    let pool = snipurl::server::connect_pool(&db).await?;

    match cli.command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Stats { top } => handle_stats(&pool, top).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &db.url).await?,
    }

    Ok(())
}

async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAccountRepository::new(Arc::new(pool.clone())));

    match action {
        AccountAction::Create {
            username,
            email,
            yes,
        } => create_account(repo, username, email, yes).await,
        AccountAction::List => list_accounts(repo).await,
    }
}

/// Creates an account with interactive prompts.
///
/// The password is always read interactively and stored as an argon2 hash.
async fn create_account(
    repo: Arc<PgAccountRepository>,
    username: Option<String>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create account".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    println!();
    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!("  Role:     {}", ROLE_USER.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let password_hash =
        hash_password(&password).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let account = repo
        .create(NewAccount {
            username,
            email,
            password_hash,
            role: ROLE_USER.to_string(),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!(
        "{} (id {})",
        "Account created".green().bold(),
        account.id.to_string().bright_white()
    );
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -X POST -H 'Content-Type: application/json' -d '{{\"username\":\"{}\",\"password\":\"...\"}}' http://localhost:3000/api/auth/login",
        account.username.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all accounts.
///
/// ```text
///   ID  Username             Email                          Created
///   ───────────────────────────────────────────────────────────────────────
///   1   alice                alice@example.com              2024-01-15 10:30
/// ```
async fn list_accounts(repo: Arc<PgAccountRepository>) -> Result<()> {
    println!("{}", "Accounts".bright_blue().bold());
    println!();

    let accounts = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin account create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(72).bright_black());

    for account in &accounts {
        println!(
            "  {:<4} {:<20} {:<30} {}",
            account.id.to_string().bright_black(),
            account.username.cyan(),
            account.email,
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays totals and the most-clicked links.
async fn handle_stats(pool: &PgPool, top: i64) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let accounts_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await?;

    let mappings_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM click_events")
        .fetch_one(pool)
        .await?;

    println!(
        "  Accounts: {}",
        accounts_count.to_string().bright_green().bold()
    );
    println!(
        "  Links:    {}",
        mappings_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:   {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    let top_links: Vec<(String, String, i64)> = sqlx::query_as(
        r#"
        SELECT short_code, original_url, click_count
        FROM url_mappings
        ORDER BY click_count DESC, id
        LIMIT $1
        "#,
    )
    .bind(top.max(0))
    .fetch_all(pool)
    .await?;

    if !top_links.is_empty() {
        println!("{}", "  Most clicked:".bright_white());
        for (code, url, clicks) in top_links {
            println!(
                "    {:<10} {:>8}  {}",
                code.cyan(),
                clicks.to_string().bright_green(),
                url.bright_black()
            );
        }
        println!();
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await
                    .unwrap_or(0);

            println!("  URL:        {}", mask_connection_string(database_url));
            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
