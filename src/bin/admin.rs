//! CLI administration tool for the Método Raízes site.
//!
//! Manages administrator grants and checks the hosted backend without going
//! through the web panel.
//!
//! # Usage
//!
//! ```bash
//! # Print the database schema (tables, roles, row-level security)
//! cargo run --bin admin -- schema
//!
//! # Grant or revoke the admin role
//! cargo run --bin admin -- role grant ana@example.com
//! cargo run --bin admin -- role revoke ana@example.com
//!
//! # List administrators
//! cargo run --bin admin -- role list
//!
//! # Check the backend connection
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL` (required): Project URL
//! - `SUPABASE_ANON_KEY` (required): Public key, used by `check`
//! - `SUPABASE_SERVICE_ROLE_KEY` (required for `role`): Service-role key

use raizes_web::config::{self, Config};
use raizes_web::domain::entities::AppRole;
use raizes_web::infrastructure::supabase::{SupabaseClient, SupabaseRoleRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use uuid::Uuid;

const SCHEMA: &str = include_str!("../../supabase/migrations/20250101000000_initial_schema.sql");

/// CLI tool for managing the Método Raízes site.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL schema to apply to a new project
    Schema,

    /// Manage administrator grants
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },

    /// Check the backend connection
    Check,
}

#[derive(Subcommand)]
enum RoleAction {
    /// Grant the admin role to a user
    Grant {
        /// User email or id
        user: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Revoke the admin role from a user
    Revoke {
        /// User email or id
        user: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List administrators
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schema => {
            print!("{SCHEMA}");
            Ok(())
        }
        Commands::Role { action } => {
            let config = config::load_from_env()?;
            handle_role_action(action, &config).await
        }
        Commands::Check => {
            let config = config::load_from_env()?;
            check(&config).await
        }
    }
}

async fn handle_role_action(action: RoleAction, config: &Config) -> Result<()> {
    let client = Arc::new(
        SupabaseClient::new(&config.supabase_service_role()?)
            .context("Failed to build the backend client")?,
    );
    let roles = SupabaseRoleRepository::new(client.clone());

    match action {
        RoleAction::Grant { user, yes } => grant(&client, &roles, &user, yes).await,
        RoleAction::Revoke { user, yes } => revoke(&client, &roles, &user, yes).await,
        RoleAction::List => list(&client, &roles).await,
    }
}

/// Resolves an email or a user id to a user id.
async fn resolve_user(client: &SupabaseClient, user: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(user) {
        return Ok(id);
    }

    let found = client
        .admin_find_user_by_email(user)
        .await
        .context("Failed to look up the user")?;

    found
        .map(|u| u.id)
        .with_context(|| format!("No user with email '{user}'. Create the account first."))
}

fn confirm(prompt: &str, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

async fn grant(
    client: &SupabaseClient,
    roles: &SupabaseRoleRepository,
    user: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Grant admin role".bright_blue().bold());
    println!();

    let user_id = resolve_user(client, user).await?;
    println!("  User: {} ({})", user.cyan(), user_id.to_string().bright_black());
    println!();

    if !confirm("Grant the admin role to this user?", skip_confirm)? {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let created = roles
        .grant(user_id, AppRole::Admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to grant role: {}", e))?;

    if created {
        println!("{}", "✅ Admin role granted".green().bold());
    } else {
        println!("{}", "ℹ️  User already is an administrator".yellow());
    }
    Ok(())
}

async fn revoke(
    client: &SupabaseClient,
    roles: &SupabaseRoleRepository,
    user: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔒 Revoke admin role".bright_blue().bold());
    println!();

    let user_id = resolve_user(client, user).await?;
    println!("  User: {} ({})", user.cyan(), user_id.to_string().bright_black());
    println!();

    if !confirm("Revoke the admin role? Open sessions lose access on their next request.", skip_confirm)? {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let removed = roles
        .revoke(user_id, AppRole::Admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke role: {}", e))?;

    if removed {
        println!("{}", "✅ Admin role revoked".green().bold());
    } else {
        println!("{}", "ℹ️  User was not an administrator".yellow());
    }
    Ok(())
}

/// Lists administrators.
///
/// # Output Format
///
/// ```text
/// 👥 Administrators
///
///   User ID                                Email
///   ──────────────────────────────────────────────────────────────────────
///   7d0f3f8e-4c3a-4f5e-9b43-0d9a1c2b3e4f   ana@example.com
/// ```
async fn list(client: &SupabaseClient, roles: &SupabaseRoleRepository) -> Result<()> {
    println!("{}", "👥 Administrators".bright_blue().bold());
    println!();

    let grants = roles
        .list(AppRole::Admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list grants: {}", e))?;

    if grants.is_empty() {
        println!("{}", "  No administrators yet".yellow());
        println!();
        println!(
            "  Grant one with: {} admin role grant <email>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    let users = client
        .admin_list_users(1, 1000)
        .await
        .context("Failed to list users")?;

    println!(
        "  {:<38} {}",
        "User ID".bright_white().bold(),
        "Email".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for grant in &grants {
        let email = users
            .iter()
            .find(|u| u.id == grant.user_id)
            .and_then(|u| u.email.as_deref())
            .unwrap_or("?");
        println!("  {:<38} {}", grant.user_id.to_string(), email.cyan());
    }

    println!();
    println!("  Total: {}", grants.len().to_string().bright_white().bold());
    Ok(())
}

/// Checks the auth service and an anonymous read of published posts.
async fn check(config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking backend".bright_blue().bold());
    println!("  URL: {}", config.supabase_url.cyan());
    println!();

    let client =
        SupabaseClient::new(&config.supabase()?).context("Failed to build the backend client")?;

    match client.health().await {
        Ok(()) => println!("  {} Auth service", "✅".green()),
        Err(e) => {
            println!("  {} Auth service: {}", "❌".red(), e);
            anyhow::bail!("Backend check failed");
        }
    }

    let posts: Result<Vec<serde_json::Value>, _> = client
        .table("blog_posts")
        .select("id")
        .eq("published", true)
        .fetch()
        .await;

    match posts {
        Ok(rows) => println!(
            "  {} REST service ({} published posts)",
            "✅".green(),
            rows.len()
        ),
        Err(e) => {
            println!("  {} REST service: {}", "❌".red(), e);
            anyhow::bail!("Backend check failed");
        }
    }

    println!();
    println!("{}", "✅ Backend reachable".green().bold());
    Ok(())
}
