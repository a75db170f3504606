//! dashctl - dashboard RBAC CLI
//!
//! Evaluates role and permission checks from the command line.
//!
//! Exit codes: 0 granted, 1 denied, 2 error (bad input, unreadable or invalid
//! file, usage error).

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dashboard_rbac::{
    can, has_at_least_role, has_role, Action, AuthContext, Resource, Role, RoleCatalog, Session,
};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

const EXIT_DENIED: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "dashctl")]
#[command(version)]
#[command(about = "Dashboard role and permission checks", long_about = None)]
#[command(after_help = "Exit codes: 0 granted, 1 denied, 2 error")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a role is one of an allowed set
    HasRole {
        /// Role to check (omit for an unauthenticated user)
        #[arg(long, value_enum)]
        role: Option<Role>,
        /// Allowed roles, comma separated
        #[arg(long, value_enum, value_delimiter = ',')]
        allowed: Vec<Role>,
    },
    /// Check that a role ranks at least as high as another
    AtLeast {
        /// Role to check (omit for an unauthenticated user)
        #[arg(long, value_enum)]
        role: Option<Role>,
        /// Minimum role
        #[arg(long, value_enum)]
        min: Role,
    },
    /// Check a permission list for a resource/action pair
    Can {
        /// Permission tokens, comma separated (omit for no list)
        #[arg(long, value_delimiter = ',')]
        permissions: Option<Vec<String>>,
        #[arg(long, value_enum)]
        resource: Resource,
        #[arg(long, value_enum)]
        action: Action,
    },
    /// Evaluate a serialized session (JSON) against a resource/action pair
    Session {
        /// Path to session JSON ({"user": {"role": ..., "permissions": [...]}})
        file: PathBuf,
        #[arg(long, value_enum)]
        resource: Resource,
        #[arg(long, value_enum)]
        action: Action,
    },
    /// Role catalog tooling
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// Validate a role catalog file
    Validate {
        file: PathBuf,
    },
    /// Print the flat permission list for a set of role keys
    Expand {
        file: PathBuf,
        /// Role keys, comma separated
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },
}

fn main() -> ExitCode {
    // clap exits with 2 on usage errors, matching EXIT_ERROR
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_DENIED),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the subcommand; `Ok(granted)` on a completed check
fn run(cli: Cli) -> anyhow::Result<bool> {
    let granted = match cli.command {
        Commands::HasRole { role, allowed } => {
            let granted = has_role(role, &allowed);
            report(cli.format, granted, json!({ "role": role, "allowed": allowed }));
            granted
        }

        Commands::AtLeast { role, min } => {
            let granted = has_at_least_role(role, min);
            report(cli.format, granted, json!({ "role": role, "min": min }));
            granted
        }

        Commands::Can { permissions, resource, action } => {
            let granted = can(permissions.as_deref(), resource, action);
            report(
                cli.format,
                granted,
                json!({ "resource": resource, "action": action }),
            );
            granted
        }

        Commands::Session { file, resource, action } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read session file {}", file.display()))?;
            let session = Session::from_json_str(&content)
                .with_context(|| format!("Invalid session JSON in {}", file.display()))?;

            let ctx = AuthContext::from_session(&session);
            let granted = ctx.can(resource, action);
            report(
                cli.format,
                granted,
                json!({ "role": ctx.role, "resource": resource, "action": action }),
            );
            granted
        }

        Commands::Catalog { command } => match command {
            CatalogCommands::Validate { file } => {
                let catalog = RoleCatalog::load(&file)
                    .with_context(|| format!("Role catalog {} is invalid", file.display()))?;

                match cli.format {
                    Format::Text => {
                        println!("✓ {} is valid", file.display());
                        println!("  Roles: {}", catalog.roles.len());
                        for record in &catalog.roles {
                            println!(
                                "  - {} ({}): {} permission(s)",
                                record.key,
                                record.name,
                                record.permissions.len()
                            );
                        }
                        println!("  Unauthorized path: {}", catalog.unauthorized_path());
                    }
                    Format::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
                }
                true
            }

            CatalogCommands::Expand { file, keys } => {
                let catalog = RoleCatalog::load(&file)
                    .with_context(|| format!("Role catalog {} is invalid", file.display()))?;
                let permissions = catalog.effective_permissions(&keys);

                match cli.format {
                    Format::Text => {
                        for perm in &permissions {
                            println!("{}", perm);
                        }
                    }
                    Format::Json => println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({ "keys": keys, "permissions": permissions }))?
                    ),
                }
                true
            }
        },
    };

    Ok(granted)
}

fn report(format: Format, granted: bool, detail: serde_json::Value) {
    match format {
        Format::Text => println!("{}", if granted { "granted" } else { "denied" }),
        Format::Json => {
            let mut out = json!({ "granted": granted });
            if let (Some(obj), serde_json::Value::Object(extra)) = (out.as_object_mut(), detail) {
                obj.extend(extra);
            }
            println!("{}", out);
        }
    }
}
