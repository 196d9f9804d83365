//! Shop Catalog CLI - Database migrations and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! catalog-cli migrate
//!
//! # Seed categories and roles
//! catalog-cli seed categories --file seed/categories.yaml
//! catalog-cli seed roles --file seed/roles.yaml
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(author, version, about = "Shop catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed reference data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Upsert categories by name
    Categories {
        /// Path to the YAML file
        #[arg(short, long)]
        file: String,
    },
    /// Create roles, skipping existing ones
    Roles {
        /// Path to the YAML file
        #[arg(short, long)]
        file: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Categories { file } => commands::seed::categories(&file).await?,
            SeedTarget::Roles { file } => commands::seed::roles(&file).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_roles() {
        let cli = Cli::try_parse_from(["catalog-cli", "seed", "roles", "--file", "roles.yaml"])
            .expect("valid arguments");
        assert!(matches!(
            cli.command,
            Commands::Seed { target: SeedTarget::Roles { ref file } } if file == "roles.yaml"
        ));
    }
}
