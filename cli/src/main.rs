mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use crate::commands::{cmd_add, cmd_clear, cmd_delete, cmd_list, cmd_show, cmd_total, cmd_update};
use crate::config::Config;
use calopal_core::{FoodLogService, StoreLocation};

#[derive(Parser)]
#[command(
    name = "calopal",
    version,
    about = "A simple calorie log",
    long_about = "Log what you eat and how many calories it had.\n\
                  Items are stored in a local SQLite database."
)]
struct Cli {
    /// Path to the database file (default: platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a food item
    Add {
        /// Food name
        name: String,
        /// Calories (e.g. "95" or "95kcal")
        calories: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List all logged items, most recent first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single item by ID
    Show {
        /// Item ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the name and/or calories of an item
    Update {
        /// Item ID
        id: i64,
        /// New food name
        #[arg(long)]
        name: Option<String>,
        /// New calories
        #[arg(long)]
        calories: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an item by ID
    Delete {
        /// Item ID
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every logged item
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show total calories across all items
    Total {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.db.as_deref())?;
    log::debug!("using database {}", config.db_path.display());

    let svc = FoodLogService::new(StoreLocation::File(config.db_path.clone()));
    svc.initialize().await.with_context(|| {
        format!(
            "Failed to initialize database at {}",
            config.db_path.display()
        )
    })?;

    let result = match cli.command {
        Commands::Add {
            name,
            calories,
            json,
        } => cmd_add(&svc, &name, &calories, json).await,
        Commands::List { json } => cmd_list(&svc, json).await,
        Commands::Show { id, json } => cmd_show(&svc, id, json).await,
        Commands::Update {
            id,
            name,
            calories,
            json,
        } => cmd_update(&svc, id, name.as_deref(), calories.as_deref(), json).await,
        Commands::Delete { id, json } => cmd_delete(&svc, id, json).await,
        Commands::Clear { yes, json } => cmd_clear(&svc, yes, json).await,
        Commands::Total { json } => cmd_total(&svc, json).await,
    };

    svc.close().await?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["calopal", "add", "Apple", "95"]).unwrap();
        match cli.command {
            Commands::Add {
                name,
                calories,
                json,
            } => {
                assert_eq!(name, "Apple");
                assert_eq!(calories, "95");
                assert!(!json);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_global_db_after_subcommand() {
        let cli = Cli::try_parse_from(["calopal", "list", "--db", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    }

    #[tokio::test]
    async fn test_run_against_temp_db() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("calopal.db");
        let db_arg = db.to_str().unwrap();

        let add = Cli::try_parse_from(["calopal", "--db", db_arg, "add", "Apple", "95"]).unwrap();
        run(add).await.unwrap();
        let add = Cli::try_parse_from(["calopal", "--db", db_arg, "add", "Bread", "120"]).unwrap();
        run(add).await.unwrap();

        let svc = FoodLogService::new(StoreLocation::File(db));
        svc.initialize().await.unwrap();
        let names: Vec<String> = svc
            .get_all_items()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Bread", "Apple"]);
        assert_eq!(svc.get_total_calories().await.unwrap(), 215);
    }
}
