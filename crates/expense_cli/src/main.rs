//! Operator CLI for the expense registry store.
//!
//! Sub-commands:
//! - `migrate`    apply pending schema migrations.
//! - `seed`       insert the starter data into an empty store.
//! - `categories` list categories as JSON lines.
//! - `codes`      list one category's codes as JSON lines.
//! - `version`    print the core version.

use clap::{Parser, Subcommand};
use expense_core::db::migrations::latest_version;
use expense_core::{
    core_version, init_logging, seed_if_empty, sqlite_category_service, CategoryId,
    ServiceError, Store, UnitOfWork,
};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "expense-cli", about = "Expense category registry tools", version)]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "EXPENSE_DB_PATH", default_value = "./app.db", global = true)]
    db: PathBuf,
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Insert starter categories and codes when the store is empty.
    Seed,
    /// List all categories.
    Categories,
    /// List codes of one category.
    Codes { category_id: CategoryId },
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ServiceError>() {
                Some(service_err) => eprintln!("{service_err}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::Version = cli.command {
        println!("expense_core version={}", core_version());
        return Ok(());
    }

    init_logging(&cli.log_level, None).map_err(anyhow::Error::msg)?;
    let uow = UnitOfWork::new(Arc::new(Store::open(&cli.db)?));

    match cli.command {
        Command::Migrate => {
            info!("event=cli_migrate module=cli status=ok");
            println!("schema version={}", latest_version());
        }
        Command::Seed => {
            let seeded = uow.run(seed_if_empty)?;
            println!("seeded={seeded}");
        }
        Command::Categories => {
            let categories = uow.run(|conn| sqlite_category_service(conn).list_categories())?;
            print_lines(&categories)?;
        }
        Command::Codes { category_id } => {
            let codes = uow.run(|conn| {
                sqlite_category_service(conn).list_codes_for_category(category_id)
            })?;
            print_lines(&codes)?;
        }
        Command::Version => {}
    }
    Ok(())
}

fn print_lines<T: Serialize>(items: &[T]) -> anyhow::Result<()> {
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}
