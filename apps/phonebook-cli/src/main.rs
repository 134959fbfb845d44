use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use phonebook::{
    contract::model::NewPerson,
    domain::repo::PersonsRepository,
    infra::storage::{self, migrations::Migrator, sea_orm_repo::SeaOrmPersonsRepository},
};
use runtime::{AppConfig, CliArgs, Section};
use sea_orm_migration::MigratorTrait;

/// Add an entry to the phonebook database, or list every entry.
#[derive(Parser)]
#[command(name = "phonebook-cli")]
#[command(version)]
struct Cli {
    /// Database password, substituted for `{password}` in the database URL
    password: Option<String>,

    /// Name of the entry to add (requires NUMBER)
    name: Option<String>,

    /// Number of the entry to add
    number: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database URL (overrides config and DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let Some(password) = cli.password.as_deref() else {
        println!("give password as argument");
        return Ok(ExitCode::FAILURE);
    };

    let mut config = AppConfig::load_layered(cli.config.as_deref())?;
    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }
    // stdout belongs to the listing; keep logs quiet unless asked
    config
        .logging
        .get_or_insert_with(Default::default)
        .entry("default".to_string())
        .or_insert_with(|| Section {
            console_level: "warn".to_string(),
            file: String::new(),
            file_level: String::new(),
            max_size_mb: None,
        });
    config.apply_cli_overrides(&CliArgs {
        port: None,
        verbose: cli.verbose,
    });
    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new("."));

    let url = config.database.url_with_password(Some(password));
    tracing::debug!("Connecting to database: {}", storage::redact(&url));
    let db = storage::connect(&url, Some(1)).await?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;
    let repo = SeaOrmPersonsRepository::new(db);

    match (cli.name, cli.number) {
        (Some(name), Some(number)) => {
            let person = repo
                .insert(NewPerson {
                    name: name.clone(),
                    number: number.clone(),
                })
                .await
                .context("Failed to add person")?;
            tracing::debug!(person_id = %person.id, "Added person");
            println!("added {name} number {number} to phonebook");
        }
        _ => {
            let persons = repo.list_all().await.context("Failed to list persons")?;
            for person in persons {
                println!("{} {}", person.name, person.number);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
