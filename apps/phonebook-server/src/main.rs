use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use phonebook::{
    api::rest::routes,
    domain::service::Service,
    infra::storage::{self, migrations::Migrator, sea_orm_repo::SeaOrmPersonsRepository},
};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm_migration::MigratorTrait;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MOCK_DATABASE_URL: &str = "sqlite::memory:";

/// Phonebook Server - names and numbers over HTTP
#[derive(Parser)]
#[command(name = "phonebook-server")]
#[command(about = "Phonebook Server - names and numbers over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database instead of the configured one
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        port: cli.port,
        verbose: cli.verbose,
    };

    let mut config = AppConfig::load_layered(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);
    if cli.mock {
        config.database.url = MOCK_DATABASE_URL.to_string();
    }

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Relative log files live next to the config file
    let base_dir = cli
        .config
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, base_dir);
    tracing::info!("Phonebook Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

/// Detect DB backend from URL scheme (sqlite/postgres).
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = url::Url::parse(raw)
        .map_err(|e| anyhow!("Invalid database DSN '{}': {}", storage::redact(raw), e))?;

    match url.scheme() {
        "sqlite" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

fn bind_addr(config: &AppConfig) -> Result<SocketAddr> {
    let raw = format!("{}:{}", config.server.host, config.server.port);
    raw.parse()
        .with_context(|| format!("Invalid server address '{raw}'"))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let backend = detect_from_dsn(&config.database)?;
    bind_addr(&config)?;

    tracing::info!(
        "Connecting to {} database: {}",
        backend,
        storage::redact(&config.database.url)
    );
    let db = storage::connect(&config.database.url, config.database.max_conns).await?;
    Migrator::up(&db, None)
        .await
        .context("Failed to run database migrations")?;

    let repo = Arc::new(SeaOrmPersonsRepository::new(db));
    let service = Arc::new(Service::new(repo));
    let api = routes::register_routes(axum::Router::new(), service);

    let ingress = ApiIngress::new(ApiIngressConfig::from(&config.server));
    let router = ingress.build_router(api);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = runtime::shutdown::wait_for_shutdown().await {
                tracing::error!("Failed to listen for shutdown signals: {:#}", e);
            }
            cancel.cancel();
        });
    }

    ingress.serve(router, cancel).await?;
    tracing::info!("Phonebook Server stopped");
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let backend = detect_from_dsn(&config.database)?;
    bind_addr(config)?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed ({backend} database)");
    println!("{}", config.to_yaml()?);
    Ok(())
}
