use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use robohub_api::{config, db, migrator::Migrator};
use sea_orm_migration::MigratorTrait;
use tracing::info;

/// Schema management for the RoboHub database
#[derive(Debug, Parser)]
#[command(name = "robohub-migrate", version, about)]
struct Cli {
    /// Database URL; defaults to the application configuration
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply all pending migrations (default)
    Up,
    /// Roll back applied migrations
    Down {
        /// Number of migrations to roll back
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: u32,
    },
    /// Show applied and pending migrations
    Status,
    /// Drop every table and re-apply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let database_url = cli.database_url.unwrap_or_else(|| cfg.database_url.clone());
    let pool = db::establish_connection(&database_url)
        .await
        .context("failed to connect to database")?;

    match cli.command.unwrap_or(Commands::Up) {
        Commands::Up => {
            db::run_migrations(&pool).await?;
        }
        Commands::Down { steps } => {
            info!("Rolling back {} migration(s)", steps);
            Migrator::down(&pool, Some(steps)).await?;
        }
        Commands::Status => {
            for migration in Migrator::get_applied_migrations(&pool).await? {
                println!("applied  {}", migration.name());
            }
            for migration in Migrator::get_pending_migrations(&pool).await? {
                println!("pending  {}", migration.name());
            }
        }
        Commands::Fresh => {
            info!("Dropping all tables and re-applying migrations");
            Migrator::fresh(&pool).await?;
        }
    }

    db::close_pool(pool).await?;
    Ok(())
}
