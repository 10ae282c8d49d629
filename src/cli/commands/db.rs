use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Apply pending migrations")]
    Migrate,

    #[command(about = "Check database connectivity")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = connect_pool()?;

    match cmd {
        DbCommands::Migrate => {
            DatabaseManager::run_migrations(&pool).await?;
            output_success(&output_format, "Migrations applied", None)
        }
        DbCommands::Ping => {
            DatabaseManager::health_check(&pool).await?;
            output_success(&output_format, "Database reachable", Some(json!({ "database": "ok" })))
        }
    }
}
