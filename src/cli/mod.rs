pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "petcare")]
#[command(about = "PetCare CLI - database and gamification administration")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Database schema management")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },

    #[command(about = "Inspect or adjust a pet's points and badges")]
    Pet {
        #[command(subcommand)]
        cmd: commands::pet::PetCommands,
    },

    #[command(about = "Show the configured badge catalog and event point values")]
    Catalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
        Commands::Pet { cmd } => commands::pet::handle(cmd, output_format).await,
        Commands::Catalog => commands::catalog::handle(output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_award_with_global_json_flag() {
        let cli = Cli::try_parse_from(["petcare", "pet", "award", "7", "25", "--json"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Pet { cmd: commands::pet::PetCommands::Award { pet_id, points } } => {
                assert_eq!(pet_id, 7);
                assert_eq!(points, 25);
            }
            _ => panic!("expected pet award"),
        }
    }

    #[test]
    fn text_is_the_default_output() {
        let cli = Cli::try_parse_from(["petcare", "catalog"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Text));
    }

    #[test]
    fn rejects_non_numeric_pet_ids() {
        assert!(Cli::try_parse_from(["petcare", "pet", "points", "rex"]).is_err());
    }
}
