use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::OutputFormat;
use crate::gamification::EventOutcome;

#[derive(Subcommand)]
pub enum PetCommands {
    #[command(about = "Show a pet's point total")]
    Points {
        #[arg(help = "Pet ID")]
        pet_id: i64,
    },

    #[command(about = "List a pet's badges in the order they were earned")]
    Badges {
        #[arg(help = "Pet ID")]
        pet_id: i64,
    },

    #[command(about = "Award points and re-evaluate badges")]
    Award {
        #[arg(help = "Pet ID")]
        pet_id: i64,
        #[arg(help = "Points to add (positive)", allow_negative_numbers = true)]
        points: i64,
    },
}

pub async fn handle(cmd: PetCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let service = gamification_service(connect_pool()?)?;

    match cmd {
        PetCommands::Points { pet_id } => {
            let points = service.get_points(pet_id).await?;
            output_value(&output_format, json!({ "pet_id": pet_id, "points": points }), |_| {
                println!("Pet {}: {} points", pet_id, points);
            })
        }
        PetCommands::Badges { pet_id } => {
            let badges = service.list_badges(pet_id).await?;
            output_value(&output_format, json!({ "pet_id": pet_id, "badges": badges }), |_| {
                if badges.is_empty() {
                    println!("Pet {} has no badges", pet_id);
                }
                for badge in &badges {
                    println!("{}", badge);
                }
            })
        }
        PetCommands::Award { pet_id, points } => match service.record_event(pet_id, points).await? {
            EventOutcome::PetMissing => anyhow::bail!("pet {} does not exist", pet_id),
            outcome => {
                let message = match &outcome {
                    EventOutcome::Awarded { total, new_badges } if !new_badges.is_empty() => format!(
                        "Pet {} now has {} points, new badges: {}",
                        pet_id,
                        total,
                        new_badges.join(", ")
                    ),
                    EventOutcome::BadgesDeferred { total } => format!(
                        "Pet {} now has {} points (badge evaluation failed, see logs)",
                        pet_id, total
                    ),
                    _ => format!("Pet {} now has {} points", pet_id, outcome.total().unwrap_or_default()),
                };
                output_success(&output_format, &message, Some(json!({ "outcome": outcome })))
            }
        },
    }
}
