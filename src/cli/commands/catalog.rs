use serde_json::json;

use crate::cli::utils::output_value;
use crate::cli::OutputFormat;
use crate::config;
use crate::gamification::BadgeCatalog;

/// Prints the catalog as the server would build it from the environment.
pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let gamification = &config::config().gamification;
    let catalog = BadgeCatalog::from_config(gamification)?;

    let badges: Vec<_> = catalog
        .rules()
        .iter()
        .map(|rule| json!({ "name": rule.name(), "criterion": rule.criterion().to_string() }))
        .collect();

    output_value(
        &output_format,
        json!({ "badges": badges, "event_points": gamification.event_points }),
        |_| {
            println!("{:<20} {}", "BADGE", "CRITERION");
            println!("{}", "-".repeat(40));
            for rule in catalog.rules() {
                println!("{:<20} {}", rule.name(), rule.criterion());
            }
            println!();
            println!("{:<20} {}", "EVENT", "POINTS");
            println!("{}", "-".repeat(40));
            for (event, value) in gamification.event_points.entries() {
                println!("{:<20} {}", event, value);
            }
        },
    )
}
