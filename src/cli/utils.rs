use serde_json::{json, Value};
use sqlx::PgPool;

use crate::cli::OutputFormat;
use crate::config;
use crate::database::DatabaseManager;
use crate::gamification::GamificationService;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(body)) = (data, response.as_object_mut()) {
                body.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a JSON document or run the text renderer
pub fn output_value<F>(output_format: &OutputFormat, value: Value, render_text: F) -> anyhow::Result<()>
where
    F: FnOnce(&Value),
{
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Text => render_text(&value),
    }
    Ok(())
}

/// Pool for the configured DATABASE_URL
pub fn connect_pool() -> anyhow::Result<PgPool> {
    Ok(DatabaseManager::connect(&config::config().database)?)
}

pub fn gamification_service(pool: PgPool) -> anyhow::Result<GamificationService> {
    Ok(GamificationService::postgres(pool, &config::config().gamification)?)
}
