use anyhow::Context;
use tracing_subscriber::EnvFilter;

use petcare_api::app::app;
use petcare_api::config;
use petcare_api::database::DatabaseManager;
use petcare_api::gamification::GamificationService;
use petcare_api::is_production;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("petcare_api=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting PetCare API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        if is_production!() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("JWT_SECRET is empty; logins will fail until it is set");
    }

    let pool = DatabaseManager::connect(&config.database).context("failed to configure database pool")?;

    if config.database.run_migrations {
        // Startup continues; /health reports the database state.
        if let Err(e) = DatabaseManager::run_migrations(&pool).await {
            tracing::error!("Migrations not applied: {}", e);
        }
    }

    let gamification = GamificationService::postgres(pool.clone(), &config.gamification)
        .context("invalid gamification configuration")?;
    tracing::info!(
        "Badge catalog: {}",
        gamification
            .catalog()
            .rules()
            .iter()
            .map(|rule| format!("{} ({})", rule.name(), rule.criterion()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("PetCare API listening on http://{}", bind_addr);

    axum::serve(listener, app(pool, gamification, config)).await?;
    Ok(())
}
