use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub gamification: GamificationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_expiry_hours: u64,
}

/// Badge thresholds and care-event point values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationConfig {
    pub badges: Vec<BadgeThreshold>,
    pub event_points: EventPoints,
    pub store_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeThreshold {
    pub name: String,
    pub min_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPoints {
    pub feeding: i64,
    pub vaccination: i64,
    pub health_question: i64,
    pub appointment: i64,
    pub trust_grant: i64,
}

impl Default for EventPoints {
    fn default() -> Self {
        Self {
            feeding: 20,
            vaccination: 30,
            health_question: 10,
            appointment: 15,
            trust_grant: 50,
        }
    }
}

impl EventPoints {
    /// `(event, points)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, i64); 5] {
        [
            ("feeding", self.feeding),
            ("vaccination", self.vaccination),
            ("health_question", self.health_question),
            ("appointment", self.appointment),
            ("trust_grant", self.trust_grant),
        ]
    }
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            badges: vec![
                BadgeThreshold::new("Super Pet", 100),
                BadgeThreshold::new("Veteran Pet", 200),
                BadgeThreshold::new("Ultimate Pet", 300),
            ],
            event_points: EventPoints::default(),
            store_timeout_ms: 5_000,
        }
    }
}

impl BadgeThreshold {
    pub fn new(name: impl Into<String>, min_points: i64) -> Self {
        Self {
            name: name.into(),
            min_points,
        }
    }
}

/// Parses `"Super Pet:100,Veteran Pet:200"`. Returns `None` if any entry is
/// malformed or there are no entries at all.
pub fn parse_badge_thresholds(raw: &str) -> Option<Vec<BadgeThreshold>> {
    let badges: Vec<BadgeThreshold> = raw
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, min) = entry.rsplit_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let min_points = min.trim().parse::<i64>().ok()?;
            Some(BadgeThreshold::new(name, min_points))
        })
        .collect::<Option<_>>()?;

    (!badges.is_empty()).then_some(badges)
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // API overrides
        if let Some(port) = env::var("PETCARE_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_ISSUER") {
            self.security.jwt_issuer = v;
        }
        if let Ok(v) = env::var("JWT_AUDIENCE") {
            self.security.jwt_audience = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        // Gamification overrides
        if let Ok(v) = env::var("GAMIFICATION_BADGES") {
            match parse_badge_thresholds(&v) {
                Some(badges) => self.gamification.badges = badges,
                None => tracing::warn!("Ignoring malformed GAMIFICATION_BADGES: {}", v),
            }
        }
        let points = &mut self.gamification.event_points;
        for (var, slot) in [
            ("GAMIFICATION_POINTS_FEEDING", &mut points.feeding),
            ("GAMIFICATION_POINTS_VACCINATION", &mut points.vaccination),
            ("GAMIFICATION_POINTS_HEALTH_QUESTION", &mut points.health_question),
            ("GAMIFICATION_POINTS_APPOINTMENT", &mut points.appointment),
            ("GAMIFICATION_POINTS_TRUST_GRANT", &mut points.trust_grant),
        ] {
            if let Ok(v) = env::var(var) {
                match v.parse::<i64>() {
                    Ok(points) if points > 0 => *slot = points,
                    _ => tracing::warn!("Ignoring {}={}, points must be a positive integer", var, v),
                }
            }
        }
        if let Ok(v) = env::var("GAMIFICATION_STORE_TIMEOUT_MS") {
            self.gamification.store_timeout_ms = v.parse().unwrap_or(self.gamification.store_timeout_ms);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            api: ApiConfig {
                port: 5053,
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
                jwt_secret: "petcare-development-secret".to_string(),
                jwt_issuer: "petcare-api".to_string(),
                jwt_audience: "petcare-app".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
            gamification: GamificationConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            api: ApiConfig {
                port: 5053,
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_issuer: "petcare-api".to_string(),
                jwt_audience: "petcare-app".to_string(),
                jwt_expiry_hours: 24,
            },
            gamification: GamificationConfig {
                store_timeout_ms: 3_000,
                ..GamificationConfig::default()
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            api: ApiConfig {
                port: 5053,
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_issuer: "petcare-api".to_string(),
                jwt_audience: "petcare-app".to_string(),
                jwt_expiry_hours: 4,
            },
            gamification: GamificationConfig {
                store_timeout_ms: 2_000,
                ..GamificationConfig::default()
            },
        }
    }
}

/// Development defaults without any environment overrides.
impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
