use crate::auth::JwtConfig;
use crate::core::ServerError;
use crate::reservations::CapacityMode;
use crate::reservations::capacity::DEFAULT_MAX_CAPACITY;

/// Minimum JWT key length outside development
const MIN_SECRET_LEN: usize = 32;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 5000 | listen port |
/// | DATABASE_URL | unset (in-memory store) | Postgres URL |
/// | DATABASE_MAX_CONNECTIONS | 5 | pool size |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | random in development | HS256 key |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | DEFAULT_MAX_CAPACITY | 50 | capacity when the setting is absent |
/// | CAPACITY_MODE | live | `live` or `cached` |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_DIR | unset | rolling log file directory |
/// | CORS_ORIGIN | any | allowed origin |
/// | ADMIN_EMAIL / ADMIN_PASSWORD | unset | admin account created at startup |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// `None` runs against the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    pub default_max_capacity: i64,
    pub capacity_mode: CapacityMode,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// `None` allows any origin
    pub cors_origin: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 5000,
            database_url: None,
            database_max_connections: 5,
            environment: "development".to_string(),
            jwt: JwtConfig::default(),
            default_max_capacity: DEFAULT_MAX_CAPACITY,
            capacity_mode: CapacityMode::Live,
            log_level: "info".to_string(),
            log_dir: None,
            cors_origin: None,
            admin_email: None,
            admin_password: None,
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to [`Config::default`]. Outside development a
    /// `JWT_SECRET` of at least 32 characters is mandatory.
    pub fn from_env() -> Result<Self, ServerError> {
        let defaults = Self::default();
        let environment = non_empty("ENVIRONMENT").unwrap_or(defaults.environment);

        let capacity_mode = match non_empty("CAPACITY_MODE") {
            Some(raw) => raw.parse().map_err(ServerError::Config)?,
            None => defaults.capacity_mode,
        };

        let jwt = JwtConfig {
            secret: Self::jwt_secret(&environment)?.unwrap_or(defaults.jwt.secret),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.jwt.expiration_minutes),
            ..defaults.jwt
        };

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            database_url: non_empty("DATABASE_URL"),
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.database_max_connections),
            environment,
            jwt,
            default_max_capacity: std::env::var("DEFAULT_MAX_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_max_capacity),
            capacity_mode,
            log_level: non_empty("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: non_empty("LOG_DIR"),
            cors_origin: non_empty("CORS_ORIGIN"),
            admin_email: non_empty("ADMIN_EMAIL"),
            admin_password: non_empty("ADMIN_PASSWORD"),
        })
    }

    /// `Ok(None)` means "use a generated development key"
    fn jwt_secret(environment: &str) -> Result<Option<String>, ServerError> {
        match non_empty("JWT_SECRET") {
            Some(secret) if secret.len() < MIN_SECRET_LEN && environment != "development" => {
                Err(ServerError::Config(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_LEN} characters in {environment} environment"
                )))
            }
            Some(secret) => Ok(Some(secret)),
            None if environment != "development" => Err(ServerError::Config(format!(
                "JWT_SECRET must be set in {environment} environment"
            ))),
            None => {
                tracing::warn!("JWT_SECRET not set, generating a temporary development key");
                Ok(None)
            }
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// JSON console logs outside development
    pub fn json_logs(&self) -> bool {
        self.environment != "development"
    }
}
