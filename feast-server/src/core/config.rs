use crate::auth::{JwtConfig, MIN_SECRET_LEN, generate_secure_printable_jwt_secret};
use crate::core::ServerError;
use crate::orders::TransitionPolicy;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 5000 | HTTP listen port |
/// | DATABASE_URL | sqlite:feast.db | SQLite connection string |
/// | JWT_SECRET | random in development | Token signing secret, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token validity window |
/// | JWT_ISSUER | feast-server | `iss` claim |
/// | JWT_AUDIENCE | feast-clients | `aud` claim |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ORDER_STATUS_POLICY | permissive | permissive \| forward_only |
/// | REQUEST_BODY_LIMIT_BYTES | 1048576 | Maximum request body size |
/// | LOG_LEVEL | info | Level for this crate and tower_http |
/// | LOG_DIR | unset | Daily rolling log files when set |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 JWT_SECRET=... cargo run -p feast-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    pub order_status_policy: TransitionPolicy,
    pub request_body_limit_bytes: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load from the process environment (after `.env` has been applied)
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup
    ///
    /// Outside development a missing or short `JWT_SECRET` is an error;
    /// development runs fall back to a random secret.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = parse("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_development = environment == "development";

        let secret = match parse("JWT_SECRET") {
            Some(secret) if secret.len() >= MIN_SECRET_LEN => secret,
            Some(_) => {
                return Err(ServerError::Config(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                )));
            }
            None if is_development => {
                tracing::warn!("JWT_SECRET not set, using a temporary development secret");
                generate_secure_printable_jwt_secret()
                    .map_err(|e| ServerError::Config(e.to_string()))?
            }
            None => {
                return Err(ServerError::Config(format!(
                    "JWT_SECRET must be set when ENVIRONMENT={environment}"
                )));
            }
        };

        let mut jwt = JwtConfig::with_secret(secret);
        if let Some(minutes) = parse_number::<i64>(&parse, "JWT_EXPIRATION_MINUTES")? {
            if minutes <= 0 {
                return Err(ServerError::Config(
                    "JWT_EXPIRATION_MINUTES must be positive".into(),
                ));
            }
            jwt.expiration_minutes = minutes;
        }
        if let Some(issuer) = parse("JWT_ISSUER") {
            jwt.issuer = issuer;
        }
        if let Some(audience) = parse("JWT_AUDIENCE") {
            jwt.audience = audience;
        }

        let order_status_policy = match parse("ORDER_STATUS_POLICY") {
            Some(raw) => raw.parse().map_err(ServerError::Config)?,
            None => TransitionPolicy::default(),
        };

        Ok(Self {
            http_port: parse_number(&parse, "HTTP_PORT")?.unwrap_or(5000),
            database_url: parse("DATABASE_URL").unwrap_or_else(|| "sqlite:feast.db".into()),
            jwt,
            environment,
            order_status_policy,
            request_body_limit_bytes: parse_number(&parse, "REQUEST_BODY_LIMIT_BYTES")?
                .unwrap_or(1024 * 1024),
            log_level: parse("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: parse("LOG_DIR"),
        })
    }

    /// Settings for tests: in-memory database, fixed secret
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            database_url: "sqlite::memory:".into(),
            jwt: JwtConfig::with_secret("test-secret-that-is-long-enough-0123456789"),
            environment: "test".into(),
            order_status_policy: TransitionPolicy::default(),
            request_body_limit_bytes: 1024 * 1024,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn parse_number<T: std::str::FromStr>(
    parse: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ServerError> {
    parse(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ServerError::Config(format!("{key} is not a valid number: {raw}")))
        })
        .transpose()
}
