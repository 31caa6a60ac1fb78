use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::orders::TransitionPolicy;

/// Shared handles for every request
///
/// Cloning is cheap: the pool and token service are reference counted.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Arc<Config> | Immutable settings |
/// | db | DbService | SQLite pool |
/// | jwt_service | Arc<JwtService> | Token issue / verify |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            db,
            jwt_service,
        }
    }

    /// Open the configured database and build the state
    pub async fn initialize(config: Config) -> Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        Ok(Self::new(config, db))
    }

    /// State over a private in-memory database
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        Ok(Self::new(config, db))
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn order_status_policy(&self) -> TransitionPolicy {
        self.config.order_status_policy
    }
}
