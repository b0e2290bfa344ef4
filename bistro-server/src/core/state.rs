use std::sync::Arc;
use std::time::Duration;

use shared::models::StaffRole;

use crate::auth::{JwtService, hash_password};
use crate::core::{Config, ServerError};
use crate::lifecycle::LifecycleManager;
use crate::reservations::{AvailabilityChecker, CapacityConfig};
use crate::store::{MemoryStore, PgStore, Store, StoreError, UserStore};

const STARTUP_PING_ATTEMPTS: u32 = 3;
const STARTUP_PING_DELAY: Duration = Duration::from_secs(2);

/// Shared server state
///
/// Cheap to clone; every member is reference counted. Handlers reach the
/// store directly for plain CRUD and go through [`AvailabilityChecker`] and
/// [`LifecycleManager`] for the capacity and status rules.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub jwt_service: Arc<JwtService>,
    pub capacity: CapacityConfig,
    pub availability: AvailabilityChecker,
    pub lifecycle: LifecycleManager,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("environment", &self.config.environment)
            .field("store", &self.store.backend())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl ServerState {
    /// Wire the components around an existing store
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        let capacity = CapacityConfig::new(
            store.clone(),
            config.capacity_mode,
            config.default_max_capacity,
        );
        let availability = AvailabilityChecker::new(store.clone(), capacity.clone());
        let lifecycle = LifecycleManager::new(store.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config,
            store,
            jwt_service,
            capacity,
            availability,
            lifecycle,
        }
    }

    /// Open the configured store, check it is reachable and bootstrap the
    /// admin account
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        let store: Arc<dyn Store> = match &config.database_url {
            Some(url) => {
                let pg = PgStore::connect(url, config.database_max_connections)?;
                wait_for_store(&pg).await?;
                pg.migrate().await?;
                Arc::new(pg)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using the in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        let state = Self::new(config.clone(), store);
        state.ensure_admin().await?;
        tracing::info!(
            store = state.store.backend(),
            capacity_mode = %state.capacity.mode(),
            "Server state initialized"
        );
        Ok(state)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Create the configured admin account when it does not exist yet
    async fn ensure_admin(&self) -> Result<(), ServerError> {
        let (Some(email), Some(password)) = (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        if self.store.find_user_by_email(email).await?.is_some() {
            return Ok(());
        }

        let hash = hash_password(password)
            .map_err(|e| ServerError::Config(format!("cannot hash ADMIN_PASSWORD: {}", e)))?;
        let user = self.store.insert_user(email, StaffRole::Admin, &hash).await?;
        tracing::info!(user_id = %user.id, email = %user.email, "Admin account created");
        Ok(())
    }
}

/// Ping the store a few times before giving up
async fn wait_for_store(store: &dyn Store) -> Result<(), StoreError> {
    let mut attempt = 1;
    loop {
        match store.ping().await {
            Ok(()) => {
                tracing::info!(backend = store.backend(), "Store reachable");
                return Ok(());
            }
            Err(e) if attempt < STARTUP_PING_ATTEMPTS => {
                tracing::warn!(attempt, error = %e, "Store not reachable, retrying");
                attempt += 1;
                tokio::time::sleep(STARTUP_PING_DELAY).await;
            }
            Err(e) => {
                tracing::error!(attempt, error = %e, "Store not reachable, giving up");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_bootstraps_admin_once() {
        let config = Config {
            admin_email: Some("owner@example.com".into()),
            admin_password: Some("change-me-please".into()),
            ..Config::default()
        };
        let state = ServerState::initialize(&config).await.unwrap();

        let admin = state
            .store
            .find_user_by_email("owner@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, StaffRole::Admin);

        state.ensure_admin().await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_after_retries() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let err = wait_for_store(&store).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
