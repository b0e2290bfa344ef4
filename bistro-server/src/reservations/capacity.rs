//! Slot capacity configuration
//!
//! The checker never looks capacity up on its own; it asks a
//! [`CapacityConfig`], which either reads the `max_capacity` setting on every
//! call ([`CapacityMode::Live`]) or serves the last loaded value until
//! [`CapacityConfig::refresh`] is called ([`CapacityMode::Cached`]).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::MAX_CAPACITY_KEY;

use crate::store::{Store, StoreResult};

/// Capacity used when the setting is absent or unparsable
pub const DEFAULT_MAX_CAPACITY: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapacityMode {
    #[default]
    Live,
    Cached,
}

impl FromStr for CapacityMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "cached" => Ok(Self::Cached),
            other => Err(format!("unknown capacity mode '{}'", other)),
        }
    }
}

impl fmt::Display for CapacityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => f.write_str("live"),
            Self::Cached => f.write_str("cached"),
        }
    }
}

/// Parse the stored setting value, falling back to `default`
pub fn parse_capacity(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Source of the per-slot capacity
#[derive(Clone)]
pub struct CapacityConfig {
    mode: CapacityMode,
    default_capacity: i64,
    store: Arc<dyn Store>,
    cached: Arc<RwLock<Option<i64>>>,
}

impl fmt::Debug for CapacityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityConfig")
            .field("mode", &self.mode)
            .field("default_capacity", &self.default_capacity)
            .field("cached", &*self.cached.read())
            .finish()
    }
}

impl CapacityConfig {
    pub fn new(store: Arc<dyn Store>, mode: CapacityMode, default_capacity: i64) -> Self {
        Self {
            mode,
            default_capacity,
            store,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    pub fn mode(&self) -> CapacityMode {
        self.mode
    }

    pub fn default_capacity(&self) -> i64 {
        self.default_capacity
    }

    /// Current capacity per date/time slot
    pub async fn max_capacity(&self) -> StoreResult<i64> {
        match self.mode {
            CapacityMode::Live => self.load().await,
            CapacityMode::Cached => {
                let cached = *self.cached.read();
                match cached {
                    Some(value) => Ok(value),
                    None => self.refresh().await,
                }
            }
        }
    }

    /// Re-read the setting and replace the cached value
    pub async fn refresh(&self) -> StoreResult<i64> {
        let value = self.load().await?;
        *self.cached.write() = Some(value);
        tracing::debug!(max_capacity = value, mode = %self.mode, "Capacity refreshed");
        Ok(value)
    }

    async fn load(&self) -> StoreResult<i64> {
        let setting = self.store.get_setting(MAX_CAPACITY_KEY).await?;
        Ok(parse_capacity(
            setting.as_ref().map(|s| s.value.as_str()),
            self.default_capacity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SettingsStore};

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity(Some("12"), 50), 12);
        assert_eq!(parse_capacity(Some(" 8 "), 50), 8);
        assert_eq!(parse_capacity(Some("0"), 50), 0);
        assert_eq!(parse_capacity(Some("lots"), 50), 50);
        assert_eq!(parse_capacity(None, 50), 50);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("live".parse::<CapacityMode>().unwrap(), CapacityMode::Live);
        assert_eq!("Cached".parse::<CapacityMode>().unwrap(), CapacityMode::Cached);
        assert!("sometimes".parse::<CapacityMode>().is_err());
    }

    #[tokio::test]
    async fn test_live_mode_sees_every_write() {
        let store = Arc::new(MemoryStore::new());
        let config = CapacityConfig::new(store.clone(), CapacityMode::Live, DEFAULT_MAX_CAPACITY);

        assert_eq!(config.max_capacity().await.unwrap(), 50);
        store.upsert_setting(MAX_CAPACITY_KEY, "10").await.unwrap();
        assert_eq!(config.max_capacity().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_cached_mode_waits_for_refresh() {
        let store = Arc::new(MemoryStore::new());
        store.upsert_setting(MAX_CAPACITY_KEY, "20").await.unwrap();
        let config = CapacityConfig::new(store.clone(), CapacityMode::Cached, DEFAULT_MAX_CAPACITY);

        assert_eq!(config.max_capacity().await.unwrap(), 20);
        store.upsert_setting(MAX_CAPACITY_KEY, "5").await.unwrap();
        assert_eq!(config.max_capacity().await.unwrap(), 20);

        config.refresh().await.unwrap();
        assert_eq!(config.max_capacity().await.unwrap(), 5);
    }
}
