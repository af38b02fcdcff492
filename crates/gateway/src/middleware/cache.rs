//! Redis cache for catalog reads.

use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use common::{AppError, AppResult, CacheConfig};
use domain::CategoryNode;

/// Cache key of the category tree
const CACHE_KEY_CATEGORY_TREE: &str = "catalog:categories:tree";

/// Redis cache wrapper.
pub struct Cache {
    conn: ConnectionManager,
    default_ttl: u64,
}

impl Cache {
    /// Connect to Redis.
    pub async fn connect(config: &CacheConfig) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", config.url);
        let client = redis::Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            default_ttl: config.default_ttl_seconds,
        })
    }

    /// Round-trip to Redis.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    /// Get a value from cache. Undecodable entries count as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.conn.clone();
        let result: Option<String> = conn.get(key).await.map_err(|e| {
            warn!("Redis get error for key {}: {}", key, e);
            AppError::from(e)
        })?;

        Ok(result.and_then(|json| match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to deserialize cached value for key {}: {}", key, e);
                None
            }
        }))
    }

    /// Set a value with the configured TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl).await
    }

    /// Set a value with a custom TTL.
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let json = encode(value)?;
        conn.set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(|e| {
                warn!("Redis set error for key {}: {}", key, e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// Cached category tree.
    pub async fn get_category_tree(&self) -> AppResult<Option<Vec<CategoryNode>>> {
        self.get(CACHE_KEY_CATEGORY_TREE).await
    }

    /// Cache the category tree.
    pub async fn set_category_tree(&self, tree: &[CategoryNode]) -> AppResult<()> {
        self.set(CACHE_KEY_CATEGORY_TREE, &tree).await
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string(value)
        .map_err(|e| AppError::internal(format!("Serialization error: {}", e)))
}
