//! Process-wide TTL cache over assembled entity records.
//!
//! One instance lives in [`crate::config::Config`] and is injected
//! everywhere; tests build their own isolated instances. Entries are JSON
//! values keyed by `<entity-kind-tag><contractRef>[<index>]` and are never
//! served past their expiry. Any successful deploy relay flushes the whole
//! cache: the gateway cannot know which entities a transaction touched.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::types::params::CacheParams;

/// Entity-kind tags. The concatenated key scheme is relied upon by external
/// tooling, so tags must stay stable.
pub mod tags {
    pub const TOKEN: &str = "erc20-token";
    pub const COLLECTION: &str = "collection";
    pub const NFT: &str = "nft";
    pub const MARKETPLACE: &str = "marketplace";
    pub const VESTING: &str = "vesting";
    pub const VESTING_RECIPIENTS: &str = "vesting-recipients";
    pub const RAFFLE: &str = "raffle";
    pub const RAFFLES: &str = "raffles";
    pub const LOOTBOX: &str = "lootbox";
    pub const LOOTBOX_ITEM: &str = "lootbox-item";
    pub const LOOTBOX_ITEMS: &str = "lootbox-items";
    pub const STAKE_POOL: &str = "stake-pool";
    pub const VALIDATORS: &str = "validators";
}

/// Which TTL class an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    Long,
    Short,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct EntityCache {
    ttl_long: Duration,
    ttl_short: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl EntityCache {
    pub fn new(params: &CacheParams) -> Self {
        Self { ttl_long: params.ttl_long, ttl_short: params.ttl_short, entries: RwLock::new(HashMap::new()) }
    }

    /// Returns the cached value for `key` unless it has expired.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Stores `value` under `key` with the deadline of its TTL class.
    /// Expired entries are evicted lazily, overwritten by the next set.
    pub async fn set(&self, key: &str, value: serde_json::Value, ttl: Ttl) {
        let duration = match ttl {
            Ttl::Long => self.ttl_long,
            Ttl::Short => self.ttl_short,
        };
        let entry = CacheEntry { value, expires_at: Instant::now() + duration };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Drops every entry. Invoked synchronously after each successful
    /// deploy relay, before the relay response is returned.
    pub async fn flush_all(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "flushed entity cache");
    }
}
