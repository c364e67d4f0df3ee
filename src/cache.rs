//! Response cache handle.
//!
//! The collector consults a [`ResponseCache`] before going to the network
//! and fills it afterwards. Nothing here is global: callers construct a cache
//! and pass it in. A missing cache behaves like a permanent miss.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default number of entries kept in memory.
pub const DEFAULT_CAPACITY: usize = 500;

/// Snapshot of cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
}

/// Key-value store with time-based expiry.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Fetch a live entry. Expired entries are misses.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store `value`. `ttl` of `None` uses the cache default.
    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>);

    async fn delete(&self, key: &str);

    async fn clear(&self);

    async fn stats(&self) -> CacheStats;
}

/// Cache key for an artist's sanitized track list.
pub fn artist_tracks_key(artist_id: &str) -> String {
    format!("artist:{}:tracks", artist_id)
}

/// Cache key for a raw API response. Parameter order does not matter.
pub fn api_response_key(endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut params: Vec<_> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    params.sort();
    format!("api:{}:{}", endpoint, params.join("&"))
}

#[derive(Debug)]
struct Entry {
    value: Value,
    expires_at: Instant,
    last_access: u64,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    clock: u64,
}

impl State {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// In-memory cache with TTL expiry and least-recently-used eviction.
#[derive(Debug)]
pub struct MemoryCache {
    state: Mutex<State>,
    default_ttl: Duration,
    capacity: usize,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

impl MemoryCache {
    /// Create a cache. A zero capacity is clamped to one.
    pub fn new(default_ttl: Duration, capacity: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            default_ttl,
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let expired = match state.entries.get(key) {
            Some(entry) => entry.expires_at <= now,
            None => return None,
        };
        if expired {
            debug!("Cache entry expired: {}", key);
            state.entries.remove(key);
            return None;
        }

        let tick = state.tick();
        let entry = state.entries.get_mut(key)?;
        entry.last_access = tick;
        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        if !state.entries.contains_key(key) && state.entries.len() >= self.capacity {
            state.entries.retain(|_, e| e.expires_at > now);
        }
        if !state.entries.contains_key(key) && state.entries.len() >= self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_access)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                debug!("Cache evicting {}", oldest);
                state.entries.remove(&oldest);
            }
        }

        let tick = state.tick();
        state.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + ttl.unwrap_or(self.default_ttl),
                last_access: tick,
            },
        );
    }

    async fn delete(&self, key: &str) {
        self.state.lock().await.entries.remove(key);
    }

    async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.clock = 0;
    }

    async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.state.lock().await.entries.len(),
            capacity: self.capacity,
        }
    }
}
