//! Caching infrastructure
//!
//! Persistent cache implementing the application's [`CachePort`](application::ports::CachePort).

mod redb_cache;

pub use redb_cache::RedbCache;
