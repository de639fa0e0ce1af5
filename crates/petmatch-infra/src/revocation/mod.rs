//! Revocation store implementations - Redis and in-memory fallback.

mod memory;

pub use memory::InMemoryRevocationStore;

#[cfg(feature = "redis")]
mod redis;
#[cfg(feature = "redis")]
pub use redis::{RedisConfig, RedisRevocationStore};
