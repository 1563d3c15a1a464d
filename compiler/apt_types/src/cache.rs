//! Encoded pools, so a described API can be stored and reloaded without
//! running the description again.

use crate::Pool;

/// A bincode-encoded [`Pool`], registry included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedPool {
    pub data: Vec<u8>,
}

impl CachedPool {
    pub fn from_pool(pool: &Pool) -> Result<Self, String> {
        let data =
            bincode::serialize(pool).map_err(|e| format!("failed to serialize type pool: {e}"))?;
        tracing::debug!(types = pool.len(), bytes = data.len(), "encoded type pool");
        Ok(Self { data })
    }

    /// Decode the pool. Ids, handles and the collision counter come back as
    /// they were, so further registration continues the same sequence.
    pub fn to_pool(&self) -> Result<Pool, String> {
        bincode::deserialize(&self.data)
            .map_err(|e| format!("failed to deserialize type pool: {e}"))
    }
}
