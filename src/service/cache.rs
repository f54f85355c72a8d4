//! Time-bounded cache in front of an assignment store.

use moka::sync::Cache;
use std::time::Duration;
use tracing::debug;

use crate::service::store::{Assignment, AssignmentStore, StoreError};

const DEFAULT_CAPACITY: u64 = 10_000;

/// Serves repeat identities from memory for `ttl` before asking the
/// inner store again.
pub struct CachedStore<S> {
    inner: S,
    cache: Cache<String, Assignment>,
}

impl<S: AssignmentStore> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_capacity(inner, ttl, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: S, ttl: Duration, max_capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn invalidate(&self, identity: &str) {
        self.cache.invalidate(identity);
    }
}

impl<S: AssignmentStore> AssignmentStore for CachedStore<S> {
    fn lookup_or_assign(&self, identity: &str) -> Result<Assignment, StoreError> {
        if let Some(hit) = self.cache.get(identity) {
            debug!(identity, "assignment served from cache");
            return Ok(hit);
        }
        let assignment = self.inner.lookup_or_assign(identity)?;
        self.cache.insert(identity.to_string(), assignment);
        Ok(assignment)
    }
}
