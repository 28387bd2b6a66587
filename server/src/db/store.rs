//! Caller lookup.
//!
//! The guards only need one query: load the caller record for a verified
//! identity. `Ok(None)` means the identity no longer maps to a user; `Err`
//! means the store itself failed.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::permissions::Caller;

use super::queries::find_user_by_id;

/// Caller store failure. Never means "not found".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Caller store unavailable: {0}")]
    Unavailable(String),
}

/// Source of caller records.
pub trait CallerStore: Send + Sync {
    fn lookup(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Caller>, StoreError>>;
}

/// `PostgreSQL` backed store.
#[derive(Clone)]
pub struct PgCallerStore {
    pool: PgPool,
}

impl PgCallerStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CallerStore for PgCallerStore {
    fn lookup(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Caller>, StoreError>> {
        Box::pin(async move {
            let user = find_user_by_id(&self.pool, id).await?;
            Ok(user.map(Caller::from))
        })
    }
}

/// In-process store for local runs and tests.
#[derive(Clone, Default)]
pub struct MemoryCallerStore {
    callers: Arc<DashMap<Uuid, Caller>>,
    unavailable: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl MemoryCallerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, caller: Caller) {
        self.callers.insert(caller.id, caller);
    }

    pub fn remove(&self, id: Uuid) -> Option<Caller> {
        self.callers.remove(&id).map(|(_, caller)| caller)
    }

    /// Make every lookup fail with [`StoreError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of lookups served so far, failed ones included.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CallerStore for MemoryCallerStore {
    fn lookup(&self, id: Uuid) -> BoxFuture<'_, Result<Option<Caller>, StoreError>> {
        Box::pin(async move {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("memory store offline".into()));
            }
            Ok(self.callers.get(&id).map(|entry| entry.value().clone()))
        })
    }
}
