//! Position Locks
//!
//! Serializes check-then-append sequences on the same position. A SELL holds
//! the lock for its (portfolio, symbol) key from the moment it reads trade
//! history until its own trade is appended, so two sells against one
//! position can never both pass the sufficiency check on a stale total.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::trade_settlement::PositionKey;

/// Keyed async mutexes, one per position currently in use.
///
/// Entries are created on demand and removed when the last holder or waiter
/// lets go, so the map only ever holds keys with in-flight settlements.
#[derive(Debug, Default)]
pub struct PositionLocks {
    locks: Mutex<HashMap<PositionKey, Arc<AsyncMutex<()>>>>,
}

/// Exclusive hold on one position. Released on drop.
#[derive(Debug)]
pub struct PositionGuard<'a> {
    owner: &'a PositionLocks,
    key: PositionKey,
    guard: Option<OwnedMutexGuard<()>>,
}

impl PositionLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn lock(&self, key: PositionKey) -> PositionGuard<'_> {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(key.clone()).or_default())
        };

        let guard = mutex.lock_owned().await;

        PositionGuard {
            owner: self,
            key,
            guard: Some(guard),
        }
    }

    /// Number of positions with a holder or waiter.
    #[must_use]
    pub fn active_keys(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn release(&self, key: &PositionKey) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the table itself still references the mutex: nobody holds or waits.
        if locks
            .get(key)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
        {
            locks.remove(key);
        }
    }
}

impl PositionGuard<'_> {
    /// The position this guard holds.
    #[must_use]
    pub const fn key(&self) -> &PositionKey {
        &self.key
    }
}

impl Drop for PositionGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.owner.release(&self.key);
    }
}
