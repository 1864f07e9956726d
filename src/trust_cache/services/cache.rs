//! Trust cache service.

use crate::discovery::domain::{DiscoveryCriteria, RegistryItem};
use crate::policy::domain::TrustQualifiers;
use crate::trust_cache::{
    domain::{CacheEntry, TrustLedger, UpsertOutcome},
    ports::{TrustCacheStore, TrustCacheStoreResult},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Loads, updates and scans the trust ledger held by a store.
#[derive(Clone)]
pub struct TrustCache<S, C>
where
    S: TrustCacheStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TrustCache<S, C>
where
    S: TrustCacheStore,
    C: Clock + Send + Sync,
{
    /// Creates a trust cache over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the ledger.
    ///
    /// Missing or undecodable contents yield an empty ledger; the failure is
    /// logged and never surfaced. Individual entries that fail to decode are
    /// logged and carried through to the next save.
    pub async fn load(&self) -> TrustLedger {
        match self.store.load().await {
            Ok(ledger) => {
                for skipped in ledger.unreadable() {
                    warn!(
                        location = %self.store.location(),
                        position = skipped.position(),
                        reason = skipped.reason(),
                        "skipping unreadable trust cache entry"
                    );
                }
                debug!(
                    location = %self.store.location(),
                    entries = ledger.len(),
                    unreadable = ledger.unreadable().len(),
                    "trust cache loaded"
                );
                ledger
            }
            Err(err) => {
                warn!(
                    location = %self.store.location(),
                    error_kind = err.kind(),
                    error = %err,
                    "trust cache unreadable, treating as empty"
                );
                TrustLedger::new()
            }
        }
    }

    /// Records `item` in `ledger` at the current time.
    pub fn upsert(
        &self,
        ledger: &mut TrustLedger,
        item: &RegistryItem,
        criteria: &DiscoveryCriteria,
    ) -> UpsertOutcome {
        ledger.upsert(item, criteria, self.clock.utc())
    }

    /// Persists `ledger`, replacing the stored copy.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write fails.
    pub async fn save(&self, ledger: &TrustLedger) -> TrustCacheStoreResult<()> {
        self.store.save(ledger).await?;
        debug!(
            location = %self.store.location(),
            entries = ledger.len(),
            "trust cache saved"
        );
        Ok(())
    }

    /// Returns the first entry in `ledger` whose item passes `qualifiers`.
    #[must_use]
    pub fn first_passing_cached_endpoint<'a>(
        &self,
        ledger: &'a TrustLedger,
        qualifiers: &TrustQualifiers,
    ) -> Option<&'a CacheEntry> {
        ledger.first_passing_entry(qualifiers)
    }

    /// Loads the ledger, records `item` and saves only when the ledger
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns the store's error when the write fails.
    pub async fn record_verified(
        &self,
        item: &RegistryItem,
        criteria: &DiscoveryCriteria,
    ) -> TrustCacheStoreResult<UpsertOutcome> {
        let mut ledger = self.load().await;
        let outcome = self.upsert(&mut ledger, item, criteria);
        if outcome.changed() {
            self.save(&ledger).await?;
        }
        info!(
            item_id = item.id(),
            outcome = outcome.as_str(),
            "verified endpoint recorded in trust cache"
        );
        Ok(outcome)
    }
}
