//! Local collectible inventory over the typed store.
//!
//! Purchases are atomic with respect to the ledger: the debit runs before
//! the inventory is persisted, so a failed debit leaves the stored
//! collection untouched.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CollectibleOperations, ProgressOperations, ResourceKind, StorageKey, StorageMedium,
};
use crate::domain::{
    CollectibleType, Error, OwnedCollectible, PurchaseOutcome, UserId, collectible_catalog,
    find_collectible_type,
};
use crate::outbound::persistence::ProgressLedger;
use crate::outbound::storage::Store;

/// Repository owning each user's collectible inventory.
pub struct CollectibleInventory<M> {
    store: Store<M>,
    ledger: ProgressLedger<M>,
    clock: Arc<dyn Clock>,
}

impl<M> Clone for CollectibleInventory<M> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            ledger: self.ledger.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<M: StorageMedium> CollectibleInventory<M> {
    /// Create an inventory over `store`, debiting purchases through `ledger`.
    pub fn new(store: Store<M>, ledger: ProgressLedger<M>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            ledger,
            clock,
        }
    }

    fn key(user: UserId) -> StorageKey {
        StorageKey::scoped(ResourceKind::Collectibles, user)
    }

    fn load(&self, user: UserId) -> Vec<OwnedCollectible> {
        self.store.load(&Self::key(user), Vec::new())
    }

    fn next_row_id(owned: &[OwnedCollectible]) -> i64 {
        owned
            .iter()
            .map(|row| row.user_collectible_id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

#[async_trait]
impl<M: StorageMedium> CollectibleOperations for CollectibleInventory<M> {
    async fn catalog(&self) -> Result<Vec<CollectibleType>, Error> {
        Ok(collectible_catalog().to_vec())
    }

    async fn purchase(
        &self,
        user: UserId,
        collectible_type_id: i64,
    ) -> Result<PurchaseOutcome, Error> {
        let Some(collectible) = find_collectible_type(collectible_type_id) else {
            return Err(Error::not_found(format!(
                "collectible type {collectible_type_id} not found"
            )));
        };

        let mut owned = self.load(user);
        match owned
            .iter_mut()
            .find(|row| row.collectible_type_id == collectible_type_id)
        {
            Some(row) => row.quantity = row.quantity.saturating_add(1),
            None => owned.push(OwnedCollectible {
                user_collectible_id: Self::next_row_id(&owned),
                collectible_type_id: collectible.id,
                quantity: 1,
                purchased_at: self.clock.utc(),
                name: collectible.name.clone(),
                description: collectible.description.clone(),
                emoji: collectible.emoji.clone(),
                cost: collectible.cost,
            }),
        }

        // Debit first: an insufficient balance aborts before the mutated
        // inventory is ever written.
        let balance = self.ledger.debit(user, collectible.cost).await?;
        self.store.save(&Self::key(user), &owned);
        info!(
            user = %user,
            collectible_type_id,
            cost = collectible.cost,
            new_balance = balance.kaiblooms_points,
            "purchased collectible"
        );

        Ok(PurchaseOutcome {
            new_balance: balance.kaiblooms_points,
        })
    }

    async fn collection(&self, user: UserId) -> Result<Vec<OwnedCollectible>, Error> {
        Ok(self.load(user))
    }
}
