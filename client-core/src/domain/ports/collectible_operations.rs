//! Driving port for the collectible catalog and inventory.

use async_trait::async_trait;

use crate::domain::{CollectibleType, Error, OwnedCollectible, PurchaseOutcome, UserId};

/// Port for catalog reads and purchase/collection operations.
///
/// # Purchase semantics
///
/// A purchase is all-or-nothing: the debit happens before any inventory
/// write, so an [`crate::domain::ErrorCode::InsufficientBalance`] failure
/// leaves both balance and inventory unchanged. Repeat purchases of the same
/// type aggregate into one inventory row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectibleOperations: Send + Sync {
    /// The purchasable catalog.
    async fn catalog(&self) -> Result<Vec<CollectibleType>, Error>;

    /// Purchase one unit of `collectible_type_id` for `user`.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] for an unknown
    /// type and [`crate::domain::ErrorCode::InsufficientBalance`] when the
    /// cost exceeds the balance.
    async fn purchase(
        &self,
        user: UserId,
        collectible_type_id: i64,
    ) -> Result<PurchaseOutcome, Error>;

    /// The user's owned collectibles, in insertion order.
    async fn collection(&self, user: UserId) -> Result<Vec<OwnedCollectible>, Error>;
}
