//! Driving port for the Kaibloom ledger.

use async_trait::async_trait;

use crate::domain::{Error, KaibloomBalance, UserId};

/// Port for balance queries, awards, and debits.
///
/// # Invariants
///
/// - The balance is never negative after any sequence of operations.
/// - A debit exceeding the balance fails before any write.
/// - `balance` for a brand-new user materialises the starting record but
///   does not persist it; the first award or debit does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressOperations: Send + Sync {
    /// The user's current balance, materialising the starting record when
    /// nothing is stored yet.
    async fn balance(&self, user: UserId) -> Result<KaibloomBalance, Error>;

    /// Credit the flat completion award and return the amount credited.
    ///
    /// `estimated_minutes` is the completed task's estimate; the flat
    /// policy ignores it.
    async fn award(&self, user: UserId, estimated_minutes: u32) -> Result<u32, Error>;

    /// Debit `amount` and return the new balance.
    ///
    /// Fails with [`crate::domain::ErrorCode::InsufficientBalance`] when
    /// `amount` exceeds the current balance, leaving stored state untouched.
    async fn debit(&self, user: UserId, amount: u32) -> Result<KaibloomBalance, Error>;
}
