//! Local Kaibloom ledger over the typed store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{ProgressOperations, ResourceKind, StorageKey, StorageMedium};
use crate::domain::{Error, KaibloomBalance, TASK_COMPLETION_AWARD, UserId};
use crate::outbound::storage::Store;

/// Ledger owning the per-user points balance.
///
/// The balance record is a singleton per user. The starting balance is
/// materialised on read but only persisted by the first award or debit.
pub struct ProgressLedger<M> {
    store: Store<M>,
    clock: Arc<dyn Clock>,
}

impl<M> Clone for ProgressLedger<M> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<M: StorageMedium> ProgressLedger<M> {
    /// Create a ledger over `store`.
    pub fn new(store: Store<M>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn key(user: UserId) -> StorageKey {
        StorageKey::scoped(ResourceKind::Progress, user)
    }

    fn current(&self, user: UserId) -> KaibloomBalance {
        self.store
            .load::<Option<KaibloomBalance>>(&Self::key(user), None)
            .unwrap_or_else(|| KaibloomBalance::starting(user, self.clock.utc()))
    }
}

#[async_trait]
impl<M: StorageMedium> ProgressOperations for ProgressLedger<M> {
    async fn balance(&self, user: UserId) -> Result<KaibloomBalance, Error> {
        Ok(self.current(user))
    }

    async fn award(&self, user: UserId, estimated_minutes: u32) -> Result<u32, Error> {
        let mut balance = self.current(user);
        balance.kaiblooms_points = balance
            .kaiblooms_points
            .saturating_add(TASK_COMPLETION_AWARD);
        balance.updated_at = self.clock.utc();
        self.store.save(&Self::key(user), &balance);
        debug!(
            user = %user,
            estimated_minutes,
            total = balance.kaiblooms_points,
            "awarded {TASK_COMPLETION_AWARD} Kaiblooms"
        );
        Ok(TASK_COMPLETION_AWARD)
    }

    async fn debit(&self, user: UserId, amount: u32) -> Result<KaibloomBalance, Error> {
        let mut balance = self.current(user);
        if amount > balance.kaiblooms_points {
            return Err(Error::insufficient_balance(format!(
                "debit of {amount} exceeds balance of {}",
                balance.kaiblooms_points
            ))
            .with_details(json!({
                "requested": amount,
                "available": balance.kaiblooms_points,
            })));
        }
        balance.kaiblooms_points -= amount;
        balance.updated_at = self.clock.utc();
        self.store.save(&Self::key(user), &balance);
        info!(user = %user, amount, remaining = balance.kaiblooms_points, "debited Kaiblooms");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, STARTING_KAIBLOOMS};
    use crate::outbound::storage::InMemoryMedium;
    use chrono::{DateTime, Local, TimeZone, Utc};

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn fixture_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn ledger() -> ProgressLedger<InMemoryMedium> {
        let store = Store::new(Arc::new(InMemoryMedium::new()));
        ProgressLedger::new(
            store,
            Arc::new(FixtureClock {
                utc_now: fixture_timestamp(),
            }),
        )
    }

    fn user() -> UserId {
        UserId::try_new(1).expect("positive id")
    }

    #[tokio::test]
    async fn balance_materialises_the_starting_record() {
        let ledger = ledger();
        let balance = ledger.balance(user()).await.expect("balance");
        assert_eq!(balance.kaiblooms_points, STARTING_KAIBLOOMS);
        assert_eq!(balance.updated_at, fixture_timestamp());
    }

    #[tokio::test]
    async fn awards_accumulate_over_the_starting_balance() {
        let ledger = ledger();
        let mut total = STARTING_KAIBLOOMS;
        for _ in 0..3 {
            let awarded = ledger.award(user(), 60).await.expect("award");
            assert_eq!(awarded, TASK_COMPLETION_AWARD);
            total += TASK_COMPLETION_AWARD;
        }
        let balance = ledger.balance(user()).await.expect("balance");
        assert_eq!(balance.kaiblooms_points, total);
    }

    #[tokio::test]
    async fn award_is_flat_regardless_of_the_estimate() {
        let ledger = ledger();
        let short = ledger.award(user(), 5).await.expect("award");
        let long = ledger.award(user(), 480).await.expect("award");
        assert_eq!(short, long);
    }

    #[tokio::test]
    async fn debit_reduces_the_balance() {
        let ledger = ledger();
        let balance = ledger.debit(user(), 50).await.expect("debit");
        assert_eq!(balance.kaiblooms_points, STARTING_KAIBLOOMS - 50);
    }

    #[tokio::test]
    async fn over_debit_fails_without_writing() {
        let ledger = ledger();
        let err = ledger
            .debit(user(), STARTING_KAIBLOOMS + 1)
            .await
            .expect_err("over-debit");
        assert_eq!(err.code(), ErrorCode::InsufficientBalance);

        let balance = ledger.balance(user()).await.expect("balance");
        assert_eq!(balance.kaiblooms_points, STARTING_KAIBLOOMS);
    }

    #[tokio::test]
    async fn debit_of_the_exact_balance_reaches_zero() {
        let ledger = ledger();
        let balance = ledger
            .debit(user(), STARTING_KAIBLOOMS)
            .await
            .expect("exact debit");
        assert_eq!(balance.kaiblooms_points, 0);
    }

    #[tokio::test]
    async fn balances_are_isolated_per_user() {
        let ledger = ledger();
        let other = UserId::try_new(2).expect("positive id");
        ledger.award(user(), 30).await.expect("award");

        let untouched = ledger.balance(other).await.expect("balance");
        assert_eq!(untouched.kaiblooms_points, STARTING_KAIBLOOMS);
    }
}
