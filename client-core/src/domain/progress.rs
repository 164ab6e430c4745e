//! Kaibloom balance record and award policy constants.
//!
//! The balance type uses `u32`, so a negative balance is unrepresentable;
//! the debit path still checks before subtracting so a failing debit leaves
//! the stored record untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Kaiblooms granted to a brand-new user before any mutation is persisted.
pub const STARTING_KAIBLOOMS: u32 = 500;

/// Flat award credited per completed task.
///
/// The policy is a constant, independent of the task's minute estimate. The
/// estimate is still threaded through the award operation so a proportional
/// policy could be swapped in without changing any call site.
pub const TASK_COMPLETION_AWARD: u32 = 50;

/// Singleton per-user points balance.
///
/// # Examples
/// ```
/// use client_core::domain::{KaibloomBalance, UserId, STARTING_KAIBLOOMS};
///
/// let user = UserId::try_new(1).expect("positive id");
/// let balance = KaibloomBalance::starting(user, chrono::Utc::now());
/// assert_eq!(balance.kaiblooms_points, STARTING_KAIBLOOMS);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KaibloomBalance {
    /// Owning user.
    pub user_id: UserId,
    /// Current points. Never negative by construction.
    pub kaiblooms_points: u32,
    /// Timestamp of the last mutation (or materialisation).
    pub updated_at: DateTime<Utc>,
}

impl KaibloomBalance {
    /// Materialise the default balance for a user that has no stored record.
    #[must_use]
    pub const fn starting(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            kaiblooms_points: STARTING_KAIBLOOMS,
            updated_at: now,
        }
    }
}
