//! User identity.
//!
//! The authentication layer is an external collaborator; the core only ever
//! sees an opaque positive integer identifying the owner of user-scoped
//! records. Absence of a user (the legacy/global scope) is modelled as
//! `Option<UserId>` at the storage-key boundary, never as a sentinel value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIdValidationError {
    /// User ids are positive integers; zero and negatives are forged input.
    NotPositive,
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive => write!(f, "user id must be a positive integer"),
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Stable user identifier stored as a positive integer.
///
/// # Examples
/// ```
/// use client_core::domain::UserId;
///
/// let id = UserId::try_new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(UserId::try_new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Errors
    ///
    /// Returns [`UserIdValidationError::NotPositive`] for zero or negative
    /// input.
    pub const fn try_new(raw: i64) -> Result<Self, UserIdValidationError> {
        if raw <= 0 {
            return Err(UserIdValidationError::NotPositive);
        }
        Ok(Self(raw))
    }

    /// The raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserIdValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::try_new(raw)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}
