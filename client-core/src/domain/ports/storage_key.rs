//! Structured storage keys for per-user resource isolation.
//!
//! A key is a composite of a resource kind and an optional user id with
//! derived equality and hashing. String templating is deliberately avoided:
//! two distinct `(resource, user)` pairs can never collide the way
//! concatenated multi-digit ids can. The legacy string token is available
//! through `Display` for diagnostics only.

use std::fmt;

use crate::domain::UserId;

/// The five resource kinds the core persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// The task collection.
    Tasks,
    /// The settings record.
    Settings,
    /// The Kaibloom balance.
    Progress,
    /// The collectible inventory.
    Collectibles,
    /// The reflection log.
    Reflections,
}

impl ResourceKind {
    /// Every resource kind, in a stable order. Used by clear-data to sweep
    /// a user's records.
    pub const ALL: [Self; 5] = [
        Self::Tasks,
        Self::Settings,
        Self::Progress,
        Self::Collectibles,
        Self::Reflections,
    ];

    /// The legacy storage token for this kind.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Tasks => "kaikoon-tasks",
            Self::Settings => "kaikoon-settings",
            Self::Progress => "kaikoon-user-progress",
            Self::Collectibles => "kaikoon-collectibles",
            Self::Reflections => "kaikoon-reflections",
        }
    }
}

/// Composite key scoping one resource record to one user (or to the global
/// legacy scope when no user is present).
///
/// # Examples
/// ```
/// use client_core::domain::ports::{ResourceKind, StorageKey};
/// use client_core::domain::UserId;
///
/// let user = UserId::try_new(12).expect("positive id");
/// let scoped = StorageKey::scoped(ResourceKind::Tasks, user);
/// let global = StorageKey::global(ResourceKind::Tasks);
/// assert_ne!(scoped, global);
/// assert_eq!(scoped.to_string(), "kaikoon-tasks-user-12");
/// assert_eq!(global.to_string(), "kaikoon-tasks");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageKey {
    kind: ResourceKind,
    user: Option<UserId>,
}

impl StorageKey {
    /// Key for a resource belonging to a specific user.
    #[must_use]
    pub const fn scoped(kind: ResourceKind, user: UserId) -> Self {
        Self {
            kind,
            user: Some(user),
        }
    }

    /// Key for the anonymous/global legacy scope.
    #[must_use]
    pub const fn global(kind: ResourceKind) -> Self {
        Self { kind, user: None }
    }

    /// Key for a resource with an optional owner.
    #[must_use]
    pub const fn resolve(kind: ResourceKind, user: Option<UserId>) -> Self {
        Self { kind, user }
    }

    /// The resource kind this key addresses.
    #[must_use]
    pub const fn kind(self) -> ResourceKind {
        self.kind
    }

    /// The owning user, when the key is user-scoped.
    #[must_use]
    pub const fn user(self) -> Option<UserId> {
        self.user
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.user {
            Some(user) => write!(f, "{}-user-{user}", self.kind.token()),
            None => f.write_str(self.kind.token()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    fn user(raw: i64) -> UserId {
        UserId::try_new(raw).expect("positive id")
    }

    #[rstest]
    fn keys_are_distinct_across_kinds_and_users() {
        let mut seen = HashSet::new();
        for kind in ResourceKind::ALL {
            assert!(seen.insert(StorageKey::global(kind)));
            for raw in [1, 2, 12, 21, 121] {
                assert!(seen.insert(StorageKey::scoped(kind, user(raw))));
            }
        }
    }

    #[rstest]
    fn adjacent_digit_ids_cannot_collide() {
        // "user 1, then 21" vs "user 12, then 1" would collide under naive
        // string concatenation; the composite key keeps them apart.
        let a = StorageKey::scoped(ResourceKind::Tasks, user(121));
        let b = StorageKey::scoped(ResourceKind::Tasks, user(12));
        assert_ne!(a, b);
    }

    #[rstest]
    fn resolve_matches_the_explicit_constructors() {
        assert_eq!(
            StorageKey::resolve(ResourceKind::Progress, None),
            StorageKey::global(ResourceKind::Progress)
        );
        assert_eq!(
            StorageKey::resolve(ResourceKind::Progress, Some(user(4))),
            StorageKey::scoped(ResourceKind::Progress, user(4))
        );
    }

    #[rstest]
    #[case::tasks(ResourceKind::Tasks, "kaikoon-tasks")]
    #[case::progress(ResourceKind::Progress, "kaikoon-user-progress")]
    #[case::reflections(ResourceKind::Reflections, "kaikoon-reflections")]
    fn display_renders_the_legacy_token(#[case] kind: ResourceKind, #[case] token: &str) {
        assert_eq!(StorageKey::global(kind).to_string(), token);
        assert_eq!(
            StorageKey::scoped(kind, user(7)).to_string(),
            format!("{token}-user-7")
        );
    }
}
