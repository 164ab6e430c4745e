//! Collectible catalog and per-user inventory records.
//!
//! The catalog is read-only reference data, not owned by any repository.
//! Inventory rows are denormalised snapshots of the catalog entry taken at
//! first purchase, so a later catalog change never rewrites history.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectibleType {
    /// Catalog identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Display emoji.
    pub emoji: String,
    /// Purchase cost in Kaiblooms. Always positive.
    pub cost: u32,
}

/// A user's aggregated holding of one collectible type.
///
/// At most one row exists per `(user, collectible type)` pair; repeat
/// purchases increment `quantity` in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedCollectible {
    /// Inventory row identifier, unique within the user's collection.
    pub user_collectible_id: i64,
    /// The catalog entry this row aggregates.
    pub collectible_type_id: i64,
    /// How many have been purchased. At least 1.
    pub quantity: u32,
    /// Timestamp of the first purchase.
    pub purchased_at: DateTime<Utc>,
    /// Snapshot of the catalog name at first purchase.
    pub name: String,
    /// Snapshot of the catalog description at first purchase.
    pub description: String,
    /// Snapshot of the catalog emoji at first purchase.
    pub emoji: String,
    /// Snapshot of the catalog cost at first purchase.
    pub cost: u32,
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    /// The Kaibloom balance after the debit.
    pub new_balance: u32,
}

/// The static collectible catalog.
///
/// # Examples
/// ```
/// use client_core::domain::collectible_catalog;
///
/// let catalog = collectible_catalog();
/// assert_eq!(catalog.len(), 5);
/// assert!(catalog.iter().all(|entry| entry.cost > 0));
/// ```
#[must_use]
pub fn collectible_catalog() -> &'static [CollectibleType] {
    static CATALOG: OnceLock<Vec<CollectibleType>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let entries = [
            (1, "Golden Leaf", "A rare golden leaf that sparkles in the sunlight", "\u{1f342}", 50),
            (2, "Crystal Flower", "A beautiful crystal flower that never wilts", "\u{1f338}", 75),
            (3, "Rainbow Butterfly", "A magical butterfly with rainbow wings", "\u{1f98b}", 100),
            (4, "Starlight Tree", "A tree that glows with starlight at night", "\u{1f333}", 150),
            (5, "Moonstone", "A precious stone that glows with moonlight", "\u{1f48e}", 200),
        ];
        entries
            .into_iter()
            .map(|(id, name, description, emoji, cost)| CollectibleType {
                id,
                name: name.to_owned(),
                description: description.to_owned(),
                emoji: emoji.to_owned(),
                cost,
            })
            .collect()
    })
}

/// Look up a catalog entry by id.
#[must_use]
pub fn find_collectible_type(id: i64) -> Option<&'static CollectibleType> {
    collectible_catalog().iter().find(|entry| entry.id == id)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn catalog_ids_are_unique_and_ascending() {
        let catalog = collectible_catalog();
        let mut ids: Vec<i64> = catalog.iter().map(|entry| entry.id).collect();
        let original = ids.clone();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids, original);
    }

    #[rstest]
    #[case::golden_leaf(1, 50)]
    #[case::moonstone(5, 200)]
    fn find_resolves_known_entries(#[case] id: i64, #[case] cost: u32) {
        let entry = find_collectible_type(id).expect("known entry");
        assert_eq!(entry.cost, cost);
    }

    #[rstest]
    fn find_returns_none_for_unknown_entries() {
        assert!(find_collectible_type(99).is_none());
    }

    #[rstest]
    fn owned_collectible_serde_round_trip_preserves_every_field() {
        let owned = OwnedCollectible {
            user_collectible_id: 1,
            collectible_type_id: 2,
            quantity: 3,
            purchased_at: chrono::Utc::now(),
            name: "Crystal Flower".to_owned(),
            description: "A beautiful crystal flower that never wilts".to_owned(),
            emoji: "\u{1f338}".to_owned(),
            cost: 75,
        };
        let encoded = serde_json::to_string(&owned).expect("serialise");
        let decoded: OwnedCollectible = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, owned);
    }
}
