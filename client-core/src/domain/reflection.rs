//! Append-only reflection log entries.
//!
//! Entries are never mutated after creation and the log is kept
//! most-recent-first. Sentiment is derived from the emoji rating at append
//! time and stored with the entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Error, UserId};

/// Valid range for the emoji rating.
pub const EMOJI_RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Coarse sentiment bucket derived from the emoji rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    /// Rating of 4 or 5.
    Positive,
    /// Rating of 3.
    Neutral,
    /// Rating of 1 or 2.
    Negative,
}

impl Sentiment {
    /// Derive sentiment from a rating.
    ///
    /// # Examples
    /// ```
    /// use client_core::domain::Sentiment;
    ///
    /// assert_eq!(Sentiment::from_rating(5), Sentiment::Positive);
    /// assert_eq!(Sentiment::from_rating(3), Sentiment::Neutral);
    /// assert_eq!(Sentiment::from_rating(1), Sentiment::Negative);
    /// ```
    #[must_use]
    pub const fn from_rating(rating: u8) -> Self {
        if rating >= 4 {
            Self::Positive
        } else if rating <= 2 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// Validated input for appending a reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionDraft {
    /// The task this reflection is about.
    pub task_id: i64,
    /// Rating in [`EMOJI_RATING_RANGE`].
    pub emoji_rating: u8,
    /// Free-form reflection text. Never empty.
    pub reflection_text: String,
}

impl ReflectionDraft {
    /// Validate and construct a reflection draft.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the rating
    /// is outside 1..=5 or the text is empty after trimming.
    pub fn try_new(
        task_id: i64,
        emoji_rating: u8,
        reflection_text: impl Into<String>,
    ) -> Result<Self, Error> {
        if !EMOJI_RATING_RANGE.contains(&emoji_rating) {
            return Err(Error::invalid_request("emoji rating must be between 1 and 5"));
        }
        let reflection_text = reflection_text.into();
        if reflection_text.trim().is_empty() {
            return Err(Error::invalid_request("reflection cannot be empty"));
        }
        Ok(Self {
            task_id,
            emoji_rating,
            reflection_text,
        })
    }
}

/// A stored reflection log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionEntry {
    /// Unique entry identifier within the user's log.
    pub id: i64,
    /// Owning user.
    pub user_id: UserId,
    /// The task reflected on.
    pub task_id: i64,
    /// Rating in 1..=5.
    pub emoji_rating: u8,
    /// Free-form reflection text.
    pub reflection_text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Sentiment derived from the rating at append time.
    pub sentiment: Sentiment,
    /// Title of the reflected task, captured at append time so the entry
    /// survives the task's removal.
    pub task_title: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case::five(5, Sentiment::Positive)]
    #[case::four(4, Sentiment::Positive)]
    #[case::three(3, Sentiment::Neutral)]
    #[case::two(2, Sentiment::Negative)]
    #[case::one(1, Sentiment::Negative)]
    fn sentiment_buckets_match_ratings(#[case] rating: u8, #[case] expected: Sentiment) {
        assert_eq!(Sentiment::from_rating(rating), expected);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::six(6)]
    fn draft_rejects_out_of_range_ratings(#[case] rating: u8) {
        let err = ReflectionDraft::try_new(1, rating, "went well").expect_err("bad rating");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn draft_rejects_blank_text() {
        let err = ReflectionDraft::try_new(1, 4, "  ").expect_err("blank text");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn entry_serde_round_trip_preserves_every_field() {
        let entry = ReflectionEntry {
            id: 1,
            user_id: UserId::try_new(1).expect("positive id"),
            task_id: 3,
            emoji_rating: 4,
            reflection_text: "Focused well".to_owned(),
            created_at: chrono::Utc::now(),
            sentiment: Sentiment::Positive,
            task_title: "Essay".to_owned(),
        };
        let encoded = serde_json::to_string(&entry).expect("serialise");
        let decoded: ReflectionEntry = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, entry);
    }
}
