//! Per-user settings bag with partial-update semantics.
//!
//! A patch only overwrites the fields it explicitly carries; everything else
//! is left as stored. Defaults mirror the record a brand-new user sees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Error, UserId};

/// Valid range for the break reminder interval, in minutes.
pub const BREAK_REMINDER_INTERVAL_RANGE: std::ops::RangeInclusive<u32> = 15..=60;

const DEFAULT_BREAK_REMINDER_INTERVAL: u32 = 30;

/// Per-user configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Owning user.
    pub user_id: UserId,
    /// School grade, free-form.
    pub grade: Option<String>,
    /// Enrolled classes.
    pub classes: Option<Vec<String>>,
    /// Larger font rendering.
    pub bigger_text: bool,
    /// Haptic feedback on interactions.
    pub haptic_buzz: bool,
    /// Focus-music playlist URL.
    pub kaibeat_playlist_url: Option<String>,
    /// Master notification switch.
    pub notifications_enabled: bool,
    /// Break reminders on/off.
    pub break_reminders_enabled: bool,
    /// Minutes between break reminders. Always within
    /// [`BREAK_REMINDER_INTERVAL_RANGE`].
    pub break_reminder_interval: u32,
    /// Celebration notifications on task completion.
    pub celebration_notifications_enabled: bool,
    /// Daily check-in prompt.
    pub daily_checkin_enabled: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// The record materialised on a user's first settings access.
    #[must_use]
    pub fn new_default(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            grade: None,
            classes: None,
            bigger_text: false,
            haptic_buzz: true,
            kaibeat_playlist_url: None,
            notifications_enabled: true,
            break_reminders_enabled: true,
            break_reminder_interval: DEFAULT_BREAK_REMINDER_INTERVAL,
            celebration_notifications_enabled: true,
            daily_checkin_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch, overwriting only the fields it carries.
    #[must_use]
    pub fn apply(mut self, patch: SettingsPatch, now: DateTime<Utc>) -> Self {
        if let Some(grade) = patch.grade {
            self.grade = grade;
        }
        if let Some(classes) = patch.classes {
            self.classes = classes;
        }
        if let Some(bigger_text) = patch.bigger_text {
            self.bigger_text = bigger_text;
        }
        if let Some(haptic_buzz) = patch.haptic_buzz {
            self.haptic_buzz = haptic_buzz;
        }
        if let Some(url) = patch.kaibeat_playlist_url {
            self.kaibeat_playlist_url = url;
        }
        if let Some(enabled) = patch.notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(enabled) = patch.break_reminders_enabled {
            self.break_reminders_enabled = enabled;
        }
        if let Some(interval) = patch.break_reminder_interval {
            self.break_reminder_interval = interval;
        }
        if let Some(enabled) = patch.celebration_notifications_enabled {
            self.celebration_notifications_enabled = enabled;
        }
        if let Some(enabled) = patch.daily_checkin_enabled {
            self.daily_checkin_enabled = enabled;
        }
        self.updated_at = now;
        self
    }
}

/// Partial settings update.
///
/// `None` means "leave as stored". Nullable stored fields use a nested
/// `Option` so a patch can distinguish "don't touch" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// New grade; inner `None` clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Option<String>>,
    /// New class list; inner `None` clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Option<Vec<String>>>,
    /// New larger-font flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bigger_text: Option<bool>,
    /// New haptic feedback flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub haptic_buzz: Option<bool>,
    /// New playlist URL; inner `None` clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kaibeat_playlist_url: Option<Option<String>>,
    /// New master notification flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    /// New break reminder flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_reminders_enabled: Option<bool>,
    /// New break reminder interval in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_reminder_interval: Option<u32>,
    /// New celebration notification flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celebration_notifications_enabled: Option<bool>,
    /// New daily check-in flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_checkin_enabled: Option<bool>,
}

impl SettingsPatch {
    /// Reject forged out-of-range values before any mutation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the break
    /// reminder interval falls outside [`BREAK_REMINDER_INTERVAL_RANGE`].
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(interval) = self.break_reminder_interval
            && !BREAK_REMINDER_INTERVAL_RANGE.contains(&interval)
        {
            return Err(Error::invalid_request(format!(
                "break reminder interval must be between {} and {} minutes",
                BREAK_REMINDER_INTERVAL_RANGE.start(),
                BREAK_REMINDER_INTERVAL_RANGE.end(),
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn user() -> UserId {
        UserId::try_new(1).expect("positive id")
    }

    #[rstest]
    fn defaults_match_the_documented_record() {
        let settings = UserSettings::new_default(user(), chrono::Utc::now());
        assert_eq!(settings.grade, None);
        assert_eq!(settings.classes, None);
        assert!(!settings.bigger_text);
        assert!(settings.haptic_buzz);
        assert!(settings.notifications_enabled);
        assert!(settings.break_reminders_enabled);
        assert_eq!(settings.break_reminder_interval, 30);
        assert!(settings.celebration_notifications_enabled);
        assert!(settings.daily_checkin_enabled);
    }

    #[rstest]
    fn apply_touches_only_present_fields() {
        let now = chrono::Utc::now();
        let later = now + chrono::TimeDelta::seconds(5);
        let settings = UserSettings::new_default(user(), now);
        let patch = SettingsPatch {
            grade: Some(Some("10".to_owned())),
            bigger_text: Some(true),
            ..SettingsPatch::default()
        };

        let updated = settings.clone().apply(patch, later);
        assert_eq!(updated.grade.as_deref(), Some("10"));
        assert!(updated.bigger_text);
        assert_eq!(updated.haptic_buzz, settings.haptic_buzz);
        assert_eq!(
            updated.break_reminder_interval,
            settings.break_reminder_interval
        );
        assert_eq!(updated.created_at, settings.created_at);
        assert_eq!(updated.updated_at, later);
    }

    #[rstest]
    fn apply_can_clear_nullable_fields() {
        let now = chrono::Utc::now();
        let settings = UserSettings {
            grade: Some("9".to_owned()),
            ..UserSettings::new_default(user(), now)
        };
        let patch = SettingsPatch {
            grade: Some(None),
            ..SettingsPatch::default()
        };

        let updated = settings.apply(patch, now);
        assert_eq!(updated.grade, None);
    }

    #[rstest]
    #[case::too_small(14)]
    #[case::too_large(61)]
    fn validate_rejects_out_of_range_intervals(#[case] interval: u32) {
        let patch = SettingsPatch {
            break_reminder_interval: Some(interval),
            ..SettingsPatch::default()
        };
        let err = patch.validate().expect_err("out of range");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case::lower_bound(15)]
    #[case::upper_bound(60)]
    fn validate_accepts_boundary_intervals(#[case] interval: u32) {
        let patch = SettingsPatch {
            break_reminder_interval: Some(interval),
            ..SettingsPatch::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[rstest]
    fn settings_serde_round_trip_preserves_every_field() {
        let settings = UserSettings::new_default(user(), chrono::Utc::now());
        let encoded = serde_json::to_string(&settings).expect("serialise");
        let decoded: UserSettings = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, settings);
    }
}
