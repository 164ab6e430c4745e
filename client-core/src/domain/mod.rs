//! Domain primitives, aggregates, and the hexagonal port boundary.
//!
//! Purpose: define the strongly typed entities the repositories and the
//! fallback gateway exchange, document their invariants, and declare the
//! driving and outbound ports. Entities serialise as camelCase JSON so the
//! stored representation and the remote wire format stay identical.

pub mod error;
pub mod journal;
pub mod ports;

mod collectible;
mod progress;
mod reflection;
mod settings;
mod task;
mod user;

pub use self::collectible::{
    CollectibleType, OwnedCollectible, PurchaseOutcome, collectible_catalog,
    find_collectible_type,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::journal::{JournalAnalysis, JournalPlanner, ObstacleStrategies, PlannedTask,
    ScheduleEntry};
pub use self::progress::{KaibloomBalance, STARTING_KAIBLOOMS, TASK_COMPLETION_AWARD};
pub use self::reflection::{
    EMOJI_RATING_RANGE, ReflectionDraft, ReflectionEntry, Sentiment,
};
pub use self::settings::{
    BREAK_REMINDER_INTERVAL_RANGE, SettingsPatch, UserSettings,
};
pub use self::task::{CompletedTask, Step, StepDraft, StepStatus, Task, TaskDraft, TaskUpdate};
pub use self::user::{UserId, UserIdValidationError};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use client_core::domain::{CoreResult, Error};
///
/// fn check() -> CoreResult<()> {
///     Err(Error::invalid_request("nope"))
/// }
/// assert!(check().is_err());
/// ```
pub type CoreResult<T> = Result<T, Error>;
