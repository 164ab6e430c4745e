//! Local repositories: the mock persistence tier backing every driving port.
//!
//! Each repository keeps one resource kind under its scoped storage key and
//! implements the matching driving port. The ledger is shared: tasks credit
//! it on completion and the inventory debits it on purchase, all against the
//! same store.

mod collectible_inventory;
mod progress_ledger;
mod reflection_log;
mod settings_repository;
mod task_repository;

pub use self::collectible_inventory::CollectibleInventory;
pub use self::progress_ledger::ProgressLedger;
pub use self::reflection_log::ReflectionLog;
pub use self::settings_repository::SettingsRepository;
pub use self::task_repository::TaskRepository;
