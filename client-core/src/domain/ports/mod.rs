//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod collectible_operations;
mod progress_operations;
mod reflection_operations;
mod settings_operations;
mod storage_key;
mod storage_medium;
mod task_operations;
mod text_analysis;

#[cfg(test)]
pub use collectible_operations::MockCollectibleOperations;
pub use collectible_operations::CollectibleOperations;
#[cfg(test)]
pub use progress_operations::MockProgressOperations;
pub use progress_operations::ProgressOperations;
#[cfg(test)]
pub use reflection_operations::MockReflectionOperations;
pub use reflection_operations::ReflectionOperations;
#[cfg(test)]
pub use settings_operations::MockSettingsOperations;
pub use settings_operations::SettingsOperations;
pub use storage_key::{ResourceKind, StorageKey};
#[cfg(test)]
pub use storage_medium::MockStorageMedium;
pub use storage_medium::{StorageMedium, StorageMediumError};
#[cfg(test)]
pub use task_operations::MockTaskOperations;
pub use task_operations::{FixtureTaskOperations, TaskOperations};
#[cfg(test)]
pub use text_analysis::MockTextAnalysis;
pub use text_analysis::{FixtureTextAnalysis, TextAnalysis, TextAnalysisError};
