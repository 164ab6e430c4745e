//! Storage adapters: the in-memory medium and the typed store.

mod medium;
mod store;

pub use medium::InMemoryMedium;
pub use store::Store;
