//! Client-side persistence and gamification core for the Kaikoon student
//! productivity app.
//!
//! The crate keeps per-user tasks, Kaibloom points, collectibles, settings,
//! and reflections in a typed local store, and can sit behind a remote API
//! with transparent local fallback. See [`app::ClientCore`] for wiring.

pub mod app;
pub mod domain;
pub mod outbound;

pub use app::ClientCore;
