//! Shared session state for Cityscope.
//!
//! Holds the current weather snapshot, forecast, unit preference, and the
//! persisted favorites list behind one container any view can share.

pub mod favorites;
pub mod session;

pub use favorites::FavoritesStore;
pub use session::Session;
