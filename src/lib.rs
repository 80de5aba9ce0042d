// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod broadcast;
pub mod config;
pub mod feed;
pub mod metrics;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::broadcast::{FeedState, Snapshot, UpdatesHandle};
pub use crate::feed::types::{Update, UpdateType};
