//! Platform layer
//!
//! The browser build exposes the store to JavaScript and registers the offline
//! cache. Native builds go through the `golf-score` binary instead.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{Tracker, register_offline_cache};
