//! Golf Score - an offline scorecard for a round of golf
//!
//! Core modules:
//! - `round`: Round state, reconciliation of persisted data, mutations
//! - `persistence`: Key/value storage backends (memory, file, LocalStorage)
//! - `export`: Plain-text scorecard export and mail drafts
//! - `view`: Read model handed to the presentation layer
//! - `settings`: User preferences
//! - `platform`: Browser bindings (wasm32 only)

pub mod export;
pub mod persistence;
pub mod platform;
pub mod round;
pub mod settings;
pub mod view;

pub use export::{ExportError, export_text, mail_draft};
pub use persistence::{FileStorage, MemoryStorage, Storage, StorageError};
pub use round::{RoundConfig, RoundState, ScoreStore, Selection, reconcile};
pub use settings::Settings;
pub use view::{HoleView, RoundView};

/// Scorecard configuration constants
pub mod consts {
    /// Hole counts a round may be configured with
    pub const ALLOWED_HOLES: [u32; 2] = [9, 18];
    /// Hole count used when nothing valid is stored
    pub const DEFAULT_HOLES: u32 = 18;

    /// Player bounds
    pub const MIN_PLAYERS: u32 = 1;
    pub const MAX_PLAYERS: u32 = 8;
    pub const DEFAULT_PLAYERS: u32 = 4;

    /// The single storage slot holding the round
    pub const STORAGE_KEY: &str = "golf-score-tracker";
}

/// Positional fallback name for a player slot ("Player 1" for index 0)
#[inline]
pub fn default_player_name(index: usize) -> String {
    format!("Player {}", index + 1)
}

/// Whether `holes` is one of the allowed hole counts
#[inline]
pub fn is_allowed_holes(holes: i64) -> bool {
    consts::ALLOWED_HOLES.iter().any(|&h| i64::from(h) == holes)
}

/// Clamp a requested player count into `[MIN_PLAYERS, MAX_PLAYERS]`
#[inline]
pub fn clamp_players(players: i64) -> u32 {
    use consts::{MAX_PLAYERS, MIN_PLAYERS};
    players.clamp(i64::from(MIN_PLAYERS), i64::from(MAX_PLAYERS)) as u32
}
