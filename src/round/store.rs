//! The score store: owns the round and writes it back after every change
//!
//! Every mutation is read-modify-persist. Persistence problems are logged and
//! swallowed so a failing disk or full LocalStorage never stops scoring.

use serde::Serialize;

use super::config::RoundConfig;
use super::reconcile::reconcile;
use super::state::{RoundState, blank_row};
use crate::consts::STORAGE_KEY;
use crate::export;
use crate::persistence::{Storage, StorageError};

/// Result of switching players
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Selected player index (after clamping)
    pub index: usize,
    /// Name to display for that player
    pub name: String,
}

/// Round state plus the storage it round-trips through
#[derive(Debug)]
pub struct ScoreStore<S: Storage> {
    state: RoundState,
    storage: S,
}

impl<S: Storage> ScoreStore<S> {
    /// Load and repair whatever is stored; a read failure counts as empty
    pub fn load(storage: S) -> Self {
        let raw = match storage.get_item(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("Could not read stored round: {err}");
                None
            }
        };
        let state = reconcile(raw.as_deref());
        log::info!(
            "Loaded round: {} holes, {} players",
            state.num_holes,
            state.num_players
        );
        Self { state, storage }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Scores of the selected player
    pub fn current_scores(&self) -> &[u32] {
        self.state.current_scores()
    }

    /// Total strokes of the selected player
    pub fn current_total(&self) -> u64 {
        self.state.current_total()
    }

    /// Add `delta` strokes to a hole for the selected player, flooring at 0.
    ///
    /// Returns the new value, or `None` (and changes nothing) when `hole`
    /// is out of range.
    pub fn adjust_score(&mut self, hole: usize, delta: i64) -> Option<u32> {
        let player = self.state.current_player;
        let score = self.state.players.get_mut(player)?.get_mut(hole)?;
        let next = (i64::from(*score).saturating_add(delta)).clamp(0, i64::from(u32::MAX));
        *score = next as u32;
        let value = *score;

        self.persist();
        Some(value)
    }

    /// Zero every score, keeping configuration and selection
    pub fn reset_round(&mut self) {
        let holes = self.state.num_holes;
        for row in &mut self.state.players {
            *row = blank_row(holes);
        }
        log::info!("Started a new round");
        self.persist();
    }

    /// Select a player, clamping the index into range
    pub fn select_player(&mut self, index: i64) -> Selection {
        let last = i64::from(self.state.num_players) - 1;
        let index = index.clamp(0, last) as usize;
        self.state.current_player = index;
        self.persist();

        Selection {
            index,
            name: self.state.display_name(index),
        }
    }

    /// Change hole count, player count and names, keeping as many scores as fit
    pub fn reconfigure<N: AsRef<str>>(
        &mut self,
        num_holes: i64,
        num_players: i64,
        names: &[N],
    ) -> &RoundState {
        self.apply_config(RoundConfig::normalized(num_holes, num_players, names))
    }

    /// Apply a configuration (normalized again, so hand-built values are safe)
    pub fn apply_config(&mut self, config: RoundConfig) -> &RoundState {
        let RoundConfig {
            num_holes,
            num_players,
            player_names,
        } = RoundConfig::normalized(
            i64::from(config.num_holes),
            i64::from(config.num_players),
            config.player_names.as_slice(),
        );

        let players = migrate_rows(&self.state.players, num_players, num_holes);
        let current_player = self
            .state
            .current_player
            .min(num_players as usize - 1);

        self.state = RoundState {
            current_player,
            players,
            num_holes,
            num_players,
            player_names,
        };
        log::info!("Reconfigured round: {num_holes} holes, {num_players} players");
        self.persist();
        &self.state
    }

    /// Tabular export of the whole round
    pub fn export_text(&self) -> String {
        export::export_text(&self.state)
    }

    /// Write the round to storage
    pub fn save(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.state)?;
        self.storage.set_item(STORAGE_KEY, &json)
    }

    fn persist(&mut self) {
        if let Err(err) = self.save() {
            log::warn!("Round not saved: {err}");
        }
    }
}

/// Keep each surviving player's first `min(old, new)` holes, zero the rest
fn migrate_rows(old: &[Vec<u32>], num_players: u32, num_holes: u32) -> Vec<Vec<u32>> {
    (0..num_players as usize)
        .map(|i| match old.get(i) {
            Some(row) => {
                let mut row: Vec<u32> = row.iter().take(num_holes as usize).copied().collect();
                row.resize(num_holes as usize, 0);
                row
            }
            None => blank_row(num_holes),
        })
        .collect()
}
