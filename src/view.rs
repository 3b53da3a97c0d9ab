//! Read model for the presentation layer
//!
//! A snapshot with everything needed to redraw the card after a mutation,
//! so the UI never re-derives totals or names itself.

use serde::Serialize;

use crate::round::RoundState;

/// Number of player color themes the UI ships with
pub const THEME_SLOTS: usize = 4;

/// One hole on the selected player's card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleView {
    /// 1-based hole number
    pub number: usize,
    pub strokes: u32,
    /// The minus control is disabled at zero
    pub can_decrement: bool,
}

impl HoleView {
    /// Accessible label, e.g. "Hole 3, 4 shots"
    pub fn label(&self) -> String {
        format!("Hole {}, {} shots", self.number, self.strokes)
    }
}

/// Snapshot of the selected player's card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub current_player: usize,
    pub player_name: String,
    /// Palette slot for the selected player; the real index is never capped
    pub theme_slot: usize,
    pub total: u64,
    pub holes: Vec<HoleView>,
    pub player_names: Vec<String>,
}

impl RoundView {
    pub fn of(state: &RoundState) -> Self {
        let current = state.current_player;
        let holes = state
            .current_scores()
            .iter()
            .enumerate()
            .map(|(i, &strokes)| HoleView {
                number: i + 1,
                strokes,
                can_decrement: strokes > 0,
            })
            .collect();

        Self {
            current_player: current,
            player_name: state.display_name(current),
            theme_slot: theme_slot(current),
            total: state.current_total(),
            holes,
            player_names: (0..state.num_players as usize)
                .map(|i| state.display_name(i))
                .collect(),
        }
    }
}

/// Map any player index onto the bounded palette
pub fn theme_slot(player: usize) -> usize {
    player % THEME_SLOTS
}
