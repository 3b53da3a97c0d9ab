//! Round state: the one value the scorecard persists
//!
//! Field names on the wire are the ones every stored generation has used
//! (`currentPlayer`, `players`, `numHoles`, `numPlayers`, `playerNames`).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::default_player_name;

/// Complete round state (serializable, always shape-consistent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    /// Index of the player whose card is being edited
    pub current_player: usize,
    /// Strokes per hole, one row per player
    pub players: Vec<Vec<u32>>,
    /// Holes in the round (one of `ALLOWED_HOLES`)
    pub num_holes: u32,
    /// Players in the round (`MIN_PLAYERS..=MAX_PLAYERS`)
    pub num_players: u32,
    /// Display names, one per player
    pub player_names: Vec<String>,
}

impl Default for RoundState {
    fn default() -> Self {
        let names: Vec<String> = (0..DEFAULT_PLAYERS as usize)
            .map(default_player_name)
            .collect();
        Self::blank(DEFAULT_HOLES, names)
    }
}

impl RoundState {
    /// A fresh round with every score zero and the first player selected.
    /// `player_names` decides the player count.
    pub fn blank(num_holes: u32, player_names: Vec<String>) -> Self {
        let players = player_names.iter().map(|_| blank_row(num_holes)).collect();
        Self {
            current_player: 0,
            players,
            num_holes,
            num_players: player_names.len() as u32,
            player_names,
        }
    }

    /// Scores for one player, if the index exists
    pub fn scores_for(&self, player: usize) -> Option<&[u32]> {
        self.players.get(player).map(Vec::as_slice)
    }

    /// Scores for the selected player
    pub fn current_scores(&self) -> &[u32] {
        self.scores_for(self.current_player).unwrap_or(&[])
    }

    /// Sum of one player's strokes (0 for an unknown player)
    pub fn total_for(&self, player: usize) -> u64 {
        self.scores_for(player)
            .map(|row| row.iter().map(|&s| u64::from(s)).sum())
            .unwrap_or(0)
    }

    /// Sum of the selected player's strokes
    pub fn current_total(&self) -> u64 {
        self.total_for(self.current_player)
    }

    /// Name to show for a player, falling back to "Player N" when blank
    pub fn display_name(&self, player: usize) -> String {
        match self.player_names.get(player) {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => default_player_name(player),
        }
    }

    /// Check every shape invariant of the round
    pub fn is_valid(&self) -> bool {
        let players = self.num_players as usize;
        ALLOWED_HOLES.contains(&self.num_holes)
            && (MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players)
            && self.players.len() == players
            && self
                .players
                .iter()
                .all(|row| row.len() == self.num_holes as usize)
            && self.player_names.len() == players
            && self.player_names.iter().all(|n| !n.trim().is_empty())
            && self.current_player < players
    }
}

/// An all-zero score row
pub fn blank_row(num_holes: u32) -> Vec<u32> {
    vec![0; num_holes as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = RoundState::default();
        assert_eq!(state.num_holes, 18);
        assert_eq!(state.num_players, 4);
        assert_eq!(state.current_player, 0);
        assert_eq!(
            state.player_names,
            vec!["Player 1", "Player 2", "Player 3", "Player 4"]
        );
        assert!(state.players.iter().all(|row| row == &vec![0; 18]));
        assert!(state.is_valid());
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(RoundState::default()).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["currentPlayer", "players", "numHoles", "numPlayers", "playerNames"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 5);
    }

    #[test]
    fn test_totals_and_names() {
        let mut state = RoundState::blank(9, vec!["Ann".into(), "  ".into()]);
        state.players[0] = vec![4, 5, 3, 4, 4, 5, 3, 4, 6];
        state.players[1][2] = 7;
        state.current_player = 1;

        assert_eq!(state.total_for(0), 38);
        assert_eq!(state.current_total(), 7);
        assert_eq!(state.total_for(5), 0);
        assert_eq!(state.display_name(0), "Ann");
        assert_eq!(state.display_name(1), "Player 2");
        assert_eq!(state.current_scores()[2], 7);
    }

    #[test]
    fn test_is_valid_rejects_bad_shapes() {
        let mut state = RoundState::default();
        state.players[2].pop();
        assert!(!state.is_valid());

        let mut state = RoundState::default();
        state.current_player = 4;
        assert!(!state.is_valid());

        let mut state = RoundState::default();
        state.player_names.push("Extra".into());
        assert!(!state.is_valid());

        let mut state = RoundState::default();
        state.num_holes = 12;
        state.players = vec![blank_row(12); 4];
        assert!(!state.is_valid());
    }
}
