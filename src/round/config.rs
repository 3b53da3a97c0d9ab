//! Round configuration: hole count, player count and names

use super::state::RoundState;
use crate::consts::*;
use crate::{clamp_players, default_player_name, is_allowed_holes};

/// A normalized round configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundConfig {
    pub num_holes: u32,
    pub num_players: u32,
    pub player_names: Vec<String>,
}

impl RoundConfig {
    /// Normalize raw user input.
    ///
    /// Unknown hole counts fall back to `DEFAULT_HOLES`, the player count is
    /// clamped, and names are trimmed with blanks replaced by "Player N".
    pub fn normalized<S: AsRef<str>>(num_holes: i64, num_players: i64, names: &[S]) -> Self {
        let num_holes = if is_allowed_holes(num_holes) {
            num_holes as u32
        } else {
            DEFAULT_HOLES
        };
        let num_players = clamp_players(num_players);

        let player_names = (0..num_players as usize)
            .map(|i| {
                let name = names.get(i).map(|n| n.as_ref().trim()).unwrap_or("");
                if name.is_empty() {
                    default_player_name(i)
                } else {
                    name.to_string()
                }
            })
            .collect();

        Self {
            num_holes,
            num_players,
            player_names,
        }
    }

    /// Configuration currently in effect for a round
    pub fn of(state: &RoundState) -> Self {
        Self {
            num_holes: state.num_holes,
            num_players: state.num_players,
            player_names: state.player_names.clone(),
        }
    }

    /// Overlay a partial change onto this configuration.
    ///
    /// Omitted counts keep their current value. Given names replace the
    /// leading slots; the remaining slots keep their current names.
    pub fn merged<S: AsRef<str>>(
        &self,
        num_holes: Option<i64>,
        num_players: Option<i64>,
        names: &[S],
    ) -> Self {
        let num_holes = num_holes.unwrap_or(i64::from(self.num_holes));
        let num_players = num_players.unwrap_or(i64::from(self.num_players));

        let slots = names.len().max(self.player_names.len());
        let player_names: Vec<&str> = (0..slots)
            .map(|i| match names.get(i) {
                Some(name) => name.as_ref(),
                None => self.player_names.get(i).map(String::as_str).unwrap_or(""),
            })
            .collect();

        Self::normalized(num_holes, num_players, player_names.as_slice())
    }
}
