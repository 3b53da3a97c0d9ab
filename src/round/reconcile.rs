//! Turns whatever sits in the storage slot into a valid `RoundState`
//!
//! Three generations of documents have been written to the same key:
//! - a bare array of 18 stroke counts (single player)
//! - `{ currentPlayer, players }` with a fixed 4 x 18 grid
//! - the configurable grid with `numHoles`, `numPlayers`, `playerNames`
//!
//! Rather than decoding a strict schema, every field is parsed on its own with
//! a default, so older or damaged documents still produce a usable round.

use serde_json::{Map, Value};

use super::state::{RoundState, blank_row};
use crate::consts::*;
use crate::{clamp_players, default_player_name, is_allowed_holes};

/// Build a valid round from the raw slot contents.
///
/// Absent, unparsable, or `players`-less documents give the default round.
/// Never fails.
pub fn reconcile(raw: Option<&str>) -> RoundState {
    let Some(raw) = raw else {
        log::debug!("No stored round, starting fresh");
        return RoundState::default();
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Stored round is not valid JSON ({err}), starting fresh");
            return RoundState::default();
        }
    };

    let Some(doc) = value.as_object() else {
        log::warn!("Stored round is not an object, starting fresh");
        return RoundState::default();
    };

    let Some(rows) = doc.get("players").and_then(Value::as_array) else {
        log::warn!("Stored round has no players array, starting fresh");
        return RoundState::default();
    };

    reconcile_fields(doc, rows)
}

fn reconcile_fields(doc: &Map<String, Value>, rows: &[Value]) -> RoundState {
    let num_holes = parse_num_holes(doc.get("numHoles"));
    let num_players = parse_num_players(doc.get("numPlayers"));
    let player_names = parse_player_names(doc.get("playerNames"), num_players);
    let players = parse_rows(rows, num_players, num_holes);
    let current_player = parse_current_player(doc.get("currentPlayer"), num_players);

    log::debug!(
        "Reconciled round: {num_holes} holes, {num_players} players, current {current_player}"
    );

    RoundState {
        current_player,
        players,
        num_holes,
        num_players,
        player_names,
    }
}

/// Only a whole number from the allowed set is kept (`9.0` counts as 9)
fn parse_num_holes(value: Option<&Value>) -> u32 {
    let whole = value.and_then(|v| {
        v.as_i64().or_else(|| {
            v.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })
    });
    match whole {
        Some(holes) if is_allowed_holes(holes) => holes as u32,
        Some(holes) => {
            log::debug!("Ignoring stored hole count {holes}");
            DEFAULT_HOLES
        }
        None => DEFAULT_HOLES,
    }
}

fn parse_num_players(value: Option<&Value>) -> u32 {
    let requested = value
        .and_then(parse_int)
        .unwrap_or(i64::from(DEFAULT_PLAYERS));
    clamp_players(requested)
}

fn parse_player_names(value: Option<&Value>, num_players: u32) -> Vec<String> {
    let stored = value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
    (0..num_players as usize)
        .map(|i| match stored.get(i).and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => default_player_name(i),
        })
        .collect()
}

fn parse_rows(rows: &[Value], num_players: u32, num_holes: u32) -> Vec<Vec<u32>> {
    (0..num_players as usize)
        .map(|i| match rows.get(i) {
            Some(row) => parse_row(row, num_holes),
            None => blank_row(num_holes),
        })
        .collect()
}

/// Truncate or zero-pad one stored row to exactly `num_holes` entries
fn parse_row(row: &Value, num_holes: u32) -> Vec<u32> {
    let stored = row.as_array().map(Vec::as_slice).unwrap_or(&[]);
    let mut scores: Vec<u32> = stored
        .iter()
        .take(num_holes as usize)
        .map(parse_score)
        .collect();
    scores.resize(num_holes as usize, 0);
    scores
}

/// Numbers are truncated and floored at zero; anything else counts as zero
fn parse_score(value: &Value) -> u32 {
    match value {
        Value::Number(_) => parse_int(value)
            .map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0),
        _ => 0,
    }
}

fn parse_current_player(value: Option<&Value>, num_players: u32) -> usize {
    let requested = value.and_then(parse_int).unwrap_or(0);
    requested.clamp(0, i64::from(num_players) - 1) as usize
}

/// Lenient integer parsing in the spirit of `parseInt`.
///
/// Numbers truncate toward zero. Strings may carry leading whitespace and a
/// sign, and only the leading run of digits counts ("3 players" is 3).
pub(crate) fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int_str(s),
        _ => None,
    }
}

fn parse_int_str(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let run = digits.bytes().take_while(u8::is_ascii_digit).count();
    if run == 0 {
        return None;
    }

    let magnitude = digits[..run].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn reconcile_json(value: Value) -> RoundState {
        reconcile(Some(&value.to_string()))
    }

    #[test]
    fn test_absent_gives_default() {
        assert_eq!(reconcile(None), RoundState::default());
    }

    #[test]
    fn test_garbage_gives_default() {
        assert_eq!(reconcile(Some("not json {")), RoundState::default());
        assert_eq!(reconcile(Some("")), RoundState::default());
        assert_eq!(reconcile(Some("42")), RoundState::default());
    }

    #[test]
    fn test_missing_players_gives_default() {
        let state = reconcile_json(json!({ "numHoles": 9, "numPlayers": 2 }));
        assert_eq!(state, RoundState::default());

        let state = reconcile_json(json!({ "players": "nope" }));
        assert_eq!(state, RoundState::default());
    }

    #[test]
    fn test_flat_first_generation_array_gives_default() {
        let state = reconcile_json(json!([3, 4, 5, 4, 3, 4, 5, 4, 3, 4, 5, 4, 3, 4, 5, 4, 3, 4]));
        assert_eq!(state, RoundState::default());
    }

    #[test]
    fn test_second_generation_grid() {
        let mut rows = vec![vec![0u32; 18]; 4];
        rows[1][0] = 5;
        rows[3][17] = 2;
        let state = reconcile_json(json!({ "currentPlayer": 3, "players": rows }));

        assert_eq!(state.num_holes, 18);
        assert_eq!(state.num_players, 4);
        assert_eq!(state.current_player, 3);
        assert_eq!(state.players, rows);
        assert_eq!(state.player_names[2], "Player 3");
        assert!(state.is_valid());
    }

    #[test]
    fn test_wrong_row_lengths_are_fixed() {
        let state = reconcile_json(json!({
            "numHoles": 9,
            "numPlayers": 3,
            "players": [[1, 2, 3], [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11], "row"],
        }));
        assert_eq!(state.players[0], vec![1, 2, 3, 0, 0, 0, 0, 0, 0]);
        assert_eq!(state.players[1], vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(state.players[2], vec![0; 9]);
        assert!(state.is_valid());
    }

    #[test]
    fn test_missing_rows_and_names_are_padded() {
        let state = reconcile_json(json!({
            "numPlayers": 3,
            "players": [[4]],
            "playerNames": ["Ann", "   "],
        }));
        assert_eq!(state.players.len(), 3);
        assert_eq!(state.players[0][0], 4);
        assert_eq!(state.players[2], vec![0; 18]);
        assert_eq!(state.player_names, vec!["Ann", "Player 2", "Player 3"]);
    }

    #[test]
    fn test_extra_rows_and_names_are_dropped() {
        let state = reconcile_json(json!({
            "numPlayers": 1,
            "players": [[1], [2], [3]],
            "playerNames": ["Ann", "Bob", "Cy"],
        }));
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.player_names, vec!["Ann"]);
    }

    #[test]
    fn test_num_players_as_string() {
        let state = reconcile_json(json!({ "numPlayers": "2", "players": [] }));
        assert_eq!(state.num_players, 2);

        let state = reconcile_json(json!({ "numPlayers": "lots", "players": [] }));
        assert_eq!(state.num_players, 4);

        let state = reconcile_json(json!({ "numPlayers": 40, "players": [] }));
        assert_eq!(state.num_players, MAX_PLAYERS);

        let state = reconcile_json(json!({ "numPlayers": 0, "players": [] }));
        assert_eq!(state.num_players, 1);
    }

    #[test]
    fn test_invalid_hole_count_defaults() {
        for holes in [json!(12), json!("9"), json!(null), json!(9.5)] {
            let state = reconcile_json(json!({ "numHoles": holes, "players": [] }));
            assert_eq!(state.num_holes, 18);
        }
    }

    #[test]
    fn test_whole_float_hole_count_is_accepted() {
        let state = reconcile_json(json!({ "numHoles": 9.0, "players": [[1, 2]] }));
        assert_eq!(state.num_holes, 9);
        assert_eq!(state.players[0], vec![1, 2, 0, 0, 0, 0, 0, 0, 0]);

        let state = reconcile_json(json!({ "numHoles": 18.0, "players": [] }));
        assert_eq!(state.num_holes, 18);

        let state = reconcile_json(json!({ "numHoles": 12.0, "players": [] }));
        assert_eq!(state.num_holes, 18);
    }

    #[test]
    fn test_current_player_is_clamped() {
        let state = reconcile_json(json!({ "currentPlayer": -2, "players": [] }));
        assert_eq!(state.current_player, 0);

        let state = reconcile_json(json!({ "currentPlayer": 9, "numPlayers": 2, "players": [] }));
        assert_eq!(state.current_player, 1);

        let state = reconcile_json(json!({ "currentPlayer": "2", "players": [] }));
        assert_eq!(state.current_player, 2);

        let state = reconcile_json(json!({ "currentPlayer": {}, "players": [] }));
        assert_eq!(state.current_player, 0);
    }

    #[test]
    fn test_bad_score_entries_are_coerced() {
        let state = reconcile_json(json!({
            "numHoles": 9,
            "players": [[-3, 2.9, "4", null, true, 5]],
        }));
        assert_eq!(state.players[0], vec![0, 2, 0, 0, 0, 5, 0, 0, 0]);
    }

    #[test]
    fn test_parse_int_like_parse_int() {
        assert_eq!(parse_int(&json!(3)), Some(3));
        assert_eq!(parse_int(&json!(-3.7)), Some(-3));
        assert_eq!(parse_int(&json!("  42abc")), Some(42));
        assert_eq!(parse_int(&json!("-7")), Some(-7));
        assert_eq!(parse_int(&json!("+7")), Some(7));
        assert_eq!(parse_int(&json!("abc")), None);
        assert_eq!(parse_int(&json!("-")), None);
        assert_eq!(parse_int(&json!([1])), None);
        assert_eq!(parse_int(&json!(null)), None);
    }

    fn valid_state() -> impl Strategy<Value = RoundState> {
        (prop_oneof![Just(9u32), Just(18u32)], 1usize..=8)
            .prop_flat_map(|(holes, players)| {
                (
                    Just(holes),
                    prop::collection::vec(prop::collection::vec(0u32..15, holes as usize), players),
                    prop::collection::vec("[A-Za-z][A-Za-z ]{0,11}", players),
                    0..players,
                )
            })
            .prop_map(|(num_holes, players, player_names, current_player)| RoundState {
                current_player,
                num_players: players.len() as u32,
                players,
                num_holes,
                player_names,
            })
    }

    fn any_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            (-1.0e6f64..1.0e6).prop_map(Value::from),
            ".{0,8}".prop_map(Value::from),
        ];
        leaf.prop_recursive(3, 48, 20, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..20).prop_map(Value::Array),
                prop::collection::hash_map("[a-zA-Z]{1,12}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    /// Documents with the right keys but arbitrary values
    fn shaped_json() -> impl Strategy<Value = Value> {
        (
            any_json(),
            prop::collection::vec(any_json(), 0..10),
            any_json(),
            any_json(),
            any_json(),
        )
            .prop_map(|(current, rows, holes, players, names)| {
                json!({
                    "currentPlayer": current,
                    "players": rows,
                    "numHoles": holes,
                    "numPlayers": players,
                    "playerNames": names,
                })
            })
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_lossless(state in valid_state()) {
            let raw = serde_json::to_string(&state).unwrap();
            prop_assert_eq!(reconcile(Some(&raw)), state);
        }

        #[test]
        fn prop_arbitrary_strings_repair(raw in any::<String>()) {
            prop_assert!(reconcile(Some(&raw)).is_valid());
        }

        #[test]
        fn prop_arbitrary_json_repairs(value in any_json()) {
            prop_assert!(reconcile_json(value).is_valid());
        }

        #[test]
        fn prop_shaped_json_repairs(value in shaped_json()) {
            prop_assert!(reconcile_json(value).is_valid());
        }
    }
}
