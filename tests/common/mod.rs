//! Shared setup for the integration tests.
//!
//! ```text
//! S H C H
//! E 1 2 B
//! H H E E
//! ```
//!
//! Cycle: (0,0) (0,1) (0,2) (0,3) (1,3) (2,3) (2,2) (2,1) (2,0) (1,0).
//! Property 2 is fronted by the office at (0,2), the treasury at (1,3) and
//! the expand tile at (2,2), so its first access point always lands on
//! (2,2).

#![allow(dead_code)]

use std::path::PathBuf;

use rust_hotel::loader::{parse_board, parse_property};
use rust_hotel::{Coord, PathTileId, PropertyDef, PropertyId, ScriptedRng, Session, SessionConfig};

pub const BOARD: &str = "\
S, H, C, H
E, 1, 2, B
H, H, E, E
";

pub fn property_defs() -> Vec<PropertyDef> {
    vec![
        parse_property(PropertyId::new(1), "Seaside\n1000, 1500, 200\n500, 100\n800, 250\n")
            .unwrap(),
        parse_property(PropertyId::new(2), "Summit\n300, 450, 100\n100, 300\n400, 700\n").unwrap(),
    ]
}

/// Two-seat session in seat order, everyone starting with `funds`.
pub fn session(funds: i64, rng: ScriptedRng) -> Session<ScriptedRng> {
    let config = SessionConfig::new()
        .with_player_count(2)
        .with_starting_funds(funds)
        .fixed_turn_order();
    Session::new(config, parse_board(BOARD).unwrap(), property_defs(), rng).unwrap()
}

pub fn tile(session: &Session<ScriptedRng>, row: usize, col: usize) -> PathTileId {
    session.board().grid().path_at(Coord::new(row, col)).unwrap()
}

pub fn harbor_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios/harbor")
}
