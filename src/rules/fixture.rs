//! Shared board for the rules unit tests.
//!
//! ```text
//! S H E H B
//! C 1 1 2 E
//! B H E H C
//! ```
//!
//! Cycle from START runs clockwise. Property 1 is fronted by (0,1), (0,2),
//! (2,2), (2,1) and (1,0); property 2 by (0,3), (1,4) and (2,3).

use super::engine::Session;
use crate::board::{Coord, Grid, PathKind, PathTileId, TileSpec};
use crate::core::{PlayerId, ScriptedRng, SessionConfig};
use crate::economy::{PropertyDef, PropertyId};

pub(crate) fn grid() -> Grid {
    use PathKind::*;
    let p = TileSpec::Path;
    let h = |id| TileSpec::Property(PropertyId::new(id));
    Grid::new(vec![
        vec![p(Start), p(Acquire), p(Expand), p(Acquire), p(Treasury)],
        vec![p(Office), h(1), h(1), h(2), p(Expand)],
        vec![p(Treasury), p(Acquire), p(Expand), p(Acquire), p(Office)],
    ])
    .unwrap()
}

pub(crate) fn property_defs() -> Vec<PropertyDef> {
    vec![
        PropertyDef::new(PropertyId::new(1), "Seaside", 1000, 1500, 200)
            .with_tier(500, 100)
            .with_tier(800, 300),
        PropertyDef::new(PropertyId::new(2), "Summit", 2000, 3000, 300)
            .with_tier(1000, 300)
            .with_tier(1500, 500),
    ]
}

/// Session in seat order with queued dice.
pub(crate) fn scripted(players: usize, dice: impl IntoIterator<Item = u8>) -> Session<ScriptedRng> {
    let config = SessionConfig::new()
        .with_player_count(players)
        .fixed_turn_order();
    Session::new(config, grid(), property_defs(), ScriptedRng::new(0).with_dice(dice)).unwrap()
}

/// Path tile at a coordinate.
pub(crate) fn at(session: &Session<ScriptedRng>, row: usize, col: usize) -> PathTileId {
    session.board().grid().path_at(Coord::new(row, col)).unwrap()
}

/// Hand a property to a player at a construction level, bypassing the rules.
pub(crate) fn give(
    session: &mut Session<ScriptedRng>,
    player: PlayerId,
    property: PropertyId,
    level: Option<usize>,
) {
    session.move_property(property, player);
    if let Some(level) = level {
        let p = session.properties.get_mut(property).unwrap();
        for _ in 0..=level {
            p.upgrade();
        }
    }
}
