//! One-time derivation of the movement cycle and the front index.
//!
//! ## Cycle
//!
//! The seed is the first non-decorative path tile in row-major order. From
//! there each tile links to its first neighbour, in east, south, west, north
//! priority, that is a non-decorative path tile other than the tile we came
//! from. Tracing stops at the first tile that already has a successor; that
//! must be the seed, after every non-decorative tile was visited once.
//!
//! ## Front index
//!
//! Walking the finished cycle from START, every path tile is recorded as a
//! front tile of each property it touches orthogonally.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::grid::Grid;
use super::tile::{Direction, PathTileId};
use crate::core::ConfigError;
use crate::economy::PropertyId;

/// Link `next` on every non-decorative path tile.
///
/// Returns the cycle length.
pub fn build_cycle(grid: &mut Grid) -> Result<usize, ConfigError> {
    let expected = grid.paths().filter(|(_, t)| t.kind.on_cycle()).count();
    let seed = grid
        .paths()
        .find(|(_, t)| t.kind.on_cycle())
        .map_or(grid.start(), |(id, _)| id);

    let mut prev: Option<PathTileId> = None;
    let mut curr = seed;
    let mut visited = 1;

    loop {
        let coord = grid.path(curr).coord;
        let next = Direction::PRIORITY
            .iter()
            .filter_map(|&d| grid.path_neighbor(coord, d))
            .find(|&n| grid.path(n).kind.on_cycle() && Some(n) != prev)
            .ok_or(ConfigError::BrokenPath(coord))?;

        grid.path_mut(curr).next = Some(next);

        if grid.path(next).next.is_some() {
            if next != seed || visited != expected {
                return Err(ConfigError::NotSingleCycle {
                    closed_at: grid.path(next).coord,
                    visited,
                    expected,
                });
            }
            return Ok(visited);
        }

        prev = Some(curr);
        curr = next;
        visited += 1;
    }
}

/// Front tiles of every property, in cycle order from START.
#[derive(Clone, Debug, Default)]
pub struct FrontIndex {
    fronts: FxHashMap<PropertyId, SmallVec<[PathTileId; 8]>>,
}

impl FrontIndex {
    /// Front tiles of a property. Empty for a property no path touches.
    #[must_use]
    pub fn fronts(&self, property: PropertyId) -> &[PathTileId] {
        self.fronts.get(&property).map_or(&[], |f| f.as_slice())
    }

    /// Whether `tile` is a front tile of `property`.
    #[must_use]
    pub fn is_front(&self, property: PropertyId, tile: PathTileId) -> bool {
        self.fronts(property).contains(&tile)
    }

    /// Number of properties with at least one front tile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fronts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fronts.is_empty()
    }
}

/// Build the front index. Call after [`build_cycle`] succeeded.
#[must_use]
pub fn build_front_index(grid: &Grid) -> FrontIndex {
    let mut index = FrontIndex::default();
    let start = grid.start();
    let mut tile = start;

    loop {
        for (_, property) in grid.adjacent_properties(tile) {
            let entry = index.fronts.entry(property).or_default();
            if !entry.contains(&tile) {
                entry.push(tile);
            }
        }
        match grid.path(tile).next {
            Some(next) if next != start => tile = next,
            _ => break,
        }
    }

    index
}
