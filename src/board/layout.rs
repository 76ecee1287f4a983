//! The built board: grid, movement cycle and front index.

use super::grid::{Adjacent, Grid};
use super::tile::{Coord, Direction, PathTile, PathTileId};
use super::topology::{build_cycle, build_front_index, FrontIndex};
use crate::core::ConfigError;
use crate::economy::PropertyId;

/// A board ready for play.
///
/// The cycle and front index are fixed once built. Access directions on path
/// tiles are the only part that changes during a session, and only the turn
/// engine changes them.
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,
    cycle_len: usize,
    fronts: FrontIndex,
}

impl Board {
    /// Derive the cycle and front index from a grid.
    pub fn build(mut grid: Grid) -> Result<Self, ConfigError> {
        let cycle_len = build_cycle(&mut grid)?;
        let fronts = build_front_index(&grid);
        Ok(Self {
            grid,
            cycle_len,
            fronts,
        })
    }

    /// The underlying grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The START tile.
    #[must_use]
    pub fn start(&self) -> PathTileId {
        self.grid.start()
    }

    /// Number of tiles on the movement cycle.
    #[must_use]
    pub fn cycle_len(&self) -> usize {
        self.cycle_len
    }

    /// Path tile record.
    #[must_use]
    pub fn tile(&self, id: PathTileId) -> &PathTile {
        self.grid.path(id)
    }

    /// Grid coordinate of a path tile.
    #[must_use]
    pub fn coord(&self, id: PathTileId) -> Coord {
        self.grid.path(id).coord
    }

    /// Successor on the cycle. Decorative tiles have none.
    #[must_use]
    pub fn next(&self, id: PathTileId) -> Option<PathTileId> {
        self.grid.path(id).next
    }

    /// Walk the cycle once, starting at START.
    pub fn cycle(&self) -> impl Iterator<Item = PathTileId> + '_ {
        let start = self.start();
        std::iter::successors(Some(start), move |&t| self.next(t).filter(|&n| n != start))
    }

    /// Front tiles of a property, in cycle order.
    #[must_use]
    pub fn fronts(&self, property: PropertyId) -> &[PathTileId] {
        self.fronts.fronts(property)
    }

    /// The front index.
    #[must_use]
    pub fn front_index(&self) -> &FrontIndex {
        &self.fronts
    }

    /// Properties adjacent to a path tile.
    #[must_use]
    pub fn adjacent_properties(&self, tile: PathTileId) -> Adjacent {
        self.grid.adjacent_properties(tile)
    }

    /// Property a tile's access point collects tolls for.
    #[must_use]
    pub fn access_target(&self, tile: PathTileId) -> Option<PropertyId> {
        self.grid.access_target(tile)
    }

    /// Front tiles whose access point currently faces `property`.
    pub fn access_points(&self, property: PropertyId) -> impl Iterator<Item = PathTileId> + '_ {
        self.fronts(property)
            .iter()
            .copied()
            .filter(move |&t| self.access_target(t) == Some(property))
    }

    pub(crate) fn set_access(&mut self, tile: PathTileId, access: Option<Direction>) {
        self.grid.path_mut(tile).access = access;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tile::{PathKind, TileSpec};

    fn board() -> Board {
        use PathKind::*;
        let p = TileSpec::Path;
        let h = |id| TileSpec::Property(PropertyId::new(id));
        let grid = Grid::new(vec![
            vec![p(Start), p(Acquire), p(Expand)],
            vec![p(Treasury), h(1), p(Office)],
            vec![p(Acquire), p(Expand), p(Acquire)],
        ])
        .unwrap();
        Board::build(grid).unwrap()
    }

    #[test]
    fn test_cycle_iterator() {
        let board = board();
        let tiles: Vec<_> = board.cycle().collect();

        assert_eq!(tiles.len(), 8);
        assert_eq!(board.cycle_len(), 8);
        assert_eq!(tiles[0], board.start());
        assert_eq!(board.next(*tiles.last().unwrap()), Some(board.start()));
    }

    #[test]
    fn test_every_ring_tile_fronts_center_except_corners() {
        let board = board();
        let fronts = board.fronts(PropertyId::new(1));

        assert_eq!(fronts.len(), 4);
        for &t in fronts {
            let c = board.coord(t);
            assert!(c.row == 1 || c.col == 1);
        }
    }

    #[test]
    fn test_access_points_follow_direction() {
        let mut board = board();
        let east = board.grid().path_at(Coord::new(1, 2)).unwrap();

        assert_eq!(board.access_points(PropertyId::new(1)).count(), 0);
        board.set_access(east, Some(Direction::West));
        assert_eq!(board.access_target(east), Some(PropertyId::new(1)));
        assert_eq!(board.access_points(PropertyId::new(1)).collect::<Vec<_>>(), vec![east]);

        board.set_access(east, None);
        assert_eq!(board.access_points(PropertyId::new(1)).count(), 0);
    }
}
