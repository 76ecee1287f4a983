//! Grid cells and path tiles.

use serde::{Deserialize, Serialize};

use crate::economy::PropertyId;

/// Grid coordinate, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction on the grid.
///
/// Declaration order is the neighbour priority used when tracing the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

impl Direction {
    /// All directions in priority order: east, south, west, north.
    pub const PRIORITY: [Direction; 4] = [
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::North,
    ];

    /// Row and column delta of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::North => (-1, 0),
        }
    }
}

/// Kind of a traversable path tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    /// Where every token starts. Exactly one per board.
    Start,
    /// Passing through allows buying an access point this round.
    Office,
    /// Passing through allows requesting relief funds this round.
    Treasury,
    /// Landing here allows buying an adjacent property.
    Acquire,
    /// Landing here allows expanding construction and buying an access point.
    Expand,
    /// Scenery. Not part of the movement cycle.
    Decorative,
}

impl PathKind {
    /// Whether tokens can move through this tile.
    #[must_use]
    pub const fn on_cycle(self) -> bool {
        !matches!(self, PathKind::Decorative)
    }

    /// Whether an access point may be placed on this tile.
    #[must_use]
    pub const fn accepts_access(self) -> bool {
        matches!(self, PathKind::Acquire | PathKind::Expand)
    }
}

/// Index of a path tile in the board's path arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathTileId(pub u32);

impl PathTileId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PathTileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// What a configuration places in one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileSpec {
    Property(PropertyId),
    Path(PathKind),
}

/// A grid cell after the board is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Part of a property's footprint.
    Property(PropertyId),
    /// A path tile, by arena index.
    Path(PathTileId),
}

/// A path tile record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathTile {
    pub kind: PathKind,
    pub coord: Coord,
    /// Direction of the property this tile collects tolls for, if any.
    pub access: Option<Direction>,
    /// Successor on the movement cycle. `None` for decorative tiles.
    pub next: Option<PathTileId>,
}

impl PathTile {
    pub(crate) fn new(kind: PathKind, coord: Coord) -> Self {
        Self {
            kind,
            coord,
            access: None,
            next: None,
        }
    }
}
