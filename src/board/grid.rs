//! Rectangular tile grid with a flat path-tile arena.
//!
//! Cells reference path tiles by index instead of holding them, so the
//! movement cycle is a `next` index per record and never a reference cycle.

use smallvec::SmallVec;

use super::tile::{Cell, Coord, Direction, PathKind, PathTile, PathTileId, TileSpec};
use crate::core::ConfigError;
use crate::economy::PropertyId;

/// Properties orthogonally adjacent to a path tile, keyed by direction.
pub type Adjacent = SmallVec<[(Direction, PropertyId); 4]>;

/// The board grid.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    paths: Vec<PathTile>,
    start: PathTileId,
}

impl Grid {
    /// Build a grid from rows of tile specifications.
    ///
    /// Every row must have the same length and exactly one cell must be a
    /// START tile. Property ids are checked later against the definitions.
    pub fn new(rows: Vec<Vec<TileSpec>>) -> Result<Self, ConfigError> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        if row_count == 0 || col_count == 0 {
            return Err(ConfigError::EmptyBoard {
                rows: row_count,
                cols: col_count,
            });
        }

        let mut cells = Vec::with_capacity(row_count * col_count);
        let mut paths = Vec::new();
        let mut start = None;

        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != col_count {
                return Err(ConfigError::RaggedRow {
                    row: r,
                    expected: col_count,
                    found: row.len(),
                });
            }
            for (c, spec) in row.into_iter().enumerate() {
                let coord = Coord::new(r, c);
                match spec {
                    TileSpec::Property(id) => cells.push(Cell::Property(id)),
                    TileSpec::Path(kind) => {
                        let id = PathTileId(paths.len() as u32);
                        if kind == PathKind::Start {
                            if start.is_some() {
                                return Err(ConfigError::DuplicateStart(coord));
                            }
                            start = Some(id);
                        }
                        paths.push(PathTile::new(kind, coord));
                        cells.push(Cell::Path(id));
                    }
                }
            }
        }

        let start = start.ok_or(ConfigError::MissingStart)?;

        Ok(Self {
            rows: row_count,
            cols: col_count,
            cells,
            paths,
            start,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The START tile.
    #[must_use]
    pub fn start(&self) -> PathTileId {
        self.start
    }

    /// Cell at a coordinate, `None` outside the grid.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        if coord.row < self.rows && coord.col < self.cols {
            Some(self.cells[coord.row * self.cols + coord.col])
        } else {
            None
        }
    }

    /// Coordinate one step away, `None` when it falls off the grid.
    #[must_use]
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some(Coord::new(row, col))
    }

    /// Path tile in the cell one step away from `coord`.
    #[must_use]
    pub fn path_neighbor(&self, coord: Coord, direction: Direction) -> Option<PathTileId> {
        match self.cell(self.neighbor(coord, direction)?)? {
            Cell::Path(id) => Some(id),
            Cell::Property(_) => None,
        }
    }

    /// Path tile record. Panics on an id from another board.
    #[must_use]
    pub fn path(&self, id: PathTileId) -> &PathTile {
        &self.paths[id.index()]
    }

    pub(crate) fn path_mut(&mut self, id: PathTileId) -> &mut PathTile {
        &mut self.paths[id.index()]
    }

    /// Path tile at a coordinate, if that cell is one.
    #[must_use]
    pub fn path_at(&self, coord: Coord) -> Option<PathTileId> {
        match self.cell(coord)? {
            Cell::Path(id) => Some(id),
            Cell::Property(_) => None,
        }
    }

    /// All path tiles with their ids, in row-major order.
    pub fn paths(&self) -> impl Iterator<Item = (PathTileId, &PathTile)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(i, t)| (PathTileId(i as u32), t))
    }

    /// Every property cell with the property it belongs to, row-major.
    pub fn property_cells(&self) -> impl Iterator<Item = (Coord, PropertyId)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| match cell {
            Cell::Property(id) => Some((Coord::new(i / self.cols, i % self.cols), *id)),
            Cell::Path(_) => None,
        })
    }

    /// Property owning the cell one step from a path tile in `direction`.
    #[must_use]
    pub fn property_toward(&self, tile: PathTileId, direction: Direction) -> Option<PropertyId> {
        match self.cell(self.neighbor(self.path(tile).coord, direction)?)? {
            Cell::Property(id) => Some(id),
            Cell::Path(_) => None,
        }
    }

    /// Properties adjacent to a path tile, in direction priority order.
    ///
    /// One entry per direction, so a property touching the tile on two sides
    /// appears twice.
    #[must_use]
    pub fn adjacent_properties(&self, tile: PathTileId) -> Adjacent {
        Direction::PRIORITY
            .iter()
            .filter_map(|&d| self.property_toward(tile, d).map(|p| (d, p)))
            .collect()
    }

    /// First direction, in priority order, from a tile toward a property cell.
    #[must_use]
    pub fn direction_toward(&self, tile: PathTileId, property: PropertyId) -> Option<Direction> {
        Direction::PRIORITY
            .iter()
            .copied()
            .find(|&d| self.property_toward(tile, d) == Some(property))
    }

    /// Property a tile's access point collects tolls for.
    #[must_use]
    pub fn access_target(&self, tile: PathTileId) -> Option<PropertyId> {
        self.property_toward(tile, self.path(tile).access?)
    }
}
