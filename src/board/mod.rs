//! Board topology: the tile grid, the movement cycle and property fronts.
//!
//! A grid cell is either part of a property's footprint or a path tile.
//! Building a [`Board`] traces the single movement cycle through the path
//! tiles and indexes which path tiles front each property.

pub mod tile;
pub mod grid;
pub mod topology;
pub mod layout;

pub use tile::{Cell, Coord, Direction, PathKind, PathTile, PathTileId, TileSpec};
pub use grid::{Adjacent, Grid};
pub use topology::{build_cycle, build_front_index, FrontIndex};
pub use layout::Board;
