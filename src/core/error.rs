//! Fatal configuration errors.
//!
//! Anything reported here aborts session construction. Action-level
//! rejections during play live in [`rules::Rejection`](crate::rules::Rejection).

use std::path::PathBuf;

use thiserror::Error;

use crate::board::Coord;
use crate::economy::PropertyId;

/// A board, property definition or table setup that cannot start a session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("board has no START tile")]
    MissingStart,

    #[error("board has a second START tile at {0}")]
    DuplicateStart(Coord),

    #[error("path breaks off at {0}: no eligible neighbour to continue the cycle")]
    BrokenPath(Coord),

    #[error("path closes at {closed_at} after {visited} of {expected} tiles, not a single loop")]
    NotSingleCycle {
        closed_at: Coord,
        visited: usize,
        expected: usize,
    },

    #[error("cycle of {cycle_len} tiles is too short for {players} players")]
    CycleTooShort { cycle_len: usize, players: usize },

    #[error("cell {coord} references unknown property {property}")]
    UnknownProperty { coord: Coord, property: PropertyId },

    #[error("property {0} is defined twice")]
    DuplicateProperty(PropertyId),

    #[error("player count {count} outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: i64 },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
