//! # rust-hotel
//!
//! Rules engine for a turn-based hotel property-trading board game.
//!
//! Players move tokens around a closed loop of path tiles, buy the hotels
//! fronting the loop, build them up and place access points that charge
//! tolls to anyone who stops there. A player who cannot pay is eliminated;
//! the last one standing wins.
//!
//! ## Design Principles
//!
//! 1. **One writer**: every change to funds, ownership, construction and
//!    positions goes through [`Session`]. Everything else is read-only.
//!
//! 2. **Injected randomness**: dice and construction permits come from a
//!    [`Randomness`] implementation, so games replay exactly from a seed or
//!    from a scripted sequence.
//!
//! 3. **Rejections are values**: ordinary action failures come back as a
//!    [`Rejection`] and leave state untouched. Only a broken configuration is
//!    fatal ([`ConfigError`]).
//!
//! ## Modules
//!
//! - `core`: player ids, RNG, table configuration, action records, errors
//! - `board`: tile grid, movement cycle and property fronts
//! - `economy`: properties and player accounts
//! - `rules`: the turn engine and discretionary actions
//! - `loader`: plain-text scenario files
//!
//! ```
//! use rust_hotel::{loader, GameRng, PropertyId, SessionConfig};
//!
//! let board = "S,H,E,H\nC,1,1,B\nH,E,H,E\n";
//! let grid = loader::parse_board(board).unwrap();
//! let hotel = loader::parse_property(PropertyId::new(1), "Seaside\n1000 1500 200\n500 100\n").unwrap();
//!
//! let mut session = rust_hotel::Session::new(
//!     SessionConfig::new().with_player_count(2),
//!     grid,
//!     [hotel],
//!     GameRng::new(42),
//! )
//! .unwrap();
//!
//! let report = session.advance_round().unwrap();
//! assert_eq!(report.path.len(), usize::from(report.dice));
//! ```

pub mod core;
pub mod board;
pub mod economy;
pub mod rules;
pub mod loader;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, ConfigError, GameRng, PlayerId, PlayerMap, Randomness,
    ScriptedRng, SessionConfig,
};

pub use crate::board::{Board, Coord, Direction, Grid, PathKind, PathTileId, TileSpec};

pub use crate::economy::{Player, Property, PropertyDef, PropertyId, PropertyRegistry, Tier};

pub use crate::rules::{
    AccessPoint, Eligibility, Expansion, Phase, PlayerSummary, Purchase, Rejection, RoundReport,
    Session, TollOutcome,
};

pub use crate::loader::{load_scenario, Scenario};
