//! Core engine types: players, actions, RNG, configuration, errors.
//!
//! Everything here is independent of the board layout and the economy rules.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, Randomness, ScriptedRng};
pub use config::SessionConfig;
pub use action::{Action, ActionKind, ActionRecord};
pub use error::ConfigError;
