//! Session configuration.
//!
//! Callers describe the table (seats, stakes, bank relief) with a
//! `SessionConfig` before a session is built. Board and property definitions
//! come from the [`loader`](crate::loader) or are assembled in code.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Funds every player starts with.
pub const DEFAULT_STARTING_FUNDS: i64 = 12_000;

/// Amount the bank grants on a relief request.
pub const DEFAULT_RELIEF_AMOUNT: i64 = 1_000;

/// Seats at the table.
pub const DEFAULT_PLAYER_COUNT: usize = 3;

/// Smallest and largest supported table.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Table-level parameters of a game session.
///
/// ```
/// use rust_hotel::core::SessionConfig;
///
/// let config = SessionConfig::new()
///     .with_player_count(4)
///     .with_starting_funds(5_000)
///     .fixed_turn_order();
///
/// assert!(config.validate().is_ok());
/// assert!(!config.shuffle_turn_order);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of seats.
    pub player_count: usize,

    /// Funds each player starts with.
    pub starting_funds: i64,

    /// Amount the bank grants per relief request.
    pub relief_amount: i64,

    /// Draw a random rotation order at session start instead of seat order.
    pub shuffle_turn_order: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_count: DEFAULT_PLAYER_COUNT,
            starting_funds: DEFAULT_STARTING_FUNDS,
            relief_amount: DEFAULT_RELIEF_AMOUNT,
            shuffle_turn_order: true,
        }
    }
}

impl SessionConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of seats.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the starting stake.
    #[must_use]
    pub fn with_starting_funds(mut self, funds: i64) -> Self {
        self.starting_funds = funds;
        self
    }

    /// Set the relief grant.
    #[must_use]
    pub fn with_relief_amount(mut self, amount: i64) -> Self {
        self.relief_amount = amount;
        self
    }

    /// Rotate in seat order (player 0 first).
    #[must_use]
    pub fn fixed_turn_order(mut self) -> Self {
        self.shuffle_turn_order = false;
        self
    }

    /// Check the parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount {
                count: self.player_count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        if self.starting_funds < 0 {
            return Err(ConfigError::NegativeAmount {
                field: "starting_funds",
                value: self.starting_funds,
            });
        }
        if self.relief_amount < 0 {
            return Err(ConfigError::NegativeAmount {
                field: "relief_amount",
                value: self.relief_amount,
            });
        }
        Ok(())
    }
}
