//! Injected randomness for dice rolls and construction permits.
//!
//! The turn engine never touches an ambient RNG. It asks a [`Randomness`]
//! implementation for every random value, which keeps sessions reproducible:
//!
//! - [`GameRng`]: seeded ChaCha8 stream, same seed gives the same game.
//! - [`ScriptedRng`]: queued values for exact scenarios, falling back to a
//!   seeded stream once the queue runs dry.
//!
//! ```
//! use rust_hotel::core::{GameRng, Randomness};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll_dice(), b.roll_dice());
//! ```

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::player::PlayerId;

/// Source of every random value the turn engine consumes.
pub trait Randomness {
    /// Roll one six-sided die: a value in `1..=6`.
    fn roll_dice(&mut self) -> u8;

    /// Draw the construction permit outcome: a value in `1..=100`.
    fn construction_draw(&mut self) -> u8;

    /// Permute the seating order at session start.
    ///
    /// The default keeps seat order.
    fn shuffle_players(&mut self, _order: &mut [PlayerId]) {}
}

/// Deterministic RNG.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Randomness for GameRng {
    fn roll_dice(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    fn construction_draw(&mut self) -> u8 {
        self.inner.gen_range(1..=100)
    }

    fn shuffle_players(&mut self, order: &mut [PlayerId]) {
        order.shuffle(&mut self.inner);
    }
}

/// Randomness with pre-arranged values.
///
/// Dice and construction draws are served from their queues first. Values are
/// clamped into the legal range. An empty queue falls through to a seeded
/// [`GameRng`], as does seat shuffling unless `keep_seat_order` is set.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    dice: VecDeque<u8>,
    draws: VecDeque<u8>,
    keep_seat_order: bool,
    fallback: GameRng,
}

impl ScriptedRng {
    /// Create an empty script backed by a seeded fallback stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            dice: VecDeque::new(),
            draws: VecDeque::new(),
            keep_seat_order: true,
            fallback: GameRng::new(seed),
        }
    }

    /// Queue dice results.
    #[must_use]
    pub fn with_dice(mut self, dice: impl IntoIterator<Item = u8>) -> Self {
        self.dice.extend(dice);
        self
    }

    /// Queue construction permit draws.
    #[must_use]
    pub fn with_draws(mut self, draws: impl IntoIterator<Item = u8>) -> Self {
        self.draws.extend(draws);
        self
    }

    /// Let the fallback stream shuffle the seating order.
    #[must_use]
    pub fn shuffled_seats(mut self) -> Self {
        self.keep_seat_order = false;
        self
    }

    /// Queue one more dice result.
    pub fn push_dice(&mut self, value: u8) {
        self.dice.push_back(value);
    }

    /// Queue one more construction draw.
    pub fn push_draw(&mut self, value: u8) {
        self.draws.push_back(value);
    }

    /// Number of dice results still queued.
    #[must_use]
    pub fn pending_dice(&self) -> usize {
        self.dice.len()
    }
}

impl Randomness for ScriptedRng {
    fn roll_dice(&mut self) -> u8 {
        match self.dice.pop_front() {
            Some(v) => v.clamp(1, 6),
            None => self.fallback.roll_dice(),
        }
    }

    fn construction_draw(&mut self) -> u8 {
        match self.draws.pop_front() {
            Some(v) => v.clamp(1, 100),
            None => self.fallback.construction_draw(),
        }
    }

    fn shuffle_players(&mut self, order: &mut [PlayerId]) {
        if !self.keep_seat_order {
            self.fallback.shuffle_players(order);
        }
    }
}
