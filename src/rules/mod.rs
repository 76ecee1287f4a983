//! The turn engine: round flow, tolls, elimination and the discretionary
//! actions.
//!
//! [`Session`] is the only writer of funds, ownership, construction levels,
//! access points and positions. Ordinary failures come back as
//! [`Rejection`]s and leave state untouched.

pub mod engine;
pub mod rejection;
pub mod round;
mod actions;

#[cfg(test)]
pub(crate) mod fixture;

pub use engine::Session;
pub use rejection::Rejection;
pub use round::{
    AccessPoint, Eligibility, Expansion, Phase, PlayerSummary, Purchase, RoundReport,
    RoundState, TollOutcome, TraversedPath,
};
