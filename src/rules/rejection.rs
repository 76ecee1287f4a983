//! Action-level rejections.
//!
//! A rejected call leaves funds, ownership, construction and access points
//! exactly as they were. Callers decide whether to try again.

use thiserror::Error;

use crate::core::{ActionKind, PlayerId};
use crate::economy::PropertyId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the game is over")]
    GameOver,

    #[error("no round is in progress")]
    NoRoundInProgress,

    #[error("{0} has been eliminated")]
    PlayerEliminated(PlayerId),

    #[error("{0} was already done this round")]
    AlreadyUsed(ActionKind),

    #[error("unknown property {0}")]
    UnknownProperty(PropertyId),

    #[error("{0} is not adjacent to the current tile")]
    NotAdjacent(PropertyId),

    #[error("{0} is already owned by the current player")]
    AlreadyOwned(PropertyId),

    #[error("{0} is built and owned by another player")]
    ConstructedElsewhere(PropertyId),

    #[error("{0} is not owned by the current player")]
    NotOwner(PropertyId),

    #[error("{0} is fully built")]
    FullyBuilt(PropertyId),

    #[error("{0} has not been built yet")]
    NotConstructed(PropertyId),

    #[error("{0} has no free front tile for an access point")]
    NoFreeFrontTile(PropertyId),

    #[error("construction permit denied (draw {draw})")]
    PermitDenied { draw: u8 },

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("relief requires passing a treasury tile this round")]
    ReliefNotEligible,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Rejection::InsufficientFunds { needed: 900, available: 500 }.to_string(),
            "insufficient funds: need 900, have 500"
        );
        assert_eq!(
            Rejection::AlreadyUsed(ActionKind::RequestRelief).to_string(),
            "request relief was already done this round"
        );
        assert_eq!(
            Rejection::NotOwner(PropertyId::new(3)).to_string(),
            "Property(3) is not owned by the current player"
        );
    }
}
