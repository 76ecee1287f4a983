//! Per-round state and the reports handed to the presentation layer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Coord, Direction, PathKind, PathTileId};
use crate::core::{ActionKind, PlayerId};
use crate::economy::PropertyId;

/// Tiles entered during one move, origin excluded.
pub type TraversedPath = SmallVec<[PathTileId; 12]>;

/// Where the session is in its round cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the next `advance_round`.
    AwaitingRoll,
    /// Token moved, toll not yet settled.
    Moved,
    /// Toll settled; discretionary actions are open.
    Resolved,
    /// A winner has been decided.
    Finished,
}

/// State of the round in progress.
///
/// Replaced wholesale at the start of every round, which resets every
/// per-round flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    pub number: u32,
    pub player: PlayerId,
    pub dice: u8,
    pub path: TraversedPath,
    pub passed_treasury: bool,
    pub passed_office: bool,
    pub landed: PathKind,
    used: SmallVec<[ActionKind; 4]>,
}

impl RoundState {
    pub(crate) fn new(
        number: u32,
        player: PlayerId,
        dice: u8,
        path: TraversedPath,
        landed: PathKind,
        passed: impl Fn(PathTileId) -> PathKind,
    ) -> Self {
        let passed_treasury = path.iter().any(|&t| passed(t) == PathKind::Treasury);
        let passed_office = path.iter().any(|&t| passed(t) == PathKind::Office);
        Self {
            number,
            player,
            dice,
            path,
            passed_treasury,
            passed_office,
            landed,
            used: SmallVec::new(),
        }
    }

    /// Final tile of the move.
    #[must_use]
    pub fn destination(&self) -> Option<PathTileId> {
        self.path.last().copied()
    }

    /// Whether an action of this kind already succeeded this round.
    #[must_use]
    pub fn used(&self, kind: ActionKind) -> bool {
        self.used.contains(&kind)
    }

    pub(crate) fn mark_used(&mut self, kind: ActionKind) {
        if !self.used(kind) {
            self.used.push(kind);
        }
    }
}

/// Which discretionary actions the round currently offers.
///
/// Derived from round state on every query; the engine keeps no separate
/// flags to mirror.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub request_relief: bool,
    pub acquire_property: bool,
    pub expand_construction: bool,
    pub acquire_access_point: bool,
}

impl Eligibility {
    #[must_use]
    pub fn allows(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::RequestRelief => self.request_relief,
            ActionKind::AcquireProperty => self.acquire_property,
            ActionKind::ExpandConstruction => self.expand_construction,
            ActionKind::AcquireAccessPoint => self.acquire_access_point,
        }
    }

    /// Kinds currently offered.
    #[must_use]
    pub fn offered(&self) -> Vec<ActionKind> {
        ActionKind::ALL
            .iter()
            .copied()
            .filter(|&k| self.allows(k))
            .collect()
    }
}

/// How the stay on the destination tile was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TollOutcome {
    /// No access point, or the player owns the property.
    None,
    Paid {
        property: PropertyId,
        to: PlayerId,
        amount: i64,
    },
    /// The player could not cover the toll and was eliminated.
    Eliminated {
        property: PropertyId,
        creditor: PlayerId,
        transferred: i64,
    },
}

/// Everything that happened in one `advance_round`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub player: PlayerId,
    pub dice: u8,
    pub path: Vec<PathTileId>,
    pub destination: PathTileId,
    /// Relief granted automatically to cover a toll.
    pub relief_granted: Option<i64>,
    pub toll: TollOutcome,
    /// Set only in the round that decided the game.
    pub winner: Option<PlayerId>,
}

/// Accepted property purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub property: PropertyId,
    pub cost: i64,
    /// Previous owner, `None` when bought from the bank.
    pub seller: Option<PlayerId>,
}

/// Accepted construction step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    pub property: PropertyId,
    pub cost: i64,
    /// Level after building.
    pub level: usize,
    /// Permit draw that set the cost.
    pub draw: u8,
}

/// Accepted access point purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub property: PropertyId,
    pub tile: PathTileId,
    pub direction: Direction,
    pub cost: i64,
}

/// Read-only per-player view for presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub active: bool,
    pub funds: i64,
    pub peak_funds: i64,
    pub position: Option<Coord>,
    pub owned_properties: usize,
    pub access_points: usize,
}
