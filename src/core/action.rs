//! Discretionary actions and their history.
//!
//! A player may take each of four actions at most once per round after the
//! move resolves. Every attempt is recorded, accepted or not, so a
//! presentation layer can replay what happened.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::economy::PropertyId;

/// Kind of discretionary action, without its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    RequestRelief,
    AcquireProperty,
    ExpandConstruction,
    AcquireAccessPoint,
}

impl ActionKind {
    /// All kinds, in display order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::RequestRelief,
        ActionKind::AcquireProperty,
        ActionKind::ExpandConstruction,
        ActionKind::AcquireAccessPoint,
    ];
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::RequestRelief => "request relief",
            ActionKind::AcquireProperty => "acquire property",
            ActionKind::ExpandConstruction => "expand construction",
            ActionKind::AcquireAccessPoint => "acquire access point",
        };
        f.write_str(name)
    }
}

/// A discretionary action with its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    RequestRelief,
    AcquireProperty(PropertyId),
    ExpandConstruction(PropertyId),
    AcquireAccessPoint(PropertyId),
}

impl Action {
    /// The kind of this action.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::RequestRelief => ActionKind::RequestRelief,
            Action::AcquireProperty(_) => ActionKind::AcquireProperty,
            Action::ExpandConstruction(_) => ActionKind::ExpandConstruction,
            Action::AcquireAccessPoint(_) => ActionKind::AcquireAccessPoint,
        }
    }

    /// The targeted property, if any.
    #[must_use]
    pub fn property(&self) -> Option<PropertyId> {
        match *self {
            Action::RequestRelief => None,
            Action::AcquireProperty(id)
            | Action::ExpandConstruction(id)
            | Action::AcquireAccessPoint(id) => Some(id),
        }
    }
}

/// One recorded action attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who attempted the action.
    pub player: PlayerId,

    /// What was attempted.
    pub action: Action,

    /// Round number the attempt happened in.
    pub round: u32,

    /// Whether the engine accepted it.
    pub accepted: bool,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, round: u32, accepted: bool) -> Self {
        Self {
            player,
            action,
            round,
            accepted,
        }
    }
}
