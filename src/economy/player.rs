//! Player accounts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::property::PropertyId;
use crate::core::PlayerId;

/// A player's funds and holdings.
///
/// `peak_funds` is the high-water mark of `funds` and never decreases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    funds: i64,
    peak_funds: i64,
    active: bool,
    owned: BTreeSet<PropertyId>,
}

impl Player {
    /// A solvent player with the given stake.
    #[must_use]
    pub fn new(id: PlayerId, funds: i64) -> Self {
        Self {
            id,
            funds,
            peak_funds: funds,
            active: true,
            owned: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn funds(&self) -> i64 {
        self.funds
    }

    #[must_use]
    pub fn peak_funds(&self) -> i64 {
        self.peak_funds
    }

    /// False once eliminated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn owns(&self, property: PropertyId) -> bool {
        self.owned.contains(&property)
    }

    /// Owned properties in ascending id order.
    pub fn owned(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.owned.iter().copied()
    }

    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    #[must_use]
    pub fn can_afford(&self, amount: i64) -> bool {
        self.funds >= amount
    }

    pub(crate) fn earn(&mut self, amount: i64) {
        self.funds += amount;
        self.peak_funds = self.peak_funds.max(self.funds);
    }

    pub(crate) fn pay(&mut self, amount: i64) {
        self.funds -= amount;
    }

    pub(crate) fn acquire(&mut self, property: PropertyId) {
        self.owned.insert(property);
    }

    pub(crate) fn release(&mut self, property: PropertyId) {
        self.owned.remove(&property);
    }

    /// Mark eliminated and drop every holding. Returns what was owned.
    pub(crate) fn retire(&mut self) -> Vec<PropertyId> {
        self.active = false;
        std::mem::take(&mut self.owned).into_iter().collect()
    }
}
