//! Purchasable properties (hotels).
//!
//! A `PropertyDef` is the static description loaded from configuration. A
//! `Property` wraps it with the mutable session state: owner and
//! construction level.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Property identifier, as used by board cells and definition files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub u32);

impl PropertyId {
    /// Create a new property ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({})", self.0)
    }
}

/// One construction tier: what it costs to build and what a stay costs per
/// pip of the dice once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub expansion_cost: i64,
    pub toll_cost: i64,
}

impl Tier {
    #[must_use]
    pub const fn new(expansion_cost: i64, toll_cost: i64) -> Self {
        Self {
            expansion_cost,
            toll_cost,
        }
    }
}

/// Static description of a property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    pub id: PropertyId,
    pub name: String,
    /// Price when bought from the bank.
    pub price: i64,
    /// Price when bought out from another owner.
    pub forced_price: i64,
    /// Price of one access point.
    pub access_price: i64,
    /// Construction tiers, lowest first.
    pub tiers: Vec<Tier>,
}

impl PropertyDef {
    /// Create a definition with no construction tiers.
    pub fn new(
        id: PropertyId,
        name: impl Into<String>,
        price: i64,
        forced_price: i64,
        access_price: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            forced_price,
            access_price,
            tiers: Vec::new(),
        }
    }

    /// Append a construction tier.
    #[must_use]
    pub fn with_tier(mut self, expansion_cost: i64, toll_cost: i64) -> Self {
        self.tiers.push(Tier::new(expansion_cost, toll_cost));
        self
    }
}

/// A property in play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    def: PropertyDef,
    owner: Option<PlayerId>,
    level: Option<usize>,
}

impl Property {
    /// An unowned, unconstructed property.
    #[must_use]
    pub fn new(def: PropertyDef) -> Self {
        Self {
            def,
            owner: None,
            level: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PropertyId {
        self.def.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    #[must_use]
    pub fn def(&self) -> &PropertyDef {
        &self.def
    }

    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Construction level: `None` while unconstructed, then `0..tiers`.
    #[must_use]
    pub fn level(&self) -> Option<usize> {
        self.level
    }

    /// Construction level with `-1` for unconstructed.
    #[must_use]
    pub fn level_index(&self) -> i32 {
        self.level.map_or(-1, |l| l as i32)
    }

    #[must_use]
    pub fn is_constructed(&self) -> bool {
        self.level.is_some()
    }

    /// Cost of the next tier, `None` once fully built.
    #[must_use]
    pub fn next_expansion_cost(&self) -> Option<i64> {
        let next = self.level.map_or(0, |l| l + 1);
        self.def.tiers.get(next).map(|t| t.expansion_cost)
    }

    /// Toll per dice pip at the current level. Zero while unconstructed.
    #[must_use]
    pub fn toll_rate(&self) -> i64 {
        self.level
            .and_then(|l| self.def.tiers.get(l))
            .map_or(0, |t| t.toll_cost)
    }

    /// Toll for a stay with the given dice roll.
    #[must_use]
    pub fn toll(&self, dice: u8) -> i64 {
        self.toll_rate() * i64::from(dice)
    }

    /// Acquisition price: bank price when unowned, forced price otherwise.
    #[must_use]
    pub fn price_for_transfer(&self) -> i64 {
        if self.owner.is_some() {
            self.def.forced_price
        } else {
            self.def.price
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Option<PlayerId>) {
        self.owner = owner;
    }

    /// Build the next tier. No-op when fully built.
    pub(crate) fn upgrade(&mut self) {
        if self.next_expansion_cost().is_some() {
            self.level = Some(self.level.map_or(0, |l| l + 1));
        }
    }

    /// Back to unconstructed and unowned.
    pub(crate) fn tear_down(&mut self) {
        self.level = None;
        self.owner = None;
    }
}
