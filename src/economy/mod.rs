//! Economic entities: properties, their registry and player accounts.
//!
//! These types hold state but apply no rules. Every mutation goes through the
//! turn engine in [`rules`](crate::rules).

pub mod property;
pub mod registry;
pub mod player;

pub use property::{Property, PropertyDef, PropertyId, Tier};
pub use registry::PropertyRegistry;
pub use player::Player;
