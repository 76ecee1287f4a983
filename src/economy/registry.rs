//! Property registry for lookup by id.

use rustc_hash::FxHashMap;

use super::property::{Property, PropertyDef, PropertyId};
use crate::core::{ConfigError, PlayerId};

/// All properties of a session.
///
/// ```
/// use rust_hotel::economy::{PropertyDef, PropertyId, PropertyRegistry};
///
/// let mut registry = PropertyRegistry::new();
/// registry
///     .register(PropertyDef::new(PropertyId::new(1), "Grand", 3000, 4500, 200))
///     .unwrap();
///
/// assert_eq!(registry.get(PropertyId::new(1)).unwrap().name(), "Grand");
/// assert!(registry.register(PropertyDef::new(PropertyId::new(1), "Copy", 1, 1, 1)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropertyRegistry {
    properties: FxHashMap<PropertyId, Property>,
}

impl PropertyRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions, rejecting duplicate ids.
    pub fn from_defs(defs: impl IntoIterator<Item = PropertyDef>) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        Ok(registry)
    }

    /// Register a definition as an unowned, unconstructed property.
    pub fn register(&mut self, def: PropertyDef) -> Result<(), ConfigError> {
        if self.properties.contains_key(&def.id) {
            return Err(ConfigError::DuplicateProperty(def.id));
        }
        self.properties.insert(def.id, Property::new(def));
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: PropertyId) -> Option<&mut Property> {
        self.properties.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.properties.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// All ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<PropertyId> {
        let mut ids: Vec<_> = self.properties.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over all properties, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    /// Properties owned by a player.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Property> {
        self.properties.values().filter(move |p| p.owner() == Some(player))
    }

    /// Number of properties nobody owns.
    #[must_use]
    pub fn unowned_count(&self) -> usize {
        self.properties.values().filter(|p| p.owner().is_none()).count()
    }
}
