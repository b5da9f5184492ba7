//! # Ability Catalog
//!
//! Static ability definitions and bonus damage tables, and the resolver that
//! turns an ability name into a [`SpecialAbility`] for one item.

use super::{CatalogAbility, SpecialAbility};
use crate::{Attribute, Damage, HoardResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const STANDARD_CATALOG: &str = include_str!("../../data/catalog.json");

/// Static stats of a catalog ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub base_name: String,
    pub power: u32,
    pub bonus_equivalent: u32,
    #[serde(default)]
    pub attribute_requirements: BTreeSet<Attribute>,
}

/// Key of the critical damage table entry for an ability and multiplier.
pub fn critical_damage_key(name: &str, critical_key: &str) -> String {
    format!("{}{}", name, critical_key)
}

/// Read-only store of ability definitions and damage tables.
pub trait AbilityCatalog {
    /// Definition of a catalog ability.
    fn definition(&self, name: &str) -> Option<&AbilityDefinition>;

    /// Damage entries stored under a key; empty when the key is absent.
    fn damages(&self, key: &str) -> &[Damage];

    /// Whether the name is unknown to the catalog.
    fn is_custom(&self, name: &str) -> bool {
        self.definition(name).is_none()
    }

    /// Resolves an ability for an item with the given critical key.
    ///
    /// Hit damage comes from the table entry named after the ability, critical
    /// damage from the entry named after the ability plus `critical_key`.
    /// Non-weapons pass an empty key. Unknown names resolve to custom
    /// abilities.
    fn resolve(&self, name: &str, critical_key: &str) -> SpecialAbility {
        match self.definition(name) {
            None => SpecialAbility::custom(name),
            Some(definition) => SpecialAbility::Catalog(CatalogAbility {
                name: name.to_string(),
                base_name: definition.base_name.clone(),
                power: definition.power,
                bonus_equivalent: definition.bonus_equivalent,
                attribute_requirements: definition.attribute_requirements.clone(),
                damages: self.damages(name).to_vec(),
                critical_damages: self
                    .damages(&critical_damage_key(name, critical_key))
                    .to_vec(),
            }),
        }
    }
}

/// Catalog held in memory, loaded from JSON.
///
/// # Examples
///
/// ```
/// use hoardsmith::{AbilityCatalog, StaticCatalog};
///
/// let catalog = StaticCatalog::standard().unwrap();
/// let burst = catalog.resolve("Flaming burst", "x3");
/// assert_eq!(burst.base_name(), Some("Flaming"));
/// assert_eq!(burst.critical_damages()[0].roll, "2d10");
///
/// assert!(catalog.resolve("Humming", "x3").is_custom());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticCatalog {
    /// Definitions by ability name
    pub abilities: BTreeMap<String, AbilityDefinition>,
    /// Damage entries by ability name, or ability name plus critical key
    #[serde(default)]
    pub damages: BTreeMap<String, Vec<Damage>>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog bundled with the crate.
    pub fn standard() -> HoardResult<Self> {
        Self::from_json(STANDARD_CATALOG)
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(json: &str) -> HoardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> HoardResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Adds or replaces a definition.
    pub fn with_ability(
        mut self,
        name: impl Into<String>,
        base_name: impl Into<String>,
        power: u32,
        bonus_equivalent: u32,
        attribute_requirements: impl IntoIterator<Item = Attribute>,
    ) -> Self {
        self.abilities.insert(
            name.into(),
            AbilityDefinition {
                base_name: base_name.into(),
                power,
                bonus_equivalent,
                attribute_requirements: attribute_requirements.into_iter().collect(),
            },
        );
        self
    }

    /// Adds or replaces a damage table entry.
    pub fn with_damages(mut self, key: impl Into<String>, damages: Vec<Damage>) -> Self {
        self.damages.insert(key.into(), damages);
        self
    }

    /// Number of catalog abilities.
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl AbilityCatalog for StaticCatalog {
    fn definition(&self, name: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(name)
    }

    fn damages(&self, key: &str) -> &[Damage] {
        match self.damages.get(key) {
            Some(damages) => damages,
            None => &[],
        }
    }
}
