//! # Abilities Module
//!
//! Special abilities and the strongest-tier collapse.
//!
//! An ability either comes from the catalog, in which case it belongs to a
//! base-name family with a power tier and a budget cost, or it is a custom
//! name the catalog has never heard of. Custom abilities pass through every
//! rule of the engine untouched.

pub mod catalog;

pub use catalog::*;

use crate::{Attribute, Damage};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Ability that widens a weapon's threat range.
pub const KEEN: &str = "Keen";

/// Ability that may hold a stored spell.
pub const SPELL_STORING: &str = "Spell storing";

/// Table outcome granting one extra ability slot instead of an ability.
pub const BONUS_SPECIAL_ABILITY: &str = "BonusSpecialAbility";

/// A catalog ability resolved for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAbility {
    /// Catalog key
    pub name: String,
    /// Family shared by every tier of the same ability
    pub base_name: String,
    /// Tier within the family; higher supersedes lower
    pub power: u32,
    /// Cost against the shared enchantment budget
    pub bonus_equivalent: u32,
    /// Tags the item must carry
    #[serde(default)]
    pub attribute_requirements: BTreeSet<Attribute>,
    /// Extra damage on every hit
    #[serde(default)]
    pub damages: Vec<Damage>,
    /// Extra damage on a critical hit, for the item's critical multiplier
    #[serde(default)]
    pub critical_damages: Vec<Damage>,
}

/// An ability attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SpecialAbility {
    /// Resolved from the catalog
    Catalog(CatalogAbility),
    /// Unknown to the catalog, kept by name only
    Custom { name: String },
}

impl SpecialAbility {
    /// Creates a custom ability.
    pub fn custom(name: impl Into<String>) -> Self {
        SpecialAbility::Custom { name: name.into() }
    }

    /// Ability name.
    pub fn name(&self) -> &str {
        match self {
            SpecialAbility::Catalog(ability) => &ability.name,
            SpecialAbility::Custom { name } => name,
        }
    }

    /// Family name; custom abilities have none.
    pub fn base_name(&self) -> Option<&str> {
        self.as_catalog().map(|ability| ability.base_name.as_str())
    }

    /// Tier within the family, zero for custom abilities.
    pub fn power(&self) -> u32 {
        self.as_catalog().map_or(0, |ability| ability.power)
    }

    /// Budget cost, zero for custom abilities.
    pub fn bonus_equivalent(&self) -> u32 {
        self.as_catalog().map_or(0, |ability| ability.bonus_equivalent)
    }

    /// Extra damage on every hit.
    pub fn damages(&self) -> &[Damage] {
        match self.as_catalog() {
            Some(ability) => &ability.damages,
            None => &[],
        }
    }

    /// Extra damage on a critical hit.
    pub fn critical_damages(&self) -> &[Damage] {
        match self.as_catalog() {
            Some(ability) => &ability.critical_damages,
            None => &[],
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, SpecialAbility::Custom { .. })
    }

    pub fn as_catalog(&self) -> Option<&CatalogAbility> {
        match self {
            SpecialAbility::Catalog(ability) => Some(ability),
            SpecialAbility::Custom { .. } => None,
        }
    }
}

impl From<CatalogAbility> for SpecialAbility {
    fn from(ability: CatalogAbility) -> Self {
        SpecialAbility::Catalog(ability)
    }
}

/// Drops every family member but the first one at the family's highest
/// power. Items with no family are always kept, in input order.
fn keep_strongest<T, F>(items: Vec<T>, family: F) -> Vec<T>
where
    F: Fn(&T) -> Option<(&str, u32)>,
{
    let keep: Vec<bool> = {
        let mut strongest: HashMap<&str, (u32, usize)> = HashMap::new();
        for (index, item) in items.iter().enumerate() {
            if let Some((base_name, power)) = family(item) {
                strongest
                    .entry(base_name)
                    .and_modify(|best| {
                        if power > best.0 {
                            *best = (power, index);
                        }
                    })
                    .or_insert((power, index));
            }
        }

        items
            .iter()
            .enumerate()
            .map(|(index, item)| match family(item) {
                None => true,
                Some((base_name, _)) => strongest
                    .get(base_name)
                    .map_or(false, |&(_, survivor)| survivor == index),
            })
            .collect()
    };

    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, kept)| kept.then_some(item))
        .collect()
}

fn ability_family(ability: &SpecialAbility) -> Option<(&str, u32)> {
    ability
        .as_catalog()
        .map(|a| (a.base_name.as_str(), a.power))
}

fn catalog_family(ability: &CatalogAbility) -> Option<(&str, u32)> {
    Some((ability.base_name.as_str(), ability.power))
}

/// Keeps only the strongest tier of every ability family.
///
/// Custom abilities are always kept. The survivors keep their input order.
///
/// # Examples
///
/// ```
/// use hoardsmith::{collapse, AbilityCatalog, StaticCatalog, SpecialAbility};
///
/// let catalog = StaticCatalog::standard().unwrap();
/// let abilities = vec![
///     catalog.resolve("Flaming", "x2"),
///     SpecialAbility::custom("Singing"),
///     catalog.resolve("Flaming burst", "x2"),
/// ];
///
/// let names: Vec<_> = collapse(abilities).iter().map(|a| a.name().to_string()).collect();
/// assert_eq!(names, vec!["Singing", "Flaming burst"]);
/// ```
pub fn collapse(abilities: Vec<SpecialAbility>) -> Vec<SpecialAbility> {
    keep_strongest(abilities, ability_family)
}

/// [`collapse`] for a list made only of catalog abilities.
pub fn collapse_catalog(abilities: Vec<CatalogAbility>) -> Vec<CatalogAbility> {
    keep_strongest(abilities, catalog_family)
}
