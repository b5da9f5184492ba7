//! # Items Module
//!
//! The target items the enchantment engine works on.
//!
//! Items are owned by the caller. The engine reads their bonus, attributes and
//! critical multiplier while selecting abilities, and only the weapon effect
//! applicator writes back into them.

pub mod weapon;

pub use weapon::*;

use crate::tables::AbilityTable;
use crate::SpecialAbility;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Capability tags carried by an item.
///
/// Special abilities list the tags they require; an item is only eligible
/// for an ability if it carries all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Melee,
    Ranged,
    Shield,
    Body,
    Metal,
    Wooden,
    Slashing,
    Piercing,
    Bludgeoning,
    Thrown,
    Ammunition,
    TwoHanded,
    DoubleWeapon,
}

/// Broad item categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Armor,
    Weapon,
    Ring,
    Rod,
    Staff,
    Wand,
    WondrousItem,
}

impl ItemType {
    /// The special ability table this item type rolls on by itself.
    ///
    /// Weapons have none of their own: they roll on the melee and ranged
    /// tables through their attributes.
    pub fn ability_table(self) -> Option<AbilityTable> {
        match self {
            ItemType::Armor => Some(AbilityTable::Armor),
            _ => None,
        }
    }
}

/// Treasure power level, choosing which table family is rolled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Power {
    Minor,
    Medium,
    Major,
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Power::Minor => "Minor",
            Power::Medium => "Medium",
            Power::Major => "Major",
        };
        f.write_str(name)
    }
}

impl FromStr for Power {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minor" => Ok(Power::Minor),
            "medium" => Ok(Power::Medium),
            "major" => Ok(Power::Major),
            other => Err(format!("unknown power level '{}'", other)),
        }
    }
}

/// A magic item that can carry special abilities.
///
/// # Examples
///
/// ```
/// use hoardsmith::{Attribute, Item, ItemType};
///
/// let shield = Item::new("Heavy steel shield", ItemType::Armor)
///     .with_attributes([Attribute::Shield, Attribute::Metal])
///     .with_bonus(2);
/// assert!(shield.has_attribute(Attribute::Shield));
/// assert_eq!(shield.to_string(), "+2 Heavy steel shield");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name of the base item
    pub name: String,
    /// Broad category
    pub item_type: ItemType,
    /// Enhancement bonus; zero or less means not enchanted
    #[serde(default)]
    pub bonus: i32,
    /// Capability tags
    #[serde(default)]
    pub attributes: BTreeSet<Attribute>,
    /// Abilities attached to the item
    #[serde(default)]
    pub special_abilities: Vec<SpecialAbility>,
    /// Free-text contents, such as a stored spell
    #[serde(default)]
    pub contents: Vec<String>,
}

impl Item {
    /// Creates an unenchanted item with no attributes.
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            bonus: 0,
            attributes: BTreeSet::new(),
            special_abilities: Vec::new(),
            contents: Vec::new(),
        }
    }

    /// Adds capability tags.
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Sets the enhancement bonus.
    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    /// Checks whether the item carries a tag.
    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        self.attributes.contains(&attribute)
    }

    /// The tables this item's special abilities are rolled on.
    ///
    /// Melee and ranged both apply when both tags are present. On top of that
    /// a shield rolls on the shield table and anything else on its own item
    /// type's table, if it has one.
    pub fn ability_tables(&self) -> Vec<AbilityTable> {
        let mut tables = Vec::new();

        if self.has_attribute(Attribute::Melee) {
            tables.push(AbilityTable::Melee);
        }
        if self.has_attribute(Attribute::Ranged) {
            tables.push(AbilityTable::Ranged);
        }

        if self.has_attribute(Attribute::Shield) {
            tables.push(AbilityTable::Shield);
        } else if let Some(table) = self.item_type.ability_table() {
            tables.push(table);
        }

        tables
    }

    /// Names of the attached abilities, in order.
    pub fn ability_names(&self) -> Vec<String> {
        self.special_abilities
            .iter()
            .map(|ability| ability.name().to_string())
            .collect()
    }

    /// Enhancement bonus plus the bonus equivalent of every attached ability.
    pub fn total_bonus(&self) -> i32 {
        self.bonus
            + self
                .special_abilities
                .iter()
                .map(|ability| ability.bonus_equivalent() as i32)
                .sum::<i32>()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bonus > 0 {
            write!(f, "+{} ", self.bonus)?;
        }
        f.write_str(&self.name)?;

        if !self.special_abilities.is_empty() {
            write!(f, " ({})", self.ability_names().join(", "))?;
        }

        Ok(())
    }
}

/// Anything the enchantment engine can select abilities for.
pub trait Enchantable {
    /// The underlying item.
    fn item(&self) -> &Item;

    /// Key selecting critical bonus dice; empty for non-weapons.
    fn critical_key(&self) -> &str {
        ""
    }
}

impl Enchantable for Item {
    fn item(&self) -> &Item {
        self
    }
}
