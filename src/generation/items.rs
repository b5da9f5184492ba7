//! # Item Generation
//!
//! Enchanted weapon and armor generators, plus the bundled base item
//! templates they start from.

use super::utils::validate_enchantment;
use crate::{
    EnchantmentConfig, Enchanter, Generator, HoardError, HoardResult, Item, Power, SpellSource,
    TableSource, Weapon,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

const STANDARD_BASES: &str = include_str!("../../data/bases.json");

/// Unenchanted base item templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseItems {
    /// Weapon templates
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    /// Armor and shield templates
    #[serde(default)]
    pub armor: Vec<Item>,
}

impl BaseItems {
    /// The templates bundled with the crate.
    pub fn standard() -> HoardResult<Self> {
        Self::from_json(STANDARD_BASES)
    }

    pub fn from_json(json: &str) -> HoardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> HoardResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Looks up a weapon template by name, ignoring case.
    pub fn weapon(&self, name: &str) -> HoardResult<&Weapon> {
        self.weapons
            .iter()
            .find(|weapon| weapon.item.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| HoardError::UnknownBase(name.to_string()))
    }

    /// Looks up an armor or shield template by name, ignoring case.
    pub fn armor(&self, name: &str) -> HoardResult<&Item> {
        self.armor
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| HoardError::UnknownBase(name.to_string()))
    }

    /// Names of every template, weapons first.
    pub fn names(&self) -> Vec<&str> {
        self.weapons
            .iter()
            .map(|weapon| weapon.item.name.as_str())
            .chain(self.armor.iter().map(|item| item.name.as_str()))
            .collect()
    }
}

/// Enchants a copy of a base weapon.
///
/// # Examples
///
/// ```
/// use hoardsmith::{
///     BaseItems, EnchantedWeaponGenerator, EnchantmentConfig, Enchanter, Generator, Power,
///     SpellList, StaticCatalog, WeightedTables,
/// };
///
/// let catalog = StaticCatalog::standard().unwrap();
/// let config = EnchantmentConfig::new(7);
/// let enchanter = Enchanter::new(&catalog, &config);
/// let base = BaseItems::standard().unwrap().weapon("Longsword").unwrap().clone();
///
/// let generator = EnchantedWeaponGenerator::new(base, Power::Medium, 2, 1);
/// let mut tables = WeightedTables::standard(7).unwrap();
/// let mut spells = SpellList::standard(8).unwrap();
/// let weapon = generator.generate(&enchanter, &mut tables, &mut spells).unwrap();
/// assert_eq!(weapon.item.bonus, 2);
/// assert!(weapon.item.total_bonus() <= 10);
/// ```
#[derive(Debug, Clone)]
pub struct EnchantedWeaponGenerator {
    base: Weapon,
    power: Power,
    bonus: i32,
    quantity: usize,
}

impl EnchantedWeaponGenerator {
    pub fn new(base: Weapon, power: Power, bonus: i32, quantity: usize) -> Self {
        Self {
            base,
            power,
            bonus,
            quantity,
        }
    }
}

impl Generator<Weapon> for EnchantedWeaponGenerator {
    fn generate(
        &self,
        enchanter: &Enchanter<'_>,
        tables: &mut dyn TableSource,
        spells: &mut dyn SpellSource,
    ) -> HoardResult<Weapon> {
        let mut weapon = self.base.clone();
        weapon.item.bonus = self.bonus;

        weapon.item.special_abilities =
            enchanter.select_random(&weapon, self.power, self.quantity, tables)?;

        if weapon.is_double_weapon() && self.bonus > 0 {
            weapon.secondary_has_abilities = true;
            weapon.secondary_magic_bonus = self.bonus;
        }

        enchanter.apply_to_weapon(&mut weapon, tables, spells)?;

        info!("{} generated {}", self.generator_type(), weapon.item);
        Ok(weapon)
    }

    fn validate(&self, content: &Weapon, config: &EnchantmentConfig) -> HoardResult<()> {
        validate_enchantment(&content.item, config)?;

        if content.secondary_has_abilities && content.secondary_magic_bonus != content.item.bonus {
            return Err(HoardError::GenerationFailed(format!(
                "{} secondary bonus {} differs from primary bonus {}",
                content.item.name, content.secondary_magic_bonus, content.item.bonus
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "EnchantedWeaponGenerator"
    }
}

/// Enchants a copy of a base armor piece or shield.
#[derive(Debug, Clone)]
pub struct EnchantedArmorGenerator {
    base: Item,
    power: Power,
    bonus: i32,
    quantity: usize,
}

impl EnchantedArmorGenerator {
    pub fn new(base: Item, power: Power, bonus: i32, quantity: usize) -> Self {
        Self {
            base,
            power,
            bonus,
            quantity,
        }
    }
}

impl Generator<Item> for EnchantedArmorGenerator {
    fn generate(
        &self,
        enchanter: &Enchanter<'_>,
        tables: &mut dyn TableSource,
        _spells: &mut dyn SpellSource,
    ) -> HoardResult<Item> {
        let mut item = self.base.clone();
        item.bonus = self.bonus;
        item.special_abilities = enchanter.select_random(&item, self.power, self.quantity, tables)?;

        debug!("{} generated {}", self.generator_type(), item);
        Ok(item)
    }

    fn validate(&self, content: &Item, config: &EnchantmentConfig) -> HoardResult<()> {
        validate_enchantment(content, config)
    }

    fn generator_type(&self) -> &'static str {
        "EnchantedArmorGenerator"
    }
}
