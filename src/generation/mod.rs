//! # Generation Module
//!
//! Generators that turn a base item template into an enchanted item.
//!
//! A generator owns the *what* (which base, at which power, with which bonus)
//! and delegates the *how* to an [`Enchanter`]. All randomness comes from the
//! table and spell sources handed to [`Generator::generate`], so the same
//! sources replay the same item.

pub mod items;

pub use items::*;

use crate::{
    EnchantmentConfig, Enchanter, HoardError, HoardResult, Item, SpecialAbility, SpellList,
    SpellSource, TableSource, WeightedTables,
};
use std::collections::BTreeSet;

/// Trait for enchanted item generators.
pub trait Generator<T> {
    /// Generates content using the enchanter and the random sources.
    fn generate(
        &self,
        enchanter: &Enchanter<'_>,
        tables: &mut dyn TableSource,
        spells: &mut dyn SpellSource,
    ) -> HoardResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &EnchantmentConfig) -> HoardResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;

    /// Generates and validates in one step.
    fn generate_validated(
        &self,
        enchanter: &Enchanter<'_>,
        tables: &mut dyn TableSource,
        spells: &mut dyn SpellSource,
    ) -> HoardResult<T> {
        let content = self.generate(enchanter, tables, spells)?;
        self.validate(&content, enchanter.config())?;
        Ok(content)
    }
}

/// Utility functions for generation.
pub mod utils {
    use super::*;

    /// Creates the bundled table and spell sources seeded from the config.
    ///
    /// The spell source gets a derived seed so that the two streams differ.
    pub fn standard_sources(config: &EnchantmentConfig) -> HoardResult<(WeightedTables, SpellList)> {
        let tables = WeightedTables::standard(config.seed)?;
        let spells = SpellList::standard(config.seed.wrapping_add(1))?;
        Ok((tables, spells))
    }

    /// Checks an enchanted item against the budget and family rules.
    ///
    /// The enhancement bonus plus every ability's bonus equivalent must stay
    /// within the configured cap, and no two catalog abilities may share a
    /// base name.
    pub fn validate_enchantment(item: &Item, config: &EnchantmentConfig) -> HoardResult<()> {
        let total = item.total_bonus();
        if total > config.max_bonus {
            return Err(HoardError::GenerationFailed(format!(
                "{} has a total bonus of {}, above the cap of {}",
                item.name, total, config.max_bonus
            )));
        }

        let mut families = BTreeSet::new();
        for base_name in item
            .special_abilities
            .iter()
            .filter_map(SpecialAbility::base_name)
        {
            if !families.insert(base_name) {
                return Err(HoardError::GenerationFailed(format!(
                    "{} carries more than one {} ability",
                    item.name, base_name
                )));
            }
        }

        Ok(())
    }
}
