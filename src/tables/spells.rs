//! # Spell Lists
//!
//! Seeded spell lists by type and level, used for spell storing weapons.

use super::SpellSource;
use crate::{HoardError, HoardResult, Power};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

const STANDARD_SPELLS: &str = include_str!("../../data/spells.json");

/// Spell levels a power level can produce.
pub fn spell_levels(power: Power) -> RangeInclusive<u32> {
    match power {
        Power::Minor => 0..=3,
        Power::Medium => 3..=6,
        Power::Major => 6..=9,
    }
}

/// [`SpellSource`] picking from per-level spell lists with a seeded RNG.
#[derive(Debug, Clone)]
pub struct SpellList {
    /// Spell names by type, then by level
    lists: BTreeMap<String, Vec<Vec<String>>>,
    rng: StdRng,
}

impl SpellList {
    pub fn new(lists: BTreeMap<String, Vec<Vec<String>>>, seed: u64) -> Self {
        Self {
            lists,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The spell lists bundled with the crate.
    pub fn standard(seed: u64) -> HoardResult<Self> {
        Ok(Self::new(serde_json::from_str(STANDARD_SPELLS)?, seed))
    }
}

impl SpellSource for SpellList {
    fn spell_type(&mut self) -> HoardResult<String> {
        let types: Vec<&String> = self.lists.keys().collect();
        types
            .choose(&mut self.rng)
            .map(|spell_type| spell_type.to_string())
            .ok_or_else(|| HoardError::UnknownSpellType("<none>".to_string()))
    }

    fn spell_level(&mut self, power: Power) -> HoardResult<u32> {
        Ok(self.rng.gen_range(spell_levels(power)))
    }

    fn spell(&mut self, spell_type: &str, level: u32) -> HoardResult<String> {
        let levels = self
            .lists
            .get(spell_type)
            .ok_or_else(|| HoardError::UnknownSpellType(spell_type.to_string()))?;

        levels
            .get(level as usize)
            .and_then(|spells| spells.choose(&mut self.rng))
            .cloned()
            .ok_or_else(|| HoardError::NoSpellsAtLevel {
                spell_type: spell_type.to_string(),
                level,
            })
    }
}
