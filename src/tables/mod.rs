//! # Tables Module
//!
//! The randomness ports of the engine and their implementations.
//!
//! The engine never touches a random number generator directly. Weighted
//! table draws, boolean rolls and uniform picks all go through a
//! [`TableSource`], and stored spells come from a [`SpellSource`]. Swapping
//! the seeded implementations for [`ScriptedTables`] makes every decision
//! reproducible.

pub mod scripted;
pub mod spells;
pub mod weighted;

pub use scripted::*;
pub use spells::*;
pub use weighted::*;

use crate::{HoardError, HoardResult, Power};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean table deciding whether a spell storing weapon holds a spell.
pub const SPELL_STORING_TABLE: &str = "SpellStoringContainsSpell";

/// Families of special ability tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityTable {
    Melee,
    Ranged,
    Shield,
    Armor,
}

impl AbilityTable {
    /// Name of this family's table at a power level.
    ///
    /// # Examples
    ///
    /// ```
    /// use hoardsmith::{AbilityTable, Power};
    ///
    /// assert_eq!(
    ///     AbilityTable::Melee.table_name(Power::Medium),
    ///     "MediumMeleeSpecialAbilities"
    /// );
    /// ```
    pub fn table_name(self, power: Power) -> String {
        format!("{}{}SpecialAbilities", power, self)
    }
}

impl fmt::Display for AbilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AbilityTable::Melee => "Melee",
            AbilityTable::Ranged => "Ranged",
            AbilityTable::Shield => "Shield",
            AbilityTable::Armor => "Armor",
        };
        f.write_str(name)
    }
}

/// Access to named percentile tables.
pub trait TableSource {
    /// Draws one weighted outcome from a table.
    fn draw(&mut self, table: &str) -> HoardResult<String>;

    /// Every distinct outcome a table can produce, in table order.
    fn outcomes(&self, table: &str) -> HoardResult<Vec<String>>;

    /// Picks an index in `0..len` uniformly.
    fn choose_index(&mut self, len: usize) -> HoardResult<usize>;

    /// Draws from a table whose outcomes are `true` and `false`.
    fn draw_boolean(&mut self, table: &str) -> HoardResult<bool> {
        let outcome = self.draw(table)?;
        outcome
            .trim()
            .to_lowercase()
            .parse::<bool>()
            .map_err(|_| HoardError::MalformedTable {
                table: table.to_string(),
                reason: format!("'{}' is not a boolean", outcome),
            })
    }
}

/// Source of spells for spell storing weapons.
pub trait SpellSource {
    /// Picks a spell type, such as `Arcane`.
    fn spell_type(&mut self) -> HoardResult<String>;

    /// Picks a spell level appropriate for a power level.
    fn spell_level(&mut self, power: Power) -> HoardResult<u32>;

    /// Picks a spell of the given type and level.
    fn spell(&mut self, spell_type: &str, level: u32) -> HoardResult<String>;
}
