//! # Scripted Tables
//!
//! A [`TableSource`] that replays recorded outcomes instead of rolling.

use super::TableSource;
use crate::{HoardError, HoardResult};
use std::collections::{BTreeMap, VecDeque};

/// Replays a fixed sequence of draws and table picks.
///
/// Draws are consumed in order regardless of the table asked for. Table picks
/// come from their own queue; once it is empty every pick is index 0. Every
/// draw and pick is counted, so callers can check that no randomness was
/// used at all.
///
/// # Examples
///
/// ```
/// use hoardsmith::{ScriptedTables, TableSource};
///
/// let mut tables = ScriptedTables::new().with_draws(["Keen", "true"]);
/// assert_eq!(tables.draw("MinorMeleeSpecialAbilities").unwrap(), "Keen");
/// assert!(tables.draw_boolean("SpellStoringContainsSpell").unwrap());
/// assert_eq!(tables.calls(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedTables {
    outcomes: BTreeMap<String, Vec<String>>,
    draws: VecDeque<String>,
    indices: VecDeque<usize>,
    calls: usize,
}

impl ScriptedTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the outcomes a table lists.
    pub fn with_outcomes<S: Into<String>>(
        mut self,
        table: impl Into<String>,
        outcomes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.outcomes
            .insert(table.into(), outcomes.into_iter().map(Into::into).collect());
        self
    }

    /// Queues draw results.
    pub fn with_draws<S: Into<String>>(mut self, draws: impl IntoIterator<Item = S>) -> Self {
        self.draws.extend(draws.into_iter().map(Into::into));
        self
    }

    /// Queues table picks.
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Draws and picks made so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Draws not consumed yet.
    pub fn remaining_draws(&self) -> usize {
        self.draws.len()
    }
}

impl TableSource for ScriptedTables {
    fn draw(&mut self, table: &str) -> HoardResult<String> {
        self.calls += 1;
        let outcome = self
            .draws
            .pop_front()
            .ok_or(HoardError::ScriptExhausted("draws"))?;
        tracing::trace!("Scripted '{}' for {}", outcome, table);
        Ok(outcome)
    }

    fn outcomes(&self, table: &str) -> HoardResult<Vec<String>> {
        self.outcomes
            .get(table)
            .cloned()
            .ok_or_else(|| HoardError::UnknownTable(table.to_string()))
    }

    fn choose_index(&mut self, len: usize) -> HoardResult<usize> {
        self.calls += 1;
        let index = self.indices.pop_front().unwrap_or(0);
        Ok(index.min(len.saturating_sub(1)))
    }
}
