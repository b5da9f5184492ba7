//! # Weighted Tables
//!
//! Named weighted tables held in memory and drawn from with a seeded RNG.

use super::TableSource;
use crate::{HoardError, HoardResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const STANDARD_TABLES: &str = include_str!("../../data/tables.json");

/// One outcome of a weighted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub outcome: String,
    pub weight: u32,
}

/// A set of named weighted tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSet {
    pub tables: BTreeMap<String, Vec<TableEntry>>,
}

impl TableSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tables bundled with the crate.
    pub fn standard() -> HoardResult<Self> {
        Self::from_json(STANDARD_TABLES)
    }

    /// Parses tables from JSON text.
    pub fn from_json(json: &str) -> HoardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads tables from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> HoardResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Adds or replaces a table from `(outcome, weight)` pairs.
    pub fn with_table<'a>(
        mut self,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (&'a str, u32)>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(outcome, weight)| TableEntry {
                outcome: outcome.to_string(),
                weight,
            })
            .collect();
        self.tables.insert(name.into(), entries);
        self
    }

    /// Entries of a table.
    pub fn get(&self, table: &str) -> HoardResult<&[TableEntry]> {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| HoardError::UnknownTable(table.to_string()))
    }
}

/// [`TableSource`] drawing from a [`TableSet`] with a seeded `StdRng`.
///
/// # Examples
///
/// ```
/// use hoardsmith::{TableSet, TableSource, WeightedTables};
///
/// let set = TableSet::new().with_table("Coin", [("Heads", 1), ("Tails", 1)]);
/// let mut tables = WeightedTables::new(set, 7);
///
/// let outcome = tables.draw("Coin").unwrap();
/// assert!(outcome == "Heads" || outcome == "Tails");
/// ```
#[derive(Debug, Clone)]
pub struct WeightedTables {
    tables: TableSet,
    rng: StdRng,
}

impl WeightedTables {
    /// Creates a source over `tables` seeded with `seed`.
    pub fn new(tables: TableSet, seed: u64) -> Self {
        Self {
            tables,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The bundled tables seeded with `seed`.
    pub fn standard(seed: u64) -> HoardResult<Self> {
        Ok(Self::new(TableSet::standard()?, seed))
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }
}

impl TableSource for WeightedTables {
    fn draw(&mut self, table: &str) -> HoardResult<String> {
        let entries = self.tables.get(table)?;
        let index = WeightedIndex::new(entries.iter().map(|entry| entry.weight)).map_err(|e| {
            HoardError::MalformedTable {
                table: table.to_string(),
                reason: e.to_string(),
            }
        })?;

        let outcome = entries[index.sample(&mut self.rng)].outcome.clone();
        tracing::trace!("Drew '{}' from {}", outcome, table);
        Ok(outcome)
    }

    fn outcomes(&self, table: &str) -> HoardResult<Vec<String>> {
        let mut outcomes: Vec<String> = Vec::new();
        for entry in self.tables.get(table)? {
            if !outcomes.contains(&entry.outcome) {
                outcomes.push(entry.outcome.clone());
            }
        }
        Ok(outcomes)
    }

    fn choose_index(&mut self, len: usize) -> HoardResult<usize> {
        if len == 0 {
            return Err(HoardError::GenerationFailed(
                "cannot choose from an empty list".to_string(),
            ));
        }
        Ok(self.rng.gen_range(0..len))
    }
}
