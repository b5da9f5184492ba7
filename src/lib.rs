//! # Hoardsmith
//!
//! Magic item enchantment engine for randomized tabletop treasure.
//!
//! ## Architecture Overview
//!
//! Treasure generation is driven by large weighted tables. This crate owns the
//! part of that pipeline that decides which special abilities a magic weapon
//! or armor piece receives and what those abilities do to it:
//!
//! - **Abilities**: catalog definitions, custom pass-through abilities and the
//!   strongest-tier collapse
//! - **Tables**: the randomness ports (weighted tables, spells) and their
//!   seeded and scripted implementations
//! - **Enchantment**: eligibility filtering, budgeted selection and weapon
//!   effect application
//! - **Generation**: thin generators that enchant a base weapon or armor piece
//!
//! Every random decision goes through a [`TableSource`] or [`SpellSource`], so
//! a run is reproducible from a seed or from a scripted sequence of draws.

pub mod abilities;
pub mod enchantment;
pub mod generation;
pub mod items;
pub mod tables;

pub use abilities::*;
pub use enchantment::*;
pub use generation::*;
pub use items::*;
pub use tables::*;

/// Core error type for the Hoardsmith engine.
#[derive(thiserror::Error, Debug)]
pub enum HoardError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A table name has no entries in the table source
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// A table produced an outcome that cannot be interpreted
    #[error("Malformed table {table}: {reason}")]
    MalformedTable { table: String, reason: String },

    /// Rejection sampling never produced a usable outcome
    #[error("No usable outcome from {tables:?} after {attempts} draws")]
    DrawLimitExceeded { tables: Vec<String>, attempts: usize },

    /// A selection was told to accept an ability it does not offer
    #[error("{0} is not a remaining candidate")]
    NotACandidate(String),

    /// A scripted table source ran out of recorded outcomes
    #[error("Scripted {0} exhausted")]
    ScriptExhausted(&'static str),

    /// The spell source has no list for the requested spell type
    #[error("Unknown spell type: {0}")]
    UnknownSpellType(String),

    /// The spell source has no spells at the requested level
    #[error("No {spell_type} spells at level {level}")]
    NoSpellsAtLevel { spell_type: String, level: u32 },

    /// No base item template with the given name
    #[error("Unknown base item: {0}")]
    UnknownBase(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Hoardsmith codebase.
pub type HoardResult<T> = Result<T, HoardError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Cap on an item's enhancement bonus plus its abilities' bonus equivalents
    pub const MAX_BONUS: i32 = 10;

    /// Draws allowed between two accepted abilities before selection gives up
    pub const DEFAULT_MAX_DRAW_ATTEMPTS: usize = 10_000;

    /// Default seed used by the command-line front end
    pub const DEFAULT_SEED: u64 = 42;
}
