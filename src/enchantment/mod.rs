//! # Enchantment Module
//!
//! The special ability engine: which abilities an item may receive, which it
//! does receive under the shared enhancement budget, and what they do to a
//! weapon.
//!
//! Callers take one of two paths. The random path ([`Enchanter::select_random`])
//! rolls abilities on the item's tables. The template path
//! ([`Enchanter::resolve_from_template`]) re-resolves a list of names that is
//! already known to be valid. Both end in the strongest-tier
//! [`collapse`](crate::collapse) before the weapon effects are applied.

pub mod selection;
pub mod weapon;

pub use selection::*;
pub use weapon::*;

use crate::{
    collapse, config, AbilityCatalog, CatalogAbility, Enchantable, HoardResult, Item, Power,
    SpecialAbility, TableSource, BONUS_SPECIAL_ABILITY,
};
use serde::{Deserialize, Serialize};

/// Configuration for the enchantment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnchantmentConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Cap on enhancement bonus plus ability bonus equivalents
    pub max_bonus: i32,
    /// Draws allowed between two accepted abilities
    pub max_draw_attempts: usize,
}

impl EnchantmentConfig {
    /// Creates a configuration with the standard limits.
    ///
    /// # Examples
    ///
    /// ```
    /// use hoardsmith::EnchantmentConfig;
    ///
    /// let config = EnchantmentConfig::new(12345);
    /// assert_eq!(config.max_bonus, 10);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_bonus: config::MAX_BONUS,
            max_draw_attempts: config::DEFAULT_MAX_DRAW_ATTEMPTS,
        }
    }

    /// Creates a configuration that gives up on unsatisfiable tables quickly.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            max_draw_attempts: 200,
            ..Self::new(seed)
        }
    }
}

impl Default for EnchantmentConfig {
    fn default() -> Self {
        Self::new(config::DEFAULT_SEED)
    }
}

/// The special ability engine, bound to a catalog.
///
/// The enchanter holds no state between calls; every selection starts from
/// a freshly computed candidate pool.
#[derive(Clone, Copy)]
pub struct Enchanter<'c> {
    catalog: &'c dyn AbilityCatalog,
    config: &'c EnchantmentConfig,
}

impl<'c> Enchanter<'c> {
    pub fn new(catalog: &'c dyn AbilityCatalog, config: &'c EnchantmentConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &'c EnchantmentConfig {
        self.config
    }

    pub fn catalog(&self) -> &'c dyn AbilityCatalog {
        self.catalog
    }

    /// Resolves one ability name for a critical key.
    pub fn resolve(&self, name: &str, critical_key: &str) -> SpecialAbility {
        self.catalog.resolve(name, critical_key)
    }

    /// Whether the name is unknown to the catalog.
    pub fn is_custom(&self, name: &str) -> bool {
        self.catalog.is_custom(name)
    }

    /// Names of the tables an item rolls its abilities on.
    pub fn table_names(&self, item: &Item, power: Power) -> Vec<String> {
        item.ability_tables()
            .into_iter()
            .map(|table| table.table_name(power))
            .collect()
    }

    /// Whether a catalog ability may be put on the item.
    ///
    /// The item must carry every required tag, and the ability's cost on top
    /// of the item's bonus must stay within the budget.
    pub fn is_eligible(&self, item: &Item, ability: &CatalogAbility) -> bool {
        ability.attribute_requirements.is_subset(&item.attributes)
            && item.bonus + ability.bonus_equivalent as i32 <= self.config.max_bonus
    }

    /// Every catalog ability the item's tables offer that the item can take.
    ///
    /// Abilities offered by several tables appear once per table.
    pub fn candidate_pool<T: Enchantable + ?Sized>(
        &self,
        target: &T,
        power: Power,
        tables: &dyn TableSource,
    ) -> HoardResult<Vec<CatalogAbility>> {
        let item = target.item();
        let mut pool = Vec::new();

        for table in self.table_names(item, power) {
            for name in tables.outcomes(&table)? {
                if name == BONUS_SPECIAL_ABILITY {
                    continue;
                }

                match self.catalog.resolve(&name, target.critical_key()) {
                    SpecialAbility::Catalog(ability) => {
                        if self.is_eligible(item, &ability) {
                            pool.push(ability);
                        }
                    }
                    SpecialAbility::Custom { name } => {
                        tracing::debug!("Table {} offers '{}', which is not in the catalog", table, name);
                    }
                }
            }
        }

        tracing::debug!(
            "Candidate pool for {} at {} power: {} abilities",
            item.name,
            power,
            pool.len()
        );
        Ok(pool)
    }

    /// Re-resolves a list of ability names for a critical key.
    ///
    /// Custom names stay custom. No budget check is made: the caller vouches
    /// that the abilities suit the item.
    pub fn resolve_from_template<S: AsRef<str>>(
        &self,
        names: &[S],
        critical_key: &str,
    ) -> Vec<SpecialAbility> {
        let abilities = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                if self.catalog.is_custom(name) {
                    SpecialAbility::custom(name)
                } else {
                    self.catalog.resolve(name, critical_key)
                }
            })
            .collect();

        collapse(abilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, ItemType, ScriptedTables, StaticCatalog};

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_ability("Flaming", "Flaming", 1, 1, [])
            .with_ability("Flaming burst", "Flaming", 2, 2, [])
            .with_ability("Keen", "Keen", 1, 1, [Attribute::Melee, Attribute::Slashing])
            .with_ability("Distance", "Distance", 1, 1, [Attribute::Ranged])
            .with_ability("Vorpal", "Vorpal", 1, 5, [Attribute::Melee, Attribute::Slashing])
            .with_ability("Bashing", "Bashing", 1, 1, [Attribute::Shield])
    }

    fn tables() -> ScriptedTables {
        ScriptedTables::new()
            .with_outcomes(
                "MediumMeleeSpecialAbilities",
                ["Flaming", "Keen", "Vorpal", "Flaming burst", "BonusSpecialAbility", "Whirling"],
            )
            .with_outcomes("MediumRangedSpecialAbilities", ["Flaming", "Distance"])
            .with_outcomes("MediumShieldSpecialAbilities", ["Bashing"])
    }

    fn names(pool: &[CatalogAbility]) -> Vec<&str> {
        pool.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_pool_filters_requirements_and_sentinel() {
        let catalog = catalog();
        let config = EnchantmentConfig::new(1);
        let enchanter = Enchanter::new(&catalog, &config);

        let club = Item::new("Club", ItemType::Weapon)
            .with_attributes([Attribute::Melee, Attribute::Bludgeoning])
            .with_bonus(1);

        let pool = enchanter.candidate_pool(&club, Power::Medium, &tables()).unwrap();
        assert_eq!(names(&pool), vec!["Flaming", "Flaming burst"]);
    }

    #[test]
    fn test_pool_filters_budget() {
        let catalog = catalog();
        let config = EnchantmentConfig::new(1);
        let enchanter = Enchanter::new(&catalog, &config);

        let sword = Item::new("Longsword", ItemType::Weapon)
            .with_attributes([Attribute::Melee, Attribute::Slashing]);

        let modest = sword.clone().with_bonus(5);
        let pool = enchanter.candidate_pool(&modest, Power::Medium, &tables()).unwrap();
        assert!(names(&pool).contains(&"Vorpal"));

        let strong = sword.with_bonus(6);
        let pool = enchanter.candidate_pool(&strong, Power::Medium, &tables()).unwrap();
        assert!(!names(&pool).contains(&"Vorpal"));
        assert!(names(&pool).contains(&"Keen"));
    }

    #[test]
    fn test_pool_unions_melee_and_ranged() {
        let catalog = catalog();
        let config = EnchantmentConfig::new(1);
        let enchanter = Enchanter::new(&catalog, &config);

        let dagger = Item::new("Dagger", ItemType::Weapon)
            .with_attributes([Attribute::Melee, Attribute::Ranged, Attribute::Piercing])
            .with_bonus(1);

        let pool = enchanter.candidate_pool(&dagger, Power::Medium, &tables()).unwrap();
        assert_eq!(
            names(&pool),
            vec!["Flaming", "Flaming burst", "Flaming", "Distance"]
        );
    }

    #[test]
    fn test_shield_uses_shield_table() {
        let catalog = catalog();
        let config = EnchantmentConfig::new(1);
        let enchanter = Enchanter::new(&catalog, &config);

        let shield = Item::new("Heavy steel shield", ItemType::Armor)
            .with_attributes([Attribute::Shield])
            .with_bonus(2);

        assert_eq!(
            enchanter.table_names(&shield, Power::Medium),
            vec!["MediumShieldSpecialAbilities"]
        );
        let pool = enchanter.candidate_pool(&shield, Power::Medium, &tables()).unwrap();
        assert_eq!(names(&pool), vec!["Bashing"]);
    }

    #[test]
    fn test_template_keeps_customs_and_collapses() {
        let catalog = catalog();
        let config = EnchantmentConfig::new(1);
        let enchanter = Enchanter::new(&catalog, &config);

        let abilities = enchanter.resolve_from_template(
            &["Flaming", "Glows faintly", "Flaming burst", "Vorpal", "Glows faintly"],
            "x2",
        );
        let names: Vec<&str> = abilities.iter().map(|a| a.name()).collect();

        assert_eq!(
            names,
            vec!["Glows faintly", "Flaming burst", "Vorpal", "Glows faintly"]
        );
    }

    #[test]
    fn test_template_ignores_budget() {
        let catalog = catalog();
        let config = EnchantmentConfig::new(1);
        let enchanter = Enchanter::new(&catalog, &config);

        let abilities = enchanter.resolve_from_template(&["Vorpal", "Flaming burst", "Keen", "Distance"], "x2");
        let cost: u32 = abilities.iter().map(|a| a.bonus_equivalent()).sum();
        assert_eq!(abilities.len(), 4);
        assert_eq!(cost, 9);
    }
}
