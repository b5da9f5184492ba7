//! Property-based tests using proptest
//!
//! Invariants that must hold for any seed and any bundled base item:
//! - Budget: enhancement bonus plus ability costs never exceed the cap
//! - Families: no two catalog abilities share a base name
//! - Determinism: the same seed enchants the same item the same way
//! - Short circuit: bonus 0 or quantity 0 never touches the tables

use hoardsmith::{
    collapse, AbilityCatalog, BaseItems, EnchantedArmorGenerator, EnchantedWeaponGenerator,
    EnchantmentConfig, Enchanter, Generator, Power, ScriptedTables, SpecialAbility, SpellList,
    StaticCatalog, WeightedTables,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn power() -> impl Strategy<Value = Power> {
    prop_oneof![Just(Power::Minor), Just(Power::Medium), Just(Power::Major)]
}

fn catalog() -> StaticCatalog {
    StaticCatalog::standard().expect("bundled catalog should parse")
}

fn bases() -> BaseItems {
    BaseItems::standard().expect("bundled bases should parse")
}

fn distinct_families(abilities: &[SpecialAbility]) -> bool {
    let mut seen = BTreeSet::new();
    abilities
        .iter()
        .filter_map(SpecialAbility::base_name)
        .all(|base_name| seen.insert(base_name))
}

// ============================================================
// Selection Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_weapon_enchantment_stays_in_budget(
        seed in any::<u64>(),
        weapon_index in 0usize..11,
        power in power(),
        bonus in 1i32..=10,
        quantity in 0usize..=4,
    ) {
        let catalog = catalog();
        let config = EnchantmentConfig::new(seed);
        let enchanter = Enchanter::new(&catalog, &config);
        let bases = bases();
        let base = bases.weapons[weapon_index % bases.weapons.len()].clone();

        let generator = EnchantedWeaponGenerator::new(base, power, bonus, quantity);
        let mut tables = WeightedTables::standard(seed).unwrap();
        let mut spells = SpellList::standard(seed ^ 1).unwrap();
        let weapon = generator.generate(&enchanter, &mut tables, &mut spells).unwrap();

        prop_assert!(weapon.item.total_bonus() <= 10, "{} over budget", weapon.item);
        prop_assert!(distinct_families(&weapon.item.special_abilities));
        prop_assert!(generator.validate(&weapon, &config).is_ok());
        prop_assert!(weapon
            .item
            .special_abilities
            .iter()
            .all(|a| a.name() != "BonusSpecialAbility"));
    }

    #[test]
    fn prop_armor_enchantment_stays_in_budget(
        seed in any::<u64>(),
        armor_index in 0usize..5,
        power in power(),
        bonus in 1i32..=10,
        quantity in 0usize..=4,
    ) {
        let catalog = catalog();
        let config = EnchantmentConfig::new(seed);
        let enchanter = Enchanter::new(&catalog, &config);
        let bases = bases();
        let base = bases.armor[armor_index % bases.armor.len()].clone();

        let generator = EnchantedArmorGenerator::new(base, power, bonus, quantity);
        let mut tables = WeightedTables::standard(seed).unwrap();
        let mut spells = SpellList::standard(seed).unwrap();
        let armor = generator.generate(&enchanter, &mut tables, &mut spells).unwrap();

        prop_assert!(armor.total_bonus() <= 10);
        prop_assert!(distinct_families(&armor.special_abilities));
    }

    #[test]
    fn prop_enchantment_is_deterministic(seed in any::<u64>(), power in power(), bonus in 1i32..=5) {
        let catalog = catalog();
        let config = EnchantmentConfig::new(seed);
        let enchanter = Enchanter::new(&catalog, &config);
        let base = bases().weapon("Orc double axe").unwrap().clone();
        let generator = EnchantedWeaponGenerator::new(base, power, bonus, 2);

        let roll = || {
            let mut tables = WeightedTables::standard(seed).unwrap();
            let mut spells = SpellList::standard(seed).unwrap();
            generator.generate(&enchanter, &mut tables, &mut spells).unwrap()
        };

        prop_assert_eq!(roll(), roll());
    }

    #[test]
    fn prop_no_draws_without_bonus_or_quantity(
        weapon_index in 0usize..11,
        power in power(),
        quantity in 0usize..=4,
        bonus in 1i32..=10,
    ) {
        let catalog = catalog();
        let config = EnchantmentConfig::default();
        let enchanter = Enchanter::new(&catalog, &config);
        let bases = bases();
        let mut weapon = bases.weapons[weapon_index % bases.weapons.len()].clone();

        let mut tables = ScriptedTables::new();
        let unenchanted = enchanter.select_random(&weapon, power, quantity, &mut tables).unwrap();
        prop_assert!(unenchanted.is_empty());

        weapon.item.bonus = bonus;
        let none_asked = enchanter.select_random(&weapon, power, 0, &mut tables).unwrap();
        prop_assert!(none_asked.is_empty());
        prop_assert_eq!(tables.calls(), 0);
    }
}

// ============================================================
// Collapse Properties
// ============================================================

fn ability_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Flaming".to_string()),
        Just("Flaming burst".to_string()),
        Just("Frost".to_string()),
        Just("Icy burst".to_string()),
        Just("Light fortification".to_string()),
        Just("Moderate fortification".to_string()),
        Just("Heavy fortification".to_string()),
        Just("Keen".to_string()),
        Just("Sparkles".to_string()),
        Just("Hums when drawn".to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_collapse_keeps_one_per_family(names in prop::collection::vec(ability_name(), 0..12)) {
        let catalog = catalog();
        let abilities: Vec<SpecialAbility> = names
            .iter()
            .map(|name| catalog.resolve(name, "x2"))
            .collect();
        let customs = abilities.iter().filter(|a| a.is_custom()).count();

        let collapsed = collapse(abilities.clone());

        prop_assert!(distinct_families(&collapsed));
        prop_assert_eq!(collapsed.iter().filter(|a| a.is_custom()).count(), customs);

        // Every surviving catalog ability is the strongest of its family
        for survivor in collapsed.iter().filter_map(SpecialAbility::as_catalog) {
            let strongest = abilities
                .iter()
                .filter_map(SpecialAbility::as_catalog)
                .filter(|a| a.base_name == survivor.base_name)
                .map(|a| a.power)
                .max()
                .unwrap();
            prop_assert_eq!(survivor.power, strongest);
        }
    }

    #[test]
    fn prop_collapse_is_idempotent(names in prop::collection::vec(ability_name(), 0..12)) {
        let catalog = catalog();
        let abilities: Vec<SpecialAbility> = names
            .iter()
            .map(|name| catalog.resolve(name, "x3"))
            .collect();

        let once = collapse(abilities);
        let twice = collapse(once.clone());
        prop_assert_eq!(once, twice);
    }
}
