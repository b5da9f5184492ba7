//! Loading catalogs, tables and base items from user files.

use hoardsmith::{
    AbilityCatalog, Attribute, BaseItems, Damage, HoardError, HoardResult, SpecialAbility,
    StaticCatalog, TableSet, TableSource, WeightedTables,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_catalog_from_file() -> HoardResult<()> {
    let file = write_temp(
        r#"{
            "abilities": {
                "Glimmering": { "base_name": "Glimmering", "power": 1, "bonus_equivalent": 1 },
                "Radiant": {
                    "base_name": "Glimmering",
                    "power": 2,
                    "bonus_equivalent": 3,
                    "attribute_requirements": ["Melee"]
                }
            },
            "damages": {
                "Radiant": [{ "roll": "1d6", "type": "Light" }],
                "Radiantx3": [{ "roll": "2d6", "type": "Light" }],
                "Glimmering": [{ "roll": "1", "condition": "in darkness" }]
            }
        }"#,
    );

    let catalog = StaticCatalog::from_path(file.path())?;
    assert_eq!(catalog.len(), 2);

    let radiant = catalog.resolve("Radiant", "x3");
    let SpecialAbility::Catalog(radiant) = radiant else {
        panic!("Radiant should resolve from the catalog");
    };
    assert!(radiant.attribute_requirements.contains(&Attribute::Melee));
    assert_eq!(radiant.critical_damages, vec![Damage::new("2d6", "Light")]);

    let glimmering = catalog.resolve("Glimmering", "x2");
    assert_eq!(
        glimmering.damages(),
        &[Damage::new("1", "").with_condition("in darkness")]
    );
    assert!(glimmering.critical_damages().is_empty());

    Ok(())
}

#[test]
fn test_tables_from_file() -> HoardResult<()> {
    let file = write_temp(
        r#"{
            "MinorMeleeSpecialAbilities": [
                { "outcome": "Glimmering", "weight": 3 },
                { "outcome": "Radiant", "weight": 1 },
                { "outcome": "Glimmering", "weight": 1 }
            ],
            "SpellStoringContainsSpell": [{ "outcome": "true", "weight": 1 }]
        }"#,
    );

    let mut tables = WeightedTables::new(TableSet::from_path(file.path())?, 9);
    assert_eq!(
        tables.outcomes("MinorMeleeSpecialAbilities")?,
        vec!["Glimmering", "Radiant"]
    );
    assert!(tables.draw_boolean("SpellStoringContainsSpell")?);
    assert!(matches!(
        tables.draw("MajorMeleeSpecialAbilities"),
        Err(HoardError::UnknownTable(_))
    ));

    Ok(())
}

#[test]
fn test_bases_from_file() -> HoardResult<()> {
    let file = write_temp(
        r#"{
            "weapons": [{
                "name": "Quarterstaff",
                "item_type": "Weapon",
                "attributes": ["Melee", "Wooden", "Bludgeoning", "DoubleWeapon"],
                "critical_multiplier": "x2",
                "secondary_critical_multiplier": "x2",
                "threat_range": 1,
                "damages": [{ "roll": "1d6", "type": "Bludgeoning" }],
                "secondary_damages": [{ "roll": "1d6", "type": "Bludgeoning" }]
            }]
        }"#,
    );

    let bases = BaseItems::from_path(file.path())?;
    let staff = bases.weapon("quarterstaff")?;
    assert!(staff.is_double_weapon());
    assert_eq!(staff.item.bonus, 0);
    assert!(bases.armor.is_empty());
    assert!(matches!(bases.armor("Chainmail"), Err(HoardError::UnknownBase(_))));

    Ok(())
}

#[test]
fn test_bad_files_report_errors() {
    let garbage = write_temp("{ not json");
    assert!(matches!(
        StaticCatalog::from_path(garbage.path()),
        Err(HoardError::Serde(_))
    ));

    let missing = garbage.path().with_extension("missing");
    assert!(matches!(
        TableSet::from_path(&missing),
        Err(HoardError::Io(_))
    ));
}
