//! # Weapon Effects
//!
//! Applies a weapon's special abilities to its damage profile, threat range
//! and contents.

use super::Enchanter;
use crate::{
    default_damage_type, Damage, HoardResult, Power, SpecialAbility, SpellSource, TableSource,
    Weapon, KEEN, SPELL_STORING, SPELL_STORING_TABLE,
};
use tracing::debug;

/// Appends every ability's bonus damage to one head's damage lists.
///
/// Entries without a type take `damage_type` (hit damage) or
/// `critical_type` (critical damage). Existing entries are never replaced.
pub fn append_ability_damages(
    abilities: &[SpecialAbility],
    damages: &mut Vec<Damage>,
    critical_damages: &mut Vec<Damage>,
    damage_type: &str,
    critical_type: &str,
) {
    for ability in abilities {
        damages.extend(
            ability
                .damages()
                .iter()
                .map(|damage| damage.inheriting(damage_type)),
        );
        critical_damages.extend(
            ability
                .critical_damages()
                .iter()
                .map(|damage| damage.inheriting(critical_type)),
        );
    }
}

impl<'c> Enchanter<'c> {
    /// Applies the weapon's special abilities to it in place.
    ///
    /// A spell storing weapon may receive a stored spell. Bonus damage is
    /// added to the primary head and, for a double weapon whose secondary head
    /// is enchanted, to the secondary head using its own critical multiplier.
    /// Keen doubles the threat range once.
    pub fn apply_to_weapon(
        &self,
        weapon: &mut Weapon,
        tables: &mut dyn TableSource,
        spells: &mut dyn SpellSource,
    ) -> HoardResult<()> {
        let has_ability = |name: &str| {
            weapon
                .item
                .special_abilities
                .iter()
                .any(|ability| ability.name() == name)
        };
        let spell_storing = has_ability(SPELL_STORING);
        let keen = has_ability(KEEN);

        if spell_storing && tables.draw_boolean(SPELL_STORING_TABLE)? {
            let spell_type = spells.spell_type()?;
            let level = spells.spell_level(Power::Minor)?;
            let spell = spells.spell(&spell_type, level)?;
            debug!("{} stores {} ({} level {})", weapon.item.name, spell, spell_type, level);
            weapon.item.contents.push(spell);
        }

        let damage_type = default_damage_type(&weapon.damages).to_string();
        let critical_type = default_damage_type(&weapon.critical_damages).to_string();
        append_ability_damages(
            &weapon.item.special_abilities,
            &mut weapon.damages,
            &mut weapon.critical_damages,
            &damage_type,
            &critical_type,
        );

        if keen {
            weapon.threat_range *= 2;
        }

        if weapon.is_double_weapon() && weapon.secondary_has_abilities {
            let secondary = self.resolve_from_template(
                &weapon.item.ability_names(),
                &weapon.secondary_critical_multiplier,
            );
            let secondary_type = default_damage_type(&weapon.secondary_damages).to_string();
            append_ability_damages(
                &secondary,
                &mut weapon.secondary_damages,
                &mut weapon.secondary_critical_damages,
                &secondary_type,
                &secondary_type,
            );
        }

        Ok(())
    }
}
