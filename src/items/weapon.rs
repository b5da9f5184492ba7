//! # Weapons
//!
//! Weapon-specific state: damage profiles, critical multipliers, threat range
//! and the secondary head of double weapons.

use super::{Attribute, Enchantable, Item, ItemType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of damage dice.
///
/// An empty damage type means "same type as the weapon"; the weapon effect
/// applicator fills it in when the entry is added to a weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    /// Roll expression, such as `1d6`
    pub roll: String,
    /// Damage type, such as `Fire`
    #[serde(rename = "type", default)]
    pub damage_type: String,
    /// Situation the damage applies in, such as `against evil`
    #[serde(default)]
    pub condition: String,
}

impl Damage {
    /// Creates an unconditional damage entry.
    pub fn new(roll: impl Into<String>, damage_type: impl Into<String>) -> Self {
        Self {
            roll: roll.into(),
            damage_type: damage_type.into(),
            condition: String::new(),
        }
    }

    /// Restricts the entry to a situation.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    /// Copy of this entry whose empty type is replaced by `default_type`.
    pub fn inheriting(&self, default_type: &str) -> Self {
        let mut damage = self.clone();
        if damage.damage_type.is_empty() {
            damage.damage_type = default_type.to_string();
        }
        damage
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.roll)?;
        if !self.damage_type.is_empty() {
            write!(f, " {}", self.damage_type.to_lowercase())?;
        }
        if !self.condition.is_empty() {
            write!(f, " ({})", self.condition)?;
        }
        Ok(())
    }
}

/// Type of the first entry of a damage list, or empty.
pub fn default_damage_type(damages: &[Damage]) -> &str {
    damages
        .first()
        .map(|damage| damage.damage_type.as_str())
        .unwrap_or("")
}

/// A weapon, wrapping the common item state.
///
/// # Examples
///
/// ```
/// use hoardsmith::{Attribute, Damage, Weapon};
///
/// let longsword = Weapon::new("Longsword", "x2", 2)
///     .with_attributes([Attribute::Melee, Attribute::Slashing])
///     .with_damage(Damage::new("1d8", "Slashing"), Damage::new("2d8", "Slashing"));
/// assert!(!longsword.is_double_weapon());
/// assert_eq!(longsword.threat_range_description(), "19-20");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Common item state
    #[serde(flatten)]
    pub item: Item,
    /// Critical multiplier key of the primary head, such as `x2`
    pub critical_multiplier: String,
    /// Critical multiplier key of the secondary head
    #[serde(default)]
    pub secondary_critical_multiplier: String,
    /// Primary damage, first entry carries the default type
    #[serde(default)]
    pub damages: Vec<Damage>,
    /// Primary critical damage
    #[serde(default)]
    pub critical_damages: Vec<Damage>,
    /// Secondary head damage
    #[serde(default)]
    pub secondary_damages: Vec<Damage>,
    /// Secondary head critical damage
    #[serde(default)]
    pub secondary_critical_damages: Vec<Damage>,
    /// Number of natural die results that threaten a critical hit
    pub threat_range: u32,
    /// Whether the secondary head carries the special abilities too
    #[serde(default)]
    pub secondary_has_abilities: bool,
    /// Enhancement bonus of the secondary head
    #[serde(default)]
    pub secondary_magic_bonus: i32,
}

impl Weapon {
    /// Creates a weapon with no damage entries.
    pub fn new(name: impl Into<String>, critical_multiplier: impl Into<String>, threat_range: u32) -> Self {
        Self {
            item: Item::new(name, ItemType::Weapon),
            critical_multiplier: critical_multiplier.into(),
            secondary_critical_multiplier: String::new(),
            damages: Vec::new(),
            critical_damages: Vec::new(),
            secondary_damages: Vec::new(),
            secondary_critical_damages: Vec::new(),
            threat_range,
            secondary_has_abilities: false,
            secondary_magic_bonus: 0,
        }
    }

    /// Adds capability tags.
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.item.attributes.extend(attributes);
        self
    }

    /// Adds a primary damage entry and its critical counterpart.
    pub fn with_damage(mut self, damage: Damage, critical: Damage) -> Self {
        self.damages.push(damage);
        self.critical_damages.push(critical);
        self
    }

    /// Turns the weapon into a double weapon with the given secondary head.
    pub fn with_secondary(
        mut self,
        critical_multiplier: impl Into<String>,
        damage: Damage,
        critical: Damage,
    ) -> Self {
        self.item.attributes.insert(Attribute::DoubleWeapon);
        self.secondary_critical_multiplier = critical_multiplier.into();
        self.secondary_damages.push(damage);
        self.secondary_critical_damages.push(critical);
        self
    }

    /// Whether the weapon has two independently enchantable heads.
    pub fn is_double_weapon(&self) -> bool {
        self.item.has_attribute(Attribute::DoubleWeapon)
    }

    /// Threat range as die results, such as `19-20`.
    pub fn threat_range_description(&self) -> String {
        match self.threat_range {
            0 | 1 => "20".to_string(),
            range => format!("{}-20", 21 - range.min(20)),
        }
    }
}

impl Enchantable for Weapon {
    fn item(&self) -> &Item {
        &self.item
    }

    fn critical_key(&self) -> &str {
        &self.critical_multiplier
    }
}

fn join_damages(damages: &[Damage]) -> String {
    damages
        .iter()
        .map(|damage| damage.to_string())
        .collect::<Vec<_>>()
        .join(" + ")
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}/{}, crit {})",
            self.item,
            join_damages(&self.damages),
            self.threat_range_description(),
            self.critical_multiplier,
            join_damages(&self.critical_damages),
        )?;

        if self.is_double_weapon() {
            write!(
                f,
                "; secondary {} ({}, crit {})",
                join_damages(&self.secondary_damages),
                self.secondary_critical_multiplier,
                join_damages(&self.secondary_critical_damages),
            )?;
        }

        if !self.item.contents.is_empty() {
            write!(f, "; contains {}", self.item.contents.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_inherits_only_when_empty() {
        let typed = Damage::new("1d6", "Fire");
        assert_eq!(typed.inheriting("Slashing").damage_type, "Fire");

        let untyped = Damage::new("2d6", "").with_condition("against evil");
        let inherited = untyped.inheriting("Slashing");
        assert_eq!(inherited.damage_type, "Slashing");
        assert_eq!(inherited.condition, "against evil");
    }

    #[test]
    fn test_damage_display() {
        assert_eq!(Damage::new("1d6", "Fire").to_string(), "1d6 fire");
        assert_eq!(
            Damage::new("2d6", "Piercing").with_condition("against evil").to_string(),
            "2d6 piercing (against evil)"
        );
    }

    #[test]
    fn test_default_damage_type() {
        assert_eq!(default_damage_type(&[]), "");
        assert_eq!(
            default_damage_type(&[Damage::new("1d8", "Slashing"), Damage::new("1d6", "Fire")]),
            "Slashing"
        );
    }

    #[test]
    fn test_threat_range_description() {
        assert_eq!(Weapon::new("Club", "x2", 1).threat_range_description(), "20");
        assert_eq!(Weapon::new("Rapier", "x2", 3).threat_range_description(), "18-20");
        assert_eq!(Weapon::new("Keen rapier", "x2", 6).threat_range_description(), "15-20");
    }

    #[test]
    fn test_secondary_head_marks_double_weapon() {
        let weapon = Weapon::new("Two-bladed sword", "x2", 2)
            .with_damage(Damage::new("1d8", "Slashing"), Damage::new("2d8", "Slashing"))
            .with_secondary("x2", Damage::new("1d8", "Slashing"), Damage::new("2d8", "Slashing"));

        assert!(weapon.is_double_weapon());
        assert_eq!(weapon.critical_key(), "x2");
        assert_eq!(weapon.secondary_damages.len(), 1);
    }

    #[test]
    fn test_weapon_serde_flattens_item() {
        let weapon = Weapon::new("Longsword", "x2", 2)
            .with_attributes([Attribute::Melee])
            .with_damage(Damage::new("1d8", "Slashing"), Damage::new("2d8", "Slashing"));

        let json = serde_json::to_value(&weapon).unwrap();
        assert_eq!(json["name"], "Longsword");
        assert_eq!(json["damages"][0]["type"], "Slashing");

        let back: Weapon = serde_json::from_value(json).unwrap();
        assert_eq!(back, weapon);
    }
}
