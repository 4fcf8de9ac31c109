//! Game-side enumerations the scaling formulas dispatch on.

use serde::{Deserialize, Serialize};

/// Which per-level curve a spell's budget comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerScaling {
    Special8,
    Special7,
    Special6,
    Special5,
    Special4,
    Special3,
    Special2,
    Special,
    None,
    Warrior,
    Paladin,
    Hunter,
    Rogue,
    Priest,
    DeathKnight,
    Shaman,
    Mage,
    Warlock,
    Monk,
    Druid,
    DemonHunter,
}

impl PlayerScaling {
    /// Scales its item budget by the combat rating multiplier
    pub const COMBAT_RATING: PlayerScaling = PlayerScaling::Special7;
    /// Replaces its budget with the random property damage stat
    pub const DAMAGE_REPLACE: PlayerScaling = PlayerScaling::Special8;

    pub fn from_raw(value: i32) -> Option<Self> {
        use PlayerScaling::*;
        Some(match value {
            -8 => Special8,
            -7 => Special7,
            -6 => Special6,
            -5 => Special5,
            -4 => Special4,
            -3 => Special3,
            -2 => Special2,
            -1 => Special,
            0 => None,
            1 => Warrior,
            2 => Paladin,
            3 => Hunter,
            4 => Rogue,
            5 => Priest,
            6 => DeathKnight,
            7 => Shaman,
            8 => Mage,
            9 => Warlock,
            10 => Monk,
            11 => Druid,
            12 => DemonHunter,
            _ => return Option::None,
        })
    }

    pub fn raw(self) -> i32 {
        use PlayerScaling::*;
        match self {
            Special8 => -8,
            Special7 => -7,
            Special6 => -6,
            Special5 => -5,
            Special4 => -4,
            Special3 => -3,
            Special2 => -2,
            Special => -1,
            None => 0,
            Warrior => 1,
            Paladin => 2,
            Hunter => 3,
            Rogue => 4,
            Priest => 5,
            DeathKnight => 6,
            Shaman => 7,
            Mage => 8,
            Warlock => 9,
            Monk => 10,
            Druid => 11,
            DemonHunter => 12,
        }
    }

    /// Row of the spell scaling matrix: classes keep their id, special `-k`
    /// sits after the twelve classes at `12 + k`, none is row 0.
    pub fn scaling_row(self) -> usize {
        let raw = self.raw();
        if raw < 0 {
            (12 - raw) as usize
        } else {
            raw as usize
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemQuality {
    Poor,
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Artifact,
    Heirloom,
    WowToken,
    Max,
}

/// Which random property column family an item quality reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Epic,
    Rare,
    Uncommon,
}

impl ItemQuality {
    pub fn from_raw(value: i32) -> Self {
        match value {
            0 => ItemQuality::Poor,
            1 => ItemQuality::Common,
            2 => ItemQuality::Uncommon,
            3 => ItemQuality::Rare,
            4 => ItemQuality::Epic,
            5 => ItemQuality::Legendary,
            6 => ItemQuality::Artifact,
            7 => ItemQuality::Heirloom,
            8 => ItemQuality::WowToken,
            _ => ItemQuality::Max,
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            ItemQuality::Poor => 0,
            ItemQuality::Common => 1,
            ItemQuality::Uncommon => 2,
            ItemQuality::Rare => 3,
            ItemQuality::Epic => 4,
            ItemQuality::Legendary => 5,
            ItemQuality::Artifact => 6,
            ItemQuality::Heirloom => 7,
            ItemQuality::WowToken => 8,
            ItemQuality::Max => 9,
        }
    }

    pub fn budget_tier(self) -> BudgetTier {
        match self {
            ItemQuality::Epic | ItemQuality::Legendary | ItemQuality::Artifact => BudgetTier::Epic,
            ItemQuality::Rare | ItemQuality::Max => BudgetTier::Rare,
            _ => BudgetTier::Uncommon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryType {
    NonEquip,
    Head,
    Neck,
    Shoulders,
    Body,
    Chest,
    Waist,
    Legs,
    Feet,
    Wrists,
    Hands,
    Finger,
    Trinket,
    Weapon,
    Shield,
    Ranged,
    Cloak,
    TwoHandWeapon,
    Bag,
    Tabard,
    Robe,
    WeaponMainHand,
    WeaponOffHand,
    Holdable,
    Ammo,
    Thrown,
    RangedRight,
    Quiver,
    Relic,
}

impl InventoryType {
    const ORDER: [InventoryType; 29] = [
        InventoryType::NonEquip,
        InventoryType::Head,
        InventoryType::Neck,
        InventoryType::Shoulders,
        InventoryType::Body,
        InventoryType::Chest,
        InventoryType::Waist,
        InventoryType::Legs,
        InventoryType::Feet,
        InventoryType::Wrists,
        InventoryType::Hands,
        InventoryType::Finger,
        InventoryType::Trinket,
        InventoryType::Weapon,
        InventoryType::Shield,
        InventoryType::Ranged,
        InventoryType::Cloak,
        InventoryType::TwoHandWeapon,
        InventoryType::Bag,
        InventoryType::Tabard,
        InventoryType::Robe,
        InventoryType::WeaponMainHand,
        InventoryType::WeaponOffHand,
        InventoryType::Holdable,
        InventoryType::Ammo,
        InventoryType::Thrown,
        InventoryType::RangedRight,
        InventoryType::Quiver,
        InventoryType::Relic,
    ];

    /// Unknown values read as not equippable
    pub fn from_raw(value: i32) -> Self {
        usize::try_from(value)
            .ok()
            .and_then(|i| Self::ORDER.get(i).copied())
            .unwrap_or(InventoryType::NonEquip)
    }

    pub fn raw(self) -> i32 {
        Self::ORDER
            .iter()
            .position(|t| *t == self)
            .map(|i| i as i32)
            .unwrap_or(0)
    }

    pub fn combat_rating_type(self) -> CombatRatingMultiplierType {
        use InventoryType::*;
        match self {
            Neck | Finger => CombatRatingMultiplierType::Jewellery,
            Trinket => CombatRatingMultiplierType::Trinket,
            Weapon | TwoHandWeapon | WeaponMainHand | WeaponOffHand | Ranged | RangedRight
            | Thrown => CombatRatingMultiplierType::Weapon,
            Head | Shoulders | Chest | Waist | Legs | Feet | Wrists | Hands | Cloak | Shield
            | Robe | Holdable => CombatRatingMultiplierType::Armor,
            _ => CombatRatingMultiplierType::Invalid,
        }
    }
}

/// Row selector for the combat rating and stamina multiplier matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatRatingMultiplierType {
    Armor,
    Weapon,
    Trinket,
    Jewellery,
    Invalid,
}

impl CombatRatingMultiplierType {
    pub fn row(self) -> Option<usize> {
        match self {
            CombatRatingMultiplierType::Armor => Some(0),
            CombatRatingMultiplierType::Weapon => Some(1),
            CombatRatingMultiplierType::Trinket => Some(2),
            CombatRatingMultiplierType::Jewellery => Some(3),
            CombatRatingMultiplierType::Invalid => None,
        }
    }
}

pub const ITEM_CLASS_WEAPON: i32 = 2;
pub const ITEM_CLASS_ARMOR: i32 = 4;

pub const WEAPON_SUBCLASS_AXE_2H: i32 = 1;
pub const WEAPON_SUBCLASS_BOW: i32 = 2;
pub const WEAPON_SUBCLASS_GUN: i32 = 3;
pub const WEAPON_SUBCLASS_MACE_2H: i32 = 5;
pub const WEAPON_SUBCLASS_POLEARM: i32 = 6;
pub const WEAPON_SUBCLASS_SWORD_2H: i32 = 8;
pub const WEAPON_SUBCLASS_STAFF: i32 = 10;
pub const WEAPON_SUBCLASS_THROWN: i32 = 16;
pub const WEAPON_SUBCLASS_CROSSBOW: i32 = 18;

/// Spell attribute bit marking item-level scaled spells
pub const SX_SCALE_ILEVEL: u32 = 354;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemBonusType {
    Ilevel,
    Mod,
    Quality,
    Socket,
    AddItemEffect,
    Unknown(i32),
}

impl ItemBonusType {
    pub fn from_raw(value: i32) -> Self {
        match value {
            1 => ItemBonusType::Ilevel,
            2 => ItemBonusType::Mod,
            3 => ItemBonusType::Quality,
            6 => ItemBonusType::Socket,
            23 => ItemBonusType::AddItemEffect,
            other => ItemBonusType::Unknown(other),
        }
    }
}

/// Stat carried by an item mod, kept open because new ids appear with
/// every client build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemModType(pub i32);

impl ItemModType {
    pub const AGILITY: ItemModType = ItemModType(3);
    pub const STRENGTH: ItemModType = ItemModType(4);
    pub const INTELLECT: ItemModType = ItemModType(5);
    pub const STAMINA: ItemModType = ItemModType(7);
    pub const DODGE_RATING: ItemModType = ItemModType(13);
    pub const PARRY_RATING: ItemModType = ItemModType(14);
    pub const BLOCK_RATING: ItemModType = ItemModType(15);
    pub const HIT_RATING: ItemModType = ItemModType(31);
    pub const CRIT_RATING: ItemModType = ItemModType(32);
    pub const HASTE_RATING: ItemModType = ItemModType(36);
    pub const EXPERTISE_RATING: ItemModType = ItemModType(37);
    pub const VERSATILITY_RATING: ItemModType = ItemModType(40);
    pub const MASTERY_RATING: ItemModType = ItemModType(49);
    pub const SPEED_RATING: ItemModType = ItemModType(61);
    pub const LEECH_RATING: ItemModType = ItemModType(62);
    pub const AVOIDANCE_RATING: ItemModType = ItemModType(63);
    pub const STRENGTH_AGILITY_INTELLECT: ItemModType = ItemModType(71);

    pub fn is_combat_rating(self) -> bool {
        matches!(
            self,
            ItemModType::DODGE_RATING
                | ItemModType::PARRY_RATING
                | ItemModType::BLOCK_RATING
                | ItemModType::HIT_RATING
                | ItemModType::CRIT_RATING
                | ItemModType::HASTE_RATING
                | ItemModType::EXPERTISE_RATING
                | ItemModType::VERSATILITY_RATING
                | ItemModType::MASTERY_RATING
                | ItemModType::SPEED_RATING
                | ItemModType::LEECH_RATING
                | ItemModType::AVOIDANCE_RATING
        )
    }
}

/// Socket colour ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocketColor(pub i32);

impl SocketColor {
    pub const NONE: SocketColor = SocketColor(0);
    pub const META: SocketColor = SocketColor(1);
    pub const RED: SocketColor = SocketColor(2);
    pub const YELLOW: SocketColor = SocketColor(4);
    pub const BLUE: SocketColor = SocketColor(8);
    pub const PRISMATIC: SocketColor = SocketColor(14);

    pub fn is_empty(self) -> bool {
        self == SocketColor::NONE
    }
}

/// What an RPPM modifier row scales the proc rate by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RppmModifierType {
    Haste,
    Crit,
    Class,
    Spec,
    Race,
    ItemLevel,
    Unknown(i32),
}

impl RppmModifierType {
    pub fn from_raw(value: i32) -> Self {
        match value {
            1 => RppmModifierType::Haste,
            2 => RppmModifierType::Crit,
            3 => RppmModifierType::Class,
            4 => RppmModifierType::Spec,
            5 => RppmModifierType::Race,
            6 => RppmModifierType::ItemLevel,
            other => RppmModifierType::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_scaling_is_bijective() {
        let mut rows = std::collections::HashSet::new();
        for raw in -8..=12 {
            let tag = PlayerScaling::from_raw(raw).unwrap();
            assert_eq!(tag.raw(), raw);
            assert!(rows.insert(tag.scaling_row()));
        }
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().all(|r| *r < 21));
        assert!(PlayerScaling::from_raw(13).is_none());
        assert!(PlayerScaling::from_raw(-9).is_none());
    }

    #[test]
    fn test_scaling_rows() {
        assert_eq!(PlayerScaling::None.scaling_row(), 0);
        assert_eq!(PlayerScaling::DemonHunter.scaling_row(), 12);
        assert_eq!(PlayerScaling::Special.scaling_row(), 13);
        assert_eq!(PlayerScaling::Special8.scaling_row(), 20);
    }

    #[test]
    fn test_quality_buckets() {
        assert_eq!(ItemQuality::Legendary.budget_tier(), BudgetTier::Epic);
        assert_eq!(ItemQuality::Artifact.budget_tier(), BudgetTier::Epic);
        assert_eq!(ItemQuality::Max.budget_tier(), BudgetTier::Rare);
        assert_eq!(ItemQuality::Heirloom.budget_tier(), BudgetTier::Uncommon);
        assert_eq!(ItemQuality::from_raw(42), ItemQuality::Max);
    }

    #[test]
    fn test_inventory_type_round_trip() {
        for raw in 0..=28 {
            assert_eq!(InventoryType::from_raw(raw).raw(), raw);
        }
        assert_eq!(InventoryType::from_raw(99), InventoryType::NonEquip);
    }

    #[test]
    fn test_combat_rating_categories() {
        assert_eq!(
            InventoryType::Trinket.combat_rating_type(),
            CombatRatingMultiplierType::Trinket
        );
        assert_eq!(
            InventoryType::Finger.combat_rating_type(),
            CombatRatingMultiplierType::Jewellery
        );
        assert_eq!(
            InventoryType::TwoHandWeapon.combat_rating_type().row(),
            Some(1)
        );
        assert_eq!(InventoryType::Bag.combat_rating_type().row(), None);
    }

    #[test]
    fn test_combat_rating_stats() {
        assert!(ItemModType::HASTE_RATING.is_combat_rating());
        assert!(!ItemModType::STAMINA.is_combat_rating());
        assert!(!ItemModType::INTELLECT.is_combat_rating());
    }
}
