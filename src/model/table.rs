use serde::{Deserialize, Serialize};

use super::raw::*;
use crate::error::{Error, Result};

/// One decoded table, in the shape its file type produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Table {
    Items(Vec<RawItem>),
    Spells(Vec<RawSpell>),
    ItemBonuses(Vec<RawItemBonus>),
    ItemEnchantments(Vec<RawItemEnchantment>),
    GemProperties(Vec<RawGemProperty>),
    CurvePoints(Vec<RawCurvePoint>),
    RppmModifiers(Vec<RawRppmEntry>),
    ConduitRanks(Vec<RawSpellConduitRankEntry>),
    Traits(Vec<RawTrait>),
    RandomProps(Vec<RawRandomPropData>),
    CombatRatingMultipliers(MultiplierTable),
    StaminaMultipliers(MultiplierTable),
    SpellScaling(SpellScalingTable),
    Version(String),
}

macro_rules! table_accessor {
    ($fn_name:ident, $variant:ident, $ty:ty, $label:literal) => {
        pub fn $fn_name(&self) -> Result<&$ty> {
            match self {
                Table::$variant(inner) => Ok(inner),
                other => Err(Error::TableMismatch {
                    expected: $label,
                    found: other.kind(),
                }),
            }
        }
    };
}

impl Table {
    pub fn kind(&self) -> &'static str {
        match self {
            Table::Items(_) => "items",
            Table::Spells(_) => "spells",
            Table::ItemBonuses(_) => "item bonuses",
            Table::ItemEnchantments(_) => "item enchantments",
            Table::GemProperties(_) => "gem properties",
            Table::CurvePoints(_) => "curve points",
            Table::RppmModifiers(_) => "rppm modifiers",
            Table::ConduitRanks(_) => "conduit ranks",
            Table::Traits(_) => "traits",
            Table::RandomProps(_) => "random properties",
            Table::CombatRatingMultipliers(_) => "combat rating multipliers",
            Table::StaminaMultipliers(_) => "stamina multipliers",
            Table::SpellScaling(_) => "spell scaling",
            Table::Version(_) => "version",
        }
    }

    /// Number of rows, for logging
    pub fn len(&self) -> usize {
        match self {
            Table::Items(v) => v.len(),
            Table::Spells(v) => v.len(),
            Table::ItemBonuses(v) => v.len(),
            Table::ItemEnchantments(v) => v.len(),
            Table::GemProperties(v) => v.len(),
            Table::CurvePoints(v) => v.len(),
            Table::RppmModifiers(v) => v.len(),
            Table::ConduitRanks(v) => v.len(),
            Table::Traits(v) => v.len(),
            Table::RandomProps(v) => v.len(),
            Table::CombatRatingMultipliers(t) | Table::StaminaMultipliers(t) => t.rows.len(),
            Table::SpellScaling(t) => t.rows.len(),
            Table::Version(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    table_accessor!(items, Items, Vec<RawItem>, "items");
    table_accessor!(spells, Spells, Vec<RawSpell>, "spells");
    table_accessor!(item_bonuses, ItemBonuses, Vec<RawItemBonus>, "item bonuses");
    table_accessor!(
        item_enchantments,
        ItemEnchantments,
        Vec<RawItemEnchantment>,
        "item enchantments"
    );
    table_accessor!(gem_properties, GemProperties, Vec<RawGemProperty>, "gem properties");
    table_accessor!(curve_points, CurvePoints, Vec<RawCurvePoint>, "curve points");
    table_accessor!(rppm_modifiers, RppmModifiers, Vec<RawRppmEntry>, "rppm modifiers");
    table_accessor!(
        conduit_ranks,
        ConduitRanks,
        Vec<RawSpellConduitRankEntry>,
        "conduit ranks"
    );
    table_accessor!(traits, Traits, Vec<RawTrait>, "traits");
    table_accessor!(random_props, RandomProps, Vec<RawRandomPropData>, "random properties");
    table_accessor!(
        combat_rating_multipliers,
        CombatRatingMultipliers,
        MultiplierTable,
        "combat rating multipliers"
    );
    table_accessor!(
        stamina_multipliers,
        StaminaMultipliers,
        MultiplierTable,
        "stamina multipliers"
    );
    table_accessor!(spell_scaling, SpellScaling, SpellScalingTable, "spell scaling");
    table_accessor!(version, Version, String, "version");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_mismatch() {
        let table = Table::Version("9.0.2.36401".into());
        assert_eq!(table.version().unwrap(), "9.0.2.36401");
        let err = table.items().unwrap_err();
        assert!(matches!(
            err,
            Error::TableMismatch {
                expected: "items",
                found: "version"
            }
        ));
    }
}
