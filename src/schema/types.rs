use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::Error;

/// Item ids below this live in the legacy half of the combined item dump.
pub const LEGACY_ITEM_ID_CEILING: u32 = 180_000;

/// Every table the decoder can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileType {
    ItemDataNew,
    ItemDataOld,
    SpellData,
    ItemBonusData,
    ItemEnchantData,
    GemData,
    CurvePoints,
    RppmData,
    CovenantData,
    TraitData,
    RandPropPoints,
    CombatRatingMultipliers,
    StaminaMultipliers,
    SpellScaling,
    GameDataVersion,
}

impl FileType {
    pub const ALL: &'static [FileType] = &[
        FileType::ItemDataNew,
        FileType::ItemDataOld,
        FileType::SpellData,
        FileType::ItemBonusData,
        FileType::ItemEnchantData,
        FileType::GemData,
        FileType::CurvePoints,
        FileType::RppmData,
        FileType::CovenantData,
        FileType::TraitData,
        FileType::RandPropPoints,
        FileType::CombatRatingMultipliers,
        FileType::StaminaMultipliers,
        FileType::SpellScaling,
        FileType::GameDataVersion,
    ];

    /// Name used on the command line and for parsed cache files
    pub fn name(self) -> &'static str {
        match self {
            FileType::ItemDataNew => "item-data-new",
            FileType::ItemDataOld => "item-data-old",
            FileType::SpellData => "spell-data",
            FileType::ItemBonusData => "item-bonus",
            FileType::ItemEnchantData => "item-enchant",
            FileType::GemData => "gem-data",
            FileType::CurvePoints => "curve-points",
            FileType::RppmData => "rppm-data",
            FileType::CovenantData => "conduit-ranks",
            FileType::TraitData => "trait-data",
            FileType::RandPropPoints => "rand-prop-points",
            FileType::CombatRatingMultipliers => "combat-rating-mult",
            FileType::StaminaMultipliers => "stamina-mult",
            FileType::SpellScaling => "spell-scaling",
            FileType::GameDataVersion => "version",
        }
    }

    /// Raw dumps (file names under `engine/dbc/generated`) this table is built from.
    /// The first entry is the primary dump.
    pub fn source_files(self) -> &'static [&'static str] {
        match self {
            FileType::ItemDataNew | FileType::ItemDataOld => &["item_data.inc", "item_effect.inc"],
            FileType::SpellData => &["sc_spell_data.inc"],
            FileType::ItemBonusData => &["item_bonus.inc"],
            FileType::ItemEnchantData => &["spell_item_enchantment.inc"],
            FileType::GemData => &["gem_properties.inc"],
            FileType::CurvePoints => &["curve_point.inc"],
            FileType::RppmData => &["real_ppm.inc"],
            FileType::CovenantData => &["covenant_data.inc"],
            FileType::TraitData => &["trait_data.inc"],
            FileType::RandPropPoints => &["rand_prop_points.inc"],
            FileType::CombatRatingMultipliers
            | FileType::StaminaMultipliers
            | FileType::SpellScaling => &["sc_scale_data.inc"],
            FileType::GameDataVersion => &["client_data_version.inc"],
        }
    }

    /// Inclusive item-id window for the two halves of the item dump
    pub fn item_id_range(self) -> Option<RangeInclusive<u32>> {
        match self {
            FileType::ItemDataNew => Some(LEGACY_ITEM_ID_CEILING..=u32::MAX),
            FileType::ItemDataOld => Some(0..=LEGACY_ITEM_ID_CEILING - 1),
            _ => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or_else(|| Error::UnsupportedFileType(s.to_string()))
    }
}

/// Which part of a split line a layout reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Parts before the first quote (the whole line when unquoted)
    Lead,
    /// Parts after the last quote
    Tail,
}

/// How many parts a row of this kind must split into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartCount {
    AtLeast(usize),
    Exactly(usize),
}

impl PartCount {
    pub fn accepts(self, parts: usize) -> bool {
        match self {
            PartCount::AtLeast(n) => parts >= n,
            PartCount::Exactly(n) => parts == n,
        }
    }
}

/// Positional layout of one upstream struct
#[derive(Debug, Clone)]
pub struct RowLayout {
    /// Entity name used in error messages
    pub entity: &'static str,
    pub region: Region,
    /// Whether rows carry a quoted name
    pub named: bool,
    pub columns: &'static [&'static str],
    pub parts: PartCount,
}

impl RowLayout {
    /// Position of a named column
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_names_round_trip() {
        for ft in FileType::ALL {
            assert_eq!(ft.name().parse::<FileType>().unwrap(), *ft);
        }
    }

    #[test]
    fn test_unknown_file_type_error() {
        let err = "item-sparse".parse::<FileType>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(ref s) if s == "item-sparse"));
    }

    #[test]
    fn test_item_ranges_split_at_ceiling() {
        let new = FileType::ItemDataNew.item_id_range().unwrap();
        let old = FileType::ItemDataOld.item_id_range().unwrap();
        assert!(new.contains(&LEGACY_ITEM_ID_CEILING));
        assert!(!old.contains(&LEGACY_ITEM_ID_CEILING));
        assert!(old.contains(&(LEGACY_ITEM_ID_CEILING - 1)));
        assert!(FileType::SpellData.item_id_range().is_none());
    }
}
