//! Row layouts for every generated dump the decoder understands.
//!
//! Each layout lists the struct fields in upstream order. Decoders only ever
//! address fields by these names, so a field reorder in a new client build is
//! fixed here and nowhere else.

use super::types::*;

// =============================================================================
// Item dumps
// =============================================================================

pub static ITEM_MOD: RowLayout = RowLayout {
    entity: "item mod",
    region: Region::Lead,
    named: false,
    columns: &["mod_type", "stat_allocation", "socket_multiplier"],
    parts: PartCount::AtLeast(4),
};

pub static ITEM: RowLayout = RowLayout {
    entity: "item",
    region: Region::Tail,
    named: true,
    columns: &[
        "id",
        "flags_1",
        "flags_2",
        "type_flags",
        "level",
        "req_level",
        "req_skill",
        "req_skill_level",
        "quality",
        "inventory_type",
        "item_class",
        "item_subclass",
        "bind_type",
        "delay",
        "dmg_range",
        "item_modifier",
        "dbc_stats",
        "dbc_stats_count",
        "class_mask",
        "race_mask",
        "socket_color_1",
        "socket_color_2",
        "socket_color_3",
        "gem_properties",
        "id_socket_bonus",
        "id_set",
        "id_curve",
        "id_artifact",
    ],
    parts: PartCount::AtLeast(29),
};

pub static ITEM_EFFECT: RowLayout = RowLayout {
    entity: "item effect",
    region: Region::Lead,
    named: false,
    columns: &[
        "id",
        "spell_id",
        "item_id",
        "index",
        "type",
        "cooldown_group",
        "cooldown_duration",
        "cooldown_group_duration",
    ],
    parts: PartCount::AtLeast(9),
};

pub static ITEM_BONUS: RowLayout = RowLayout {
    entity: "item bonus",
    region: Region::Lead,
    named: false,
    columns: &[
        "id", "bonus_id", "type", "value_1", "value_2", "value_3", "value_4", "index",
    ],
    parts: PartCount::AtLeast(9),
};

pub static ITEM_ENCHANTMENT: RowLayout = RowLayout {
    entity: "item enchantment",
    region: Region::Lead,
    named: true,
    columns: &[
        "id",
        "slot",
        "gem_id",
        "scaling_id",
        "min_scaling_level",
        "max_scaling_level",
        "min_item_level",
        "max_item_level",
        "req_skill",
        "req_skill_value",
        "type_1",
        "type_2",
        "type_3",
        "amount_1",
        "amount_2",
        "amount_3",
        "property_1",
        "property_2",
        "property_3",
        "coefficient_1",
        "coefficient_2",
        "coefficient_3",
        "spell_id",
    ],
    parts: PartCount::AtLeast(24),
};

pub static GEM_PROPERTY: RowLayout = RowLayout {
    entity: "gem property",
    region: Region::Lead,
    named: false,
    columns: &["id", "enchant_id", "color", "min_item_level"],
    parts: PartCount::AtLeast(5),
};

pub static RANDOM_PROP: RowLayout = RowLayout {
    entity: "random property",
    region: Region::Lead,
    named: false,
    columns: &[
        "item_level",
        "damage_replace_stat",
        "damage_secondary",
        "epic_1",
        "epic_2",
        "epic_3",
        "epic_4",
        "epic_5",
        "rare_1",
        "rare_2",
        "rare_3",
        "rare_4",
        "rare_5",
        "uncommon_1",
        "uncommon_2",
        "uncommon_3",
        "uncommon_4",
        "uncommon_5",
    ],
    parts: PartCount::AtLeast(19),
};

pub static CURVE_POINT: RowLayout = RowLayout {
    entity: "curve point",
    region: Region::Lead,
    named: false,
    columns: &[
        "curve_id",
        "index",
        "primary_1",
        "primary_2",
        "secondary_1",
        "secondary_2",
    ],
    parts: PartCount::Exactly(7),
};

// =============================================================================
// Spell dumps
// =============================================================================

pub static SPELL: RowLayout = RowLayout {
    entity: "spell",
    region: Region::Tail,
    named: true,
    columns: &[
        "id",
        "school",
        "proj_speed",
        "race_mask",
        "class_mask",
        "scaling_type",
        "max_scaling_level",
        "spell_level",
        "max_level",
        "req_max_level",
        "min_range",
        "max_range",
        "cooldown",
        "gcd",
        "category_cooldown",
        "charges",
        "charge_cooldown",
        "category",
        "dmg_class",
        "max_targets",
        "duration",
        "max_stack",
        "proc_chance",
        "proc_charges",
        "proc_flags",
        "internal_cooldown",
        "rppm",
        "equip_class",
        "equip_imask",
        "equip_scmask",
        "cast_time",
        "attribute_1",
        "attribute_2",
        "attribute_3",
        "attribute_4",
        "attribute_5",
        "attribute_6",
        "attribute_7",
        "attribute_8",
        "attribute_9",
        "attribute_10",
        "attribute_11",
        "attribute_12",
        "attribute_13",
        "attribute_14",
        "attribute_15",
        "class_flags_1",
        "class_flags_2",
        "class_flags_3",
        "class_flags_4",
        "class_flags_family",
        "stance_mask",
        "mechanic",
        "power_id",
        "essence_id",
        "effects_count",
        "power_count",
        "driver_count",
    ],
    parts: PartCount::AtLeast(20),
};

pub static SPELL_EFFECT: RowLayout = RowLayout {
    entity: "spell effect",
    region: Region::Lead,
    named: false,
    columns: &[
        "id",
        "spell_id",
        "index",
        "type",
        "subtype",
        "coefficient",
        "delta",
        "bonus",
        "sp_coefficient",
        "ap_coefficient",
        "amplitude",
        "radius",
        "radius_max",
        "base_value",
        "misc_value_1",
        "misc_value_2",
        "class_flags_1",
        "class_flags_2",
        "class_flags_3",
        "class_flags_4",
        "trigger_spell",
        "chain_multiplier",
        "points_per_combo_point",
        "points_per_level",
        "damage_multiplier",
        "chain_target",
        "target_1",
        "target_2",
        "value",
        "pvp_coefficient",
        "mechanic",
        "effect_attributes",
        "resource_coefficient",
        "chain_amplitude",
    ],
    parts: PartCount::Exactly(35),
};

pub static SPELL_POWER: RowLayout = RowLayout {
    entity: "spell power",
    region: Region::Lead,
    named: false,
    columns: &[
        "id",
        "spell_id",
        "aura_id",
        "power_type",
        "cost",
        "cost_max",
        "cost_per_tick",
        "pct_cost",
        "pct_cost_max",
        "pct_cost_per_tick",
    ],
    parts: PartCount::Exactly(11),
};

pub static RPPM_MODIFIER: RowLayout = RowLayout {
    entity: "rppm modifier",
    region: Region::Lead,
    named: false,
    columns: &["spell_id", "modifier_type", "type", "coefficient"],
    parts: PartCount::Exactly(5),
};

// =============================================================================
// Marker-framed dumps
// =============================================================================

pub static CONDUIT_RANK: RowLayout = RowLayout {
    entity: "conduit rank",
    region: Region::Lead,
    named: false,
    columns: &["conduit_id", "rank", "spell_id", "value"],
    parts: PartCount::Exactly(5),
};

pub static TRAIT: RowLayout = RowLayout {
    entity: "trait",
    region: Region::Lead,
    named: true,
    columns: &[
        "tree_index",
        "class_id",
        "id_trait_node_entry",
        "id_node",
        "max_ranks",
        "req_points",
        "id_trait_definition",
        "id_spell",
        "id_replace_spell",
        "id_override_spell",
        "row",
        "column",
        "selection_index",
        "id_spec_1",
        "id_spec_2",
        "id_spec_3",
        "id_spec_4",
        "id_spec_starter_1",
        "id_spec_starter_2",
        "id_spec_starter_3",
        "id_spec_starter_4",
    ],
    parts: PartCount::Exactly(22),
};

pub const CONDUIT_RANK_MARKER: &str = "__conduit_rank_data {";
pub const TRAIT_MARKER: &str = "__trait_data_data { {";
pub const SPELL_SCALING_MARKER: &str = "__spell_scaling[][80] = {";
pub const COMBAT_RATING_ARRAY: &str = "__combat_ratings_mult_by_ilvl";
pub const STAMINA_ARRAY: &str = "__stamina_mult_by_ilvl";
pub const VERSION_DEFINE: &str = "CLIENT_DATA_WOW_VERSION";

/// Item-level columns in each multiplier matrix
pub const MULTIPLIER_COLUMNS: usize = 1300;
/// Rows in each multiplier matrix (armor, weapon, trinket, jewellery)
pub const MULTIPLIER_ROWS: usize = 4;
/// Player-level columns in the spell scaling matrix
pub const SPELL_SCALING_COLUMNS: usize = 80;
/// Scaling-class rows in the spell scaling matrix
pub const SPELL_SCALING_ROWS: usize = 21;

/// All line-decoded layouts, for diagnostics
pub static ALL_LAYOUTS: &[&RowLayout] = &[
    &ITEM_MOD,
    &ITEM,
    &ITEM_EFFECT,
    &ITEM_BONUS,
    &ITEM_ENCHANTMENT,
    &GEM_PROPERTY,
    &RANDOM_PROP,
    &CURVE_POINT,
    &SPELL,
    &SPELL_EFFECT,
    &SPELL_POWER,
    &RPPM_MODIFIER,
    &CONDUIT_RANK,
    &TRAIT,
];

/// Get a layout by entity name
pub fn get_layout(entity: &str) -> Option<&'static RowLayout> {
    ALL_LAYOUTS.iter().find(|l| l.entity == entity).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_counts_cover_columns() {
        for layout in ALL_LAYOUTS {
            let required = match layout.parts {
                PartCount::AtLeast(n) | PartCount::Exactly(n) => n,
            };
            // the trailing slot after the final comma is part of the count
            if layout.region == Region::Lead {
                assert!(
                    required >= layout.columns.len(),
                    "{} requires fewer parts than it has columns",
                    layout.entity
                );
            }
        }
    }

    #[test]
    fn test_exact_shapes_are_distinct() {
        assert_eq!(SPELL_EFFECT.columns.len() + 1, 35);
        assert_eq!(SPELL_POWER.columns.len() + 1, 11);
        assert_eq!(CURVE_POINT.columns.len() + 1, 7);
        assert_eq!(TRAIT.columns.len() + 1, 22);
    }

    #[test]
    fn test_get_layout() {
        assert_eq!(get_layout("spell effect").unwrap().position("trigger_spell"), Some(20));
        assert!(get_layout("nonexistent").is_none());
    }
}
