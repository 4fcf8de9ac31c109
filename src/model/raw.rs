//! Decoded rows, one struct per upstream table struct.

use serde::{Deserialize, Serialize};

use crate::schema::{
    MULTIPLIER_COLUMNS, MULTIPLIER_ROWS, SPELL_SCALING_COLUMNS, SPELL_SCALING_ROWS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItemMod {
    pub mod_type: i32,
    pub stat_allocation: i32,
    pub socket_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItemEffect {
    pub id: u32,
    pub spell_id: u32,
    pub item_id: u32,
    pub index: u32,
    pub effect_type: i32,
    pub cooldown_group: i32,
    pub cooldown_duration: i32,
    pub cooldown_group_duration: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub id: u32,
    pub name: String,
    pub flags_1: u32,
    pub flags_2: u32,
    pub item_level: i32,
    pub required_level: i32,
    pub required_skill: i32,
    pub required_skill_level: i32,
    pub quality: i32,
    pub inventory_type: i32,
    pub item_class: i32,
    pub item_subclass: i32,
    pub bind_type: i32,
    pub delay: f64,
    pub dmg_range: f64,
    pub item_modifier: f64,
    /// Offset into the item mod table, 0 when the item has no stats
    pub dbc_stats: u32,
    pub dbc_stats_count: u32,
    pub class_mask: u32,
    pub race_mask: u64,
    pub socket_colours: [i32; 3],
    pub gem_properties: u32,
    pub socket_bonus_id: u32,
    pub set_id: u32,
    pub curve_id: u32,
    pub artifact_id: u32,
    pub mods: Vec<RawItemMod>,
    pub effects: Vec<RawItemEffect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpellEffect {
    pub id: u32,
    pub spell_id: u32,
    pub effect_index: u32,
    pub effect_type: u32,
    pub effect_subtype: u32,
    pub coefficient: f64,
    pub delta: f64,
    pub bonus_coefficient: f64,
    pub sp_coefficient: f64,
    pub ap_coefficient: f64,
    pub amplitude: f64,
    pub radius: f64,
    pub radius_max: f64,
    pub base_value: f64,
    pub misc_value_1: i32,
    pub misc_value_2: i32,
    pub class_flags: [u32; 4],
    pub trigger_spell_id: u32,
    pub chain_multiplier: f64,
    pub points_per_combo_point: f64,
    pub points_per_level: f64,
    pub damage_multiplier: f64,
    pub chain_target: u32,
    pub target_1: u32,
    pub target_2: u32,
    pub value: f64,
    pub pvp_coefficient: f64,
    pub mechanic: u32,
    pub effect_attributes: u32,
    pub resource_coefficient: f64,
    pub chain_amplitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpellPower {
    pub id: u32,
    pub spell_id: u32,
    pub aura_id: u32,
    pub power_type: i32,
    pub cost: i32,
    pub cost_max: i32,
    pub cost_per_tick: i32,
    pub percent_cost: f64,
    pub percent_cost_max: f64,
    pub percent_cost_per_tick: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpell {
    pub id: u32,
    pub name: String,
    pub school: u32,
    pub projectile_speed: f64,
    pub race_mask: u64,
    pub class_mask: u32,
    pub scaling_type: i32,
    pub max_scaling_level: i32,
    pub spell_level: u32,
    pub max_level: u32,
    pub req_max_level: u32,
    pub min_range: f64,
    pub max_range: f64,
    pub cooldown: u32,
    pub gcd: u32,
    pub category_cooldown: u32,
    pub charges: u32,
    pub charge_cooldown: u32,
    pub category: u32,
    pub dmg_class: u32,
    pub max_targets: i32,
    pub duration: f64,
    pub max_stacks: u32,
    pub proc_chance: u32,
    pub proc_charges: i32,
    pub proc_flags: u64,
    pub internal_cooldown: u32,
    pub rppm: f64,
    pub equip_class: u32,
    pub equip_inv_type_mask: u32,
    pub equip_subclass_mask: u32,
    pub cast_time: i32,
    pub attributes: Vec<u32>,
    pub class_flags: [u32; 4],
    pub class_flags_family: u32,
    pub stance_mask: u32,
    pub mechanic: u32,
    pub power_id: u32,
    pub essence_id: u32,
    pub effects: Vec<RawSpellEffect>,
    pub powers: Vec<RawSpellPower>,
}

impl RawSpell {
    /// Test one bit of the flattened attribute array
    pub fn has_attribute(&self, bit: u32) -> bool {
        let word = (bit / 32) as usize;
        self.attributes
            .get(word)
            .map(|w| w & (1 << (bit % 32)) != 0)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItemBonus {
    pub id: u32,
    pub bonus_id: u32,
    pub bonus_type: i32,
    pub value_1: i32,
    pub value_2: i32,
    pub value_3: i32,
    pub value_4: i32,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItemEnchantment {
    pub id: u32,
    pub name: String,
    pub slot: u32,
    pub gem_id: u32,
    pub scaling_id: i32,
    pub min_scaling_level: u32,
    pub max_scaling_level: u32,
    pub min_item_level: u32,
    pub max_item_level: u32,
    pub req_skill: u32,
    pub req_skill_value: u32,
    pub sub_enchantments: [RawSubEnchantment; 3],
    pub spell_id: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSubEnchantment {
    pub enchant_type: u32,
    pub amount: i32,
    pub property: i32,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGemProperty {
    pub id: u32,
    pub enchant_id: u32,
    pub colour: i32,
    pub min_item_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCurvePoint {
    pub curve_id: u32,
    pub index: u32,
    pub primary_1: f64,
    pub primary_2: f64,
    pub secondary_1: f64,
    pub secondary_2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRppmEntry {
    pub spell_id: u32,
    pub modifier_type: i32,
    pub modifier_value: u32,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpellConduitRankEntry {
    pub conduit_id: u32,
    pub rank: u32,
    pub spell_id: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrait {
    pub tree_index: u32,
    pub class_id: u32,
    pub trait_node_entry_id: u32,
    pub node_id: u32,
    pub max_ranks: u32,
    pub required_points: u32,
    pub trait_definition_id: u32,
    pub spell_id: u32,
    pub replace_spell_id: u32,
    pub override_spell_id: u32,
    pub row: i32,
    pub column: i32,
    pub selection_index: i32,
    pub name: String,
    pub spec_ids: [u32; 4],
    pub starter_spec_ids: [u32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRandomPropData {
    pub item_level: u32,
    pub damage_replace_stat: f64,
    pub damage_secondary: f64,
    pub epic: [f64; 5],
    pub rare: [f64; 5],
    pub uncommon: [f64; 5],
}

/// Multiplier by (row, item level), stored 0-indexed by item level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTable {
    pub rows: Vec<Vec<f64>>,
}

impl MultiplierTable {
    pub fn empty() -> Self {
        Self {
            rows: vec![vec![0.0; MULTIPLIER_COLUMNS]; MULTIPLIER_ROWS],
        }
    }

    /// Multiplier for a 1-indexed item level
    pub fn value(&self, row: usize, item_level: u32) -> Option<f64> {
        let column = (item_level as usize).checked_sub(1)?;
        self.rows.get(row)?.get(column).copied()
    }
}

/// Spell budget by (scaling row, player level), stored 0-indexed by level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellScalingTable {
    pub rows: Vec<Vec<f64>>,
}

impl SpellScalingTable {
    pub fn empty() -> Self {
        Self {
            rows: vec![vec![0.0; SPELL_SCALING_COLUMNS]; SPELL_SCALING_ROWS],
        }
    }

    /// Budget for a 1-indexed player level
    pub fn value(&self, row: usize, level: u32) -> Option<f64> {
        let column = (level as usize).checked_sub(1)?;
        self.rows.get(row)?.get(column).copied()
    }
}
