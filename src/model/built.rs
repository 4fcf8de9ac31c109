//! Fully scaled items and spells handed back to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schema::{InventoryType, ItemModType, ItemQuality, SocketColor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimcItem {
    pub id: u32,
    pub name: String,
    pub item_level: i32,
    pub quality: ItemQuality,
    pub inventory_type: InventoryType,
    pub item_class: i32,
    pub item_subclass: i32,
    pub enchant_id: u32,
    pub equipped: bool,
    pub sockets: Vec<SocketColor>,
    pub mods: Vec<SimcItemMod>,
    pub gems: Vec<SimcItemGem>,
    pub effects: Vec<SimcItemEffect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimcItemMod {
    pub mod_type: ItemModType,
    pub raw_allocation: i32,
    pub stat_rating: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimcItemGem {
    pub gem_id: u32,
    pub enchant_id: u32,
    pub stat_type: ItemModType,
    pub stat_rating: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimcItemEffect {
    pub effect_id: u32,
    pub effect_type: i32,
    pub cooldown_group: i32,
    pub cooldown_duration: i32,
    pub cooldown_group_duration: i32,
    pub spell: SimcSpell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimcSpell {
    pub id: u32,
    pub name: String,
    pub school: u32,
    pub scaling_type: i32,
    pub max_scaling_level: i32,
    pub min_range: f64,
    pub max_range: f64,
    pub cooldown: u32,
    pub gcd: u32,
    pub category_cooldown: u32,
    pub charges: u32,
    pub charge_cooldown: u32,
    pub max_targets: i32,
    pub duration: f64,
    pub max_stacks: u32,
    pub proc_chance: u32,
    pub proc_flags: u64,
    pub internal_cooldown: u32,
    pub rppm: f64,
    pub cast_time: i32,
    pub scale_budget: f64,
    pub combat_rating_multiplier: Option<f64>,
    pub power_cost: f64,
    pub effects: Vec<SimcSpellEffect>,
    pub rppm_modifiers: Vec<SimcRppmModifier>,
    /// Conduit rank -> value, only filled for player spells
    pub conduit_ranks: BTreeMap<u32, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimcSpellEffect {
    pub id: u32,
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
    pub chain_multiplier: f64,
    pub points_per_combo_point: f64,
    pub points_per_level: f64,
    pub damage_multiplier: f64,
    pub chain_target: u32,
    pub pvp_coefficient: f64,
    /// Budget of the owning spell; the effect value is `coefficient * scale_budget`
    pub scale_budget: f64,
    pub trigger_spell_id: u32,
    pub trigger_spell: Option<TriggeredSpell>,
}

/// Outcome of resolving an effect's trigger spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TriggeredSpell {
    Spell(Box<SimcSpell>),
    /// The trigger spell is already being built further up the chain
    Cycle { spell_id: u32 },
}

impl TriggeredSpell {
    pub fn spell(&self) -> Option<&SimcSpell> {
        match self {
            TriggeredSpell::Spell(spell) => Some(spell),
            TriggeredSpell::Cycle { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimcRppmModifier {
    pub spell_id: u32,
    pub is_hasted: bool,
    pub is_spec: bool,
    pub spec_id: u32,
    pub coefficient: f64,
}
