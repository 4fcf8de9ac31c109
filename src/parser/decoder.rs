//! Raw table decoder: one builder per file type over the generated dumps.

use std::collections::HashMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, warn};

use super::block::{
    combat_rating_matrix, slice_block, spell_scaling_matrix, stamina_matrix, version_string,
};
use super::row::{classify, split_line, DumpContext, Fields, RowKind, SplitLine};
use crate::error::{Error, Result};
use crate::model::*;
use crate::schema::*;

/// Raw dump texts keyed by source file name
#[derive(Debug, Default, Clone)]
pub struct RawDumps {
    texts: HashMap<String, String>,
}

impl RawDumps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source_file: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(source_file.into(), text.into());
    }

    pub fn with(mut self, source_file: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(source_file, text);
        self
    }

    pub fn get(&self, source_file: &str) -> Result<&str> {
        self.texts
            .get(source_file)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::MissingDump(source_file.to_string()))
    }

    /// Read every dump a file type needs from one directory
    pub fn load(dir: &Path, file_type: FileType) -> Result<Self> {
        let mut dumps = Self::new();
        for source in file_type.source_files() {
            let path = dir.join(source);
            if !path.exists() {
                return Err(Error::MissingDump(path.display().to_string()));
            }
            dumps.insert(*source, fs::read_to_string(&path)?);
        }
        Ok(dumps)
    }
}

/// Decode the table for `file_type` from its raw dumps
pub fn decode(file_type: FileType, dumps: &RawDumps) -> Result<Table> {
    let primary = dumps.get(file_type.source_files()[0])?;

    let table = match file_type {
        FileType::ItemDataNew | FileType::ItemDataOld => Table::Items(decode_items(
            primary,
            dumps.get("item_effect.inc")?,
            file_type.item_id_range(),
        )?),
        FileType::SpellData => Table::Spells(decode_spells(primary)?),
        FileType::ItemBonusData => {
            Table::ItemBonuses(decode_fixed(primary, &ITEM_BONUS, item_bonus_row))
        }
        FileType::ItemEnchantData => Table::ItemEnchantments(decode_fixed(
            primary,
            &ITEM_ENCHANTMENT,
            item_enchantment_row,
        )),
        FileType::GemData => {
            Table::GemProperties(decode_fixed(primary, &GEM_PROPERTY, gem_property_row))
        }
        FileType::CurvePoints => {
            Table::CurvePoints(decode_fixed(primary, &CURVE_POINT, curve_point_row))
        }
        FileType::RppmData => {
            Table::RppmModifiers(decode_fixed(primary, &RPPM_MODIFIER, rppm_row))
        }
        FileType::CovenantData => Table::ConduitRanks(decode_marked(
            primary,
            CONDUIT_RANK_MARKER,
            &CONDUIT_RANK,
            conduit_rank_row,
        )),
        FileType::TraitData => {
            Table::Traits(decode_marked(primary, TRAIT_MARKER, &TRAIT, trait_row))
        }
        FileType::RandPropPoints => {
            Table::RandomProps(decode_fixed(primary, &RANDOM_PROP, random_prop_row))
        }
        FileType::CombatRatingMultipliers => {
            Table::CombatRatingMultipliers(combat_rating_matrix(primary))
        }
        FileType::StaminaMultipliers => Table::StaminaMultipliers(stamina_matrix(primary)),
        FileType::SpellScaling => Table::SpellScaling(spell_scaling_matrix(primary)),
        FileType::GameDataVersion => Table::Version(version_string(primary)),
    };

    debug!("decoded {}: {} rows", file_type, table.len());
    Ok(table)
}

/// Decode a single-dump table straight from its text
pub fn decode_text(file_type: FileType, text: &str) -> Result<Table> {
    let sources = file_type.source_files();
    if sources.len() != 1 {
        return Err(Error::MissingDump(sources[1..].join(", ")));
    }
    decode(file_type, &RawDumps::new().with(sources[0], text))
}

// =============================================================================
// Fixed-width tables
// =============================================================================

/// Decode every line matching `layout`. Rows that fail to parse are logged
/// and dropped.
fn decode_fixed<T>(
    text: &str,
    layout: &'static RowLayout,
    build: fn(&Fields<'_, '_>) -> Result<T>,
) -> Vec<T> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let Some(split) = split_line(line) else {
            continue;
        };
        if classify(&split, DumpContext::Fixed(layout)) != RowKind::Fixed {
            continue;
        }
        match build(&Fields::new(layout, &split)) {
            Ok(row) => rows.push(row),
            Err(e) => warn!("dropping row: {}", e),
        }
    }
    rows
}

/// Like [`decode_fixed`], restricted to the block after `marker`.
/// A missing marker yields an empty table.
fn decode_marked<T>(
    text: &str,
    marker: &str,
    layout: &'static RowLayout,
    build: fn(&Fields<'_, '_>) -> Result<T>,
) -> Vec<T> {
    match slice_block(text, marker) {
        Some(block) => decode_fixed(block, layout, build),
        None => {
            warn!("marker {:?} not found, {} table is empty", marker, layout.entity);
            Vec::new()
        }
    }
}

fn item_bonus_row(f: &Fields<'_, '_>) -> Result<RawItemBonus> {
    Ok(RawItemBonus {
        id: f.u32("id")?,
        bonus_id: f.u32("bonus_id")?,
        bonus_type: f.i32("type")?,
        value_1: f.i32("value_1")?,
        value_2: f.i32("value_2")?,
        value_3: f.i32("value_3")?,
        value_4: f.i32("value_4")?,
        index: f.u32("index")?,
    })
}

fn item_enchantment_row(f: &Fields<'_, '_>) -> Result<RawItemEnchantment> {
    let sub = |n: usize| -> Result<RawSubEnchantment> {
        Ok(RawSubEnchantment {
            enchant_type: f.u32(&format!("type_{}", n))?,
            amount: f.i32(&format!("amount_{}", n))?,
            property: f.i32(&format!("property_{}", n))?,
            coefficient: f.f64(&format!("coefficient_{}", n))?,
        })
    };

    Ok(RawItemEnchantment {
        id: f.u32("id")?,
        name: f.name(),
        slot: f.u32("slot")?,
        gem_id: f.u32("gem_id")?,
        scaling_id: f.i32("scaling_id")?,
        min_scaling_level: f.u32("min_scaling_level")?,
        max_scaling_level: f.u32("max_scaling_level")?,
        min_item_level: f.u32("min_item_level")?,
        max_item_level: f.u32("max_item_level")?,
        req_skill: f.u32("req_skill")?,
        req_skill_value: f.u32("req_skill_value")?,
        sub_enchantments: [sub(1)?, sub(2)?, sub(3)?],
        spell_id: f.u32("spell_id")?,
    })
}

fn gem_property_row(f: &Fields<'_, '_>) -> Result<RawGemProperty> {
    Ok(RawGemProperty {
        id: f.u32("id")?,
        enchant_id: f.u32("enchant_id")?,
        colour: f.i32("color")?,
        min_item_level: f.u32("min_item_level")?,
    })
}

fn curve_point_row(f: &Fields<'_, '_>) -> Result<RawCurvePoint> {
    Ok(RawCurvePoint {
        curve_id: f.u32("curve_id")?,
        index: f.u32("index")?,
        primary_1: f.f64("primary_1")?,
        primary_2: f.f64("primary_2")?,
        secondary_1: f.f64("secondary_1")?,
        secondary_2: f.f64("secondary_2")?,
    })
}

fn rppm_row(f: &Fields<'_, '_>) -> Result<RawRppmEntry> {
    Ok(RawRppmEntry {
        spell_id: f.u32("spell_id")?,
        modifier_type: f.i32("modifier_type")?,
        modifier_value: f.u32("type")?,
        coefficient: f.f64("coefficient")?,
    })
}

fn conduit_rank_row(f: &Fields<'_, '_>) -> Result<RawSpellConduitRankEntry> {
    Ok(RawSpellConduitRankEntry {
        conduit_id: f.u32("conduit_id")?,
        rank: f.u32("rank")?,
        spell_id: f.u32("spell_id")?,
        value: f.f64("value")?,
    })
}

fn trait_row(f: &Fields<'_, '_>) -> Result<RawTrait> {
    let four = |prefix: &str| -> Result<[u32; 4]> {
        Ok([
            f.u32(&format!("{}_1", prefix))?,
            f.u32(&format!("{}_2", prefix))?,
            f.u32(&format!("{}_3", prefix))?,
            f.u32(&format!("{}_4", prefix))?,
        ])
    };

    Ok(RawTrait {
        tree_index: f.u32("tree_index")?,
        class_id: f.u32("class_id")?,
        trait_node_entry_id: f.u32("id_trait_node_entry")?,
        node_id: f.u32("id_node")?,
        max_ranks: f.u32("max_ranks")?,
        required_points: f.u32("req_points")?,
        trait_definition_id: f.u32("id_trait_definition")?,
        spell_id: f.u32("id_spell")?,
        replace_spell_id: f.u32("id_replace_spell")?,
        override_spell_id: f.u32("id_override_spell")?,
        row: f.i32("row")?,
        column: f.i32("column")?,
        selection_index: f.i32("selection_index")?,
        name: f.name(),
        spec_ids: four("id_spec")?,
        starter_spec_ids: four("id_spec_starter")?,
    })
}

fn random_prop_row(f: &Fields<'_, '_>) -> Result<RawRandomPropData> {
    let five = |prefix: &str| -> Result<[f64; 5]> {
        let mut values = [0.0; 5];
        for (i, slot) in values.iter_mut().enumerate() {
            *slot = f.f64(&format!("{}_{}", prefix, i + 1))?;
        }
        Ok(values)
    };

    Ok(RawRandomPropData {
        item_level: f.u32("item_level")?,
        damage_replace_stat: f.f64("damage_replace_stat")?,
        damage_secondary: f.f64("damage_secondary")?,
        epic: five("epic")?,
        rare: five("rare")?,
        uncommon: five("uncommon")?,
    })
}

// =============================================================================
// Item table
// =============================================================================

/// Decode items, attaching their stat mods and effects. Only ids inside
/// `id_range` are kept when one is given.
pub fn decode_items(
    item_text: &str,
    effect_text: &str,
    id_range: Option<RangeInclusive<u32>>,
) -> Result<Vec<RawItem>> {
    let mut effects_by_item: HashMap<u32, Vec<RawItemEffect>> = HashMap::new();
    for effect in decode_fixed(effect_text, &ITEM_EFFECT, item_effect_row) {
        effects_by_item.entry(effect.item_id).or_default().push(effect);
    }
    for effects in effects_by_item.values_mut() {
        effects.sort_by_key(|e| e.index);
    }

    let mut mods = Vec::new();
    let mut item_lines = Vec::new();
    for line in item_text.lines() {
        let Some(split) = split_line(line) else {
            continue;
        };
        match classify(&split, DumpContext::Items) {
            RowKind::ItemMod => match item_mod_row(&Fields::new(&ITEM_MOD, &split)) {
                Ok(m) => mods.push(m),
                Err(e) => warn!("dropping row: {}", e),
            },
            RowKind::Item => item_lines.push(split),
            _ => {}
        }
    }

    let mut items = Vec::with_capacity(item_lines.len());
    for split in &item_lines {
        let mut item = item_row(&Fields::new(&ITEM, split))?;
        if let Some(range) = &id_range {
            if !range.contains(&item.id) {
                continue;
            }
        }
        item.mods = item_mods(&mods, &item, split)?;
        item.effects = effects_by_item.remove(&item.id).unwrap_or_default();
        items.push(item);
    }

    Ok(items)
}

/// The mod slice an item points at; offset 0 means no stats
fn item_mods(mods: &[RawItemMod], item: &RawItem, split: &SplitLine<'_>) -> Result<Vec<RawItemMod>> {
    if item.dbc_stats == 0 {
        return Ok(Vec::new());
    }
    let start = item.dbc_stats as usize;
    let end = start + item.dbc_stats_count as usize;
    mods.get(start..end).map(|m| m.to_vec()).ok_or_else(|| {
        Error::malformed(
            ITEM.entity,
            split.line,
            format!("stat range {}..{} outside {} mods", start, end, mods.len()),
        )
    })
}

fn item_mod_row(f: &Fields<'_, '_>) -> Result<RawItemMod> {
    Ok(RawItemMod {
        mod_type: f.i32("mod_type")?,
        stat_allocation: f.i32("stat_allocation")?,
        socket_multiplier: f.f64("socket_multiplier")?,
    })
}

fn item_effect_row(f: &Fields<'_, '_>) -> Result<RawItemEffect> {
    Ok(RawItemEffect {
        id: f.u32("id")?,
        spell_id: f.u32("spell_id")?,
        item_id: f.u32("item_id")?,
        index: f.u32("index")?,
        effect_type: f.i32("type")?,
        cooldown_group: f.i32("cooldown_group")?,
        cooldown_duration: f.i32("cooldown_duration")?,
        cooldown_group_duration: f.i32("cooldown_group_duration")?,
    })
}

fn item_row(f: &Fields<'_, '_>) -> Result<RawItem> {
    Ok(RawItem {
        id: f.u32("id")?,
        name: f.name(),
        flags_1: f.u32("flags_1")?,
        flags_2: f.u32("flags_2")?,
        item_level: f.i32("level")?,
        required_level: f.i32("req_level")?,
        required_skill: f.i32("req_skill")?,
        required_skill_level: f.i32("req_skill_level")?,
        quality: f.i32("quality")?,
        inventory_type: f.i32("inventory_type")?,
        item_class: f.i32("item_class")?,
        item_subclass: f.i32("item_subclass")?,
        bind_type: f.i32("bind_type")?,
        delay: f.f64("delay")?,
        dmg_range: f.f64("dmg_range")?,
        item_modifier: f.f64("item_modifier")?,
        dbc_stats: f.u32("dbc_stats")?,
        dbc_stats_count: f.u32("dbc_stats_count")?,
        class_mask: f.u32("class_mask")?,
        race_mask: f.u64("race_mask")?,
        socket_colours: [
            f.i32("socket_color_1")?,
            f.i32("socket_color_2")?,
            f.i32("socket_color_3")?,
        ],
        gem_properties: f.u32("gem_properties")?,
        socket_bonus_id: f.u32("id_socket_bonus")?,
        set_id: f.u32("id_set")?,
        curve_id: f.u32("id_curve")?,
        artifact_id: f.u32("id_artifact")?,
        mods: Vec::new(),
        effects: Vec::new(),
    })
}

// =============================================================================
// Spell table
// =============================================================================

/// Decode spells, effects and powers in one pass, then join by spell id.
/// Effects keep their index order.
pub fn decode_spells(text: &str) -> Result<Vec<RawSpell>> {
    let mut spells = Vec::new();
    let mut effects: HashMap<u32, Vec<RawSpellEffect>> = HashMap::new();
    let mut powers: HashMap<u32, Vec<RawSpellPower>> = HashMap::new();

    for line in text.lines() {
        let Some(split) = split_line(line) else {
            continue;
        };
        match classify(&split, DumpContext::Spells) {
            RowKind::Spell => spells.push(spell_row(&Fields::new(&SPELL, &split))?),
            RowKind::SpellEffect => {
                let effect = spell_effect_row(&Fields::new(&SPELL_EFFECT, &split))?;
                effects.entry(effect.spell_id).or_default().push(effect);
            }
            RowKind::SpellPower => {
                let power = spell_power_row(&Fields::new(&SPELL_POWER, &split))?;
                powers.entry(power.spell_id).or_default().push(power);
            }
            _ => {}
        }
    }

    for spell in &mut spells {
        if let Some(mut list) = effects.remove(&spell.id) {
            list.sort_by_key(|e| e.effect_index);
            spell.effects = list;
        }
        spell.powers = powers.remove(&spell.id).unwrap_or_default();
    }

    if !effects.is_empty() {
        debug!("{} spell ids have effects but no spell row", effects.len());
    }

    Ok(spells)
}

fn spell_row(f: &Fields<'_, '_>) -> Result<RawSpell> {
    let attributes = (1..=15)
        .map(|n| f.u32(&format!("attribute_{}", n)))
        .collect::<Result<Vec<_>>>()?;

    Ok(RawSpell {
        id: f.u32("id")?,
        name: f.name(),
        school: f.u32("school")?,
        projectile_speed: f.f64("proj_speed")?,
        race_mask: f.u64("race_mask")?,
        class_mask: f.u32("class_mask")?,
        scaling_type: f.i32("scaling_type")?,
        max_scaling_level: f.i32("max_scaling_level")?,
        spell_level: f.u32("spell_level")?,
        max_level: f.u32("max_level")?,
        req_max_level: f.u32("req_max_level")?,
        min_range: f.f64("min_range")?,
        max_range: f.f64("max_range")?,
        cooldown: f.u32("cooldown")?,
        gcd: f.u32("gcd")?,
        category_cooldown: f.u32("category_cooldown")?,
        charges: f.u32("charges")?,
        charge_cooldown: f.u32("charge_cooldown")?,
        category: f.u32("category")?,
        dmg_class: f.u32("dmg_class")?,
        max_targets: f.i32("max_targets")?,
        duration: f.f64("duration")?,
        max_stacks: f.u32("max_stack")?,
        proc_chance: f.u32("proc_chance")?,
        proc_charges: f.i32("proc_charges")?,
        proc_flags: f.u64("proc_flags")?,
        internal_cooldown: f.u32("internal_cooldown")?,
        rppm: f.f64("rppm")?,
        equip_class: f.u32("equip_class")?,
        equip_inv_type_mask: f.u32("equip_imask")?,
        equip_subclass_mask: f.u32("equip_scmask")?,
        cast_time: f.i32("cast_time")?,
        attributes,
        class_flags: [
            f.u32("class_flags_1")?,
            f.u32("class_flags_2")?,
            f.u32("class_flags_3")?,
            f.u32("class_flags_4")?,
        ],
        class_flags_family: f.u32("class_flags_family")?,
        stance_mask: f.u32("stance_mask")?,
        mechanic: f.u32("mechanic")?,
        power_id: f.u32("power_id")?,
        essence_id: f.u32("essence_id")?,
        effects: Vec::new(),
        powers: Vec::new(),
    })
}

fn spell_effect_row(f: &Fields<'_, '_>) -> Result<RawSpellEffect> {
    Ok(RawSpellEffect {
        id: f.u32("id")?,
        spell_id: f.u32("spell_id")?,
        effect_index: f.u32("index")?,
        effect_type: f.u32("type")?,
        effect_subtype: f.u32("subtype")?,
        coefficient: f.f64("coefficient")?,
        delta: f.f64("delta")?,
        bonus_coefficient: f.f64("bonus")?,
        sp_coefficient: f.f64("sp_coefficient")?,
        ap_coefficient: f.f64("ap_coefficient")?,
        amplitude: f.f64("amplitude")?,
        radius: f.f64("radius")?,
        radius_max: f.f64("radius_max")?,
        base_value: f.f64("base_value")?,
        misc_value_1: f.i32("misc_value_1")?,
        misc_value_2: f.i32("misc_value_2")?,
        class_flags: [
            f.u32("class_flags_1")?,
            f.u32("class_flags_2")?,
            f.u32("class_flags_3")?,
            f.u32("class_flags_4")?,
        ],
        trigger_spell_id: f.u32("trigger_spell")?,
        chain_multiplier: f.f64("chain_multiplier")?,
        points_per_combo_point: f.f64("points_per_combo_point")?,
        points_per_level: f.f64("points_per_level")?,
        damage_multiplier: f.f64("damage_multiplier")?,
        chain_target: f.u32("chain_target")?,
        target_1: f.u32("target_1")?,
        target_2: f.u32("target_2")?,
        value: f.f64("value")?,
        pvp_coefficient: f.f64("pvp_coefficient")?,
        mechanic: f.u32("mechanic")?,
        effect_attributes: f.u32("effect_attributes")?,
        resource_coefficient: f.f64("resource_coefficient")?,
        chain_amplitude: f.f64("chain_amplitude")?,
    })
}

fn spell_power_row(f: &Fields<'_, '_>) -> Result<RawSpellPower> {
    Ok(RawSpellPower {
        id: f.u32("id")?,
        spell_id: f.u32("spell_id")?,
        aura_id: f.u32("aura_id")?,
        power_type: f.i32("power_type")?,
        cost: f.i32("cost")?,
        cost_max: f.i32("cost_max")?,
        cost_per_tick: f.i32("cost_per_tick")?,
        percent_cost: f.f64("pct_cost")?,
        percent_cost_max: f.f64("pct_cost_max")?,
        percent_cost_per_tick: f.f64("pct_cost_per_tick")?,
    })
}
