//! Hand-built rows shared by the scaling unit tests.

use crate::model::*;
use crate::provider::MemoryProvider;
use crate::schema::*;

pub fn props(item_level: u32, epic: [f64; 5]) -> RawRandomPropData {
    RawRandomPropData {
        item_level,
        damage_replace_stat: 500.0,
        damage_secondary: 0.0,
        epic,
        rare: [150.0, 100.0, 75.0, 60.0, 0.0],
        uncommon: [120.0, 80.0, 60.0, 50.0, 0.0],
    }
}

/// Every table a build touches, with a few known values:
/// epic budget at 226 is `[200, 130, 100, 80]`, at 200 it is `[180, 117, 90, 72]`,
/// the trinket combat rating multiplier at 226 is 1.5,
/// spell scaling is 64.0 for special -1 and 95.0 for mages at level 60.
pub fn base_provider() -> MemoryProvider {
    let mut combat_ratings = MultiplierTable::empty();
    combat_ratings.rows[2][225] = 1.5;
    combat_ratings.rows[0][225] = 1.2;
    let mut stamina = MultiplierTable::empty();
    stamina.rows[0][225] = 2.0;
    let mut spell_scaling = SpellScalingTable::empty();
    spell_scaling.rows[PlayerScaling::Special.scaling_row()][59] = 64.0;
    spell_scaling.rows[PlayerScaling::Mage.scaling_row()][59] = 95.0;
    spell_scaling.rows[PlayerScaling::Mage.scaling_row()][49] = 50.0;

    let mut provider = MemoryProvider::new();
    provider.insert(
        FileType::RandPropPoints,
        Table::RandomProps(vec![
            props(200, [180.0, 117.0, 90.0, 72.0, 0.0]),
            props(226, [200.0, 130.0, 100.0, 80.0, 0.0]),
        ]),
    );
    provider.insert(
        FileType::CombatRatingMultipliers,
        Table::CombatRatingMultipliers(combat_ratings),
    );
    provider.insert(FileType::StaminaMultipliers, Table::StaminaMultipliers(stamina));
    provider.insert(FileType::SpellScaling, Table::SpellScaling(spell_scaling));
    provider.insert(FileType::SpellData, Table::Spells(Vec::new()));
    provider.insert(FileType::RppmData, Table::RppmModifiers(Vec::new()));
    provider.insert(FileType::CovenantData, Table::ConduitRanks(Vec::new()));
    provider.insert(FileType::ItemBonusData, Table::ItemBonuses(Vec::new()));
    provider.insert(FileType::GemData, Table::GemProperties(Vec::new()));
    provider.insert(FileType::ItemEnchantData, Table::ItemEnchantments(Vec::new()));
    provider
}

/// Epic trinket with intellect and crit
pub fn raw_item(id: u32, item_level: i32) -> RawItem {
    RawItem {
        id,
        name: format!("Item {}", id),
        flags_1: 0,
        flags_2: 0,
        item_level,
        required_level: 60,
        required_skill: 0,
        required_skill_level: 0,
        quality: ItemQuality::Epic.raw(),
        inventory_type: InventoryType::Trinket.raw(),
        item_class: ITEM_CLASS_ARMOR,
        item_subclass: 0,
        bind_type: 1,
        delay: 0.0,
        dmg_range: 0.0,
        item_modifier: 0.0,
        dbc_stats: 1,
        dbc_stats_count: 2,
        class_mask: 0,
        race_mask: 0,
        socket_colours: [0; 3],
        gem_properties: 0,
        socket_bonus_id: 0,
        set_id: 0,
        curve_id: 0,
        artifact_id: 0,
        mods: vec![
            RawItemMod {
                mod_type: ItemModType::INTELLECT.0,
                stat_allocation: 7000,
                socket_multiplier: 0.0,
            },
            RawItemMod {
                mod_type: ItemModType::CRIT_RATING.0,
                stat_allocation: 4000,
                socket_multiplier: 0.0,
            },
        ],
        effects: Vec::new(),
    }
}

pub fn bonus(id: u32, bonus_id: u32, bonus_type: i32, value_1: i32, value_2: i32) -> RawItemBonus {
    RawItemBonus {
        id,
        bonus_id,
        bonus_type,
        value_1,
        value_2,
        value_3: 0,
        value_4: 0,
        index: id,
    }
}

/// Single-stat crit enchantment
pub fn enchantment(id: u32, scaling_id: i32, coefficient: f64, spell_id: u32) -> RawItemEnchantment {
    RawItemEnchantment {
        id,
        name: format!("+{} Critical Strike", id),
        slot: 0,
        gem_id: 0,
        scaling_id,
        min_scaling_level: 0,
        max_scaling_level: 0,
        min_item_level: 0,
        max_item_level: 0,
        req_skill: 0,
        req_skill_value: 0,
        sub_enchantments: [
            RawSubEnchantment {
                enchant_type: 5,
                amount: 12,
                property: ItemModType::CRIT_RATING.0,
                coefficient,
            },
            RawSubEnchantment::default(),
            RawSubEnchantment::default(),
        ],
        spell_id,
    }
}

pub fn raw_spell(id: u32, scaling_type: i32) -> RawSpell {
    RawSpell {
        id,
        name: format!("Spell {}", id),
        school: 1,
        projectile_speed: 0.0,
        race_mask: 0,
        class_mask: 0,
        scaling_type,
        max_scaling_level: 0,
        spell_level: 0,
        max_level: 0,
        req_max_level: 0,
        min_range: 0.0,
        max_range: 0.0,
        cooldown: 0,
        gcd: 0,
        category_cooldown: 0,
        charges: 0,
        charge_cooldown: 0,
        category: 0,
        dmg_class: 0,
        max_targets: 0,
        duration: 0.0,
        max_stacks: 0,
        proc_chance: 101,
        proc_charges: 0,
        proc_flags: 0,
        internal_cooldown: 0,
        rppm: 0.0,
        equip_class: 0,
        equip_inv_type_mask: 0,
        equip_subclass_mask: 0,
        cast_time: 0,
        attributes: Vec::new(),
        class_flags: [0; 4],
        class_flags_family: 0,
        stance_mask: 0,
        mechanic: 0,
        power_id: 0,
        essence_id: 0,
        effects: Vec::new(),
        powers: Vec::new(),
    }
}

pub fn spell_effect(id: u32, spell_id: u32, coefficient: f64, trigger_spell_id: u32) -> RawSpellEffect {
    RawSpellEffect {
        id,
        spell_id,
        effect_index: 0,
        effect_type: 6,
        effect_subtype: 0,
        coefficient,
        delta: 0.0,
        bonus_coefficient: 0.0,
        sp_coefficient: 0.0,
        ap_coefficient: 0.0,
        amplitude: 0.0,
        radius: 0.0,
        radius_max: 0.0,
        base_value: 0.0,
        misc_value_1: 0,
        misc_value_2: 0,
        class_flags: [0; 4],
        trigger_spell_id,
        chain_multiplier: 1.0,
        points_per_combo_point: 0.0,
        points_per_level: 0.0,
        damage_multiplier: 1.0,
        chain_target: 0,
        target_1: 0,
        target_2: 0,
        value: 0.0,
        pvp_coefficient: 1.0,
        mechanic: 0,
        effect_attributes: 0,
        resource_coefficient: 0.0,
        chain_amplitude: 1.0,
    }
}
