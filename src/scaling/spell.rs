//! Builds scaled spells, resolving trigger spells recursively.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::lookup::Lookup;
use crate::error::Result;
use crate::model::*;
use crate::schema::{InventoryType, ItemQuality, PlayerScaling, RppmModifierType, SX_SCALE_ILEVEL};

/// What a spell's budget is derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalingContext {
    Item {
        item_level: i32,
        quality: ItemQuality,
        inventory_type: InventoryType,
    },
    Player {
        level: u32,
    },
}

pub struct SpellBuilder<'l, 'p> {
    lookup: &'l Lookup<'p>,
}

impl<'l, 'p> SpellBuilder<'l, 'p> {
    pub fn new(lookup: &'l Lookup<'p>) -> Self {
        Self { lookup }
    }

    /// Spell scaled from an item's level, quality and slot
    pub fn build_item_spell(
        &self,
        spell_id: u32,
        item_level: i32,
        quality: ItemQuality,
        inventory_type: InventoryType,
    ) -> Result<Option<SimcSpell>> {
        let context = ScalingContext::Item {
            item_level,
            quality,
            inventory_type,
        };
        self.build(spell_id, context)
    }

    /// Spell scaled from the player's level
    pub fn build_player_spell(&self, player_level: u32, spell_id: u32) -> Result<Option<SimcSpell>> {
        self.build(spell_id, ScalingContext::Player { level: player_level })
    }

    pub fn build(&self, spell_id: u32, context: ScalingContext) -> Result<Option<SimcSpell>> {
        let mut path = Vec::new();
        let spell = self.build_on_path(spell_id, context, &mut path)?;
        if spell.is_none() {
            warn!("spell {} not found", spell_id);
        }
        Ok(spell)
    }

    /// `path` holds the spells currently being built above this one
    fn build_on_path(
        &self,
        spell_id: u32,
        context: ScalingContext,
        path: &mut Vec<u32>,
    ) -> Result<Option<SimcSpell>> {
        let Some(raw) = self.lookup.spell(spell_id)? else {
            return Ok(None);
        };

        let (scale_budget, combat_rating_multiplier) = match context {
            ScalingContext::Item {
                item_level,
                quality,
                inventory_type,
            } => self.item_budget(&raw, item_level, quality, inventory_type)?,
            ScalingContext::Player { level } => (self.player_budget(&raw, level)?, None),
        };

        let mut spell = SimcSpell {
            id: raw.id,
            name: raw.name.clone(),
            school: raw.school,
            scaling_type: raw.scaling_type,
            max_scaling_level: raw.max_scaling_level,
            min_range: raw.min_range,
            max_range: raw.max_range,
            cooldown: raw.cooldown,
            gcd: raw.gcd,
            category_cooldown: raw.category_cooldown,
            charges: raw.charges,
            charge_cooldown: raw.charge_cooldown,
            max_targets: raw.max_targets,
            duration: raw.duration,
            max_stacks: raw.max_stacks,
            proc_chance: raw.proc_chance,
            proc_flags: raw.proc_flags,
            internal_cooldown: raw.internal_cooldown,
            rppm: raw.rppm,
            cast_time: raw.cast_time,
            scale_budget,
            combat_rating_multiplier,
            power_cost: raw.powers.first().map(|p| p.percent_cost).unwrap_or(0.0),
            effects: Vec::with_capacity(raw.effects.len()),
            rppm_modifiers: self.rppm_modifiers(raw.id)?,
            conduit_ranks: BTreeMap::new(),
        };

        if let ScalingContext::Player { .. } = context {
            for rank in self.lookup.conduit_ranks(raw.id)? {
                spell.conduit_ranks.insert(rank.rank, rank.value);
            }
        }

        path.push(raw.id);
        for effect in &raw.effects {
            let trigger_spell = self.trigger(effect.trigger_spell_id, context, path)?;
            spell.effects.push(SimcSpellEffect {
                id: effect.id,
                effect_index: effect.effect_index,
                effect_type: effect.effect_type,
                effect_subtype: effect.effect_subtype,
                coefficient: effect.coefficient,
                delta: effect.delta,
                bonus_coefficient: effect.bonus_coefficient,
                sp_coefficient: effect.sp_coefficient,
                ap_coefficient: effect.ap_coefficient,
                amplitude: effect.amplitude,
                radius: effect.radius,
                radius_max: effect.radius_max,
                base_value: effect.base_value,
                misc_value_1: effect.misc_value_1,
                misc_value_2: effect.misc_value_2,
                chain_multiplier: effect.chain_multiplier,
                points_per_combo_point: effect.points_per_combo_point,
                points_per_level: effect.points_per_level,
                damage_multiplier: effect.damage_multiplier,
                chain_target: effect.chain_target,
                pvp_coefficient: effect.pvp_coefficient,
                scale_budget,
                trigger_spell_id: effect.trigger_spell_id,
                trigger_spell,
            });
        }
        path.pop();

        Ok(Some(spell))
    }

    fn trigger(
        &self,
        trigger_id: u32,
        context: ScalingContext,
        path: &mut Vec<u32>,
    ) -> Result<Option<TriggeredSpell>> {
        if trigger_id == 0 {
            return Ok(None);
        }
        if path.contains(&trigger_id) {
            warn!("trigger cycle through spell {} ({:?})", trigger_id, path);
            return Ok(Some(TriggeredSpell::Cycle {
                spell_id: trigger_id,
            }));
        }
        match self.build_on_path(trigger_id, context, path)? {
            Some(spell) => Ok(Some(TriggeredSpell::Spell(Box::new(spell)))),
            None => {
                debug!("trigger spell {} not found", trigger_id);
                Ok(None)
            }
        }
    }

    /// Budget from the item's random property row, and the combat rating
    /// multiplier when one was applied
    fn item_budget(
        &self,
        spell: &RawSpell,
        item_level: i32,
        quality: ItemQuality,
        inventory_type: InventoryType,
    ) -> Result<(f64, Option<f64>)> {
        let item_level = item_level.max(0) as u32;
        let budget_level = if spell.max_scaling_level > 0 {
            item_level.min(spell.max_scaling_level as u32)
        } else {
            item_level
        };
        let budget = self.lookup.item_budget(budget_level, quality, 0)?;

        match scaling_of(spell) {
            PlayerScaling::COMBAT_RATING => {
                let multiplier = self
                    .lookup
                    .combat_rating_multiplier(item_level, inventory_type)?;
                Ok((budget * multiplier, Some(multiplier)))
            }
            PlayerScaling::DAMAGE_REPLACE => {
                let replaced = self
                    .lookup
                    .random_props(budget_level)?
                    .map(|p| p.damage_replace_stat)
                    .unwrap_or(0.0);
                Ok((replaced, None))
            }
            PlayerScaling::None if spell.has_attribute(SX_SCALE_ILEVEL) => {
                warn!(
                    "spell {} scales by item level attribute, which is not implemented",
                    spell.id
                );
                Ok((budget, None))
            }
            _ => Ok((budget, None)),
        }
    }

    fn player_budget(&self, spell: &RawSpell, level: u32) -> Result<f64> {
        let scaling = scaling_of(spell);
        if scaling == PlayerScaling::None {
            return Ok(0.0);
        }
        let level = if spell.max_scaling_level > 0 {
            level.min(spell.max_scaling_level as u32)
        } else {
            level
        };
        self.lookup.spell_scaling(scaling, level)
    }

    fn rppm_modifiers(&self, spell_id: u32) -> Result<Vec<SimcRppmModifier>> {
        Ok(self
            .lookup
            .rppm_modifiers(spell_id)?
            .into_iter()
            .map(|entry| {
                let kind = RppmModifierType::from_raw(entry.modifier_type);
                let is_spec = kind == RppmModifierType::Spec;
                SimcRppmModifier {
                    spell_id: entry.spell_id,
                    is_hasted: kind == RppmModifierType::Haste,
                    is_spec,
                    spec_id: if is_spec { entry.modifier_value } else { 0 },
                    coefficient: entry.coefficient,
                }
            })
            .collect())
    }
}

fn scaling_of(spell: &RawSpell) -> PlayerScaling {
    PlayerScaling::from_raw(spell.scaling_type).unwrap_or_else(|| {
        warn!(
            "spell {} has unknown scaling class {}",
            spell.id, spell.scaling_type
        );
        PlayerScaling::None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryProvider;
    use crate::scaling::test_support::*;
    use crate::schema::FileType;

    fn provider_with(spells: Vec<RawSpell>) -> MemoryProvider {
        let mut provider = base_provider();
        provider.insert(FileType::SpellData, Table::Spells(spells));
        provider
    }

    fn item_context() -> ScalingContext {
        ScalingContext::Item {
            item_level: 226,
            quality: ItemQuality::Epic,
            inventory_type: InventoryType::Trinket,
        }
    }

    #[test]
    fn test_item_budget_ignores_slot() {
        let provider = provider_with(vec![raw_spell(1, 0)]);
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup)
            .build(1, item_context())
            .unwrap()
            .unwrap();
        assert_eq!(spell.scale_budget, 200.0);
        assert_eq!(spell.combat_rating_multiplier, None);
    }

    #[test]
    fn test_combat_rating_spell() {
        let provider = provider_with(vec![raw_spell(1, -7)]);
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup)
            .build(1, item_context())
            .unwrap()
            .unwrap();
        assert_eq!(spell.scale_budget, 300.0);
        assert_eq!(spell.combat_rating_multiplier, Some(1.5));
    }

    #[test]
    fn test_damage_replace_spell() {
        let provider = provider_with(vec![raw_spell(1, -8)]);
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup)
            .build(1, item_context())
            .unwrap()
            .unwrap();
        assert_eq!(spell.scale_budget, 500.0);
    }

    #[test]
    fn test_item_level_attribute_keeps_item_budget() {
        let mut raw = raw_spell(1, 0);
        raw.attributes = vec![0; 12];
        raw.attributes[11] = 1 << (SX_SCALE_ILEVEL % 32);
        assert!(raw.has_attribute(SX_SCALE_ILEVEL));
        let provider = provider_with(vec![raw]);
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup)
            .build(1, item_context())
            .unwrap()
            .unwrap();
        assert_eq!(spell.scale_budget, 200.0);
        assert_eq!(spell.combat_rating_multiplier, None);
    }

    #[test]
    fn test_max_scaling_level_caps_item_budget() {
        let mut raw = raw_spell(1, 0);
        raw.max_scaling_level = 200;
        let provider = provider_with(vec![raw]);
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup)
            .build(1, item_context())
            .unwrap()
            .unwrap();
        assert_eq!(spell.scale_budget, 180.0);
    }

    #[test]
    fn test_player_spell() {
        let mut raw = raw_spell(1, 8);
        raw.effects.push(spell_effect(10, 1, 1.32, 0));
        let mut provider = provider_with(vec![raw]);
        provider.insert(
            FileType::CovenantData,
            Table::ConduitRanks(vec![
                RawSpellConduitRankEntry { conduit_id: 5, rank: 0, spell_id: 1, value: 10.0 },
                RawSpellConduitRankEntry { conduit_id: 5, rank: 1, spell_id: 1, value: 11.0 },
            ]),
        );
        let lookup = Lookup::new(&provider);
        let builder = SpellBuilder::new(&lookup);

        let spell = builder.build_player_spell(60, 1).unwrap().unwrap();
        assert_eq!(spell.scale_budget, 95.0);
        assert_eq!(spell.effects[0].coefficient, 1.32);
        assert_eq!(spell.effects[0].scale_budget, 95.0);
        assert_eq!(spell.conduit_ranks.get(&1), Some(&11.0));

        let low = builder.build_player_spell(50, 1).unwrap().unwrap();
        assert_eq!(low.scale_budget, 50.0);
    }

    #[test]
    fn test_unscaled_player_spell_has_no_budget() {
        let provider = provider_with(vec![raw_spell(1, 0)]);
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup).build_player_spell(60, 1).unwrap().unwrap();
        assert_eq!(spell.scale_budget, 0.0);
    }

    #[test]
    fn test_self_trigger_is_a_cycle() {
        let mut raw = raw_spell(1, 0);
        raw.effects.push(spell_effect(10, 1, 1.0, 1));
        let provider = provider_with(vec![raw]);
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup)
            .build(1, item_context())
            .unwrap()
            .unwrap();
        assert_eq!(
            spell.effects[0].trigger_spell,
            Some(TriggeredSpell::Cycle { spell_id: 1 })
        );
    }

    #[test]
    fn test_trigger_chain() {
        let mut first = raw_spell(1, 0);
        first.effects.push(spell_effect(10, 1, 1.0, 2));
        let mut second = raw_spell(2, -7);
        second.effects.push(spell_effect(20, 2, 2.0, 1));
        second.effects.push(spell_effect(21, 2, 3.0, 999));
        let provider = provider_with(vec![first, second]);
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup)
            .build(1, item_context())
            .unwrap()
            .unwrap();

        let triggered = spell.effects[0]
            .trigger_spell
            .as_ref()
            .and_then(|t| t.spell())
            .unwrap();
        assert_eq!(triggered.id, 2);
        assert_eq!(triggered.scale_budget, 300.0);
        assert_eq!(
            triggered.effects[0].trigger_spell,
            Some(TriggeredSpell::Cycle { spell_id: 1 })
        );
        assert_eq!(triggered.effects[1].trigger_spell, None);
    }

    #[test]
    fn test_rppm_modifiers_and_power_cost() {
        let mut raw = raw_spell(1, 0);
        raw.powers.push(RawSpellPower {
            id: 7,
            spell_id: 1,
            aura_id: 0,
            power_type: 0,
            cost: 0,
            cost_max: 0,
            cost_per_tick: 0,
            percent_cost: 2.5,
            percent_cost_max: 0.0,
            percent_cost_per_tick: 0.0,
        });
        let mut provider = provider_with(vec![raw]);
        provider.insert(
            FileType::RppmData,
            Table::RppmModifiers(vec![
                RawRppmEntry { spell_id: 1, modifier_type: 1, modifier_value: 0, coefficient: 0.0 },
                RawRppmEntry { spell_id: 1, modifier_type: 4, modifier_value: 62, coefficient: -0.5 },
                RawRppmEntry { spell_id: 2, modifier_type: 1, modifier_value: 0, coefficient: 0.0 },
            ]),
        );
        let lookup = Lookup::new(&provider);
        let spell = SpellBuilder::new(&lookup)
            .build(1, item_context())
            .unwrap()
            .unwrap();

        assert_eq!(spell.power_cost, 2.5);
        assert_eq!(spell.rppm_modifiers.len(), 2);
        assert!(spell.rppm_modifiers[0].is_hasted);
        assert!(spell.rppm_modifiers[1].is_spec);
        assert_eq!(spell.rppm_modifiers[1].spec_id, 62);
    }

    #[test]
    fn test_missing_spell_is_none() {
        let provider = provider_with(vec![]);
        let lookup = Lookup::new(&provider);
        assert!(SpellBuilder::new(&lookup).build(42, item_context()).unwrap().is_none());
    }
}
