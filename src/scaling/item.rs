use tracing::{debug, warn};

use super::lookup::{slot_column, Lookup, SlotColumn};
use super::spell::SpellBuilder;
use super::GEM_SCALING_REFERENCE_LEVEL;
use crate::error::{Error, Result};
use crate::model::*;
use crate::profile::ItemRef;
use crate::schema::*;

/// Random property budget is stored in units of 1/10000 of a rating point
const ALLOCATION_SCALE: f64 = 0.0001;

pub struct ItemBuilder<'l, 'p> {
    lookup: &'l Lookup<'p>,
}

impl<'l, 'p> ItemBuilder<'l, 'p> {
    pub fn new(lookup: &'l Lookup<'p>) -> Self {
        Self { lookup }
    }

    /// Build one profile item. A missing item id is `Ok(None)`.
    pub fn build(&self, item_ref: &ItemRef) -> Result<Option<SimcItem>> {
        let Some(raw) = self.lookup.item(item_ref.item_id)? else {
            warn!("item {} not found", item_ref.item_id);
            return Ok(None);
        };

        let mut item = SimcItem {
            id: raw.id,
            name: raw.name.clone(),
            item_level: 0,
            quality: ItemQuality::from_raw(raw.quality),
            inventory_type: InventoryType::from_raw(raw.inventory_type),
            item_class: raw.item_class,
            item_subclass: raw.item_subclass,
            enchant_id: item_ref.enchant_id,
            equipped: item_ref.equipped,
            sockets: raw.socket_colours.iter().map(|c| SocketColor(*c)).collect(),
            mods: Vec::with_capacity(raw.mods.len()),
            gems: Vec::new(),
            effects: Vec::new(),
        };
        item.item_level += raw.item_level;

        for raw_mod in &raw.mods {
            if raw_mod.socket_multiplier != 0.0 {
                return Err(Error::UnsupportedFeature(format!(
                    "item {} mod {} has socket multiplier {}",
                    raw.id, raw_mod.mod_type, raw_mod.socket_multiplier
                )));
            }
            item.mods.push(SimcItemMod {
                mod_type: ItemModType(raw_mod.mod_type),
                raw_allocation: raw_mod.stat_allocation,
                stat_rating: 0,
            });
        }

        for bonus_id in &item_ref.bonus_ids {
            self.apply_bonus(&mut item, *bonus_id)?;
        }

        self.rate_mods(&mut item)?;

        for gem_id in item_ref.gem_ids.iter().filter(|id| **id != 0) {
            if let Some(gem) = self.build_gem(*gem_id)? {
                item.gems.push(gem);
            }
        }

        let spells = SpellBuilder::new(self.lookup);
        for effect in &raw.effects {
            let Some(spell) = spells.build_item_spell(
                effect.spell_id,
                item.item_level,
                item.quality,
                item.inventory_type,
            )?
            else {
                warn!("item {} effect {} has no spell", raw.id, effect.id);
                continue;
            };
            item.effects.push(SimcItemEffect {
                effect_id: effect.id,
                effect_type: effect.effect_type,
                cooldown_group: effect.cooldown_group,
                cooldown_duration: effect.cooldown_duration,
                cooldown_group_duration: effect.cooldown_group_duration,
                spell,
            });
        }

        Ok(Some(item))
    }

    fn apply_bonus(&self, item: &mut SimcItem, bonus_id: u32) -> Result<()> {
        let entries = self.lookup.item_bonuses(bonus_id)?;
        if entries.is_empty() {
            debug!("bonus {} has no entries", bonus_id);
        }
        for entry in entries {
            match ItemBonusType::from_raw(entry.bonus_type) {
                ItemBonusType::Ilevel => item.item_level += entry.value_1,
                ItemBonusType::Mod => item.mods.push(SimcItemMod {
                    mod_type: ItemModType(entry.value_1),
                    raw_allocation: entry.value_2,
                    stat_rating: 0,
                }),
                ItemBonusType::Quality => item.quality = ItemQuality::from_raw(entry.value_1),
                ItemBonusType::Socket => {
                    let colour = SocketColor(entry.value_2);
                    let mut remaining = entry.value_1.max(0) as usize;
                    for socket in item.sockets.iter_mut().filter(|s| s.is_empty()) {
                        if remaining == 0 {
                            break;
                        }
                        *socket = colour;
                        remaining -= 1;
                    }
                }
                ItemBonusType::AddItemEffect => {
                    warn!(
                        "item {}: bonus {} adds item effect {}, not applied",
                        item.id, bonus_id, entry.value_1
                    );
                }
                ItemBonusType::Unknown(kind) => {
                    debug!("item {}: bonus {} type {} ignored", item.id, bonus_id, kind);
                }
            }
        }
        Ok(())
    }

    fn rate_mods(&self, item: &mut SimcItem) -> Result<()> {
        if item.mods.is_empty() {
            return Ok(());
        }
        let column = match slot_column(item.item_class, item.item_subclass, item.inventory_type) {
            SlotColumn::Column(column) => Some(column),
            SlotColumn::NotSlotted => None,
        };
        let item_level = item.item_level.max(0) as u32;
        let budget = match column {
            Some(column) => self.lookup.item_budget(item_level, item.quality, column)?,
            None => 0.0,
        };

        for item_mod in item.mods.iter_mut() {
            if column.is_none() || budget == 0.0 {
                return Err(Error::UnscalableMod {
                    item_id: item.id,
                    mod_type: item_mod.mod_type.0,
                });
            }
            let socket_penalty = 0.0;
            let mut rating =
                (item_mod.raw_allocation as f64 * budget * ALLOCATION_SCALE - socket_penalty).round();
            if item_mod.mod_type.is_combat_rating() {
                rating *= self
                    .lookup
                    .combat_rating_multiplier(item_level, item.inventory_type)?;
            } else if item_mod.mod_type == ItemModType::STAMINA {
                rating *= self.lookup.stamina_multiplier(item_level, item.inventory_type)?;
            }
            item_mod.stat_rating = rating as i32;
        }
        Ok(())
    }

    /// Gem item -> gem property -> enchantment, scaled at a fixed level
    fn build_gem(&self, gem_id: u32) -> Result<Option<SimcItemGem>> {
        let Some(gem_item) = self.lookup.item(gem_id)? else {
            warn!("gem {} not found", gem_id);
            return Ok(None);
        };
        let Some(property) = self.lookup.gem_property(gem_item.gem_properties)? else {
            warn!("gem {} has no gem property {}", gem_id, gem_item.gem_properties);
            return Ok(None);
        };
        let Some(enchantment) = self.lookup.enchantment(property.enchant_id)? else {
            warn!("gem {} has no enchantment {}", gem_id, property.enchant_id);
            return Ok(None);
        };
        if enchantment.spell_id != 0 {
            return Err(Error::UnsupportedFeature(format!(
                "gem {} enchantment {} casts spell {}",
                gem_id, enchantment.id, enchantment.spell_id
            )));
        }

        let sub = &enchantment.sub_enchantments[0];
        let stat_rating = if enchantment.scaling_id != 0 {
            match PlayerScaling::from_raw(enchantment.scaling_id) {
                Some(scaling) => {
                    let budget = self
                        .lookup
                        .spell_scaling(scaling, GEM_SCALING_REFERENCE_LEVEL)?;
                    (sub.coefficient * budget).round() as i32
                }
                None => {
                    warn!(
                        "enchantment {} has unknown scaling class {}",
                        enchantment.id, enchantment.scaling_id
                    );
                    sub.amount
                }
            }
        } else {
            sub.amount
        };

        Ok(Some(SimcItemGem {
            gem_id,
            enchant_id: enchantment.id,
            stat_type: ItemModType(sub.property),
            stat_rating,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryProvider;
    use crate::scaling::test_support::*;

    fn provider_with(items: Vec<RawItem>, bonuses: Vec<RawItemBonus>) -> MemoryProvider {
        let mut provider = base_provider();
        provider.insert(FileType::ItemDataOld, Table::Items(items));
        provider.insert(FileType::ItemBonusData, Table::ItemBonuses(bonuses));
        provider
    }

    fn item_ref(item_id: u32, bonus_ids: &[u32]) -> ItemRef {
        ItemRef {
            item_id,
            bonus_ids: bonus_ids.to_vec(),
            equipped: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_item_is_none() {
        let provider = provider_with(vec![], vec![]);
        let lookup = Lookup::new(&provider);
        let item = ItemBuilder::new(&lookup).build(&item_ref(1, &[])).unwrap();
        assert!(item.is_none());
    }

    #[test]
    fn test_item_level_bonuses_accumulate() {
        let provider = provider_with(
            vec![raw_item(100, 200)],
            vec![bonus(1, 7000, 1, 10, 0), bonus(2, 7001, 1, 16, 0)],
        );
        let lookup = Lookup::new(&provider);
        let item = ItemBuilder::new(&lookup)
            .build(&item_ref(100, &[7000, 7001]))
            .unwrap()
            .unwrap();
        assert_eq!(item.item_level, 226);
    }

    #[test]
    fn test_mod_quality_and_socket_bonuses() {
        let provider = provider_with(
            vec![raw_item(100, 226)],
            vec![
                bonus(1, 8000, 2, ItemModType::HASTE_RATING.0, 5000),
                bonus(2, 8000, 3, 3, 0),
                bonus(3, 8001, 6, 1, SocketColor::PRISMATIC.0),
            ],
        );
        let lookup = Lookup::new(&provider);
        let item = ItemBuilder::new(&lookup)
            .build(&item_ref(100, &[8000, 8001]))
            .unwrap()
            .unwrap();

        assert_eq!(item.quality, ItemQuality::Rare);
        assert_eq!(item.mods.len(), 3);
        assert_eq!(item.mods[2].mod_type, ItemModType::HASTE_RATING);
        assert_eq!(
            item.sockets,
            vec![SocketColor::PRISMATIC, SocketColor::NONE, SocketColor::NONE]
        );
    }

    #[test]
    fn test_stat_ratings() {
        let provider = provider_with(vec![raw_item(100, 226)], vec![]);
        let lookup = Lookup::new(&provider);
        let item = ItemBuilder::new(&lookup)
            .build(&item_ref(100, &[]))
            .unwrap()
            .unwrap();

        // trinket budget column 1 at epic is 130.0
        // intellect: round(7000 * 130 * 0.0001) = 91
        assert_eq!(item.mods[0].stat_rating, 91);
        // crit: round(4000 * 130 * 0.0001) = 52, times the 1.5 trinket multiplier
        assert_eq!(item.mods[1].stat_rating, 78);
    }

    #[test]
    fn test_socket_multiplier_is_unsupported() {
        let mut raw = raw_item(100, 226);
        raw.mods[0].socket_multiplier = 0.5;
        let provider = provider_with(vec![raw], vec![]);
        let lookup = Lookup::new(&provider);
        let err = ItemBuilder::new(&lookup).build(&item_ref(100, &[])).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFeature(_)));
    }

    #[test]
    fn test_unslotted_mod_is_fatal() {
        let mut raw = raw_item(100, 226);
        raw.inventory_type = InventoryType::Tabard.raw();
        let provider = provider_with(vec![raw], vec![]);
        let lookup = Lookup::new(&provider);
        let err = ItemBuilder::new(&lookup).build(&item_ref(100, &[])).unwrap_err();
        assert!(matches!(err, Error::UnscalableMod { item_id: 100, .. }));
    }

    #[test]
    fn test_scaled_gem() {
        let mut gem = raw_item(173128, 1);
        gem.mods.clear();
        gem.gem_properties = 3840;
        let mut provider = provider_with(vec![raw_item(100, 226), gem], vec![]);
        provider.insert(
            FileType::GemData,
            Table::GemProperties(vec![RawGemProperty {
                id: 3840,
                enchant_id: 6591,
                colour: SocketColor::PRISMATIC.0,
                min_item_level: 0,
            }]),
        );
        provider.insert(
            FileType::ItemEnchantData,
            Table::ItemEnchantments(vec![enchantment(6591, -1, 0.25, 0)]),
        );
        let lookup = Lookup::new(&provider);
        let mut item_ref = item_ref(100, &[]);
        item_ref.gem_ids = vec![173128, 0];
        let item = ItemBuilder::new(&lookup).build(&item_ref).unwrap().unwrap();

        assert_eq!(item.gems.len(), 1);
        assert_eq!(item.gems[0].enchant_id, 6591);
        assert_eq!(item.gems[0].stat_type, ItemModType::CRIT_RATING);
        // 0.25 * 64.0 at the reference level
        assert_eq!(item.gems[0].stat_rating, 16);
    }

    #[test]
    fn test_spell_linked_gem_is_unsupported() {
        let mut gem = raw_item(173128, 1);
        gem.mods.clear();
        gem.gem_properties = 3840;
        let mut provider = provider_with(vec![raw_item(100, 226), gem], vec![]);
        provider.insert(
            FileType::GemData,
            Table::GemProperties(vec![RawGemProperty {
                id: 3840,
                enchant_id: 6591,
                colour: 1,
                min_item_level: 0,
            }]),
        );
        provider.insert(
            FileType::ItemEnchantData,
            Table::ItemEnchantments(vec![enchantment(6591, 0, 0.0, 355169)]),
        );
        let lookup = Lookup::new(&provider);
        let mut item_ref = item_ref(100, &[]);
        item_ref.gem_ids = vec![173128];
        let err = ItemBuilder::new(&lookup).build(&item_ref).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFeature(_)));
    }

    #[test]
    fn test_builds_are_repeatable() {
        let provider = provider_with(vec![raw_item(100, 200)], vec![bonus(1, 7000, 1, 26, 0)]);
        let lookup = Lookup::new(&provider);
        let builder = ItemBuilder::new(&lookup);
        let first = builder.build(&item_ref(100, &[7000])).unwrap();
        let second = builder.build(&item_ref(100, &[7000])).unwrap();
        assert_eq!(first, second);
    }
}
