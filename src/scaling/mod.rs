//! Turns decoded tables into scaled items and spells.

mod item;
mod lookup;
mod spell;
#[cfg(test)]
mod test_support;

pub use item::ItemBuilder;
pub use lookup::{slot_column, Lookup, SlotColumn};
pub use spell::{ScalingContext, SpellBuilder};

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::{SimcItem, SimcSpell};
use crate::profile::ItemRef;
use crate::provider::DataProvider;
use crate::schema::{InventoryType, ItemQuality};

/// Player level gem enchantments are scaled at, whatever the profile says
pub const GEM_SCALING_REFERENCE_LEVEL: u32 = 60;

/// Entry point over one [`DataProvider`]. Holds no state between builds.
pub struct ScalingEngine<'p> {
    lookup: Lookup<'p>,
}

impl<'p> ScalingEngine<'p> {
    pub fn new(provider: &'p dyn DataProvider) -> Self {
        Self {
            lookup: Lookup::new(provider),
        }
    }

    pub fn lookup(&self) -> &Lookup<'p> {
        &self.lookup
    }

    pub fn build_item(&self, item_ref: &ItemRef) -> Result<Option<SimcItem>> {
        ItemBuilder::new(&self.lookup).build(item_ref)
    }

    /// Build every item of a profile. Missing, unsupported and unscalable
    /// items are reported per item without stopping the batch.
    pub fn build_items(&self, item_refs: &[ItemRef]) -> Result<Vec<Result<SimcItem>>> {
        let mut built = Vec::with_capacity(item_refs.len());
        for item_ref in item_refs {
            let result = match self.build_item(item_ref) {
                Ok(Some(item)) => Ok(item),
                Ok(None) => Err(Error::NotFound {
                    kind: "item",
                    id: item_ref.item_id,
                }),
                Err(e) if e.is_recoverable() => {
                    warn!("skipping item {}: {}", item_ref.item_id, e);
                    Err(e)
                }
                Err(e) => return Err(e),
            };
            built.push(result);
        }
        info!(
            "built {} of {} items",
            built.iter().filter(|r| r.is_ok()).count(),
            item_refs.len()
        );
        Ok(built)
    }

    pub fn build_item_spell(
        &self,
        spell_id: u32,
        item_level: i32,
        quality: ItemQuality,
        inventory_type: InventoryType,
    ) -> Result<Option<SimcSpell>> {
        SpellBuilder::new(&self.lookup).build_item_spell(spell_id, item_level, quality, inventory_type)
    }

    pub fn build_player_spell(&self, player_level: u32, spell_id: u32) -> Result<Option<SimcSpell>> {
        SpellBuilder::new(&self.lookup).build_player_spell(player_level, spell_id)
    }

    pub fn spell_id_for_conduit(&self, conduit_id: u32) -> Result<Option<u32>> {
        self.lookup.conduit_spell_id(conduit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::model::Table;
    use crate::schema::FileType;

    #[test]
    fn test_batch_continues_past_missing_items() {
        let mut provider = base_provider();
        provider.insert(FileType::ItemDataOld, Table::Items(vec![raw_item(100, 226)]));
        let engine = ScalingEngine::new(&provider);

        let refs = vec![
            ItemRef {
                item_id: 5,
                ..Default::default()
            },
            ItemRef {
                item_id: 100,
                equipped: true,
                ..Default::default()
            },
        ];
        let built = engine.build_items(&refs).unwrap();
        assert!(matches!(built[0], Err(Error::NotFound { kind: "item", id: 5 })));
        assert_eq!(built[1].as_ref().unwrap().item_level, 226);
    }

    #[test]
    fn test_unscalable_item_does_not_stop_the_batch() {
        let mut shirt = raw_item(101, 226);
        shirt.inventory_type = InventoryType::Body.raw();
        let mut provider = base_provider();
        provider.insert(
            FileType::ItemDataOld,
            Table::Items(vec![raw_item(100, 226), shirt]),
        );
        let engine = ScalingEngine::new(&provider);

        let refs = vec![ItemRef::new(100), ItemRef::new(101)];
        let built = engine.build_items(&refs).unwrap();
        assert_eq!(built[0].as_ref().unwrap().item_level, 226);
        assert!(matches!(built[1], Err(Error::UnscalableMod { item_id: 101, .. })));
    }

    #[test]
    fn test_provider_errors_stop_the_batch() {
        let mut provider = base_provider();
        provider.insert(FileType::ItemDataOld, Table::Items(vec![raw_item(100, 226)]));
        provider.insert(FileType::ItemBonusData, Table::Version("9.0.5".into()));
        let engine = ScalingEngine::new(&provider);

        let refs = vec![
            ItemRef::new(100),
            ItemRef {
                bonus_ids: vec![1498],
                ..ItemRef::new(100)
            },
        ];
        assert!(matches!(
            engine.build_items(&refs),
            Err(Error::TableMismatch { .. })
        ));
    }
}
