//! Read-only queries over provider tables.

use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::*;
use crate::provider::DataProvider;
use crate::schema::*;

/// Random property budget column for an item slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotColumn {
    Column(usize),
    NotSlotted,
}

/// Budget column for (item class, subclass, inventory type)
pub fn slot_column(item_class: i32, item_subclass: i32, inventory_type: InventoryType) -> SlotColumn {
    use InventoryType::*;
    match item_class {
        ITEM_CLASS_WEAPON => match item_subclass {
            WEAPON_SUBCLASS_AXE_2H
            | WEAPON_SUBCLASS_BOW
            | WEAPON_SUBCLASS_GUN
            | WEAPON_SUBCLASS_MACE_2H
            | WEAPON_SUBCLASS_POLEARM
            | WEAPON_SUBCLASS_SWORD_2H
            | WEAPON_SUBCLASS_STAFF
            | WEAPON_SUBCLASS_THROWN
            | WEAPON_SUBCLASS_CROSSBOW => SlotColumn::Column(0),
            _ => SlotColumn::Column(3),
        },
        ITEM_CLASS_ARMOR => match inventory_type {
            Head | Chest | Legs | Robe => SlotColumn::Column(0),
            Shoulders | Waist | Feet | Hands | Trinket => SlotColumn::Column(1),
            Neck | Finger | Cloak | Wrists => SlotColumn::Column(2),
            WeaponOffHand | Holdable | Shield => SlotColumn::Column(3),
            _ => SlotColumn::NotSlotted,
        },
        _ => SlotColumn::NotSlotted,
    }
}

/// A provider table with row positions grouped by id, in table order
struct IdIndex {
    table: Arc<Table>,
    rows: HashMap<u32, Vec<usize>>,
}

impl IdIndex {
    fn new<T>(table: Arc<Table>, rows: &[T], key: impl Fn(&T) -> u32) -> Self {
        let mut index: HashMap<u32, Vec<usize>> = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            index.entry(key(row)).or_default().push(pos);
        }
        Self { table, rows: index }
    }

    fn positions(&self, id: u32) -> &[usize] {
        self.rows.get(&id).map(|p| p.as_slice()).unwrap_or(&[])
    }

    fn first(&self, id: u32) -> Option<usize> {
        self.positions(id).first().copied()
    }
}

/// Query surface over a [`DataProvider`]. Item, spell and bonus tables are
/// indexed by id on first use and shared for the lifetime of the lookup.
pub struct Lookup<'p> {
    provider: &'p dyn DataProvider,
    new_items: OnceCell<IdIndex>,
    old_items: OnceCell<IdIndex>,
    spells: OnceCell<IdIndex>,
    bonuses: OnceCell<IdIndex>,
}

impl<'p> Lookup<'p> {
    pub fn new(provider: &'p dyn DataProvider) -> Self {
        Self {
            provider,
            new_items: OnceCell::new(),
            old_items: OnceCell::new(),
            spells: OnceCell::new(),
            bonuses: OnceCell::new(),
        }
    }

    fn item_index(&self, file_type: FileType) -> Result<&IdIndex> {
        let cell = match file_type {
            FileType::ItemDataNew => &self.new_items,
            _ => &self.old_items,
        };
        cell.get_or_try_init(|| {
            let table = self.provider.table(file_type)?;
            let index = IdIndex::new(table.clone(), table.items()?, |i: &RawItem| i.id);
            debug!("indexed {} {} rows", index.rows.len(), file_type);
            Ok::<_, Error>(index)
        })
    }

    pub fn item(&self, item_id: u32) -> Result<Option<&RawItem>> {
        let file_type = if FileType::ItemDataNew
            .item_id_range()
            .is_some_and(|r| r.contains(&item_id))
        {
            FileType::ItemDataNew
        } else {
            FileType::ItemDataOld
        };
        let index = self.item_index(file_type)?;
        let items = index.table.items()?;
        Ok(index.first(item_id).map(|pos| &items[pos]))
    }

    pub fn spell(&self, spell_id: u32) -> Result<Option<&RawSpell>> {
        let index = self.spells.get_or_try_init(|| {
            let table = self.provider.table(FileType::SpellData)?;
            Ok::<_, Error>(IdIndex::new(table.clone(), table.spells()?, |s: &RawSpell| s.id))
        })?;
        let spells = index.table.spells()?;
        Ok(index.first(spell_id).map(|pos| &spells[pos]))
    }

    /// Every bonus entry for `bonus_id`, in table order
    pub fn item_bonuses(&self, bonus_id: u32) -> Result<Vec<&RawItemBonus>> {
        let index = self.bonuses.get_or_try_init(|| {
            let table = self.provider.table(FileType::ItemBonusData)?;
            Ok::<_, Error>(IdIndex::new(
                table.clone(),
                table.item_bonuses()?,
                |b: &RawItemBonus| b.bonus_id,
            ))
        })?;
        let bonuses = index.table.item_bonuses()?;
        Ok(index
            .positions(bonus_id)
            .iter()
            .map(|&pos| &bonuses[pos])
            .collect())
    }

    pub fn gem_property(&self, gem_property_id: u32) -> Result<Option<RawGemProperty>> {
        let table = self.provider.table(FileType::GemData)?;
        Ok(table
            .gem_properties()?
            .iter()
            .find(|g| g.id == gem_property_id)
            .cloned())
    }

    pub fn enchantment(&self, enchant_id: u32) -> Result<Option<RawItemEnchantment>> {
        let table = self.provider.table(FileType::ItemEnchantData)?;
        Ok(table
            .item_enchantments()?
            .iter()
            .find(|e| e.id == enchant_id)
            .cloned())
    }

    pub fn random_props(&self, item_level: u32) -> Result<Option<RawRandomPropData>> {
        let table = self.provider.table(FileType::RandPropPoints)?;
        Ok(table
            .random_props()?
            .iter()
            .find(|r| r.item_level == item_level)
            .cloned())
    }

    /// Random property budget for an item of this level and quality.
    /// Missing levels read as a zero budget.
    pub fn item_budget(&self, item_level: u32, quality: ItemQuality, column: usize) -> Result<f64> {
        let Some(props) = self.random_props(item_level)? else {
            warn!("no random property row for item level {}", item_level);
            return Ok(0.0);
        };
        let budgets = match quality.budget_tier() {
            BudgetTier::Epic => &props.epic,
            BudgetTier::Rare => &props.rare,
            BudgetTier::Uncommon => &props.uncommon,
        };
        Ok(budgets.get(column).copied().unwrap_or(0.0))
    }

    fn multiplier(
        &self,
        file_type: FileType,
        item_level: u32,
        inventory_type: InventoryType,
    ) -> Result<f64> {
        let table = self.provider.table(file_type)?;
        let table = match file_type {
            FileType::StaminaMultipliers => table.stamina_multipliers()?,
            _ => table.combat_rating_multipliers()?,
        };
        let category = inventory_type.combat_rating_type();
        let Some(row) = category.row() else {
            warn!("{:?} has no combat rating category, using 1.0", inventory_type);
            return Ok(1.0);
        };
        Ok(table.value(row, item_level).unwrap_or_else(|| {
            warn!("item level {} outside {} table", item_level, file_type);
            1.0
        }))
    }

    pub fn combat_rating_multiplier(
        &self,
        item_level: u32,
        inventory_type: InventoryType,
    ) -> Result<f64> {
        self.multiplier(FileType::CombatRatingMultipliers, item_level, inventory_type)
    }

    pub fn stamina_multiplier(&self, item_level: u32, inventory_type: InventoryType) -> Result<f64> {
        self.multiplier(FileType::StaminaMultipliers, item_level, inventory_type)
    }

    /// Spell budget for a scaling class at a 1-indexed player level
    pub fn spell_scaling(&self, scaling: PlayerScaling, level: u32) -> Result<f64> {
        let table = self.provider.table(FileType::SpellScaling)?;
        Ok(table
            .spell_scaling()?
            .value(scaling.scaling_row(), level)
            .unwrap_or(0.0))
    }

    pub fn rppm_modifiers(&self, spell_id: u32) -> Result<Vec<RawRppmEntry>> {
        let table = self.provider.table(FileType::RppmData)?;
        Ok(table
            .rppm_modifiers()?
            .iter()
            .filter(|r| r.spell_id == spell_id)
            .cloned()
            .collect())
    }

    pub fn conduit_ranks(&self, spell_id: u32) -> Result<Vec<RawSpellConduitRankEntry>> {
        let table = self.provider.table(FileType::CovenantData)?;
        Ok(table
            .conduit_ranks()?
            .iter()
            .filter(|c| c.spell_id == spell_id)
            .cloned()
            .collect())
    }

    pub fn conduit_spell_id(&self, conduit_id: u32) -> Result<Option<u32>> {
        let table = self.provider.table(FileType::CovenantData)?;
        Ok(table
            .conduit_ranks()?
            .iter()
            .find(|c| c.conduit_id == conduit_id)
            .map(|c| c.spell_id))
    }

    /// Points of one curve ordered by index
    pub fn curve_points(&self, curve_id: u32) -> Result<Vec<RawCurvePoint>> {
        let table = self.provider.table(FileType::CurvePoints)?;
        let mut points: Vec<RawCurvePoint> = table
            .curve_points()?
            .iter()
            .filter(|p| p.curve_id == curve_id)
            .cloned()
            .collect();
        points.sort_by_key(|p| p.index);
        Ok(points)
    }

    pub fn traits_for_spell(&self, spell_id: u32) -> Result<Vec<RawTrait>> {
        let table = self.provider.table(FileType::TraitData)?;
        Ok(table
            .traits()?
            .iter()
            .filter(|t| t.spell_id == spell_id)
            .cloned()
            .collect())
    }

    pub fn game_data_version(&self) -> Result<String> {
        let table = self.provider.table(FileType::GameDataVersion)?;
        Ok(table.version()?.clone())
    }
}
