//! The adventurer: position, vitals, equipment, and inventory.

use crate::core::config::GameConfig;
use crate::items::{Equipment, Item};
use thiserror::Error;

/// Rejected inventory operation. Never changes player state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Invalid index: {index} (inventory holds {len} item(s)).")]
    OutOfRange { index: usize, len: usize },
    #[error("{0} is not a consumable.")]
    NotConsumable(String),
    #[error("{0} cannot be equipped.")]
    NotEquippable(String),
}

/// What a successful `use` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedConsumable {
    pub name: String,
    pub heal: u32,
}

/// What a successful `equip` did. The replaced item is dropped by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipped {
    pub item: Item,
    pub replaced: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub row: usize,
    pub col: usize,
    pub hp: u32,
    pub max_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub equipment: Equipment,
    pub inventory: Vec<Item>,
    pub keys: u32,
    /// Deepest dungeon level reached; also the current difficulty
    pub level: u32,
    pub exp: u32,
}

impl Player {
    pub fn new(config: &GameConfig, position: (usize, usize)) -> Self {
        Self {
            row: position.0,
            col: position.1,
            hp: config.start_hp,
            max_hp: config.start_hp,
            base_attack: config.base_attack,
            base_defense: config.base_defense,
            equipment: Equipment::new(),
            inventory: Vec::new(),
            keys: 0,
            level: 1,
            exp: 0,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn set_position(&mut self, position: (usize, usize)) {
        self.row = position.0;
        self.col = position.1;
    }

    pub fn attack_value(&self) -> u32 {
        self.base_attack.saturating_add(self.equipment.attack_bonus())
    }

    pub fn defense_value(&self) -> u32 {
        self.base_defense.saturating_add(self.equipment.defense_bonus())
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies a raw hit reduced by defense. Returns damage actually taken.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let taken = raw.saturating_sub(self.defense_value());
        self.hp = self.hp.saturating_sub(taken);
        taken
    }

    /// Heals up to max hp. Returns hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    fn check_index(&self, index: usize) -> Result<(), InventoryError> {
        if index >= self.inventory.len() {
            return Err(InventoryError::OutOfRange {
                index,
                len: self.inventory.len(),
            });
        }
        Ok(())
    }

    /// Drinks the consumable at `index`, removing it from the inventory.
    pub fn use_consumable(&mut self, index: usize) -> Result<UsedConsumable, InventoryError> {
        self.check_index(index)?;
        let heal = match &self.inventory[index] {
            Item::Consumable { heal, .. } => *heal,
            other => return Err(InventoryError::NotConsumable(other.name().to_string())),
        };
        let item = self.inventory.remove(index);
        self.heal(heal);
        Ok(UsedConsumable {
            name: item.name().to_string(),
            heal,
        })
    }

    /// Equips the item at `index`. Whatever held the slot before is dropped
    /// for good. Consumables stay in the inventory.
    pub fn equip_from_inventory(&mut self, index: usize) -> Result<Equipped, InventoryError> {
        self.check_index(index)?;
        if self.inventory[index].slot().is_none() {
            return Err(InventoryError::NotEquippable(
                self.inventory[index].name().to_string(),
            ));
        }
        let item = self.inventory.remove(index);
        match self.equipment.equip(item.clone()) {
            Ok(replaced) => Ok(Equipped { item, replaced }),
            Err(item) => {
                let name = item.name().to_string();
                self.inventory.insert(index, item);
                Err(InventoryError::NotEquippable(name))
            }
        }
    }
}
