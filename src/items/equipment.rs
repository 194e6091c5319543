use super::types::{EquipmentSlot, Item};

/// Player equipment slots. Holds at most one weapon and one armor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts an item into its slot and returns whatever was there before.
    /// Consumables are handed straight back.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, Item> {
        match item.slot() {
            Some(EquipmentSlot::Weapon) => Ok(self.weapon.replace(item)),
            Some(EquipmentSlot::Armor) => Ok(self.armor.replace(item)),
            None => Err(item),
        }
    }

    pub fn attack_bonus(&self) -> u32 {
        match &self.weapon {
            Some(Item::Weapon { atk, .. }) => *atk,
            _ => 0,
        }
    }

    pub fn defense_bonus(&self) -> u32 {
        match &self.armor {
            Some(Item::Armor { defense, .. }) => *defense,
            _ => 0,
        }
    }
}
