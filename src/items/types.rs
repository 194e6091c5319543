/// Equipment category an item occupies when equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

/// Anything that can sit in a chest, drop from an enemy, or be carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Weapon {
        name: String,
        description: String,
        atk: u32,
    },
    Armor {
        name: String,
        description: String,
        defense: u32,
    },
    Consumable {
        name: String,
        description: String,
        heal: u32,
    },
}

impl Item {
    pub fn weapon(atk: u32) -> Self {
        Item::Weapon {
            name: format!("Weapon +{atk}"),
            description: format!("+{atk} attack"),
            atk,
        }
    }

    pub fn armor(defense: u32) -> Self {
        Item::Armor {
            name: format!("Armor +{defense}"),
            description: format!("+{defense} defense"),
            defense,
        }
    }

    pub fn potion(heal: u32) -> Self {
        Item::Consumable {
            name: "Potion".to_string(),
            description: format!("Restores {heal} HP"),
            heal,
        }
    }

    pub fn small_potion(heal: u32) -> Self {
        Item::Consumable {
            name: "Small potion".to_string(),
            description: "Minor healing".to_string(),
            heal,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Item::Weapon { name, .. } | Item::Armor { name, .. } | Item::Consumable { name, .. } => {
                name
            }
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Item::Weapon { description, .. }
            | Item::Armor { description, .. }
            | Item::Consumable { description, .. } => description,
        }
    }

    /// Slot this item equips into, `None` for consumables.
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self {
            Item::Weapon { .. } => Some(EquipmentSlot::Weapon),
            Item::Armor { .. } => Some(EquipmentSlot::Armor),
            Item::Consumable { .. } => None,
        }
    }

    /// Returns the display label for the item's category.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Item::Weapon { .. } => "Weapon",
            Item::Armor { .. } => "Armor",
            Item::Consumable { .. } => "Consumable",
        }
    }

    /// Short stat summary, e.g. `ATK+3`.
    pub fn stat_label(&self) -> String {
        match self {
            Item::Weapon { atk, .. } => format!("ATK+{atk}"),
            Item::Armor { defense, .. } => format!("DEF+{defense}"),
            Item::Consumable { heal, .. } => format!("HEAL+{heal}"),
        }
    }
}
