use super::types::Item;
use crate::core::constants::{
    LOOT_EXTRA_POTION_CHANCE, LOOT_EXTRA_POTION_HEAL, LOOT_GEAR_BONUS_MAX, LOOT_GEAR_BONUS_MIN,
    LOOT_POTION_BELOW, LOOT_POTION_HEAL_MAX, LOOT_POTION_HEAL_MIN, LOOT_ROLL_MAX,
    LOOT_WEAPON_BELOW, STARTER_POTION_HEAL,
};
use crate::core::rolls::{chance, roll, scaled_roll};
use rand::Rng;

/// Generate one loot bundle: a potion, weapon, or armor scaled by
/// difficulty, sometimes followed by a small potion.
pub fn generate_loot(difficulty: u32, rng: &mut impl Rng) -> Vec<Item> {
    let mut loot = Vec::with_capacity(2);

    let table_roll = rng.gen_range(0..=LOOT_ROLL_MAX);
    let item = if table_roll < LOOT_POTION_BELOW {
        Item::potion(scaled_roll(
            rng,
            LOOT_POTION_HEAL_MIN,
            LOOT_POTION_HEAL_MAX,
            difficulty,
        ))
    } else if table_roll < LOOT_WEAPON_BELOW {
        Item::weapon(scaled_roll(
            rng,
            LOOT_GEAR_BONUS_MIN,
            LOOT_GEAR_BONUS_MAX,
            difficulty,
        ))
    } else {
        Item::armor(scaled_roll(
            rng,
            LOOT_GEAR_BONUS_MIN,
            LOOT_GEAR_BONUS_MAX,
            difficulty,
        ))
    };
    loot.push(item);

    if chance(rng, LOOT_EXTRA_POTION_CHANCE) {
        let (min, max) = LOOT_EXTRA_POTION_HEAL;
        loot.push(Item::small_potion(roll(rng, min, max)));
    }

    loot
}

/// Potion handed out at the start of a level.
pub fn starter_potion(rng: &mut impl Rng) -> Item {
    let (min, max) = STARTER_POTION_HEAL;
    Item::potion(roll(rng, min, max))
}
