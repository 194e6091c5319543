//! Combat round resolution.
//!
//! These functions resolve one player-initiated round against an enemy. The
//! caller owns phase tracking and movement; nothing here reads input.

use rand::Rng;

use super::types::Enemy;
use crate::character::Player;
use crate::core::constants::{
    ENEMY_LOOT_DROP_CHANCE, FLEE_BASE_CHANCE, FLEE_CHANCE_MAX, FLEE_CHANCE_MIN,
    FLEE_CHANCE_PER_ATTACK, FLEE_ROLL_MAX,
};
use crate::core::rolls::chance;
use crate::items::{generate_loot, Item};

/// Damage a hit of `attack` deals against `defense`, floored at zero.
pub fn attack_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense)
}

/// Percent chance to escape: `50 + 5 * (player_attack - enemy_attack)`,
/// clamped to 10..=90.
pub fn flee_chance(player_attack: u32, enemy_attack: u32) -> u32 {
    let diff = player_attack as i64 - enemy_attack as i64;
    let raw = FLEE_BASE_CHANCE + FLEE_CHANCE_PER_ATTACK * diff;
    raw.clamp(FLEE_CHANCE_MIN, FLEE_CHANCE_MAX) as u32
}

/// A flee roll in 1..=100 succeeds when it does not exceed the chance.
pub fn flee_succeeds(chance: u32, roll: u32) -> bool {
    roll <= chance
}

pub fn roll_flee(rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=FLEE_ROLL_MAX)
}

/// How a combat round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Both sides still standing; combat continues
    Ongoing,
    /// Enemy dropped; experience already granted, loot already in inventory
    EnemyDefeated { exp: u32, loot: Vec<Item> },
    /// Player escaped; caller relocates them
    Fled,
    /// Player hp reached zero
    PlayerDied,
}

/// Result of one combat round.
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub messages: Vec<String>,
    pub outcome: RoundOutcome,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    /// Enemy got its counter-attack this round
    pub enemy_struck: bool,
}

impl RoundReport {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            outcome: RoundOutcome::Ongoing,
            damage_dealt: 0,
            damage_taken: 0,
            enemy_struck: false,
        }
    }
}

/// Enemy hits back for its full attack, reduced by the player's defense.
fn enemy_retaliates(player: &mut Player, enemy: &Enemy, report: &mut RoundReport) {
    let taken = player.take_damage(enemy.attack);
    report.damage_taken += taken;
    report.enemy_struck = true;
    report.messages.push(format!(
        "{} attacks! You take {} damage. HP: {}/{}",
        enemy.name, taken, player.hp, player.max_hp
    ));
    if !player.is_alive() {
        report.messages.push("You died in battle.".to_string());
        report.outcome = RoundOutcome::PlayerDied;
    }
}

/// Player swings at the enemy. A surviving enemy retaliates.
pub fn resolve_attack(
    player: &mut Player,
    enemy: &mut Enemy,
    difficulty: u32,
    rng: &mut impl Rng,
) -> RoundReport {
    let mut report = RoundReport::new();

    let attack = player.attack_value();
    let dealt = enemy.take_damage(attack);
    report.damage_dealt = dealt;
    report.messages.push(format!(
        "You attack ({}) and deal {} damage. {} HP: {}",
        attack, dealt, enemy.name, enemy.hp
    ));

    if !enemy.is_alive() {
        player.exp += enemy.exp;
        report.messages.push(format!(
            "You defeated {}! Gained {} experience.",
            enemy.name, enemy.exp
        ));

        let loot = if chance(rng, ENEMY_LOOT_DROP_CHANCE) {
            generate_loot(difficulty, rng)
        } else {
            Vec::new()
        };
        for item in &loot {
            report
                .messages
                .push(format!("Loot: {} - {}", item.name(), item.description()));
            player.add_item(item.clone());
        }

        report.outcome = RoundOutcome::EnemyDefeated {
            exp: enemy.exp,
            loot,
        };
        return report;
    }

    enemy_retaliates(player, enemy, &mut report);
    report
}

/// Player tries to run. A failed attempt costs a hit from the enemy.
pub fn resolve_flee(player: &mut Player, enemy: &Enemy, rng: &mut impl Rng) -> RoundReport {
    let chance = flee_chance(player.attack_value(), enemy.attack);
    resolve_flee_roll(player, enemy, chance, roll_flee(rng))
}

/// Flee resolution with an explicit roll, so scripted rounds stay deterministic.
pub fn resolve_flee_roll(
    player: &mut Player,
    enemy: &Enemy,
    chance: u32,
    roll: u32,
) -> RoundReport {
    let mut report = RoundReport::new();
    if flee_succeeds(chance, roll) {
        report.messages.push("You got away!".to_string());
        report.outcome = RoundOutcome::Fled;
        return report;
    }

    report
        .messages
        .push(format!("You failed to escape ({roll} > {chance})."));
    enemy_retaliates(player, enemy, &mut report);
    report
}
