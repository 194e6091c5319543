use rand::Rng;

use super::logic::attack_damage;
use crate::core::constants::*;
use crate::core::rolls::{roll, scaled, scaled_roll};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    /// Experience granted when defeated
    pub exp: u32,
}

impl Enemy {
    pub fn new(name: String, hp: u32, attack: u32, defense: u32, exp: u32) -> Self {
        Self {
            name,
            hp,
            attack,
            defense,
            exp,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies a raw hit, reduced by this enemy's defense. Returns damage dealt.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let dealt = attack_damage(raw, self.defense);
        self.hp = self.hp.saturating_sub(dealt);
        dealt
    }
}

/// Generates a goblin whose stats scale linearly with difficulty.
pub fn generate_enemy(difficulty: u32, rng: &mut impl Rng) -> Enemy {
    let hp = scaled_roll(rng, ENEMY_HP_MIN, ENEMY_HP_MAX, difficulty);
    let attack = scaled_roll(rng, ENEMY_ATTACK_MIN, ENEMY_ATTACK_MAX, difficulty);
    let defense = roll(rng, 0, difficulty);
    Enemy::new(
        format!("Goblin L{difficulty}"),
        hp,
        attack,
        defense,
        scaled(ENEMY_EXP, difficulty),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_take_damage_reduced_by_defense() {
        let mut enemy = Enemy::new("Rat".to_string(), 10, 1, 2, 3);
        assert_eq!(enemy.take_damage(5), 3);
        assert_eq!(enemy.hp, 7);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut enemy = Enemy::new("Slime".to_string(), 10, 1, 6, 3);
        assert_eq!(enemy.take_damage(4), 0);
        assert_eq!(enemy.hp, 10);
    }

    #[test]
    fn test_enemy_dies_at_zero_hp() {
        let mut enemy = Enemy::new("Bat".to_string(), 3, 1, 0, 3);
        enemy.take_damage(10);
        assert_eq!(enemy.hp, 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_generated_enemy_in_difficulty_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for difficulty in 1..=5 {
            for _ in 0..100 {
                let enemy = generate_enemy(difficulty, &mut rng);
                assert!(enemy.hp >= 5 + 2 * difficulty && enemy.hp <= 8 + 4 * difficulty);
                assert!(enemy.attack >= 1 + difficulty && enemy.attack <= 2 + 2 * difficulty);
                assert!(enemy.defense <= difficulty);
                assert_eq!(enemy.exp, 5 + 2 * difficulty);
                assert_eq!(enemy.name, format!("Goblin L{difficulty}"));
            }
        }
    }
}
