//! Dungeon procedural generation.

use rand::Rng;

use super::types::{Dungeon, Room, RoomKind};
use crate::combat::generate_enemy;
use crate::core::constants::{
    CELL_PICK_ATTEMPTS, CHEST_LOCKED_CHANCE, CONTENT_CELLS_DIVISOR, CONTENT_MIN_ROOMS,
    ROOM_KIND_WEIGHTS, TRAP_DAMAGE_BASE_MAX, TRAP_DAMAGE_BASE_MIN, TRAP_DAMAGE_MAX_STEP,
};
use crate::core::rolls::{chance, roll};
use crate::items::generate_loot;

/// Kinds sampled for content cells, paired index-for-index with `ROOM_KIND_WEIGHTS`
const WEIGHTED_KINDS: [RoomKind; 4] = [
    RoomKind::Chest,
    RoomKind::Monster,
    RoomKind::Trap,
    RoomKind::Empty,
];

/// Generates a complete level: portal, key, content rooms, empty center.
pub fn generate_dungeon(rows: usize, cols: usize, difficulty: u32, rng: &mut impl Rng) -> Dungeon {
    let mut dungeon = Dungeon::new(rows, cols, difficulty);

    // Portal starts inactive; picking up the key turns it on
    let portal = random_cell(&dungeon, &[], true, rng);
    dungeon.portal_position = portal;
    dungeon.grid[portal.0][portal.1] = Room::new(RoomKind::Portal);

    let key = random_cell(&dungeon, &[portal], true, rng);
    dungeon.key_position = key;
    dungeon.grid[key.0][key.1] = Room::new(RoomKind::Key);

    for _ in 0..content_quota(rows, cols) {
        let (row, col) = random_cell(&dungeon, &[portal, key], false, rng);
        match roll_room_kind(rng) {
            RoomKind::Chest => {
                let locked = chance(rng, CHEST_LOCKED_CHANCE);
                let loot = generate_loot(difficulty, rng);
                dungeon.grid[row][col] = Room::chest(loot, locked);
            }
            RoomKind::Monster => {
                dungeon.grid[row][col] = Room::monster(generate_enemy(difficulty, rng));
            }
            RoomKind::Trap => {
                dungeon.grid[row][col] = Room::trap(roll_trap_damage(difficulty, rng));
            }
            // An empty roll leaves whatever is already there
            _ => {}
        }
    }

    let (cr, cc) = dungeon.center();
    dungeon.grid[cr][cc] = Room::empty();

    tracing::debug!(
        rows,
        cols,
        difficulty,
        portal = ?portal,
        key = ?key,
        chests = dungeon.count_kind(RoomKind::Chest),
        monsters = dungeon.count_kind(RoomKind::Monster),
        traps = dungeon.count_kind(RoomKind::Trap),
        "dungeon generated"
    );

    dungeon
}

/// Number of content placements: one per six cells, at least four.
pub fn content_quota(rows: usize, cols: usize) -> usize {
    (rows * cols / CONTENT_CELLS_DIVISOR).max(CONTENT_MIN_ROOMS)
}

/// Samples chest/monster/trap/empty by the 30/40/20/10 weights.
pub fn roll_room_kind(rng: &mut impl Rng) -> RoomKind {
    let total: u32 = ROOM_KIND_WEIGHTS.iter().sum();
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in WEIGHTED_KINDS.iter().zip(ROOM_KIND_WEIGHTS) {
        if roll < weight {
            return *kind;
        }
        roll -= weight;
    }
    RoomKind::Empty
}

pub fn roll_trap_damage(difficulty: u32, rng: &mut impl Rng) -> u32 {
    roll(
        rng,
        TRAP_DAMAGE_BASE_MIN + difficulty,
        TRAP_DAMAGE_BASE_MAX + difficulty * TRAP_DAMAGE_MAX_STEP,
    )
}

/// Rolls level dimensions, each side in `min..=max`.
pub fn roll_level_size(min: usize, max: usize, rng: &mut impl Rng) -> (usize, usize) {
    let max = max.max(min);
    (rng.gen_range(min..=max), rng.gen_range(min..=max))
}

/// Picks a random cell outside `exclude` (and off-center if asked).
///
/// Random picks are retried a bounded number of times; after that a
/// row-major scan returns the first allowed cell, so a crowded grid still
/// terminates. Falls back to `(0, 0)` only when nothing qualifies.
pub fn random_cell(
    dungeon: &Dungeon,
    exclude: &[(usize, usize)],
    exclude_center: bool,
    rng: &mut impl Rng,
) -> (usize, usize) {
    let center = dungeon.center();
    let allowed = |cell: (usize, usize)| {
        !(exclude.contains(&cell) || (exclude_center && cell == center))
    };

    for _ in 0..CELL_PICK_ATTEMPTS {
        let cell = (
            rng.gen_range(0..dungeon.rows),
            rng.gen_range(0..dungeon.cols),
        );
        if allowed(cell) {
            return cell;
        }
    }

    tracing::trace!("random cell attempts exhausted, scanning");
    (0..dungeon.rows)
        .flat_map(|row| (0..dungeon.cols).map(move |col| (row, col)))
        .find(|&cell| allowed(cell))
        .unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_content_quota() {
        assert_eq!(content_quota(5, 5), 4);
        assert_eq!(content_quota(6, 6), 6);
        assert_eq!(content_quota(8, 8), 10);
        assert_eq!(content_quota(3, 3), 4);
    }

    #[test]
    fn test_single_portal_and_key() {
        let mut rng = create_test_rng();
        for _ in 0..200 {
            let (rows, cols) = roll_level_size(5, 8, &mut rng);
            let dungeon = generate_dungeon(rows, cols, 1, &mut rng);
            assert_eq!(dungeon.count_kind(RoomKind::Portal), 1);
            assert_eq!(dungeon.count_kind(RoomKind::Key), 1);
        }
    }

    #[test]
    fn test_center_is_empty() {
        let mut rng = create_test_rng();
        for difficulty in 1..=6 {
            let dungeon = generate_dungeon(7, 6, difficulty, &mut rng);
            let (r, c) = dungeon.center();
            assert_eq!(dungeon.grid[r][c].kind, RoomKind::Empty);
            assert!(dungeon.grid[r][c].enemy.is_none());
        }
    }

    #[test]
    fn test_seeded_five_by_five_portal_and_key_placement() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let dungeon = generate_dungeon(5, 5, 1, &mut rng);
            assert_ne!(dungeon.portal_position, dungeon.key_position);
            assert_ne!(dungeon.portal_position, (2, 2));
            assert_ne!(dungeon.key_position, (2, 2));
            let (pr, pc) = dungeon.portal_position;
            assert_eq!(dungeon.grid[pr][pc].kind, RoomKind::Portal);
            assert!(!dungeon.grid[pr][pc].portal_active);
        }
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let a = generate_dungeon(6, 6, 2, &mut ChaCha8Rng::seed_from_u64(42));
        let b = generate_dungeon(6, 6, 2, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_rooms_are_populated() {
        let mut rng = create_test_rng();
        for _ in 0..50 {
            let dungeon = generate_dungeon(8, 8, 3, &mut rng);
            for room in dungeon.grid.iter().flatten() {
                match room.kind {
                    RoomKind::Chest => assert!(!room.loot.is_empty()),
                    RoomKind::Monster => assert!(room.enemy.is_some()),
                    RoomKind::Trap => {
                        assert!(room.trap_damage >= 5 && room.trap_damage <= 14)
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_room_kind_weights_roughly_hold() {
        let mut rng = create_test_rng();
        let mut monsters = 0;
        let mut empties = 0;
        for _ in 0..10_000 {
            match roll_room_kind(&mut rng) {
                RoomKind::Monster => monsters += 1,
                RoomKind::Empty => empties += 1,
                _ => {}
            }
        }
        assert!((3_500..4_500).contains(&monsters), "monsters = {monsters}");
        assert!((700..1_300).contains(&empties), "empties = {empties}");
    }

    #[test]
    fn test_trap_damage_bounds() {
        let mut rng = create_test_rng();
        for _ in 0..200 {
            let dmg = roll_trap_damage(2, &mut rng);
            assert!((4..=11).contains(&dmg));
        }
    }

    #[test]
    fn test_random_cell_falls_back_to_scan() {
        // 3x3 grid with everything but (2, 1) excluded
        let dungeon = Dungeon::new(3, 3, 1);
        let exclude: Vec<(usize, usize)> = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .filter(|&cell| cell != (2, 1) && cell != (1, 1))
            .collect();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(random_cell(&dungeon, &exclude, true, &mut rng), (2, 1));
        }
    }

    #[test]
    fn test_random_cell_nothing_allowed() {
        let dungeon = Dungeon::new(3, 3, 1);
        let exclude: Vec<(usize, usize)> = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .collect();
        let mut rng = create_test_rng();
        assert_eq!(random_cell(&dungeon, &exclude, false, &mut rng), (0, 0));
    }

    #[test]
    fn test_roll_level_size_range() {
        let mut rng = create_test_rng();
        for _ in 0..200 {
            let (rows, cols) = roll_level_size(5, 8, &mut rng);
            assert!((5..=8).contains(&rows));
            assert!((5..=8).contains(&cols));
        }
    }
}
