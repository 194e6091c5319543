// Player starting stats
pub const PLAYER_START_HP: u32 = 100;
pub const PLAYER_BASE_ATTACK: u32 = 2;
pub const PLAYER_BASE_DEFENSE: u32 = 0;
// Upper bounds accepted for configured starting stats
pub const PLAYER_START_HP_CAP: u32 = 1_000_000;
pub const PLAYER_BASE_STAT_CAP: u32 = 10_000;

// Level layout: rows and cols are each rolled in this range
pub const LEVEL_GRID_MIN: usize = 5;
pub const LEVEL_GRID_MAX: usize = 8;
pub const LEVEL_GRID_FLOOR: usize = 3;
pub const LEVEL_GRID_CEILING: usize = 64;

// Content placement
pub const CONTENT_CELLS_DIVISOR: usize = 6;
pub const CONTENT_MIN_ROOMS: usize = 4;
pub const CELL_PICK_ATTEMPTS: u32 = 200;
// Weighted room kinds: (chest, monster, trap, empty)
pub const ROOM_KIND_WEIGHTS: [u32; 4] = [30, 40, 20, 10];
pub const CHEST_LOCKED_CHANCE: f64 = 0.5;

// Traps: roll(TRAP_DAMAGE_BASE_MIN + d, TRAP_DAMAGE_BASE_MAX + d * TRAP_DAMAGE_MAX_STEP)
pub const TRAP_DAMAGE_BASE_MIN: u32 = 2;
pub const TRAP_DAMAGE_BASE_MAX: u32 = 5;
pub const TRAP_DAMAGE_MAX_STEP: u32 = 3;

// Enemy stats: (base, per-difficulty step) for the low and high end of each roll
pub const ENEMY_HP_MIN: (u32, u32) = (5, 2);
pub const ENEMY_HP_MAX: (u32, u32) = (8, 4);
pub const ENEMY_ATTACK_MIN: (u32, u32) = (1, 1);
pub const ENEMY_ATTACK_MAX: (u32, u32) = (2, 2);
pub const ENEMY_EXP: (u32, u32) = (5, 2);

// Loot table, rolled over 0..=LOOT_ROLL_MAX
pub const LOOT_ROLL_MAX: u32 = 100;
pub const LOOT_POTION_BELOW: u32 = 40;
pub const LOOT_WEAPON_BELOW: u32 = 70;
pub const LOOT_POTION_HEAL_MIN: (u32, u32) = (5, 2);
pub const LOOT_POTION_HEAL_MAX: (u32, u32) = (20, 3);
pub const LOOT_GEAR_BONUS_MIN: (u32, u32) = (1, 1);
pub const LOOT_GEAR_BONUS_MAX: (u32, u32) = (3, 2);
pub const LOOT_EXTRA_POTION_CHANCE: f64 = 0.2;
pub const LOOT_EXTRA_POTION_HEAL: (u32, u32) = (3, 8);

// Combat
pub const ENEMY_LOOT_DROP_CHANCE: f64 = 0.5;
pub const FLEE_BASE_CHANCE: i64 = 50;
pub const FLEE_CHANCE_PER_ATTACK: i64 = 5;
pub const FLEE_CHANCE_MIN: i64 = 10;
pub const FLEE_CHANCE_MAX: i64 = 90;
pub const FLEE_ROLL_MAX: u32 = 100;

// Level transitions
pub const LEVEL_HEAL_BASE: u32 = 10;
pub const LEVEL_HEAL_MIN: u32 = 5;
pub const STARTER_POTION_CHANCE: f64 = 0.7;
pub const STARTER_POTION_HEAL: (u32, u32) = (6, 18);
