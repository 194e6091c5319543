//! The turn engine.
//!
//! [`Game::submit`] takes one line of input and resolves it against the
//! current [`Phase`]. All prompts that used to block on input (locked
//! chests, combat rounds, the game-over menu) are phases of the same state
//! machine, so the engine never reads from a terminal itself.

use rand::Rng;

use super::command::{CombatAction, Command};
use super::config::GameConfig;
use super::constants::{LEVEL_HEAL_BASE, LEVEL_HEAL_MIN, STARTER_POTION_CHANCE};
use super::events::GameEvent;
use super::rolls::chance;
use crate::character::Player;
use crate::combat::{resolve_attack, resolve_flee, RoundOutcome, RoundReport};
use crate::dungeon::{
    enter_room, flee_destination, generate_dungeon, roll_level_size, unlock_chest, Dungeon,
    NextStep, RoomEntry,
};
use crate::items::starter_potion;
use crate::ui::{
    combat_help, enemy_line, exploration_help, inventory_lines, render_map, status_line,
};

/// Which kind of input the engine is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Normal movement and inventory commands
    Exploring,
    /// Waiting for y/n on spending a key for the chest at `at`
    ChestPrompt { at: (usize, usize) },
    /// Fighting the monster in the room at `at`
    Combat { at: (usize, usize) },
    /// Player died; waiting for restart or exit
    GameOver,
    /// Game is finished; further input is ignored
    Exited,
}

/// Whether the front end should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Everything one call to [`Game::submit`] produced.
#[derive(Debug, Clone)]
pub struct TurnResult {
    pub messages: Vec<String>,
    pub events: Vec<GameEvent>,
    pub flow: Flow,
}

impl TurnResult {
    fn new(messages: Vec<String>) -> Self {
        Self {
            messages,
            events: Vec::new(),
            flow: Flow::Continue,
        }
    }

    fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    fn absorb_entry(&mut self, entry: RoomEntry) -> NextStep {
        self.messages.extend(entry.messages);
        self.events.extend(entry.events);
        entry.next
    }

    fn absorb_round(&mut self, report: &RoundReport) {
        self.messages.extend(report.messages.iter().cloned());
    }
}

/// One running game: the active level, the player, and the random source.
pub struct Game<R: Rng> {
    rng: R,
    config: GameConfig,
    dungeon: Dungeon,
    player: Player,
    phase: Phase,
    /// Output produced outside of `submit` (the opening level), shown next
    pending: Vec<String>,
}

/// Rolls a size and generates a level of the given difficulty.
fn build_level(config: &GameConfig, level: u32, rng: &mut impl Rng) -> Dungeon {
    let (rows, cols) = roll_level_size(config.grid_min, config.grid_max, rng);
    generate_dungeon(rows, cols, level, rng)
}

impl<R: Rng> Game<R> {
    /// Starts a fresh game on level 1.
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let dungeon = build_level(&config, 1, &mut rng);
        let player = Player::new(&config, dungeon.center());
        let mut game = Self {
            rng,
            config,
            dungeon,
            player,
            phase: Phase::Exploring,
            pending: Vec::new(),
        };
        let mut intro = Vec::new();
        game.announce_level(&mut intro);
        game.pending = intro;
        game
    }

    /// Resumes from an explicit level and player, e.g. for scripted scenarios.
    pub fn with_state(config: GameConfig, rng: R, dungeon: Dungeon, player: Player) -> Self {
        Self {
            rng,
            config,
            dungeon,
            player,
            phase: Phase::Exploring,
            pending: Vec::new(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn dungeon_mut(&mut self) -> &mut Dungeon {
        &mut self.dungeon
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.player.level
    }

    /// Drains output that was produced before the first turn.
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Map lines for the current level with the player marked.
    pub fn map_lines(&self) -> Vec<String> {
        render_map(&self.dungeon, self.player.position())
    }

    pub fn status(&self) -> String {
        status_line(&self.player)
    }

    /// Resolves one line of input. Malformed input is answered with a
    /// message and leaves the state untouched.
    pub fn submit(&mut self, input: &str) -> TurnResult {
        let mut turn = TurnResult::new(std::mem::take(&mut self.pending));
        match self.phase {
            Phase::Exploring => self.explore(input, &mut turn),
            Phase::ChestPrompt { at } => self.answer_chest(input, at, &mut turn),
            Phase::Combat { at } => self.fight(input, at, &mut turn),
            Phase::GameOver => self.answer_game_over(input, &mut turn),
            Phase::Exited => {}
        }
        if self.phase == Phase::Exited {
            turn.flow = Flow::Exit;
        }
        turn
    }

    fn explore(&mut self, input: &str, turn: &mut TurnResult) {
        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(err) => {
                turn.say(err.to_string());
                turn.say(exploration_help());
                turn.events.push(GameEvent::Rejected);
                return;
            }
        };

        match command {
            Command::Move(direction) => {
                let Some(to) = self.dungeon.step(self.player.position(), direction) else {
                    turn.say(format!(
                        "You can't go that way ({}) - edge of the level.",
                        direction.key()
                    ));
                    turn.events.push(GameEvent::BlockedByEdge);
                    return;
                };
                self.player.set_position(to);
                turn.events.push(GameEvent::Moved { to });
                let entry = enter_room(&mut self.dungeon, &mut self.player, to);
                let next = turn.absorb_entry(entry);
                self.follow_up(next, to, turn);
            }
            Command::Map => turn.messages.extend(self.map_lines()),
            Command::Inventory => turn.messages.extend(inventory_lines(&self.player)),
            Command::Use(index) => self.use_item(index, turn),
            Command::Equip(index) => self.equip_item(index, turn),
            Command::Stats => turn.say(self.status()),
            Command::Help => turn.say(exploration_help()),
            Command::Quit => {
                turn.say("Leaving the game.");
                turn.events.push(GameEvent::Quit);
                self.phase = Phase::Exited;
            }
        }
    }

    /// Applies the follow-up a room asked for after being entered.
    fn follow_up(&mut self, next: NextStep, at: (usize, usize), turn: &mut TurnResult) {
        match next {
            NextStep::Stay => {}
            NextStep::AdvanceLevel => self.advance_level(turn),
            NextStep::ChestPrompt => self.phase = Phase::ChestPrompt { at },
            NextStep::Combat => {
                tracing::debug!(?at, "combat started");
                self.phase = Phase::Combat { at };
                turn.say(combat_help());
            }
            NextStep::GameOver => self.game_over(turn),
        }
    }

    fn use_item(&mut self, index: usize, turn: &mut TurnResult) {
        match self.player.use_consumable(index) {
            Ok(used) => {
                turn.say(format!(
                    "Used {}, +{} HP. HP: {}/{}",
                    used.name, used.heal, self.player.hp, self.player.max_hp
                ));
                turn.events.push(GameEvent::ItemUsed {
                    name: used.name,
                    heal: used.heal,
                });
            }
            Err(err) => {
                turn.say(err.to_string());
                turn.events.push(GameEvent::Rejected);
            }
        }
    }

    fn equip_item(&mut self, index: usize, turn: &mut TurnResult) {
        match self.player.equip_from_inventory(index) {
            Ok(equipped) => {
                let previous = equipped.replaced.as_ref().map(|item| item.name().to_string());
                turn.say(format!(
                    "Equipped {} {}. (Previous: {})",
                    equipped.item.kind_label().to_lowercase(),
                    equipped.item.name(),
                    previous.as_deref().unwrap_or("none")
                ));
                turn.events.push(GameEvent::ItemEquipped {
                    name: equipped.item.name().to_string(),
                    replaced: previous,
                });
            }
            Err(err) => {
                turn.say(err.to_string());
                turn.events.push(GameEvent::Rejected);
            }
        }
    }

    fn answer_chest(&mut self, input: &str, at: (usize, usize), turn: &mut TurnResult) {
        self.phase = Phase::Exploring;
        if input.trim().eq_ignore_ascii_case("y") {
            let entry = unlock_chest(&mut self.dungeon, &mut self.player, at);
            turn.absorb_entry(entry);
        } else {
            turn.say("You leave the chest locked.");
            turn.events.push(GameEvent::ChestLeftLocked);
        }
    }

    fn fight(&mut self, input: &str, at: (usize, usize), turn: &mut TurnResult) {
        let action = match CombatAction::parse(input) {
            Ok(action) => action,
            Err(err) => {
                turn.say(format!("Unknown action. {err}"));
                turn.say(combat_help());
                turn.events.push(GameEvent::Rejected);
                return;
            }
        };

        let difficulty = self.dungeon.difficulty;
        let Some(enemy) = self
            .dungeon
            .room_mut(at.0, at.1)
            .and_then(|room| room.enemy.as_mut())
        else {
            turn.say("The monster is nowhere to be seen.");
            self.phase = Phase::Exploring;
            return;
        };

        let report = match action {
            CombatAction::Attack => resolve_attack(&mut self.player, enemy, difficulty, &mut self.rng),
            CombatAction::Flee => resolve_flee(&mut self.player, enemy, &mut self.rng),
            CombatAction::Stats => {
                let line = enemy_line(enemy);
                turn.say(status_line(&self.player));
                turn.say(line);
                return;
            }
            CombatAction::Inventory => {
                turn.messages.extend(inventory_lines(&self.player));
                return;
            }
            CombatAction::Use(index) => {
                self.use_item(index, turn);
                return;
            }
            CombatAction::Equip(index) => {
                self.equip_item(index, turn);
                return;
            }
        };
        let enemy_hp = enemy.hp;

        turn.absorb_round(&report);
        if matches!(action, CombatAction::Attack) {
            turn.events.push(GameEvent::EnemyDamaged {
                damage: report.damage_dealt,
                remaining: enemy_hp,
            });
        }
        if matches!(action, CombatAction::Flee) && report.outcome != RoundOutcome::Fled {
            turn.events.push(GameEvent::FleeFailed);
        }
        if report.enemy_struck {
            turn.events.push(GameEvent::PlayerDamaged {
                damage: report.damage_taken,
                remaining: self.player.hp,
            });
        }

        match report.outcome {
            RoundOutcome::Ongoing => {}
            RoundOutcome::EnemyDefeated { exp, loot } => {
                if let Some(room) = self.dungeon.room_mut(at.0, at.1) {
                    room.clear();
                }
                tracing::debug!(exp, drops = loot.len(), "enemy defeated");
                turn.events.push(GameEvent::EnemyDefeated { exp, loot });
                self.phase = Phase::Exploring;
            }
            RoundOutcome::Fled => {
                self.phase = Phase::Exploring;
                if let Some(to) = flee_destination(&self.dungeon, at) {
                    self.player.set_position(to);
                    turn.events.push(GameEvent::Fled { to });
                }
                tracing::debug!(position = ?self.player.position(), "player fled");
            }
            RoundOutcome::PlayerDied => {
                turn.events.push(GameEvent::PlayerDied);
                self.game_over(turn);
            }
        }
    }

    fn game_over(&mut self, turn: &mut TurnResult) {
        tracing::info!(
            level = self.player.level,
            exp = self.player.exp,
            "player died"
        );
        self.phase = Phase::GameOver;
        turn.say("=== Game over ===");
        turn.say("1) Start again");
        turn.say("2) Quit");
    }

    fn answer_game_over(&mut self, input: &str, turn: &mut TurnResult) {
        if input.trim() == "1" {
            self.restart(turn);
        } else {
            turn.say("Goodbye!");
            turn.events.push(GameEvent::Quit);
            self.phase = Phase::Exited;
        }
    }

    /// Throws everything away and starts over on level 1.
    fn restart(&mut self, turn: &mut TurnResult) {
        tracing::info!("restarting");
        self.dungeon = build_level(&self.config, 1, &mut self.rng);
        self.player = Player::new(&self.config, self.dungeon.center());
        self.phase = Phase::Exploring;
        turn.events.push(GameEvent::Restarted);
        self.announce_level(&mut turn.messages);
    }

    /// Replaces the level with a fresh, harder one. Inventory and stats carry over.
    fn advance_level(&mut self, turn: &mut TurnResult) {
        self.player.level += 1;
        let level = self.player.level;
        self.dungeon = build_level(&self.config, level, &mut self.rng);
        self.player.set_position(self.dungeon.center());
        let heal = LEVEL_HEAL_BASE.saturating_sub(level).max(LEVEL_HEAL_MIN);
        self.player.heal(heal);
        turn.events.push(GameEvent::LevelAdvanced { level });
        self.announce_level(&mut turn.messages);
    }

    /// Level banner plus the chance of a starter potion.
    fn announce_level(&mut self, messages: &mut Vec<String>) {
        let level = self.player.level;
        let (rows, cols) = (self.dungeon.rows, self.dungeon.cols);
        let (row, col) = self.player.position();
        messages.push(format!("--- Level {level} ---"));
        messages.push(format!(
            "Level size: {rows}x{cols}. You start at ({row},{col})."
        ));
        if chance(&mut self.rng, STARTER_POTION_CHANCE) {
            let potion = starter_potion(&mut self.rng);
            messages.push(format!(
                "A starter potion was added to your inventory: {} ({}).",
                potion.name(),
                potion.stat_label()
            ));
            self.player.add_item(potion);
        }
        tracing::info!(level, rows, cols, "entered level");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Enemy;
    use crate::dungeon::{Room, RoomKind};
    use crate::items::Item;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// 5x5 level with the portal at (0, 2) and the key at (4, 2); player in the middle.
    fn scripted_game() -> Game<ChaCha8Rng> {
        let config = GameConfig::default();
        let mut dungeon = Dungeon::new(5, 5, 1);
        dungeon.portal_position = (0, 2);
        dungeon.grid[0][2] = Room::new(RoomKind::Portal);
        dungeon.key_position = (4, 2);
        dungeon.grid[4][2] = Room::new(RoomKind::Key);
        let player = Player::new(&config, dungeon.center());
        Game::with_state(config, ChaCha8Rng::seed_from_u64(7), dungeon, player)
    }

    #[test]
    fn test_new_game_starts_on_empty_center() {
        let mut game = Game::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(1));
        let (r, c) = game.player().position();
        assert_eq!((r, c), game.dungeon().center());
        assert_eq!(game.dungeon().grid[r][c].kind, RoomKind::Empty);
        assert_eq!(game.level(), 1);
        assert_eq!(game.phase(), Phase::Exploring);

        let intro = game.take_pending();
        assert!(intro[0].contains("Level 1"));
        assert!(game.take_pending().is_empty());
    }

    #[test]
    fn test_pending_intro_is_prepended_to_first_turn() {
        let mut game = Game::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(1));
        let turn = game.submit("stats");
        assert!(turn.messages[0].contains("Level 1"));
        assert!(turn.messages.last().unwrap().starts_with("HP: "));
    }

    #[test]
    fn test_malformed_input_changes_nothing() {
        let mut game = scripted_game();
        game.player_mut().add_item(Item::potion(5));
        let player_before = game.player().clone();
        let dungeon_before = game.dungeon().clone();

        for input in ["", "jump", "use", "use x", "equip", "equip 9", "use 4", "use -1"] {
            let turn = game.submit(input);
            assert_eq!(turn.flow, Flow::Continue);
            assert!(turn.events.contains(&GameEvent::Rejected), "{input:?}");
        }
        assert_eq!(game.player(), &player_before);
        assert_eq!(game.dungeon(), &dungeon_before);
    }

    #[test]
    fn test_edge_blocks_movement() {
        let mut game = scripted_game();
        game.player_mut().set_position((0, 0));
        let turn = game.submit("w");
        assert_eq!(turn.events, vec![GameEvent::BlockedByEdge]);
        assert_eq!(turn.messages, vec!["You can't go that way (w) - edge of the level."]);
        let turn = game.submit("A");
        assert_eq!(turn.messages, vec!["You can't go that way (a) - edge of the level."]);
        assert_eq!(game.player().position(), (0, 0));
    }

    #[test]
    fn test_extreme_attack_with_weapon_does_not_overflow() {
        let config = GameConfig {
            base_attack: u32::MAX,
            ..GameConfig::default()
        };
        let dungeon = Dungeon::new(5, 5, 1);
        let player = Player::new(&config, dungeon.center());
        let mut game = Game::with_state(config, ChaCha8Rng::seed_from_u64(3), dungeon, player);
        game.player_mut().add_item(Item::weapon(5));

        game.submit("equip 0");
        let turn = game.submit("stats");
        assert!(turn.messages[0].contains(&format!("ATK: {}", u32::MAX)));
    }

    #[test]
    fn test_quit_exits() {
        let mut game = scripted_game();
        let turn = game.submit("quit");
        assert_eq!(turn.flow, Flow::Exit);
        assert_eq!(game.phase(), Phase::Exited);
        assert_eq!(game.submit("w").flow, Flow::Exit);
    }

    #[test]
    fn test_inactive_portal_keeps_level() {
        let mut game = scripted_game();
        game.submit("w");
        game.submit("w");
        assert_eq!(game.player().position(), (0, 2));
        assert_eq!(game.level(), 1);
        assert_eq!(game.dungeon().rows, 5);
    }

    #[test]
    fn test_key_then_portal_advances_level() {
        let mut game = scripted_game();
        game.player_mut().add_item(Item::weapon(2));
        game.player_mut().add_item(Item::potion(8));
        game.player_mut().hp = 50;

        game.submit("s");
        let turn = game.submit("s");
        assert!(turn.events.contains(&GameEvent::KeyFound));
        assert_eq!(game.player().keys, 1);

        for _ in 0..4 {
            game.submit("w");
        }
        assert_eq!(game.level(), 2);
        assert_eq!(game.dungeon().difficulty, 2);
        assert_eq!(game.player().position(), game.dungeon().center());
        // max(5, 10 - 2) = 8
        assert_eq!(game.player().hp, 58);
        let inventory = &game.player().inventory;
        assert_eq!(&inventory[..2], &[Item::weapon(2), Item::potion(8)]);
        assert!(inventory.len() <= 3);
    }

    #[test]
    fn test_locked_chest_accept() {
        let mut game = scripted_game();
        let loot = vec![Item::armor(3), Item::potion(11)];
        game.dungeon_mut().grid[2][3] = Room::chest(loot.clone(), true);
        game.player_mut().keys = 1;

        game.submit("d");
        assert_eq!(game.phase(), Phase::ChestPrompt { at: (2, 3) });
        game.submit("y");
        assert_eq!(game.phase(), Phase::Exploring);
        assert_eq!(game.player().keys, 0);
        assert_eq!(game.dungeon().grid[2][3].kind, RoomKind::Empty);
        assert_eq!(game.player().inventory, loot);
    }

    #[test]
    fn test_locked_chest_decline_keeps_it() {
        let mut game = scripted_game();
        game.dungeon_mut().grid[2][3] = Room::chest(vec![Item::armor(3)], true);
        game.player_mut().keys = 1;

        game.submit("d");
        let turn = game.submit("n");
        assert!(turn.events.contains(&GameEvent::ChestLeftLocked));
        assert_eq!(game.player().keys, 1);
        assert_eq!(game.dungeon().grid[2][3].kind, RoomKind::Chest);
        assert!(game.dungeon().grid[2][3].locked);
        assert!(game.player().inventory.is_empty());
    }

    #[test]
    fn test_combat_until_victory() {
        let mut game = scripted_game();
        game.dungeon_mut().grid[2][1] =
            Room::monster(Enemy::new("Goblin L1".to_string(), 6, 1, 2, 7));
        game.player_mut().base_attack = 5;

        game.submit("a");
        assert_eq!(game.phase(), Phase::Combat { at: (2, 1) });

        let turn = game.submit("hit");
        assert!(turn.events.contains(&GameEvent::EnemyDamaged {
            damage: 3,
            remaining: 3
        }));
        assert!(turn.events.contains(&GameEvent::PlayerDamaged {
            damage: 1,
            remaining: 99
        }));

        let turn = game.submit("");
        assert!(turn
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemyDefeated { exp: 7, .. })));
        assert_eq!(game.phase(), Phase::Exploring);
        assert_eq!(game.player().exp, 7);
        assert_eq!(game.dungeon().grid[2][1].kind, RoomKind::Empty);
        assert!(game.dungeon().grid[2][1].enemy.is_none());
    }

    #[test]
    fn test_combat_side_actions_do_not_provoke() {
        let mut game = scripted_game();
        game.dungeon_mut().grid[2][1] =
            Room::monster(Enemy::new("Goblin L1".to_string(), 30, 9, 0, 7));
        game.player_mut().add_item(Item::potion(5));
        game.player_mut().add_item(Item::weapon(1));
        game.player_mut().hp = 80;

        game.submit("a");
        for input in ["stats", "inv", "dance", "equip 1", "use 0"] {
            game.submit(input);
        }
        assert_eq!(game.phase(), Phase::Combat { at: (2, 1) });
        assert_eq!(game.player().hp, 85);
        assert_eq!(game.player().attack_value(), 3);
    }

    #[test]
    fn test_death_and_restart() {
        let mut game = scripted_game();
        game.dungeon_mut().grid[2][1] =
            Room::monster(Enemy::new("Ogre".to_string(), 500, 50, 0, 7));
        game.player_mut().hp = 10;
        game.player_mut().add_item(Item::weapon(3));

        game.submit("a");
        let turn = game.submit("hit");
        assert!(turn.events.contains(&GameEvent::PlayerDied));
        assert_eq!(game.phase(), Phase::GameOver);

        let turn = game.submit("1");
        assert!(turn.events.contains(&GameEvent::Restarted));
        assert_eq!(game.phase(), Phase::Exploring);
        assert_eq!(game.player().hp, 100);
        assert_eq!(game.level(), 1);
        assert!(game.player().inventory.len() <= 1);
        assert_eq!(game.player().exp, 0);
    }

    #[test]
    fn test_game_over_exit() {
        let mut game = scripted_game();
        game.dungeon_mut().grid[2][1] = Room::trap(500);
        game.submit("a");
        assert_eq!(game.phase(), Phase::GameOver);
        let turn = game.submit("2");
        assert_eq!(turn.flow, Flow::Exit);
    }

    #[test]
    fn test_flee_steps_to_first_open_neighbour() {
        let mut game = scripted_game();
        // Enemy attack 0 keeps the player alive however many attempts it takes
        game.dungeon_mut().grid[2][1] =
            Room::monster(Enemy::new("Goblin L1".to_string(), 30, 0, 0, 7));
        game.submit("a");

        let mut fled = false;
        for _ in 0..200 {
            let turn = game.submit("flee");
            if turn.events.contains(&GameEvent::Fled { to: (1, 1) }) {
                fled = true;
                break;
            }
            assert!(turn.events.contains(&GameEvent::FleeFailed));
        }
        assert!(fled);
        assert_eq!(game.phase(), Phase::Exploring);
        assert_eq!(game.player().position(), (1, 1));
        // The monster keeps its room
        assert!(game.dungeon().grid[2][1].enemy.is_some());
    }
}
