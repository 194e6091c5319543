//! Room entry resolution.
//!
//! Each room kind is a one-shot transition on entry. Anything that needs the
//! RNG or the next level (portals) or further input (locked chests, monsters)
//! is reported back as a [`NextStep`] for the engine to act on.

use super::types::{Direction, Dungeon, RoomKind};
use crate::character::Player;
use crate::core::events::GameEvent;
use crate::items::Item;

/// What the engine must do after a room has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Keep exploring
    Stay,
    /// Active portal taken; build the next level
    AdvanceLevel,
    /// Locked chest and a key in hand; wait for y/n
    ChestPrompt,
    /// Monster present; enter the combat loop
    Combat,
    /// Player died
    GameOver,
}

/// Text, events, and follow-up from entering a room.
#[derive(Debug, Clone)]
pub struct RoomEntry {
    pub messages: Vec<String>,
    pub events: Vec<GameEvent>,
    pub next: NextStep,
}

impl RoomEntry {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            events: Vec::new(),
            next: NextStep::Stay,
        }
    }

    fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

/// Resolves the room at `position` for a player who just walked in.
pub fn enter_room(dungeon: &mut Dungeon, player: &mut Player, position: (usize, usize)) -> RoomEntry {
    let mut entry = RoomEntry::new();
    let (row, col) = position;

    let Some(room) = dungeon.room_mut(row, col) else {
        entry.say("Something strange is going on in this room.");
        return entry;
    };
    room.explored = true;
    entry.events.push(GameEvent::EnteredRoom { kind: room.kind });

    match room.kind {
        RoomKind::Portal if room.portal_active => {
            entry.say("You step into the portal! Moving on to the next level...");
            entry.next = NextStep::AdvanceLevel;
        }
        RoomKind::Portal => {
            entry.say("You see a portal, but it is dormant. You need a key.");
            entry.events.push(GameEvent::PortalInactive);
        }
        RoomKind::Key => {
            entry.say("You found a key! The portal hums to life somewhere.");
            player.keys += 1;
            room.clear();
            dungeon.activate_portal();
            entry.events.push(GameEvent::KeyFound);
            entry.events.push(GameEvent::PortalActivated);
        }
        RoomKind::Empty => {
            entry.say("An empty room.");
        }
        RoomKind::Chest if room.locked => {
            if player.keys > 0 {
                entry.say("The chest is locked. You have a key. Use it? (y/n)");
                entry.events.push(GameEvent::ChestUnlockOffered);
                entry.next = NextStep::ChestPrompt;
            } else {
                entry.say("The chest is locked and you have no key.");
                entry.events.push(GameEvent::ChestLockedNoKey);
            }
        }
        RoomKind::Chest => {
            entry.say("You open the chest.");
            let items = std::mem::take(&mut room.loot);
            room.clear();
            if items.is_empty() {
                entry.say("The chest is empty.");
            }
            take_items(player, items, &mut entry);
        }
        RoomKind::Trap => {
            let damage = room.trap_damage;
            room.clear();
            let taken = player.take_damage(damage);
            entry.say(format!("A trap! It strikes for {damage} damage."));
            entry.say(format!(
                "After armor you take {taken}. HP: {}/{}",
                player.hp, player.max_hp
            ));
            entry.events.push(GameEvent::TrapTriggered { damage, taken });
            if !player.is_alive() {
                entry.say("The trap killed you.");
                entry.events.push(GameEvent::PlayerDied);
                entry.next = NextStep::GameOver;
            }
        }
        RoomKind::Monster => match &room.enemy {
            Some(enemy) => {
                entry.say(format!(
                    "A {} is here! (HP {}, ATK {}, DEF {})",
                    enemy.name, enemy.hp, enemy.attack, enemy.defense
                ));
                entry.events.push(GameEvent::CombatStarted {
                    enemy: enemy.name.clone(),
                });
                entry.next = NextStep::Combat;
            }
            None => {
                entry.say("The room is empty (the monster is already gone).");
                room.clear();
            }
        },
    }

    entry
}

/// Spends a key on the locked chest at `position` and hands out its loot.
pub fn unlock_chest(dungeon: &mut Dungeon, player: &mut Player, position: (usize, usize)) -> RoomEntry {
    let mut entry = RoomEntry::new();
    let (row, col) = position;

    let room = match dungeon.room_mut(row, col) {
        Some(room) if room.kind == RoomKind::Chest && player.keys > 0 => room,
        _ => {
            entry.say("There is no chest here to unlock.");
            return entry;
        }
    };

    player.keys -= 1;
    let items = std::mem::take(&mut room.loot);
    room.clear();
    entry.say("You unlock the chest with your key.");
    take_items(player, items, &mut entry);
    entry
}

fn take_items(player: &mut Player, items: Vec<Item>, entry: &mut RoomEntry) {
    for item in &items {
        entry.say(format!(" - found: {} - {}", item.name(), item.description()));
        player.add_item(item.clone());
    }
    entry.events.push(GameEvent::ChestOpened { items });
}

/// First on-grid neighbour of `from`, tried in w, s, a, d order.
///
/// The destination may itself be dangerous; it is not resolved on arrival.
pub fn flee_destination(dungeon: &Dungeon, from: (usize, usize)) -> Option<(usize, usize)> {
    Direction::FLEE_ORDER
        .iter()
        .find_map(|&direction| dungeon.step(from, direction))
}
