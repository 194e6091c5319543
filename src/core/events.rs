//! Typed record of what happened during a turn.
//!
//! The text output is for people; these events are for tests, logging, and
//! any front end that wants to react without parsing strings.

use crate::dungeon::RoomKind;
use crate::items::Item;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Player stepped onto a new cell
    Moved { to: (usize, usize) },
    /// Movement hit the edge of the level
    BlockedByEdge,
    EnteredRoom { kind: RoomKind },
    PortalInactive,
    /// Took an active portal; `level` is the new level
    LevelAdvanced { level: u32 },
    KeyFound,
    PortalActivated,
    ChestOpened { items: Vec<Item> },
    /// Locked chest and the player has a key to spend
    ChestUnlockOffered,
    ChestLockedNoKey,
    ChestLeftLocked,
    TrapTriggered { damage: u32, taken: u32 },
    CombatStarted { enemy: String },
    EnemyDamaged { damage: u32, remaining: u32 },
    PlayerDamaged { damage: u32, remaining: u32 },
    EnemyDefeated { exp: u32, loot: Vec<Item> },
    Fled { to: (usize, usize) },
    FleeFailed,
    ItemUsed { name: String, heal: u32 },
    ItemEquipped { name: String, replaced: Option<String> },
    PlayerDied,
    Restarted,
    /// Input was rejected; nothing changed
    Rejected,
    Quit,
}
