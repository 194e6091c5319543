//! Text map of the current level with light fog of war.

use crate::dungeon::{Dungeon, Room, RoomKind};

/// Symbols used for map rendering
mod symbols {
    pub const PLAYER: char = '@';
    pub const DORMANT_PORTAL: char = 'o';
}

/// Map character for a room the player is not standing on.
///
/// Monsters and traps stay hidden until their room has been entered.
pub fn room_symbol(room: &Room) -> char {
    match room.kind {
        RoomKind::Monster | RoomKind::Trap if !room.explored => RoomKind::Empty.icon(),
        RoomKind::Portal if !room.portal_active => symbols::DORMANT_PORTAL,
        kind => kind.icon(),
    }
}

/// Renders the grid row by row, cells separated by spaces.
pub fn render_map(dungeon: &Dungeon, player: (usize, usize)) -> Vec<String> {
    let mut lines = Vec::with_capacity(dungeon.rows + 1);
    lines.push("Map (@ is you):".to_string());
    for (row, cells) in dungeon.grid.iter().enumerate() {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, room)| {
                if (row, col) == player {
                    symbols::PLAYER.to_string()
                } else {
                    room_symbol(room).to_string()
                }
            })
            .collect();
        lines.push(line.join(" "));
    }
    lines
}
