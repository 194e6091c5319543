//! Dungeon grid data structures.

use crate::combat::Enemy;
use crate::items::Item;

/// What a cell holds; governs what happens when the player walks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    Empty,
    Chest,
    Monster,
    Trap,
    Key,
    Portal,
}

impl RoomKind {
    /// Returns the map character for this room kind
    pub fn icon(&self) -> char {
        match self {
            RoomKind::Empty => '.',
            RoomKind::Chest => 'C',
            RoomKind::Monster => 'M',
            RoomKind::Trap => '^',
            RoomKind::Key => 'K',
            RoomKind::Portal => 'O',
        }
    }
}

/// A single cell in the dungeon grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub kind: RoomKind,
    /// Player has stepped in at least once
    pub explored: bool,
    /// Chest needs a key
    pub locked: bool,
    /// Portal leads to the next level
    pub portal_active: bool,
    pub enemy: Option<Enemy>,
    /// Chest contents, in the order they will be handed out
    pub loot: Vec<Item>,
    pub trap_damage: u32,
}

impl Room {
    pub fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            explored: false,
            locked: false,
            portal_active: false,
            enemy: None,
            loot: Vec::new(),
            trap_damage: 0,
        }
    }

    pub fn empty() -> Self {
        Self::new(RoomKind::Empty)
    }

    pub fn chest(loot: Vec<Item>, locked: bool) -> Self {
        Self {
            locked,
            loot,
            ..Self::new(RoomKind::Chest)
        }
    }

    pub fn monster(enemy: Enemy) -> Self {
        Self {
            enemy: Some(enemy),
            ..Self::new(RoomKind::Monster)
        }
    }

    pub fn trap(damage: u32) -> Self {
        Self {
            trap_damage: damage,
            ..Self::new(RoomKind::Trap)
        }
    }

    /// Turns the room into an empty one, dropping any content. Exploration is kept.
    pub fn clear(&mut self) {
        let explored = self.explored;
        *self = Self::empty();
        self.explored = explored;
    }
}

/// Direction of a single step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which neighbours are tried when stepping out of a fight (w, s, a, d)
    pub const FLEE_ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row/col offset for this direction
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn key(&self) -> char {
        match self {
            Direction::Up => 'w',
            Direction::Down => 's',
            Direction::Left => 'a',
            Direction::Right => 'd',
        }
    }
}

/// One level's grid of rooms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    pub rows: usize,
    pub cols: usize,
    /// Indexed `grid[row][col]`
    pub grid: Vec<Vec<Room>>,
    pub portal_position: (usize, usize),
    pub key_position: (usize, usize),
    pub difficulty: u32,
}

impl Dungeon {
    /// An all-empty grid. Generation fills it in.
    pub fn new(rows: usize, cols: usize, difficulty: u32) -> Self {
        Self {
            rows,
            cols,
            grid: vec![vec![Room::empty(); cols]; rows],
            portal_position: (0, 0),
            key_position: (0, 0),
            difficulty,
        }
    }

    /// Spawn cell: `(rows / 2, cols / 2)`
    pub fn center(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Cell one step from `from`, if it is on the grid.
    pub fn step(&self, from: (usize, usize), direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.offset();
        let row = from.0 as isize + dr;
        let col = from.1 as isize + dc;
        if self.in_bounds(row, col) {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn room(&self, row: usize, col: usize) -> Option<&Room> {
        self.grid.get(row)?.get(col)
    }

    pub fn room_mut(&mut self, row: usize, col: usize) -> Option<&mut Room> {
        self.grid.get_mut(row)?.get_mut(col)
    }

    /// Flips the portal on. Called once the level's key is picked up.
    pub fn activate_portal(&mut self) {
        let (row, col) = self.portal_position;
        if let Some(room) = self.room_mut(row, col) {
            room.portal_active = true;
        }
    }

    pub fn is_portal_active(&self) -> bool {
        let (row, col) = self.portal_position;
        self.room(row, col)
            .map(|r| r.kind == RoomKind::Portal && r.portal_active)
            .unwrap_or(false)
    }

    /// Count rooms of the given kind
    pub fn count_kind(&self, kind: RoomKind) -> usize {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|r| r.kind == kind)
            .count()
    }
}
