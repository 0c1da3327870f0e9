//! Grid coordinates and movement directions.
//!
//! Positions are plain `(x, y)` pairs with `x` growing east and `y` growing
//! south. Wrapping onto a toroidal grid is the map's job, not the position's.

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Returns the adjacent position one step in `direction` (unwrapped).
    pub const fn offset(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position { x: self.x + dx, y: self.y + dy }
    }

    /// Plain Manhattan distance, ignoring any wrap-around.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// One discrete move: a cardinal step or staying in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Still,
}

/// The four cardinal directions, in the order random escapes index them.
pub const CARDINALS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    /// Returns the `(dx, dy)` step for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Still => (0, 0),
        }
    }

    /// Returns the single-character command abbreviation.
    pub const fn command_char(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::South => 's',
            Direction::East => 'e',
            Direction::West => 'w',
            Direction::Still => 'o',
        }
    }

    /// Parses a direction from its single-character command abbreviation.
    pub fn from_command_char(c: char) -> Option<Direction> {
        match c {
            'n' => Some(Direction::North),
            's' => Some(Direction::South),
            'e' => Some(Direction::East),
            'w' => Some(Direction::West),
            'o' => Some(Direction::Still),
            _ => None,
        }
    }
}

/// Splits the way from `source` to `target` into its vertical and horizontal
/// components, without wrap-around. `None` means that axis already matches.
pub fn target_direction(source: Position, target: Position) -> (Option<Direction>, Option<Direction>) {
    let vertical = match target.y.cmp(&source.y) {
        std::cmp::Ordering::Greater => Some(Direction::South),
        std::cmp::Ordering::Less => Some(Direction::North),
        std::cmp::Ordering::Equal => None,
    };
    let horizontal = match target.x.cmp(&source.x) {
        std::cmp::Ordering::Greater => Some(Direction::East),
        std::cmp::Ordering::Less => Some(Direction::West),
        std::cmp::Ordering::Equal => None,
    };
    (vertical, horizontal)
}
