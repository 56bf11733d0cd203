//! Core types shared across the crate
//! This module contains pure data types and level tuning constants

use serde::{Deserialize, Serialize};

/// Default grid dimensions (the original game ships 8x8 levels)
pub const DEFAULT_GRID_WIDTH: u8 = 8;
pub const DEFAULT_GRID_HEIGHT: u8 = 8;

/// Default number of distinct token kinds (rock candy, chocolate, peppermint, gumdrop)
pub const DEFAULT_TOKEN_KINDS: u8 = 4;

/// Minimum run or region size that qualifies as a match
pub const MIN_RUN_LEN: usize = 3;

/// Points contributed by each token of a scored run
pub const POINTS_PER_TOKEN: u32 = 10;

/// Redraws allowed per cell during initial generation before the last
/// candidate is accepted as-is
pub const GENERATION_RETRY_CAP: u32 = 32;

/// Token identity. Kinds are dense integers in `[0, K)` where `K` is the
/// catalog size; display concerns (sprite, colour) live outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenKind(pub u8);

impl TokenKind {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The set of token kinds a level draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCatalog {
    kinds: u8,
}

impl TokenCatalog {
    /// Create a catalog of `kinds` distinct token kinds.
    /// A catalog needs at least one kind; zero is clamped to one.
    pub fn new(kinds: u8) -> Self {
        Self {
            kinds: kinds.max(1),
        }
    }

    pub fn len(&self) -> u8 {
        self.kinds
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        kind.0 < self.kinds
    }

    /// Iterate every kind in the catalog in order.
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> {
        (0..self.kinds).map(TokenKind)
    }
}

impl Default for TokenCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_KINDS)
    }
}

/// One grid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// Permanently disabled by the blockout mask; never holds a token.
    Blocked,
    Occupied(TokenKind),
}

impl Cell {
    pub fn kind(self) -> Option<TokenKind> {
        match self {
            Cell::Occupied(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn is_blocked(self) -> bool {
        self == Cell::Blocked
    }

    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Occupied(_))
    }
}

/// Grid coordinate `(x, y)`. `x` grows rightward, `y` grows upward:
/// `y = 0` is the bottom row and gravity pulls tokens toward it.
pub type Coord = (u8, u8);

/// The four unit swap directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit offset `(dx, dy)` in grid coordinates.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Inclusive axis-aligned rectangle of permanently disabled cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockoutRect {
    pub min_x: u8,
    pub min_y: u8,
    pub max_x: u8,
    pub max_y: u8,
}

impl BlockoutRect {
    pub fn new(min_x: u8, min_y: u8, max_x: u8, max_y: u8) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn contains(&self, x: u8, y: u8) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Level setup supplied by the host: grid extent, blockout areas, and the
/// number of token kinds to generate from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: u8,
    pub height: u8,
    pub token_kinds: u8,
    pub blockout: Vec<BlockoutRect>,
}

impl GridConfig {
    /// The standard level shape: 8x8, four kinds, no blockout.
    pub fn standard() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            token_kinds: DEFAULT_TOKEN_KINDS,
            blockout: Vec::new(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::standard()
    }
}
