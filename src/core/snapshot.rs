//! Snapshot module - serializable copies of grid and session state
//!
//! Snapshots are plain values, fully detached from the live session, meant
//! for persistence, debugging dumps, and driving external renderers. Cell
//! encoding: 0 = empty, 255 = blocked, k + 1 = occupied by kind k.

use serde::{Deserialize, Serialize};

use crate::core::grid::Grid;
use crate::core::session::GameSession;
use crate::types::Cell;

const EMPTY_CODE: u8 = 0;
const BLOCKED_CODE: u8 = 255;

/// Byte-per-cell copy of a grid, row-major with the bottom row first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: Vec<u8>,
}

impl GridSnapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        let cells = grid
            .cells()
            .iter()
            .map(|cell| match cell {
                Cell::Empty => EMPTY_CODE,
                Cell::Blocked => BLOCKED_CODE,
                Cell::Occupied(kind) => kind.0 + 1,
            })
            .collect();
        Self {
            width: grid.width(),
            height: grid.height(),
            cells,
        }
    }

    /// Encoded cell at (x, y), None if out of bounds.
    pub fn at(&self, x: u8, y: u8) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }
}

/// Full session state at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub grid: GridSnapshot,
    pub seed: u32,
    pub turns_taken: u32,
    pub points_total: u32,
    pub resolving: bool,
}

impl SessionSnapshot {
    pub fn of(session: &GameSession) -> Self {
        Self {
            grid: GridSnapshot::from_grid(session.grid()),
            seed: session.seed(),
            turns_taken: session.turns_taken(),
            points_total: session.points_total(),
            resolving: session.is_resolving(),
        }
    }
}
