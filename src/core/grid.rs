//! Grid module - manages the token grid and its blockout mask
//!
//! The grid is a `width x height` field where each cell is empty, occupied
//! by a token, or permanently blocked. Uses a flat vector for cache-friendly
//! row-major storage (y * width + x).
//! Coordinates: (x, y) with x running left to right and y running bottom to
//! top; y = 0 is the bottom row and gravity pulls tokens toward it.

use crate::error::CoreError;
use crate::types::{BlockoutRect, Cell, TokenKind};

/// A set of axis-aligned rectangles disabling regions of the grid.
/// A cell is blocked if it lies in ANY rectangle. Static per grid instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockoutMask {
    rects: Vec<BlockoutRect>,
}

impl BlockoutMask {
    pub fn new(rects: Vec<BlockoutRect>) -> Self {
        Self { rects }
    }

    /// Membership test, O(number of rectangles). The grid bakes the result
    /// into its cells at construction, so this only runs at setup time.
    pub fn is_blocked(&self, x: u8, y: u8) -> bool {
        self.rects.iter().any(|rect| rect.contains(x, y))
    }

    pub fn rects(&self) -> &[BlockoutRect] {
        &self.rects
    }
}

/// The token grid. Blocked cells are fixed at construction and never
/// transition to any other state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat vector of cells, row-major order (y * width + x), bottom row first.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every non-blocked cell empty.
    pub fn new(width: u8, height: u8, mask: &BlockoutMask) -> Self {
        let mut cells = vec![Cell::Empty; width as usize * height as usize];
        for y in 0..height {
            for x in 0..width {
                if mask.is_blocked(x, y) {
                    cells[y as usize * width as usize + x as usize] = Cell::Blocked;
                }
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Calculate flat index from (x, y), None if out of bounds.
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= i16::from(self.width) || y < 0 || y >= i16::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn in_bounds(&self, x: i16, y: i16) -> bool {
        self.index(x, y).is_some()
    }

    /// Get cell at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// True if (x, y) is in bounds and permanently disabled.
    pub fn is_blocked(&self, x: u8, y: u8) -> bool {
        self.get(i16::from(x), i16::from(y)) == Some(Cell::Blocked)
    }

    /// Token kind at (x, y), None for empty, blocked, or out-of-bounds cells.
    pub fn kind_at(&self, x: u8, y: u8) -> Option<TokenKind> {
        self.get(i16::from(x), i16::from(y)).and_then(Cell::kind)
    }

    /// Write a cell. Writing to a blocked cell (or writing `Cell::Blocked`
    /// anywhere) is a programming error and fails fast; the blockout mask is
    /// fixed for the lifetime of the grid.
    pub fn set(&mut self, x: u8, y: u8, cell: Cell) -> Result<(), CoreError> {
        let idx = self
            .index(i16::from(x), i16::from(y))
            .ok_or(CoreError::OutOfBounds {
                x: i16::from(x),
                y: i16::from(y),
            })?;
        if self.cells[idx] == Cell::Blocked || cell == Cell::Blocked {
            return Err(CoreError::BlockedCell { x, y });
        }
        self.cells[idx] = cell;
        Ok(())
    }

    /// Trusted internal write used by generation, gravity, and the
    /// resolution loop. Callers guarantee the target is in bounds and not
    /// blocked; debug builds verify the invariant.
    pub(crate) fn put(&mut self, x: u8, y: u8, cell: Cell) {
        let idx = y as usize * self.width as usize + x as usize;
        debug_assert!(self.cells[idx] != Cell::Blocked && cell != Cell::Blocked);
        self.cells[idx] = cell;
    }

    /// Number of cells currently holding a token.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Number of permanently disabled cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }

    /// Number of cells that can hold a token (width * height - blocked).
    pub fn fillable_count(&self) -> usize {
        self.cells.len() - self.blocked_count()
    }

    /// Get a reference to the internal cells vector.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
