//! Gravity and refill - per-column compaction and token spawning
//!
//! Columns are independent: each occupied cell drops by the number of empty
//! cells strictly below it, with blocked cells acting as hard barriers that
//! reset the count (empties below a block are never filled from above it).
//! After compaction, every remaining empty non-blocked cell receives a fresh
//! uniformly random token with no anti-match rejection; matches forming from
//! refills are the intended cascade trigger. Column processing order is not
//! observable in the final state.

use serde::{Deserialize, Serialize};

use crate::core::grid::Grid;
use crate::core::rng::TokenDealer;
use crate::types::{Cell, Coord, TokenKind};

/// One token dropping within its column during compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMove {
    pub from: Coord,
    pub to: Coord,
    pub kind: TokenKind,
}

/// One freshly spawned token filling a hole after compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedToken {
    pub at: Coord,
    pub kind: TokenKind,
}

/// Compact every column downward. Returns the per-cell move list for
/// presentation layers; the grid is left with all holes at the top of each
/// unblocked column segment.
pub fn settle(grid: &mut Grid) -> Vec<TokenMove> {
    let mut moves = Vec::new();

    for x in 0..grid.width() {
        let mut empties: u8 = 0;
        for y in 0..grid.height() {
            match grid.get(i16::from(x), i16::from(y)) {
                Some(Cell::Blocked) => empties = 0,
                Some(Cell::Empty) => empties += 1,
                Some(Cell::Occupied(kind)) if empties > 0 => {
                    // The landing cell was counted as one of the empties in
                    // this segment, so it is in bounds and not blocked.
                    let to = (x, y - empties);
                    grid.put(x, y, Cell::Empty);
                    grid.put(to.0, to.1, Cell::Occupied(kind));
                    moves.push(TokenMove {
                        from: (x, y),
                        to,
                        kind,
                    });
                    // The vacated cell becomes the top hole of the segment;
                    // the hole count is unchanged.
                }
                _ => {}
            }
        }
    }

    moves
}

/// Fill every remaining empty non-blocked cell with a random kind.
pub fn refill(grid: &mut Grid, dealer: &mut TokenDealer) -> Vec<SpawnedToken> {
    let mut spawned = Vec::new();

    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if grid.get(i16::from(x), i16::from(y)) == Some(Cell::Empty) {
                let kind = dealer.draw();
                grid.put(x, y, Cell::Occupied(kind));
                spawned.push(SpawnedToken { at: (x, y), kind });
            }
        }
    }

    spawned
}
