//! Initial generation - populate a grid with a match-free starting state
//!
//! Greedy constructive fill: cells are visited in a fixed order (bottom row
//! first, left to right), each drawing random kinds until the placement does
//! not create a connected same-kind region of 3 or more among the cells
//! placed so far. Greedy, not backtracking: degenerate configs (tiny
//! catalogs, large blockouts) can exhaust the retry cap, in which case the
//! last candidate is accepted, the cell is reported, and a warning is
//! logged. Generation therefore always terminates.

use tracing::warn;

use crate::core::grid::Grid;
use crate::core::matcher::connected_region_size;
use crate::core::rng::TokenDealer;
use crate::error::CoreError;
use crate::types::{Cell, Coord, GENERATION_RETRY_CAP, MIN_RUN_LEN};

/// Outcome of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Cells whose retry cap was exhausted and whose final candidate was
    /// accepted even though it completes a region of 3 or more.
    pub exhausted: Vec<Coord>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.exhausted.is_empty()
    }
}

/// Fill every empty non-blocked cell of `grid`. Deterministic for a given
/// dealer state and grid shape.
pub fn populate(grid: &mut Grid, dealer: &mut TokenDealer) -> GenerationReport {
    let mut report = GenerationReport::default();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(i16::from(x), i16::from(y)) != Some(Cell::Empty) {
                continue;
            }
            if let Err(err) = draw_without_match(grid, dealer, x, y) {
                warn!(%err, "generation fell back to a matching candidate");
                report.exhausted.push((x, y));
            }
        }
    }

    report
}

/// Place a random kind at (x, y), redrawing while the placement closes a
/// connected region of >= MIN_RUN_LEN. On cap exhaustion the last candidate
/// stays placed and `GenerationExhausted` is returned for the caller to log.
fn draw_without_match(
    grid: &mut Grid,
    dealer: &mut TokenDealer,
    x: u8,
    y: u8,
) -> Result<(), CoreError> {
    let mut attempts: u32 = 0;
    grid.put(x, y, Cell::Occupied(dealer.draw()));

    while connected_region_size(grid, x, y) >= MIN_RUN_LEN {
        attempts += 1;
        if attempts >= GENERATION_RETRY_CAP {
            return Err(CoreError::GenerationExhausted { x, y, attempts });
        }
        grid.put(x, y, Cell::Occupied(dealer.draw()));
    }

    Ok(())
}
