//! Session module - swap validation and the match-resolution loop
//!
//! A [`GameSession`] owns one level attempt: the grid, the token dealer,
//! and the state machine `Idle -> Matching -> Destroying -> Refilling ->
//! Matching -> ... -> Idle`. Everything is synchronous and single-writer;
//! the only shared-state protection is a boolean latch rejecting input while
//! a resolution loop is in flight. A validated swap always commits, emits
//! exactly one turn, and runs the loop to a stable state before returning.

use tracing::debug;

use crate::core::events::{MatchEvent, PassRecord, SwapOutcome};
use crate::core::generate::{populate, GenerationReport};
use crate::core::gravity::{refill, settle};
use crate::core::grid::{BlockoutMask, Grid};
use crate::core::matcher::{scan, MatchRule};
use crate::core::rng::TokenDealer;
use crate::core::scoring::pass_points;
use crate::core::snapshot::SessionSnapshot;
use crate::error::CoreError;
use crate::types::{Cell, Direction, GridConfig, TokenCatalog, TokenKind};

/// Phase of the resolution state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Matching,
    Destroying,
    Refilling,
}

/// One level attempt: grid state, deterministic randomness, and turn/score
/// totals. Created at level start, discarded on restart.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    dealer: TokenDealer,
    state: LoopState,
    resolving: bool,
    turns_taken: u32,
    points_total: u32,
    seed: u32,
    generation: GenerationReport,
}

impl GameSession {
    /// Set up a level: validate the config, build the grid, and generate a
    /// match-free initial state. Deterministic for a given config and seed.
    pub fn new(config: &GridConfig, seed: u32) -> Result<Self, CoreError> {
        for rect in &config.blockout {
            let ok = rect.min_x <= rect.max_x
                && rect.min_y <= rect.max_y
                && rect.max_x < config.width
                && rect.max_y < config.height;
            if !ok {
                return Err(CoreError::OutOfBounds {
                    x: i16::from(rect.max_x),
                    y: i16::from(rect.max_y),
                });
            }
        }

        let mask = BlockoutMask::new(config.blockout.clone());
        let mut grid = Grid::new(config.width, config.height, &mask);
        let mut dealer = TokenDealer::new(seed, TokenCatalog::new(config.token_kinds));
        let generation = populate(&mut grid, &mut dealer);

        Ok(Self {
            grid,
            dealer,
            state: LoopState::Idle,
            resolving: false,
            turns_taken: 0,
            points_total: 0,
            seed,
            generation,
        })
    }

    /// Resume or fixture constructor: adopt an existing grid as-is. Any
    /// matches already on the grid resolve on the next swap.
    pub fn from_parts(grid: Grid, token_kinds: u8, seed: u32) -> Self {
        Self {
            grid,
            dealer: TokenDealer::new(seed, TokenCatalog::new(token_kinds)),
            state: LoopState::Idle,
            resolving: false,
            turns_taken: 0,
            points_total: 0,
            seed,
            generation: GenerationReport::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// True while a resolution loop is in flight; callers gate input on it.
    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    pub fn loop_state(&self) -> LoopState {
        self.state
    }

    pub fn kind_at(&self, x: u8, y: u8) -> Option<TokenKind> {
        self.grid.kind_at(x, y)
    }

    /// Cell at (x, y), None if out of bounds.
    pub fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        self.grid.get(x, y)
    }

    pub fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    pub fn points_total(&self) -> u32 {
        self.points_total
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Cells where initial generation had to accept a matching candidate.
    pub fn generation_report(&self) -> &GenerationReport {
        &self.generation
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::of(self)
    }

    /// Swap the token at (x, y) with its neighbor in `direction`.
    ///
    /// Both cells must be in bounds, non-blocked, and occupied; otherwise
    /// the move is rejected with a reason and the grid is untouched. A
    /// validated swap commits unconditionally (no revert when it produces no
    /// match), counts one turn, and resolves cascades to a stable state.
    pub fn try_swap(
        &mut self,
        x: u8,
        y: u8,
        direction: Direction,
    ) -> Result<SwapOutcome, CoreError> {
        if self.resolving {
            return Err(CoreError::ReentrantResolution);
        }

        let src_kind = self.cell_token(i16::from(x), i16::from(y))?;
        let (dx, dy) = direction.delta();
        let (tx, ty) = (i16::from(x) + dx, i16::from(y) + dy);
        let dst_kind = self.cell_token(tx, ty)?;
        let (tx, ty) = (tx as u8, ty as u8);

        self.grid.put(x, y, Cell::Occupied(dst_kind));
        self.grid.put(tx, ty, Cell::Occupied(src_kind));
        self.turns_taken += 1;

        let passes = self.resolve();
        let points = passes.iter().map(|p| p.event.points).sum();
        self.points_total += points;

        Ok(SwapOutcome {
            swapped: ((x, y), (tx, ty)),
            passes,
            points,
            turns_taken: self.turns_taken,
        })
    }

    /// Validate one swap endpoint and return its token.
    fn cell_token(&self, x: i16, y: i16) -> Result<TokenKind, CoreError> {
        match self.grid.get(x, y) {
            None => Err(CoreError::OutOfBounds { x, y }),
            Some(Cell::Blocked) => Err(CoreError::BlockedCell {
                x: x as u8,
                y: y as u8,
            }),
            Some(Cell::Empty) => Err(CoreError::EmptyCellMove {
                x: x as u8,
                y: y as u8,
            }),
            Some(Cell::Occupied(kind)) => Ok(kind),
        }
    }

    /// Run detect -> destroy -> refill until a scan finds nothing. Always
    /// terminates: each pass consumes the matches it found and refills are
    /// finite.
    fn resolve(&mut self) -> Vec<PassRecord> {
        self.resolving = true;
        let mut passes = Vec::new();

        loop {
            self.state = LoopState::Matching;
            let found = scan(&self.grid, MatchRule::AxisRuns);
            if found.is_empty() {
                break;
            }

            self.state = LoopState::Destroying;
            for &(cx, cy) in &found.destroyed {
                self.grid.put(cx, cy, Cell::Empty);
            }
            let points = pass_points(&found.runs_by_length);

            self.state = LoopState::Refilling;
            let moves = settle(&mut self.grid);
            let spawned = refill(&mut self.grid, &mut self.dealer);

            let pass = passes.len() as u32;
            debug!(
                pass,
                destroyed = found.destroyed.len(),
                runs = found.run_count(),
                points,
                "resolution pass complete"
            );
            passes.push(PassRecord {
                event: MatchEvent {
                    pass,
                    destroyed: found.destroyed,
                    runs_by_length: found.runs_by_length,
                    points,
                },
                moves,
                spawned,
            });
        }

        self.state = LoopState::Idle;
        self.resolving = false;
        passes
    }

    #[cfg(test)]
    fn force_resolving(&mut self, resolving: bool) {
        self.resolving = resolving;
    }
}
