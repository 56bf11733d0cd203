//! Event log returned to the caller
//!
//! The core never broadcasts; every swap returns a structured record of what
//! happened, in order, before the next input is accepted. Presentation
//! layers replay the per-cell move and spawn lists to animate from old state
//! to new without influencing the logic's outcome.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::gravity::{SpawnedToken, TokenMove};
use crate::types::Coord;

/// What one destroy phase removed and scored. Emitted once per resolution
/// pass, aggregating every run found in that pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Zero-based index of the pass within one resolution loop.
    pub pass: u32,
    /// Destroyed cells, sorted and deduplicated.
    pub destroyed: Vec<Coord>,
    /// Run length -> number of runs of that length in this pass.
    pub runs_by_length: BTreeMap<u8, u32>,
    /// Points earned by this pass (run length x points-per-token, per run).
    pub points: u32,
}

/// One full detect -> destroy -> refill cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    pub event: MatchEvent,
    /// Tokens that dropped during compaction, in column scan order.
    pub moves: Vec<TokenMove>,
    /// Tokens spawned into the holes left after compaction.
    pub spawned: Vec<SpawnedToken>,
}

/// Result of one accepted swap: the committed exchange plus every
/// resolution pass it triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// The two cells whose tokens were exchanged.
    pub swapped: (Coord, Coord),
    /// Zero or more passes; empty when the swap produced no match.
    pub passes: Vec<PassRecord>,
    /// Total points across all passes.
    pub points: u32,
    /// Session turn count after this swap.
    pub turns_taken: u32,
}

impl SwapOutcome {
    /// True if the swap triggered at least one match.
    pub fn matched(&self) -> bool {
        !self.passes.is_empty()
    }
}
