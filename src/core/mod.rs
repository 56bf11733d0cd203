//! Core module - pure simulation logic with no engine dependencies
//!
//! This module contains the grid, match detection, gravity, generation,
//! the resolution loop, and scoring. It has zero dependencies on UI,
//! networking, or I/O.

pub mod events;
pub mod generate;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use events::{MatchEvent, PassRecord, SwapOutcome};
pub use generate::GenerationReport;
pub use gravity::{refill, settle, SpawnedToken, TokenMove};
pub use grid::{BlockoutMask, Grid};
pub use matcher::{connected_region_size, scan, MatchRule, MatchScan};
pub use rng::{SimpleRng, TokenDealer};
pub use scoring::{pass_points, run_points, LevelOutcome, LevelRules, TurnScoreTracker};
pub use session::{GameSession, LoopState};
pub use snapshot::{GridSnapshot, SessionSnapshot};
