//! Sweets Smash core (engine-agnostic match-3 simulation).
//!
//! This crate is the complete game logic of a tile-matching puzzle: a grid
//! of typed tokens, swap-based moves, run detection, cascade resolution with
//! per-column gravity and random refill, and scoring/turn bookkeeping. The
//! host engine (rendering, input, audio, persistence) is a collaborator that
//! drives [`core::GameSession`] and consumes the returned event log.

pub mod core;
pub mod error;
pub mod types;

pub use crate::core::{
    GameSession, GridSnapshot, LevelOutcome, LevelRules, MatchEvent, MatchRule, MatchScan,
    PassRecord, SessionSnapshot, SwapOutcome, TurnScoreTracker,
};
pub use crate::error::CoreError;
pub use crate::types::{BlockoutRect, Cell, Coord, Direction, GridConfig, TokenCatalog, TokenKind};
