//! RNG module - deterministic token generation
//!
//! A seeded LCG drives both initial grid generation and refill spawning, so
//! a level replayed with the same config and seed produces the same grids.
//! Uniform draws over the token catalog; no bag or anti-repeat logic (refill
//! matches forming from random spawns are the intended cascade trigger).

use crate::types::{TokenCatalog, TokenKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Current internal state (for restarting with the same sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draws uniformly random token kinds from a catalog.
#[derive(Debug, Clone)]
pub struct TokenDealer {
    rng: SimpleRng,
    catalog: TokenCatalog,
}

impl TokenDealer {
    pub fn new(seed: u32, catalog: TokenCatalog) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            catalog,
        }
    }

    /// Draw one kind, uniform over [0, K).
    pub fn draw(&mut self) -> TokenKind {
        TokenKind(self.rng.next_range(u32::from(self.catalog.len())) as u8)
    }

    pub fn catalog(&self) -> TokenCatalog {
        self.catalog
    }

    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
