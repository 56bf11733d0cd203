//! Match detection - axis runs and connected regions
//!
//! Two equivalent rules exist in the domain and both sit behind one
//! configurable entry point. The resolution loop uses [`MatchRule::AxisRuns`]
//! (standard swap-triggered matching); [`MatchRule::ConnectedRegions`] backs
//! the generation-time safety check and is exposed for completeness.
//!
//! A run terminates on a differing kind, an empty cell, a blocked cell, or
//! the grid edge. The destroy-set deduplicates cells shared between a
//! horizontal and a vertical run, while the run-length counters count each
//! axis separately (an L-shaped intersection scores as two runs).

use std::collections::{BTreeMap, HashSet};

use crate::core::grid::Grid;
use crate::types::{Cell, Coord, TokenKind, MIN_RUN_LEN};

/// Which detection rule a scan applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Horizontal/vertical runs of >= 3 consecutive equal kinds.
    AxisRuns,
    /// 4-directionally connected same-kind regions of size >= 3.
    ConnectedRegions,
}

/// Result of one whole-grid scan: the deduplicated destroy-set plus the
/// number of qualifying runs per run length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchScan {
    /// Cells to destroy, sorted and deduplicated.
    pub destroyed: Vec<Coord>,
    /// Run length -> number of runs of that length found in this scan.
    pub runs_by_length: BTreeMap<u8, u32>,
}

impl MatchScan {
    pub fn is_empty(&self) -> bool {
        self.destroyed.is_empty()
    }

    /// Total number of scored runs across all lengths.
    pub fn run_count(&self) -> u32 {
        self.runs_by_length.values().sum()
    }
}

/// Scan the whole grid with the given rule. Read-only: the grid is never
/// mutated during a scan, and scanning a match-free grid yields an empty
/// destroy-set.
pub fn scan(grid: &Grid, rule: MatchRule) -> MatchScan {
    match rule {
        MatchRule::AxisRuns => scan_axis_runs(grid),
        MatchRule::ConnectedRegions => scan_connected_regions(grid),
    }
}

/// Size of the 4-directionally connected same-kind region containing
/// (x, y). Returns 0 for empty, blocked, or out-of-bounds seeds. Only
/// occupied cells join a region, so partially generated grids count just
/// the already-placed neighbors.
pub fn connected_region_size(grid: &Grid, x: u8, y: u8) -> usize {
    let Some(kind) = grid.kind_at(x, y) else {
        return 0;
    };
    flood_region(grid, x, y, kind).len()
}

fn flood_region(grid: &Grid, x: u8, y: u8, kind: TokenKind) -> Vec<Coord> {
    let mut region = Vec::new();
    let mut visited: HashSet<Coord> = HashSet::new();
    let mut stack = vec![(x, y)];
    visited.insert((x, y));

    while let Some((cx, cy)) = stack.pop() {
        region.push((cx, cy));
        for (dx, dy) in [(0i16, 1i16), (0, -1), (-1, 0), (1, 0)] {
            let nx = i16::from(cx) + dx;
            let ny = i16::from(cy) + dy;
            if let Some(Cell::Occupied(nk)) = grid.get(nx, ny) {
                let coord = (nx as u8, ny as u8);
                if nk == kind && visited.insert(coord) {
                    stack.push(coord);
                }
            }
        }
    }
    region
}

fn scan_axis_runs(grid: &Grid) -> MatchScan {
    let mut destroyed: HashSet<Coord> = HashSet::new();
    let mut runs_by_length: BTreeMap<u8, u32> = BTreeMap::new();

    // Rows, left to right.
    for y in 0..grid.height() {
        let mut run: Vec<Coord> = Vec::new();
        let mut run_kind: Option<TokenKind> = None;
        for x in 0..grid.width() {
            step_run(
                grid.kind_at(x, y),
                (x, y),
                &mut run,
                &mut run_kind,
                &mut destroyed,
                &mut runs_by_length,
            );
        }
        flush_run(&mut run, &mut run_kind, &mut destroyed, &mut runs_by_length);
    }

    // Columns, bottom to top.
    for x in 0..grid.width() {
        let mut run: Vec<Coord> = Vec::new();
        let mut run_kind: Option<TokenKind> = None;
        for y in 0..grid.height() {
            step_run(
                grid.kind_at(x, y),
                (x, y),
                &mut run,
                &mut run_kind,
                &mut destroyed,
                &mut runs_by_length,
            );
        }
        flush_run(&mut run, &mut run_kind, &mut destroyed, &mut runs_by_length);
    }

    finish_scan(destroyed, runs_by_length)
}

/// Advance one axis walk by one cell: extend the current run if the kind
/// matches, otherwise flush it. Empty and blocked cells carry no kind and
/// terminate runs like the grid edge does.
fn step_run(
    kind: Option<TokenKind>,
    coord: Coord,
    run: &mut Vec<Coord>,
    run_kind: &mut Option<TokenKind>,
    destroyed: &mut HashSet<Coord>,
    runs_by_length: &mut BTreeMap<u8, u32>,
) {
    if kind.is_some() && kind == *run_kind {
        run.push(coord);
        return;
    }
    flush_run(run, run_kind, destroyed, runs_by_length);
    if let Some(k) = kind {
        *run_kind = Some(k);
        run.push(coord);
    }
}

fn flush_run(
    run: &mut Vec<Coord>,
    run_kind: &mut Option<TokenKind>,
    destroyed: &mut HashSet<Coord>,
    runs_by_length: &mut BTreeMap<u8, u32>,
) {
    if run.len() >= MIN_RUN_LEN {
        *runs_by_length.entry(run.len() as u8).or_insert(0) += 1;
        destroyed.extend(run.iter().copied());
    }
    run.clear();
    *run_kind = None;
}

fn scan_connected_regions(grid: &Grid) -> MatchScan {
    let mut destroyed: HashSet<Coord> = HashSet::new();
    let mut runs_by_length: BTreeMap<u8, u32> = BTreeMap::new();
    let mut visited: HashSet<Coord> = HashSet::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let Some(kind) = grid.kind_at(x, y) else {
                continue;
            };
            if visited.contains(&(x, y)) {
                continue;
            }
            let region = flood_region(grid, x, y, kind);
            visited.extend(region.iter().copied());
            if region.len() >= MIN_RUN_LEN {
                // Region sizes above 255 cannot occur on a u8-indexed grid
                // smaller than 256x256, which the coordinate type enforces.
                *runs_by_length
                    .entry(region.len().min(u8::MAX as usize) as u8)
                    .or_insert(0) += 1;
                destroyed.extend(region);
            }
        }
    }

    finish_scan(destroyed, runs_by_length)
}

fn finish_scan(destroyed: HashSet<Coord>, runs_by_length: BTreeMap<u8, u32>) -> MatchScan {
    let mut destroyed: Vec<Coord> = destroyed.into_iter().collect();
    destroyed.sort_unstable();
    MatchScan {
        destroyed,
        runs_by_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::BlockoutMask;
    use crate::types::BlockoutRect;

    fn grid_with(width: u8, height: u8, tokens: &[(u8, u8, u8)]) -> Grid {
        let mut grid = Grid::new(width, height, &BlockoutMask::default());
        for &(x, y, kind) in tokens {
            grid.set(x, y, Cell::Occupied(TokenKind(kind))).unwrap();
        }
        grid
    }

    /// 2x2 checkerboard of two kinds; no axis run exceeds length 2.
    fn checker_grid(width: u8, height: u8) -> Grid {
        let mut grid = Grid::new(width, height, &BlockoutMask::default());
        for y in 0..height {
            for x in 0..width {
                let kind = ((x / 2 + y / 2) % 2) as u8;
                grid.set(x, y, Cell::Occupied(TokenKind(kind))).unwrap();
            }
        }
        grid
    }

    #[test]
    fn test_empty_grid_has_no_matches() {
        let grid = Grid::new(8, 8, &BlockoutMask::default());
        assert!(scan(&grid, MatchRule::AxisRuns).is_empty());
        assert!(scan(&grid, MatchRule::ConnectedRegions).is_empty());
    }

    #[test]
    fn test_checker_grid_has_no_axis_matches() {
        let grid = checker_grid(8, 8);
        assert!(scan(&grid, MatchRule::AxisRuns).is_empty());
    }

    #[test]
    fn test_horizontal_run_of_three() {
        let grid = grid_with(8, 8, &[(2, 4, 1), (3, 4, 1), (4, 4, 1)]);
        let result = scan(&grid, MatchRule::AxisRuns);
        assert_eq!(result.destroyed, vec![(2, 4), (3, 4), (4, 4)]);
        assert_eq!(result.runs_by_length.get(&3), Some(&1));
        assert_eq!(result.run_count(), 1);
    }

    #[test]
    fn test_vertical_run_of_four() {
        let grid = grid_with(8, 8, &[(5, 0, 2), (5, 1, 2), (5, 2, 2), (5, 3, 2)]);
        let result = scan(&grid, MatchRule::AxisRuns);
        assert_eq!(result.destroyed.len(), 4);
        assert_eq!(result.runs_by_length.get(&4), Some(&1));
    }

    #[test]
    fn test_run_of_two_does_not_match() {
        let grid = grid_with(8, 8, &[(0, 0, 1), (1, 0, 1)]);
        assert!(scan(&grid, MatchRule::AxisRuns).is_empty());
    }

    #[test]
    fn test_empty_cell_terminates_run() {
        // Three same-kind tokens with a hole between them.
        let grid = grid_with(8, 8, &[(0, 0, 1), (1, 0, 1), (3, 0, 1)]);
        assert!(scan(&grid, MatchRule::AxisRuns).is_empty());
    }

    #[test]
    fn test_blocked_cell_terminates_run() {
        let mask = BlockoutMask::new(vec![BlockoutRect::new(2, 0, 2, 0)]);
        let mut grid = Grid::new(8, 8, &mask);
        for x in [0u8, 1, 3, 4] {
            grid.set(x, 0, Cell::Occupied(TokenKind(1))).unwrap();
        }
        // 2 tokens, block, 2 tokens: no run reaches length 3.
        assert!(scan(&grid, MatchRule::AxisRuns).is_empty());
    }

    #[test]
    fn test_run_reaching_grid_edge_is_found() {
        let grid = grid_with(8, 8, &[(5, 7, 0), (6, 7, 0), (7, 7, 0)]);
        let result = scan(&grid, MatchRule::AxisRuns);
        assert_eq!(result.destroyed, vec![(5, 7), (6, 7), (7, 7)]);
    }

    #[test]
    fn test_l_shape_dedups_destroy_but_scores_two_runs() {
        // Horizontal (0..=2, 0) and vertical (0, 0..=2) sharing the corner.
        let grid = grid_with(
            8,
            8,
            &[(0, 0, 1), (1, 0, 1), (2, 0, 1), (0, 1, 1), (0, 2, 1)],
        );
        let result = scan(&grid, MatchRule::AxisRuns);
        assert_eq!(result.destroyed.len(), 5);
        assert_eq!(result.runs_by_length.get(&3), Some(&2));
        assert_eq!(result.run_count(), 2);
    }

    #[test]
    fn test_mixed_row_flags_only_the_qualifying_run() {
        // Row 0 = [A, A, B, A, A, A, B, B]: only columns 3..=5 match.
        let kinds = [0u8, 0, 1, 0, 0, 0, 1, 1];
        let tokens: Vec<(u8, u8, u8)> = kinds
            .iter()
            .enumerate()
            .map(|(x, &k)| (x as u8, 0, k))
            .collect();
        let grid = grid_with(8, 8, &tokens);
        let result = scan(&grid, MatchRule::AxisRuns);
        assert_eq!(result.destroyed, vec![(3, 0), (4, 0), (5, 0)]);
        assert_eq!(result.runs_by_length.get(&3), Some(&1));
        assert_eq!(result.run_count(), 1);
    }

    #[test]
    fn test_connected_region_size() {
        // An S-shaped cluster of 4 that contains no axis run of 3.
        let grid = grid_with(8, 8, &[(1, 0, 1), (2, 0, 1), (2, 1, 1), (3, 1, 1)]);
        assert_eq!(connected_region_size(&grid, 1, 0), 4);
        assert_eq!(connected_region_size(&grid, 3, 1), 4);
        assert_eq!(connected_region_size(&grid, 0, 0), 0);
        assert!(scan(&grid, MatchRule::AxisRuns).is_empty());
    }

    #[test]
    fn test_connected_region_rule_finds_bent_cluster() {
        let grid = grid_with(8, 8, &[(1, 0, 1), (2, 0, 1), (2, 1, 1), (3, 1, 1)]);
        let result = scan(&grid, MatchRule::ConnectedRegions);
        assert_eq!(result.destroyed.len(), 4);
        assert_eq!(result.runs_by_length.get(&4), Some(&1));
    }

    #[test]
    fn test_connected_region_ignores_diagonals() {
        let grid = grid_with(8, 8, &[(0, 0, 1), (1, 1, 1), (2, 2, 1)]);
        assert_eq!(connected_region_size(&grid, 0, 0), 1);
        assert!(scan(&grid, MatchRule::ConnectedRegions).is_empty());
    }

    #[test]
    fn test_scan_does_not_mutate_grid() {
        let grid = grid_with(8, 8, &[(2, 4, 1), (3, 4, 1), (4, 4, 1)]);
        let before = grid.clone();
        let _ = scan(&grid, MatchRule::AxisRuns);
        assert_eq!(grid, before);
    }
}
