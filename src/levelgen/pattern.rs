//! Layout patterns and their base fills

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::rng::Mulberry32;
use crate::bricks::BrickKind;

/// Named fill heuristic deciding which cells start as bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Stripes,
    Checker,
    Pyramid,
    Diagonals,
    Waves,
    Clusters,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Stripes => "stripes",
            Pattern::Checker => "checker",
            Pattern::Pyramid => "pyramid",
            Pattern::Diagonals => "diagonals",
            Pattern::Waves => "waves",
            Pattern::Clusters => "clusters",
        }
    }

    /// Patterns available to a level band
    pub fn candidates(level: u32) -> &'static [Pattern] {
        match level {
            0..=1 => &[Pattern::Stripes],
            2..=3 => &[Pattern::Stripes, Pattern::Checker],
            4..=6 => &[Pattern::Checker, Pattern::Pyramid],
            7..=10 => &[Pattern::Pyramid, Pattern::Diagonals],
            _ => &[
                Pattern::Pyramid,
                Pattern::Diagonals,
                Pattern::Waves,
                Pattern::Clusters,
            ],
        }
    }

    /// Draw a pattern for the level. Single-candidate bands consume no randomness.
    pub fn pick(level: u32, rng: &mut Mulberry32) -> Self {
        match Self::candidates(level) {
            [only] => *only,
            options => rng.choose(options),
        }
    }

    /// Fill `grid` with normal bricks according to this pattern
    pub fn fill(self, grid: &mut Grid, rng: &mut Mulberry32) {
        let rows = grid.rows();
        let cols = grid.cols();
        if rows == 0 || cols == 0 {
            return;
        }

        match self {
            Pattern::Stripes => fill_cells(grid, |r, _| r % 2 == 0 || rng.chance(0.6)),
            Pattern::Checker => fill_cells(grid, |r, c| (r + c) % 2 == 0 || rng.chance(0.25)),
            Pattern::Pyramid => {
                let mid = cols / 2;
                for r in 0..rows {
                    let span = mid.saturating_sub(r);
                    let end = (mid + span).min(cols - 1);
                    for c in (mid - span)..=end {
                        grid.set(r, c, BrickKind::Normal);
                    }
                }
            }
            Pattern::Diagonals => fill_cells(grid, |r, c| {
                (c as i64 - r as i64).rem_euclid(3) == 0 || rng.chance(0.2)
            }),
            Pattern::Waves => fill_cells(grid, |r, c| {
                let crest = ((c as f64 / cols as f64) * PI * 2.0).sin() * 0.5 + 0.5;
                (r as f64 / rows as f64) < crest || rng.chance(0.15)
            }),
            Pattern::Clusters => {
                let count = ((rows * cols) / 30).max(2);
                for _ in 0..count {
                    let center_r = rng.index(rows) as i64;
                    let center_c = rng.index(cols) as i64;
                    let radius = 1 + rng.index(2) as i64;
                    for r in (center_r - radius)..=(center_r + radius) {
                        for c in (center_c - radius)..=(center_c + radius) {
                            let inside = r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols;
                            if inside && (center_r - r).abs() + (center_c - c).abs() <= radius {
                                grid.set(r as usize, c as usize, BrickKind::Normal);
                            }
                        }
                    }
                }
                // Sprinkle
                for r in 0..rows {
                    for c in 0..cols {
                        if rng.chance(0.1) {
                            grid.set(r, c, BrickKind::Normal);
                        }
                    }
                }
            }
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overwrite every cell with Normal or Empty, visiting row-major
fn fill_cells(grid: &mut Grid, mut filled: impl FnMut(usize, usize) -> bool) {
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let kind = if filled(r, c) {
                BrickKind::Normal
            } else {
                BrickKind::Empty
            };
            grid.set(r, c, kind);
        }
    }
}
