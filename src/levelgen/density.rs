//! Difficulty density adjustment and first-level thinning

use super::grid::Grid;
use super::rng::Mulberry32;
use crate::bricks::BrickKind;

/// Fill ratio the first level is thinned toward
pub const FIRST_LEVEL_TARGET_FILL: f64 = 0.34;

/// Chance of adding a brick to an empty cell; grows every 3 levels.
pub fn add_chance(level: u32) -> f64 {
    let band = f64::from(level.saturating_sub(1) / 3);
    (0.03 + band * 0.025).clamp(0.03, 0.22)
}

/// Add normal bricks to empty cells with the level's [`add_chance`]
pub fn densify(grid: &mut Grid, level: u32, rng: &mut Mulberry32) {
    let chance = add_chance(level);
    let mut added = 0usize;
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if grid.get(r, c).is_empty() && rng.chance(chance) {
                grid.set(r, c, BrickKind::Normal);
                added += 1;
            }
        }
    }
    log::debug!("Level {} density pass: +{} bricks (p={:.3})", level, added, chance);
}

/// Clear normal bricks until at most `target_fill` of the grid is filled.
///
/// Candidates are visited in shuffled order; cells far from the centre column
/// are cleared more eagerly. Stops early if candidates run out.
pub fn thin(grid: &mut Grid, rng: &mut Mulberry32, target_fill: f64) {
    let rows = grid.rows();
    let cols = grid.cols();
    let mut filled = grid.count(BrickKind::Normal);
    let desired = ((rows * cols) as f64 * target_fill).floor() as usize;
    if filled <= desired {
        return;
    }

    let mut cells = grid.cells_of(BrickKind::Normal);
    rng.shuffle(&mut cells);

    let mid = cols / 2;
    let width = cols.max(1) as f64;
    for (r, c) in cells {
        if filled <= desired {
            break;
        }
        let bias = c.abs_diff(mid) as f64;
        if rng.chance(0.3 + bias / width) {
            grid.set(r, c, BrickKind::Empty);
            filled -= 1;
        }
    }
    log::debug!("Thinned grid to {} of {} cells (target {})", filled, rows * cols, desired);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_chance_bands() {
        assert!((add_chance(1) - 0.03).abs() < 1e-12);
        assert!((add_chance(3) - 0.03).abs() < 1e-12);
        assert!((add_chance(4) - 0.055).abs() < 1e-12);
        assert!((add_chance(7) - 0.08).abs() < 1e-12);
        assert!((add_chance(100) - 0.22).abs() < 1e-12);
    }

    #[test]
    fn test_add_chance_non_decreasing() {
        let mut prev = 0.0;
        for level in 1..200 {
            let p = add_chance(level);
            assert!(p >= prev);
            prev = p;
        }
    }

    #[test]
    fn test_densify_only_adds() {
        let mut grid = Grid::new(10, 16);
        grid.set(0, 0, BrickKind::Life);
        densify(&mut grid, 60, &mut Mulberry32::new(8));
        assert_eq!(grid.get(0, 0), BrickKind::Life);
        assert!(grid.filled() > 1);
    }

    #[test]
    fn test_thin_reaches_target() {
        let mut grid = Grid::from_rows(vec![vec![BrickKind::Normal; 10]; 3]);
        thin(&mut grid, &mut Mulberry32::new(12), FIRST_LEVEL_TARGET_FILL);
        // floor(30 * 0.34) = 10 is a floor; the single shuffled pass may run
        // out of candidates before reaching it.
        assert!(grid.filled() >= 10);
        assert!(grid.filled() < 30);
    }

    #[test]
    fn test_thin_leaves_sparse_grid_alone() {
        let mut grid = Grid::new(3, 10);
        grid.set(1, 4, BrickKind::Normal);
        let mut rng = Mulberry32::new(4);
        let before = rng.clone();
        thin(&mut grid, &mut rng, FIRST_LEVEL_TARGET_FILL);
        assert_eq!(grid.filled(), 1);
        // No draws consumed
        assert_eq!(rng.next_f64(), before.clone().next_f64());
    }
}
