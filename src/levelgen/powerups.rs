//! Power-up brick distribution

use super::grid::Grid;
use super::rng::Mulberry32;
use crate::bricks::BrickKind;

/// Number of power-up bricks a level aims for
pub fn target_count(rows: usize, cols: usize, level: u32) -> usize {
    if level <= 1 {
        return 2;
    }
    let base = ((rows * cols) as f64 * 0.025).round() as usize;
    let bonus = (level.saturating_sub(1) / 3) as usize;
    let max = (2 + (level.saturating_sub(1) / 5) as usize).clamp(2, 6);
    (base + bonus).clamp(1, max)
}

/// Weighted roll for the filler power-ups of a level band
fn roll_kind(level: u32, roll: f64) -> BrickKind {
    // Cumulative thresholds for BigPaddle, MultiBall, Life; Fireball takes the rest
    let (big, multi, life) = match level {
        0..=1 => (0.45, 0.8, 1.0),
        2 => (0.4, 0.7, 0.85),
        3..=5 => (0.4, 0.75, 0.9),
        _ => (0.35, 0.65, 0.8),
    };
    if roll < big {
        BrickKind::BigPaddle
    } else if roll < multi {
        BrickKind::MultiBall
    } else if roll < life {
        BrickKind::Life
    } else {
        BrickKind::Fireball
    }
}

/// Shuffled candidate cells, handed out below the top row first
struct Candidates {
    cells: Vec<(usize, usize)>,
}

impl Candidates {
    fn take(&mut self) -> Option<(usize, usize)> {
        let idx = self.cells.iter().position(|&(r, _)| r > 0).unwrap_or(0);
        (idx < self.cells.len()).then(|| self.cells.remove(idx))
    }

    fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Turn some normal bricks into power-up bricks.
///
/// Level 1 guarantees a Life plus a BigPaddle or MultiBall, level 2 a Life
/// plus a Fireball. Remaining slots use the level band's weighted roll. On
/// level 1 the side columns are never picked since they become corridors.
/// Places fewer than the target when there are not enough normal bricks.
pub fn distribute(grid: &mut Grid, level: u32, rng: &mut Mulberry32) {
    let cols = grid.cols();
    let mut target = target_count(grid.rows(), cols, level);

    let mut cells = grid.cells_of(BrickKind::Normal);
    if level <= 1 {
        cells.retain(|&(_, c)| c != 0 && c + 1 != cols);
    }
    rng.shuffle(&mut cells);
    let mut candidates = Candidates { cells };

    let required: Vec<BrickKind> = match level {
        0..=1 => {
            let companion = if rng.chance(0.5) {
                BrickKind::BigPaddle
            } else {
                BrickKind::MultiBall
            };
            vec![BrickKind::Life, companion]
        }
        2 => vec![BrickKind::Life, BrickKind::Fireball],
        _ => Vec::new(),
    };

    target = target
        .max(required.len())
        .min(required.len().max(candidates.len()));

    let mut placed = 0usize;
    for &kind in &required {
        if target == 0 {
            break;
        }
        let Some((r, c)) = candidates.take() else {
            break;
        };
        grid.set(r, c, kind);
        target -= 1;
        placed += 1;
    }

    while target > 0 {
        let Some((r, c)) = candidates.take() else {
            break;
        };
        grid.set(r, c, roll_kind(level, rng.next_f64()));
        target -= 1;
        placed += 1;
    }

    log::debug!("Level {} power-ups placed: {}", level, placed);
}
