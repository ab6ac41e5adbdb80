//! Brick placement: turns a grid into positioned bricks for the play field

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::bricks::BrickKind;
use crate::config::GameConfig;
use crate::levelgen::Grid;

/// Extra top clearance for the first procedural level
const FIRST_LEVEL_TOP_GAP: f32 = 68.0;
const FIRST_LEVEL_MIN_TOP: f32 = 120.0;
const TOP_GAP: f32 = 48.0;
const MIN_TOP: f32 = 100.0;

/// Field the formation is laid out in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Width of the play field
    pub field_width: f32,
    /// Unscaled brick sprite size; only its aspect ratio survives scaling
    pub brick_base: Vec2,
    /// Use the roomier top offset of the first procedural level
    pub first_level_gap: bool,
}

/// A brick positioned on the field (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickPlacement {
    pub row: usize,
    pub col: usize,
    pub kind: BrickKind,
    pub hits: u8,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Lay out every non-empty cell.
///
/// Bricks share the width left after the side margins and gutters, keep the
/// sprite's aspect ratio and are centred horizontally.
pub fn layout_bricks(grid: &Grid, config: &GameConfig, params: &LayoutParams) -> Vec<BrickPlacement> {
    let cols = grid.cols();
    if cols == 0 || params.brick_base.x <= 0.0 {
        return Vec::new();
    }

    let pad = config.brick_padding;
    let gutter = pad * (cols - 1) as f32;
    let available = (params.field_width - gutter - 2.0 * config.side_margin).max(0.0);
    let brick_w = available / cols as f32;
    let scale = brick_w / params.brick_base.x;
    let size = Vec2::new(brick_w, params.brick_base.y * scale);

    let total_width = cols as f32 * brick_w + gutter;
    let offset_x = (params.field_width - total_width) / 2.0;
    let offset_y = if params.first_level_gap {
        (config.hud_height + FIRST_LEVEL_TOP_GAP).max(FIRST_LEVEL_MIN_TOP)
    } else {
        (config.hud_height + TOP_GAP).max(MIN_TOP)
    };
    let origin = Vec2::new(offset_x, offset_y);
    let step = size + Vec2::splat(pad);

    grid.iter()
        .filter(|&(_, _, kind)| !kind.is_empty())
        .map(|(row, col, kind)| BrickPlacement {
            row,
            col,
            kind,
            hits: kind.hits(),
            pos: origin + Vec2::new(col as f32, row as f32) * step,
            size,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelData;

    fn params(width: f32) -> LayoutParams {
        LayoutParams {
            field_width: width,
            brick_base: Vec2::new(64.0, 32.0),
            first_level_gap: false,
        }
    }

    #[test]
    fn test_single_row_layout() {
        let config = GameConfig::default();
        let grid = LevelData(vec![vec![1, 0, 2, 1]]).to_grid();
        let bricks = layout_bricks(&grid, &config, &params(800.0));
        assert_eq!(bricks.len(), 3);

        // (800 - 15 - 200) / 4
        let w = 146.25;
        assert!((bricks[0].size.x - w).abs() < 1e-4);
        assert!((bricks[0].size.y - w / 2.0).abs() < 1e-4);
        assert!((bricks[0].pos.x - 100.0).abs() < 1e-4);
        assert!((bricks[0].pos.y - 100.0).abs() < 1e-4);
        assert_eq!(bricks[1].kind, BrickKind::BigPaddle);
        assert_eq!(bricks[1].hits, 2);
        assert!((bricks[1].pos.x - (100.0 + 2.0 * (w + 5.0))).abs() < 1e-3);
    }

    #[test]
    fn test_formation_is_centred() {
        let config = GameConfig::default();
        let grid = LevelData(vec![vec![1; 6]; 2]).to_grid();
        let bricks = layout_bricks(&grid, &config, &params(1000.0));
        let left = bricks.iter().map(|b| b.pos.x).fold(f32::MAX, f32::min);
        let right = bricks.iter().map(|b| b.pos.x + b.size.x).fold(f32::MIN, f32::max);
        assert!((left - (1000.0 - right)).abs() < 1e-3);
    }

    #[test]
    fn test_first_level_gap() {
        let config = GameConfig::default();
        let grid = LevelData(vec![vec![1; 6]]).to_grid();
        let mut p = params(800.0);
        p.first_level_gap = true;
        let bricks = layout_bricks(&grid, &config, &p);
        assert!((bricks[0].pos.y - 120.0).abs() < 1e-4);
    }

    #[test]
    fn test_narrow_field_collapses() {
        let config = GameConfig::default();
        let grid = LevelData(vec![vec![1; 6]]).to_grid();
        let bricks = layout_bricks(&grid, &config, &params(150.0));
        assert!(bricks.iter().all(|b| b.size.x == 0.0));
    }
}
