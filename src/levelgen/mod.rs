//! Procedural level generator
//!
//! A pure function from (level number, viewport, optional seed) to a brick
//! grid. Everything random is drawn from one seeded mulberry32 stream, so the
//! same inputs always produce the same level:
//! - No shared state between calls
//! - Draw order is part of the contract (changing it changes every level)
//! - All inputs are clamped; there is no error path

pub mod density;
pub mod grid;
pub mod pattern;
pub mod powerups;
pub mod rng;

pub use grid::{Grid, GridSize, Viewport};
pub use pattern::Pattern;
pub use rng::{Mulberry32, hash_seed};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Input to [`generate_level`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    /// 1-based level number (0 is treated as 1)
    pub level_number: u32,
    pub viewport: Viewport,
    /// Explicit seed; derived from level and viewport when absent or empty
    pub seed: Option<String>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            level_number: 1,
            viewport: Viewport::default(),
            seed: None,
        }
    }
}

impl GenerationRequest {
    pub fn new(level_number: u32, viewport: Viewport) -> Self {
        Self {
            level_number,
            viewport,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Seed string actually used for this request
    pub fn seed_string(&self) -> String {
        match self.seed.as_deref() {
            Some(seed) if !seed.is_empty() => seed.to_string(),
            _ => {
                let viewport = self.viewport.sanitized();
                format!(
                    "level-{}-{}x{}",
                    self.level_number.max(1),
                    viewport.width,
                    viewport.height
                )
            }
        }
    }
}

/// Cell size hint in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    pub w: u32,
    pub h: u32,
}

/// Grid dimensions and the chosen pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMeta {
    pub cols: usize,
    pub rows: usize,
    pub cell: CellSize,
    pub pattern: Pattern,
}

/// Gameplay modifiers for the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    pub ball_speed: u32,
}

/// A generated level; owned entirely by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub grid: Grid,
    pub meta: LevelMeta,
    pub modifiers: Modifiers,
}

/// Ball speed for a level: +20 every 5 levels from 250, within [200, 500]
pub fn ball_speed(level: u32) -> u32 {
    let steps = level.max(1) - 1;
    (BALL_BASE_SPEED.saturating_add((steps / 5).saturating_mul(BALL_SPEED_STEP)))
        .clamp(BALL_MIN_SPEED, BALL_MAX_SPEED)
}

/// Generate a level.
///
/// Order of operations (each consumes from the same stream):
/// pattern pick, pattern fill, thinning (level 1) or density add,
/// power-up distribution, then side corridors on level 1.
pub fn generate_level(request: &GenerationRequest) -> GenerationResult {
    let level = request.level_number.max(1);
    let viewport = request.viewport.sanitized();
    let seed = request.seed_string();
    let mut rng = Mulberry32::from_seed_str(&seed);

    let size = GridSize::for_level(viewport, level);
    let mut grid = Grid::new(size.rows, size.cols);

    let pattern = Pattern::pick(level, &mut rng);
    pattern.fill(&mut grid, &mut rng);

    if level <= 1 {
        density::thin(&mut grid, &mut rng, density::FIRST_LEVEL_TARGET_FILL);
    } else {
        density::densify(&mut grid, level, &mut rng);
    }

    powerups::distribute(&mut grid, level, &mut rng);

    if level <= 1 && size.cols >= MIN_COLS {
        grid.clear_side_columns();
    }

    log::debug!(
        "Generated level {} ({}x{}, {}) from seed {:?}",
        level,
        size.cols,
        size.rows,
        pattern,
        seed
    );

    GenerationResult {
        grid,
        meta: LevelMeta {
            cols: size.cols,
            rows: size.rows,
            cell: CellSize {
                w: size.target_cell,
                h: size.target_cell,
            },
            pattern,
        },
        modifiers: Modifiers {
            ball_speed: ball_speed(level),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bricks::BrickKind;
    use proptest::prelude::*;

    fn generate(level: u32, width: f64, height: f64, seed: Option<&str>) -> GenerationResult {
        let mut request = GenerationRequest::new(level, Viewport::new(width, height));
        request.seed = seed.map(str::to_string);
        generate_level(&request)
    }

    #[test]
    fn test_first_level_scenario() {
        let result = generate(1, 800.0, 600.0, Some("test1"));
        assert!((6..=10).contains(&result.meta.cols));
        assert!(result.meta.rows <= 3);
        assert_eq!(result.meta.pattern, Pattern::Stripes);
        for row in result.grid.iter_rows() {
            assert_eq!(row[0], BrickKind::Empty);
            assert_eq!(row[row.len() - 1], BrickKind::Empty);
        }
        assert_eq!(result.grid.count(BrickKind::Life), 1);
        assert_eq!(
            result.grid.count(BrickKind::BigPaddle) + result.grid.count(BrickKind::MultiBall),
            1
        );
        assert_eq!(result.grid.count(BrickKind::Fireball), 0);
        assert_eq!(result.modifiers.ball_speed, 250);
    }

    #[test]
    fn test_late_level_scenario() {
        let result = generate(20, 1200.0, 800.0, None);
        assert!(result.meta.cols <= MAX_COLS);
        assert!(result.meta.rows <= MAX_ROWS);
        // 250 + floor(19 / 5) * 20
        assert_eq!(result.modifiers.ball_speed, 310);
    }

    #[test]
    fn test_ball_speed_bounds() {
        assert_eq!(ball_speed(0), 250);
        assert_eq!(ball_speed(1), 250);
        assert_eq!(ball_speed(6), 270);
        assert_eq!(ball_speed(65), 490);
        assert_eq!(ball_speed(66), 500);
        assert_eq!(ball_speed(u32::MAX), 500);
    }

    #[test]
    fn test_fixed_seed_reproducible() {
        let a = generate(3, 800.0, 600.0, Some("fixed-seed"));
        let b = generate(3, 800.0, 600.0, Some("fixed-seed"));
        assert_eq!(a, b);

        let c = generate(3, 800.0, 600.0, Some("other-seed"));
        assert_ne!(a.grid, c.grid);
    }

    #[test]
    fn test_golden_pyramid() {
        let result = generate(5, 800.0, 600.0, Some("golden"));
        assert_eq!(result.meta.pattern, Pattern::Pyramid);
        assert_eq!(result.meta.cell, CellSize { w: 56, h: 56 });
        assert_eq!(
            result.grid.to_codes(),
            vec![
                vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                vec![0, 1, 1, 1, 1, 1, 1, 1, 1, 3, 1, 1, 1, 1],
                vec![0, 0, 1, 1, 1, 1, 1, 4, 1, 1, 1, 1, 1, 0],
                vec![0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
            ]
        );
    }

    #[test]
    fn test_golden_checker() {
        let result = generate(3, 800.0, 600.0, Some("fixed-seed"));
        assert_eq!(result.meta.pattern, Pattern::Checker);
        assert_eq!(
            result.grid.to_codes(),
            vec![
                vec![1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0],
                vec![1, 1, 1, 1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 1],
                vec![1, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1, 1, 0],
                vec![1, 1, 0, 1, 0, 2, 1, 1, 1, 1, 1, 1, 0, 1],
            ]
        );
    }

    #[test]
    fn test_golden_derived_seed() {
        let result = generate(8, 1024.0, 768.0, None);
        assert_eq!(result.meta.pattern, Pattern::Diagonals);
        assert_eq!((result.meta.cols, result.meta.rows), (16, 5));
        assert_eq!(result.modifiers.ball_speed, 270);
        assert_eq!(
            result.grid.to_codes(),
            vec![
                vec![1, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 1, 0, 1],
                vec![1, 1, 0, 0, 1, 0, 0, 2, 1, 1, 1, 0, 0, 1, 0, 0],
                vec![1, 0, 1, 0, 1, 1, 0, 0, 2, 0, 0, 1, 0, 0, 1, 0],
                vec![1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 0, 0, 1, 0, 0, 3],
                vec![0, 1, 0, 0, 1, 0, 1, 1, 0, 1, 1, 0, 0, 1, 1, 0],
            ]
        );
    }

    #[test]
    fn test_seed_string_defaults() {
        let request = GenerationRequest::new(4, Viewport::new(1024.0, 768.0));
        assert_eq!(request.seed_string(), "level-4-1024x768");
        assert_eq!(request.clone().with_seed("").seed_string(), "level-4-1024x768");
        assert_eq!(request.with_seed("abc").seed_string(), "abc");

        let invalid = GenerationRequest::new(0, Viewport::new(-1.0, 0.0));
        assert_eq!(invalid.seed_string(), "level-1-800x600");
    }

    #[test]
    fn test_invalid_input_is_clamped() {
        let result = generate(0, -5.0, f64::INFINITY, None);
        let fallback = generate(1, 800.0, 600.0, None);
        assert_eq!(result, fallback);
    }

    #[test]
    fn test_result_json_shape() {
        let result = generate(2, 800.0, 600.0, Some("json"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["meta"]["cell"]["w"], 56);
        assert_eq!(value["modifiers"]["ballSpeed"], 250);
        assert!(value["meta"]["pattern"].is_string());
        assert_eq!(value["grid"].as_array().unwrap().len(), result.meta.rows);
    }

    #[test]
    fn test_request_json_defaults() {
        let request: GenerationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, GenerationRequest::default());
        let request: GenerationRequest =
            serde_json::from_str(r#"{"levelNumber": 3, "seed": "x"}"#).unwrap();
        assert_eq!(request.level_number, 3);
        assert_eq!(request.viewport, Viewport::default());
    }

    proptest! {
        #[test]
        fn prop_deterministic(level in 1u32..40, w in 200.0f64..2500.0, h in 200.0f64..1600.0) {
            let a = generate(level, w, h, None);
            let b = generate(level, w, h, None);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_shape(level in 1u32..60, w in 50.0f64..4000.0, h in 50.0f64..3000.0, seed in "[a-z0-9]{1,10}") {
            let result = generate(level, w, h, Some(seed.as_str()));
            let meta = &result.meta;
            prop_assert_eq!(result.grid.rows(), meta.rows);
            for row in result.grid.iter_rows() {
                prop_assert_eq!(row.len(), meta.cols);
            }
            if level <= 1 {
                prop_assert!((MIN_COLS..=FIRST_LEVEL_MAX_COLS).contains(&meta.cols));
                prop_assert!(meta.rows <= FIRST_LEVEL_MAX_ROWS);
            } else {
                prop_assert!((MIN_COLS..=MAX_COLS).contains(&meta.cols));
                prop_assert!((MIN_ROWS..=MAX_ROWS).contains(&meta.rows));
            }
        }

        #[test]
        fn prop_first_level_guarantees(w in 200.0f64..2500.0, h in 200.0f64..1600.0, seed in "[a-zA-Z0-9]{1,12}") {
            let result = generate(1, w, h, Some(seed.as_str()));
            let grid = &result.grid;
            for row in grid.iter_rows() {
                prop_assert_eq!(row[0], BrickKind::Empty);
                prop_assert_eq!(row[row.len() - 1], BrickKind::Empty);
            }
            // Every surviving brick sits in the interior, so each one was a candidate.
            let filled = grid.filled();
            prop_assert_eq!(grid.count(BrickKind::Life), filled.min(1));
            prop_assert_eq!(
                grid.count(BrickKind::BigPaddle) + grid.count(BrickKind::MultiBall),
                usize::from(filled >= 2)
            );
            prop_assert_eq!(grid.count(BrickKind::Fireball), 0);
        }

        #[test]
        fn prop_second_level_guarantees(w in 200.0f64..2500.0, h in 200.0f64..1600.0, seed in "[a-zA-Z0-9]{1,12}") {
            let result = generate(2, w, h, Some(seed.as_str()));
            prop_assert!(result.grid.count(BrickKind::Life) >= 1);
            prop_assert!(result.grid.count(BrickKind::Fireball) >= 1);
        }

        #[test]
        fn prop_ball_speed_monotonic(level in 1u32..500) {
            let speed = ball_speed(level);
            prop_assert!((BALL_MIN_SPEED..=BALL_MAX_SPEED).contains(&speed));
            prop_assert!(ball_speed(level + 1) >= speed);
        }

        #[test]
        fn prop_power_up_count_bounded(level in 3u32..60, seed in "[a-z]{1,8}") {
            let result = generate(level, 1024.0, 768.0, Some(seed.as_str()));
            let power_ups = result.grid.iter().filter(|&(_, _, k)| k.power_up().is_some()).count();
            prop_assert!(power_ups <= 6);
        }
    }
}
