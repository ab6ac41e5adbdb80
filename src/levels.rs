//! Level sources: hand-made configured levels and the procedural generator

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bricks::BrickKind;
use crate::config::GameConfig;
use crate::levelgen::{GenerationRequest, Grid, Pattern, Viewport, generate_level};

/// Problems with hand-written level data
#[derive(Debug, Error)]
pub enum LevelDataError {
    #[error("level has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown brick code {code} at row {row}, col {col}")]
    UnknownCode { row: usize, col: usize, code: u8 },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw configured level: rows of brick codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelData(pub Vec<Vec<u8>>);

impl LevelData {
    /// The two levels shipped with the game
    pub fn builtin() -> Vec<LevelData> {
        vec![
            LevelData(vec![vec![1, 2, 3, 4, 5, 5, 4, 3, 2, 1]]),
            LevelData(vec![vec![1, 2, 3, 2, 1, 3, 2], vec![3, 1, 2, 3, 2, 1, 3]]),
        ]
    }

    /// Used when configured data is unusable
    pub fn fallback() -> LevelData {
        LevelData(vec![vec![1; 7]])
    }

    pub fn rows(&self) -> usize {
        self.0.len()
    }

    pub fn validate(&self) -> Result<(), LevelDataError> {
        let expected = match self.0.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LevelDataError::Empty),
        };
        for (row, cells) in self.0.iter().enumerate() {
            if cells.len() != expected {
                return Err(LevelDataError::Ragged {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            if let Some((col, &code)) = cells
                .iter()
                .enumerate()
                .find(|&(_, &code)| BrickKind::from_code(code).is_none())
            {
                return Err(LevelDataError::UnknownCode { row, col, code });
            }
        }
        Ok(())
    }

    /// Convert to a grid, substituting [`LevelData::fallback`] for invalid data
    pub fn to_grid(&self) -> Grid {
        let data = match self.validate() {
            Ok(()) => self,
            Err(err) => {
                log::warn!("Invalid level data ({}); using default row", err);
                return Self::fallback().to_grid();
            }
        };
        Grid::from_rows(
            data.0
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&code| BrickKind::from_code(code).unwrap_or_default())
                        .collect()
                })
                .collect(),
        )
    }
}

/// Where levels come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelSource {
    #[default]
    Procedural,
    Configured,
}

impl LevelSource {
    pub fn from_procedural_flag(procedural: bool) -> Self {
        if procedural {
            LevelSource::Procedural
        } else {
            LevelSource::Configured
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LevelSource::Procedural => LevelSource::Configured,
            LevelSource::Configured => LevelSource::Procedural,
        }
    }
}

/// A level ready to be laid out and played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLevel {
    /// 0-based level index
    pub index: u32,
    pub grid: Grid,
    pub ball_speed: u32,
    /// Pattern name, for generated levels
    pub pattern: Option<Pattern>,
}

/// Load level `index` (0-based) from `source`.
///
/// Configured indices past the end fall back to the first level. The first
/// configured level keeps its side columns empty.
pub fn load_level(
    config: &GameConfig,
    source: LevelSource,
    index: u32,
    viewport: Viewport,
    seed: Option<&str>,
) -> LoadedLevel {
    match source {
        LevelSource::Procedural => {
            let mut request = GenerationRequest::new(index.saturating_add(1), viewport);
            request.seed = seed.map(str::to_string);
            let generated = generate_level(&request);
            log::info!(
                "Loaded procedural level {} ({}, {}x{})",
                request.level_number,
                generated.meta.pattern,
                generated.meta.cols,
                generated.meta.rows
            );
            LoadedLevel {
                index,
                grid: generated.grid,
                ball_speed: generated.modifiers.ball_speed,
                pattern: Some(generated.meta.pattern),
            }
        }
        LevelSource::Configured => {
            let slot = if (index as usize) < config.levels.len() {
                index as usize
            } else {
                log::warn!("No configured level {}; using level 1", index.saturating_add(1));
                0
            };
            let mut grid = config
                .levels
                .get(slot)
                .map_or_else(|| LevelData::fallback().to_grid(), LevelData::to_grid);
            if index == 0 {
                grid.clear_side_columns();
            }
            log::info!("Loaded configured level {}", slot + 1);
            LoadedLevel {
                index,
                grid,
                ball_speed: config.default_ball_speed,
                pattern: None,
            }
        }
    }
}

/// What follows a cleared level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progression {
    /// Continue with this 0-based level index
    Next(u32),
    /// No levels left
    Victory,
}

/// Progression after clearing level `index`
pub fn next_level(source: LevelSource, index: u32, configured_levels: usize) -> Progression {
    let next = index.saturating_add(1);
    match source {
        LevelSource::Procedural => Progression::Next(next),
        LevelSource::Configured if (next as usize) < configured_levels => Progression::Next(next),
        LevelSource::Configured => Progression::Victory,
    }
}
