//! Brick Breaker - arcade brick-breaker game core
//!
//! Core modules:
//! - `levelgen`: Seeded, deterministic procedural level generator
//! - `levels`: Configured levels and level-source selection
//! - `layout`: Brick placement from a generated grid
//! - `sim`: Deterministic game session (scoring, lives, power-ups, progression)
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `platform`: Browser/native platform glue
//! - `config`: Data-driven game tunables

pub mod bricks;
pub mod config;
pub mod highscores;
pub mod layout;
pub mod levelgen;
pub mod levels;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use bricks::{BrickKind, PowerUpKind};
pub use config::GameConfig;
pub use highscores::HighScore;
pub use levelgen::{GenerationRequest, GenerationResult, Viewport, generate_level};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Viewport used when the caller supplies none (or an unusable one)
    pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

    /// Brick cell size hints (pixels). Small screens get the smaller cell.
    pub const CELL_SIZE_SMALL: u32 = 50;
    pub const CELL_SIZE_LARGE: u32 = 56;
    /// Viewports whose shorter side is at most this use `CELL_SIZE_SMALL`
    pub const SMALL_VIEWPORT_MAX: f64 = 500.0;

    /// Grid bounds
    pub const MIN_COLS: usize = 6;
    pub const MAX_COLS: usize = 16;
    pub const MIN_ROWS: usize = 4;
    pub const MAX_ROWS: usize = 10;
    /// First level is kept small regardless of viewport
    pub const FIRST_LEVEL_MAX_COLS: usize = 10;
    pub const FIRST_LEVEL_MAX_ROWS: usize = 3;

    /// Share of the viewport height reserved for bricks
    pub const BRICK_REGION_RATIO: f64 = 0.38;

    /// Ball speed (pixels/s)
    pub const BALL_BASE_SPEED: u32 = 250;
    pub const BALL_SPEED_STEP: u32 = 20;
    pub const BALL_MIN_SPEED: u32 = 200;
    pub const BALL_MAX_SPEED: u32 = 500;
    /// Manual speed adjustment per key press
    pub const BALL_SPEED_ADJUST_STEP: i32 = 50;

    /// Lives
    pub const STARTING_LIVES: u32 = 3;
    pub const MAX_LIVES: u32 = 99;

    /// Extra balls spawned by the multi-ball power-up
    pub const MULTI_BALL_COUNT: u32 = 3;
    /// Speed added per spawned extra ball
    pub const MULTI_BALL_SPEED_STEP: u32 = 40;
}
