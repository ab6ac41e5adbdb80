//! Game session state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::bricks::{BrickKind, PowerUpKind};
use crate::config::GameConfig;
use crate::consts::*;
use crate::highscores::HighScore;
use crate::levelgen::{Pattern, Viewport};
use crate::levels::{LevelSource, Progression, load_level};

/// Pause between losing a life and serving a new ball
pub const RESPAWN_DELAY_MS: u32 = 1500;
/// Pause on "Level Cleared" before the next level starts
pub const LEVEL_CLEAR_DELAY_PROCEDURAL_MS: u32 = 1200;
pub const LEVEL_CLEAR_DELAY_CONFIGURED_MS: u32 = 2000;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Life lost; a new ball is served when the timer runs out
    Respawning { remaining_ms: u32 },
    /// All bricks gone; waiting before moving on
    LevelCleared { remaining_ms: u32, next: Progression },
    /// Out of lives
    GameOver,
    /// Configured levels exhausted
    Victory,
}

/// Presentation-facing events, drained by the caller each frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted {
        index: u32,
        pattern: Option<Pattern>,
        ball_speed: u32,
    },
    /// Points awarded; `combo` is the multiplier applied
    Points { brick_id: u32, gained: u64, combo: u32 },
    BrickCracked { brick_id: u32 },
    BrickDestroyed { brick_id: u32, kind: BrickKind },
    PowerUpDropped { brick_id: u32, kind: PowerUpKind },
    EffectStarted(PowerUpKind),
    EffectExpired(PowerUpKind),
    LifeGained { lives: u32 },
    /// Extra balls to spawn, one speed per ball
    BallsSpawned { speeds: Vec<u32> },
    BallServed { speed: u32 },
    /// Ball speed changed by hand; balls in play keep their heading
    BallSpeedChanged { speed: u32 },
    LifeLost { lives: u32 },
    NewHighScore(u64),
    LevelCleared { index: u32 },
    GameOver { score: u64, high_score: u64 },
    Victory { score: u64, high_score: u64 },
}

/// A brick still on the field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub row: usize,
    pub col: usize,
    pub kind: BrickKind,
    /// Hits left before the brick breaks
    pub hp: u8,
}

impl Brick {
    pub fn is_cracked(&self) -> bool {
        self.hp < self.kind.hits()
    }
}

/// Score multiplier that grows with each award inside the combo window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub multiplier: u32,
    /// Time left before the multiplier resets (None when idle)
    pub remaining_ms: Option<u32>,
}

impl Default for Combo {
    fn default() -> Self {
        Self {
            multiplier: 1,
            remaining_ms: None,
        }
    }
}

impl Combo {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance the window; resets the multiplier when it runs out
    pub fn advance(&mut self, dt_ms: u32) {
        if let Some(remaining) = self.remaining_ms {
            if remaining <= dt_ms {
                self.reset();
            } else {
                self.remaining_ms = Some(remaining - dt_ms);
            }
        }
    }
}

/// Timed power-up effects; big paddle and fireball run independently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub big_paddle_ms: Option<u32>,
    pub fireball_ms: Option<u32>,
}

impl ActiveEffects {
    pub fn big_paddle(&self) -> bool {
        self.big_paddle_ms.is_some()
    }

    /// Balls pass through bricks while active
    pub fn fireball(&self) -> bool {
        self.fireball_ms.is_some()
    }

    /// Start or restart a timed effect
    pub fn start(&mut self, kind: PowerUpKind, duration_ms: u32) {
        match kind {
            PowerUpKind::BigPaddle => self.big_paddle_ms = Some(duration_ms),
            PowerUpKind::Fireball => self.fireball_ms = Some(duration_ms),
            PowerUpKind::MultiBall | PowerUpKind::Life => {}
        }
    }

    /// Advance timers, returning effects that just expired
    pub fn advance(&mut self, dt_ms: u32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for (slot, kind) in [
            (&mut self.big_paddle_ms, PowerUpKind::BigPaddle),
            (&mut self.fireball_ms, PowerUpKind::Fireball),
        ] {
            if let Some(remaining) = *slot {
                if remaining <= dt_ms {
                    *slot = None;
                    expired.push(kind);
                } else {
                    *slot = Some(remaining - dt_ms);
                }
            }
        }
        expired
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub source: LevelSource,
    pub viewport: Viewport,
    /// Fixed seed for generated levels (None derives one per level)
    pub level_seed: Option<String>,
    /// Current level (0-based)
    pub level_index: u32,
    pub ball_speed: u32,
    pub score: u64,
    pub high_score: HighScore,
    pub lives: u32,
    pub combo: Combo,
    pub effects: ActiveEffects,
    pub phase: GamePhase,
    /// Balls currently in play
    pub balls: u32,
    /// Bricks still on the field (sorted by id)
    pub bricks: Vec<Brick>,
    /// Drop rolls
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a run at the first level
    pub fn new(config: GameConfig, source: LevelSource, viewport: Viewport, seed: u64) -> Self {
        Self::resume(config, source, viewport, seed, 0, 0, STARTING_LIVES)
    }

    /// Start a run at `level_index` carrying over score and lives
    pub fn resume(
        config: GameConfig,
        source: LevelSource,
        viewport: Viewport,
        seed: u64,
        level_index: u32,
        score: u64,
        lives: u32,
    ) -> Self {
        let mut state = Self {
            ball_speed: config.default_ball_speed,
            config,
            source,
            viewport,
            level_seed: None,
            level_index,
            score,
            high_score: HighScore::default(),
            lives: lives.min(MAX_LIVES),
            combo: Combo::default(),
            effects: ActiveEffects::default(),
            phase: GamePhase::Playing,
            balls: 0,
            bricks: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        state.start_level(level_index);
        state
    }

    /// Use a fixed seed for generated levels and rebuild the current level
    pub fn with_level_seed(mut self, seed: impl Into<String>) -> Self {
        self.level_seed = Some(seed.into());
        self.events.clear();
        self.start_level(self.level_index);
        self
    }

    pub fn with_high_score(mut self, high_score: HighScore) -> Self {
        self.high_score = high_score;
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Load a level and serve the first ball. Score and lives carry over.
    pub fn start_level(&mut self, index: u32) {
        let level = load_level(
            &self.config,
            self.source,
            index,
            self.viewport,
            self.level_seed.as_deref(),
        );

        self.level_index = index;
        self.ball_speed = level.ball_speed;
        self.bricks.clear();
        for (row, col, kind) in level.grid.iter() {
            if kind.is_empty() {
                continue;
            }
            let id = self.next_entity_id();
            self.bricks.push(Brick {
                id,
                row,
                col,
                kind,
                hp: kind.hits(),
            });
        }
        self.combo.reset();
        self.effects = ActiveEffects::default();
        self.balls = 1;
        self.phase = GamePhase::Playing;

        log::info!("Level {} started with {} bricks", index + 1, self.bricks.len());
        self.events.push(GameEvent::LevelStarted {
            index,
            pattern: level.pattern,
            ball_speed: self.ball_speed,
        });
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn brick(&self, id: u32) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }

    /// Bricks left to clear
    pub fn bricks_remaining(&self) -> usize {
        self.bricks.len()
    }

    /// Whether the run has ended (game over or victory)
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Victory)
    }
}
