//! Session tick
//!
//! Applies the physics collaborator's reports (brick hits, caught power-ups,
//! lost balls) and advances timers deterministically.

use rand::Rng;

use super::state::{
    Brick, GameEvent, GamePhase, GameState, LEVEL_CLEAR_DELAY_CONFIGURED_MS,
    LEVEL_CLEAR_DELAY_PROCEDURAL_MS, RESPAWN_DELAY_MS,
};
use crate::bricks::PowerUpKind;
use crate::consts::*;
use crate::levels::{LevelSource, Progression, next_level};

/// What happened on the field since the last tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Brick IDs hit by a ball, in collision order
    pub brick_hits: Vec<u32>,
    /// Power-ups caught by the paddle
    pub collected: Vec<PowerUpKind>,
    /// Balls that fell past the paddle
    pub balls_lost: u32,
    /// Pause toggle
    pub pause: bool,
    /// Manual ball speed change in steps of [`BALL_SPEED_ADJUST_STEP`]
    pub speed_step: i32,
}

/// Advance the session by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if input.speed_step != 0 && !state.is_over() {
        adjust_ball_speed(state, input.speed_step);
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory => return,
        GamePhase::Respawning { remaining_ms } => {
            if remaining_ms <= dt_ms {
                state.balls = 1;
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::BallServed {
                    speed: state.ball_speed,
                });
            } else {
                state.phase = GamePhase::Respawning {
                    remaining_ms: remaining_ms - dt_ms,
                };
            }
        }
        GamePhase::LevelCleared { remaining_ms, next } => {
            if remaining_ms <= dt_ms {
                advance_level(state, next);
            } else {
                state.phase = GamePhase::LevelCleared {
                    remaining_ms: remaining_ms - dt_ms,
                    next,
                };
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.combo.advance(dt_ms);
    for kind in state.effects.advance(dt_ms) {
        log::debug!("{} expired", kind.as_str());
        state.events.push(GameEvent::EffectExpired(kind));
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    for &id in &input.brick_hits {
        hit_brick(state, id);
    }
    // A cleared field wins over anything else reported this tick
    check_level_complete(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    for &kind in &input.collected {
        collect_power_up(state, kind);
    }
    if input.balls_lost > 0 {
        state.balls = state.balls.saturating_sub(input.balls_lost);
        if state.balls == 0 {
            lose_life(state);
        }
    }
}

/// Step the base ball speed, clamped to the playable range
fn adjust_ball_speed(state: &mut GameState, steps: i32) {
    let delta = i64::from(steps) * i64::from(BALL_SPEED_ADJUST_STEP);
    let speed = (i64::from(state.ball_speed) + delta)
        .clamp(i64::from(BALL_MIN_SPEED), i64::from(BALL_MAX_SPEED)) as u32;
    if speed == state.ball_speed {
        return;
    }
    state.ball_speed = speed;
    log::debug!("Ball speed set to {}", speed);
    state.events.push(GameEvent::BallSpeedChanged { speed });
}

/// Register one ball hit on a brick; unknown IDs are ignored
pub(crate) fn hit_brick(state: &mut GameState, id: u32) {
    let Some(pos) = state.bricks.iter().position(|b| b.id == id) else {
        return;
    };
    let points = state.config.brick_points;

    let brick = &mut state.bricks[pos];
    brick.hp = brick.hp.saturating_sub(1);
    if brick.hp > 0 {
        state.events.push(GameEvent::BrickCracked { brick_id: id });
        award_points(state, id, points.crack);
        return;
    }

    let Brick { kind, .. } = state.bricks.remove(pos);
    state.events.push(GameEvent::BrickDestroyed { brick_id: id, kind });
    match kind.power_up() {
        Some(declared) => {
            award_points(state, id, points.power);
            let dropped = choose_drop(declared, state.rng.random::<f64>());
            state.events.push(GameEvent::PowerUpDropped {
                brick_id: id,
                kind: dropped,
            });
        }
        None => award_points(state, id, points.normal),
    }
}

/// Drop for a destroyed power-up brick.
///
/// Life and fireball drop as declared; the paddle/multi-ball pair keeps its
/// type on rolls below 0.6 and swaps otherwise.
pub fn choose_drop(declared: PowerUpKind, roll: f64) -> PowerUpKind {
    match declared {
        PowerUpKind::Life | PowerUpKind::Fireball => declared,
        _ if roll < 0.6 => declared,
        PowerUpKind::BigPaddle => PowerUpKind::MultiBall,
        PowerUpKind::MultiBall => PowerUpKind::BigPaddle,
    }
}

/// Award `base` points times the combo multiplier, then grow the combo
fn award_points(state: &mut GameState, brick_id: u32, base: u64) {
    let combo = state.combo.multiplier;
    let gained = base * u64::from(combo);
    state.score += gained;
    state.events.push(GameEvent::Points {
        brick_id,
        gained,
        combo,
    });

    state.combo.multiplier += 1;
    state.combo.remaining_ms = Some(state.config.combo_window_ms);

    if state.high_score.record(state.score) {
        state.events.push(GameEvent::NewHighScore(state.score));
    }
}

/// Apply a power-up caught by the paddle
pub(crate) fn collect_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::BigPaddle | PowerUpKind::Fireball => {
            state.effects.start(kind, state.config.powerup_duration_ms);
            state.events.push(GameEvent::EffectStarted(kind));
        }
        PowerUpKind::Life => {
            state.lives = (state.lives + 1).min(MAX_LIVES);
            state.events.push(GameEvent::LifeGained { lives: state.lives });
        }
        PowerUpKind::MultiBall => {
            // Extra balls split off a ball in play
            if state.balls == 0 {
                return;
            }
            let speeds: Vec<u32> = (1..=MULTI_BALL_COUNT)
                .map(|i| state.ball_speed + i * MULTI_BALL_SPEED_STEP)
                .collect();
            state.balls += MULTI_BALL_COUNT;
            state.events.push(GameEvent::BallsSpawned { speeds });
        }
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.combo.reset();

    if state.lives > 0 {
        log::info!("Life lost, {} remaining", state.lives);
        state.phase = GamePhase::Respawning {
            remaining_ms: RESPAWN_DELAY_MS,
        };
        state.events.push(GameEvent::LifeLost { lives: state.lives });
    } else {
        log::info!("Game over with score {}", state.score);
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            high_score: state.high_score.best,
        });
    }
}

fn check_level_complete(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !state.bricks.is_empty() {
        return;
    }
    let next = next_level(state.source, state.level_index, state.config.levels.len());
    let delay = match state.source {
        LevelSource::Procedural => LEVEL_CLEAR_DELAY_PROCEDURAL_MS,
        LevelSource::Configured => LEVEL_CLEAR_DELAY_CONFIGURED_MS,
    };
    log::info!("Level {} cleared", state.level_index + 1);
    state.phase = GamePhase::LevelCleared {
        remaining_ms: delay,
        next,
    };
    state.events.push(GameEvent::LevelCleared {
        index: state.level_index,
    });
}

fn advance_level(state: &mut GameState, next: Progression) {
    match next {
        Progression::Next(index) => state.start_level(index),
        Progression::Victory => {
            log::info!("All levels cleared with score {}", state.score);
            state.phase = GamePhase::Victory;
            state.events.push(GameEvent::Victory {
                score: state.score,
                high_score: state.high_score.best,
            });
        }
    }
}
