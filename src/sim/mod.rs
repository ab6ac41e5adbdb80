//! Deterministic game session
//!
//! Scoring, lives, power-ups and level progression. Physics stays with the
//! engine; it reports what happened through [`TickInput`]:
//! - Explicit millisecond deltas only
//! - Seeded RNG only
//! - Stable iteration order (by brick ID)

pub mod state;
pub mod tick;

pub use state::{ActiveEffects, Brick, Combo, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, choose_drop, tick};
