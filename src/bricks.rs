//! Brick and power-up kinds shared by the generator, layout and simulation

use serde::{Deserialize, Serialize};

/// Brick type as stored in a level grid.
///
/// The numeric codes are the wire format of generated and configured levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BrickKind {
    #[default]
    Empty,
    Normal,
    BigPaddle,
    MultiBall,
    Life,
    Fireball,
}

impl BrickKind {
    pub const fn code(self) -> u8 {
        match self {
            BrickKind::Empty => 0,
            BrickKind::Normal => 1,
            BrickKind::BigPaddle => 2,
            BrickKind::MultiBall => 3,
            BrickKind::Life => 4,
            BrickKind::Fireball => 5,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BrickKind::Empty),
            1 => Some(BrickKind::Normal),
            2 => Some(BrickKind::BigPaddle),
            3 => Some(BrickKind::MultiBall),
            4 => Some(BrickKind::Life),
            5 => Some(BrickKind::Fireball),
            _ => None,
        }
    }

    /// Hits needed to destroy the brick (0 for empty cells)
    pub const fn hits(self) -> u8 {
        match self {
            BrickKind::Empty => 0,
            BrickKind::Normal => 1,
            _ => 2,
        }
    }

    /// Power-up carried by this brick, if any
    pub const fn power_up(self) -> Option<PowerUpKind> {
        match self {
            BrickKind::BigPaddle => Some(PowerUpKind::BigPaddle),
            BrickKind::MultiBall => Some(PowerUpKind::MultiBall),
            BrickKind::Life => Some(PowerUpKind::Life),
            BrickKind::Fireball => Some(PowerUpKind::Fireball),
            BrickKind::Empty | BrickKind::Normal => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, BrickKind::Empty)
    }
}

impl From<BrickKind> for u8 {
    fn from(kind: BrickKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for BrickKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        BrickKind::from_code(code).ok_or_else(|| format!("unknown brick code {code}"))
    }
}

/// Power-up effects dropped by power-up bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Widens the paddle for a limited time
    BigPaddle,
    /// Spawns extra balls
    MultiBall,
    /// Grants an extra life
    Life,
    /// Balls pierce bricks for a limited time
    #[serde(rename = "fire")]
    Fireball,
}

impl PowerUpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::BigPaddle => "big_paddle",
            PowerUpKind::MultiBall => "multi_ball",
            PowerUpKind::Life => "life",
            PowerUpKind::Fireball => "fire",
        }
    }

    /// Whether collecting this power-up starts a timed effect
    pub fn is_timed(&self) -> bool {
        matches!(self, PowerUpKind::BigPaddle | PowerUpKind::Fireball)
    }
}
