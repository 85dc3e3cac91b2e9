//! Per-frame simulation module
//!
//! All gameplay logic lives here. Updates run to completion synchronously:
//! - One tick per display refresh, no delta-time scaling
//! - Seeded RNG only, so block batches are reproducible under test
//! - No rendering, audio or platform dependencies

pub mod blocks;
pub mod breakout;
pub mod collision;
pub mod pong;
pub mod powerup;
pub mod state;
pub mod tick;

pub use breakout::BreakoutState;
pub use collision::{Edge, Face, paddle_bounce, paddle_hit, past_edge, reflect_off_wall};
pub use pong::{PongState, ai_velocity};
pub use powerup::{ActiveEffect, PowerUpEffects};
pub use state::{
    Axis, Ball, BallColor, Block, BlockStatus, GameEvent, GamePhase, Paddle, PowerUp, Rgb, Side,
};
pub use tick::{TickInput, level_cleared};

use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Which game to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Breakout,
    Pong,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Breakout => "breakout",
            Variant::Pong => "pong",
        }
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakout" => Ok(Variant::Breakout),
            "pong" => Ok(Variant::Pong),
            _ => bail!("unknown game {s:?}"),
        }
    }
}

/// A running game of either variant
#[derive(Debug, Clone)]
pub enum Arcade {
    Breakout(BreakoutState),
    Pong(PongState),
}

impl Arcade {
    pub fn new(variant: Variant, seed: u64) -> Self {
        match variant {
            Variant::Breakout => Arcade::Breakout(BreakoutState::new(seed)),
            Variant::Pong => Arcade::Pong(PongState::new(seed)),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Arcade::Breakout(_) => Variant::Breakout,
            Arcade::Pong(_) => Variant::Pong,
        }
    }

    pub fn tick(&mut self, input: &TickInput) {
        match self {
            Arcade::Breakout(state) => state.tick(input),
            Arcade::Pong(state) => state.tick(input),
        }
    }

    /// Events raised by the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        match self {
            Arcade::Breakout(state) => &state.events,
            Arcade::Pong(state) => &state.events,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Arcade::Breakout(state) => state.level,
            Arcade::Pong(state) => state.level,
        }
    }
}
