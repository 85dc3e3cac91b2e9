//! Game state and core simulation types
//!
//! Entities shared by both variants. Each variant owns its own world struct
//! (`BreakoutState`, `PongState`) built from these.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, bail};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sign;

/// Breakout run state. The update step is a no-op while paused; rendering
/// continues and draws an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    Paused,
}

impl GamePhase {
    pub fn toggled(self) -> Self {
        match self {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
        }
    }
}

/// Ball tint. Flame is applied by the `flame` power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallColor {
    #[default]
    Normal,
    Flame,
}

impl BallColor {
    pub fn as_css(&self) -> &'static str {
        match self {
            BallColor::Normal => "#fff",
            BallColor::Flame => "red",
        }
    }

    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "#fff" | "#ffffff" | "white" => Some(BallColor::Normal),
            "red" | "#f00" | "#ff0000" => Some(BallColor::Flame),
            _ => None,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    pub radius: f32,
    pub color: BallColor,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            color: BallColor::Normal,
        }
    }

    /// Explicit Euler step, one frame
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Recenter and rebase the speed, keeping each component's direction.
    /// A zero component (only reachable from a hand-built state) serves
    /// rightward and upward.
    pub fn reset(&mut self, center: Vec2, base_speed: f32) {
        let dir_x = if self.vel.x == 0.0 { 1.0 } else { sign(self.vel.x) };
        let dir_y = if self.vel.y == 0.0 { -1.0 } else { sign(self.vel.y) };
        self.pos = center;
        self.vel = Vec2::new(base_speed * dir_x, base_speed * dir_y);
    }
}

/// Axis a paddle slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A paddle. `pos` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    pub axis: Axis,
    /// Velocity along `axis`, pixels per frame
    pub vel: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2, axis: Axis) -> Self {
        Self {
            pos,
            size,
            axis,
            vel: 0.0,
        }
    }

    /// Move by one frame of velocity and clamp into `[0, field - size]`
    pub fn step(&mut self, field: Vec2) {
        match self.axis {
            Axis::Horizontal => {
                let max = (field.x - self.size.x).max(0.0);
                self.pos.x = (self.pos.x + self.vel).clamp(0.0, max);
            }
            Axis::Vertical => {
                let max = (field.y - self.size.y).max(0.0);
                self.pos.y = (self.pos.y + self.vel).clamp(0.0, max);
            }
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Block lifecycle. Serialized as the integers 1 (active) and 0 (destroyed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum BlockStatus {
    Active,
    Destroyed,
}

impl From<BlockStatus> for u8 {
    fn from(status: BlockStatus) -> u8 {
        match status {
            BlockStatus::Active => 1,
            BlockStatus::Destroyed => 0,
        }
    }
}

impl TryFrom<u8> for BlockStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BlockStatus::Active),
            0 => Ok(BlockStatus::Destroyed),
            other => Err(format!("invalid block status {other}")),
        }
    }
}

/// Power-up tag carried by a breakout block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUp {
    Flame,
    DoublePower,
    Speed,
}

/// Display color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([0xFF, 0xFF, 0xFF]);

    /// Scale each channel by `(100 + percent)%`, saturating at 255
    pub fn shade(&self, percent: i32) -> Rgb {
        let scale = |c: u8| -> u8 { ((c as i32 * (100 + percent)) / 100).clamp(0, 255) as u8 };
        Rgb([scale(self.0[0]), scale(self.0[1]), scale(self.0[2])])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(hex) = s.strip_prefix('#') else {
            bail!("color {s:?} does not start with '#'");
        };
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("color {s:?} is not #RRGGBB");
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("color {s:?}"))
        };
        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> String {
        rgb.to_string()
    }
}

impl TryFrom<String> for Rgb {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A destructible block. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub pos: Vec2,
    pub size: Vec2,
    pub status: BlockStatus,
    pub color: Rgb,
    pub power: Option<PowerUp>,
}

impl Block {
    pub fn is_active(&self) -> bool {
        self.status == BlockStatus::Active
    }

    /// Strict point-in-rectangle test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }
}

/// Which pong paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

/// Something that happened during one tick. Consumed by audio and visual
/// effects; the buffer is cleared at the start of every tick.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    WallBounce,
    PaddleBounce { side: Side },
    BlockDestroyed { index: usize, block: Block },
    PowerUpActivated(PowerUp),
    PowerUpExpired(PowerUp),
    BallReset,
    PointScored { side: Side },
    LevelUp { level: u32 },
}
