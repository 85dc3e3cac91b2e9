//! Block Arcade - two canvas arcade games sharing one simulation core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (motion, collisions, scoring, levels)
//! - `renderer`: Display list building and the canvas backend
//! - `platform`: Storage, keyboard input and browser helpers
//! - `persistence`: Versioned save/load of the breakout snapshot
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{BreakoutTuning, PongTuning};

/// Game configuration constants
pub mod consts {
    /// Display refresh rate the per-frame motion is tuned for
    pub const FRAME_RATE: u32 = 60;

    /// Breakout defaults
    pub mod breakout {
        pub const FIELD_WIDTH: f32 = 640.0;
        pub const FIELD_HEIGHT: f32 = 480.0;

        pub const PADDLE_WIDTH: f32 = 100.0;
        pub const PADDLE_HEIGHT: f32 = 10.0;
        /// Gap between the paddle and the bottom edge
        pub const PADDLE_BOTTOM_GAP: f32 = 10.0;
        pub const PADDLE_SPEED: f32 = 20.0;

        pub const BALL_RADIUS: f32 = 10.0;
        pub const INITIAL_BALL_SPEED: f32 = 4.0;
        /// Added to both velocity components on every paddle bounce
        pub const SPEED_INCREASE: f32 = 0.5;
        /// Added to the base ball speed on every level transition
        pub const LEVEL_SPEED_INCREASE: f32 = 1.0;

        pub const BLOCK_ROWS: usize = 5;
        pub const BLOCK_COLUMNS: usize = 7;
        pub const BLOCK_WIDTH: f32 = 75.0;
        pub const BLOCK_HEIGHT: f32 = 20.0;
        pub const BLOCK_PADDING: f32 = 10.0;
        pub const BLOCK_OFFSET_TOP: f32 = 30.0;
        pub const BLOCK_OFFSET_LEFT: f32 = 35.0;

        /// Power-up lifetime (5 seconds of frames)
        pub const POWER_UP_DURATION_TICKS: u64 = 5 * super::FRAME_RATE as u64;
        pub const DOUBLE_POWER_MULTIPLIER: f32 = 2.0;
        pub const SPEED_MULTIPLIER: f32 = 1.5;
    }

    /// Pong-with-blocks defaults
    pub mod pong {
        pub const FIELD_WIDTH: f32 = 800.0;
        pub const FIELD_HEIGHT: f32 = 400.0;

        pub const PADDLE_WIDTH: f32 = 10.0;
        pub const PADDLE_HEIGHT: f32 = 80.0;
        /// Gap between each paddle and its side edge
        pub const PADDLE_SIDE_GAP: f32 = 10.0;
        pub const PLAYER_PADDLE_SPEED: f32 = 6.0;
        pub const AI_PADDLE_SPEED: f32 = 4.0;

        pub const BALL_RADIUS: f32 = 8.0;
        pub const INITIAL_BALL_SPEED: f32 = 4.0;
        pub const SPEED_INCREASE: f32 = 0.5;
        pub const LEVEL_SPEED_INCREASE: f32 = 1.0;

        pub const BLOCK_COUNT: usize = 10;
        pub const BLOCK_WIDTH: f32 = 30.0;
        pub const BLOCK_HEIGHT: f32 = 30.0;
        /// Size of the centred region blocks are scattered in
        pub const BLOCK_REGION_WIDTH: f32 = 300.0;
        pub const BLOCK_REGION_HEIGHT: f32 = 200.0;
    }
}

/// Sign of a value with zero mapping to zero (unlike `f32::signum`)
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
