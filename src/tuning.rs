//! Data-driven game balance
//!
//! Each variant's world is built from a tuning value. The defaults mirror
//! `crate::consts`; a JSON override can replace any subset of fields.
//! Overrides are read from storage when the game starts.

use anyhow::{Context, Result, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{breakout, pong};
use crate::platform::Storage;

/// Read an override from `key`, falling back to the defaults when it is
/// missing or rejected
fn load_override<T: Default>(
    storage: &dyn Storage,
    key: &str,
    parse: fn(&str) -> Result<T>,
) -> T {
    match storage.get_item(key) {
        Ok(Some(json)) => match parse(&json) {
            Ok(tuning) => {
                log::info!("Using tuning override from {}", key);
                return tuning;
            }
            Err(err) => log::warn!("Ignoring tuning override {}: {:#}", key, err),
        },
        Ok(None) => {}
        Err(err) => log::warn!("Cannot read tuning override {}: {:#}", key, err),
    }
    T::default()
}

/// Breakout balance and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutTuning {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_bottom_gap: f32,
    pub paddle_speed: f32,

    pub ball_radius: f32,
    pub initial_ball_speed: f32,
    pub speed_increase: f32,
    pub level_speed_increase: f32,

    pub block_rows: usize,
    pub block_columns: usize,
    pub block_width: f32,
    pub block_height: f32,
    pub block_padding: f32,
    pub block_offset_top: f32,
    pub block_offset_left: f32,

    pub power_up_duration_ticks: u64,
    pub double_power_multiplier: f32,
    pub speed_multiplier: f32,
}

impl Default for BreakoutTuning {
    fn default() -> Self {
        Self {
            field_width: breakout::FIELD_WIDTH,
            field_height: breakout::FIELD_HEIGHT,
            paddle_width: breakout::PADDLE_WIDTH,
            paddle_height: breakout::PADDLE_HEIGHT,
            paddle_bottom_gap: breakout::PADDLE_BOTTOM_GAP,
            paddle_speed: breakout::PADDLE_SPEED,
            ball_radius: breakout::BALL_RADIUS,
            initial_ball_speed: breakout::INITIAL_BALL_SPEED,
            speed_increase: breakout::SPEED_INCREASE,
            level_speed_increase: breakout::LEVEL_SPEED_INCREASE,
            block_rows: breakout::BLOCK_ROWS,
            block_columns: breakout::BLOCK_COLUMNS,
            block_width: breakout::BLOCK_WIDTH,
            block_height: breakout::BLOCK_HEIGHT,
            block_padding: breakout::BLOCK_PADDING,
            block_offset_top: breakout::BLOCK_OFFSET_TOP,
            block_offset_left: breakout::BLOCK_OFFSET_LEFT,
            power_up_duration_ticks: breakout::POWER_UP_DURATION_TICKS,
            double_power_multiplier: breakout::DOUBLE_POWER_MULTIPLIER,
            speed_multiplier: breakout::SPEED_MULTIPLIER,
        }
    }
}

impl BreakoutTuning {
    /// Storage key of the optional override
    pub const STORAGE_KEY: &'static str = "block_arcade_breakout_tuning";

    pub fn load(storage: &dyn Storage) -> Self {
        load_override(storage, Self::STORAGE_KEY, Self::from_json)
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json).context("parsing breakout tuning")?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Number of blocks in one batch
    pub fn block_count(&self) -> usize {
        self.block_rows * self.block_columns
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.field_width > 0.0 && self.field_height > 0.0,
            "field must have a positive size"
        );
        ensure!(
            self.paddle_width > 0.0 && self.paddle_height > 0.0,
            "paddle must have a positive size"
        );
        ensure!(
            self.paddle_width <= self.field_width
                && self.paddle_height + self.paddle_bottom_gap <= self.field_height,
            "paddle does not fit the field"
        );
        ensure!(self.ball_radius > 0.0, "ball radius must be positive");
        ensure!(
            self.initial_ball_speed > 0.0,
            "initial ball speed must be positive"
        );
        ensure!(
            self.block_rows > 0 && self.block_columns > 0,
            "block grid must have at least one row and column"
        );
        ensure!(
            self.block_width > 0.0 && self.block_height > 0.0,
            "blocks must have a positive size"
        );
        let grid_right = self.block_offset_left
            + self.block_columns as f32 * (self.block_width + self.block_padding)
            - self.block_padding;
        let grid_bottom = self.block_offset_top
            + self.block_rows as f32 * (self.block_height + self.block_padding)
            - self.block_padding;
        ensure!(
            grid_right <= self.field_width && grid_bottom <= self.field_height,
            "block grid ({grid_right}x{grid_bottom}) does not fit the field"
        );
        ensure!(
            self.double_power_multiplier > 0.0 && self.speed_multiplier > 0.0,
            "power-up multipliers must be positive"
        );
        Ok(())
    }
}

/// Pong-with-blocks balance and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongTuning {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_side_gap: f32,
    pub player_paddle_speed: f32,
    pub ai_paddle_speed: f32,

    pub ball_radius: f32,
    pub initial_ball_speed: f32,
    pub speed_increase: f32,
    pub level_speed_increase: f32,

    pub block_count: usize,
    pub block_width: f32,
    pub block_height: f32,
    pub block_region_width: f32,
    pub block_region_height: f32,
}

impl Default for PongTuning {
    fn default() -> Self {
        Self {
            field_width: pong::FIELD_WIDTH,
            field_height: pong::FIELD_HEIGHT,
            paddle_width: pong::PADDLE_WIDTH,
            paddle_height: pong::PADDLE_HEIGHT,
            paddle_side_gap: pong::PADDLE_SIDE_GAP,
            player_paddle_speed: pong::PLAYER_PADDLE_SPEED,
            ai_paddle_speed: pong::AI_PADDLE_SPEED,
            ball_radius: pong::BALL_RADIUS,
            initial_ball_speed: pong::INITIAL_BALL_SPEED,
            speed_increase: pong::SPEED_INCREASE,
            level_speed_increase: pong::LEVEL_SPEED_INCREASE,
            block_count: pong::BLOCK_COUNT,
            block_width: pong::BLOCK_WIDTH,
            block_height: pong::BLOCK_HEIGHT,
            block_region_width: pong::BLOCK_REGION_WIDTH,
            block_region_height: pong::BLOCK_REGION_HEIGHT,
        }
    }
}

impl PongTuning {
    pub const STORAGE_KEY: &'static str = "block_arcade_pong_tuning";

    pub fn load(storage: &dyn Storage) -> Self {
        load_override(storage, Self::STORAGE_KEY, Self::from_json)
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json).context("parsing pong tuning")?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.field_width > 0.0 && self.field_height > 0.0,
            "field must have a positive size"
        );
        ensure!(
            self.paddle_width > 0.0 && self.paddle_height > 0.0,
            "paddles must have a positive size"
        );
        ensure!(
            self.paddle_height <= self.field_height
                && 2.0 * (self.paddle_side_gap + self.paddle_width) < self.field_width,
            "paddles do not fit the field"
        );
        ensure!(self.ball_radius > 0.0, "ball radius must be positive");
        ensure!(
            self.initial_ball_speed > 0.0,
            "initial ball speed must be positive"
        );
        ensure!(self.block_count > 0, "at least one block is required");
        ensure!(
            self.block_width > 0.0 && self.block_height > 0.0,
            "blocks must have a positive size"
        );
        ensure!(
            self.block_width <= self.block_region_width
                && self.block_height <= self.block_region_height,
            "blocks do not fit the scatter region"
        );
        ensure!(
            self.block_region_width <= self.field_width
                && self.block_region_height <= self.field_height,
            "scatter region does not fit the field"
        );
        Ok(())
    }
}
