//! Versioned breakout snapshot schema
//!
//! Field names and record shapes follow the unversioned browser save format
//! (`playerScore`, `level`, column-major `blocks`, `playerPaddle`, `ball`);
//! `version` was added later and defaults to 1 when absent.

use anyhow::{Context, Result, bail, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Ball, BallColor, Block, BlockStatus, BreakoutState, GamePhase, PowerUp, Rgb};
use crate::tuning::BreakoutTuning;

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Tolerance when comparing saved dimensions with the tuning
const SIZE_EPSILON: f32 = 1e-3;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub status: BlockStatus,
    pub color: Rgb,
    #[serde(default)]
    pub power: Option<PowerUp>,
}

impl From<&Block> for BlockRecord {
    fn from(block: &Block) -> Self {
        Self {
            x: block.pos.x,
            y: block.pos.y,
            width: block.size.x,
            height: block.size.y,
            status: block.status,
            color: block.color,
            power: block.power,
        }
    }
}

impl From<&BlockRecord> for Block {
    fn from(record: &BlockRecord) -> Self {
        Self {
            pos: Vec2::new(record.x, record.y),
            size: Vec2::new(record.width, record.height),
            status: record.status,
            color: record.color,
            power: record.power,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleRecord {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub dx: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallRecord {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub dx: f32,
    pub dy: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Whole-game breakout snapshot, written and read as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub player_score: u64,
    pub level: u32,
    /// `blocks[column][row]`
    pub blocks: Vec<Vec<BlockRecord>>,
    pub player_paddle: PaddleRecord,
    pub ball: BallRecord,
}

impl Snapshot {
    /// Capture the persisted part of a breakout world
    pub fn capture(state: &BreakoutState) -> Self {
        let rows = state.tuning.block_rows.max(1);
        Self {
            version: SNAPSHOT_VERSION,
            player_score: state.score,
            level: state.level,
            blocks: state
                .blocks
                .chunks(rows)
                .map(|column| column.iter().map(BlockRecord::from).collect())
                .collect(),
            player_paddle: PaddleRecord {
                x: state.paddle.pos.x,
                y: state.paddle.pos.y,
                width: state.paddle.size.x,
                height: state.paddle.size.y,
                dx: state.paddle.vel,
            },
            ball: BallRecord {
                x: state.ball.pos.x,
                y: state.ball.pos.y,
                radius: state.ball.radius,
                dx: state.ball.vel.x,
                dy: state.ball.vel.y,
                color: Some(state.ball.color.as_css().to_string()),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("serializing snapshot")
    }

    /// Parse and check the schema version; ranges are checked by `validate`
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json).context("parsing snapshot")?;
        if snapshot.version != SNAPSHOT_VERSION {
            bail!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version,
                SNAPSHOT_VERSION
            );
        }
        Ok(snapshot)
    }

    /// Check shape and ranges against the tuning the game runs with
    pub fn validate(&self, tuning: &BreakoutTuning) -> Result<()> {
        ensure!(self.level >= 1, "level must be at least 1");

        ensure!(
            self.blocks.len() == tuning.block_columns,
            "expected {} block columns, found {}",
            tuning.block_columns,
            self.blocks.len()
        );
        for (c, column) in self.blocks.iter().enumerate() {
            ensure!(
                column.len() == tuning.block_rows,
                "column {c}: expected {} rows, found {}",
                tuning.block_rows,
                column.len()
            );
            for (r, block) in column.iter().enumerate() {
                validate_block(block).with_context(|| format!("block [{c}][{r}]"))?;
            }
        }

        let paddle = &self.player_paddle;
        ensure!(
            [paddle.x, paddle.y, paddle.width, paddle.height, paddle.dx]
                .iter()
                .all(|v| v.is_finite()),
            "paddle has non-finite values"
        );
        ensure!(
            (paddle.width - tuning.paddle_width).abs() < SIZE_EPSILON
                && (paddle.height - tuning.paddle_height).abs() < SIZE_EPSILON,
            "paddle size {}x{} does not match {}x{}",
            paddle.width,
            paddle.height,
            tuning.paddle_width,
            tuning.paddle_height
        );
        ensure!(
            paddle.x >= 0.0
                && paddle.x <= tuning.field_width - paddle.width
                && paddle.y >= 0.0
                && paddle.y <= tuning.field_height - paddle.height,
            "paddle at ({}, {}) is outside the field",
            paddle.x,
            paddle.y
        );

        let ball = &self.ball;
        ensure!(
            [ball.x, ball.y, ball.radius, ball.dx, ball.dy]
                .iter()
                .all(|v| v.is_finite()),
            "ball has non-finite values"
        );
        ensure!(ball.radius > 0.0, "ball radius must be positive");
        if let Some(color) = &ball.color {
            ensure!(
                BallColor::from_css(color).is_some(),
                "unknown ball color {color:?}"
            );
        }
        Ok(())
    }

    /// Validate, then replace the world's persisted state wholesale.
    /// On error the world is left untouched.
    pub fn restore(&self, state: &mut BreakoutState) -> Result<()> {
        self.validate(&state.tuning)?;

        state.score = self.player_score;
        state.level = self.level;
        state.base_ball_speed = BreakoutState::base_speed_for_level(&state.tuning, self.level);
        state.blocks = self.blocks.iter().flatten().map(Block::from).collect();
        state.paddle.pos = Vec2::new(self.player_paddle.x, self.player_paddle.y);
        state.paddle.vel = self.player_paddle.dx;
        state.ball = Ball {
            pos: Vec2::new(self.ball.x, self.ball.y),
            vel: Vec2::new(self.ball.dx, self.ball.dy),
            radius: self.ball.radius,
            color: self
                .ball
                .color
                .as_deref()
                .and_then(BallColor::from_css)
                .unwrap_or_default(),
        };
        state.effects.clear();
        // Timers are not saved; a flaming ball gets a fresh full duration
        if state.ball.color == BallColor::Flame {
            state.effects.activate(
                PowerUp::Flame,
                state.time_ticks,
                &state.tuning,
                &mut state.ball,
            );
        }
        state.events.clear();
        state.phase = GamePhase::Running;
        Ok(())
    }
}

fn validate_block(block: &BlockRecord) -> Result<()> {
    ensure!(
        [block.x, block.y, block.width, block.height]
            .iter()
            .all(|v| v.is_finite()),
        "non-finite geometry"
    );
    match block.status {
        BlockStatus::Active => ensure!(
            block.width > 0.0 && block.height > 0.0,
            "active block must have a positive size"
        ),
        BlockStatus::Destroyed => ensure!(
            block.width >= 0.0 && block.height >= 0.0,
            "negative block size"
        ),
    }
    Ok(())
}
