//! Pong-with-blocks world and update step
//!
//! The player defends the left side, a tracking AI the right. Blocks scattered
//! in the middle score for whoever last returned the ball.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::blocks::pong_scatter;
use super::collision::{Edge, Face, paddle_bounce, paddle_hit, past_edge, reflect_off_wall};
use super::state::{Axis, Ball, Block, BlockStatus, GameEvent, Paddle, Side};
use super::tick::{TickInput, level_cleared};
use crate::tuning::PongTuning;

/// Complete pong-hybrid world
#[derive(Debug, Clone)]
pub struct PongState {
    pub tuning: PongTuning,
    pub player_score: u64,
    pub ai_score: u64,
    /// 1-based
    pub level: u32,
    pub base_ball_speed: f32,
    /// Left paddle
    pub player: Paddle,
    /// Right paddle
    pub ai: Paddle,
    pub ball: Ball,
    pub blocks: Vec<Block>,
    /// Side credited for block hits
    pub last_hit: Side,
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl PongState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(PongTuning::default(), seed)
    }

    pub fn with_tuning(tuning: PongTuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let blocks = pong_scatter(&tuning, &mut rng);
        let field = tuning.field();
        let size = Vec2::new(tuning.paddle_width, tuning.paddle_height);
        let y = field.y / 2.0 - tuning.paddle_height / 2.0;
        let player = Paddle::new(Vec2::new(tuning.paddle_side_gap, y), size, Axis::Vertical);
        let ai = Paddle::new(
            Vec2::new(field.x - tuning.paddle_side_gap - tuning.paddle_width, y),
            size,
            Axis::Vertical,
        );
        let ball = Ball::new(
            field / 2.0,
            Vec2::new(tuning.initial_ball_speed, -tuning.initial_ball_speed),
            tuning.ball_radius,
        );
        log::info!("Pong started with seed {}", seed);
        Self {
            base_ball_speed: tuning.initial_ball_speed,
            tuning,
            player_score: 0,
            ai_score: 0,
            level: 1,
            player,
            ai,
            ball,
            blocks,
            last_hit: Side::Player,
            time_ticks: 0,
            events: Vec::new(),
            rng,
        }
    }

    pub fn field(&self) -> Vec2 {
        self.tuning.field()
    }

    pub fn score(&self, side: Side) -> u64 {
        match side {
            Side::Player => self.player_score,
            Side::Ai => self.ai_score,
        }
    }

    /// Advance by one frame. The pause toggle is ignored: this variant has
    /// no pause state.
    pub fn tick(&mut self, input: &TickInput) {
        self.events.clear();
        self.time_ticks += 1;
        let field = self.field();

        if let Some(vel) = input.paddle_velocity {
            self.player.vel = vel;
        }
        self.player.step(field);

        self.ai.vel = ai_velocity(&self.ai, &self.ball, self.tuning.ai_paddle_speed);
        self.ai.step(field);

        self.ball.step();

        for edge in [Edge::Top, Edge::Bottom] {
            if reflect_off_wall(&mut self.ball, field, edge) {
                self.events.push(GameEvent::WallBounce);
            }
        }

        let increment = self.tuning.speed_increase;
        if paddle_hit(&self.ball, &self.player, Face::Right) {
            self.ball.vel = paddle_bounce(self.ball.vel, Face::Right, increment);
            self.last_hit = Side::Player;
            self.events.push(GameEvent::PaddleBounce { side: Side::Player });
        } else if paddle_hit(&self.ball, &self.ai, Face::Left) {
            self.ball.vel = paddle_bounce(self.ball.vel, Face::Left, increment);
            self.last_hit = Side::Ai;
            self.events.push(GameEvent::PaddleBounce { side: Side::Ai });
        }

        self.resolve_blocks();

        if past_edge(&self.ball, field, Edge::Left) {
            self.point_scored(Side::Ai);
        } else if past_edge(&self.ball, field, Edge::Right) {
            self.point_scored(Side::Player);
        }

        if level_cleared(&self.blocks) {
            self.next_level();
        }
    }

    /// Consuming form of [`tick`](Self::tick)
    pub fn advance(mut self, input: &TickInput) -> Self {
        self.tick(input);
        self
    }

    fn resolve_blocks(&mut self) {
        let center = self.ball.pos;
        for (index, block) in self.blocks.iter_mut().enumerate() {
            if !block.is_active() || !block.contains(center) {
                continue;
            }
            // Vertical flip regardless of which side the ball came in from
            self.ball.vel.y = -self.ball.vel.y;
            block.status = BlockStatus::Destroyed;
            match self.last_hit {
                Side::Player => self.player_score += 1,
                Side::Ai => self.ai_score += 1,
            }
            self.events.push(GameEvent::BlockDestroyed {
                index,
                block: *block,
            });
        }
    }

    fn point_scored(&mut self, side: Side) {
        match side {
            Side::Player => self.player_score += 1,
            Side::Ai => self.ai_score += 1,
        }
        self.events.push(GameEvent::PointScored { side });
        log::debug!(
            "{:?} scored ({} - {})",
            side,
            self.player_score,
            self.ai_score
        );
        self.reset_ball();
    }

    /// Recenter the ball at the level's base speed
    pub fn reset_ball(&mut self) {
        self.ball.reset(self.field() / 2.0, self.base_ball_speed);
        self.events.push(GameEvent::BallReset);
    }

    /// Advance to the next level with a fresh scatter and a faster ball
    pub fn next_level(&mut self) {
        self.level += 1;
        self.base_ball_speed += self.tuning.level_speed_increase;
        self.blocks = pong_scatter(&self.tuning, &mut self.rng);
        self.reset_ball();
        self.events.push(GameEvent::LevelUp { level: self.level });
        log::info!("Pong level {} (ball speed {})", self.level, self.base_ball_speed);
    }
}

/// Closed-loop tracker: head for the ball's y at a fixed speed, stop when
/// the paddle's center is level with it. Recomputed every frame.
pub fn ai_velocity(paddle: &Paddle, ball: &Ball, speed: f32) -> f32 {
    let center = paddle.center().y;
    if center < ball.pos.y {
        speed
    } else if center > ball.pos.y {
        -speed
    } else {
        0.0
    }
}
