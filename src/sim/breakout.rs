//! Breakout world and update step

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::blocks::breakout_grid;
use super::collision::{Edge, Face, paddle_bounce, paddle_hit, past_edge, reflect_off_wall};
use super::powerup::PowerUpEffects;
use super::state::{Axis, Ball, Block, BlockStatus, GameEvent, GamePhase, Paddle, PowerUp, Side};
use super::tick::{TickInput, level_cleared};
use crate::tuning::BreakoutTuning;

/// Complete breakout world
#[derive(Debug, Clone)]
pub struct BreakoutState {
    pub tuning: BreakoutTuning,
    pub phase: GamePhase,
    pub score: u64,
    /// 1-based
    pub level: u32,
    /// Ball speed a reset rebases to; grows every level
    pub base_ball_speed: f32,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Column-major grid
    pub blocks: Vec<Block>,
    pub effects: PowerUpEffects,
    /// Frames simulated while running
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl BreakoutState {
    /// New game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(BreakoutTuning::default(), seed)
    }

    pub fn with_tuning(tuning: BreakoutTuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let blocks = breakout_grid(&tuning, &mut rng);
        let field = tuning.field();
        let paddle = Paddle::new(
            Vec2::new(
                field.x / 2.0 - tuning.paddle_width / 2.0,
                field.y - tuning.paddle_height - tuning.paddle_bottom_gap,
            ),
            Vec2::new(tuning.paddle_width, tuning.paddle_height),
            Axis::Horizontal,
        );
        let ball = Ball::new(
            field / 2.0,
            Vec2::new(tuning.initial_ball_speed, -tuning.initial_ball_speed),
            tuning.ball_radius,
        );
        log::info!("Breakout started with seed {}", seed);
        Self {
            base_ball_speed: tuning.initial_ball_speed,
            tuning,
            phase: GamePhase::Running,
            score: 0,
            level: 1,
            paddle,
            ball,
            blocks,
            effects: PowerUpEffects::new(),
            time_ticks: 0,
            events: Vec::new(),
            rng,
        }
    }

    pub fn field(&self) -> Vec2 {
        self.tuning.field()
    }

    /// Base ball speed reached at `level` (levels are 1-based)
    pub fn base_speed_for_level(tuning: &BreakoutTuning, level: u32) -> f32 {
        tuning.initial_ball_speed + level.saturating_sub(1) as f32 * tuning.level_speed_increase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Advance by one frame
    pub fn tick(&mut self, input: &TickInput) {
        self.events.clear();

        if input.toggle_pause {
            self.phase = self.phase.toggled();
            log::info!("Breakout {:?}", self.phase);
        }
        if let Some(vel) = input.paddle_velocity {
            self.paddle.vel = vel;
        }
        if self.phase == GamePhase::Paused {
            return;
        }

        self.time_ticks += 1;
        for kind in self.effects.expire(self.time_ticks, &mut self.ball) {
            self.events.push(GameEvent::PowerUpExpired(kind));
        }

        let field = self.field();
        self.paddle.step(field);
        self.ball.step();

        // Bottom is not a wall: it resets the ball below
        for edge in [Edge::Left, Edge::Right, Edge::Top] {
            if reflect_off_wall(&mut self.ball, field, edge) {
                self.events.push(GameEvent::WallBounce);
            }
        }

        if paddle_hit(&self.ball, &self.paddle, Face::Top) {
            self.ball.vel = paddle_bounce(self.ball.vel, Face::Top, self.tuning.speed_increase);
            self.events.push(GameEvent::PaddleBounce { side: Side::Player });
        }

        self.resolve_blocks();

        if past_edge(&self.ball, field, Edge::Bottom) {
            self.reset_ball();
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
            self.ball.vel.y = -self.ball.vel.y;
            block.status = BlockStatus::Destroyed;
            self.score += 1;
            self.events.push(GameEvent::BlockDestroyed {
                index,
                block: *block,
            });

            if let Some(kind) = block.power {
                self.effects
                    .activate(kind, self.time_ticks, &self.tuning, &mut self.ball);
                self.events.push(GameEvent::PowerUpActivated(kind));
            }
        }
    }

    /// Apply a power-up to the ball immediately, as a destroyed block would
    pub fn activate_power_up(&mut self, kind: PowerUp) {
        self.effects
            .activate(kind, self.time_ticks, &self.tuning, &mut self.ball);
        self.events.push(GameEvent::PowerUpActivated(kind));
    }

    /// Recenter the ball at the level's base speed
    pub fn reset_ball(&mut self) {
        self.effects.cancel_velocity_effects();
        self.ball.reset(self.field() / 2.0, self.base_ball_speed);
        self.events.push(GameEvent::BallReset);
        log::debug!("Ball reset at speed {}", self.base_ball_speed);
    }

    /// Advance to the next level with a fresh batch and a faster ball
    pub fn next_level(&mut self) {
        self.level += 1;
        self.base_ball_speed += self.tuning.level_speed_increase;
        self.blocks = breakout_grid(&self.tuning, &mut self.rng);
        self.reset_ball();
        self.events.push(GameEvent::LevelUp { level: self.level });
        log::info!(
            "Level {} (ball speed {})",
            self.level,
            self.base_ball_speed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// World with every block moved out of the ball's way
    fn open_field(seed: u64) -> BreakoutState {
        let mut state = BreakoutState::new(seed);
        for block in &mut state.blocks {
            block.pos.y = -100.0;
        }
        state
    }

    #[test]
    fn test_new_game() {
        let state = BreakoutState::new(12345);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.blocks.len(), 35);
        assert_eq!(state.paddle.pos, Vec2::new(270.0, 460.0));
        assert_eq!(state.ball.pos, Vec2::new(320.0, 240.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_tick_moves_ball_and_paddle() {
        let mut state = open_field(1);
        state.tick(&TickInput::with_paddle_velocity(20.0));
        assert_eq!(state.ball.pos, Vec2::new(324.0, 236.0));
        assert_eq!(state.paddle.pos.x, 290.0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = open_field(2);
        state.tick(&TickInput::pause());
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.ball.clone();

        for _ in 0..10 {
            state.tick(&TickInput::with_paddle_velocity(20.0));
        }
        assert_eq!(state.ball, frozen);
        assert_eq!(state.time_ticks, 0);

        state.tick(&TickInput::pause());
        assert_eq!(state.phase, GamePhase::Running);
        assert_ne!(state.ball, frozen);
    }

    #[test]
    fn test_paddle_bounce_speeds_up() {
        let mut state = open_field(3);
        state.ball.pos = Vec2::new(320.0, 447.0);
        state.ball.vel = Vec2::new(4.0, 4.0);
        state.tick(&TickInput::default());

        assert_eq!(state.ball.vel, Vec2::new(4.5, -4.5));
        assert!(state
            .events
            .contains(&GameEvent::PaddleBounce { side: Side::Player }));
    }

    #[test]
    fn test_block_destroyed_once() {
        let mut state = BreakoutState::new(4);
        for block in &mut state.blocks {
            block.power = None;
        }
        // Column 0, row 4 spans (35..110, 150..170); approach from below
        state.ball.pos = Vec2::new(60.0, 164.0);
        state.ball.vel = Vec2::new(0.5, -4.0);
        state.tick(&TickInput::default());

        assert_eq!(state.blocks[4].status, BlockStatus::Destroyed);
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel.y, 4.0);

        // Still inside the destroyed block's rectangle: no second hit
        state.ball.vel = Vec2::new(0.0, 1.0);
        state.tick(&TickInput::default());
        assert_eq!(state.score, 1);
        assert_eq!(state.ball.vel.y, 1.0);
    }

    #[test]
    fn test_block_power_up_scales_flipped_velocity() {
        let mut state = BreakoutState::new(10);
        for block in &mut state.blocks {
            block.power = None;
        }
        state.blocks[4].power = Some(PowerUp::DoublePower);
        state.ball.pos = Vec2::new(60.0, 164.0);
        state.ball.vel = Vec2::new(0.5, -4.0);
        state.tick(&TickInput::default());

        // Flip first, then double
        assert_eq!(state.blocks[4].status, BlockStatus::Destroyed);
        assert_eq!(state.ball.vel, Vec2::new(1.0, 8.0));
        assert!(
            state
                .events
                .contains(&GameEvent::PowerUpActivated(PowerUp::DoublePower))
        );

        for block in &mut state.blocks {
            block.pos.y = -100.0;
        }
        for _ in 0..state.tuning.power_up_duration_ticks {
            state.ball.pos = Vec2::new(320.0, 240.0);
            state.tick(&TickInput::default());
        }
        assert_eq!(state.ball.vel, Vec2::new(0.5, 4.0));
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_bottom_resets_ball() {
        let mut state = open_field(5);
        state.ball.pos = Vec2::new(20.0, 468.0);
        state.ball.vel = Vec2::new(-5.0, 5.0);
        state.tick(&TickInput::default());

        assert_eq!(state.ball.pos, Vec2::new(320.0, 240.0));
        assert_eq!(state.ball.vel, Vec2::new(-4.0, 4.0));
        assert_eq!(state.score, 0);
        assert!(state.events.contains(&GameEvent::BallReset));
    }

    #[test]
    fn test_level_completion() {
        let mut state = open_field(6);
        for block in &mut state.blocks {
            block.status = BlockStatus::Destroyed;
        }
        state.tick(&TickInput::default());

        assert_eq!(state.level, 2);
        assert_eq!(state.base_ball_speed, 5.0);
        assert_eq!(state.blocks.len(), 35);
        assert!(state.blocks.iter().all(Block::is_active));
        assert_eq!(state.ball.pos, Vec2::new(320.0, 240.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, -5.0));
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_power_up_reverts_after_duration() {
        let mut state = open_field(7);
        state.ball.vel = Vec2::new(4.0, -4.0);
        state.activate_power_up(PowerUp::DoublePower);
        assert_eq!(state.ball.vel, Vec2::new(8.0, -8.0));

        // Park the ball so nothing else touches its velocity
        for _ in 0..state.tuning.power_up_duration_ticks {
            state.ball.pos = Vec2::new(320.0, 240.0);
            state.tick(&TickInput::default());
        }
        assert_eq!(state.ball.vel.x.abs(), 4.0);
        assert_eq!(state.ball.vel.y.abs(), 4.0);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_reset_cancels_velocity_power_up() {
        let mut state = open_field(8);
        state.activate_power_up(PowerUp::Speed);
        state.reset_ball();
        assert!(state.effects.is_empty());
        assert_eq!(state.ball.vel.x.abs(), 4.0);
    }

    #[test]
    fn test_advance_matches_tick() {
        let a = BreakoutState::new(9);
        let mut b = a.clone();
        let input = TickInput::with_paddle_velocity(-20.0);
        let a = a.advance(&input);
        b.tick(&input);
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.paddle, b.paddle);
        assert_eq!(a.blocks, b.blocks);
    }
}
