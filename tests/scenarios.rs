//! End-to-end gameplay scenarios driven through the public API

use block_arcade::audio::SoundEffect;
use block_arcade::persistence::{self, LoadOutcome, SAVE_KEY};
use block_arcade::platform::{Controls, Key, MemoryStorage, Storage};
use block_arcade::renderer::{ShrinkEffects, breakout_scene};
use block_arcade::sim::{
    Arcade, BallColor, BlockStatus, BreakoutState, GameEvent, PongState, PowerUp, TickInput,
    Variant,
};
use glam::Vec2;

/// Breakout world with the grid lifted out of the ball's reach
fn open_breakout(seed: u64) -> BreakoutState {
    let mut state = BreakoutState::new(seed);
    for block in &mut state.blocks {
        block.pos.y = -100.0;
    }
    state
}

fn open_pong(seed: u64) -> PongState {
    let mut state = PongState::new(seed);
    for block in &mut state.blocks {
        block.pos = Vec2::new(100.0, 0.0);
    }
    state
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[test]
fn pong_ball_moves_freely_from_center() {
    let mut state = open_pong(1);
    state.ball.vel = Vec2::new(2.0, -2.0);
    state.tick(&TickInput::default());

    assert_eq!(state.ball.pos, Vec2::new(402.0, 198.0));
    assert_eq!(state.ball.vel, Vec2::new(2.0, -2.0));
    assert!(state.events.is_empty());
}

#[test]
fn breakout_ball_lost_off_bottom_recenters() {
    let mut state = open_breakout(2);
    state.score = 9;
    state.ball.pos = Vec2::new(600.0, 475.0);
    state.ball.vel = Vec2::new(4.0, 4.0);
    state.tick(&TickInput::default());

    assert_eq!(state.ball.pos, Vec2::new(320.0, 240.0));
    assert_eq!(state.ball.vel, Vec2::new(4.0, 4.0));
    assert_eq!(state.score, 9);
}

#[test]
fn fresh_batches_are_active_with_hex_colors() {
    let breakout = BreakoutState::new(3);
    let pong = PongState::new(3);

    for block in breakout.blocks.iter().chain(pong.blocks.iter()) {
        assert_eq!(block.status, BlockStatus::Active);
        assert!(is_hex_color(&block.color.to_string()), "{}", block.color);
    }
    assert!(pong.blocks.iter().all(|b| b.power.is_none()));
}

#[test]
fn double_power_doubles_then_reverts() {
    let mut state = open_breakout(4);
    state.ball.vel = Vec2::new(4.0, -4.0);
    state.activate_power_up(PowerUp::DoublePower);
    assert_eq!(state.ball.vel, Vec2::new(8.0, -8.0));

    let duration = state.tuning.power_up_duration_ticks;
    for tick in 1..=duration {
        state.ball.pos = Vec2::new(320.0, 240.0);
        state.tick(&TickInput::default());
        if tick < duration {
            assert_eq!(state.ball.vel, Vec2::new(8.0, -8.0), "tick {tick}");
        }
    }
    assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));
    assert!(
        state
            .events
            .contains(&GameEvent::PowerUpExpired(PowerUp::DoublePower))
    );
}

#[test]
fn paused_game_freezes_and_shows_overlay() {
    let mut controls = Controls::new(Variant::Breakout, 20.0);
    let mut state = open_breakout(5);

    controls.key_down(Key::Pause);
    state.tick(&controls.take_input());
    assert!(state.is_paused());

    let ball = state.ball.clone();
    controls.key_down(Key::Right);
    for _ in 0..5 {
        state.tick(&controls.take_input());
    }
    assert_eq!(state.ball, ball);
    let scene = breakout_scene(&state, &ShrinkEffects::default());
    assert!(scene.texts().any(|t| t == "Paused"));

    controls.key_down(Key::Pause);
    state.tick(&controls.take_input());
    assert!(!state.is_paused());
    assert_eq!(state.paddle.pos.x, 290.0);
}

#[test]
fn save_and_load_round_trip() {
    let mut storage = MemoryStorage::new();
    let mut game = BreakoutState::new(6);
    for _ in 0..120 {
        let offset = game.ball.pos.x - game.paddle.center().x;
        game.tick(&TickInput::with_paddle_velocity(offset.clamp(-20.0, 20.0)));
    }
    persistence::save(&mut storage, &game).unwrap();

    let mut other = BreakoutState::new(99);
    assert_eq!(
        persistence::load(&storage, &mut other).unwrap(),
        LoadOutcome::Loaded
    );
    assert_eq!(other.score, game.score);
    assert_eq!(other.level, game.level);
    assert_eq!(other.blocks, game.blocks);
    assert_eq!(other.paddle, game.paddle);
    assert_eq!(other.ball, game.ball);
    // Only a flame timer can survive a load
    assert!(
        other
            .effects
            .active()
            .iter()
            .all(|e| e.kind == PowerUp::Flame)
    );
}

#[test]
fn flame_saved_mid_effect_wears_off_after_load() {
    let mut storage = MemoryStorage::new();
    let mut game = open_breakout(10);
    game.activate_power_up(PowerUp::Flame);
    persistence::save(&mut storage, &game).unwrap();

    let mut loaded = BreakoutState::new(11);
    persistence::load(&storage, &mut loaded).unwrap();
    for block in &mut loaded.blocks {
        block.pos.y = -100.0;
    }
    for _ in 0..loaded.tuning.power_up_duration_ticks {
        loaded.ball.pos = Vec2::new(320.0, 240.0);
        loaded.tick(&TickInput::default());
    }
    assert_eq!(loaded.ball.color, BallColor::Normal);
    assert!(loaded.effects.is_empty());
}

#[test]
fn tampered_save_is_rejected() {
    let mut storage = MemoryStorage::new();
    persistence::save(&mut storage, &BreakoutState::new(7)).unwrap();

    let json = storage.get_item(SAVE_KEY).unwrap().unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["level"] = serde_json::json!(0);
    storage.set_item(SAVE_KEY, &value.to_string()).unwrap();

    let mut state = BreakoutState::new(8);
    state.score = 4;
    assert!(persistence::load(&storage, &mut state).is_err());
    assert_eq!(state.score, 4);
    assert_eq!(state.level, 1);
}

#[test]
fn cleared_levels_regenerate_full_batches() {
    for variant in [Variant::Breakout, Variant::Pong] {
        let mut game = Arcade::new(variant, 9);
        let expected = match &mut game {
            Arcade::Breakout(state) => {
                state.blocks.iter_mut().for_each(|b| b.status = BlockStatus::Destroyed);
                state.tuning.block_count()
            }
            Arcade::Pong(state) => {
                state.blocks.iter_mut().for_each(|b| b.status = BlockStatus::Destroyed);
                state.tuning.block_count
            }
        };
        game.tick(&TickInput::default());

        assert_eq!(game.level(), 2, "{variant:?}");
        let sounds: Vec<_> = SoundEffect::for_events(game.events()).collect();
        assert!(sounds.contains(&SoundEffect::LevelUp));
        let blocks = match &game {
            Arcade::Breakout(state) => &state.blocks,
            Arcade::Pong(state) => &state.blocks,
        };
        assert_eq!(blocks.len(), expected);
        assert!(blocks.iter().all(|b| b.is_active()));
    }
}
