//! Block Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::Result;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    use block_arcade::{BreakoutTuning, PongTuning, Settings};
    use block_arcade::audio::{AudioManager, SoundEffect};
    use block_arcade::persistence;
    use block_arcade::platform::{Controls, Key, LocalStorage, browser};
    use block_arcade::renderer::{CanvasRenderer, ShrinkEffects, scene};
    use block_arcade::sim::{Arcade, BreakoutState, PongState, Variant};

    const CORRUPT_SAVE: &str = "Saved game is corrupt";

    struct Game {
        arcade: Arcade,
        controls: Controls,
        effects: ShrinkEffects,
        renderer: CanvasRenderer,
        audio: AudioManager,
        storage: Option<LocalStorage>,
    }

    impl Game {
        fn new(variant: Variant, settings: &Settings, storage: Option<LocalStorage>) -> Result<Self> {
            let seed = browser::now_ms();
            let arcade = match (variant, storage.as_ref()) {
                (Variant::Breakout, Some(s)) => {
                    Arcade::Breakout(BreakoutState::with_tuning(BreakoutTuning::load(s), seed))
                }
                (Variant::Pong, Some(s)) => {
                    Arcade::Pong(PongState::with_tuning(PongTuning::load(s), seed))
                }
                (_, None) => Arcade::new(variant, seed),
            };
            let paddle_speed = match &arcade {
                Arcade::Breakout(state) => state.tuning.paddle_speed,
                Arcade::Pong(state) => state.tuning.player_paddle_speed,
            };
            log::info!("Starting {} with seed {}", variant.as_str(), seed);
            Ok(Self {
                arcade,
                controls: Controls::new(variant, paddle_speed),
                effects: ShrinkEffects::new(settings.reduced_motion),
                renderer: CanvasRenderer::new()?,
                audio: AudioManager::new(settings),
                storage,
            })
        }

        /// One update step followed by one render step
        fn frame(&mut self) -> Result<()> {
            let input = self.controls.take_input();
            self.arcade.tick(&input);

            let events = self.arcade.events();
            if self.arcade.variant() == Variant::Breakout {
                self.effects.observe(events);
            }
            for sound in SoundEffect::for_events(events) {
                self.audio.play(sound);
            }

            self.renderer.render(&scene(&self.arcade, &self.effects))?;
            self.effects.step();
            Ok(())
        }

        fn save_game(&mut self) {
            let Arcade::Breakout(state) = &self.arcade else {
                return;
            };
            let Some(storage) = self.storage.as_mut() else {
                browser::alert("Storage unavailable");
                return;
            };
            match persistence::save(storage, state) {
                Ok(()) => browser::alert("Game Saved!"),
                Err(err) => {
                    log::error!("Save failed: {:#}", err);
                    browser::alert("Save failed");
                }
            }
        }

        fn load_game(&mut self) {
            let Arcade::Breakout(state) = &mut self.arcade else {
                return;
            };
            let Some(storage) = self.storage.as_ref() else {
                browser::alert("Storage unavailable");
                return;
            };
            match persistence::load(storage, state) {
                Ok(outcome) => {
                    self.effects.clear();
                    browser::alert(outcome.message());
                }
                Err(err) => {
                    log::warn!("Rejected saved game: {:#}", err);
                    browser::alert(CORRUPT_SAVE);
                }
            }
        }
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)?;

        log::info!("Block Arcade starting...");

        let mut storage = match LocalStorage::open() {
            Ok(storage) => Some(storage),
            Err(err) => {
                log::warn!("localStorage unavailable: {:#}", err);
                None
            }
        };

        let mut settings = storage
            .as_ref()
            .map(|s| Settings::load(s))
            .unwrap_or_default();
        let variant = browser::query_param("game")
            .and_then(|name| name.parse::<Variant>().ok())
            .unwrap_or(settings.variant);
        if variant != settings.variant {
            settings.variant = variant;
            if let Some(storage) = storage.as_mut() {
                settings.save(storage);
            }
        }

        let game = Rc::new(RefCell::new(Game::new(variant, &settings, storage)?));

        setup_keyboard(game.clone())?;
        if variant == Variant::Breakout {
            setup_save_buttons(game.clone())?;
        }
        request_animation_frame(game);
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<()> {
        let document = browser::document()?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().controls.key_down(Key::from_dom(&event.key()));
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().controls.key_up(Key::from_dom(&event.key()));
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        Ok(())
    }

    fn setup_save_buttons(game: Rc<RefCell<Game>>) -> Result<()> {
        {
            let game = game.clone();
            browser::on_click(
                "saveGame",
                Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().save_game();
                }),
            )?;
        }
        browser::on_click(
            "loadGame",
            Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().load_game();
            }),
        )
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(f64)>::once(move |_time: f64| {
            game_loop(game);
        });
        if let Err(err) = browser::request_animation_frame(&closure) {
            log::error!("{:#}", err);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        if let Err(err) = game.borrow_mut().frame() {
            log::error!("Frame failed: {:#}", err);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().map_err(|err| JsValue::from_str(&format!("{:#}", err)))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Block Arcade (native) starting...");
    log::info!("The games run in the browser - this runs a headless demo of both");

    demo::run_breakout(demo::FRAMES)?;
    demo::run_pong(demo::FRAMES);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use block_arcade::audio::SoundEffect;
    use block_arcade::consts::FRAME_RATE;
    use block_arcade::persistence::{self, LoadOutcome};
    use block_arcade::platform::MemoryStorage;
    use block_arcade::sim::{BreakoutState, PongState, TickInput};

    /// One minute of play
    pub const FRAMES: u32 = FRAME_RATE * 60;

    pub fn run_breakout(frames: u32) -> anyhow::Result<()> {
        let mut state = BreakoutState::new(42);
        let mut sounds = 0usize;
        let speed = state.tuning.paddle_speed;

        for _ in 0..frames {
            let offset = state.ball.pos.x - state.paddle.center().x;
            state.tick(&TickInput::with_paddle_velocity(offset.clamp(-speed, speed)));
            sounds += SoundEffect::for_events(&state.events).count();
        }
        log::info!(
            "Breakout: level {}, score {}, {} sounds in {} frames",
            state.level,
            state.score,
            sounds,
            frames
        );

        let mut storage = MemoryStorage::new();
        persistence::save(&mut storage, &state)?;
        let mut restored = BreakoutState::new(7);
        anyhow::ensure!(
            persistence::load(&storage, &mut restored)? == LoadOutcome::Loaded,
            "saved game went missing"
        );
        log::info!("Breakout snapshot restored at score {}", restored.score);
        Ok(())
    }

    pub fn run_pong(frames: u32) {
        let mut state = PongState::new(42);
        let speed = state.tuning.player_paddle_speed;

        for _ in 0..frames {
            let offset = state.ball.pos.y - state.player.center().y;
            state.tick(&TickInput::with_paddle_velocity(offset.clamp(-speed, speed)));
        }
        log::info!(
            "Pong: level {}, player {} - ai {} in {} frames",
            state.level,
            state.player_score,
            state.ai_score,
            frames
        );
    }
}
