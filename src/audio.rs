//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, triggered from game events.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball bounces off a wall or paddle
    Collision,
    /// Block destroyed or point scored
    Score,
    /// Power-up activated
    PowerUp,
    /// Level cleared
    LevelUp,
}

impl SoundEffect {
    /// Sound triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallBounce | GameEvent::PaddleBounce { .. } => Some(SoundEffect::Collision),
            GameEvent::BlockDestroyed { .. } | GameEvent::PointScored { .. } => {
                Some(SoundEffect::Score)
            }
            GameEvent::PowerUpActivated(_) => Some(SoundEffect::PowerUp),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::PowerUpExpired(_) | GameEvent::BallReset => None,
        }
    }

    /// Sounds for one tick's events, in event order
    pub fn for_events(events: &[GameEvent]) -> impl Iterator<Item = SoundEffect> + '_ {
        events.iter().filter_map(Self::for_event)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::Settings;

    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Collision => self.play_collision(ctx, vol),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::PowerUp => self.play_power_up(ctx, vol),
                SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short descending thump
        fn play_collision(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Bright two-note blip
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [660.0, 990.0].iter().enumerate() {
                let delay = i as f64 * 0.05;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.15, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.12).ok();
                }
            }
        }

        /// Sawtooth sweep up with a sine octave on top
        fn play_power_up(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            if let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.12, t).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(0.0, t + 0.3)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(1200.0, t + 0.25)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }
            if let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(2400.0, t + 0.25)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }

        /// Major arpeggio ending on a held note
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            let notes = [(523.25, 0.12), (659.25, 0.12), (783.99, 0.12), (1046.5, 0.45)];
            let mut start = ctx.current_time();
            for (freq, length) in notes {
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) {
                    gain.gain().set_value_at_time(vol * 0.1, start).ok();
                    gain.gain()
                        .linear_ramp_to_value_at_time(0.0, start + length)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + length).ok();
                }
                start += length * 0.9;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PowerUp, Side};

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PaddleBounce { side: Side::Ai }),
            Some(SoundEffect::Collision)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PointScored { side: Side::Player }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpActivated(PowerUp::Speed)),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::BallReset), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpExpired(PowerUp::Flame)),
            None
        );
    }

    #[test]
    fn test_events_keep_order() {
        let events = [
            GameEvent::WallBounce,
            GameEvent::BallReset,
            GameEvent::LevelUp { level: 2 },
        ];
        let sounds: Vec<_> = SoundEffect::for_events(&events).collect();
        assert_eq!(sounds, [SoundEffect::Collision, SoundEffect::LevelUp]);
    }
}
