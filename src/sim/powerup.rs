//! Timed power-up effects
//!
//! Each activation is recorded with the frame it expires on and reverted from
//! inside the tick, so effects pause with the game and can be cancelled.

use super::state::{Ball, BallColor, PowerUp};
use crate::tuning::BreakoutTuning;

/// One pending power-up reversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    pub kind: PowerUp,
    /// Velocity scale applied on activation (1.0 for flame)
    pub multiplier: f32,
    /// Frame number on which the effect is reverted
    pub expires_at: u64,
}

/// Active power-up effects. Activations stack: two `speed` pickups scale the
/// ball by 1.5 twice and each reverts on its own schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerUpEffects {
    active: Vec<ActiveEffect>,
}

impl PowerUpEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[ActiveEffect] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Apply `kind` to the ball now and schedule its reversion
    pub fn activate(&mut self, kind: PowerUp, now: u64, tuning: &BreakoutTuning, ball: &mut Ball) {
        let multiplier = match kind {
            PowerUp::Flame => {
                ball.color = BallColor::Flame;
                1.0
            }
            PowerUp::DoublePower => tuning.double_power_multiplier,
            PowerUp::Speed => tuning.speed_multiplier,
        };
        ball.vel *= multiplier;
        self.active.push(ActiveEffect {
            kind,
            multiplier,
            expires_at: now + tuning.power_up_duration_ticks,
        });
        log::debug!("Power-up {:?} active until frame {}", kind, now + tuning.power_up_duration_ticks);
    }

    /// Revert every effect due at `now`, returning the kinds that expired
    pub fn expire(&mut self, now: u64, ball: &mut Ball) -> Vec<PowerUp> {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.active.drain(..).partition(|e| e.expires_at <= now);
        self.active = pending;

        for effect in &due {
            ball.vel /= effect.multiplier;
            log::debug!("Power-up {:?} expired", effect.kind);
        }
        if due.iter().any(|e| e.kind == PowerUp::Flame)
            && !self.active.iter().any(|e| e.kind == PowerUp::Flame)
        {
            ball.color = BallColor::Normal;
        }
        due.into_iter().map(|e| e.kind).collect()
    }

    /// Drop pending velocity reversions (the ball speed was rebased)
    pub fn cancel_velocity_effects(&mut self) {
        self.active.retain(|e| e.kind == PowerUp::Flame);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
