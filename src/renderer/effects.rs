//! Cosmetic shrink of destroyed blocks
//!
//! Driven by `BlockDestroyed` events and advanced once per rendered frame.
//! The simulation never reads this state.

use crate::sim::{Block, GameEvent};

/// Shrink duration: 500 ms at 60 fps
pub const SHRINK_FRAMES: u32 = 30;

/// easeInOutQuad over `t` in [0, 1]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shrink {
    block: Block,
    frame: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ShrinkEffects {
    active: Vec<Shrink>,
    reduced_motion: bool,
}

impl ShrinkEffects {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            active: Vec::new(),
            reduced_motion,
        }
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Start a shrink for every block destroyed this tick
    pub fn observe(&mut self, events: &[GameEvent]) {
        if self.reduced_motion {
            return;
        }
        for event in events {
            if let GameEvent::BlockDestroyed { block, .. } = event {
                self.active.push(Shrink {
                    block: *block,
                    frame: 0,
                });
            }
        }
    }

    /// Advance one frame, dropping finished shrinks
    pub fn step(&mut self) {
        for shrink in &mut self.active {
            shrink.frame += 1;
        }
        self.active.retain(|s| s.frame < SHRINK_FRAMES);
    }

    /// Blocks still shrinking with their remaining size scale
    pub fn iter(&self) -> impl Iterator<Item = (&Block, f32)> {
        self.active.iter().map(|s| {
            let t = s.frame as f32 / SHRINK_FRAMES as f32;
            (&s.block, 1.0 - ease_in_out_quad(t))
        })
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BlockStatus, Rgb};
    use glam::Vec2;

    fn destroyed() -> GameEvent {
        GameEvent::BlockDestroyed {
            index: 0,
            block: Block {
                pos: Vec2::new(35.0, 30.0),
                size: Vec2::new(75.0, 20.0),
                status: BlockStatus::Destroyed,
                color: Rgb([1, 2, 3]),
                power: None,
            },
        }
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!(ease_in_out_quad(0.25) < 0.25);
        assert!(ease_in_out_quad(0.75) > 0.75);
    }

    #[test]
    fn test_shrink_runs_thirty_frames() {
        let mut effects = ShrinkEffects::new(false);
        effects.observe(&[destroyed(), GameEvent::WallBounce]);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.iter().next().map(|(_, s)| s), Some(1.0));

        for _ in 0..SHRINK_FRAMES - 1 {
            effects.step();
        }
        let (_, scale) = effects.iter().next().unwrap();
        assert!(scale > 0.0 && scale < 0.01);
        effects.step();
        assert!(effects.is_empty());
    }

    #[test]
    fn test_reduced_motion_skips() {
        let mut effects = ShrinkEffects::new(true);
        effects.observe(&[destroyed()]);
        assert!(effects.is_empty());
    }
}
