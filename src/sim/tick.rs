//! Per-frame input and helpers shared by both variants' update steps

use super::state::Block;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Player paddle velocity along its axis; `None` keeps the current value
    pub paddle_velocity: Option<f32>,
    /// Pause toggle (breakout only)
    pub toggle_pause: bool,
}

impl TickInput {
    pub fn with_paddle_velocity(vel: f32) -> Self {
        Self {
            paddle_velocity: Some(vel),
            ..Default::default()
        }
    }

    pub fn pause() -> Self {
        Self {
            toggle_pause: true,
            ..Default::default()
        }
    }
}

/// A level is complete when no block in the batch is still active
pub fn level_cleared(blocks: &[Block]) -> bool {
    blocks.iter().all(|b| !b.is_active())
}
