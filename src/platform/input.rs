//! Keyboard to paddle-velocity mapping

use crate::sim::{TickInput, Variant};

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Pause,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "ArrowUp" | "w" | "W" => Key::Up,
            "ArrowDown" | "s" | "S" => Key::Down,
            " " => Key::Pause,
            _ => Key::Other,
        }
    }
}

/// Held-key state turned into one `TickInput` per frame
#[derive(Debug, Clone)]
pub struct Controls {
    variant: Variant,
    paddle_speed: f32,
    paddle_velocity: f32,
    pause_pending: bool,
}

impl Controls {
    pub fn new(variant: Variant, paddle_speed: f32) -> Self {
        Self {
            variant,
            paddle_speed,
            paddle_velocity: 0.0,
            pause_pending: false,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        match (self.variant, key) {
            (Variant::Breakout, Key::Left) | (Variant::Pong, Key::Up) => {
                self.paddle_velocity = -self.paddle_speed;
            }
            (Variant::Breakout, Key::Right) | (Variant::Pong, Key::Down) => {
                self.paddle_velocity = self.paddle_speed;
            }
            (Variant::Breakout, Key::Pause) => self.pause_pending = !self.pause_pending,
            _ => {}
        }
    }

    /// Releasing either direction key stops the paddle
    pub fn key_up(&mut self, key: Key) {
        match (self.variant, key) {
            (Variant::Breakout, Key::Left | Key::Right) | (Variant::Pong, Key::Up | Key::Down) => {
                self.paddle_velocity = 0.0;
            }
            _ => {}
        }
    }

    /// Input for the next tick; the pause toggle is consumed
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            paddle_velocity: Some(self.paddle_velocity),
            toggle_pause: std::mem::take(&mut self.pause_pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_dom(" "), Key::Pause);
        assert_eq!(Key::from_dom("s"), Key::Down);
        assert_eq!(Key::from_dom("Enter"), Key::Other);
    }

    #[test]
    fn test_breakout_arrows() {
        let mut controls = Controls::new(Variant::Breakout, 20.0);
        controls.key_down(Key::Left);
        assert_eq!(controls.take_input().paddle_velocity, Some(-20.0));
        controls.key_down(Key::Right);
        assert_eq!(controls.take_input().paddle_velocity, Some(20.0));
        // Releasing the other arrow still stops the paddle
        controls.key_up(Key::Left);
        assert_eq!(controls.take_input().paddle_velocity, Some(0.0));
    }

    #[test]
    fn test_pause_is_one_shot() {
        let mut controls = Controls::new(Variant::Breakout, 20.0);
        controls.key_down(Key::Pause);
        assert!(controls.take_input().toggle_pause);
        assert!(!controls.take_input().toggle_pause);
    }

    #[test]
    fn test_pong_ignores_pause_and_arrows_left_right() {
        let mut controls = Controls::new(Variant::Pong, 6.0);
        controls.key_down(Key::Pause);
        controls.key_down(Key::Left);
        let input = controls.take_input();
        assert!(!input.toggle_pause);
        assert_eq!(input.paddle_velocity, Some(0.0));

        controls.key_down(Key::Up);
        assert_eq!(controls.take_input().paddle_velocity, Some(-6.0));
        controls.key_up(Key::Down);
        assert_eq!(controls.take_input().paddle_velocity, Some(0.0));
    }
}
