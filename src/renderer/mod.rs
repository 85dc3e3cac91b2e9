//! Rendering module
//!
//! Worlds are turned into a backend-neutral `Scene`; the canvas backend only
//! executes it.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod effects;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use effects::{SHRINK_FRAMES, ShrinkEffects, ease_in_out_quad};
pub use shapes::{DrawCommand, Scene, breakout_scene, pong_scene, rect_3d, scene};
