//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory natively)
//! - Keyboard input mapping
//! - DOM and canvas lookups

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod input;
pub mod storage;

pub use input::{Controls, Key};
pub use storage::{MemoryStorage, Storage};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
