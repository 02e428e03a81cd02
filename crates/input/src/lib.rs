//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the engine's [`crate::types::Key`] set and
//! collects them into one [`crate::types::InputSnapshot`] per frame.

pub mod handler;
pub mod map;

pub use nugget_snake_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit};
