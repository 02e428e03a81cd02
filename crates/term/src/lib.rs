//! Terminal renderer for the snake game.
//!
//! A small game-oriented rendering layer: the view draws a
//! [`GameSnapshot`](nugget_snake_core::GameSnapshot) into a plain framebuffer
//! and the renderer flushes only what changed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - No allocation per frame once the framebuffer is sized
//! - 2 columns per board cell so the board looks square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use nugget_snake_core as core;
pub use nugget_snake_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
