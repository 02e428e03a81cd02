//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and state of the snake game. It has no
//! dependency on the terminal, audio or input devices:
//!
//! - **Deterministic**: the same seed and the same inputs replay the same game
//! - **Testable**: every rule is reachable from plain function calls
//! - **Allocation-free per frame**: fixed-capacity containers on the hot path
//!
//! # Module Structure
//!
//! - [`grid`]: wrap-around board arithmetic and neighbour directions
//! - [`snake`]: the snake body, growth and render tags
//! - [`spawner`]: the nugget pool and placement rules
//! - [`collision`]: head against nuggets and against the body
//! - [`scoring`]: eat history, combos and the speed bonus
//! - [`play`] / [`menu`]: the two scenes
//! - [`game`]: scene dispatch, events out, snapshots out
//! - [`config`]: tuning and validation
//!
//! # Example
//!
//! ```
//! use nugget_snake_core::{Game, GameConfig};
//! use nugget_snake_types::{InputSnapshot, Key, SceneId};
//!
//! let mut game = Game::new_playing(GameConfig::default(), 12345);
//!
//! let mut input = InputSnapshot::new();
//! input.press(Key::Up);
//! game.update(16, &input);
//! game.update(100, &InputSnapshot::new());
//!
//! assert_eq!(game.scene_id(), SceneId::Play);
//! assert_eq!(game.play().unwrap().snake().head().row, 17);
//! ```
//!
//! # Timing
//!
//! Call [`Game::update`](game::Game::update) every frame with the elapsed
//! milliseconds. The snake steps once the accumulated time exceeds the step
//! period (100 ms by default); the speed bonus, popups and the game-over
//! display all count down the same elapsed time.

pub mod collision;
pub mod config;
pub mod events;
pub mod game;
pub mod grid;
pub mod menu;
pub mod play;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snake;
pub mod snapshot;
pub mod spawner;

pub use nugget_snake_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig, NuggetClassSpec};
pub use events::EventQueue;
pub use game::{Game, Scene};
pub use grid::Board;
pub use menu::{ButtonState, InfoPanel, MenuCommand, MenuScene};
pub use play::{PlayScene, PlayState, ScorePopup};
pub use scoring::{EatScore, ScoringEngine};
pub use session::Session;
pub use snake::{Segment, Snake};
pub use snapshot::{GameSnapshot, MenuSnapshot, NuggetSnapshot};
pub use spawner::{Nugget, NuggetPool};
