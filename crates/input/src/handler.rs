//! Per-frame input collection for terminal environments.
//!
//! Key events arrive between frames; the handler folds them into one
//! [`InputSnapshot`] that the game reads on its next update. Terminals without
//! the keyboard enhancement protocol never send release events, which the
//! engine tolerates.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, should_quit};
use crate::types::InputSnapshot;

#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    frame: InputSnapshot,
    quit: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one terminal key event into the current frame.
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if event.kind == KeyEventKind::Press && should_quit(event) {
            self.quit = true;
            return;
        }
        let Some(key) = handle_key_event(event) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press => self.frame.press(key),
            KeyEventKind::Release => self.frame.release(key),
            // Auto-repeat is not a fresh press.
            KeyEventKind::Repeat => {}
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Hand out this frame's input and start an empty one.
    pub fn take_frame(&mut self) -> InputSnapshot {
        std::mem::take(&mut self.frame)
    }
}
