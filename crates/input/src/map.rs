//! Key mapping from terminal events to engine keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a keyboard event to the key the engine understands.
pub fn handle_key_event(key: KeyEvent) -> Option<Key> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Key::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Key::Right)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Key::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Key::Down)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Key::Enter),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_arrow_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Left)), Some(Key::Left));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Right)), Some(Key::Right));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Up)), Some(Key::Up));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Down)), Some(Key::Down));
    }

    #[test]
    fn test_letter_aliases() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('H'))), Some(Key::Left));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('d'))), Some(Key::Right));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('w'))), Some(Key::Up));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('J'))), Some(Key::Down));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_enter_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Enter)), Some(Key::Enter));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char(' '))), Some(Key::Enter));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
