//! Session state shared by the scenes
//!
//! A [`Session`] outlives individual play scenes: the menu reads the last
//! score and the hero from it, and the play scene writes the running score
//! and eaten counters into it.

use crate::config::GameConfig;
use crate::events::EventQueue;
use crate::types::{GameEvent, Hero, NuggetClass, NUGGET_CLASS_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub score: u32,
    /// Nuggets eaten this run, indexed by class rank.
    pub eaten: [u32; NUGGET_CLASS_COUNT],
    /// Score of the last finished run
    pub last_score: u32,
    pub hero: Hero,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-run counters
    pub fn begin_run(&mut self) {
        self.score = 0;
        self.eaten = [0; NUGGET_CLASS_COUNT];
    }

    pub fn add_score(&mut self, score: u32) {
        self.score = self.score.saturating_add(score);
    }

    pub fn add_eaten(&mut self, class: NuggetClass) {
        let count = &mut self.eaten[class.rank()];
        *count = count.saturating_add(1);
    }

    pub fn eaten(&self, class: NuggetClass) -> u32 {
        self.eaten[class.rank()]
    }
}

/// Everything a scene may touch besides its own state
pub struct SceneContext<'a, R: ?Sized> {
    pub config: &'a GameConfig,
    pub rng: &'a mut R,
    pub session: &'a mut Session,
    pub events: &'a mut EventQueue,
}

impl<R: ?Sized> SceneContext<'_, R> {
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_run_keeps_hero_and_last_score() {
        let mut session = Session {
            score: 120,
            last_score: 90,
            hero: Hero::Tizoc,
            ..Session::default()
        };
        session.add_eaten(NuggetClass::Lapis);
        session.begin_run();

        assert_eq!(session.score, 0);
        assert_eq!(session.eaten(NuggetClass::Lapis), 0);
        assert_eq!(session.last_score, 90);
        assert_eq!(session.hero, Hero::Tizoc);
    }

    #[test]
    fn test_counters() {
        let mut session = Session::new();
        session.add_score(70);
        session.add_score(u32::MAX);
        session.add_eaten(NuggetClass::Gold);
        session.add_eaten(NuggetClass::Gold);
        assert_eq!(session.score, u32::MAX);
        assert_eq!(session.eaten(NuggetClass::Gold), 2);
        assert_eq!(session.eaten(NuggetClass::Silver), 0);
    }
}
