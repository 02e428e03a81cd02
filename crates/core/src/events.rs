//! Outgoing event queue
//!
//! Scenes push [`GameEvent`]s; the shell drains them after each update and
//! routes them to audio, HUD or logging. The queue is bounded so pushing never
//! allocates.

use arrayvec::ArrayVec;

use crate::types::GameEvent;

/// Events a single update can queue before new ones are dropped
pub const EVENT_QUEUE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: ArrayVec<GameEvent, EVENT_QUEUE_CAPACITY>,
    dropped: u32,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.events.try_push(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            log::warn!("event queue full, dropping {event:?}");
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    /// Total events dropped since creation
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> arrayvec::Drain<'_, GameEvent, EVENT_QUEUE_CAPACITY> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Music, Sound};

    #[test]
    fn test_drain_in_order() {
        let mut q = EventQueue::new();
        q.push(GameEvent::MusicStart(Music::Jungle));
        q.push(GameEvent::Sound(Sound::ScoreBeep));
        let drained: Vec<GameEvent> = q.drain().collect();
        assert_eq!(
            drained,
            vec![
                GameEvent::MusicStart(Music::Jungle),
                GameEvent::Sound(Sound::ScoreBeep)
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn test_full_queue_drops_newest() {
        let mut q = EventQueue::new();
        for _ in 0..EVENT_QUEUE_CAPACITY {
            q.push(GameEvent::Sound(Sound::Click));
        }
        q.push(GameEvent::MusicStop);
        assert_eq!(q.len(), EVENT_QUEUE_CAPACITY);
        assert_eq!(q.dropped(), 1);
        assert!(!q.as_slice().contains(&GameEvent::MusicStop));
    }
}
