//! Top-level game: scene dispatch and the shell-facing API
//!
//! [`Game`] owns the configuration, the RNG, the session and the event queue,
//! and runs whichever scene is active. Scenes ask for a switch by returning a
//! [`SceneId`] from `on_update`; the switch happens before `update` returns.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::GameConfig;
use crate::events::EventQueue;
use crate::menu::MenuScene;
use crate::play::{PlayScene, PlayState};
use crate::rng::seeded;
use crate::session::{SceneContext, Session};
use crate::snapshot::{ButtonSnapshot, GameSnapshot, NuggetSnapshot};
use crate::types::{GameEvent, InputSnapshot, SceneId};

/// The active scene
#[derive(Debug, Clone)]
pub enum Scene {
    Menu(MenuScene),
    Play(PlayScene),
}

impl Scene {
    pub fn id(&self) -> SceneId {
        match self {
            Scene::Menu(_) => SceneId::Menu,
            Scene::Play(_) => SceneId::Play,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
    session: Session,
    events: EventQueue,
    scene: Scene,
}

impl Game<StdRng> {
    /// Start at the menu with a seeded RNG
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, seeded(seed))
    }

    /// Start directly in a run with a seeded RNG
    pub fn new_playing(config: GameConfig, seed: u64) -> Self {
        let mut game = Self::new(config, seed);
        game.switch_scene(SceneId::Play);
        game
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {config:?}");
        let mut game = Self {
            config,
            rng,
            session: Session::new(),
            events: EventQueue::new(),
            scene: Scene::Menu(MenuScene::new()),
        };
        let Self {
            config,
            rng,
            session,
            events,
            scene,
        } = &mut game;
        if let Scene::Menu(menu) = scene {
            menu.on_enter(&mut SceneContext {
                config,
                rng,
                session,
                events,
            });
        }
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_id(&self) -> SceneId {
        self.scene.id()
    }

    pub fn play(&self) -> Option<&PlayScene> {
        match &self.scene {
            Scene::Play(play) => Some(play),
            Scene::Menu(_) => None,
        }
    }

    pub fn menu(&self) -> Option<&MenuScene> {
        match &self.scene {
            Scene::Menu(menu) => Some(menu),
            Scene::Play(_) => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn is_game_over(&self) -> bool {
        self.play().is_some_and(PlayScene::is_game_over)
    }

    /// Events queued so far, without draining
    pub fn events(&self) -> &[GameEvent] {
        self.events.as_slice()
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain()
    }

    /// Advance the active scene by `elapsed_ms`
    pub fn update(&mut self, elapsed_ms: u32, input: &InputSnapshot) {
        let Self {
            config,
            rng,
            session,
            events,
            scene,
        } = self;
        let mut ctx = SceneContext {
            config,
            rng,
            session,
            events,
        };
        let request = match scene {
            Scene::Menu(menu) => menu.on_update(&mut ctx, elapsed_ms, input),
            Scene::Play(play) => play.on_update(&mut ctx, elapsed_ms, input),
        };
        if let Some(next) = request {
            self.switch_scene(next);
        }
    }

    /// Exit the active scene, then build and enter `next`
    pub fn switch_scene(&mut self, next: SceneId) {
        let Self {
            config,
            rng,
            session,
            events,
            scene,
        } = self;
        let mut ctx = SceneContext {
            config,
            rng,
            session,
            events,
        };

        match scene {
            Scene::Menu(menu) => menu.on_exit(&mut ctx),
            Scene::Play(play) => play.on_exit(&mut ctx),
        }
        *scene = match next {
            SceneId::Menu => Scene::Menu(MenuScene::new()),
            SceneId::Play => Scene::Play(PlayScene::new(ctx.config)),
        };
        match scene {
            Scene::Menu(menu) => menu.on_enter(&mut ctx),
            Scene::Play(play) => play.on_enter(&mut ctx),
        }

        log::info!("scene -> {next:?}");
        ctx.emit(GameEvent::SceneChanged(next));
    }

    /// Copy the render state into `out` without allocating
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.scene = self.scene.id();
        out.board_width = self.config.board_width;
        out.board_height = self.config.board_height;
        out.score = self.session.score;
        out.last_score = self.session.last_score;
        out.eaten = self.session.eaten;
        for (dst, class) in out.class_scores.iter_mut().zip(self.config.classes.iter()) {
            *dst = class.score;
        }
        out.speed_bonus_table = self.config.speed_bonus_table;
        out.speed_bonus_cooldown_ms = self.config.speed_bonus_cooldown_ms;
        out.combo_bonuses = [
            self.config.same3_bonus,
            self.config.same6_bonus,
            self.config.order_bonus,
        ];
        out.hero = self.session.hero;

        out.segments.clear();
        out.nuggets.clear();
        out.popups.clear();

        match &self.scene {
            Scene::Play(play) => {
                let copied = out.segments.try_extend_from_slice(play.snake().segments());
                debug_assert!(copied.is_ok(), "snapshot segment capacity too small");
                out.nuggets.extend(play.pool().alive().map(|(_, n)| NuggetSnapshot {
                    class: n.class,
                    cell: n.cell,
                }));
                let copied = out.popups.try_extend_from_slice(play.popups());
                debug_assert!(copied.is_ok(), "snapshot popup capacity too small");
                out.speed_percent = play.scoring().speed_percent();
                out.speed_bar_level = play.scoring().speed_bar_level(&self.config);
                out.game_over = play.state() == PlayState::GameOver;
            }
            Scene::Menu(menu) => {
                out.speed_percent = 0;
                out.speed_bar_level = 0;
                out.game_over = false;
                for (dst, b) in out.menu.buttons.iter_mut().zip(menu.buttons()) {
                    *dst = ButtonSnapshot {
                        label: b.label,
                        state: b.state,
                    };
                }
                out.menu.hovered = menu.hovered();
                out.menu.panel = menu.panel();
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Key, Music};

    fn enter() -> InputSnapshot {
        let mut input = InputSnapshot::new();
        input.press(Key::Enter);
        input
    }

    #[test]
    fn test_new_starts_in_menu() {
        let mut game = Game::new(GameConfig::default(), 1);
        assert_eq!(game.scene_id(), SceneId::Menu);
        let events: Vec<GameEvent> = game.drain_events().collect();
        assert_eq!(events, vec![GameEvent::MusicStart(Music::Menu)]);
    }

    #[test]
    fn test_menu_play_switches_scene() {
        let mut game = Game::new(GameConfig::default(), 1);
        game.drain_events().for_each(drop);

        game.update(16, &enter());
        assert_eq!(game.scene_id(), SceneId::Play);
        let events: Vec<GameEvent> = game.drain_events().collect();
        assert_eq!(
            events,
            vec![
                GameEvent::Sound(crate::types::Sound::Click),
                GameEvent::MusicStop,
                GameEvent::MusicStart(Music::Jungle),
                GameEvent::SceneChanged(SceneId::Play),
            ]
        );
    }

    #[test]
    fn test_new_playing_moves_west_on_first_step() {
        let mut game = Game::new_playing(GameConfig::default(), 7);
        let idle = InputSnapshot::new();
        game.update(101, &idle);
        let play = game.play().unwrap();
        assert_eq!(play.snake().head(), Cell::new(18, 17));
    }

    #[test]
    fn test_same_seed_same_nuggets() {
        let mut a = Game::new_playing(GameConfig::default(), 99);
        let mut b = Game::new_playing(GameConfig::default(), 99);
        let idle = InputSnapshot::new();
        a.update(16, &idle);
        b.update(16, &idle);
        assert_eq!(a.snapshot().nuggets, b.snapshot().nuggets);
        assert_eq!(a.snapshot().nuggets.len(), 20);
    }

    #[test]
    fn test_snapshot_reflects_menu() {
        let mut game = Game::new(GameConfig::default(), 1);
        let mut down = InputSnapshot::new();
        down.press(Key::Down);
        game.update(16, &down);

        let snap = game.snapshot();
        assert_eq!(snap.scene, SceneId::Menu);
        assert_eq!(snap.menu.hovered, 1);
        assert_eq!(snap.menu.buttons[0].label, "PLAY");
        assert_eq!(snap.menu.buttons[1].label, "SNAKE");
        assert!(snap.segments.is_empty());
        assert_eq!(snap.class_scores[0], 70);
    }

    #[test]
    fn test_snapshot_carries_configured_tuning() {
        let config = GameConfig {
            speed_bonus_table: [5, 10, 15, 20, 25, 30, 35, 300],
            speed_bonus_cooldown_ms: 2000,
            order_bonus: 12,
            ..GameConfig::default()
        };
        let game = Game::new(config, 1);
        let snap = game.snapshot();
        assert_eq!(snap.speed_bonus_table[7], 300);
        assert_eq!(snap.speed_bonus_cooldown_ms, 2000);
        assert_eq!(snap.combo_bonuses, [3, 6, 12]);
    }

    #[test]
    fn test_snapshot_into_reuses_buffers() {
        let mut game = Game::new_playing(GameConfig::default(), 3);
        let mut snap = GameSnapshot::default();
        let idle = InputSnapshot::new();
        game.update(16, &idle);
        game.snapshot_into(&mut snap);
        game.snapshot_into(&mut snap);
        assert_eq!(snap.segments.len(), 4);
        assert_eq!(snap.nuggets.len(), 20);
        assert!(snap.playing());
    }
}
