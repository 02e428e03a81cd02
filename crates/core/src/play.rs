//! Play scene - the snake state machine
//!
//! States: `None -> Playing -> GameOver`. Transitions are two-phase:
//! [`PlayScene::set_next_state`] only records the request, and the switch runs
//! once at the end of [`PlayScene::on_update`] (exit old, enter new, then the
//! state variable changes).
//!
//! # Playing, per update
//!
//! 1. Input: a frame with more than one arrow key is ignored.
//! 2. The speed bonus clock counts down.
//! 3. Once the step clock exceeds the step period the snake moves, then item
//!    and self collisions are resolved and the step clock restarts.
//! 4. The nugget pool is topped up until full or a placement fails.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::collision::{check_item_collision, check_self_collision};
use crate::config::GameConfig;
use crate::grid::Board;
use crate::scoring::{EatScore, ScoringEngine};
use crate::session::SceneContext;
use crate::snake::Snake;
use crate::spawner::{Nugget, NuggetPool};
use crate::types::{
    Cell, Direction, GameEvent, InputSnapshot, Key, Music, SceneId, Sound, MAX_SCORE_POPUPS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    None,
    Playing,
    GameOver,
}

/// Transient "+score" marker shown where a nugget was eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorePopup {
    pub cell: Cell,
    pub score: u32,
    pub remaining_ms: u32,
}

#[derive(Debug, Clone)]
pub struct PlayScene {
    state: PlayState,
    next_state: PlayState,
    board: Board,
    snake: Snake,
    pool: NuggetPool,
    scoring: ScoringEngine,
    step_clock_ms: u32,
    game_over_clock_ms: u32,
    bitten: Option<usize>,
    popups: ArrayVec<ScorePopup, MAX_SCORE_POPUPS>,
    last_eat: Option<EatScore>,
    scene_request: Option<SceneId>,
}

impl PlayScene {
    pub fn new(config: &GameConfig) -> Self {
        let board = Board::new(config.board_width, config.board_height);
        Self {
            state: PlayState::None,
            next_state: PlayState::None,
            board,
            snake: new_snake(&board, config),
            pool: NuggetPool::new(),
            scoring: ScoringEngine::new(),
            step_clock_ms: 0,
            game_over_clock_ms: 0,
            bitten: None,
            popups: ArrayVec::new(),
            last_eat: None,
            scene_request: None,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn next_state(&self) -> PlayState {
        self.next_state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == PlayState::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn pool(&self) -> &NuggetPool {
        &self.pool
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn popups(&self) -> &[ScorePopup] {
        &self.popups
    }

    /// Breakdown of the most recent eat this run
    pub fn last_eat(&self) -> Option<&EatScore> {
        self.last_eat.as_ref()
    }

    /// Segment bitten by the head, set on self-collision
    pub fn bitten_index(&self) -> Option<usize> {
        self.bitten
    }

    pub fn step_clock_ms(&self) -> u32 {
        self.step_clock_ms
    }

    pub fn game_over_clock_ms(&self) -> u32 {
        self.game_over_clock_ms
    }

    pub fn on_enter<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>) {
        self.state = PlayState::None;
        self.scene_request = None;
        self.set_next_state(PlayState::Playing);
        self.switch_state(ctx);
    }

    /// Run one frame; returns the scene to switch to, if any
    pub fn on_update<R: Rng + ?Sized>(
        &mut self,
        ctx: &mut SceneContext<'_, R>,
        elapsed_ms: u32,
        input: &InputSnapshot,
    ) -> Option<SceneId> {
        match self.state {
            PlayState::Playing => self.update_playing(ctx, elapsed_ms, input),
            PlayState::GameOver => self.update_game_over(ctx, elapsed_ms),
            PlayState::None => debug_assert!(false, "play scene updated before on_enter"),
        }

        self.tick_popups(elapsed_ms);

        if self.next_state != self.state {
            self.switch_state(ctx);
        }
        self.scene_request.take()
    }

    pub fn on_exit<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>) {
        if self.state == PlayState::Playing {
            self.exit_playing(ctx);
        }
        self.popups.clear();
    }

    pub fn set_next_state(&mut self, next: PlayState) {
        self.next_state = next;
    }

    /// Exit the current state, enter the next one, then commit
    pub fn switch_state<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>) {
        match self.state {
            PlayState::Playing => self.exit_playing(ctx),
            PlayState::GameOver | PlayState::None => {}
        }
        match self.next_state {
            PlayState::Playing => self.enter_playing(ctx),
            PlayState::GameOver => self.enter_game_over(ctx),
            PlayState::None => debug_assert!(false, "cannot switch into None"),
        }
        log::debug!("play state {:?} -> {:?}", self.state, self.next_state);
        self.state = self.next_state;
    }

    fn enter_playing<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>) {
        ctx.session.begin_run();
        self.snake = new_snake(&self.board, ctx.config);
        self.pool.clear();
        self.scoring.reset();
        self.step_clock_ms = 0;
        self.bitten = None;
        self.last_eat = None;
        self.popups.clear();
        ctx.emit(GameEvent::MusicStart(Music::Jungle));
    }

    fn update_playing<R: Rng + ?Sized>(
        &mut self,
        ctx: &mut SceneContext<'_, R>,
        elapsed_ms: u32,
        input: &InputSnapshot,
    ) {
        self.handle_input(input);

        self.scoring.tick(elapsed_ms);

        self.step_clock_ms = self.step_clock_ms.saturating_add(elapsed_ms);
        if self.step_clock_ms > ctx.config.step_period_ms {
            self.snake.step(&self.board);
            if let Some((slot, nugget)) = check_item_collision(&self.snake, &self.pool) {
                self.eat_nugget(ctx, slot, nugget);
            }
            if let Some(index) = check_self_collision(&self.snake) {
                self.bitten = Some(index);
                self.set_next_state(PlayState::GameOver);
            }
            self.step_clock_ms = 0;
        }

        while self
            .pool
            .try_spawn_one(&mut *ctx.rng, &self.board, &self.snake, ctx.config)
        {}
    }

    fn handle_input(&mut self, input: &InputSnapshot) {
        if input.movement_keys_pressed() > 1 {
            return;
        }
        let dir = if input.is_pressed(Key::Left) {
            Direction::West
        } else if input.is_pressed(Key::Right) {
            Direction::East
        } else if input.is_pressed(Key::Up) {
            Direction::North
        } else if input.is_pressed(Key::Down) {
            Direction::South
        } else {
            return;
        };
        self.snake.set_next_direction(dir);
    }

    fn eat_nugget<R: Rng + ?Sized>(
        &mut self,
        ctx: &mut SceneContext<'_, R>,
        slot: usize,
        nugget: Nugget,
    ) {
        let eat = self.scoring.on_eat(nugget.class, ctx.config);
        ctx.session.add_score(eat.total);
        ctx.session.add_eaten(nugget.class);
        self.push_popup(ScorePopup {
            cell: nugget.cell,
            score: eat.total,
            remaining_ms: ctx.config.score_popup_lifetime_ms,
        });
        self.snake.queue_growth(ctx.config.growths_per_nugget);
        self.pool.kill(slot);
        self.last_eat = Some(eat);

        ctx.emit(GameEvent::Sound(Sound::ScoreBeep));
        ctx.emit(GameEvent::NuggetEaten {
            class: nugget.class,
            score: eat.total,
            cell: nugget.cell,
            combo: eat.combo,
        });
        if let Some(combo) = eat.combo {
            log::debug!("{} combo for {} points", combo.as_str(), eat.total);
        }
    }

    fn exit_playing<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>) {
        ctx.emit(GameEvent::MusicStop);
    }

    fn enter_game_over<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>) {
        if let Some(index) = self.bitten {
            self.snake.mark_bitten(index);
        }
        self.game_over_clock_ms = 0;
        ctx.session.last_score = ctx.session.score;
        log::info!(
            "game over: score {} length {}",
            ctx.session.score,
            self.snake.len()
        );
        ctx.emit(GameEvent::GameOver {
            score: ctx.session.score,
        });
    }

    fn update_game_over<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>, elapsed_ms: u32) {
        self.game_over_clock_ms = self.game_over_clock_ms.saturating_add(elapsed_ms);
        if self.game_over_clock_ms > ctx.config.game_over_period_ms {
            self.scene_request = Some(SceneId::Menu);
        }
    }

    fn push_popup(&mut self, popup: ScorePopup) {
        if self.popups.is_full() {
            self.popups.remove(0);
        }
        self.popups.push(popup);
    }

    fn tick_popups(&mut self, elapsed_ms: u32) {
        for p in self.popups.iter_mut() {
            p.remaining_ms = p.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.popups.retain(|p| p.remaining_ms > 0);
    }

    #[cfg(test)]
    pub(crate) fn pool_mut(&mut self) -> &mut NuggetPool {
        &mut self.pool
    }

    #[cfg(test)]
    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }
}

fn new_snake(board: &Board, config: &GameConfig) -> Snake {
    Snake::new(
        board,
        config.head_spawn,
        config.initial_direction,
        config.baby_snake_length,
        config.max_snake_length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventQueue;
    use crate::rng::seeded;
    use crate::session::Session;
    use crate::types::NuggetClass;
    use rand::rngs::StdRng;

    struct Harness {
        config: GameConfig,
        rng: StdRng,
        session: Session,
        events: EventQueue,
        scene: PlayScene,
    }

    impl Harness {
        fn new(config: GameConfig) -> Self {
            let scene = PlayScene::new(&config);
            let mut h = Self {
                config,
                rng: seeded(1),
                session: Session::new(),
                events: EventQueue::new(),
                scene,
            };
            let Harness {
                config,
                rng,
                session,
                events,
                scene,
            } = &mut h;
            let mut ctx = SceneContext {
                config,
                rng,
                session,
                events,
            };
            scene.on_enter(&mut ctx);
            h
        }

        fn update(&mut self, elapsed_ms: u32, input: InputSnapshot) -> Option<SceneId> {
            let mut ctx = SceneContext {
                config: &self.config,
                rng: &mut self.rng,
                session: &mut self.session,
                events: &mut self.events,
            };
            self.scene.on_update(&mut ctx, elapsed_ms, &input)
        }

        fn idle(&mut self, elapsed_ms: u32) -> Option<SceneId> {
            self.update(elapsed_ms, InputSnapshot::new())
        }

        fn turn(&mut self, key: Key) {
            let mut input = InputSnapshot::new();
            input.press(key);
            self.update(0, input);
        }

        fn step(&mut self) {
            self.idle(self.config.step_period_ms + 1);
        }

        fn drain(&mut self) -> Vec<GameEvent> {
            self.events.drain().collect()
        }
    }

    fn no_nuggets() -> GameConfig {
        GameConfig {
            nugget_population: 0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_enter_starts_playing_with_music() {
        let mut h = Harness::new(GameConfig::default());
        assert_eq!(h.scene.state(), PlayState::Playing);
        assert_eq!(h.drain(), vec![GameEvent::MusicStart(Music::Jungle)]);
        assert_eq!(h.scene.snake().len(), 4);
    }

    #[test]
    fn test_first_update_fills_pool() {
        let mut h = Harness::new(GameConfig::default());
        h.idle(16);
        assert_eq!(h.scene.pool().alive_count(), 20);
    }

    #[test]
    fn test_step_waits_for_period() {
        let mut h = Harness::new(no_nuggets());
        let start = h.scene.snake().head();
        h.idle(100);
        assert_eq!(h.scene.snake().head(), start);
        h.idle(1);
        assert_eq!(h.scene.snake().head(), Cell::new(start.row, start.col - 1));
        assert_eq!(h.scene.step_clock_ms(), 0);
    }

    #[test]
    fn test_two_arrow_keys_are_ignored() {
        let mut h = Harness::new(no_nuggets());
        let mut input = InputSnapshot::new();
        input.press(Key::Up);
        input.press(Key::Left);
        h.update(0, input);
        assert_eq!(h.scene.snake().next_direction(), Direction::West);

        h.turn(Key::Up);
        assert_eq!(h.scene.snake().next_direction(), Direction::North);
    }

    #[test]
    fn test_reverse_key_is_rejected() {
        let mut h = Harness::new(no_nuggets());
        h.turn(Key::Right);
        assert_eq!(h.scene.snake().next_direction(), Direction::West);
    }

    #[test]
    fn test_eating_scores_and_grows() {
        let mut h = Harness::new(no_nuggets());
        h.drain();
        let head = h.scene.snake().head();
        let target = Cell::new(head.row, head.col - 1);
        let slot = h.scene.pool_mut().place(NuggetClass::Obsidian, target);

        h.step();
        assert_eq!(h.session.score, 50);
        assert_eq!(h.session.eaten(NuggetClass::Obsidian), 1);
        assert!(h.scene.pool().get(slot).is_none());
        assert_eq!(h.scene.snake().pending_growth(), 1);
        assert_eq!(
            h.scene.popups(),
            &[ScorePopup {
                cell: target,
                score: 50,
                remaining_ms: 1000 - 101
            }]
        );
        assert_eq!(
            h.drain(),
            vec![
                GameEvent::Sound(Sound::ScoreBeep),
                GameEvent::NuggetEaten {
                    class: NuggetClass::Obsidian,
                    score: 50,
                    cell: target,
                    combo: None
                }
            ]
        );

        h.step();
        assert_eq!(h.scene.snake().len(), 5);
    }

    #[test]
    fn test_popup_expires() {
        let mut h = Harness::new(no_nuggets());
        let head = h.scene.snake().head();
        h.scene
            .pool_mut()
            .place(NuggetClass::Gold, Cell::new(head.row, head.col - 1));
        h.step();
        assert_eq!(h.scene.popups().len(), 1);
        h.idle(50);
        h.idle(50);
        assert_eq!(h.scene.popups().len(), 1);
        for _ in 0..10 {
            h.idle(90);
        }
        assert!(h.scene.popups().is_empty());
    }

    fn bite_own_body(h: &mut Harness) {
        // A length-5 snake closing a 2x2 loop lands on its tail block.
        h.scene.snake_mut().queue_growth(1);
        h.step();
        for key in [Key::Down, Key::Right, Key::Up] {
            h.turn(key);
            h.step();
        }
    }

    #[test]
    fn test_self_collision_goes_game_over_once() {
        let mut h = Harness::new(no_nuggets());
        h.drain();
        bite_own_body(&mut h);

        assert!(h.scene.is_game_over());
        assert_eq!(h.scene.bitten_index(), Some(4));
        assert_eq!(
            h.scene.snake().segments()[4].tag,
            crate::types::BlockTag::Eaten
        );
        let events = h.drain();
        assert_eq!(
            events,
            vec![GameEvent::MusicStop, GameEvent::GameOver { score: 0 }]
        );

        // No further stepping or transitions while the game-over clock runs.
        let head = h.scene.snake().head();
        for _ in 0..10 {
            assert_eq!(h.idle(200), None);
        }
        assert_eq!(h.scene.snake().head(), head);
        assert!(h.drain().is_empty());
        assert!(h.scene.is_game_over());
    }

    #[test]
    fn test_game_over_requests_menu_after_period() {
        let mut h = Harness::new(no_nuggets());
        bite_own_body(&mut h);
        assert!(h.scene.is_game_over());

        assert_eq!(h.idle(3000), None);
        assert_eq!(h.idle(1), Some(SceneId::Menu));
    }

    #[test]
    fn test_game_over_records_last_score() {
        let mut h = Harness::new(no_nuggets());
        let head = h.scene.snake().head();
        h.scene
            .pool_mut()
            .place(NuggetClass::Silver, Cell::new(head.row, head.col - 1));
        bite_own_body(&mut h);
        assert!(h.scene.is_game_over());
        assert_eq!(h.session.last_score, 60);
    }

    #[test]
    fn test_reenter_resets_run() {
        let mut h = Harness::new(no_nuggets());
        h.session.add_score(500);
        bite_own_body(&mut h);

        let Harness {
            config,
            rng,
            session,
            events,
            scene,
        } = &mut h;
        let mut ctx = SceneContext {
            config,
            rng,
            session,
            events,
        };
        scene.on_exit(&mut ctx);
        scene.on_enter(&mut ctx);

        assert_eq!(h.scene.state(), PlayState::Playing);
        assert_eq!(h.session.score, 0);
        assert_eq!(h.session.last_score, 500);
        assert_eq!(h.scene.snake().len(), 4);
        assert_eq!(h.scene.bitten_index(), None);
    }
}
