//! Menu scene
//!
//! Two buttons, each bound to a [`MenuCommand`]. Up/Down move the hover with
//! wrap-around, Enter presses the hovered button. A rotating info panel
//! explains the rules while the menu idles.

use rand::Rng;

use crate::session::SceneContext;
use crate::types::{GameEvent, InputSnapshot, Key, Music, SceneId, Sound, MENU_PANEL_SWAP_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Start a run
    Play,
    /// Cycle the snake hero
    NextHero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButton {
    pub label: &'static str,
    pub command: MenuCommand,
    pub state: ButtonState,
}

impl MenuButton {
    const fn new(label: &'static str, command: MenuCommand) -> Self {
        Self {
            label,
            command,
            state: ButtonState::Idle,
        }
    }
}

/// Info panel shown next to the buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoPanel {
    #[default]
    Rules,
    Scores,
    Combos,
    Speed,
}

impl InfoPanel {
    pub fn next(self) -> Self {
        match self {
            InfoPanel::Rules => InfoPanel::Scores,
            InfoPanel::Scores => InfoPanel::Combos,
            InfoPanel::Combos => InfoPanel::Speed,
            InfoPanel::Speed => InfoPanel::Rules,
        }
    }
}

pub const MENU_BUTTON_COUNT: usize = 2;

#[derive(Debug, Clone)]
pub struct MenuScene {
    buttons: [MenuButton; MENU_BUTTON_COUNT],
    hovered: usize,
    panel: InfoPanel,
    panel_clock_ms: u32,
    scene_request: Option<SceneId>,
}

impl Default for MenuScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuScene {
    pub fn new() -> Self {
        Self {
            buttons: [
                MenuButton::new("PLAY", MenuCommand::Play),
                MenuButton::new("SNAKE", MenuCommand::NextHero),
            ],
            hovered: 0,
            panel: InfoPanel::Rules,
            panel_clock_ms: 0,
            scene_request: None,
        }
    }

    pub fn buttons(&self) -> &[MenuButton] {
        &self.buttons
    }

    pub fn hovered(&self) -> usize {
        self.hovered
    }

    pub fn panel(&self) -> InfoPanel {
        self.panel
    }

    pub fn on_enter<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>) {
        for b in self.buttons.iter_mut() {
            b.state = ButtonState::Idle;
        }
        self.hovered = 0;
        self.buttons[0].state = ButtonState::Hovered;
        self.panel = InfoPanel::Rules;
        self.panel_clock_ms = 0;
        self.scene_request = None;
        ctx.emit(GameEvent::MusicStart(Music::Menu));
    }

    pub fn on_update<R: Rng + ?Sized>(
        &mut self,
        ctx: &mut SceneContext<'_, R>,
        elapsed_ms: u32,
        input: &InputSnapshot,
    ) -> Option<SceneId> {
        self.handle_input(ctx, input);
        self.update_panel(elapsed_ms);
        self.scene_request.take()
    }

    pub fn on_exit<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>) {
        ctx.emit(GameEvent::MusicStop);
    }

    fn handle_input<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>, input: &InputSnapshot) {
        let pressed = input.is_pressed(Key::Enter);
        let released = input.is_released(Key::Enter);
        if pressed && released {
            return;
        }

        if pressed {
            self.buttons[self.hovered].state = ButtonState::Pressed;
            self.run(ctx, self.buttons[self.hovered].command);
            ctx.emit(GameEvent::Sound(Sound::Click));
            return;
        }
        // Terminals rarely report key releases, so any frame without Enter
        // lets a pressed button spring back.
        if self.buttons[self.hovered].state == ButtonState::Pressed {
            self.buttons[self.hovered].state = ButtonState::Hovered;
            return;
        }

        let up = input.is_pressed(Key::Up);
        let down = input.is_pressed(Key::Down);
        let shift: isize = match (up, down) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };
        if shift != 0 {
            self.buttons[self.hovered].state = ButtonState::Idle;
            self.hovered = (self.hovered as isize + shift).rem_euclid(MENU_BUTTON_COUNT as isize) as usize;
            self.buttons[self.hovered].state = ButtonState::Hovered;
            ctx.emit(GameEvent::Sound(Sound::Click));
        }
    }

    fn run<R: Rng + ?Sized>(&mut self, ctx: &mut SceneContext<'_, R>, command: MenuCommand) {
        match command {
            MenuCommand::Play => self.scene_request = Some(SceneId::Play),
            MenuCommand::NextHero => {
                ctx.session.hero = ctx.session.hero.next();
                log::debug!("hero is now {}", ctx.session.hero.name());
            }
        }
    }

    fn update_panel(&mut self, elapsed_ms: u32) {
        self.panel_clock_ms = self.panel_clock_ms.saturating_add(elapsed_ms);
        if self.panel_clock_ms > MENU_PANEL_SWAP_MS {
            self.panel = self.panel.next();
            self.panel_clock_ms = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::events::EventQueue;
    use crate::rng::seeded;
    use crate::session::Session;
    use crate::types::Hero;

    fn press(keys: &[Key]) -> InputSnapshot {
        let mut input = InputSnapshot::new();
        for &k in keys {
            input.press(k);
        }
        input
    }

    fn run_frames(
        menu: &mut MenuScene,
        session: &mut Session,
        events: &mut EventQueue,
        frames: &[(u32, InputSnapshot)],
    ) -> Option<SceneId> {
        let config = GameConfig::default();
        let mut rng = seeded(0);
        let mut ctx = SceneContext {
            config: &config,
            rng: &mut rng,
            session,
            events,
        };
        let mut request = None;
        for (elapsed, input) in frames {
            request = request.or(menu.on_update(&mut ctx, *elapsed, input));
        }
        request
    }

    fn entered() -> (MenuScene, Session, EventQueue) {
        let mut menu = MenuScene::new();
        let mut session = Session::new();
        let mut events = EventQueue::new();
        let config = GameConfig::default();
        let mut rng = seeded(0);
        menu.on_enter(&mut SceneContext {
            config: &config,
            rng: &mut rng,
            session: &mut session,
            events: &mut events,
        });
        (menu, session, events)
    }

    #[test]
    fn test_enter_hovers_play_and_starts_music() {
        let (menu, _, events) = entered();
        assert_eq!(menu.hovered(), 0);
        assert_eq!(menu.buttons()[0].state, ButtonState::Hovered);
        assert_eq!(menu.buttons()[1].state, ButtonState::Idle);
        assert_eq!(events.as_slice(), &[GameEvent::MusicStart(Music::Menu)]);
    }

    #[test]
    fn test_hover_wraps_both_ways() {
        let (mut menu, mut session, mut events) = entered();
        run_frames(&mut menu, &mut session, &mut events, &[(16, press(&[Key::Up]))]);
        assert_eq!(menu.hovered(), 1);
        run_frames(&mut menu, &mut session, &mut events, &[(16, press(&[Key::Down]))]);
        assert_eq!(menu.hovered(), 0);
        run_frames(&mut menu, &mut session, &mut events, &[(16, press(&[Key::Up, Key::Down]))]);
        assert_eq!(menu.hovered(), 0);
    }

    #[test]
    fn test_enter_on_play_requests_play_scene() {
        let (mut menu, mut session, mut events) = entered();
        let request = run_frames(&mut menu, &mut session, &mut events, &[(16, press(&[Key::Enter]))]);
        assert_eq!(request, Some(SceneId::Play));
        assert!(events.as_slice().contains(&GameEvent::Sound(Sound::Click)));
    }

    #[test]
    fn test_snake_button_cycles_hero() {
        let (mut menu, mut session, mut events) = entered();
        let frames = [
            (16, press(&[Key::Down])),
            (16, press(&[Key::Enter])),
            (16, InputSnapshot::new()),
            (16, press(&[Key::Enter])),
        ];
        let request = run_frames(&mut menu, &mut session, &mut events, &frames);
        assert_eq!(request, None);
        assert_eq!(session.hero, Hero::Itzcoatl.next().next());
    }

    #[test]
    fn test_pressed_button_blocks_hover_for_a_frame() {
        let (mut menu, mut session, mut events) = entered();
        let frames = [(16, press(&[Key::Down])), (16, press(&[Key::Enter]))];
        run_frames(&mut menu, &mut session, &mut events, &frames);
        assert_eq!(menu.buttons()[1].state, ButtonState::Pressed);

        run_frames(&mut menu, &mut session, &mut events, &[(16, press(&[Key::Up]))]);
        assert_eq!(menu.hovered(), 1);
        assert_eq!(menu.buttons()[1].state, ButtonState::Hovered);
    }

    #[test]
    fn test_press_and_release_same_frame_is_ignored() {
        let (mut menu, mut session, mut events) = entered();
        let mut input = press(&[Key::Enter]);
        input.release(Key::Enter);
        let request = run_frames(&mut menu, &mut session, &mut events, &[(16, input)]);
        assert_eq!(request, None);
        assert_eq!(menu.buttons()[0].state, ButtonState::Hovered);
    }

    #[test]
    fn test_info_panel_rotates() {
        let (mut menu, mut session, mut events) = entered();
        let idle = InputSnapshot::new();
        run_frames(&mut menu, &mut session, &mut events, &[(15_000, idle)]);
        assert_eq!(menu.panel(), InfoPanel::Rules);
        run_frames(&mut menu, &mut session, &mut events, &[(1, idle)]);
        assert_eq!(menu.panel(), InfoPanel::Scores);
        for _ in 0..3 {
            run_frames(&mut menu, &mut session, &mut events, &[(15_001, idle)]);
        }
        assert_eq!(menu.panel(), InfoPanel::Rules);
    }
}
