//! Render snapshot
//!
//! [`GameSnapshot`] is the read-only view of one frame handed to the
//! presentation layer. Tuning the HUD and menu display is copied from the
//! active config so overridden values show up as played.

use arrayvec::ArrayVec;

use crate::menu::{ButtonState, InfoPanel, MENU_BUTTON_COUNT};
use crate::play::ScorePopup;
use crate::snake::Segment;
use crate::types::{
    Cell, Hero, NuggetClass, SceneId, BOARD_HEIGHT, BOARD_WIDTH, MAX_NUGGET_CAPACITY,
    MAX_SCORE_POPUPS, MAX_SNAKE_CAPACITY, NUGGET_CLASS_COUNT, ORDER_COMBO_BONUS,
    SAME3_COMBO_BONUS, SAME6_COMBO_BONUS, SPEED_BONUS_COOLDOWN_MS, SPEED_BONUS_TABLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NuggetSnapshot {
    pub class: NuggetClass,
    pub cell: Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSnapshot {
    pub label: &'static str,
    pub state: ButtonState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSnapshot {
    pub buttons: [ButtonSnapshot; MENU_BUTTON_COUNT],
    pub hovered: usize,
    pub panel: InfoPanel,
}

impl Default for MenuSnapshot {
    fn default() -> Self {
        let idle = ButtonSnapshot {
            label: "",
            state: ButtonState::Idle,
        };
        Self {
            buttons: [idle; MENU_BUTTON_COUNT],
            hovered: 0,
            panel: InfoPanel::Rules,
        }
    }
}

/// Everything the view needs for one frame, copied without allocating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub scene: SceneId,
    pub board_width: u16,
    pub board_height: u16,
    pub segments: ArrayVec<Segment, MAX_SNAKE_CAPACITY>,
    pub nuggets: ArrayVec<NuggetSnapshot, MAX_NUGGET_CAPACITY>,
    pub popups: ArrayVec<ScorePopup, MAX_SCORE_POPUPS>,
    pub score: u32,
    pub last_score: u32,
    pub eaten: [u32; NUGGET_CLASS_COUNT],
    pub class_scores: [u32; NUGGET_CLASS_COUNT],
    pub speed_bonus_table: [u32; 8],
    pub speed_bonus_cooldown_ms: u32,
    /// Same-3, same-6 and ordered multipliers.
    pub combo_bonuses: [u32; 3],
    pub hero: Hero,
    pub speed_percent: u32,
    pub speed_bar_level: u32,
    pub game_over: bool,
    pub menu: MenuSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.scene = SceneId::Menu;
        self.board_width = BOARD_WIDTH;
        self.board_height = BOARD_HEIGHT;
        self.segments.clear();
        self.nuggets.clear();
        self.popups.clear();
        self.score = 0;
        self.last_score = 0;
        self.eaten = [0; NUGGET_CLASS_COUNT];
        self.class_scores = [0; NUGGET_CLASS_COUNT];
        self.speed_bonus_table = SPEED_BONUS_TABLE;
        self.speed_bonus_cooldown_ms = SPEED_BONUS_COOLDOWN_MS;
        self.combo_bonuses = [SAME3_COMBO_BONUS, SAME6_COMBO_BONUS, ORDER_COMBO_BONUS];
        self.hero = Hero::default();
        self.speed_percent = 0;
        self.speed_bar_level = 0;
        self.game_over = false;
        self.menu = MenuSnapshot::default();
    }

    pub fn playing(&self) -> bool {
        self.scene == SceneId::Play && !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            scene: SceneId::Menu,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            segments: ArrayVec::new(),
            nuggets: ArrayVec::new(),
            popups: ArrayVec::new(),
            score: 0,
            last_score: 0,
            eaten: [0; NUGGET_CLASS_COUNT],
            class_scores: [0; NUGGET_CLASS_COUNT],
            speed_bonus_table: SPEED_BONUS_TABLE,
            speed_bonus_cooldown_ms: SPEED_BONUS_COOLDOWN_MS,
            combo_bonuses: [SAME3_COMBO_BONUS, SAME6_COMBO_BONUS, ORDER_COMBO_BONUS],
            hero: Hero::default(),
            speed_percent: 0,
            speed_bar_level: 0,
            game_over: false,
            menu: MenuSnapshot::default(),
        }
    }
}
