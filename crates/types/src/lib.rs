//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the rules engine, the terminal
//! view and the binary alike.
//!
//! # Board Dimensions
//!
//! The default board is a 40 x 36 wrap-around grid:
//!
//! - **Width**: 40 columns (indexed 0-39)
//! - **Height**: 36 rows (indexed 0-35)
//! - **Head spawn**: row 18, column 18, facing west
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal loop (~60 FPS) |
//! | `STEP_PERIOD_MS` | 100 | Snake moves one cell per step (10 Hz) |
//! | `SPEED_BONUS_COOLDOWN_MS` | 5000 | Window in which a follow-up eat earns a speed bonus |
//! | `GAME_OVER_PERIOD_MS` | 3000 | How long "GAME OVER" shows before the menu returns |
//! | `SCORE_POPUP_LIFETIME_MS` | 1000 | Lifetime of the "+score" marker |
//! | `MENU_PANEL_SWAP_MS` | 15000 | Menu info panel rotation interval |
//!
//! # Nugget Classes
//!
//! | Class | Rank | Score | Cumulative spawn threshold |
//! |-------|------|-------|----------------------------|
//! | Gold | 0 | 70 | 10 |
//! | Silver | 1 | 60 | 20 |
//! | Obsidian | 2 | 50 | 30 |
//! | Ruby | 3 | 40 | 40 |
//! | Jade | 4 | 30 | 50 |
//! | Lapis | 5 | 20 | 70 |
//! | Amethyst | 6 | 10 | 100 |
//!
//! # Examples
//!
//! ```
//! use nugget_snake_types::{Direction, NuggetClass, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! assert_eq!(Direction::North.opposite(), Direction::South);
//! assert_eq!(NuggetClass::from_str("ruby"), Some(NuggetClass::Ruby));
//! assert_eq!(NuggetClass::TOP_RANK, NuggetClass::Amethyst);
//!
//! assert_eq!(BOARD_WIDTH, 40);
//! assert_eq!(BOARD_HEIGHT, 36);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (40 columns)
pub const BOARD_WIDTH: u16 = 40;

/// Board height in cells (36 rows)
pub const BOARD_HEIGHT: u16 = 36;

/// Fixed frame interval of the terminal loop in milliseconds
pub const TICK_MS: u32 = 16;

/// Interval between snake steps (10 Hz)
pub const STEP_PERIOD_MS: u32 = 100;

/// Hard capacity of the segment container; configured max lengths may not exceed it.
pub const MAX_SNAKE_CAPACITY: usize = 400;

/// Length of a freshly spawned snake
pub const BABY_SNAKE_LENGTH: usize = 4;

/// Default head spawn row (board centre)
pub const SNAKE_HEAD_SPAWN_ROW: i16 = (BOARD_HEIGHT / 2) as i16;

/// Default head spawn column (centre, shifted so the baby body is centred)
pub const SNAKE_HEAD_SPAWN_COL: i16 = (BOARD_WIDTH / 2) as i16 - (BABY_SNAKE_LENGTH / 2) as i16;

/// Hard capacity of the nugget pool
pub const MAX_NUGGET_CAPACITY: usize = 32;

/// Default number of nuggets kept alive on the board
pub const NUGGET_POPULATION: usize = 20;

/// Growth credits earned per nugget
pub const GROWTHS_PER_NUGGET: u32 = 1;

/// Cooldown after an eat during which the next eat earns a speed bonus
pub const SPEED_BONUS_COOLDOWN_MS: u32 = 5000;

/// Speed bonus percentages, indexed by the number of quick successive eats minus one
pub const SPEED_BONUS_TABLE: [u32; 8] = [10, 20, 40, 80, 120, 160, 180, 200];

/// Number of speed bar states shown by the HUD (0 = lapsed, 1..=10 = remaining)
pub const SPEED_BAR_STATES: u32 = 11;

/// Multiplier for three of a kind closed by a different class
pub const SAME3_COMBO_BONUS: u32 = 3;

/// Multiplier for six of a kind
pub const SAME6_COMBO_BONUS: u32 = 6;

/// Multiplier for every class eaten in descending rank order
pub const ORDER_COMBO_BONUS: u32 = 9;

/// Longest combo the eat history must be able to hold
pub const LONGEST_POSSIBLE_COMBO: usize = NUGGET_CLASS_COUNT;

/// Time the "GAME OVER" state lasts before the menu returns
pub const GAME_OVER_PERIOD_MS: u32 = 3000;

/// Lifetime of a "+score" popup
pub const SCORE_POPUP_LIFETIME_MS: u32 = 1000;

/// Maximum number of score popups alive at once
pub const MAX_SCORE_POPUPS: usize = 8;

/// Menu info panel rotation interval
pub const MENU_PANEL_SWAP_MS: u32 = 15000;

/// Rejection-sampling budget for a single nugget placement
pub const PLACEMENT_ATTEMPTS: u32 = 4096;

/// Number of nugget classes
pub const NUGGET_CLASS_COUNT: usize = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_matches_reference_game() {
        assert_eq!(STEP_PERIOD_MS, 100);
        assert_eq!(SPEED_BONUS_COOLDOWN_MS, 5000);
        assert_eq!(SAME3_COMBO_BONUS, 3);
        assert_eq!(SAME6_COMBO_BONUS, 6);
        assert_eq!(ORDER_COMBO_BONUS, 9);
        assert_eq!(NUGGET_POPULATION, 20);
        assert_eq!(LONGEST_POSSIBLE_COMBO, 7);
        assert_eq!((SNAKE_HEAD_SPAWN_ROW, SNAKE_HEAD_SPAWN_COL), (18, 18));
    }

    #[test]
    fn test_direction_opposites_are_involutive() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_nugget_class_rank_round_trip() {
        for (i, class) in NuggetClass::ALL.iter().enumerate() {
            assert_eq!(class.rank(), i);
            assert_eq!(NuggetClass::from_rank(i), Some(*class));
        }
        assert_eq!(NuggetClass::from_rank(NUGGET_CLASS_COUNT), None);
    }

    #[test]
    fn test_input_snapshot_tracks_press_and_release_separately() {
        let mut input = InputSnapshot::new();
        input.press(Key::Left);
        input.release(Key::Enter);

        assert!(input.is_pressed(Key::Left));
        assert!(!input.is_pressed(Key::Enter));
        assert!(input.is_released(Key::Enter));
        assert_eq!(input.movement_keys_pressed(), 1);

        input.press(Key::Up);
        assert_eq!(input.movement_keys_pressed(), 2);

        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn test_direction_deserializes_lowercase() {
        let dir: Direction = serde_json::from_str("\"west\"").unwrap();
        assert_eq!(dir, Direction::West);
    }
}

/// The four grid directions
///
/// Rows grow downwards and columns grow to the right:
/// - **North**: row - 1
/// - **South**: row + 1
/// - **East**: col + 1
/// - **West**: col - 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions in table order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Stable index used by the render-state lookup tables
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// The exact reverse of this direction
    ///
    /// # Examples
    ///
    /// ```
    /// use nugget_snake_types::Direction;
    ///
    /// assert_eq!(Direction::East.opposite(), Direction::West);
    /// assert_eq!(Direction::South.opposite(), Direction::North);
    /// ```
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit (row, col) delta of one step in this direction
    pub const fn delta(self) -> (i16, i16) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// True for East and West
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

/// A board coordinate
///
/// Cells handed out by the engine are always normalized into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub row: i16,
    pub col: i16,
}

impl Cell {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }
}

/// The seven nugget classes, ordered by rank
///
/// Rank equals the declaration index. Amethyst is the top rank: the ordered
/// combo is a run that starts at Amethyst and descends one rank per eat down
/// to Gold. Higher rank means a more common and cheaper nugget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NuggetClass {
    Gold,
    Silver,
    Obsidian,
    Ruby,
    Jade,
    Lapis,
    Amethyst,
}

impl NuggetClass {
    pub const ALL: [NuggetClass; NUGGET_CLASS_COUNT] = [
        NuggetClass::Gold,
        NuggetClass::Silver,
        NuggetClass::Obsidian,
        NuggetClass::Ruby,
        NuggetClass::Jade,
        NuggetClass::Lapis,
        NuggetClass::Amethyst,
    ];

    /// First class of an ordered combo
    pub const TOP_RANK: NuggetClass = NuggetClass::Amethyst;

    pub const fn rank(self) -> usize {
        self as usize
    }

    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    /// Parse class from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gold" => Some(NuggetClass::Gold),
            "silver" => Some(NuggetClass::Silver),
            "obsidian" => Some(NuggetClass::Obsidian),
            "ruby" => Some(NuggetClass::Ruby),
            "jade" => Some(NuggetClass::Jade),
            "lapis" => Some(NuggetClass::Lapis),
            "amethyst" => Some(NuggetClass::Amethyst),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NuggetClass::Gold => "Gold",
            NuggetClass::Silver => "Silver",
            NuggetClass::Obsidian => "Obsidian",
            NuggetClass::Ruby => "Ruby",
            NuggetClass::Jade => "Jade",
            NuggetClass::Lapis => "Lapis",
            NuggetClass::Amethyst => "Amethyst",
        }
    }
}

/// Render-state tag of a snake segment
///
/// Derived from the directions to a segment's neighbours. Two-neighbour tags
/// name the head-side neighbour first; corners are shared by both orderings.
/// Carries no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockTag {
    BodyNorthSouth,
    BodySouthNorth,
    BodyWestEast,
    BodyEastWest,
    CornerNorthEast,
    CornerNorthWest,
    CornerSouthEast,
    CornerSouthWest,
    /// Tail block; the head-ward neighbour lies in the named direction.
    TailHeadNorth,
    TailHeadSouth,
    TailHeadEast,
    TailHeadWest,
    /// Head block; the tail-ward neighbour lies in the named direction.
    HeadTailNorth,
    HeadTailSouth,
    HeadTailEast,
    HeadTailWest,
    /// Neighbour of the bitten block after a self-collision.
    Bitten,
    /// The bitten block itself.
    Eaten,
}

/// Logical keys the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
}

impl Key {
    const fn bit(self) -> u8 {
        match self {
            Key::Up => 1 << 0,
            Key::Down => 1 << 1,
            Key::Left => 1 << 2,
            Key::Right => 1 << 3,
            Key::Enter => 1 << 4,
        }
    }
}

/// One frame's worth of key state
///
/// Built by the shell once per update and read by the active scene. Nothing
/// here is buffered across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pressed: u8,
    released: u8,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.released |= key.bit();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed & key.bit() != 0
    }

    pub fn is_released(&self, key: Key) -> bool {
        self.released & key.bit() != 0
    }

    /// Number of arrow keys pressed this frame
    pub fn movement_keys_pressed(&self) -> u32 {
        let mask = Key::Up.bit() | Key::Down.bit() | Key::Left.bit() | Key::Right.bit();
        (self.pressed & mask).count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.pressed == 0 && self.released == 0
    }

    pub fn clear(&mut self) {
        self.pressed = 0;
        self.released = 0;
    }
}

/// Cosmetic snake heroes selectable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hero {
    #[default]
    Itzcoatl,
    MontezumaI,
    Axayactl,
    Tizoc,
    Ahuitzotl,
    MontezumaII,
    Cuitlahuac,
    Cuauhtemoc,
}

impl Hero {
    pub const ALL: [Hero; 8] = [
        Hero::Itzcoatl,
        Hero::MontezumaI,
        Hero::Axayactl,
        Hero::Tizoc,
        Hero::Ahuitzotl,
        Hero::MontezumaII,
        Hero::Cuitlahuac,
        Hero::Cuauhtemoc,
    ];

    /// Next hero, wrapping after the last
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|h| *h == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Hero::Itzcoatl => "Itzcoatl",
            Hero::MontezumaI => "Montezuma I",
            Hero::Axayactl => "Axayactl",
            Hero::Tizoc => "Tizoc",
            Hero::Ahuitzotl => "Ahuitzotl",
            Hero::MontezumaII => "Montezuma II",
            Hero::Cuitlahuac => "Cuitlahuac",
            Hero::Cuauhtemoc => "Cuauhtemoc",
        }
    }

    /// Body colour as (r, g, b)
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Hero::Itzcoatl => (116, 100, 90),
            Hero::MontezumaI => (219, 41, 0),
            Hero::Axayactl => (112, 210, 188),
            Hero::Tizoc => (88, 241, 110),
            Hero::Ahuitzotl => (245, 207, 0),
            Hero::MontezumaII => (224, 17, 95),
            Hero::Cuitlahuac => (245, 207, 0),
            Hero::Cuauhtemoc => (236, 236, 236),
        }
    }
}

/// Identifies a top-level scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Menu,
    Play,
}

/// Short sound effects requested by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    ScoreBeep,
    Click,
}

/// Music sequences requested by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Music {
    Jungle,
    Menu,
}

/// Combo detected on an eat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combo {
    Same3,
    Same6,
    Ordered,
}

impl Combo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combo::Same3 => "same3",
            Combo::Same6 => "same6",
            Combo::Ordered => "ordered",
        }
    }
}

/// Engine-side notification for the presentation layer
///
/// Drained by the shell after each update; audio and HUD collaborators react
/// to these instead of being called from inside the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(Sound),
    MusicStart(Music),
    MusicStop,
    NuggetEaten {
        class: NuggetClass,
        score: u32,
        cell: Cell,
        combo: Option<Combo>,
    },
    GameOver {
        score: u32,
    },
    SceneChanged(SceneId),
}
