//! Game configuration
//!
//! All tuning lives in [`GameConfig`]. Defaults come from the constants in the
//! types crate; any subset of fields can be overridden from JSON because every
//! field falls back to its default when absent.

use std::fmt;

use serde::Deserialize;

use crate::types::*;

/// Per-class tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NuggetClassSpec {
    /// Base score awarded before combo and speed multipliers.
    pub score: u32,
    /// Cumulative spawn threshold; must be ascending across classes.
    pub spawn_threshold: u32,
}

/// Default class table (score, cumulative spawn threshold), indexed by rank.
pub const DEFAULT_CLASSES: [NuggetClassSpec; NUGGET_CLASS_COUNT] = [
    NuggetClassSpec { score: 70, spawn_threshold: 10 },
    NuggetClassSpec { score: 60, spawn_threshold: 20 },
    NuggetClassSpec { score: 50, spawn_threshold: 30 },
    NuggetClassSpec { score: 40, spawn_threshold: 40 },
    NuggetClassSpec { score: 30, spawn_threshold: 50 },
    NuggetClassSpec { score: 20, spawn_threshold: 70 },
    NuggetClassSpec { score: 10, spawn_threshold: 100 },
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_width: u16,
    pub board_height: u16,
    pub max_snake_length: usize,
    pub baby_snake_length: usize,
    pub head_spawn: Cell,
    pub initial_direction: Direction,
    pub step_period_ms: u32,
    pub speed_bonus_cooldown_ms: u32,
    pub speed_bonus_table: [u32; 8],
    pub same3_bonus: u32,
    pub same6_bonus: u32,
    pub order_bonus: u32,
    pub nugget_population: usize,
    pub growths_per_nugget: u32,
    pub game_over_period_ms: u32,
    pub score_popup_lifetime_ms: u32,
    pub placement_attempts: u32,
    pub classes: [NuggetClassSpec; NUGGET_CLASS_COUNT],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            max_snake_length: MAX_SNAKE_CAPACITY,
            baby_snake_length: BABY_SNAKE_LENGTH,
            head_spawn: Cell::new(SNAKE_HEAD_SPAWN_ROW, SNAKE_HEAD_SPAWN_COL),
            initial_direction: Direction::West,
            step_period_ms: STEP_PERIOD_MS,
            speed_bonus_cooldown_ms: SPEED_BONUS_COOLDOWN_MS,
            speed_bonus_table: SPEED_BONUS_TABLE,
            same3_bonus: SAME3_COMBO_BONUS,
            same6_bonus: SAME6_COMBO_BONUS,
            order_bonus: ORDER_COMBO_BONUS,
            nugget_population: NUGGET_POPULATION,
            growths_per_nugget: GROWTHS_PER_NUGGET,
            game_over_period_ms: GAME_OVER_PERIOD_MS,
            score_popup_lifetime_ms: SCORE_POPUP_LIFETIME_MS,
            placement_attempts: PLACEMENT_ATTEMPTS,
            classes: DEFAULT_CLASSES,
        }
    }
}

impl GameConfig {
    pub fn class(&self, class: NuggetClass) -> &NuggetClassSpec {
        &self.classes[class.rank()]
    }

    /// Check that the configuration can run without violating engine invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max_dim = i16::MAX as u16;
        if self.board_width == 0
            || self.board_height == 0
            || self.board_width > max_dim
            || self.board_height > max_dim
        {
            return Err(ConfigError::BoardSize {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.max_snake_length > MAX_SNAKE_CAPACITY {
            return Err(ConfigError::MaxLength(self.max_snake_length));
        }
        if self.baby_snake_length < 2 || self.baby_snake_length > self.max_snake_length {
            return Err(ConfigError::BabyLength(self.baby_snake_length));
        }
        // The baby body is laid out in a straight line along the initial
        // direction; a shorter axis would wrap it onto itself.
        let extent = if self.initial_direction.is_horizontal() {
            self.board_width
        } else {
            self.board_height
        };
        if self.baby_snake_length > extent as usize {
            return Err(ConfigError::SpawnAxis {
                extent,
                baby_length: self.baby_snake_length,
            });
        }
        let spawn = self.head_spawn;
        if spawn.row < 0
            || spawn.col < 0
            || spawn.row >= self.board_height as i16
            || spawn.col >= self.board_width as i16
        {
            return Err(ConfigError::HeadSpawn(spawn));
        }
        if self.nugget_population > MAX_NUGGET_CAPACITY {
            return Err(ConfigError::Population(self.nugget_population));
        }
        if self.step_period_ms == 0 {
            return Err(ConfigError::StepPeriod);
        }
        if self
            .classes
            .windows(2)
            .any(|w| w[1].spawn_threshold <= w[0].spawn_threshold)
        {
            return Err(ConfigError::SpawnThresholds);
        }
        Ok(())
    }
}

/// Reasons a [`GameConfig`] is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    BoardSize { width: u16, height: u16 },
    MaxLength(usize),
    BabyLength(usize),
    SpawnAxis { extent: u16, baby_length: usize },
    HeadSpawn(Cell),
    Population(usize),
    StepPeriod,
    SpawnThresholds,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSize { width, height } => {
                write!(f, "board size {width}x{height} is out of range")
            }
            ConfigError::MaxLength(len) => write!(
                f,
                "max snake length {len} exceeds capacity {MAX_SNAKE_CAPACITY}"
            ),
            ConfigError::BabyLength(len) => {
                write!(f, "baby snake length {len} must be at least 2 and fit the board and max length")
            }
            ConfigError::SpawnAxis {
                extent,
                baby_length,
            } => write!(
                f,
                "board is {extent} cells along the initial direction, too short for a baby snake of {baby_length}"
            ),
            ConfigError::HeadSpawn(cell) => {
                write!(f, "head spawn ({}, {}) is off the board", cell.row, cell.col)
            }
            ConfigError::Population(n) => write!(
                f,
                "nugget population {n} exceeds pool capacity {MAX_NUGGET_CAPACITY}"
            ),
            ConfigError::StepPeriod => write!(f, "step period must be non-zero"),
            ConfigError::SpawnThresholds => {
                write!(f, "spawn thresholds must be strictly ascending")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
