//! Scoring module - combo detection and speed bonus
//!
//! Every eat runs through [`ScoringEngine::on_eat`]:
//!
//! 1. The class is appended to a short eat history.
//! 2. The history is pruned from the front until a combo is still reachable.
//! 3. Same-3, same-6 and ordered combos are detected; at most one can match.
//! 4. The speed bonus escalates while eats keep landing inside the cooldown.
//!
//! Final score: `round(base * combo * (100 + speed_percent) / 100)`.
//!
//! A same-3 run only pays once it is closed by a different class
//! (`[G, G, G, X]`), so the closing eat is the one that gets the multiplier.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::types::{Combo, NuggetClass, LONGEST_POSSIBLE_COMBO, NUGGET_CLASS_COUNT, SPEED_BAR_STATES};

/// Recently eaten classes, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EatHistory {
    entries: ArrayVec<NuggetClass, LONGEST_POSSIBLE_COMBO>,
}

impl EatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[NuggetClass] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, class: NuggetClass) {
        debug_assert!(!self.entries.is_full(), "eat history overflow");
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(class);
    }

    /// Drop oldest entries until a same-class or ordered combo can still be completed.
    pub fn prune(&mut self) {
        while self.entries.len() > 1
            && !same_combo_possible(&self.entries)
            && !order_combo_possible(&self.entries)
        {
            self.entries.remove(0);
        }
    }
}

/// A same-class run can still be completed.
///
/// The newest entry is exempt from the run check: it may be the different
/// class that closes a same-3.
pub fn same_combo_possible(history: &[NuggetClass]) -> bool {
    match history.len() {
        0 | 1 => true,
        2 => history[0] == history[1],
        n => history[1..n - 1].iter().all(|&c| c == history[0]),
    }
}

/// The history is a strict descending run from the top rank so far.
pub fn order_combo_possible(history: &[NuggetClass]) -> bool {
    let top = NuggetClass::TOP_RANK.rank();
    history
        .iter()
        .enumerate()
        .all(|(i, c)| i <= top && c.rank() == top - i)
}

pub fn is_same3_combo(history: &[NuggetClass]) -> bool {
    let len = history.len();
    if !(4..=5).contains(&len) {
        return false;
    }
    let run = history.iter().take_while(|&&c| c == history[0]).count();
    (3..len).contains(&run)
}

pub fn is_same6_combo(history: &[NuggetClass]) -> bool {
    history.len() >= 6 && history[1..6].iter().all(|&c| c == history[0])
}

pub fn is_order_combo(history: &[NuggetClass]) -> bool {
    history.len() >= NUGGET_CLASS_COUNT
        && order_combo_possible(&history[..NUGGET_CLASS_COUNT])
}

/// The single combo matched by `history`, if any
pub fn detect_combo(history: &[NuggetClass]) -> Option<Combo> {
    let same3 = is_same3_combo(history);
    let same6 = is_same6_combo(history);
    let ordered = is_order_combo(history);
    debug_assert!(
        (same3 as u8 + same6 as u8 + ordered as u8) <= 1,
        "overlapping combos for {history:?}"
    );

    if ordered {
        Some(Combo::Ordered)
    } else if same6 {
        Some(Combo::Same6)
    } else if same3 {
        Some(Combo::Same3)
    } else {
        None
    }
}

/// Speed bonus cooldown and escalation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpeedBonus {
    /// Counts down from the cooldown after every eat; may go negative.
    pub clock_ms: i32,
    pub table_index: usize,
    /// Percent awarded by the last eat, zeroed once the clock lapses.
    pub current_percent: u32,
}

impl SpeedBonus {
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.clock_ms = self
            .clock_ms
            .saturating_sub(elapsed_ms.min(i32::MAX as u32) as i32);
        if self.clock_ms <= 0 {
            self.current_percent = 0;
        }
    }

    /// Bonus percent for an eat happening now; restarts the cooldown.
    pub fn on_eat(&mut self, config: &GameConfig) -> u32 {
        let table = &config.speed_bonus_table;
        let percent = if self.clock_ms > 0 {
            let p = table[self.table_index];
            self.table_index = (self.table_index + 1).min(table.len() - 1);
            p
        } else {
            self.table_index = 0;
            0
        };
        self.clock_ms = config.speed_bonus_cooldown_ms.min(i32::MAX as u32) as i32;
        self.current_percent = percent;
        percent
    }

    /// HUD bar level in `0..SPEED_BAR_STATES`
    pub fn bar_level(&self, cooldown_ms: u32) -> u32 {
        if self.clock_ms <= 0 {
            return 0;
        }
        let per_state = (cooldown_ms / (SPEED_BAR_STATES - 1)).max(1);
        (self.clock_ms as u32)
            .div_ceil(per_state)
            .min(SPEED_BAR_STATES - 1)
    }
}

/// Breakdown of one eat's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EatScore {
    pub base: u32,
    pub combo: Option<Combo>,
    pub combo_multiplier: u32,
    pub speed_percent: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    history: EatHistory,
    speed: SpeedBonus,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.speed = SpeedBonus::default();
    }

    pub fn history(&self) -> &EatHistory {
        &self.history
    }

    pub fn speed(&self) -> &SpeedBonus {
        &self.speed
    }

    /// Count the speed clock down
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.speed.tick(elapsed_ms);
    }

    pub fn speed_percent(&self) -> u32 {
        self.speed.current_percent
    }

    pub fn speed_bar_level(&self, config: &GameConfig) -> u32 {
        self.speed.bar_level(config.speed_bonus_cooldown_ms)
    }

    pub fn on_eat(&mut self, class: NuggetClass, config: &GameConfig) -> EatScore {
        self.history.push(class);
        self.history.prune();

        let combo = detect_combo(self.history.as_slice());
        let combo_multiplier = match combo {
            Some(Combo::Same3) => config.same3_bonus,
            Some(Combo::Same6) => config.same6_bonus,
            Some(Combo::Ordered) => config.order_bonus,
            None => 1,
        };
        if combo.is_some() {
            self.history.clear();
        }

        let speed_percent = self.speed.on_eat(config);
        let base = config.class(class).score;
        let total = final_score(base, combo_multiplier, speed_percent);

        EatScore {
            base,
            combo,
            combo_multiplier,
            speed_percent,
            total,
        }
    }
}

/// `round(base * combo * (100 + percent) / 100)`, half up
pub fn final_score(base: u32, combo_multiplier: u32, speed_percent: u32) -> u32 {
    let scaled = base as u64 * combo_multiplier as u64 * (100 + speed_percent as u64);
    ((scaled + 50) / 100).min(u32::MAX as u64) as u32
}
