//! Item spawner - the nugget pool
//!
//! Nuggets live in a fixed array of slots. A slot is either alive or free;
//! killing a nugget frees its slot for the next spawn.

use rand::Rng;

use crate::config::GameConfig;
use crate::grid::Board;
use crate::rng::{draw_cell, draw_class};
use crate::snake::Snake;
use crate::types::{Cell, NuggetClass, MAX_NUGGET_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nugget {
    pub class: NuggetClass,
    pub cell: Cell,
    pub alive: bool,
}

impl Default for Nugget {
    fn default() -> Self {
        Self {
            class: NuggetClass::Gold,
            cell: Cell::default(),
            alive: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NuggetPool {
    slots: [Nugget; MAX_NUGGET_CAPACITY],
    alive_count: usize,
}

impl Default for NuggetPool {
    fn default() -> Self {
        Self::new()
    }
}

impl NuggetPool {
    pub fn new() -> Self {
        Self {
            slots: [Nugget::default(); MAX_NUGGET_CAPACITY],
            alive_count: 0,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    pub fn get(&self, slot: usize) -> Option<&Nugget> {
        self.slots.get(slot).filter(|n| n.alive)
    }

    /// Alive nuggets with their slot index, in pool order
    pub fn alive(&self) -> impl Iterator<Item = (usize, &Nugget)> + '_ {
        self.slots.iter().enumerate().filter(|(_, n)| n.alive)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.slots.iter().any(|n| n.alive && n.cell == cell)
    }

    /// Free a slot; returns the nugget that was there
    pub fn kill(&mut self, slot: usize) -> Option<Nugget> {
        let nugget = self.slots.get_mut(slot).filter(|n| n.alive)?;
        nugget.alive = false;
        self.alive_count -= 1;
        Some(*nugget)
    }

    pub fn clear(&mut self) {
        for n in self.slots.iter_mut() {
            n.alive = false;
        }
        self.alive_count = 0;
    }

    /// Spawn one nugget if the population is below target.
    ///
    /// Returns false when the target is met, the pool is full or no free cell
    /// was found within `placement_attempts` draws.
    pub fn try_spawn_one<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &Board,
        snake: &Snake,
        config: &GameConfig,
    ) -> bool {
        let target = config.nugget_population.min(MAX_NUGGET_CAPACITY);
        if self.alive_count >= target {
            return false;
        }
        let Some(slot) = self.slots.iter().position(|n| !n.alive) else {
            return false;
        };

        let class = draw_class(rng, &config.classes);
        let head = snake.head();
        let horizontal = snake.direction().is_horizontal();

        for _ in 0..config.placement_attempts {
            let cell = draw_cell(rng, board);
            if is_on_travel_axis(cell, head, horizontal) {
                continue;
            }
            if self.is_occupied(cell) || snake.occupies(cell) {
                continue;
            }
            self.slots[slot] = Nugget {
                class,
                cell,
                alive: true,
            };
            self.alive_count += 1;
            return true;
        }

        log::debug!(
            "no free cell for a {} nugget after {} attempts",
            class.name(),
            config.placement_attempts
        );
        false
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, class: NuggetClass, cell: Cell) -> usize {
        let slot = self
            .slots
            .iter()
            .position(|n| !n.alive)
            .expect("pool has a free slot");
        self.slots[slot] = Nugget {
            class,
            cell,
            alive: true,
        };
        self.alive_count += 1;
        slot
    }
}

/// A nugget on the head's row (or column) would be eaten without any steering.
fn is_on_travel_axis(cell: Cell, head: Cell, horizontal: bool) -> bool {
    if horizontal {
        cell.row == head.row
    } else {
        cell.col == head.col
    }
}
