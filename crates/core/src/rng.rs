//! RNG module - seeded draws for nugget placement
//!
//! The engine is generic over any [`rand::Rng`]. Games built with a seed use
//! [`StdRng`], so the same seed and the same input replay the same game.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::NuggetClassSpec;
use crate::grid::Board;
use crate::types::{Cell, NuggetClass, NUGGET_CLASS_COUNT};

/// Deterministic RNG for the given seed
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Pick a nugget class from the cumulative spawn thresholds.
///
/// Draws `choice` uniformly from `0..=last_threshold` and returns the first
/// class whose threshold is at least `choice`.
pub fn draw_class<R: Rng + ?Sized>(
    rng: &mut R,
    classes: &[NuggetClassSpec; NUGGET_CLASS_COUNT],
) -> NuggetClass {
    let last = classes[NUGGET_CLASS_COUNT - 1].spawn_threshold;
    let choice = rng.gen_range(0..=last);
    class_for_choice(classes, choice)
}

pub(crate) fn class_for_choice(
    classes: &[NuggetClassSpec; NUGGET_CLASS_COUNT],
    choice: u32,
) -> NuggetClass {
    classes
        .iter()
        .position(|c| c.spawn_threshold >= choice)
        .and_then(NuggetClass::from_rank)
        .unwrap_or(NuggetClass::TOP_RANK)
}

/// Uniform cell on the board
pub fn draw_cell<R: Rng + ?Sized>(rng: &mut R, board: &Board) -> Cell {
    Cell::new(
        rng.gen_range(0..board.height() as i16),
        rng.gen_range(0..board.width() as i16),
    )
}
