//! Grid module - toroidal board arithmetic
//!
//! The board wraps on both axes: stepping off the west edge lands on the east
//! edge of the same row, stepping off the north edge lands on the south edge
//! of the same column. Neighbour resolution understands those wraps.

use crate::types::{Cell, Direction};

/// A fixed-size wrap-around board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
}

impl Board {
    /// Create a board. Dimensions must be non-zero and fit in `i16`.
    pub fn new(width: u16, height: u16) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert!(width <= i16::MAX as u16 && height <= i16::MAX as u16);
        Self { width, height }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as u16) < self.height
            && (cell.col as u16) < self.width
    }

    /// Wrap any coordinate back onto the board
    pub fn normalize(&self, row: i32, col: i32) -> Cell {
        Cell {
            row: row.rem_euclid(self.height as i32) as i16,
            col: col.rem_euclid(self.width as i32) as i16,
        }
    }

    /// Move one cell in `dir`, wrapping at the edges
    pub fn step(&self, cell: Cell, dir: Direction) -> Cell {
        self.step_n(cell, dir, 1)
    }

    /// Move `n` cells in `dir`, wrapping at the edges
    pub fn step_n(&self, cell: Cell, dir: Direction, n: i32) -> Cell {
        let (dr, dc) = dir.delta();
        self.normalize(
            cell.row as i32 + dr as i32 * n,
            cell.col as i32 + dc as i32 * n,
        )
    }

    /// Direction from `from` to its wrapped neighbour `to`
    ///
    /// A raw delta larger than one in magnitude can only come from a wrap, so
    /// it is replaced by a unit step of the opposite sign before lookup. The
    /// two cells must be exactly one step apart; anything else is a logic
    /// error and trips a debug assertion.
    pub fn direction_between(&self, from: Cell, to: Cell) -> Direction {
        let dr = unwrap_delta(to.row as i32 - from.row as i32);
        let dc = unwrap_delta(to.col as i32 - from.col as i32);

        debug_assert!(
            (dr == 0) != (dc == 0),
            "cells ({}, {}) and ({}, {}) are not grid neighbours",
            from.row,
            from.col,
            to.row,
            to.col
        );

        if dr < 0 {
            Direction::North
        } else if dr > 0 {
            Direction::South
        } else if dc > 0 {
            Direction::East
        } else {
            Direction::West
        }
    }

    /// True when `a` and `b` are exactly one wrapped step apart
    pub fn are_neighbours(&self, a: Cell, b: Cell) -> bool {
        Direction::ALL.iter().any(|&d| self.step(a, d) == b)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}

#[inline(always)]
fn unwrap_delta(d: i32) -> i32 {
    if d > 1 {
        -1
    } else if d < -1 {
        1
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_back_returns_to_start_everywhere() {
        let board = Board::new(40, 36);
        for row in 0..36 {
            for col in 0..40 {
                let start = Cell::new(row, col);
                for dir in Direction::ALL {
                    let there = board.step(start, dir);
                    assert!(board.contains(there));
                    assert_eq!(board.step(there, dir.opposite()), start);
                }
            }
        }
    }

    #[test]
    fn test_step_wraps_at_every_edge() {
        let board = Board::new(40, 36);
        assert_eq!(board.step(Cell::new(0, 5), Direction::North), Cell::new(35, 5));
        assert_eq!(board.step(Cell::new(35, 5), Direction::South), Cell::new(0, 5));
        assert_eq!(board.step(Cell::new(7, 0), Direction::West), Cell::new(7, 39));
        assert_eq!(board.step(Cell::new(7, 39), Direction::East), Cell::new(7, 0));
    }

    #[test]
    fn test_direction_between_plain_neighbours() {
        let board = Board::new(40, 36);
        let c = Cell::new(10, 10);
        assert_eq!(board.direction_between(c, Cell::new(9, 10)), Direction::North);
        assert_eq!(board.direction_between(c, Cell::new(11, 10)), Direction::South);
        assert_eq!(board.direction_between(c, Cell::new(10, 11)), Direction::East);
        assert_eq!(board.direction_between(c, Cell::new(10, 9)), Direction::West);
    }

    #[test]
    fn test_direction_between_wrapped_neighbours() {
        let board = Board::new(40, 36);
        assert_eq!(
            board.direction_between(Cell::new(0, 3), Cell::new(35, 3)),
            Direction::North
        );
        assert_eq!(
            board.direction_between(Cell::new(35, 3), Cell::new(0, 3)),
            Direction::South
        );
        assert_eq!(
            board.direction_between(Cell::new(4, 0), Cell::new(4, 39)),
            Direction::West
        );
        assert_eq!(
            board.direction_between(Cell::new(4, 39), Cell::new(4, 0)),
            Direction::East
        );
    }

    #[test]
    fn test_direction_between_agrees_with_step_for_all_cells() {
        let board = Board::new(9, 7);
        for row in 0..7 {
            for col in 0..9 {
                let c = Cell::new(row, col);
                for dir in Direction::ALL {
                    assert_eq!(board.direction_between(c, board.step(c, dir)), dir);
                }
            }
        }
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_direction_between_rejects_diagonals() {
        let board = Board::new(40, 36);
        board.direction_between(Cell::new(5, 5), Cell::new(6, 6));
    }

    #[test]
    fn test_normalize_handles_far_negative_coordinates() {
        let board = Board::new(40, 36);
        assert_eq!(board.normalize(-1, -1), Cell::new(35, 39));
        assert_eq!(board.normalize(-73, 81), Cell::new(35, 1));
    }
}
