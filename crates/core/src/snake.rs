//! Snake body engine
//!
//! Segments live in a fixed-capacity `ArrayVec` with the head at index 0.
//! Only the head position is authoritative; every other segment follows the
//! one in front of it on each step. Growth is queued as credits and applied
//! at most one segment per step.

use arrayvec::ArrayVec;

use crate::grid::Board;
use crate::types::{BlockTag, Cell, Direction, MAX_SNAKE_CAPACITY};

/// Index of the head segment
pub const HEAD: usize = 0;

/// Render tag for a body block, indexed `[head_dir][tail_dir]`.
///
/// The diagonal is impossible (both neighbours on the same side) and maps to `None`.
const BODY_TAGS: [[Option<BlockTag>; 4]; 4] = [
    // head neighbour NORTH
    [
        None,
        Some(BlockTag::BodyNorthSouth),
        Some(BlockTag::CornerNorthEast),
        Some(BlockTag::CornerNorthWest),
    ],
    // head neighbour SOUTH
    [
        Some(BlockTag::BodySouthNorth),
        None,
        Some(BlockTag::CornerSouthEast),
        Some(BlockTag::CornerSouthWest),
    ],
    // head neighbour EAST
    [
        Some(BlockTag::CornerNorthEast),
        Some(BlockTag::CornerSouthEast),
        None,
        Some(BlockTag::BodyEastWest),
    ],
    // head neighbour WEST
    [
        Some(BlockTag::CornerNorthWest),
        Some(BlockTag::CornerSouthWest),
        Some(BlockTag::BodyWestEast),
        None,
    ],
];

/// Render tag for the head, indexed by the direction to its tail-ward neighbour.
const HEAD_TAGS: [BlockTag; 4] = [
    BlockTag::HeadTailNorth,
    BlockTag::HeadTailSouth,
    BlockTag::HeadTailEast,
    BlockTag::HeadTailWest,
];

/// Render tag for the tail, indexed by the direction to its head-ward neighbour.
const TAIL_TAGS: [BlockTag; 4] = [
    BlockTag::TailHeadNorth,
    BlockTag::TailHeadSouth,
    BlockTag::TailHeadEast,
    BlockTag::TailHeadWest,
];

/// One block of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub cell: Cell,
    /// Direction this block is travelling in.
    pub facing: Direction,
    pub tag: BlockTag,
}

#[derive(Debug, Clone)]
pub struct Snake {
    segments: ArrayVec<Segment, MAX_SNAKE_CAPACITY>,
    max_length: usize,
    current_direction: Direction,
    /// Input latch, applied at the next step.
    next_direction: Direction,
    pending_growth: u32,
}

impl Snake {
    /// Create a baby snake with its head on `spawn`, facing `direction`.
    ///
    /// The body is laid out behind the head, opposite to the travel direction.
    pub fn new(
        board: &Board,
        spawn: Cell,
        direction: Direction,
        baby_length: usize,
        max_length: usize,
    ) -> Self {
        let max_length = max_length.min(MAX_SNAKE_CAPACITY);
        let mut snake = Self {
            segments: ArrayVec::new(),
            max_length,
            current_direction: direction,
            next_direction: direction,
            pending_growth: 0,
        };
        snake.initialize(board, spawn, baby_length);
        snake
    }

    /// Reset to a baby snake at `spawn`, keeping the configured direction.
    pub fn initialize(&mut self, board: &Board, spawn: Cell, baby_length: usize) {
        debug_assert!(baby_length >= 2, "a snake needs a head and a tail");
        let length = baby_length.clamp(2, self.max_length.max(2));
        let behind = self.current_direction.opposite();

        self.segments.clear();
        self.pending_growth = 0;
        self.next_direction = self.current_direction;
        for i in 0..length {
            self.segments.push(Segment {
                cell: board.step_n(spawn, behind, i as i32),
                facing: self.current_direction,
                tag: BlockTag::BodyWestEast,
            });
        }
        self.derive_render_states(board);
    }

    pub fn head(&self) -> Cell {
        self.segments[HEAD].cell
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Direction used by the last step
    pub fn direction(&self) -> Direction {
        self.current_direction
    }

    /// Direction the next step will use
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Latch a direction for the next step.
    ///
    /// The exact reverse of the current travel direction is refused, since
    /// the head would immediately run into the neck.
    pub fn set_next_direction(&mut self, dir: Direction) -> bool {
        if dir == self.current_direction.opposite() {
            return false;
        }
        self.next_direction = dir;
        true
    }

    /// Queue `n` growth credits; they are applied one per step.
    pub fn queue_growth(&mut self, n: u32) {
        self.pending_growth = self.pending_growth.saturating_add(n);
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.iter().any(|s| s.cell == cell)
    }

    /// Advance the snake by one cell
    pub fn step(&mut self, board: &Board) {
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
            // The new tail starts where the old tail is; the shift below
            // then leaves it there while the old tail moves forward.
            if self.segments.len() < self.max_length {
                if let Some(&tail) = self.segments.last() {
                    self.segments.push(tail);
                }
            }
        }

        for i in (HEAD + 1..self.segments.len()).rev() {
            self.segments[i].cell = self.segments[i - 1].cell;
        }

        self.current_direction = self.next_direction;
        let head = &mut self.segments[HEAD];
        head.cell = board.step(head.cell, self.current_direction);

        self.derive_render_states(board);
    }

    /// Recompute `facing` and `tag` of every segment from neighbour adjacency
    pub fn derive_render_states(&mut self, board: &Board) {
        let len = self.segments.len();
        if len < 2 {
            return;
        }

        let tail_dir = board.direction_between(self.segments[HEAD].cell, self.segments[HEAD + 1].cell);
        let head = &mut self.segments[HEAD];
        head.tag = HEAD_TAGS[tail_dir.index()];
        head.facing = self.current_direction;

        for i in HEAD + 1..len - 1 {
            let cell = self.segments[i].cell;
            let head_dir = board.direction_between(cell, self.segments[i - 1].cell);
            let tail_dir = board.direction_between(cell, self.segments[i + 1].cell);
            let tag = BODY_TAGS[head_dir.index()][tail_dir.index()];
            debug_assert!(tag.is_some(), "segment {i} folds back onto itself");

            let seg = &mut self.segments[i];
            // A folded body (only possible on a self-collision) keeps a straight tag.
            seg.tag = tag.unwrap_or(straight_tag(head_dir));
            seg.facing = head_dir;
        }

        let last = len - 1;
        let head_dir = board.direction_between(self.segments[last].cell, self.segments[last - 1].cell);
        let tail = &mut self.segments[last];
        tail.tag = TAIL_TAGS[head_dir.index()];
        tail.facing = head_dir;
    }

    /// Mark the block at `index` as bitten off; its neighbours bleed.
    ///
    /// Cosmetic only. The head is never re-tagged.
    pub fn mark_bitten(&mut self, index: usize) {
        let len = self.segments.len();
        if index <= HEAD || index >= len {
            debug_assert!(false, "bitten segment {index} out of range 1..{len}");
            return;
        }
        self.segments[index].tag = BlockTag::Eaten;
        if index - 1 > HEAD {
            self.segments[index - 1].tag = BlockTag::Bitten;
        }
        if index + 1 < len {
            self.segments[index + 1].tag = BlockTag::Bitten;
        }
    }

    /// Index of the first non-head segment sharing the head cell
    pub fn self_collision(&self) -> Option<usize> {
        let head = self.head();
        self.segments
            .iter()
            .enumerate()
            .skip(HEAD + 1)
            .find(|(_, s)| s.cell == head)
            .map(|(i, _)| i)
    }

    #[cfg(test)]
    pub(crate) fn segments_mut(&mut self) -> &mut ArrayVec<Segment, MAX_SNAKE_CAPACITY> {
        &mut self.segments
    }
}

fn straight_tag(head_dir: Direction) -> BlockTag {
    match head_dir {
        Direction::North => BlockTag::BodyNorthSouth,
        Direction::South => BlockTag::BodySouthNorth,
        Direction::East => BlockTag::BodyEastWest,
        Direction::West => BlockTag::BodyWestEast,
    }
}
