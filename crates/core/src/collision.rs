//! Collision resolver
//!
//! Pure queries against the head cell; the play scene decides what happens.

use crate::snake::Snake;
use crate::spawner::{Nugget, NuggetPool};

/// First alive nugget (pool order) under the head
pub fn check_item_collision(snake: &Snake, pool: &NuggetPool) -> Option<(usize, Nugget)> {
    let head = snake.head();
    pool.alive()
        .find(|(_, n)| n.cell == head)
        .map(|(slot, n)| (slot, *n))
}

/// Index of the first body segment under the head
pub fn check_self_collision(snake: &Snake) -> Option<usize> {
    snake.self_collision()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Board;
    use crate::types::{Cell, Direction, NuggetClass};

    #[test]
    fn test_item_under_head_is_found() {
        let board = Board::default();
        let snake = Snake::new(&board, Cell::new(5, 5), Direction::West, 4, 400);
        let mut pool = NuggetPool::new();
        pool.place(NuggetClass::Jade, Cell::new(9, 9));
        assert!(check_item_collision(&snake, &pool).is_none());

        let slot = pool.place(NuggetClass::Lapis, Cell::new(5, 5));
        let (hit, nugget) = check_item_collision(&snake, &pool).unwrap();
        assert_eq!(hit, slot);
        assert_eq!(nugget.class, NuggetClass::Lapis);
    }

    #[test]
    fn test_body_over_item_is_not_a_hit() {
        let board = Board::default();
        let snake = Snake::new(&board, Cell::new(5, 5), Direction::West, 4, 400);
        let mut pool = NuggetPool::new();
        pool.place(NuggetClass::Gold, Cell::new(5, 6));
        assert!(check_item_collision(&snake, &pool).is_none());
    }

    #[test]
    fn test_dead_item_is_ignored() {
        let board = Board::default();
        let snake = Snake::new(&board, Cell::new(5, 5), Direction::West, 4, 400);
        let mut pool = NuggetPool::new();
        let slot = pool.place(NuggetClass::Gold, Cell::new(5, 5));
        pool.kill(slot);
        assert!(check_item_collision(&snake, &pool).is_none());
    }

    #[test]
    fn test_self_collision_after_tight_loop() {
        let board = Board::default();
        let mut snake = Snake::new(&board, Cell::new(5, 5), Direction::West, 5, 400);
        assert_eq!(check_self_collision(&snake), None);

        for dir in [Direction::South, Direction::East, Direction::North] {
            snake.set_next_direction(dir);
            snake.step(&board);
        }
        // head (5,6) lands on the tail block
        assert_eq!(snake.head(), Cell::new(5, 6));
        assert_eq!(check_self_collision(&snake), Some(4));
    }
}
