use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A grid-aligned position, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move point by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move point one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction, block_size: i32) -> Self {
        let (dx, dy) = direction.delta(block_size);
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Point>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with the head at `head` and `length - 1` segments
    /// trailing directly behind it
    pub fn new(head: Point, direction: Direction, length: usize, block_size: i32) -> Self {
        let (dx, dy) = direction.delta(block_size);
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Point {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Point] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Point) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn contains(&self, pos: Point) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head. The snake is one segment longer until
    /// [`Snake::drop_tail`] is called.
    pub fn push_head(&mut self, head: Point) {
        self.body.insert(0, head);
    }

    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Reason an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake left the field
    Wall,
    /// Snake ran into its own body
    SelfCollision,
    /// Snake went too long without eating
    Timeout,
}

/// Complete game state
///
/// Mutated only by [`super::SnakeGameAI`]; frontends read it through a shared
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only when the snake fills every cell
    pub food: Option<Point>,
    pub width: i32,
    pub height: i32,
    pub block_size: i32,
    pub score: u32,
    pub frame_iteration: u32,
    pub game_over: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Point>, width: i32, height: i32, block_size: i32) -> Self {
        Self {
            snake,
            food,
            width,
            height,
            block_size,
            score: 0,
            frame_iteration: 0,
            game_over: false,
        }
    }

    /// Check if a point lies on the field: both coordinates in
    /// `[0, dimension - block_size]`
    pub fn is_in_bounds(&self, pos: Point) -> bool {
        pos.x >= 0
            && pos.x <= self.width - self.block_size
            && pos.y >= 0
            && pos.y <= self.height - self.block_size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Point) -> bool {
        self.snake.contains(pos)
    }

    /// Wall or body collision at `point`. Only segments after the head count,
    /// so the head never collides with itself.
    pub fn collision_at(&self, pos: Point) -> Option<CollisionType> {
        if !self.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    pub fn grid_width(&self) -> i32 {
        self.width / self.block_size
    }

    pub fn grid_height(&self) -> i32 {
        self.height / self.block_size
    }

    /// Convert a pixel position to (column, row) cell coordinates
    pub fn cell_of(&self, pos: Point) -> (i32, i32) {
        (pos.x / self.block_size, pos.y / self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_movement() {
        let pos = Point::new(100, 100);
        assert_eq!(pos.moved_by(20, 0), Point::new(120, 100));
        assert_eq!(pos.moved_in_direction(Direction::Left, 20), Point::new(80, 100));
        assert_eq!(pos.moved_in_direction(Direction::Down, 20), Point::new(100, 120));
        assert_eq!(pos.moved_in_direction(Direction::Up, 20), Point::new(100, 80));
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(60, -40);
        assert_eq!(a.manhattan_distance(b), 100);
        assert_eq!(b.manhattan_distance(a), 100);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Point::new(320, 240), Direction::Right, 3, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(320, 240));
        assert_eq!(snake.body[1], Point::new(300, 240));
        assert_eq!(snake.tail(), Point::new(280, 240));
    }

    #[test]
    fn test_snake_push_and_drop() {
        let mut snake = Snake::new(Point::new(100, 100), Direction::Right, 3, 20);

        snake.push_head(Point::new(120, 100));
        assert_eq!(snake.len(), 4);
        snake.drop_tail();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(120, 100));
        assert_eq!(snake.tail(), Point::new(80, 100));
    }

    #[test]
    fn test_single_segment_never_drops_head() {
        let mut snake = Snake::new(Point::new(100, 100), Direction::Up, 1, 20);
        snake.drop_tail();
        assert_eq!(snake.len(), 1);
        assert!(!snake.collides_with_body(snake.head()));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Point::new(100, 100), Direction::Right, 3, 20);
        assert!(!snake.collides_with_body(Point::new(100, 100))); // head
        assert!(snake.collides_with_body(Point::new(80, 100))); // body
        assert!(!snake.collides_with_body(Point::new(200, 200))); // empty
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Point::new(100, 100), Direction::Right, 3, 20),
            Some(Point::new(200, 200)),
            640,
            480,
            20,
        );

        assert!(state.is_in_bounds(Point::new(0, 0)));
        assert!(state.is_in_bounds(Point::new(620, 460)));
        assert!(!state.is_in_bounds(Point::new(-20, 0)));
        assert!(!state.is_in_bounds(Point::new(640, 0)));
        assert!(!state.is_in_bounds(Point::new(0, 480)));
        assert_eq!(state.cell_of(Point::new(620, 460)), (31, 23));
    }
}
