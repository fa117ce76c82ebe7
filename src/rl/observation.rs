use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::game::{Direction, GameState};

/// Length of the feature vector produced by [`create_observation`]
pub const OBSERVATION_SIZE: usize = 11;

/// Create the 11-feature observation tensor from game state
///
/// Features, each 0.0 or 1.0:
/// - 0..3: danger one cell ahead when going straight, turning right, turning left
/// - 3..7: current direction is left, right, up, down
/// - 7..11: food is left of, right of, above, below the head
///
/// Returns: Tensor<B, 1> with shape [11]
pub fn create_observation<B: Backend>(state: &GameState, device: &B::Device) -> Tensor<B, 1> {
    let data = observation_features(state);
    Tensor::<B, 1>::from_data(TensorData::new(data.to_vec(), [OBSERVATION_SIZE]), device)
}

/// Backend-independent form of the observation
pub fn observation_features(state: &GameState) -> [f32; OBSERVATION_SIZE] {
    let head = state.snake.head();
    let dir = state.snake.direction;
    let danger = |d: Direction| {
        let next = head.moved_in_direction(d, state.block_size);
        state.collision_at(next).is_some()
    };

    let (food_left, food_right, food_up, food_down) = match state.food {
        Some(food) => (
            food.x < head.x,
            food.x > head.x,
            food.y < head.y,
            food.y > head.y,
        ),
        None => (false, false, false, false),
    };

    let flags = [
        danger(dir),
        danger(dir.clockwise()),
        danger(dir.counter_clockwise()),
        dir == Direction::Left,
        dir == Direction::Right,
        dir == Direction::Up,
        dir == Direction::Down,
        food_left,
        food_right,
        food_up,
        food_down,
    ];

    flags.map(|flag| if flag { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Point, Snake};
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    type TestBackend = NdArray<f32>;

    fn state_with(snake: Snake, food: Option<Point>) -> GameState {
        GameState::new(snake, food, 200, 200, 20)
    }

    #[test]
    fn test_observation_shape() {
        let device = NdArrayDevice::default();
        let snake = Snake::new(Point::new(100, 100), Direction::Right, 3, 20);
        let state = state_with(snake, Some(Point::new(40, 40)));

        let obs = create_observation::<TestBackend>(&state, &device);

        assert_eq!(obs.shape().dims, [OBSERVATION_SIZE]);
    }

    #[test]
    fn test_open_field_has_no_danger() {
        let snake = Snake::new(Point::new(100, 100), Direction::Right, 3, 20);
        let features = observation_features(&state_with(snake, Some(Point::new(160, 40))));

        assert_eq!(&features[0..3], &[0.0, 0.0, 0.0]);
        // Heading right
        assert_eq!(&features[3..7], &[0.0, 1.0, 0.0, 0.0]);
        // Food is right of and above the head
        assert_eq!(&features[7..11], &[0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_wall_danger_is_relative_to_heading() {
        // Heading up along the left wall: straight is open, a left turn hits the wall
        let snake = Snake::new(Point::new(0, 100), Direction::Up, 3, 20);
        let features = observation_features(&state_with(snake, None));

        assert_eq!(&features[0..3], &[0.0, 0.0, 1.0]);
        assert_eq!(&features[3..7], &[0.0, 0.0, 1.0, 0.0]);
        assert_eq!(&features[7..11], &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_body_danger() {
        // Head at (100,100) heading down with the body curling to its right
        let snake = Snake {
            body: vec![
                Point::new(100, 100),
                Point::new(100, 80),
                Point::new(80, 80),
                Point::new(80, 100),
            ],
            direction: Direction::Down,
        };
        let features = observation_features(&state_with(snake, Some(Point::new(100, 180))));

        // Turning right from Down means heading Left, into (80,100)
        assert_eq!(&features[0..3], &[0.0, 1.0, 0.0]);
        assert_eq!(&features[7..11], &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_observation_values_in_range() {
        let device = NdArrayDevice::default();
        let snake = Snake::new(Point::new(60, 0), Direction::Right, 3, 20);
        let state = state_with(snake, Some(Point::new(0, 180)));

        let obs = create_observation::<TestBackend>(&state, &device);
        let data = obs.to_data();

        for &value in data.as_slice::<f32>().unwrap() {
            assert!(value == 0.0 || value == 1.0);
        }
    }
}
