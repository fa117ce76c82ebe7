use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::GameError,
    state::{CollisionType, GameState, Point, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, warn};

/// Random draws tried before falling back to a scan of the free cells
pub const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Length of the snake after a reset
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// What ended the episode, if it ended this step
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: i32,
    /// Whether the episode has ended
    pub game_over: bool,
    /// Score after this step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    /// The `(reward, game_over, score)` triple agents consume
    pub fn as_tuple(&self) -> (i32, bool, u32) {
        (self.reward, self.game_over, self.score)
    }
}

/// Snake simulation driven one action at a time by an external agent.
///
/// Not meant to be shared between threads: every mutating call takes
/// `&mut self`, so callers sequence steps themselves.
pub struct SnakeGameAI {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl SnakeGameAI {
    /// Create a new game with the given configuration, already reset
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = initial_state(&config);

        let mut game = Self { config, state, rng };
        game.reset();
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the current state, for renderers and observers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access to the state, for tests and scripted scenarios.
    /// Callers are responsible for keeping food off the snake.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Reset the game to the canonical start: 3-segment snake at the centre
    /// heading right, score and frame counter zeroed, fresh food.
    pub fn reset(&mut self) {
        self.state = initial_state(&self.config);
        self.place_food();
    }

    /// Decode a one-hot action and step. Malformed actions are rejected
    /// before the state is touched.
    pub fn play_step_one_hot(&mut self, encoded: &[u8]) -> Result<StepResult, GameError> {
        let action = Action::from_one_hot(encoded)?;
        Ok(self.play_step(action))
    }

    /// Advance the simulation by one tick.
    ///
    /// On game over the tail is not trimmed and no food is placed: the
    /// returned state keeps the new head plus the full old body.
    pub fn play_step(&mut self, action: Action) -> StepResult {
        if self.state.game_over {
            return StepResult {
                reward: 0,
                game_over: true,
                score: self.state.score,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                },
            };
        }

        self.state.frame_iteration += 1;

        let direction = action.resolve(self.state.snake.direction);
        self.state.snake.direction = direction;

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(direction, self.config.block_size);
        self.state.snake.push_head(new_head);

        if let Some(collision_type) = self
            .collision_type(new_head)
            .or_else(|| self.timed_out().then_some(CollisionType::Timeout))
        {
            self.state.game_over = true;
            debug!(
                score = self.state.score,
                frames = self.state.frame_iteration,
                ?collision_type,
                "episode over"
            );

            return StepResult {
                reward: self.config.death_penalty,
                game_over: true,
                score: self.state.score,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let mut reward = 0;
        let ate_food = self.state.food == Some(new_head);

        if ate_food {
            self.state.score += 1;
            reward += self.config.food_reward;
            self.place_food();
        } else {
            self.state.snake.drop_tail();
        }

        StepResult {
            reward,
            game_over: false,
            score: self.state.score,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// True if `point` (the head when `None`) is off the field or on the body
    pub fn is_collision(&self, point: Option<Point>) -> bool {
        let point = point.unwrap_or_else(|| self.state.snake.head());
        self.collision_type(point).is_some()
    }

    /// Classify a collision at `point`; the head itself never counts
    pub fn collision_type(&self, point: Point) -> Option<CollisionType> {
        self.state.collision_at(point)
    }

    fn timed_out(&self) -> bool {
        let limit = u64::from(self.config.frame_limit_factor) * self.state.snake.len() as u64;
        u64::from(self.state.frame_iteration) > limit
    }

    fn place_food(&mut self) {
        self.state.food = spawn_food(&mut self.rng, &self.state);
        if self.state.food.is_none() {
            warn!(length = self.state.snake.len(), "no free cell left for food");
        }
    }
}

fn initial_state(config: &GameConfig) -> GameState {
    let block = config.block_size;
    let head = Point::new(
        (config.width / 2) / block * block,
        (config.height / 2) / block * block,
    );
    let snake = Snake::new(head, Direction::Right, INITIAL_SNAKE_LENGTH, block);

    GameState::new(snake, None, config.width, config.height, block)
}

/// Pick a uniformly random free cell: a bounded number of random draws, then
/// an exhaustive scan when the field is crowded. `None` if the snake covers
/// every cell.
fn spawn_food<R: Rng>(rng: &mut R, state: &GameState) -> Option<Point> {
    let block = state.block_size;
    let cols = state.grid_width();
    let rows = state.grid_height();

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let pos = Point::new(rng.gen_range(0..cols) * block, rng.gen_range(0..rows) * block);
        if !state.is_occupied_by_snake(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Point> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| Point::new(col * block, row * block)))
        .filter(|pos| !state.is_occupied_by_snake(*pos))
        .collect();

    free.choose(rng).copied()
}
