use super::observation::create_observation;
use crate::game::{Action, GameConfig, GameError, GameState, SnakeGameAI};
use burn::tensor::{Tensor, backend::Backend};

/// Snake environment for reinforcement learning
///
/// Wraps the simulation and provides a Burn-compatible interface with:
/// - Tensor observations (11 binary features)
/// - Discrete action space (3 actions relative to the heading)
/// - Standard RL interface (reset, step)
pub struct SnakeEnvironment<B: Backend> {
    game: SnakeGameAI,
    device: B::Device,
}

impl<B: Backend> SnakeEnvironment<B> {
    /// Create a new Snake environment
    pub fn new(config: GameConfig, device: B::Device) -> Result<Self, GameError> {
        let game = SnakeGameAI::new(config)?;
        Ok(Self { game, device })
    }

    /// Reset the environment and return initial observation
    ///
    /// Returns: Tensor<B, 1> with shape [11]
    pub fn reset(&mut self) -> Tensor<B, 1> {
        self.game.reset();
        create_observation(self.game.state(), &self.device)
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Straight
    /// - 1: Turn right
    /// - 2: Turn left
    ///
    /// Any other index is rejected and the game is left untouched.
    ///
    /// Returns: (observation, reward, done)
    pub fn step(&mut self, action_idx: usize) -> Result<(Tensor<B, 1>, f32, bool), GameError> {
        let action = Action::from_index(action_idx)?;
        Ok(self.apply(action))
    }

    /// Step with the one-hot convention (`[1,0,0]` straight, `[0,1,0]` right,
    /// `[0,0,1]` left)
    pub fn step_one_hot(&mut self, encoded: &[u8]) -> Result<(Tensor<B, 1>, f32, bool), GameError> {
        let action = Action::from_one_hot(encoded)?;
        Ok(self.apply(action))
    }

    fn apply(&mut self, action: Action) -> (Tensor<B, 1>, f32, bool) {
        let result = self.game.play_step(action);
        let observation = create_observation(self.game.state(), &self.device);

        (observation, result.reward as f32, result.game_over)
    }

    /// Get current observation without stepping
    pub fn get_observation(&self) -> Tensor<B, 1> {
        create_observation(self.game.state(), &self.device)
    }

    /// Get the device used by this environment
    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Get reference to current game state (for testing/debugging)
    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }
}
