//! Run episodes without a display, the way a training loop drives the game

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::game::{GameConfig, SnakeGameAI};
use crate::metrics::GameMetrics;
use crate::policy::Policy;

/// Outcome of a single episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub score: u32,
    pub frames: u32,
    pub total_reward: i64,
}

pub struct HeadlessMode {
    game: SnakeGameAI,
    policy: Box<dyn Policy>,
    metrics: GameMetrics,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, policy: Box<dyn Policy>) -> Result<Self> {
        let game = SnakeGameAI::new(config).context("Failed to create game")?;

        Ok(Self {
            game,
            policy,
            metrics: GameMetrics::new(),
        })
    }

    /// Play `episodes` full episodes and return the session metrics
    pub fn run(&mut self, episodes: u32) -> Result<&GameMetrics> {
        info!(episodes, "starting headless run");

        for episode in 1..=episodes {
            let summary = self.run_episode();
            info!(
                episode,
                score = summary.score,
                frames = summary.frames,
                reward = summary.total_reward,
                "episode finished"
            );
        }

        self.metrics.update();
        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            mean_score = self.metrics.mean_score(),
            elapsed = %self.metrics.format_time(),
            "headless run finished"
        );

        Ok(&self.metrics)
    }

    /// Reset, then step until the episode ends.
    /// The frame cap bounds the loop even for a policy that never eats.
    pub fn run_episode(&mut self) -> EpisodeSummary {
        self.game.reset();
        let mut total_reward = 0i64;

        loop {
            let action = self.policy.select(self.game.state());
            let result = self.game.play_step(action);
            total_reward += i64::from(result.reward);

            if result.info.ate_food {
                debug!(score = result.score, "food eaten");
            }

            if result.game_over {
                let state = self.game.state();
                self.metrics.on_game_over(state.score, state.frame_iteration);
                return EpisodeSummary {
                    score: state.score,
                    frames: state.frame_iteration,
                    total_reward,
                };
            }
        }
    }
}
