use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use super::terminal::{Tui, restore_terminal, setup_terminal};
use crate::game::{Action, Direction, GameConfig, SnakeGameAI};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

const CONTROLS: &[(&str, &str)] = &[("↑↓←→/WASD", "steer"), ("R", "restart"), ("Q", "quit")];

/// Keyboard play. Arrow keys request an absolute heading which is turned into
/// the relative action the simulation understands.
pub struct HumanMode {
    game: SnakeGameAI,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let game = SnakeGameAI::new(config).context("Failed to create game")?;

        Ok(Self {
            game,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("starting human mode");
        let mut terminal = setup_terminal()?;

        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;
        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "human mode finished"
        );

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at 8 Hz (125ms per tick)
        let mut tick_timer = interval(Duration::from_millis(125));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.game.state().game_over {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = Hud {
                        title: "Snake",
                        fields: Vec::new(),
                        controls: CONTROLS,
                        game_over_hint: Some("Press R to restart or Q to quit"),
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.game.state(), &self.metrics, &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(dir) => self.pending_direction = Some(dir),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::Speed(_) | KeyAction::Pause | KeyAction::None => {}
            }
        }
    }

    /// Relative action for the current tick
    fn next_action(&self) -> Action {
        let current = self.game.state().snake.direction;
        self.pending_direction
            .map(|desired| Action::toward(current, desired))
            .unwrap_or(Action::Straight)
    }

    fn update_game(&mut self) {
        let action = self.next_action();
        self.pending_direction = None;

        let result = self.game.play_step(action);

        if result.game_over {
            let state = self.game.state();
            self.metrics.on_game_over(state.score, state.frame_iteration);
            info!(score = state.score, "game over");
        }
    }

    fn reset_game(&mut self) {
        self.game.reset();
        self.metrics.on_game_start();
        self.pending_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::default().with_seed(11)).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(!mode.game.state().game_over);
        assert_eq!(mode.game.score(), 0);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.game.state_mut().score = 10;
        mode.game.state_mut().game_over = true;
        mode.reset_game();
        assert_eq!(mode.game.score(), 0);
        assert!(!mode.game.state().game_over);
    }

    #[test]
    fn test_pending_direction_becomes_relative_turn() {
        let mut mode = mode();
        mode.pending_direction = Some(Direction::Down);
        assert_eq!(mode.next_action(), Action::TurnRight);

        mode.pending_direction = Some(Direction::Left);
        assert_eq!(mode.next_action(), Action::Straight);

        mode.pending_direction = None;
        assert_eq!(mode.next_action(), Action::Straight);
    }

    #[test]
    fn test_update_consumes_pending_direction() {
        let mut mode = mode();
        mode.game.state_mut().food = None;
        mode.pending_direction = Some(Direction::Up);

        mode.update_game();

        assert_eq!(mode.game.state().snake.direction, Direction::Up);
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_game_over_recorded_in_metrics() {
        let mut mode = mode();
        mode.game.state_mut().frame_iteration = 10_000;

        mode.update_game();

        assert!(mode.game.state().game_over);
        assert_eq!(mode.metrics.games_played, 1);
    }
}
