//! Watch a scripted driver play in the terminal
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Reset episode
//! - 1-4: Speed control (4 = the configured maximum tick rate)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Interval, interval};
use tracing::info;

use super::terminal::{Tui, restore_terminal, setup_terminal};
use crate::game::{GameConfig, SnakeGameAI};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::policy::Policy;
use crate::render::{Hud, Renderer};

const CONTROLS: &[(&str, &str)] = &[
    ("Space", "pause"),
    ("1-4", "speed"),
    ("R", "reset"),
    ("Q", "quit"),
];

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    /// 2 Hz
    Slow,
    /// 8 Hz, same as human mode
    Normal,
    /// 30 Hz
    Fast,
    /// The configured maximum tick rate
    Max,
}

impl PlaybackSpeed {
    fn from_preset(preset: u8) -> Option<Self> {
        match preset {
            1 => Some(Self::Slow),
            2 => Some(Self::Normal),
            3 => Some(Self::Fast),
            4 => Some(Self::Max),
            _ => None,
        }
    }

    /// Tick interval for this speed given the configured ticks per second
    fn tick_interval(&self, max_ticks_per_sec: u32) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(33),
            Self::Max => {
                Duration::from_micros((1_000_000 / u64::from(max_ticks_per_sec.max(1))).max(1))
            }
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::Max => "Max",
        }
    }
}

/// Terminal playback of a [`Policy`] driving the simulation.
/// Episodes restart automatically after game over.
pub struct WatchMode {
    game: SnakeGameAI,
    policy: Box<dyn Policy>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    paused: bool,
    speed: PlaybackSpeed,
    episode_count: u32,
}

impl WatchMode {
    pub fn new(config: GameConfig, policy: Box<dyn Policy>) -> Result<Self> {
        let game = SnakeGameAI::new(config).context("Failed to create game")?;

        Ok(Self {
            game,
            policy,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            paused: false,
            speed: PlaybackSpeed::Max,
            episode_count: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(speed = self.game.config().speed, "starting watch mode");
        let mut terminal = setup_terminal()?;

        let result = self.run_watch_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;
        info!(
            episodes = self.metrics.games_played,
            high_score = self.metrics.high_score,
            mean_score = self.metrics.mean_score(),
            "watch mode finished"
        );

        result
    }

    async fn run_watch_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval());

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.tick();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = Hud {
                        title: "Snake (watch)",
                        fields: vec![
                            ("Episode", self.episode_count.to_string()),
                            ("Speed", self.speed.as_str().to_string()),
                            ("State", if self.paused { "Paused" } else { "Running" }.to_string()),
                        ],
                        controls: CONTROLS,
                        game_over_hint: None,
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

    /// One simulation tick, or a fresh episode if the last one ended
    fn tick(&mut self) {
        if self.game.state().game_over {
            self.start_episode();
            return;
        }

        let action = self.policy.select(self.game.state());
        let result = self.game.play_step(action);

        if result.game_over {
            let state = self.game.state();
            self.metrics.on_game_over(state.score, state.frame_iteration);
        }
    }

    fn start_episode(&mut self) {
        self.game.reset();
        self.metrics.on_game_start();
        self.episode_count += 1;
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Quit => self.should_quit = true,
                KeyAction::Pause => self.paused = !self.paused,
                KeyAction::Restart => self.start_episode(),
                KeyAction::Speed(preset) => {
                    if let Some(speed) = PlaybackSpeed::from_preset(preset) {
                        self.change_speed(speed, tick_timer);
                    }
                }
                KeyAction::Steer(_) | KeyAction::None => {}
            }
        }
    }

    fn tick_interval(&self) -> Duration {
        self.speed.tick_interval(self.game.config().speed)
    }

    fn change_speed(&mut self, new_speed: PlaybackSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        *tick_timer = interval(self.tick_interval());
    }
}
