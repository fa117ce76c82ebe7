use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Point};
use crate::metrics::GameMetrics;

/// Mode-specific text around the board
pub struct Hud<'a> {
    /// Board title
    pub title: &'a str,
    /// Extra header fields after the standard ones
    pub fields: Vec<(&'a str, String)>,
    /// Footer key bindings as (keys, description)
    pub controls: &'a [(&'a str, &'a str)],
    /// Text under "GAME OVER"; `None` hides the panel and keeps the board
    pub game_over_hint: Option<&'a str>,
}

/// Draws a read-only view of the game. Never touches the simulation.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics, hud), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match (state.game_over, hud.game_over_hint) {
            (true, Some(hint)) => {
                frame.render_widget(self.render_game_over(state, hint), game_area)
            }
            _ => frame.render_widget(self.render_grid(state, hud.title), game_area),
        }

        frame.render_widget(self.render_controls(hud.controls), chunks[2]);
    }

    fn render_grid<'a>(&self, state: &GameState, title: &'a str) -> Paragraph<'a> {
        let head = state.snake.head();
        let mut lines = Vec::new();

        for row in 0..state.grid_height() {
            let mut spans = Vec::new();

            for col in 0..state.grid_width() {
                let pos = Point::new(col * state.block_size, row * state.block_size);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.contains(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Blue))
                } else if state.food == Some(pos) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" {} ", title)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<'a>(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        hud: &Hud<'a>,
    ) -> Paragraph<'a> {
        let mut fields = vec![
            ("Score", state.score.to_string()),
            ("Frame", state.frame_iteration.to_string()),
            ("Best", metrics.high_score.to_string()),
            ("Time", metrics.format_time()),
        ];
        fields.extend(hud.fields.iter().cloned());

        let mut spans = Vec::new();
        for (i, (label, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("    "));
            }
            spans.push(Span::styled(
                format!("{}: ", label),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::styled(
                value,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over<'a>(&self, state: &GameState, hint: &'a str) -> Paragraph<'a> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls<'a>(&self, controls: &'a [(&'a str, &'a str)]) -> Paragraph<'a> {
        let mut spans = Vec::new();
        for (i, (keys, description)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(*keys, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(format!(" {}", description)));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
