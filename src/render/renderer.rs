use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::board::BoardWidget;
use super::scene::Scene;
use crate::game::{GamePhase, GameState};

const OVERLAY_WIDTH: u16 = 34;
const OVERLAY_HEIGHT: u16 = 7;

/// Title and message of the overlay shown while no game is running
pub fn overlay_text(state: &GameState) -> Option<(&'static str, String)> {
    match state.phase {
        GamePhase::Running => None,
        GamePhase::NotStarted => Some(("Snake", "Press any key to start".to_string())),
        GamePhase::GameOver => Some(("Game Over", format!("Your score: {}", state.score))),
    }
}

/// Paints a whole frame from the game state; never touches the state
#[derive(Debug)]
pub struct Renderer {
    canvas_size: u32,
}

impl Renderer {
    pub fn new(canvas_size: u32) -> Self {
        Self { canvas_size }
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, best_score: u32) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, best_score);
        frame.render_widget(stats, chunks[0]);

        let board_area = self.render_board(frame, chunks[1], state);

        if let Some((title, message)) = overlay_text(state) {
            let popup = centered(board_area, OVERLAY_WIDTH, OVERLAY_HEIGHT);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_overlay(state, title, message), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Draw the bordered board and return the area it occupies
    fn render_board(&self, frame: &mut Frame, area: Rect, state: &GameState) -> Rect {
        let (cols, rows) = BoardWidget::fit(
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
            state.grid_size,
        );
        let outer = centered(area, cols + 2, rows + 2);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let inner = block.inner(outer);
        frame.render_widget(block, outer);

        let scene = Scene::compose(state, self.canvas_size);
        frame.render_widget(BoardWidget::new(&scene), inner);

        outer
    }

    fn render_stats(&self, state: &GameState, best_score: u32) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(best_score.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_overlay(&self, state: &GameState, title: &str, message: String) -> Paragraph<'_> {
        let title_color = match state.phase {
            GamePhase::GameOver => Color::Red,
            _ => Color::Cyan,
        };

        let mut text = vec![
            Line::from(vec![Span::styled(
                title.to_string(),
                Style::default()
                    .fg(title_color)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::White))),
        ];

        if state.phase == GamePhase::GameOver {
            text.push(Line::from(vec![
                Span::styled("Any key", Style::default().fg(Color::Green)),
                Span::styled(" to play again, ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(title_color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(crate::game::GameConfig::default().canvas_size)
    }
}

/// A `width` x `height` rect centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
