use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{BOARD_COLS, BOARD_ROWS, Cell, FoodKind, Phase, Snapshot, Tint};
use crate::leaderboard::Leaderboard;

/// Highscore data shown on the game-over screen
pub struct ScoreScreen<'a> {
    pub board: &'a Leaderboard,
    /// Letters typed so far while the player enters a name
    pub name_prompt: Option<&'a str>,
}

#[derive(Clone, Copy)]
enum Occupant {
    Body(Option<Tint>),
    Head(Option<Tint>),
    Food(FoodKind),
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, scores: Option<&ScoreScreen>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot), chunks[0]);

        let game_area = chunks[1];
        match snapshot.phase {
            Phase::Idle => frame.render_widget(self.render_title(), game_area),
            Phase::Playing => frame.render_widget(self.render_grid(snapshot), game_area),
            Phase::GameOver => {
                frame.render_widget(self.render_game_over(snapshot, scores), game_area)
            }
        }

        frame.render_widget(self.render_controls(snapshot.phase), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let width = BOARD_COLS as usize;
        let mut board: Vec<Option<Occupant>> = vec![None; width * BOARD_ROWS as usize];
        let index = |cell: Cell| {
            cell.is_on_board()
                .then(|| cell.row as usize * width + cell.col as usize)
        };

        if let Some(food) = snapshot.food {
            if let Some(i) = index(food.cell) {
                board[i] = Some(Occupant::Food(food.kind));
            }
        }
        let head = snapshot.segments.len().saturating_sub(1);
        for (n, segment) in snapshot.segments.iter().enumerate() {
            if let Some(i) = index(segment.cell) {
                board[i] = Some(if n == head {
                    Occupant::Head(segment.tint)
                } else {
                    Occupant::Body(segment.tint)
                });
            }
        }

        let lines: Vec<Line> = board
            .chunks(width)
            .map(|row| Line::from(row.iter().map(|cell| Self::cell_span(*cell)).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn cell_span(cell: Option<Occupant>) -> Span<'static> {
        match cell {
            Some(Occupant::Head(tint)) => Span::styled(
                "■ ",
                Style::default()
                    .fg(Self::snake_color(tint))
                    .add_modifier(Modifier::BOLD),
            ),
            Some(Occupant::Body(tint)) => {
                Span::styled("□ ", Style::default().fg(Self::snake_color(tint)))
            }
            Some(Occupant::Food(kind)) => {
                let (r, g, b) = kind.tint().rgb();
                let glyph = match kind {
                    FoodKind::Apple => "● ",
                    FoodKind::Banana => "◗ ",
                };
                Span::styled(
                    glyph,
                    Style::default()
                        .fg(Color::Rgb(r, g, b))
                        .add_modifier(Modifier::BOLD),
                )
            }
            None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn snake_color(tint: Option<Tint>) -> Color {
        match tint {
            Some(tint) => {
                let (r, g, b) = tint.rgb();
                Color::Rgb(r, g, b)
            }
            None => Color::Green,
        }
    }

    fn render_stats(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Level: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.level.to_string(), Style::default().fg(Color::White)),
        ];
        if snapshot.feedback_visible {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "Good Job!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_title(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "SPACE",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        )
    }

    fn render_game_over(
        &self,
        snapshot: &Snapshot,
        scores: Option<&ScoreScreen>,
    ) -> Paragraph<'static> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("LAST SCORE ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.last_score.unwrap_or(0).to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        if let Some(scores) = scores {
            if let Some(typed) = scores.name_prompt {
                text.push(Line::from(vec![
                    Span::styled("New highscore! Name: ", Style::default().fg(Color::Green)),
                    Span::styled(
                        format!("{typed:_<3}"),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                text.push(Line::from(""));
            }

            text.push(Line::from(Span::styled(
                "LOCAL HIGHSCORE",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for (rank, name, score) in scores.board.rows() {
                text.push(Line::from(format!("{rank:<6}{name:<6}{score:>4}")));
            }
            text.push(Line::from(""));
        }

        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "SPACE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'static> {
        let line = match phase {
            Phase::Playing => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Phase::Idle | Phase::GameOver => Line::from(vec![
                Span::styled("SPACE", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, Segment};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(snapshot: &Snapshot, scores: Option<&ScoreScreen>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 40)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, snapshot, scores))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn snapshot(phase: Phase) -> Snapshot {
        Snapshot {
            phase,
            segments: Vec::new(),
            food: None,
            score: 0,
            level: 0,
            feedback_visible: false,
            last_score: None,
        }
    }

    #[test]
    fn test_title_screen() {
        let screen = draw(&snapshot(Phase::Idle), None);
        assert!(screen.contains("S N A K E"));
        assert!(screen.contains("to start"));
    }

    #[test]
    fn test_playing_screen() {
        let mut snap = snapshot(Phase::Playing);
        snap.segments = vec![
            Segment {
                cell: Cell::new(1, 1),
                tint: None,
            },
            Segment {
                cell: Cell::new(2, 1),
                tint: None,
            },
        ];
        snap.food = Some(Food {
            cell: Cell::new(5, 5),
            kind: FoodKind::Apple,
        });
        snap.score = 4;
        snap.level = 1;
        snap.feedback_visible = true;

        let screen = draw(&snap, None);
        assert!(screen.contains("Score: 4"));
        assert!(screen.contains("Level: 1"));
        assert!(screen.contains("Good Job!"));
        assert!(screen.contains('■'));
        assert!(screen.contains('□'));
        assert!(screen.contains('●'));
    }

    #[test]
    fn test_game_over_screen_with_highscores() {
        let mut snap = snapshot(Phase::GameOver);
        snap.last_score = Some(7);
        let mut board = Leaderboard::default();
        board.insert("amy", 7);
        let scores = ScoreScreen {
            board: &board,
            name_prompt: Some("AM"),
        };

        let screen = draw(&snap, Some(&scores));
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("LAST SCORE 7"));
        assert!(screen.contains("LOCAL HIGHSCORE"));
        assert!(screen.contains("AM_"));
        assert!(screen.contains("1st"));
        assert!(screen.contains("10th"));
    }
}
