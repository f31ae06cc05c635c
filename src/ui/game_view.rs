use crate::config::UiConfig;
use crate::error::ConfigError;
use crate::game::{Board, Cell, GameOutcome, GameSession, Player, HEIGHT, WIDTH};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::StatusView;

/// Piece colours for the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub player_one: Color,
    pub player_two: Color,
}

impl Palette {
    pub fn from_config(config: &UiConfig) -> Result<Self, ConfigError> {
        Ok(Palette {
            player_one: config.player_one_color()?,
            player_two: config.player_two_color()?,
        })
    }

    pub fn color(&self, player: Player) -> Color {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            player_one: Color::Red,
            player_two: Color::Yellow,
        }
    }
}

/// Everything the game screen needs besides the session itself.
pub struct Screen<'a> {
    pub selected_column: usize,
    pub status: &'a StatusView,
    pub palette: &'a Palette,
    pub show_move_history: bool,
}

pub fn render(frame: &mut Frame, session: &GameSession, screen: &Screen<'_>) {
    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Board
        Constraint::Length(3), // Message
    ];
    if screen.show_move_history {
        constraints.push(Constraint::Length(4)); // Move history
    }
    constraints.push(Constraint::Length(3)); // Controls

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_header(frame, session, screen.palette, chunks[0]);
    render_board(frame, session, screen, chunks[1]);
    render_message(frame, screen.status.message(), chunks[2]);
    if screen.show_move_history {
        render_history(frame, session.moves(), chunks[3]);
    }
    render_controls(frame, chunks[chunks.len() - 1]);
}

fn render_header(frame: &mut Frame, session: &GameSession, palette: &Palette, area: Rect) {
    let (status, color) = match session.outcome() {
        GameOutcome::InProgress => {
            let player = session.current_player();
            (format!("Current Player: {player}"), palette.color(player))
        }
        GameOutcome::Win(player) => (format!("Game Over  |  {player} won"), palette.color(player)),
        GameOutcome::Tie => ("Game Over  |  Tie".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, session: &GameSession, screen: &Screen<'_>, area: Rect) {
    let board = session.board();
    let winning_line = match session.outcome() {
        GameOutcome::Win(player) => board.winning_line(player),
        _ => None,
    };
    let show_selector = !session.is_terminal();

    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..WIDTH {
        if show_selector && col == screen.selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(WIDTH * 3 + 1))));

    for row in 0..HEIGHT {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..WIDTH {
            let mut style = match board.get(row, col) {
                Cell::Empty => Style::default().fg(Color::DarkGray),
                Cell::PlayerOne => Style::default().fg(screen.palette.player_one),
                Cell::PlayerTwo => Style::default().fg(screen.palette.player_two),
            };
            if winning_line.is_some_and(|line| line.contains(&(row, col))) {
                style = style.add_modifier(Modifier::REVERSED);
            } else if screen.status.last_piece() == Some((row, col)) {
                style = style.add_modifier(Modifier::BOLD);
            }
            row_spans.push(Span::styled(cell_symbol(board, row, col), style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(WIDTH * 3 + 1))));

    if show_selector {
        let mut indicator_line = vec![Span::raw("   ")];
        for col in 0..WIDTH {
            if col == screen.selected_column {
                indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
            } else {
                indicator_line.push(Span::raw("   "));
            }
        }
        indicator_line.push(Span::raw("  "));
        lines.push(Line::from(indicator_line));
    }

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn cell_symbol(board: &Board, row: usize, col: usize) -> &'static str {
    match board.get(row, col) {
        Cell::Empty => " . ",
        Cell::PlayerOne | Cell::PlayerTwo => " ● ",
    }
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_history(frame: &mut Frame, moves: &[usize], area: Rect) {
    let text = moves
        .iter()
        .map(|col| (col + 1).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let history = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Moves ({})", moves.len())),
        );

    frame.render_widget(history, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→ or 1-7: Select  |  Enter: Drop  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
