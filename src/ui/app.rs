use crate::config::UiConfig;
use crate::error::ConfigError;
use crate::game::{GameSession, Ignored, Transition, WIDTH};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;
use tracing::debug;

use super::game_view::{self, Palette, Screen};
use super::StatusView;

pub struct App {
    session: GameSession,
    status: StatusView,
    selected_column: usize,
    should_quit: bool,
    palette: Palette,
    config: UiConfig,
}

impl App {
    pub fn new(config: UiConfig) -> Result<Self, ConfigError> {
        let palette = Palette::from_config(&config)?;
        Ok(App {
            session: GameSession::new(),
            status: StatusView::new(),
            selected_column: config.initial_column.min(WIDTH - 1),
            should_quit: false,
            palette,
            config,
        })
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        let poll_interval = Duration::from_millis(self.config.poll_interval_ms);
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events(poll_interval)?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self, poll_interval: Duration) -> io::Result<()> {
        if event::poll(poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.status.clear_message();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < WIDTH - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = (c as usize) - ('1' as usize);
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.status.clear();
                self.selected_column = self.config.initial_column.min(WIDTH - 1);
                self.status.set_message("New game started!");
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        let col = self.selected_column;
        match self.session.select_column(col, &mut self.status) {
            Transition::Placed { .. }
            | Transition::Ended { .. }
            | Transition::Ignored(Ignored::ColumnFull) => {}
            Transition::Ignored(Ignored::GameOver) => {
                self.status.set_message("Game over! Press 'r' to restart.");
            }
            Transition::Ignored(Ignored::OutOfRange) => {
                debug!(col, "selector outside the board");
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let screen = Screen {
            selected_column: self.selected_column,
            status: &self.status,
            palette: &self.palette,
            show_move_history: self.config.show_move_history,
        };
        game_view::render(frame, &self.session, &screen);
    }
}

impl Default for App {
    fn default() -> Self {
        App {
            session: GameSession::new(),
            status: StatusView::new(),
            selected_column: WIDTH / 2,
            should_quit: false,
            palette: Palette::default(),
            config: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, GameOutcome, Player, HEIGHT};
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_selector_stays_on_board() {
        let mut app = App::default();
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column, 0);
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column, WIDTH - 1);
    }

    #[test]
    fn test_enter_drops_in_selected_column() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.board().get(HEIGHT - 1, 3), Cell::PlayerOne);
        assert_eq!(app.status.last_piece(), Some((HEIGHT - 1, 3)));
        assert_eq!(app.session.current_player(), Player::Two);
    }

    #[test]
    fn test_digit_keys_select_and_drop() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.session.board().get(HEIGHT - 1, 0), Cell::PlayerOne);
        assert_eq!(app.session.board().get(HEIGHT - 1, 6), Cell::PlayerTwo);
        assert_eq!(app.selected_column, 6);
    }

    #[test]
    fn test_full_column_is_silent() {
        let mut app = App::default();
        for _ in 0..HEIGHT {
            press(&mut app, KeyCode::Char('2'));
        }
        let session = app.session.clone();
        let status = app.status.clone();
        press(&mut app, KeyCode::Char('2'));

        assert_eq!(app.session, session);
        assert_eq!(app.status, status);
        assert_eq!(app.status.message(), None);
    }

    #[test]
    fn test_win_then_restart() {
        let mut app = App::default();
        for key in ['1', '2', '1', '2', '1', '2', '1'] {
            press(&mut app, KeyCode::Char(key));
        }
        assert_eq!(app.session.outcome(), GameOutcome::Win(Player::One));
        assert_eq!(
            app.status.message(),
            Some("Player 1 won!  Press 'r' to play again.")
        );

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.status.message(),
            Some("Game over! Press 'r' to restart.")
        );

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.session, GameSession::new());
        assert_eq!(app.status.last_piece(), None);
        assert_eq!(app.selected_column, 3);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = App::default();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_new_uses_config() {
        let config = UiConfig {
            initial_column: 0,
            ..UiConfig::default()
        };
        let app = App::new(config).unwrap();
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn test_new_rejects_bad_colour() {
        let config = UiConfig {
            player_one_color: "plaid".into(),
            ..UiConfig::default()
        };
        assert!(App::new(config).is_err());
    }
}
