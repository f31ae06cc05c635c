use std::fmt;

use super::Player;

/// End-of-game message handed to a [`View`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    Win(Player),
    Tie,
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Announcement::Win(player) => write!(f, "{player} won!"),
            Announcement::Tie => f.write_str("The board is full and neither player won."),
        }
    }
}

/// Presentation side of a game session.
///
/// The session calls these after it has updated its own state; a view only
/// reflects what it is told and never feeds back into the rules.
pub trait View {
    /// A piece for `player` came to rest at (row, col).
    fn render_piece(&mut self, row: usize, col: usize, player: Player);

    /// The game reached a terminal outcome.
    fn announce_end(&mut self, announcement: &Announcement);
}

/// A view that ignores every directive.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl View for NullView {
    fn render_piece(&mut self, _row: usize, _col: usize, _player: Player) {}

    fn announce_end(&mut self, _announcement: &Announcement) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_announcement_names_player() {
        assert_eq!(Announcement::Win(Player::One).to_string(), "Player 1 won!");
        assert_eq!(Announcement::Win(Player::Two).to_string(), "Player 2 won!");
    }

    #[test]
    fn test_tie_announcement() {
        assert_eq!(
            Announcement::Tie.to_string(),
            "The board is full and neither player won."
        );
    }
}
