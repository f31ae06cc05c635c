use crate::game::{Announcement, Player, View};

/// What the full-screen UI shows besides the board itself: the last piece
/// dropped and a one-line message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusView {
    last_piece: Option<(usize, usize)>,
    message: Option<String>,
}

impl StatusView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell of the most recent piece, highlighted on the board
    pub fn last_piece(&self) -> Option<(usize, usize)> {
        self.last_piece
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl View for StatusView {
    fn render_piece(&mut self, row: usize, col: usize, _player: Player) {
        self.last_piece = Some((row, col));
    }

    fn announce_end(&mut self, announcement: &Announcement) {
        self.message = Some(format!("{announcement}  Press 'r' to play again."));
    }
}
