use tracing::{debug, info, trace};

use super::{Announcement, Board, Player, View, WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Win(Player),
    Tie,
}

impl GameOutcome {
    /// Win or Tie
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

/// Where the turn controller is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    Evaluating,
    GameOver,
}

/// Why a column selection left the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    ColumnFull,
    OutOfRange,
    GameOver,
}

/// What a single column selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignored(Ignored),
    Placed {
        row: usize,
        col: usize,
        player: Player,
    },
    Ended {
        row: usize,
        col: usize,
        outcome: GameOutcome,
    },
}

/// One game of Connect Four: the grid, whose turn it is, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    outcome: GameOutcome,
    phase: Phase,
    moves: Vec<usize>,
}

impl GameSession {
    /// Create a session with an empty board and Player 1 to move
    pub fn new() -> Self {
        GameSession {
            board: Board::new(),
            current_player: Player::One,
            outcome: GameOutcome::InProgress,
            phase: Phase::AwaitingInput,
            moves: Vec::new(),
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Columns played so far, in order
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Start over with an empty board
    pub fn reset(&mut self) {
        *self = GameSession::new();
        debug!("session reset");
    }

    /// Drop the current player's piece into `col`.
    ///
    /// Full columns, columns outside the grid, and any input after the game
    /// has ended leave the session unchanged and make no calls on `view`.
    pub fn select_column(&mut self, col: usize, view: &mut dyn View) -> Transition {
        if self.phase == Phase::GameOver {
            trace!(col, "input after game over ignored");
            return Transition::Ignored(Ignored::GameOver);
        }

        if col >= WIDTH {
            trace!(col, "column outside the board ignored");
            return Transition::Ignored(Ignored::OutOfRange);
        }
        // A full column is a silent no-op.
        let Some(row) = self.board.landing_row(col) else {
            return Transition::Ignored(Ignored::ColumnFull);
        };

        self.phase = Phase::Evaluating;
        let player = self.current_player;
        self.board.set(row, col, player);
        self.moves.push(col);
        debug!(row, col, player = player.number(), "piece placed");
        view.render_piece(row, col, player);

        let outcome = if self.board.wins_through(row, col) {
            GameOutcome::Win(player)
        } else if self.board.is_full() {
            GameOutcome::Tie
        } else {
            GameOutcome::InProgress
        };

        match outcome {
            GameOutcome::InProgress => {
                self.current_player = player.other();
                self.phase = Phase::AwaitingInput;
                Transition::Placed { row, col, player }
            }
            GameOutcome::Win(winner) => {
                self.finish(row, col, outcome, Announcement::Win(winner), view)
            }
            GameOutcome::Tie => self.finish(row, col, outcome, Announcement::Tie, view),
        }
    }

    fn finish(
        &mut self,
        row: usize,
        col: usize,
        outcome: GameOutcome,
        announcement: Announcement,
        view: &mut dyn View,
    ) -> Transition {
        self.outcome = outcome;
        self.phase = Phase::GameOver;
        info!(moves = self.moves.len(), "{announcement}");
        view.announce_end(&announcement);
        Transition::Ended { row, col, outcome }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, NullView, HEIGHT, WIDTH};

    /// Test double recording every directive in order.
    #[derive(Debug, Default)]
    struct RecordingView {
        pieces: Vec<(usize, usize, Player)>,
        announcements: Vec<Announcement>,
    }

    impl View for RecordingView {
        fn render_piece(&mut self, row: usize, col: usize, player: Player) {
            self.pieces.push((row, col, player));
        }

        fn announce_end(&mut self, announcement: &Announcement) {
            self.announcements.push(*announcement);
        }
    }

    /// A full game that ends with no four in a row for either side.
    const TIE_GAME: [usize; 42] = [
        0, 1, 5, 5, 0, 2, 3, 2, 0, 3, 4, 5, 3, 6, 4, 3, 5, 6, 2, 2, 2, 2, 3, 0, 4, 1, 6, 1, 0,
        4, 5, 0, 1, 1, 1, 4, 4, 3, 5, 6, 6, 6,
    ];

    /// A full game whose 42nd move also completes four in a row.
    const WIN_ON_LAST_CELL: [usize; 42] = [
        3, 1, 1, 1, 4, 3, 6, 3, 2, 5, 2, 6, 4, 0, 6, 6, 2, 0, 6, 4, 5, 6, 1, 2, 4, 4, 4, 1, 5,
        2, 3, 1, 3, 2, 0, 5, 5, 3, 0, 0, 5, 0,
    ];

    fn play(session: &mut GameSession, cols: &[usize]) -> Vec<Transition> {
        cols.iter()
            .map(|&col| session.select_column(col, &mut NullView))
            .collect()
    }

    #[test]
    fn test_initial_session() {
        let session = GameSession::new();
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(session.outcome(), GameOutcome::InProgress);
        assert_eq!(session.phase(), Phase::AwaitingInput);
        assert!(!session.is_terminal());
        assert_eq!(session.board().piece_count(), 0);
    }

    #[test]
    fn test_select_column_places_and_switches_player() {
        let mut session = GameSession::new();
        let mut view = RecordingView::default();

        let transition = session.select_column(3, &mut view);

        assert_eq!(
            transition,
            Transition::Placed {
                row: 5,
                col: 3,
                player: Player::One
            }
        );
        assert_eq!(session.board().get(5, 3), Cell::PlayerOne);
        assert_eq!(session.current_player(), Player::Two);
        assert_eq!(session.phase(), Phase::AwaitingInput);
        assert_eq!(view.pieces, vec![(5, 3, Player::One)]);
        assert!(view.announcements.is_empty());
    }

    #[test]
    fn test_column_never_takes_more_than_height() {
        for col in 0..WIDTH {
            let mut session = GameSession::new();
            let transitions = play(&mut session, &[col; HEIGHT + 1]);

            assert_eq!(session.board().column_height(col), HEIGHT);
            assert_eq!(
                transitions[HEIGHT],
                Transition::Ignored(Ignored::ColumnFull)
            );
        }
    }

    #[test]
    fn test_vertical_win_scenario() {
        let mut session = GameSession::new();
        let mut view = RecordingView::default();
        let mut last = None;
        for col in [0, 1, 0, 1, 0, 1, 0] {
            last = Some(session.select_column(col, &mut view));
        }

        assert_eq!(
            last,
            Some(Transition::Ended {
                row: 2,
                col: 0,
                outcome: GameOutcome::Win(Player::One)
            })
        );
        for row in 2..HEIGHT {
            assert_eq!(session.board().get(row, 0), Cell::PlayerOne);
        }
        assert_eq!(session.outcome(), GameOutcome::Win(Player::One));
        assert_eq!(session.phase(), Phase::GameOver);
        // The winner stays the current player
        assert_eq!(session.current_player(), Player::One);
        assert_eq!(view.pieces.len(), 7);
        assert_eq!(view.announcements, vec![Announcement::Win(Player::One)]);
    }

    #[test]
    fn test_horizontal_win_for_player_two() {
        let mut session = GameSession::new();
        let transitions = play(&mut session, &[0, 1, 0, 2, 6, 3, 0, 4]);

        assert_eq!(
            transitions.last(),
            Some(&Transition::Ended {
                row: 5,
                col: 4,
                outcome: GameOutcome::Win(Player::Two)
            })
        );
        assert_eq!(session.outcome(), GameOutcome::Win(Player::Two));
    }

    #[test]
    fn test_tie_scenario() {
        let mut session = GameSession::new();
        let mut view = RecordingView::default();
        let transitions: Vec<_> = TIE_GAME
            .iter()
            .map(|&col| session.select_column(col, &mut view))
            .collect();

        assert!(transitions[..41]
            .iter()
            .all(|t| matches!(t, Transition::Placed { .. })));
        assert!(matches!(
            transitions[41],
            Transition::Ended {
                outcome: GameOutcome::Tie,
                ..
            }
        ));
        assert!(session.board().is_full());
        assert!(!session.board().has_four_in_a_row(Player::One));
        assert!(!session.board().has_four_in_a_row(Player::Two));
        assert_eq!(session.outcome(), GameOutcome::Tie);
        assert_eq!(view.pieces.len(), 42);
        assert_eq!(view.announcements, vec![Announcement::Tie]);
    }

    #[test]
    fn test_win_on_last_cell_is_not_a_tie() {
        let mut session = GameSession::new();
        let mut view = RecordingView::default();
        let transitions: Vec<_> = WIN_ON_LAST_CELL
            .iter()
            .map(|&col| session.select_column(col, &mut view))
            .collect();

        assert!(transitions[..41]
            .iter()
            .all(|t| matches!(t, Transition::Placed { .. })));
        assert_eq!(
            transitions[41],
            Transition::Ended {
                row: 0,
                col: 0,
                outcome: GameOutcome::Win(Player::Two)
            }
        );
        assert!(session.board().is_full());
        assert_eq!(session.outcome(), GameOutcome::Win(Player::Two));
        assert_eq!(view.announcements, vec![Announcement::Win(Player::Two)]);
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = GameSession::new();
        let mut expected = Player::One;
        for col in [3, 3, 3, 3, 3, 3, 2, 4] {
            match session.select_column(col, &mut NullView) {
                Transition::Placed { player, .. } => assert_eq!(player, expected),
                other => panic!("unexpected transition {other:?}"),
            }
            expected = expected.other();
        }
        // A full column does not count as a turn
        assert_eq!(
            session.select_column(3, &mut NullView),
            Transition::Ignored(Ignored::ColumnFull)
        );
        match session.select_column(5, &mut NullView) {
            Transition::Placed { player, .. } => assert_eq!(player, expected),
            other => panic!("unexpected transition {other:?}"),
        }
    }

    #[test]
    fn test_player_changes_iff_game_continues() {
        let mut session = GameSession::new();
        for &col in &TIE_GAME {
            let before = session.current_player();
            let transition = session.select_column(col, &mut NullView);
            match transition {
                Transition::Placed { .. } => assert_eq!(session.current_player(), before.other()),
                Transition::Ended { .. } => assert_eq!(session.current_player(), before),
                Transition::Ignored(_) => panic!("no move in this game is ignored"),
            }
        }
    }

    #[test]
    fn test_full_column_leaves_session_unchanged() {
        let mut session = GameSession::new();
        play(&mut session, &[0; HEIGHT]);
        assert!(!session.is_terminal());

        let snapshot = session.clone();
        let mut view = RecordingView::default();
        let transition = session.select_column(0, &mut view);

        assert_eq!(transition, Transition::Ignored(Ignored::ColumnFull));
        assert_eq!(session, snapshot);
        assert!(view.pieces.is_empty());
        assert!(view.announcements.is_empty());
    }

    #[test]
    fn test_out_of_range_column_is_ignored() {
        let mut session = GameSession::new();
        let snapshot = session.clone();

        assert_eq!(
            session.select_column(WIDTH, &mut NullView),
            Transition::Ignored(Ignored::OutOfRange)
        );
        assert_eq!(session, snapshot);
    }

    #[test]
    fn test_input_after_win_is_ignored() {
        let mut session = GameSession::new();
        play(&mut session, &[0, 1, 0, 1, 0, 1, 0]);
        let snapshot = session.clone();
        let mut view = RecordingView::default();

        for col in 0..WIDTH {
            assert_eq!(
                session.select_column(col, &mut view),
                Transition::Ignored(Ignored::GameOver)
            );
        }
        assert_eq!(session, snapshot);
        assert!(view.pieces.is_empty());
    }

    #[test]
    fn test_moves_history_skips_ignored_input() {
        let mut session = GameSession::new();
        play(&mut session, &[2, 2, 2, 2, 2, 2, 2, 9, 4]);
        assert_eq!(session.moves(), &[2, 2, 2, 2, 2, 2, 4]);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut session = GameSession::new();
        play(&mut session, &[0, 1, 0, 1, 0, 1, 0]);
        assert!(session.is_terminal());

        session.reset();
        assert_eq!(session, GameSession::new());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = GameSession::new();
        let second = GameSession::new();
        first.select_column(3, &mut NullView);

        assert_eq!(first.board().piece_count(), 1);
        assert_eq!(second.board().piece_count(), 0);
    }
}
