//! Line-oriented front-end: one column number per line on stdin, the board
//! printed as text after every move.

use std::io::{self, BufRead, Write};

use crate::game::{
    Announcement, Board, Cell, GameSession, Ignored, Player, Transition, View, HEIGHT, WIDTH,
};

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Drop(usize),
    Restart,
    Quit,
}

/// Parse one input line. Columns are typed 1-based.
pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "q" | "quit" => Some(Command::Quit),
        "r" | "restart" => Some(Command::Restart),
        other => match other.parse::<usize>() {
            Ok(n) if (1..=WIDTH).contains(&n) => Some(Command::Drop(n - 1)),
            _ => None,
        },
    }
}

fn symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::PlayerOne => 'X',
        Cell::PlayerTwo => 'O',
    }
}

/// Draw the board as text, column numbers on top.
pub fn render_text(board: &Board) -> String {
    let mut out = String::new();
    for col in 0..WIDTH {
        out.push_str(&format!(" {}", col + 1));
    }
    out.push('\n');
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            out.push(' ');
            out.push(symbol(board.get(row, col)));
        }
        out.push('\n');
    }
    out
}

/// [`View`] that writes directives as text lines.
///
/// The first write error is kept and reported by [`PlainView::take_error`],
/// since view callbacks cannot fail.
pub struct PlainView<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> PlainView<W> {
    pub fn new(out: W) -> Self {
        PlainView { out, error: None }
    }

    pub fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{line}") {
            self.error = Some(err);
        }
    }
}

impl<W: Write> View for PlainView<W> {
    fn render_piece(&mut self, row: usize, col: usize, player: Player) {
        self.write_line(&format!(
            "{player} ({}) drops into column {}, row {}",
            symbol(player.to_cell()),
            col + 1,
            HEIGHT - row
        ));
    }

    fn announce_end(&mut self, announcement: &Announcement) {
        self.write_line(&announcement.to_string());
    }
}

/// Play games reading commands from `input` until quit or end of input.
pub fn run<R: BufRead, W: Write>(input: R, view: &mut PlainView<W>) -> io::Result<()> {
    let mut session = GameSession::new();
    view.write_line(&render_text(session.board()));
    prompt(&session, view);
    view.take_error()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::Restart) => {
                session.reset();
                view.write_line("New game started!");
                view.write_line(&render_text(session.board()));
            }
            Some(Command::Drop(col)) => match session.select_column(col, view) {
                Transition::Placed { .. } | Transition::Ended { .. } => {
                    view.write_line(&render_text(session.board()));
                }
                Transition::Ignored(Ignored::GameOver) => {
                    view.write_line("The game is over.");
                }
                // Full columns are a silent no-op; parse_command never yields
                // a column outside the board.
                Transition::Ignored(Ignored::ColumnFull | Ignored::OutOfRange) => {}
            },
            None => {
                view.write_line(&format!("Unrecognised input '{}'.", line.trim()));
            }
        }
        prompt(&session, view);
        view.take_error()?;
    }
    Ok(())
}

fn prompt<W: Write>(session: &GameSession, view: &mut PlainView<W>) {
    if session.is_terminal() {
        view.write_line("Type 'r' to play again or 'q' to quit.");
    } else {
        let player = session.current_player();
        view.write_line(&format!(
            "{player} ({}), choose a column 1-{WIDTH}:",
            symbol(player.to_cell())
        ));
    }
}
