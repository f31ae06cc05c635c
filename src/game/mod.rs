//! Core Connect Four game logic: the board and win detection, players, the
//! turn-by-turn session, and the view contract it reports to.

mod board;
mod player;
mod session;
mod view;

pub use board::{Board, Cell, Line, HEIGHT, WIDTH};
pub use player::Player;
pub use session::{GameOutcome, GameSession, Ignored, Phase, Transition};
pub use view::{Announcement, NullView, View};
