//! Front-ends: the full-screen ratatui game view and a plain line-oriented
//! view for dumb terminals and scripted play.

mod app;
mod game_view;
pub mod plain;
mod status;

pub use app::App;
pub use game_view::Palette;
pub use status::StatusView;
