use super::Player;

/// Number of rows. Row 0 is the top, row `HEIGHT - 1` the bottom.
pub const HEIGHT: usize = 6;
/// Number of columns.
pub const WIDTH: usize = 7;

/// Pieces in a row needed to win.
const CONNECT: usize = 4;

/// The four line directions as (row step, column step): horizontal,
/// vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

/// Four grid coordinates `(row, col)` forming a line.
pub type Line = [(usize, usize); CONNECT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Get the cell at a specific position
    ///
    /// # Panics
    ///
    /// Panics if `row >= HEIGHT` or `col >= WIDTH`.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Row a piece dropped into `col` would land on, scanning up from the
    /// bottom. `None` if the column is full or outside the grid.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= WIDTH {
            return None;
        }
        (0..HEIGHT).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Write a player's piece into an empty cell.
    pub fn set(&mut self, row: usize, col: usize, player: Player) {
        debug_assert_eq!(
            self.cells[row][col],
            Cell::Empty,
            "cell ({row}, {col}) is already occupied"
        );
        self.cells[row][col] = player.to_cell();
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        self.landing_row(col).is_none()
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        match self.landing_row(col) {
            Some(row) => HEIGHT - 1 - row,
            None if col < WIDTH => HEIGHT,
            None => 0,
        }
    }

    /// Total number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Columns that can still take a piece
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    /// Scan every anchor for four of `player`'s pieces in a row.
    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// First line of four belonging to `player`, in row-major anchor order.
    pub fn winning_line(&self, player: Player) -> Option<Line> {
        let target = player.to_cell();
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                for &(dr, dc) in &DIRECTIONS {
                    if let Some(line) = line_from(row, col, dr, dc) {
                        if line.iter().all(|&(r, c)| self.cells[r][c] == target) {
                            return Some(line);
                        }
                    }
                }
            }
        }
        None
    }

    /// Check if the piece at (row, col) is part of four in a row.
    ///
    /// Only looks along the four axes through that cell, so it agrees with
    /// [`Board::has_four_in_a_row`] whenever the position before the piece
    /// was placed had no winner. A position outside the grid never wins.
    pub fn wins_through(&self, row: usize, col: usize) -> bool {
        if row >= HEIGHT || col >= WIDTH {
            return false;
        }
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + self.run_length(row, col, dr, dc, cell) + self.run_length(row, col, -dr, -dc, cell)
                >= CONNECT
        })
    }

    /// Count consecutive `cell`s starting next to (row, col) and stepping by
    /// (dr, dc).
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut pos = step(row, col, dr, dc);
        while let Some((r, c)) = pos {
            if self.cells[r][c] != cell {
                break;
            }
            count += 1;
            pos = step(r, c, dr, dc);
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Move one cell by (dr, dc), staying inside the grid.
fn step(row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(dr).filter(|&r| r < HEIGHT)?;
    let c = col.checked_add_signed(dc).filter(|&c| c < WIDTH)?;
    Some((r, c))
}

/// The line of four anchored at (row, col) in direction (dr, dc), if every
/// coordinate is in bounds.
fn line_from(row: usize, col: usize, dr: isize, dc: isize) -> Option<Line> {
    let mut line = [(row, col); CONNECT];
    for i in 1..CONNECT {
        line[i] = step(line[i - 1].0, line[i - 1].1, dr, dc)?;
    }
    Some(line)
}
