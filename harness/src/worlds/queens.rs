//! `NQueens`: place n non-attacking queens on an n×n board.
//!
//! Queens are placed row by row, always in the first empty row and only on
//! squares no earlier queen attacks. Every board is therefore reached by
//! exactly one placement sequence and the generator is consistent: no
//! duplicate detection is needed.

use std::fmt;

use statespace_kernel::generator::{GeneratorKind, Intrinsic, SelfGenerating};
use statespace_kernel::operators::operator::{Action, Operator};
use statespace_search::Problem;

use crate::contract::{World, WorldError};

/// A board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.row, self.col)
    }
}

/// Column of the queen in each row, if placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: Vec<Option<usize>>,
}

impl Board {
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            rows: vec![None; size],
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Queen column per row.
    #[must_use]
    pub fn rows(&self) -> &[Option<usize>] {
        &self.rows
    }

    /// Whether every row holds a queen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rows.iter().all(Option::is_some)
    }

    fn first_empty_row(&self) -> Option<usize> {
        self.rows.iter().position(Option::is_none)
    }

    /// Whether a queen already on the board attacks `square`.
    fn attacked(&self, square: Square) -> bool {
        self.rows.iter().enumerate().any(|(row, col)| {
            col.is_some_and(|col| {
                col == square.col || row.abs_diff(square.row) == col.abs_diff(square.col)
            })
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for (row, queen) in self.rows.iter().enumerate() {
            if row > 0 {
                f.write_str("\n")?;
            }
            let line: Vec<&str> = (0..size)
                .map(|col| if *queen == Some(col) { "Q" } else { "." })
                .collect();
            f.write_str(&line.join(" "))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

fn place_fits(state: &Board, square: &Square) -> bool {
    square.col < state.size()
        && state.first_empty_row() == Some(square.row)
        && !state.attacked(*square)
}

fn place(state: &mut Board, square: &Square) {
    state.rows[square.row] = Some(square.col);
}

pub const PLACE: Operator<Board, Square> = Operator::new("place", place_fits, place);

impl SelfGenerating for Board {
    type Args = Square;
    const KIND: GeneratorKind = GeneratorKind::Consistent;

    fn operators() -> Vec<Operator<Self, Square>> {
        vec![PLACE]
    }

    fn operations(&self) -> impl Iterator<Item = Action<Self, Square>> {
        let size = self.size();
        self.first_empty_row()
            .into_iter()
            .flat_map(move |row| (0..size).map(move |col| Square { row, col }))
            .filter(move |&square| !self.attacked(square))
            .map(|square| PLACE.action(square))
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NQueens {
    size: usize,
}

impl NQueens {
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidInstance`] for a zero-sized board.
    pub fn new(size: usize) -> Result<Self, WorldError> {
        if size == 0 {
            return Err(WorldError::InvalidInstance {
                world: "queens",
                detail: "board size must be positive".into(),
            });
        }
        Ok(Self { size })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl World for NQueens {
    type Generator = Intrinsic<Board>;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "queens"
    }

    fn generator(&self) -> Result<Intrinsic<Board>, WorldError> {
        Ok(Intrinsic::new()?)
    }

    fn problem(&self) -> Problem<Board> {
        Problem::new(Board::empty(self.size), Board::is_complete)
    }
}
