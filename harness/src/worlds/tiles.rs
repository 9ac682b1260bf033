//! `SlidingTiles`: the n×n sliding puzzle (8-puzzle, 15-puzzle, ...).
//!
//! Tiles are numbered `1..n²`, `0` is the hole. The target has the tiles in
//! ascending order with the hole in the last cell. Moves slide the hole one
//! cell left, right, up or down; undoing a move revisits a state, so the
//! generator is inconsistent.

use std::fmt;

use statespace_kernel::generator::{GeneratorKind, Intrinsic, SelfGenerating};
use statespace_kernel::operators::operator::{Action, Cost, NoArgs, Operator};
use statespace_search::Problem;

use crate::contract::{World, WorldError};

/// Puzzle contents in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tiles {
    size: usize,
    cells: Vec<u16>,
    hole: usize,
}

impl Tiles {
    /// The solved puzzle of side `size`.
    #[must_use]
    pub fn solved(size: usize) -> Self {
        let last = size * size;
        let cells: Vec<u16> = (1..last)
            .chain(std::iter::once(0))
            .map(|t| u16::try_from(t).unwrap_or(u16::MAX))
            .collect();
        Self {
            size,
            cells,
            hole: last.saturating_sub(1),
        }
    }

    /// Build from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidInstance`] unless `cells` is a
    /// permutation of `0..size²` with `size >= 2`.
    pub fn from_cells(size: usize, cells: Vec<u16>) -> Result<Self, WorldError> {
        let invalid = |detail: String| WorldError::InvalidInstance {
            world: "tiles",
            detail,
        };
        let Some(area) = size.checked_mul(size) else {
            return Err(invalid(format!("side {size} is too large")));
        };
        if size < 2 || cells.len() != area {
            return Err(invalid(format!(
                "expected {area} cells for side {size}, got {}",
                cells.len()
            )));
        }
        let mut seen = vec![false; cells.len()];
        for &tile in &cells {
            match seen.get_mut(usize::from(tile)) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(invalid(format!("not a permutation: {cells:?}"))),
            }
        }
        let hole = cells
            .iter()
            .position(|&t| t == 0)
            .ok_or_else(|| invalid("no hole".into()))?;
        Ok(Self { size, cells, hole })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    /// Whether every tile is in its target cell.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let last = self.cells.len() - 1;
        self.hole == last
            && self.cells[..last]
                .iter()
                .zip(1..)
                .all(|(&tile, want)| tile == want)
    }

    /// Whether the target is reachable.
    ///
    /// Odd sides need an even number of inversions. Even sides need the
    /// inversion count plus the hole's row (counted from the bottom, from 1)
    /// to be odd.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let tiles: Vec<u16> = self.cells.iter().copied().filter(|&t| t != 0).collect();
        let inversions: usize = tiles
            .iter()
            .enumerate()
            .map(|(i, &a)| tiles[i + 1..].iter().filter(|&&b| b < a).count())
            .sum();
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            let hole_row_from_bottom = self.size - self.hole / self.size;
            (inversions + hole_row_from_bottom) % 2 == 1
        }
    }

    /// Sum of each tile's row and column offset from its target cell.
    #[must_use]
    pub fn manhattan(&self) -> Cost {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(at, &tile)| {
                let home = usize::from(tile) - 1;
                (at / n).abs_diff(home / n) + (at % n).abs_diff(home % n)
            })
            .map(|d| Cost::try_from(d).unwrap_or(Cost::MAX))
            .sum()
    }

    fn slide(&mut self, to: usize) {
        self.cells.swap(self.hole, to);
        self.hole = to;
    }
}

impl fmt::Display for Tiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(self.size).enumerate() {
            if row > 0 {
                f.write_str(" /")?;
            }
            for &tile in chunk {
                if tile == 0 {
                    f.write_str("  .")?;
                } else {
                    write!(f, " {tile:2}")?;
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

fn can_left(state: &Tiles, _: &NoArgs) -> bool {
    state.hole % state.size != 0
}

fn can_right(state: &Tiles, _: &NoArgs) -> bool {
    state.hole % state.size != state.size - 1
}

fn can_up(state: &Tiles, _: &NoArgs) -> bool {
    state.hole >= state.size
}

fn can_down(state: &Tiles, _: &NoArgs) -> bool {
    state.hole + state.size < state.cells.len()
}

fn left(state: &mut Tiles, _: &NoArgs) {
    state.slide(state.hole - 1);
}

fn right(state: &mut Tiles, _: &NoArgs) {
    state.slide(state.hole + 1);
}

fn up(state: &mut Tiles, _: &NoArgs) {
    state.slide(state.hole - state.size);
}

fn down(state: &mut Tiles, _: &NoArgs) {
    state.slide(state.hole + state.size);
}

pub const LEFT: Operator<Tiles, NoArgs> = Operator::new("left", can_left, left);
pub const RIGHT: Operator<Tiles, NoArgs> = Operator::new("right", can_right, right);
pub const UP: Operator<Tiles, NoArgs> = Operator::new("up", can_up, up);
pub const DOWN: Operator<Tiles, NoArgs> = Operator::new("down", can_down, down);

impl SelfGenerating for Tiles {
    type Args = NoArgs;
    const KIND: GeneratorKind = GeneratorKind::Inconsistent;

    fn operators() -> Vec<Operator<Self, NoArgs>> {
        vec![LEFT, RIGHT, UP, DOWN]
    }

    fn operations(&self) -> impl Iterator<Item = Action<Self, NoArgs>> {
        [LEFT, RIGHT, UP, DOWN]
            .into_iter()
            .filter(move |op| op.is_applicable(self, &NoArgs))
            .map(|op| op.action(NoArgs))
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// A solvable starting position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingTiles {
    start: Tiles,
}

impl SlidingTiles {
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidInstance`] for malformed cells or an
    /// unsolvable position.
    pub fn new(size: usize, cells: Vec<u16>) -> Result<Self, WorldError> {
        let start = Tiles::from_cells(size, cells)?;
        if !start.is_solvable() {
            return Err(WorldError::InvalidInstance {
                world: "tiles",
                detail: format!("unsolvable position:{start}"),
            });
        }
        Ok(Self { start })
    }

    #[must_use]
    pub fn start(&self) -> &Tiles {
        &self.start
    }
}

impl World for SlidingTiles {
    type Generator = Intrinsic<Tiles>;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "tiles"
    }

    fn generator(&self) -> Result<Intrinsic<Tiles>, WorldError> {
        Ok(Intrinsic::new()?)
    }

    fn problem(&self) -> Problem<Tiles> {
        Problem::new(self.start.clone(), Tiles::is_solved)
    }

    fn estimate(&self, state: &Tiles) -> Cost {
        state.manhattan()
    }
}
