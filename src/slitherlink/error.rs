use std::error;
use std::fmt;

use super::Clue;
use crate::common::{LP, P};

/// The board reached a state no loop can satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contradiction {
    /// Every connection pattern of the vertex has been ruled out.
    EmptyMask { vertex: P },
    /// The edge was asked to be both a line and a blank.
    EdgeConflict { edge: LP },
    /// More lines around the cell than its clue allows.
    ClueOverflow { cell: P, clue: Clue, lines: usize },
    /// More blanks around the cell than its clue allows.
    ClueStarved { cell: P, clue: Clue, blanks: usize },
}

/// A propagation loop ran past its iteration ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    Rounds { limit: usize },
    VertexLoop { vertex: P, limit: usize },
    CellLoop { cell: P, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    Contradiction(Contradiction),
    Divergence(Divergence),
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Contradiction::EmptyMask { vertex: P(y, x) } => {
                write!(f, "no connection pattern left at vertex ({}, {})", y, x)
            }
            Contradiction::EdgeConflict { edge: LP(y, x) } => {
                write!(f, "edge ({}, {}) must be both a line and a blank", y, x)
            }
            Contradiction::ClueOverflow {
                cell: P(y, x),
                clue: Clue(c),
                lines,
            } => write!(f, "cell ({}, {}) has {} lines for clue {}", y, x, lines, c),
            Contradiction::ClueStarved {
                cell: P(y, x),
                clue: Clue(c),
                blanks,
            } => write!(f, "cell ({}, {}) has {} blanks for clue {}", y, x, blanks, c),
        }
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Divergence::Rounds { limit } => {
                write!(f, "propagation did not settle within {} rounds", limit)
            }
            Divergence::VertexLoop {
                vertex: P(y, x),
                limit,
            } => write!(
                f,
                "vertex ({}, {}) did not settle within {} iterations",
                y, x, limit
            ),
            Divergence::CellLoop { cell: P(y, x), limit } => write!(
                f,
                "cell ({}, {}) did not settle within {} iterations",
                y, x, limit
            ),
        }
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SolveError::Contradiction(ref err) => write!(f, "contradiction: {}", err),
            SolveError::Divergence(ref err) => write!(f, "divergence: {}", err),
        }
    }
}

impl error::Error for Contradiction {}
impl error::Error for Divergence {}

impl error::Error for SolveError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            SolveError::Contradiction(ref err) => Some(err),
            SolveError::Divergence(ref err) => Some(err),
        }
    }
}

impl From<Contradiction> for SolveError {
    fn from(err: Contradiction) -> SolveError {
        SolveError::Contradiction(err)
    }
}

impl From<Divergence> for SolveError {
    fn from(err: Divergence) -> SolveError {
        SolveError::Divergence(err)
    }
}
