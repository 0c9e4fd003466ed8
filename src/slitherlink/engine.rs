use std::fmt;

use log::{debug, trace, warn};

use super::worklist::Worklist;
use super::*;
use crate::common::{Grid, LP, P};
use crate::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Ceiling on the number of resolved cells. `None` picks a bound from the board size.
    pub max_rounds: Option<usize>,
    /// Number of changing passes a local fixpoint loop may make before it
    /// reports divergence. The pass that finds nothing to change is free.
    pub local_iteration_limit: usize,
    pub shuffle_seed: Option<u64>,
    /// Let an edge closing the only segment on the board stay undecided.
    pub allow_closing_edge: bool,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            max_rounds: None,
            local_iteration_limit: 64,
            shuffle_seed: None,
            allow_closing_edge: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rounds: usize,
    pub decided_edges: usize,
    pub total_edges: usize,
    pub lines: usize,
    pub solved: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "rounds: {}, decided edges: {}/{}, lines: {}, solved: {}",
            self.rounds,
            self.decided_edges,
            self.total_edges,
            self.lines,
            if self.solved { "yes" } else { "no" }
        )
    }
}

/// Propagation state of one puzzle: the board plus the cells whose
/// surroundings changed since they were last looked at.
pub struct Engine {
    pub(super) board: Board,
    worklist: Worklist,
    config: SolverConfig,
    rounds: usize,
}

impl Engine {
    /// Fails on an empty grid or a clue outside `0..=4`.
    pub fn new(clues: &Grid<Clue>, config: SolverConfig) -> Result<Engine, format::Error> {
        let height = clues.height();
        let width = clues.width();
        if height < 1 || width < 1 {
            return Err(format::Error::Format);
        }
        for pos in clues.positions() {
            check_clue(clues[pos])?;
        }

        let mut board = Board::new(height, width);
        let mut worklist = Worklist::new(height, width, config.shuffle_seed);

        for pos in clues.positions() {
            let clue = clues[pos];
            if clue != NO_CLUE {
                board.set_clue(pos, clue);
                worklist.mark(pos);
            }
        }
        worklist.drain_round();

        Ok(Engine {
            board,
            worklist,
            config,
            rounds: 0,
        })
    }

    pub fn from_clues<I>(
        height: i32,
        width: i32,
        clues: I,
        config: SolverConfig,
    ) -> Result<Engine, format::Error>
    where
        I: IntoIterator<Item = Clue>,
    {
        let grid = clue_grid(height, width, clues)?;
        Engine::new(&grid, config)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
    pub fn rounds(&self) -> usize {
        self.rounds
    }
    /// Whether `cell` waits in the queue or in the batch for the next round.
    pub fn is_pending(&self, cell: P) -> bool {
        self.worklist.is_queued(cell) || self.worklist.is_pending(cell)
    }
    pub fn is_settled(&self) -> bool {
        self.worklist.is_empty()
    }
    pub fn summary(&self) -> Summary {
        Summary {
            rounds: self.rounds,
            decided_edges: self.board.num_decided_edges(),
            total_edges: self.board.num_edges(),
            lines: self.board.num_lines(),
            solved: self.board.fully_decided(),
        }
    }

    pub fn solve(&mut self) -> Result<Summary, SolveError> {
        debug!(
            "solving {}x{} board ({} cells queued)",
            self.board.height(),
            self.board.width(),
            self.worklist.queue_len()
        );
        loop {
            match self.step() {
                Ok(Some(_)) => (),
                Ok(None) => break,
                Err(err) => {
                    warn!("{}", err);
                    return Err(err);
                }
            }
        }
        let summary = self.summary();
        debug!("{}", summary);
        Ok(summary)
    }
    /// Takes one cell off the queue and resolves it unless it is already done.
    ///
    /// Returns the cell taken, or `None` once the worklist is empty.
    pub fn step(&mut self) -> Result<Option<P>, SolveError> {
        let cell = match self.worklist.pop() {
            Some(cell) => cell,
            None => {
                self.worklist.drain_round();
                match self.worklist.pop() {
                    Some(cell) => cell,
                    None => return Ok(None),
                }
            }
        };
        if self.board.cell(cell).done {
            trace!("skip done cell {:?}", cell);
            return Ok(Some(cell));
        }

        let limit = self.max_rounds();
        if self.rounds >= limit {
            return Err(Divergence::Rounds { limit }.into());
        }
        self.rounds += 1;

        trace!("resolve cell {:?} (clue {})", cell, self.board.clue(cell).0);
        self.resolve_cell(cell)?;
        self.worklist.drain_round();

        Ok(Some(cell))
    }

    fn max_rounds(&self) -> usize {
        match self.config.max_rounds {
            Some(n) => n,
            None => {
                let cells = (self.board.height() * self.board.width()) as usize;
                256 * (cells + 1)
            }
        }
    }

    pub(super) fn local_limit(&self) -> usize {
        self.config.local_iteration_limit
    }
    pub(super) fn mark_cell(&mut self, cell: P) {
        if self.board.is_valid_cell(cell) && !self.board.cell(cell).done {
            self.worklist.mark(cell);
        }
    }
    pub(super) fn mark_vertex(&mut self, vertex: P) {
        for cell in self.board.cells_around_vertex(vertex) {
            self.mark_cell(cell);
        }
    }
    fn mark_edge(&mut self, edge: LP) {
        if let Some((a, b)) = self.board.edge_endpoints(edge) {
            self.mark_vertex(a);
            self.mark_vertex(b);
        }
    }

    pub(super) fn turn_off(&mut self, edge: LP) -> Result<bool, SolveError> {
        match self.board.edge(edge) {
            EdgeState::Off => Ok(false),
            EdgeState::On(_) => Err(Contradiction::EdgeConflict { edge }.into()),
            EdgeState::Unknown => {
                trace!("blank {:?}", edge);
                self.board.set_edge(edge, EdgeState::Off);
                self.mark_edge(edge);
                Ok(true)
            }
        }
    }
    /// Makes `edge` a line, merging the segments at its endpoints.
    pub(super) fn add_edge(&mut self, edge: LP) -> Result<bool, SolveError> {
        let first = match self.board.edge_end(edge, EdgeEnd::UL) {
            Some(v) => v,
            None => return Ok(false),
        };
        let d = self.board.edge_dir_from_first(edge);
        let changed = self.join(first, d)?;
        if changed {
            self.mark_edge(edge);
        }
        Ok(changed)
    }
    pub(super) fn restrict(&mut self, vertex: P, allowed: Pattern) -> Result<bool, SolveError> {
        let current = self.board.mask(vertex);
        let next = current & allowed;
        if next == current {
            return Ok(false);
        }
        if next.is_empty() {
            return Err(Contradiction::EmptyMask { vertex }.into());
        }
        self.board.set_mask(vertex, next);
        self.mark_vertex(vertex);
        Ok(true)
    }
}
