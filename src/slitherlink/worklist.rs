use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::common::{Grid, P};

/// Cells waiting to be resolved.
///
/// Cells marked while a round is running collect in a pending batch; the
/// batch joins the queue at the end of the round, minus the cells the queue
/// already holds. A cell is at most once in the batch and at most once in the
/// queue.
pub struct Worklist {
    pending: Vec<P>,
    in_pending: Grid<bool>,
    queue: VecDeque<P>,
    in_queue: Grid<bool>,
    rng: Option<StdRng>,
}

impl Worklist {
    pub fn new(height: i32, width: i32, shuffle_seed: Option<u64>) -> Worklist {
        Worklist {
            pending: vec![],
            in_pending: Grid::new(height, width, false),
            queue: VecDeque::new(),
            in_queue: Grid::new(height, width, false),
            rng: shuffle_seed.map(StdRng::seed_from_u64),
        }
    }
    pub fn mark(&mut self, cell: P) {
        if self.in_pending.is_valid_p(cell) && !self.in_pending[cell] {
            self.in_pending[cell] = true;
            self.pending.push(cell);
        }
    }
    pub fn pop(&mut self) -> Option<P> {
        let cell = self.queue.pop_front()?;
        self.in_queue[cell] = false;
        Some(cell)
    }
    pub fn drain_round(&mut self) {
        let mut batch = Vec::with_capacity(self.pending.len());
        for cell in self.pending.drain(..) {
            self.in_pending[cell] = false;
            if !self.in_queue[cell] {
                batch.push(cell);
            }
        }
        if let Some(rng) = self.rng.as_mut() {
            batch.shuffle(rng);
        }
        for cell in batch {
            self.in_queue[cell] = true;
            self.queue.push_back(cell);
        }
    }
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty() && self.pending.is_empty()
    }
    pub fn is_queued(&self, cell: P) -> bool {
        self.in_queue.is_valid_p(cell) && self.in_queue[cell]
    }
    pub fn is_pending(&self, cell: P) -> bool {
        self.in_pending.is_valid_p(cell) && self.in_pending[cell]
    }
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}
