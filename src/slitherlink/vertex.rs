use super::*;
use crate::common::P;

impl Engine {
    /// Brings the mask of `vertex` and its incident edges in agreement.
    ///
    /// Returns whether any mask or edge changed.
    pub(super) fn update_vertex(&mut self, vertex: P) -> Result<bool, SolveError> {
        let mut changed = self.drop_closed_directions(vertex)?;
        if !self.board.mask(vertex).is_pinned() {
            changed |= self.force_from_mask(vertex)?;
        }
        if self.board.mask(vertex).is_pinned() {
            changed |= self.settle_pinned(vertex)?;
        }
        Ok(changed)
    }

    /// Updates the four corners of `cell`, upper-left first.
    pub(super) fn update_corners(&mut self, cell: P) -> Result<bool, SolveError> {
        let mut changed = false;
        for &corner in &CORNERS {
            let vertex = self.board.cell_vertex(cell, corner);
            changed |= self.update_vertex(vertex)?;
        }
        Ok(changed)
    }

    fn is_open(&self, vertex: P, d: Dir, mask: Pattern) -> bool {
        match self.board.vertex_edge(vertex, d) {
            Some(edge) => self.board.edge(edge) != EdgeState::Off && mask.may_use(d),
            None => false,
        }
    }

    // Removes every pattern through a direction without a usable edge.
    fn drop_closed_directions(&mut self, vertex: P) -> Result<bool, SolveError> {
        let limit = self.local_limit();
        let mut passes = 0;
        loop {
            let mask = self.board.mask(vertex);
            let mut allowed = Pattern::ALL;
            for &d in &DIRS {
                if !self.is_open(vertex, d, mask) {
                    allowed = allowed - Pattern::using(d);
                }
            }
            if !self.restrict(vertex, allowed)? {
                return Ok(passes > 0);
            }
            passes += 1;
            if passes > limit {
                return Err(Divergence::VertexLoop { vertex, limit }.into());
            }
        }
    }

    // Lines directions every pattern uses, blanks directions no pattern uses,
    // and drops the patterns an existing line rules out.
    fn force_from_mask(&mut self, vertex: P) -> Result<bool, SolveError> {
        let limit = self.local_limit();
        let mut passes = 0;
        loop {
            let mut changed_here = false;

            let mask = self.board.mask(vertex);
            for &d in &DIRS {
                if let Some(edge) = self.board.vertex_edge(vertex, d) {
                    if self.board.edge(edge) == EdgeState::Unknown && mask.must_use(d) {
                        changed_here |= self.add_edge(edge)?;
                    }
                }
            }
            for &d in &DIRS {
                if let Some(edge) = self.board.vertex_edge(vertex, d) {
                    if self.board.edge(edge).is_on() {
                        changed_here |= self.restrict(vertex, Pattern::using(d))?;
                    }
                }
            }
            let pinned = self.board.mask(vertex).is_pinned();
            if !pinned {
                let mask = self.board.mask(vertex);
                for &d in &DIRS {
                    if let Some(edge) = self.board.vertex_edge(vertex, d) {
                        if self.board.edge(edge) == EdgeState::Unknown && !mask.may_use(d) {
                            changed_here |= self.turn_off(edge)?;
                        }
                    }
                }
            }

            if !changed_here {
                return Ok(passes > 0);
            }
            passes += 1;
            if passes > limit {
                return Err(Divergence::VertexLoop { vertex, limit }.into());
            }
            if pinned {
                return Ok(true);
            }
        }
    }

    // The mask names the shape at this vertex: every incident edge follows.
    fn settle_pinned(&mut self, vertex: P) -> Result<bool, SolveError> {
        let mask = self.board.mask(vertex);
        let mut changed = false;
        for &d in &DIRS {
            if let Some(edge) = self.board.vertex_edge(vertex, d) {
                if mask.may_use(d) {
                    changed |= self.join(vertex, d)?;
                } else {
                    changed |= self.turn_off(edge)?;
                }
            }
        }
        if changed {
            self.mark_vertex(vertex);
        }
        Ok(changed)
    }
}
