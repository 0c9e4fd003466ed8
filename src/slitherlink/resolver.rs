use super::rules::*;
use super::*;
use crate::common::P;

impl Engine {
    pub(super) fn resolve_cell(&mut self, cell: P) -> Result<(), SolveError> {
        let clue = self.board.clue(cell);

        if clue == Clue(0) {
            for &edge in &self.board.cell_edges(cell) {
                self.turn_off(edge)?;
            }
            self.board.set_done(cell);
            self.update_corners(cell)?;
            return Ok(());
        }

        self.update_corners(cell)?;
        self.keep_segments_open(cell)?;

        if clue == NO_CLUE {
            if self.board.cell_edges(cell).iter().all(|&e| self.board.edge(e).is_decided()) {
                self.board.set_done(cell);
            }
            return Ok(());
        }
        if self.settle_satisfied(cell, clue)? {
            return Ok(());
        }

        match clue.0 {
            1 => self.settle_corners(cell, Engine::apply_one)?,
            2 => self.settle_corners(cell, Engine::apply_two)?,
            3 => self.settle_corners(cell, Engine::apply_three)?,
            _ => (),
        }
        self.fill_quota(cell, clue)?;
        Ok(())
    }

    fn side_state(&self, cell: P, side: Dir) -> EdgeState {
        self.board.edge(self.board.cell_edge(cell, side))
    }
    fn corner_mask(&self, cell: P, corner: Corner) -> Pattern {
        self.board.mask(self.board.cell_vertex(cell, corner))
    }
    fn restrict_corner(&mut self, cell: P, corner: Corner, allowed: Pattern) -> Result<bool, SolveError> {
        let vertex = self.board.cell_vertex(cell, corner);
        self.restrict(vertex, allowed)
    }
    fn corner_masks(&self, cell: P) -> [Pattern; 4] {
        [
            self.corner_mask(cell, Corner::UL),
            self.corner_mask(cell, Corner::UR),
            self.corner_mask(cell, Corner::LD),
            self.corner_mask(cell, Corner::RD),
        ]
    }

    // Blanks every undecided side whose endpoints already lie on one segment.
    fn keep_segments_open(&mut self, cell: P) -> Result<(), SolveError> {
        let limit = self.local_limit();
        let mut passes = 0;
        while self.stay_open(cell)? {
            passes += 1;
            if passes > limit {
                return Err(Divergence::CellLoop { cell, limit }.into());
            }
            self.update_corners(cell)?;
        }
        Ok(())
    }

    pub(super) fn stay_open(&mut self, cell: P) -> Result<bool, SolveError> {
        let mut changed = false;
        for &edge in &self.board.cell_edges(cell) {
            if self.board.edge(edge) != EdgeState::Unknown {
                continue;
            }
            let (a, b) = match self.board.edge_endpoints(edge) {
                Some(ends) => ends,
                None => continue,
            };
            match (self.board.vertex(a).color, self.board.vertex(b).color) {
                (Some(c1), Some(c2)) if c1 == c2 => {
                    if self.config().allow_closing_edge && self.only_segment(c1) {
                        continue;
                    }
                    changed |= self.turn_off(edge)?;
                }
                _ => (),
            }
        }
        Ok(changed)
    }

    fn only_segment(&self, color: Color) -> bool {
        self.board
            .edges()
            .all(|e| match self.board.edge(e) {
                EdgeState::On(c) => c == color,
                _ => true,
            })
    }

    // Enough lines around the cell: the remaining sides are blanks.
    fn settle_satisfied(&mut self, cell: P, clue: Clue) -> Result<bool, SolveError> {
        let (lines, _) = self.board.count_sides(cell);
        let expected = clue.0 as usize;
        if lines > expected {
            return Err(Contradiction::ClueOverflow { cell, clue, lines }.into());
        }
        if lines < expected {
            return Ok(false);
        }
        for &edge in &self.board.cell_edges(cell) {
            if self.board.edge(edge) == EdgeState::Unknown {
                self.turn_off(edge)?;
            }
        }
        self.board.set_done(cell);
        self.update_corners(cell)?;
        Ok(true)
    }

    // Enough blanks around the cell: the remaining sides are lines.
    fn fill_quota(&mut self, cell: P, clue: Clue) -> Result<bool, SolveError> {
        let (_, blanks) = self.board.count_sides(cell);
        let expected = match 4usize.checked_sub(clue.0 as usize) {
            Some(n) if blanks <= n => n,
            _ => return Err(Contradiction::ClueStarved { cell, clue, blanks }.into()),
        };
        if blanks < expected {
            return Ok(false);
        }
        for &edge in &self.board.cell_edges(cell) {
            if self.board.edge(edge) == EdgeState::Unknown {
                self.add_edge(edge)?;
            }
        }
        self.board.set_done(cell);
        self.update_corners(cell)?;
        Ok(true)
    }

    // Applies `rule` and updates the corners until no corner mask changes,
    // allowing at most `local_limit` passes that change one.
    fn settle_corners<F>(&mut self, cell: P, rule: F) -> Result<(), SolveError>
    where
        F: Fn(&mut Engine, P) -> Result<(), SolveError>,
    {
        let limit = self.local_limit();
        let mut passes = 0;
        loop {
            let before = self.corner_masks(cell);
            rule(self, cell)?;
            self.update_corners(cell)?;
            if self.corner_masks(cell) == before {
                return Ok(());
            }
            passes += 1;
            if passes > limit {
                return Err(Divergence::CellLoop { cell, limit }.into());
            }
        }
    }

    fn apply_one(&mut self, cell: P) -> Result<(), SolveError> {
        for &corner in &CORNERS {
            if one_receives_signal(corner, self.corner_mask(cell, corner)) {
                let (a, b) = corner.opposite().sides();
                self.turn_off(self.board.cell_edge(cell, a))?;
                self.turn_off(self.board.cell_edge(cell, b))?;
            }
        }
        for &corner in &CORNERS {
            let (a, b) = corner.sides();
            if self.side_state(cell, a) == EdgeState::Off && self.side_state(cell, b) == EdgeState::Off {
                self.restrict_corner(cell, corner.opposite(), one_requires_tail(corner))?;
            }
        }
        for &corner in &CORNERS {
            self.restrict_corner(cell, corner, one_at_most(corner))?;
        }
        Ok(())
    }

    fn apply_two(&mut self, cell: P) -> Result<(), SolveError> {
        for &source in &CORNERS {
            let allowed = two_opposite_corner(source, self.corner_mask(cell, source));
            self.restrict_corner(cell, source.opposite(), allowed)?;
        }

        for &corner in &CORNERS {
            if let Some((opposite, adjacent)) = two_both_or_neither(corner, self.corner_mask(cell, corner)) {
                self.restrict_corner(cell, corner.opposite(), opposite)?;
                for &other in &CORNERS {
                    if other != corner && other != corner.opposite() {
                        self.restrict_corner(cell, other, adjacent)?;
                    }
                }
            }
        }

        for &side in &DIRS {
            if self.side_state(cell, side) != EdgeState::Off {
                continue;
            }
            for &(corner, forced) in &two_elimination(side) {
                if !self.corner_mask(cell, corner).intersects(corner.inner_turn()) {
                    self.add_edge(self.board.cell_edge(cell, forced))?;
                }
            }
        }

        for &corner in &CORNERS {
            let (a, b) = corner.sides();
            let (ea, eb) = (self.side_state(cell, a), self.side_state(cell, b));
            if (ea.is_on() && eb == EdgeState::Off) || (ea == EdgeState::Off && eb.is_on()) {
                self.restrict_corner(cell, corner.opposite(), two_on_next_to_off(corner))?;
            }
        }
        Ok(())
    }

    fn apply_three(&mut self, cell: P) -> Result<(), SolveError> {
        for &corner in &CORNERS {
            if three_pigeonhole(corner, self.corner_mask(cell, corner)) {
                let (a, b) = corner.opposite().sides();
                self.add_edge(self.board.cell_edge(cell, a))?;
                self.add_edge(self.board.cell_edge(cell, b))?;
            }
        }

        for &corner in &CORNERS {
            if let Some(allowed) = three_sends_signal(corner, self.corner_mask(cell, corner)) {
                self.restrict_corner(cell, corner.opposite(), allowed)?;
            }
        }

        for &side in &DIRS {
            let neighbor = match self.board.cell_neighbor(cell, side) {
                Some(neighbor) => neighbor,
                None => continue,
            };
            if self.board.clue(neighbor) != Clue(3) {
                continue;
            }
            self.add_edge(self.board.cell_edge(cell, side))?;
            self.add_edge(self.board.cell_edge(cell, side.opposite()))?;
            for &corner in &CORNERS {
                let (a, b) = corner.sides();
                if a == side || b == side {
                    self.restrict_corner(cell, corner, three_adjacent(corner, side))?;
                }
            }
        }

        for &corner in &CORNERS {
            self.restrict_corner(cell, corner, three_touches(corner))?;
        }
        Ok(())
    }
}
