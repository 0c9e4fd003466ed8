use log::trace;

use super::*;
use crate::common::P;

impl Engine {
    /// Turns the edge leaving `v1` toward `d` into a line and gives it the
    /// segment color of its endpoints, merging two segments if needed.
    ///
    /// Returns whether the edge, a mask or a color changed.
    pub(super) fn join(&mut self, v1: P, d: Dir) -> Result<bool, SolveError> {
        let (edge, v2) = match (self.board.vertex_edge(v1, d), self.board.vertex_neighbor(v1, d)) {
            (Some(edge), Some(v2)) => (edge, v2),
            _ => return Ok(false),
        };
        if self.board.edge(edge) == EdgeState::Off {
            return Err(Contradiction::EdgeConflict { edge }.into());
        }

        let mut changed = self.restrict(v1, !Pattern::UNUSED)?;
        changed |= self.restrict(v2, !Pattern::UNUSED)?;

        match (self.board.vertex(v1).color, self.board.vertex(v2).color) {
            (None, None) => {
                let color = self.board.fresh_color();
                trace!("line {:?} starts segment {}", edge, color.0);
                self.board.set_vertex_color(v1, color);
                self.board.set_vertex_color(v2, color);
                self.board.set_edge(edge, EdgeState::On(color));
                Ok(true)
            }
            (Some(c1), Some(c2)) if c1 == c2 => {
                if self.board.edge(edge) == EdgeState::On(c1) {
                    Ok(changed)
                } else {
                    trace!("line {:?} closes segment {}", edge, c1.0);
                    self.board.set_edge(edge, EdgeState::On(c1));
                    Ok(true)
                }
            }
            (Some(c1), None) => {
                trace!("line {:?} extends segment {}", edge, c1.0);
                self.board.set_vertex_color(v2, c1);
                self.board.set_edge(edge, EdgeState::On(c1));
                Ok(true)
            }
            (None, Some(c2)) => {
                trace!("line {:?} extends segment {}", edge, c2.0);
                self.board.set_vertex_color(v1, c2);
                self.board.set_edge(edge, EdgeState::On(c2));
                Ok(true)
            }
            (Some(c1), Some(c2)) => {
                trace!("line {:?} merges segment {} into {}", edge, c2.0, c1.0);
                self.board.set_edge(edge, EdgeState::On(c1));
                self.flood_color(v2, c1);
                Ok(true)
            }
        }
    }

    /// Walks the segment starting at `start`, relabeling it with `color`.
    ///
    /// A segment is a simple path, so the walk follows the one line whose
    /// color differs and stops when none is left.
    fn flood_color(&mut self, start: P, color: Color) {
        let mut v = start;
        let mut moved = false;
        loop {
            self.board.set_vertex_color(v, color);
            let next = DIRS.iter().find_map(|&d| {
                let edge = self.board.vertex_edge(v, d)?;
                match self.board.edge(edge) {
                    EdgeState::On(c) if c != color => Some((edge, d)),
                    _ => None,
                }
            });
            match next {
                Some((edge, d)) => {
                    self.board.set_edge(edge, EdgeState::On(color));
                    match self.board.vertex_neighbor(v, d) {
                        Some(w) => v = w,
                        None => break,
                    }
                    moved = true;
                }
                None => break,
            }
        }
        if moved {
            self.mark_vertex(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::engine::tests::problem;
    use super::*;
    use crate::common::LP;

    fn engine(rows: &[&str]) -> Engine {
        Engine::new(&problem(rows), SolverConfig::default()).unwrap()
    }

    #[test]
    fn test_join_fresh_and_extend() {
        let mut engine = engine(&["...", "..."]);

        assert_eq!(engine.join(P(0, 0), Dir::Right), Ok(true));
        let first = engine.board().edge(LP(0, 1));
        assert_eq!(first, EdgeState::On(FIRST_COLOR));
        assert_eq!(engine.board().vertex(P(0, 1)).color, Some(FIRST_COLOR));
        assert!(!engine.board().mask(P(0, 0)).contains(Pattern::UNUSED));
        assert!(!engine.board().mask(P(0, 1)).contains(Pattern::UNUSED));

        assert_eq!(engine.join(P(0, 1), Dir::Right), Ok(true));
        assert_eq!(engine.board().edge(LP(0, 3)), EdgeState::On(FIRST_COLOR));
        assert_eq!(engine.board().vertex(P(0, 2)).color, Some(FIRST_COLOR));

        // Joining the same edge again is a no-op.
        assert_eq!(engine.join(P(0, 1), Dir::Right), Ok(false));
        assert_eq!(engine.join(P(0, 2), Dir::Left), Ok(false));
    }

    #[test]
    fn test_join_merges_segments() {
        let mut engine = engine(&["...", "..."]);

        engine.join(P(0, 0), Dir::Right).unwrap();
        engine.join(P(1, 0), Dir::Down).unwrap();
        engine.join(P(0, 3), Dir::Down).unwrap();
        engine.join(P(1, 3), Dir::Down).unwrap();
        let left = engine.board().vertex(P(0, 0)).color.unwrap();
        let right = engine.board().vertex(P(2, 3)).color.unwrap();
        assert!(left != right);

        // Bridge the two segments from the left one.
        engine.join(P(0, 0), Dir::Down).unwrap();
        engine.join(P(0, 1), Dir::Right).unwrap();
        engine.join(P(0, 2), Dir::Right).unwrap();

        let board = engine.board();
        for &edge in &[LP(0, 1), LP(0, 3), LP(0, 5), LP(1, 0), LP(3, 0), LP(1, 6), LP(3, 6)] {
            assert_eq!(board.edge(edge), EdgeState::On(left), "at {:?}", edge);
        }
        for v in &[P(0, 3), P(1, 3), P(2, 3), P(2, 0)] {
            assert_eq!(board.vertex(*v).color, Some(left));
        }
    }

    #[test]
    fn test_join_blank_edge_is_contradiction() {
        let mut engine = engine(&["..", ".."]);

        engine.turn_off(LP(0, 1)).unwrap();
        assert_eq!(
            engine.join(P(0, 0), Dir::Right),
            Err(SolveError::Contradiction(Contradiction::EdgeConflict { edge: LP(0, 1) }))
        );
        assert_eq!(engine.join(P(0, 0), Dir::Up), Ok(false));
    }
}
