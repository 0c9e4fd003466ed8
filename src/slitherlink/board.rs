use super::*;
use crate::common::{Grid, D, LP, P};

/// Identifier of a loop segment. Ids only grow; a merge retires one for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u32);

pub const FIRST_COLOR: Color = Color(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    Unknown,
    Off,
    On(Color),
}
impl EdgeState {
    pub fn is_on(self) -> bool {
        match self {
            EdgeState::On(_) => true,
            _ => false,
        }
    }
    pub fn is_decided(self) -> bool {
        self != EdgeState::Unknown
    }
    pub fn color(self) -> Option<Color> {
        match self {
            EdgeState::On(c) => Some(c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Endpoint of an edge, named relative to the edge.
///
/// `UL` and `RD` name the first (upper or left) and second (lower or right)
/// endpoint whatever the orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Up,
    Down,
    Left,
    Right,
    UL,
    RD,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub clue: Clue,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex {
    pub mask: Pattern,
    pub color: Option<Color>,
}

/// Cells and vertices are addressed by `P`, edges by their `LP` in the doubled
/// lattice.
#[derive(Clone)]
pub struct Board {
    height: i32,
    width: i32,
    cells: Grid<Cell>,
    vertices: Grid<Vertex>,
    edges: Grid<EdgeState>,
    next_color: Color,
}

impl Board {
    pub fn new(height: i32, width: i32) -> Board {
        let mut vertices = Grid::new(
            height + 1,
            width + 1,
            Vertex {
                mask: Pattern::ALL,
                color: None,
            },
        );
        for y in 0..(height + 1) {
            for x in 0..(width + 1) {
                let mut mask = Pattern::ALL;
                if y == 0 {
                    mask = mask - Pattern::using(Dir::Up);
                }
                if y == height {
                    mask = mask - Pattern::using(Dir::Down);
                }
                if x == 0 {
                    mask = mask - Pattern::using(Dir::Left);
                }
                if x == width {
                    mask = mask - Pattern::using(Dir::Right);
                }
                vertices[P(y, x)].mask = mask;
            }
        }

        Board {
            height,
            width,
            cells: Grid::new(
                height,
                width,
                Cell {
                    clue: NO_CLUE,
                    done: false,
                },
            ),
            vertices,
            edges: Grid::new(height * 2 + 1, width * 2 + 1, EdgeState::Unknown),
            next_color: FIRST_COLOR,
        }
    }

    // public accessor
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn is_valid_cell(&self, pos: P) -> bool {
        self.cells.is_valid_p(pos)
    }
    pub fn is_valid_vertex(&self, pos: P) -> bool {
        self.vertices.is_valid_p(pos)
    }
    pub fn is_valid_edge(&self, pos: LP) -> bool {
        self.edges.is_valid_lp(pos) && pos.is_edge()
    }
    pub fn cell(&self, pos: P) -> Cell {
        self.cells[pos]
    }
    pub fn clue(&self, pos: P) -> Clue {
        self.cells[pos].clue
    }
    pub fn vertex(&self, pos: P) -> Vertex {
        self.vertices[pos]
    }
    pub fn mask(&self, pos: P) -> Pattern {
        self.vertices[pos].mask
    }
    pub fn edge(&self, pos: LP) -> EdgeState {
        self.edges[pos]
    }

    pub fn cells(&self) -> impl Iterator<Item = P> {
        self.cells.positions()
    }
    pub fn vertices(&self) -> impl Iterator<Item = P> {
        self.vertices.positions()
    }
    pub fn edges(&self) -> impl Iterator<Item = LP> {
        self.edges
            .positions()
            .map(|P(y, x)| LP(y, x))
            .filter(|&pos| pos.is_edge())
    }

    // grid model lookups
    pub fn cell_edge(&self, cell: P, side: Dir) -> LP {
        LP::of_cell(cell) + side.offset()
    }
    pub fn cell_edges(&self, cell: P) -> [LP; 4] {
        [
            self.cell_edge(cell, Dir::Up),
            self.cell_edge(cell, Dir::Left),
            self.cell_edge(cell, Dir::Right),
            self.cell_edge(cell, Dir::Down),
        ]
    }
    pub fn cell_vertex(&self, cell: P, corner: Corner) -> P {
        cell + corner.offset()
    }
    pub fn cell_neighbor(&self, cell: P, side: Dir) -> Option<P> {
        let pos = cell + side.offset();
        if self.is_valid_cell(pos) {
            Some(pos)
        } else {
            None
        }
    }
    pub fn vertex_edge(&self, vertex: P, d: Dir) -> Option<LP> {
        let pos = LP::of_vertex(vertex) + d.offset();
        if self.is_valid_edge(pos) {
            Some(pos)
        } else {
            None
        }
    }
    /// The far endpoint of the edge leaving `vertex` toward `d`.
    pub fn vertex_neighbor(&self, vertex: P, d: Dir) -> Option<P> {
        let pos = vertex + d.offset();
        if self.is_valid_vertex(pos) {
            Some(pos)
        } else {
            None
        }
    }
    pub fn edge_orientation(&self, edge: LP) -> Orientation {
        if edge.0 % 2 == 0 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
    pub fn edge_end(&self, edge: LP, end: EdgeEnd) -> Option<P> {
        if !self.is_valid_edge(edge) {
            return None;
        }
        let LP(y, x) = edge;
        match (self.edge_orientation(edge), end) {
            (Orientation::Horizontal, EdgeEnd::Left) | (Orientation::Horizontal, EdgeEnd::UL) => {
                Some(P(y / 2, (x - 1) / 2))
            }
            (Orientation::Horizontal, EdgeEnd::Right) | (Orientation::Horizontal, EdgeEnd::RD) => {
                Some(P(y / 2, (x + 1) / 2))
            }
            (Orientation::Vertical, EdgeEnd::Up) | (Orientation::Vertical, EdgeEnd::UL) => {
                Some(P((y - 1) / 2, x / 2))
            }
            (Orientation::Vertical, EdgeEnd::Down) | (Orientation::Vertical, EdgeEnd::RD) => {
                Some(P((y + 1) / 2, x / 2))
            }
            _ => None,
        }
    }
    pub fn edge_endpoints(&self, edge: LP) -> Option<(P, P)> {
        match (self.edge_end(edge, EdgeEnd::UL), self.edge_end(edge, EdgeEnd::RD)) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
    /// Direction of the edge as seen from its first endpoint.
    pub fn edge_dir_from_first(&self, edge: LP) -> Dir {
        match self.edge_orientation(edge) {
            Orientation::Horizontal => Dir::Right,
            Orientation::Vertical => Dir::Down,
        }
    }
    pub fn cells_around_vertex(&self, vertex: P) -> Vec<P> {
        let mut ret = Vec::with_capacity(4);
        for &d in &[D(-1, -1), D(-1, 0), D(0, -1), D(0, 0)] {
            let pos = vertex + d;
            if self.is_valid_cell(pos) {
                ret.push(pos);
            }
        }
        ret
    }

    // summary
    pub fn num_decided_edges(&self) -> usize {
        self.edges().filter(|&e| self.edge(e).is_decided()).count()
    }
    pub fn num_lines(&self) -> usize {
        self.edges().filter(|&e| self.edge(e).is_on()).count()
    }
    pub fn num_edges(&self) -> usize {
        (self.height * (self.width + 1) + (self.height + 1) * self.width) as usize
    }
    pub fn fully_decided(&self) -> bool {
        self.edges().all(|e| self.edge(e).is_decided())
    }
    pub fn count_sides(&self, cell: P) -> (usize, usize) {
        let mut on = 0;
        let mut off = 0;
        for &e in &self.cell_edges(cell) {
            match self.edge(e) {
                EdgeState::On(_) => on += 1,
                EdgeState::Off => off += 1,
                EdgeState::Unknown => (),
            }
        }
        (on, off)
    }
    pub fn degree(&self, vertex: P) -> usize {
        DIRS.iter()
            .filter_map(|&d| self.vertex_edge(vertex, d))
            .filter(|&e| self.edge(e).is_on())
            .count()
    }

    // modifier, reserved for the engine
    pub(super) fn set_clue(&mut self, pos: P, clue: Clue) {
        self.cells[pos].clue = clue;
    }
    pub(super) fn set_done(&mut self, pos: P) {
        self.cells[pos].done = true;
    }
    pub(super) fn set_edge(&mut self, pos: LP, state: EdgeState) {
        self.edges[pos] = state;
    }
    pub(super) fn set_mask(&mut self, pos: P, mask: Pattern) {
        self.vertices[pos].mask = mask;
    }
    pub(super) fn set_vertex_color(&mut self, pos: P, color: Color) {
        self.vertices[pos].color = Some(color);
    }
    pub(super) fn fresh_color(&mut self) -> Color {
        let ret = self.next_color;
        self.next_color = Color(ret.0 + 1);
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_masks() {
        let board = Board::new(2, 3);

        assert_eq!(board.mask(P(0, 0)), Pattern::RD | Pattern::UNUSED);
        assert_eq!(board.mask(P(0, 3)), Pattern::LD | Pattern::UNUSED);
        assert_eq!(board.mask(P(2, 0)), Pattern::UR | Pattern::UNUSED);
        assert_eq!(board.mask(P(2, 3)), Pattern::UL | Pattern::UNUSED);
        assert_eq!(
            board.mask(P(0, 1)),
            Pattern::LR | Pattern::LD | Pattern::RD | Pattern::UNUSED
        );
        assert_eq!(board.mask(P(1, 1)), Pattern::ALL);
        assert_eq!(board.num_edges(), 17);
        assert_eq!(board.edges().count(), 17);
    }

    #[test]
    fn test_cell_lookup() {
        let board = Board::new(2, 3);
        let cell = P(1, 2);

        assert_eq!(board.cell_edge(cell, Dir::Up), LP(2, 5));
        assert_eq!(board.cell_edge(cell, Dir::Left), LP(3, 4));
        assert_eq!(board.cell_edge(cell, Dir::Right), LP(3, 6));
        assert_eq!(board.cell_edge(cell, Dir::Down), LP(4, 5));
        assert_eq!(board.cell_vertex(cell, Corner::UL), P(1, 2));
        assert_eq!(board.cell_vertex(cell, Corner::RD), P(2, 3));
        assert_eq!(board.cell_neighbor(cell, Dir::Right), None);
        assert_eq!(board.cell_neighbor(cell, Dir::Up), Some(P(0, 2)));
    }

    #[test]
    fn test_vertex_lookup() {
        let board = Board::new(2, 3);

        assert_eq!(board.vertex_edge(P(0, 0), Dir::Up), None);
        assert_eq!(board.vertex_edge(P(0, 0), Dir::Left), None);
        assert_eq!(board.vertex_edge(P(0, 0), Dir::Right), Some(LP(0, 1)));
        assert_eq!(board.vertex_edge(P(0, 0), Dir::Down), Some(LP(1, 0)));
        assert_eq!(board.vertex_edge(P(2, 3), Dir::Down), None);
        assert_eq!(board.vertex_neighbor(P(2, 3), Dir::Up), Some(P(1, 3)));
        assert_eq!(board.vertex_neighbor(P(2, 3), Dir::Right), None);
        assert_eq!(board.cells_around_vertex(P(0, 0)), vec![P(0, 0)]);
        assert_eq!(board.cells_around_vertex(P(1, 1)).len(), 4);
        assert_eq!(board.cells_around_vertex(P(2, 3)), vec![P(1, 2)]);
    }

    #[test]
    fn test_edge_lookup() {
        let board = Board::new(2, 3);

        let horizontal = LP(2, 3);
        assert_eq!(board.edge_orientation(horizontal), Orientation::Horizontal);
        assert_eq!(board.edge_end(horizontal, EdgeEnd::Left), Some(P(1, 1)));
        assert_eq!(board.edge_end(horizontal, EdgeEnd::Right), Some(P(1, 2)));
        assert_eq!(board.edge_end(horizontal, EdgeEnd::Up), None);
        assert_eq!(board.edge_endpoints(horizontal), Some((P(1, 1), P(1, 2))));

        let vertical = LP(3, 6);
        assert_eq!(board.edge_orientation(vertical), Orientation::Vertical);
        assert_eq!(board.edge_end(vertical, EdgeEnd::Up), Some(P(1, 3)));
        assert_eq!(board.edge_end(vertical, EdgeEnd::RD), Some(P(2, 3)));
        assert_eq!(board.edge_end(vertical, EdgeEnd::Left), None);

        assert_eq!(board.edge_end(LP(3, 3), EdgeEnd::UL), None);
        assert_eq!(board.edge_end(LP(-1, 0), EdgeEnd::UL), None);
    }
}
