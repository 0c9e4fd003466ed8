use std::ops::{Add, Index, IndexMut};

/// Position of a cell or a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct P(pub i32, pub i32);

/// Position in the doubled lattice where vertices, edges and cells share one grid.
///
/// - (even, even): vertex
/// - (even, odd): horizontal edge
/// - (odd, even): vertical edge
/// - (odd, odd): cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LP(pub i32, pub i32);

/// Offset between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct D(pub i32, pub i32);

impl LP {
    pub fn of_cell(pos: P) -> LP {
        LP(pos.0 * 2 + 1, pos.1 * 2 + 1)
    }
    pub fn of_vertex(pos: P) -> LP {
        LP(pos.0 * 2, pos.1 * 2)
    }
    pub fn is_edge(self) -> bool {
        (self.0 + self.1) % 2 != 0
    }
}

impl Add<D> for P {
    type Output = P;
    fn add(self, rhs: D) -> P {
        P(self.0 + rhs.0, self.1 + rhs.1)
    }
}
impl Add<D> for LP {
    type Output = LP;
    fn add(self, rhs: D) -> LP {
        LP(self.0 + rhs.0, self.1 + rhs.1)
    }
}

/// Row-major rectangular storage.
///
/// A grid is indexed by `P` or `LP` alike; which lattice the coordinates
/// belong to is up to the owner of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    height: i32,
    width: i32,
    data: Vec<T>,
}
impl<T: Clone> Grid<T> {
    pub fn new(height: i32, width: i32, default: T) -> Grid<T> {
        Grid {
            height,
            width,
            data: vec![default; (height.max(0) * width.max(0)) as usize],
        }
    }
}
impl<T> Grid<T> {
    pub fn height(&self) -> i32 {
        self.height
    }
    pub fn width(&self) -> i32 {
        self.width
    }
    pub fn is_valid_p(&self, pos: P) -> bool {
        0 <= pos.0 && pos.0 < self.height && 0 <= pos.1 && pos.1 < self.width
    }
    pub fn is_valid_lp(&self, pos: LP) -> bool {
        0 <= pos.0 && pos.0 < self.height && 0 <= pos.1 && pos.1 < self.width
    }
    pub fn index_p(&self, pos: P) -> usize {
        (pos.0 * self.width + pos.1) as usize
    }
    pub fn index_lp(&self, pos: LP) -> usize {
        (pos.0 * self.width + pos.1) as usize
    }
    pub fn positions(&self) -> impl Iterator<Item = P> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| P(y, x)))
    }
}
impl<T> Index<P> for Grid<T> {
    type Output = T;
    fn index(&self, pos: P) -> &T {
        let idx = self.index_p(pos);
        &self.data[idx]
    }
}
impl<T> IndexMut<P> for Grid<T> {
    fn index_mut(&mut self, pos: P) -> &mut T {
        let idx = self.index_p(pos);
        &mut self.data[idx]
    }
}
impl<T> Index<LP> for Grid<T> {
    type Output = T;
    fn index(&self, pos: LP) -> &T {
        let idx = self.index_lp(pos);
        &self.data[idx]
    }
}
impl<T> IndexMut<LP> for Grid<T> {
    fn index_mut(&mut self, pos: LP) -> &mut T {
        let idx = self.index_lp(pos);
        &mut self.data[idx]
    }
}
impl<T> Index<usize> for Grid<T> {
    type Output = T;
    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}
impl<T> IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }
}
