use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, Not, Sub};

use crate::common::D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Left,
    Right,
    Down,
}

pub const DIRS: [Dir; 4] = [Dir::Up, Dir::Left, Dir::Right, Dir::Down];

impl Dir {
    pub fn offset(self) -> D {
        match self {
            Dir::Up => D(-1, 0),
            Dir::Left => D(0, -1),
            Dir::Right => D(0, 1),
            Dir::Down => D(1, 0),
        }
    }
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
        }
    }
    pub fn is_vertical(self) -> bool {
        self == Dir::Up || self == Dir::Down
    }
    pub fn perpendicular(self) -> (Dir, Dir) {
        if self.is_vertical() {
            (Dir::Left, Dir::Right)
        } else {
            (Dir::Up, Dir::Down)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    UL,
    UR,
    LD,
    RD,
}

pub const CORNERS: [Corner; 4] = [Corner::UL, Corner::UR, Corner::LD, Corner::RD];

impl Corner {
    /// Offset of the corner vertex from the vertex at the cell's upper-left.
    pub fn offset(self) -> D {
        match self {
            Corner::UL => D(0, 0),
            Corner::UR => D(0, 1),
            Corner::LD => D(1, 0),
            Corner::RD => D(1, 1),
        }
    }
    pub fn opposite(self) -> Corner {
        match self {
            Corner::UL => Corner::RD,
            Corner::UR => Corner::LD,
            Corner::LD => Corner::UR,
            Corner::RD => Corner::UL,
        }
    }
    pub fn sides(self) -> (Dir, Dir) {
        match self {
            Corner::UL => (Dir::Up, Dir::Left),
            Corner::UR => (Dir::Up, Dir::Right),
            Corner::LD => (Dir::Left, Dir::Down),
            Corner::RD => (Dir::Right, Dir::Down),
        }
    }
    /// Direction, seen from the corner vertex, of the cell edge on side `side`.
    ///
    /// The upper side of a cell leaves its upper-left corner to the right.
    pub fn toward(self, side: Dir) -> Dir {
        let (a, b) = self.sides();
        if side == a {
            b.opposite()
        } else {
            a.opposite()
        }
    }
    pub fn inner_turn(self) -> Pattern {
        let (a, b) = self.sides();
        Pattern::connecting(self.toward(a), self.toward(b))
    }
    /// Pattern pointing away from the cell: uses neither of its edges.
    pub fn outer_turn(self) -> Pattern {
        let (a, b) = self.sides();
        Pattern::connecting(self.toward(a).opposite(), self.toward(b).opposite())
    }
    pub fn neither(self) -> Pattern {
        self.outer_turn() | Pattern::UNUSED
    }
    pub fn exactly_one(self) -> Pattern {
        Pattern::ALL - self.inner_turn() - self.neither()
    }
}

/// Set of connection patterns still possible at a vertex.
///
/// Each of the six turns names the two directions the loop uses through the
/// vertex; `UNUSED` means the loop does not visit it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern(pub u8);

impl Pattern {
    pub const NONE: Pattern = Pattern(0);
    pub const UL: Pattern = Pattern(1 << 0);
    pub const UR: Pattern = Pattern(1 << 1);
    pub const UD: Pattern = Pattern(1 << 2);
    pub const LR: Pattern = Pattern(1 << 3);
    pub const LD: Pattern = Pattern(1 << 4);
    pub const RD: Pattern = Pattern(1 << 5);
    pub const UNUSED: Pattern = Pattern(1 << 6);
    pub const ALL: Pattern = Pattern((1 << 7) - 1);

    pub fn connecting(a: Dir, b: Dir) -> Pattern {
        match (a, b) {
            (Dir::Up, Dir::Left) | (Dir::Left, Dir::Up) => Pattern::UL,
            (Dir::Up, Dir::Right) | (Dir::Right, Dir::Up) => Pattern::UR,
            (Dir::Up, Dir::Down) | (Dir::Down, Dir::Up) => Pattern::UD,
            (Dir::Left, Dir::Right) | (Dir::Right, Dir::Left) => Pattern::LR,
            (Dir::Left, Dir::Down) | (Dir::Down, Dir::Left) => Pattern::LD,
            (Dir::Right, Dir::Down) | (Dir::Down, Dir::Right) => Pattern::RD,
            _ => Pattern::NONE,
        }
    }
    pub fn using(d: Dir) -> Pattern {
        match d {
            Dir::Up => Pattern::UL | Pattern::UR | Pattern::UD,
            Dir::Left => Pattern::UL | Pattern::LR | Pattern::LD,
            Dir::Right => Pattern::UR | Pattern::LR | Pattern::RD,
            Dir::Down => Pattern::UD | Pattern::LD | Pattern::RD,
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
    pub fn is_pinned(self) -> bool {
        self.count() == 1
    }
    pub fn contains(self, other: Pattern) -> bool {
        (self.0 & other.0) == other.0
    }
    pub fn intersects(self, other: Pattern) -> bool {
        (self.0 & other.0) != 0
    }
    pub fn may_use(self, d: Dir) -> bool {
        self.intersects(Pattern::using(d))
    }
    pub fn must_use(self, d: Dir) -> bool {
        !self.is_empty() && (self - Pattern::using(d)).is_empty()
    }
}

impl BitOr for Pattern {
    type Output = Pattern;
    fn bitor(self, rhs: Pattern) -> Pattern {
        Pattern(self.0 | rhs.0)
    }
}
impl BitAnd for Pattern {
    type Output = Pattern;
    fn bitand(self, rhs: Pattern) -> Pattern {
        Pattern(self.0 & rhs.0)
    }
}
impl BitAndAssign for Pattern {
    fn bitand_assign(&mut self, rhs: Pattern) {
        self.0 &= rhs.0;
    }
}
impl Sub for Pattern {
    type Output = Pattern;
    fn sub(self, rhs: Pattern) -> Pattern {
        Pattern(self.0 & !rhs.0)
    }
}
impl Not for Pattern {
    type Output = Pattern;
    fn not(self) -> Pattern {
        Pattern(!self.0 & Pattern::ALL.0)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const NAMES: [&str; 7] = ["UL", "UR", "UD", "LR", "LD", "RD", "UNUSED"];
        let names = (0..7)
            .filter(|&i| self.0 & (1u8 << i) != 0)
            .map(|i| NAMES[i])
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", names.join("|"))
    }
}
