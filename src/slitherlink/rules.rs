//! Local deductions on the corners of a single clued cell.
//!
//! Each rule looks at the patterns left at one corner (or the edges at it)
//! and answers with the patterns the rule still allows somewhere else.

use super::*;

/// Clue 1: a corner that can be neither unused nor turned away from the
/// cell carries the line into the cell, so both far sides are blanks.
pub fn one_receives_signal(corner: Corner, mask: Pattern) -> bool {
    !mask.intersects(corner.neither())
}

/// Clue 1: both sides at `corner` are blanks, so the line passes by the
/// opposite corner using exactly one of the cell's sides.
pub fn one_requires_tail(corner: Corner) -> Pattern {
    corner.opposite().exactly_one()
}

/// Clue 1: no corner turns around the cell.
pub fn one_at_most(corner: Corner) -> Pattern {
    !corner.inner_turn()
}

/// Clue 2: patterns allowed at the corner opposite to `source`.
pub fn two_opposite_corner(source: Corner, mask: Pattern) -> Pattern {
    let target = source.opposite();
    let mut allowed = Pattern::ALL;
    if !mask.intersects(source.inner_turn()) {
        allowed = allowed - target.outer_turn();
    }
    if !mask.intersects(source.neither()) {
        allowed = allowed - target.inner_turn();
    }
    if !mask.intersects(source.inner_turn() | source.neither()) {
        allowed = allowed - Pattern::UNUSED;
    }
    allowed
}

/// Clue 2: a corner left with turning around the cell or staying unused
/// takes both sides or none.
///
/// Returns the patterns allowed at the opposite corner and at the two
/// adjacent corners.
pub fn two_both_or_neither(corner: Corner, mask: Pattern) -> Option<(Pattern, Pattern)> {
    if mask == corner.inner_turn() | Pattern::UNUSED {
        let opposite = corner.opposite();
        let adjacent = match corner {
            Corner::UL | Corner::RD => Corner::UR,
            Corner::UR | Corner::LD => Corner::UL,
        };
        Some((
            opposite.inner_turn() | opposite.outer_turn() | Pattern::UNUSED,
            adjacent.exactly_one(),
        ))
    } else {
        None
    }
}

/// Clue 2: with the side `blank` being a blank, pairs of a corner at the
/// opposite side and the side that becomes a line once that corner cannot
/// turn around the cell.
pub fn two_elimination(blank: Dir) -> [(Corner, Dir); 2] {
    match blank {
        Dir::Up => [(Corner::LD, Dir::Right), (Corner::RD, Dir::Left)],
        Dir::Left => [(Corner::UR, Dir::Down), (Corner::RD, Dir::Up)],
        Dir::Right => [(Corner::UL, Dir::Down), (Corner::LD, Dir::Up)],
        Dir::Down => [(Corner::UL, Dir::Right), (Corner::UR, Dir::Left)],
    }
}

/// Clue 2: at a corner, one side is a line and the other a blank.
pub fn two_on_next_to_off(corner: Corner) -> Pattern {
    corner.opposite().exactly_one()
}

/// Clue 3: a corner that cannot turn around the cell leaves both far
/// sides as lines.
pub fn three_pigeonhole(corner: Corner, mask: Pattern) -> bool {
    !mask.intersects(corner.inner_turn())
}

/// Clue 3: a corner pinned to turning around the cell keeps the opposite
/// corner from doing the same.
pub fn three_sends_signal(corner: Corner, mask: Pattern) -> Option<Pattern> {
    if mask == corner.inner_turn() {
        Some(!corner.opposite().inner_turn())
    } else {
        None
    }
}

/// Clue 3 next to clue 3 across `side`: the patterns allowed at `corner`,
/// one of the two corners on the shared side.
pub fn three_adjacent(corner: Corner, side: Dir) -> Pattern {
    let along = corner.toward(side);
    let (p, q) = along.perpendicular();
    Pattern::connecting(along, p) | Pattern::connecting(along, q)
}

/// Clue 3: the line touches every corner of the cell.
pub fn three_touches(corner: Corner) -> Pattern {
    !corner.neither()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_rules() {
        assert!(one_receives_signal(Corner::UL, Pattern::UR | Pattern::RD));
        assert!(!one_receives_signal(Corner::UL, Pattern::UR | Pattern::UNUSED));
        assert!(!one_receives_signal(Corner::UL, Pattern::UL | Pattern::RD));
        assert_eq!(
            one_requires_tail(Corner::UL),
            Pattern::ALL - (Pattern::UL | Pattern::RD | Pattern::UNUSED)
        );
        assert_eq!(one_at_most(Corner::UR), Pattern::ALL - Pattern::LD);
    }

    #[test]
    fn test_two_opposite_corner() {
        assert_eq!(two_opposite_corner(Corner::UL, Pattern::ALL), Pattern::ALL);
        assert_eq!(
            two_opposite_corner(Corner::UL, Pattern::UL | Pattern::UNUSED),
            Pattern::ALL - Pattern::RD
        );
        assert_eq!(
            two_opposite_corner(Corner::UL, Pattern::RD | Pattern::UR),
            Pattern::ALL - Pattern::UL
        );
        assert_eq!(
            two_opposite_corner(Corner::UL, Pattern::UR | Pattern::LD),
            Pattern::ALL - Pattern::UL - Pattern::RD - Pattern::UNUSED
        );
        assert_eq!(
            two_opposite_corner(Corner::UR, Pattern::UL | Pattern::RD),
            Pattern::ALL - Pattern::UR - Pattern::LD - Pattern::UNUSED
        );
    }

    #[test]
    fn test_two_both_or_neither() {
        assert_eq!(
            two_both_or_neither(Corner::UL, Pattern::RD | Pattern::UNUSED),
            Some((
                Pattern::UL | Pattern::RD | Pattern::UNUSED,
                Pattern::ALL - Pattern::UR - Pattern::LD - Pattern::UNUSED
            ))
        );
        assert_eq!(two_both_or_neither(Corner::UL, Pattern::RD), None);
        assert_eq!(
            two_both_or_neither(Corner::LD, Pattern::UR | Pattern::UNUSED).map(|p| p.0),
            Some(Pattern::LD | Pattern::UR | Pattern::UNUSED)
        );
    }

    #[test]
    fn test_two_elimination() {
        let pairs = two_elimination(Dir::Up);
        assert!(pairs.contains(&(Corner::LD, Dir::Right)));
        assert!(pairs.contains(&(Corner::RD, Dir::Left)));

        let pairs = two_elimination(Dir::Right);
        assert!(pairs.contains(&(Corner::UL, Dir::Down)));
        assert!(pairs.contains(&(Corner::LD, Dir::Up)));
        assert_eq!(
            two_on_next_to_off(Corner::UR),
            Pattern::ALL - (Pattern::UR | Pattern::LD | Pattern::UNUSED)
        );
    }

    #[test]
    fn test_three_rules() {
        assert!(three_pigeonhole(Corner::UL, Pattern::UR | Pattern::LD));
        assert!(!three_pigeonhole(Corner::UL, Pattern::RD | Pattern::LD));
        assert_eq!(
            three_sends_signal(Corner::UL, Pattern::RD),
            Some(Pattern::ALL - Pattern::UL)
        );
        assert_eq!(three_sends_signal(Corner::UL, Pattern::RD | Pattern::UR), None);

        assert_eq!(three_adjacent(Corner::UL, Dir::Up), Pattern::UR | Pattern::RD);
        assert_eq!(three_adjacent(Corner::UR, Dir::Up), Pattern::UL | Pattern::LD);
        assert_eq!(three_adjacent(Corner::LD, Dir::Down), Pattern::UR | Pattern::RD);
        assert_eq!(three_adjacent(Corner::UR, Dir::Right), Pattern::LD | Pattern::RD);
        assert_eq!(three_adjacent(Corner::RD, Dir::Right), Pattern::UL | Pattern::UR);
        assert_eq!(three_adjacent(Corner::UL, Dir::Left), Pattern::LD | Pattern::RD);

        assert_eq!(
            three_touches(Corner::RD),
            Pattern::ALL - Pattern::RD - Pattern::UNUSED
        );
    }
}
