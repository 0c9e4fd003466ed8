use std::fmt;

use super::*;
use crate::common::{LP, P};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Box-drawing lines; vertices show the shape they are pinned to.
    Unicode,
    /// `+` vertices, `-`/`|` lines.
    Ascii,
}

/// A board ready to be printed with `{}`.
pub struct Rendered<'a> {
    board: &'a Board,
    style: Style,
    show_blanks: bool,
}

pub fn render(board: &Board, style: Style, show_blanks: bool) -> Rendered<'_> {
    Rendered {
        board,
        style,
        show_blanks,
    }
}

fn vertex_glyph(mask: Pattern) -> char {
    match mask {
        Pattern::UD => '\u{2502}',
        Pattern::UL => '\u{2518}',
        Pattern::UR => '\u{2514}',
        Pattern::LR => '\u{2500}',
        Pattern::LD => '\u{2510}',
        Pattern::RD => '\u{250c}',
        _ => ' ',
    }
}

impl<'a> fmt::Display for Rendered<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let board = self.board;
        let unicode = self.style == Style::Unicode;
        for y in 0..(board.height() * 2 + 1) {
            for x in 0..(board.width() * 2 + 1) {
                let c = match (y % 2, x % 2) {
                    (0, 0) => {
                        if unicode {
                            vertex_glyph(board.mask(P(y / 2, x / 2)))
                        } else {
                            '+'
                        }
                    }
                    (1, 1) => {
                        let Clue(c) = board.clue(P(y / 2, x / 2));
                        if 0 <= c && c <= 4 {
                            (b'0' + c as u8) as char
                        } else {
                            ' '
                        }
                    }
                    (_, x_parity) => match board.edge(LP(y, x)) {
                        EdgeState::On(_) => match (x_parity == 1, unicode) {
                            (true, true) => '\u{2500}',
                            (true, false) => '-',
                            (false, true) => '\u{2502}',
                            (false, false) => '|',
                        },
                        EdgeState::Off if self.show_blanks => 'x',
                        _ => ' ',
                    },
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&render(self, Style::Ascii, true), f)
    }
}

#[cfg(test)]
mod tests {
    use super::super::engine::tests::problem;
    use super::*;

    #[test]
    fn test_render_ascii() {
        let mut engine = Engine::new(&problem(&["22", "22"]), SolverConfig::default()).unwrap();
        engine.solve().unwrap();

        assert_eq!(
            engine.board().to_string(),
            "+-+-+\n|2x2|\n+x+x+\n|2x2|\n+-+-+\n"
        );
        assert_eq!(
            render(engine.board(), Style::Ascii, false).to_string(),
            "+-+-+\n|2 2|\n+ + +\n|2 2|\n+-+-+\n"
        );
    }

    #[test]
    fn test_render_unicode() {
        let mut engine = Engine::new(&problem(&["4"]), SolverConfig::default()).unwrap();
        engine.solve().unwrap();

        assert_eq!(
            render(engine.board(), Style::Unicode, false).to_string(),
            "┌─┐\n│4│\n└─┘\n"
        );
    }

    #[test]
    fn test_render_undecided() {
        let engine = Engine::new(&problem(&[".1"]), SolverConfig::default()).unwrap();
        assert_eq!(engine.board().to_string(), "+ + +\n   1 \n+ + +\n");
    }
}
