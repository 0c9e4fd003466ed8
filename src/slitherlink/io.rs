use std::io::BufRead;

use crate::common::Grid;
use crate::format::{next_valid_line, Error};

use super::*;

fn parse_clue(c: char) -> Result<Clue, Error> {
    match c {
        '0'..='4' => Ok(Clue((c as u8 - b'0') as i32)),
        '.' => Ok(NO_CLUE),
        _ => Err(Error::InvalidClue(c)),
    }
}

/// Accepts `NO_CLUE` and the clues `0` to `4`.
pub fn check_clue(clue: Clue) -> Result<(), Error> {
    if clue == NO_CLUE || (0 <= clue.0 && clue.0 <= 4) {
        Ok(())
    } else {
        Err(Error::ClueOutOfRange(clue.0))
    }
}

fn num_cells(height: i32, width: i32) -> Result<usize, Error> {
    if height < 1 || width < 1 {
        return Err(Error::Format);
    }
    height
        .checked_mul(width)
        .map(|n| n as usize)
        .ok_or(Error::Format)
}

/// Lays out a row-major clue stream on a `height` x `width` grid.
///
/// Clues beyond the grid are ignored; a short stream is an error.
pub fn clue_grid<I>(height: i32, width: i32, clues: I) -> Result<Grid<Clue>, Error>
where
    I: IntoIterator<Item = Clue>,
{
    let expected = num_cells(height, width)?;
    let clues = clues.into_iter().take(expected).collect::<Vec<_>>();
    if clues.len() < expected {
        return Err(Error::Truncated {
            expected,
            found: clues.len(),
        });
    }

    let mut ret = Grid::new(height, width, NO_CLUE);
    for (i, clue) in clues.into_iter().enumerate() {
        check_clue(clue)?;
        ret[i] = clue;
    }
    Ok(ret)
}

/// Reads a problem in the form
///
/// ```text
/// 3 3
/// 2.2
/// ...
/// 2.2
/// ```
///
/// Whitespace between clues is ignored, so the clues may also come on a
/// single line.
pub fn read_problem<T: BufRead>(reader: &mut T) -> Result<Grid<Clue>, Error> {
    let mut buffer = String::new();

    let height;
    let width;

    {
        if next_valid_line(reader, &mut buffer)? == 0 {
            return Err(Error::Format);
        }
        let mut header = buffer.split_whitespace();
        height = header.next().ok_or(Error::Format)?.parse::<i32>()?;
        width = header.next().ok_or(Error::Format)?.parse::<i32>()?;
    }
    let expected = num_cells(height, width)?;

    let mut body = String::new();
    reader.read_to_string(&mut body)?;

    let mut clues = vec![];
    for c in body.chars().filter(|c| !c.is_whitespace()) {
        if clues.len() >= expected {
            break;
        }
        clues.push(parse_clue(c)?);
    }

    clue_grid(height, width, clues)
}

/// Converts the puzzle table of a web page into the text format.
///
/// Cells are `<td align="center">` elements holding at most one digit; the
/// number of rows is half the number of `<tr` tags, since the table
/// interleaves rows of edges and rows of cells.
pub fn extract_loop_table(html: &str) -> Result<String, Error> {
    let table = match html.find("id=\"LoopTable\"") {
        Some(start) => {
            let rest = &html[start..];
            match rest.find("/table") {
                Some(end) => &rest[..end],
                None => rest,
            }
        }
        None => html,
    };

    const CELL_OPEN: &str = "<td align=\"center\">";
    const CELL_CLOSE: &str = "</td>";

    let mut cells = String::new();
    let mut rest = table;
    while let Some(pos) = rest.find(CELL_OPEN) {
        rest = &rest[(pos + CELL_OPEN.len())..];
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() && chars.as_str().starts_with(CELL_CLOSE) => cells.push(c),
            _ if rest.starts_with(CELL_CLOSE) => cells.push('.'),
            _ => (),
        }
    }

    let rows = table.matches("<tr").count() / 2;
    if rows == 0 || cells.len() < rows {
        return Err(Error::Format);
    }
    let cols = cells.len() / rows;

    let mut ret = format!("{} {}\n", rows, cols);
    for y in 0..rows {
        ret.push_str(&cells[(y * cols)..((y + 1) * cols)]);
        ret.push('\n');
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::P;
    use std::io::Cursor;

    #[test]
    fn test_read_problem() {
        let mut src = Cursor::new("# sample\n3 4\n2.3.\n.0..\n1..4\n");
        let problem = read_problem(&mut src).unwrap();

        assert_eq!(problem.height(), 3);
        assert_eq!(problem.width(), 4);
        assert_eq!(problem[P(0, 0)], Clue(2));
        assert_eq!(problem[P(0, 1)], NO_CLUE);
        assert_eq!(problem[P(0, 2)], Clue(3));
        assert_eq!(problem[P(1, 1)], Clue(0));
        assert_eq!(problem[P(2, 3)], Clue(4));
    }

    #[test]
    fn test_read_problem_single_line_body() {
        let mut src = Cursor::new("2 2\n2 2 2 2\n");
        let problem = read_problem(&mut src).unwrap();
        assert!(problem.positions().all(|p| problem[p] == Clue(2)));
    }

    #[test]
    fn test_read_problem_errors() {
        match read_problem(&mut Cursor::new("2 2\n22\n2\n")) {
            Err(Error::Truncated { expected, found }) => {
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            res => panic!("unexpected result {:?}", res.map(|_| ())),
        }
        match read_problem(&mut Cursor::new("1 2\n2a\n")) {
            Err(Error::InvalidClue('a')) => (),
            res => panic!("unexpected result {:?}", res.map(|_| ())),
        }
        assert!(read_problem(&mut Cursor::new("two 2\n22\n22\n")).is_err());
        assert!(read_problem(&mut Cursor::new("0 2\n")).is_err());
        assert!(read_problem(&mut Cursor::new("")).is_err());
    }

    #[test]
    fn test_clue_grid() {
        let grid = clue_grid(1, 2, vec![Clue(1), NO_CLUE, Clue(3)]).unwrap();
        assert_eq!(grid[P(0, 0)], Clue(1));
        assert_eq!(grid[P(0, 1)], NO_CLUE);
        match clue_grid(1, 1, vec![Clue(5)]) {
            Err(Error::ClueOutOfRange(5)) => (),
            res => panic!("unexpected result {:?}", res.map(|_| ())),
        }
        assert!(clue_grid(1, 1, vec![Clue(-3)]).is_err());
    }

    #[test]
    fn test_oversized_header() {
        match read_problem(&mut Cursor::new("70000 70000\n22\n")) {
            Err(Error::Format) => (),
            res => panic!("unexpected result {:?}", res.map(|_| ())),
        }
        // The product fits, but the body is far too short.
        match read_problem(&mut Cursor::new("46000 46000\n22\n")) {
            Err(Error::Truncated { expected, found }) => {
                assert_eq!(expected, 46000 * 46000);
                assert_eq!(found, 2);
            }
            res => panic!("unexpected result {:?}", res.map(|_| ())),
        }
        match clue_grid(46000, 46000, vec![Clue(2); 3]) {
            Err(Error::Truncated { found: 3, .. }) => (),
            res => panic!("unexpected result {:?}", res.map(|_| ())),
        }
    }

    #[test]
    fn test_extract_loop_table() {
        let html = concat!(
            "<html><table id=\"other\"><tr><td align=\"center\">9</td></tr></table>",
            "<table id=\"LoopTable\">",
            "<tr><td></td></tr>",
            "<tr><td align=\"center\">3</td><td></td><td align=\"center\"></td></tr>",
            "<tr><td></td></tr>",
            "<tr><td align=\"center\"></td><td></td><td align=\"center\">0</td></tr>",
            "<tr><td></td></tr>",
            "</table></html>",
        );
        assert_eq!(extract_loop_table(html).unwrap(), "2 2\n3.\n.0\n");

        let problem = read_problem(&mut Cursor::new(extract_loop_table(html).unwrap())).unwrap();
        assert_eq!(problem[P(0, 0)], Clue(3));
        assert_eq!(problem[P(1, 1)], Clue(0));

        assert!(extract_loop_table("<p>nothing here</p>").is_err());
    }
}
