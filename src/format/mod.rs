use std::error;
use std::fmt;
use std::io;
use std::io::BufRead;
use std::num::ParseIntError;

/// Failure while turning puzzle text into clues.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Format,
    InvalidClue(char),
    ClueOutOfRange(i32),
    Truncated { expected: usize, found: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => fmt::Display::fmt(err, f),
            Error::Format => write!(f, "Format error"),
            Error::InvalidClue(c) => write!(f, "invalid clue character '{}'", c),
            Error::ClueOutOfRange(c) => write!(f, "clue {} is out of range", c),
            Error::Truncated { expected, found } => write!(
                f,
                "not enough clues: expected {}, found {}",
                expected, found
            ),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ParseIntError> for Error {
    fn from(_: ParseIntError) -> Error {
        Error::Format
    }
}

fn is_comment(s: &str) -> bool {
    s.trim_start().starts_with('#')
}

/// Reads the next line which is neither blank nor a `#` comment.
///
/// Returns `Ok(0)` at end of input, leaving `buf` empty.
pub fn next_valid_line<R: BufRead + ?Sized>(reader: &mut R, buf: &mut String) -> io::Result<usize> {
    loop {
        buf.clear();
        let len = reader.read_line(buf)?;

        if len == 0 {
            return Ok(0);
        }
        if !buf.trim().is_empty() && !is_comment(buf) {
            return Ok(len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_next_valid_line_skips_comments() {
        let mut reader = Cursor::new("# header\n\n  \n3 4\n# trailing\n");
        let mut buf = String::new();

        assert!(next_valid_line(&mut reader, &mut buf).unwrap() > 0);
        assert_eq!(buf.trim(), "3 4");
        assert_eq!(next_valid_line(&mut reader, &mut buf).unwrap(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::Truncated { expected: 4, found: 3 }.to_string(),
            "not enough clues: expected 4, found 3"
        );
        assert_eq!(Error::InvalidClue('7').to_string(), "invalid clue character '7'");
        assert_eq!(Error::ClueOutOfRange(7).to_string(), "clue 7 is out of range");
        assert_eq!(Error::from("x".parse::<i32>().unwrap_err()).to_string(), "Format error");
    }
}
