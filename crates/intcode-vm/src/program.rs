//! Program images and the text format they are loaded from.
//!
//! The external format is a single flat list of comma-separated base-10
//! integers (optionally negative). Whitespace and newlines around tokens are
//! tolerated, as are trailing separators.

use std::num::ParseIntError;
use std::str::FromStr;

/// An Intcode program image: the initial contents of memory, address 0 upward.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    cells: Vec<i64>,
}

impl Program {
    /// Create a program from raw cells.
    pub fn new(cells: Vec<i64>) -> Self {
        Self { cells }
    }

    /// The image contents, address 0 first.
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Image length in cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the image has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<i64>> for Program {
    fn from(cells: Vec<i64>) -> Self {
        Self { cells }
    }
}

impl FromStr for Program {
    type Err = ParseProgramError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        for token in text.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let value = token.parse().map_err(|source| ParseProgramError {
                token: token.to_string(),
                source,
            })?;
            cells.push(value);
        }
        Ok(Self { cells })
    }
}

/// A token in the program text was not a base-10 integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseProgramError {
    /// The token that failed to parse.
    pub token: String,
    /// The underlying integer parse failure.
    pub source: ParseIntError,
}

impl std::fmt::Display for ParseProgramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid program value '{}': {}", self.token, self.source)
    }
}

impl std::error::Error for ParseProgramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let program: Program = "1,0,0,0,99".parse().unwrap();
        assert_eq!(program.as_slice(), &[1, 0, 0, 0, 99]);
    }

    #[test]
    fn parse_negative_values() {
        let program: Program = "1101,100,-1,4,0".parse().unwrap();
        assert_eq!(program.as_slice(), &[1101, 100, -1, 4, 0]);
    }

    #[test]
    fn parse_tolerates_whitespace() {
        let program: Program = " 1, 2,\n3 ,4\n".parse().unwrap();
        assert_eq!(program.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn parse_tolerates_trailing_separator() {
        let program: Program = "99,\n".parse().unwrap();
        assert_eq!(program.as_slice(), &[99]);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "1,two,3".parse::<Program>().unwrap_err();
        assert_eq!(err.token, "two");
    }
}
