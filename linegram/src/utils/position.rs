//! Source location tracking
//!
//! A `Position` names a point in the character buffer of a stream: the
//! absolute character index plus the 1-based line and column derived from it.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and character offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Character offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// True when this position is on the first column of a line
    pub fn is_line_start(&self) -> bool {
        self.column == 1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_start() {
        let pos = Position::start();
        assert_eq!(pos.offset, 0);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert!(pos.is_line_start());
    }

    #[test]
    fn test_default_is_start() {
        assert_eq!(Position::default(), Position::start());
    }

    #[test]
    fn test_position_display() {
        let pos = Position::new(12, 3, 5);
        assert_eq!(pos.to_string(), "3:5");
        assert!(!pos.is_line_start());
    }

    #[test]
    fn test_position_ordering_follows_offset() {
        let a = Position::new(2, 1, 3);
        let b = Position::new(5, 2, 1);
        assert!(a < b);
    }
}
