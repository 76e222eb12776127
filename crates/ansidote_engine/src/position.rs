use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Zero-based `(column, row)` coordinate of a cell inside a widget grid.
///
/// Coordinates are signed so that hosts can forward raw pointer math
/// (which may undershoot the grid) without converting first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Position of `index` in a row-major grid with `columns` cells per row.
    pub fn from_linear_index(index: usize, columns: usize) -> Self {
        debug_assert!(columns > 0);
        Position::new((index % columns) as i32, (index / columns) as i32)
    }

    /// Row-major index `y * columns + x`.
    ///
    /// Returns `None` if the position lies outside of a grid that is
    /// `columns` cells wide: negative components or `x >= columns`.
    pub fn linear_index(self, columns: usize) -> Option<usize> {
        if self.x < 0 || self.y < 0 || self.x as usize >= columns {
            return None;
        }
        (self.y as usize).checked_mul(columns)?.checked_add(self.x as usize)
    }
}

impl From<(i32, i32)> for Position {
    fn from(value: (i32, i32)) -> Self {
        Position { x: value.0, y: value.1 }
    }
}

impl From<(usize, usize)> for Position {
    fn from(value: (usize, usize)) -> Self {
        Position {
            x: value.0 as i32,
            y: value.1 as i32,
        }
    }
}

impl From<Position> for (i32, i32) {
    fn from(value: Position) -> (i32, i32) {
        (value.x, value.y)
    }
}

/// Parses `"x,y"` as used on the command line.
impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((x, y)) = s.split_once(',') else {
            return Err(format!("expected 'x,y', got '{s}'"));
        };
        let x = x.trim().parse::<i32>().map_err(|e| format!("invalid x '{x}': {e}"))?;
        let y = y.trim().parse::<i32>().map_err(|e| format!("invalid y '{y}': {e}"))?;
        Ok(Position::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_index() {
        assert_eq!(Position::new(3, 2).linear_index(10), Some(23));
        assert_eq!(Position::new(0, 0).linear_index(1), Some(0));
        assert_eq!(Position::new(-1, 0).linear_index(10), None);
        assert_eq!(Position::new(0, -1).linear_index(10), None);
        assert_eq!(Position::new(10, 0).linear_index(10), None);
        assert_eq!(Position::new(0, 0).linear_index(0), None);
    }

    #[test]
    fn test_from_linear_index() {
        assert_eq!(Position::from_linear_index(23, 10), Position::new(3, 2));
        assert_eq!(Position::from_linear_index(9, 10), Position::new(9, 0));
    }

    #[test]
    fn test_parse() {
        assert_eq!("4,7".parse::<Position>(), Ok(Position::new(4, 7)));
        assert_eq!(" -1 , 2".parse::<Position>(), Ok(Position::new(-1, 2)));
        assert!("4".parse::<Position>().is_err());
        assert!("a,b".parse::<Position>().is_err());
    }
}
