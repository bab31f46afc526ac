use crate::spreadsheet::reference::col_to_index;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::reference::row_to_index;
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;
use thiserror::Error;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$?([A-Z]+)\$?(\d+)(:\$?([A-Z]+)\$?(\d+))?$").expect("Hardcode regex pattern")
});

/// Errors related to A1-style range parsing.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("Invalid range format '{0}'")]
    FormatError(String),
}

/// A rectangular block of cells, bounds inclusive and 0-based.
/// Used for merged regions ("A1:C2").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

impl CellRange {
    /// Returns true if (row, col) lies inside the range.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.first_row <= row && row <= self.last_row && self.first_col <= col && col <= self.last_col
    }

    /// Number of rows covered.
    pub fn height(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        self.last_col - self.first_col + 1
    }
}

impl TryFrom<&str> for CellRange {
    type Error = RangeError;

    /// Parses "B2:C5" or a single cell "B2". Reversed corners are normalized.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let upper = value.trim().to_ascii_uppercase();
        let captures = RANGE_PATTERN
            .captures(&upper)
            .ok_or_else(|| RangeError::FormatError(value.to_owned()))?;
        let part = |index: usize| captures.get(index).map(|matcher| matcher.as_str());
        let invalid = || RangeError::FormatError(value.to_owned());

        let first_col = part(1).and_then(col_to_index).ok_or_else(invalid)?;
        let first_row = part(2).and_then(row_to_index).ok_or_else(invalid)?;
        let (last_row, last_col) = match (part(4), part(5)) {
            (Some(col), Some(row)) => (
                row_to_index(row).ok_or_else(invalid)?,
                col_to_index(col).ok_or_else(invalid)?,
            ),
            _ => (first_row, first_col),
        };
        Ok(CellRange {
            first_row: first_row.min(last_row),
            first_col: first_col.min(last_col),
            last_row: first_row.max(last_row),
            last_col: first_col.max(last_col),
        })
    }
}

impl Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}",
            index_to_reference(self.first_row, self.first_col),
            index_to_reference(self.last_row, self.last_col)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_range() {
        let range = CellRange::try_from("B2:D3").unwrap();
        assert_eq!(range, CellRange { first_row: 1, first_col: 1, last_row: 2, last_col: 3 });
        assert_eq!(range.height(), 2);
        assert_eq!(range.width(), 3);
        assert!(range.contains(2, 3));
        assert!(!range.contains(0, 1));
        assert_eq!(range.to_string(), "B2:D3");
    }

    #[test]
    fn parse_single_and_reversed() {
        let single = CellRange::try_from("c7").unwrap();
        assert_eq!(single.height(), 1);
        assert_eq!(single.width(), 1);
        let reversed = CellRange::try_from("D3:B2").unwrap();
        assert_eq!(reversed, CellRange::try_from("B2:D3").unwrap());
    }

    #[test]
    fn parse_invalid() {
        assert!(CellRange::try_from("B").is_err());
        assert!(CellRange::try_from("1:10").is_err());
        assert!(CellRange::try_from("A0:B2").is_err());
    }
}
