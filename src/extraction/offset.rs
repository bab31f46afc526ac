//! Reads typed values at a fixed displacement from an anchor.
use crate::extraction::anchor::Anchor;
use crate::extraction::anchor::AnchorMatch;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::Cell;
use crate::spreadsheet::Sheet;
use chrono::NaiveDateTime;
use std::fmt::Display;

/// Type a cell is coerced to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetType {
    String,
    Float,
    Int,
    DateTime,
}

impl Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TargetType::String => "text",
            TargetType::Float => "number",
            TargetType::Int => "whole number",
            TargetType::DateTime => "date",
        };
        write!(f, "{name}")
    }
}

/// Values that can be coerced out of a cell.
pub trait FromCell: Sized {
    const TARGET: TargetType;

    fn from_cell(cell: &Cell) -> Result<Self, String>;
}

impl FromCell for String {
    const TARGET: TargetType = TargetType::String;

    fn from_cell(cell: &Cell) -> Result<Self, String> {
        cell.to_text()
    }
}

impl FromCell for f64 {
    const TARGET: TargetType = TargetType::Float;

    fn from_cell(cell: &Cell) -> Result<Self, String> {
        cell.to_double()
    }
}

impl FromCell for i64 {
    const TARGET: TargetType = TargetType::Int;

    fn from_cell(cell: &Cell) -> Result<Self, String> {
        cell.to_bigint()
    }
}

impl FromCell for NaiveDateTime {
    const TARGET: TargetType = TargetType::DateTime;

    fn from_cell(cell: &Cell) -> Result<Self, String> {
        cell.to_datetime()
    }
}

/// Why a read produced no value.
#[derive(Clone, Debug, PartialEq)]
enum ReadFailure {
    MissingAnchor,
    OutOfRange,
    Empty(String),
    Coercion(String, String),
}

/// Target coordinate of an offset. Positive offsets count from the far edge of a merged anchor.
pub fn target(anchor: &Anchor, row_offset: isize, col_offset: isize) -> Option<(usize, usize)> {
    let shift = |origin: usize, span: usize, offset: isize| {
        if offset > 0 {
            (origin + span - 1).checked_add(offset.unsigned_abs())
        } else {
            origin.checked_sub(offset.unsigned_abs())
        }
    };
    Some((
        shift(anchor.row, anchor.row_span, row_offset)?,
        shift(anchor.col, anchor.col_span, col_offset)?,
    ))
}

/// Reads the cell at (row, col). `Ok(None)` when it is empty.
pub fn read_cell<T: FromCell>(sheet: &Sheet, row: usize, col: usize) -> Result<Option<T>, String> {
    match sheet.get(row, col) {
        Some(cell) if !cell.is_blank() => T::from_cell(cell).map(Some),
        _ => Ok(None),
    }
}

fn read_at<T: FromCell>(
    sheet: &Sheet,
    found: &AnchorMatch,
    row_offset: isize,
    col_offset: isize,
) -> Result<T, ReadFailure> {
    let anchor = found.anchor().ok_or(ReadFailure::MissingAnchor)?;
    let (row, col) = target(anchor, row_offset, col_offset).ok_or(ReadFailure::OutOfRange)?;
    let reference = index_to_reference(row, col);
    match read_cell::<T>(sheet, row, col) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(ReadFailure::Empty(reference)),
        Err(message) => Err(ReadFailure::Coercion(reference, message)),
    }
}

fn describe<T: FromCell>(sheet: &Sheet, found: &AnchorMatch, failure: ReadFailure) -> String {
    let sheet_name = sheet.name();
    let label = found.label();
    match failure {
        ReadFailure::MissingAnchor => format!("{sheet_name}: label '{label}' not found"),
        ReadFailure::OutOfRange => {
            let reference = found.anchor().map(Anchor::reference).unwrap_or_default();
            format!("{sheet_name}: value for '{label}' lies outside the sheet (label at {reference})")
        }
        ReadFailure::Empty(reference) => format!("{sheet_name}: no value for '{label}' at {reference}"),
        ReadFailure::Coercion(reference, message) => {
            format!("{sheet_name}: value for '{label}' at {reference} is not a valid {}: {message}", T::TARGET)
        }
    }
}

/// Reads and coerces the value at an offset from `found`.
/// Any gap yields `None` and one warning naming the sheet, label and cell.
pub fn read<T: FromCell>(
    sheet: &Sheet,
    found: &AnchorMatch,
    row_offset: isize,
    col_offset: isize,
    warnings: &mut Vec<String>,
) -> Option<T> {
    match read_at::<T>(sheet, found, row_offset, col_offset) {
        Ok(value) => Some(value),
        Err(failure) => {
            warnings.push(describe::<T>(sheet, found, failure));
            None
        }
    }
}

/// Like [`read`], for fields that may legitimately be absent: only a value
/// that is present but cannot be coerced produces a warning.
pub fn read_optional<T: FromCell>(
    sheet: &Sheet,
    found: &AnchorMatch,
    row_offset: isize,
    col_offset: isize,
    warnings: &mut Vec<String>,
) -> Option<T> {
    match read_at::<T>(sheet, found, row_offset, col_offset) {
        Ok(value) => Some(value),
        Err(failure @ ReadFailure::Coercion(..)) => {
            warnings.push(describe::<T>(sheet, found, failure));
            None
        }
        Err(_) => None,
    }
}
