//! Conversions between 0-based (row, col) indexes and A1-style references.

/// Column count of an OOXML worksheet (A..XFD).
const MAX_COLUMNS: usize = 16_384;

/// Row count of an OOXML worksheet.
const MAX_ROWS: usize = 1_048_576;

/// Converts a column label ("A", "AB") to a 0-based column index.
/// Labels past XFD are rejected.
pub(crate) fn col_to_index(col: &str) -> Option<usize> {
    if col.is_empty() || !col.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        return None;
    }
    let index = col
        .bytes()
        .map(|byte| (byte.to_ascii_uppercase() - b'A') as usize + 1)
        .try_fold(0usize, |index, digit| index.checked_mul(26)?.checked_add(digit))?;
    (index <= MAX_COLUMNS).then(|| index - 1)
}

/// Converts a 1-based row label ("1", "42") to a 0-based row index.
/// Rows past the worksheet limit are rejected.
pub(crate) fn row_to_index(row: &str) -> Option<usize> {
    row.parse::<usize>()
        .ok()
        .filter(|row| (1..=MAX_ROWS).contains(row))
        .map(|row| row - 1)
}

/// Parses an A1-style reference ("B3", "$B$3") into 0-based (row, col).
pub(crate) fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let reference = reference.replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (col, row) = reference.split_at(split);
    Some((row_to_index(row)?, col_to_index(col)?))
}

/// Formats 0-based (row, col) as an A1-style reference.
pub fn index_to_reference(row: usize, col: usize) -> String {
    let mut column = col + 1;
    let mut label = Vec::<u8>::new();
    while column > 0 {
        column -= 1;
        label.push(b'A' + (column % 26) as u8);
        column /= 26;
    }
    label.reverse();
    format!("{}{}", String::from_utf8_lossy(&label), row + 1)
}
