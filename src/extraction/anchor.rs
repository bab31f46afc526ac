//! Content-based cell search.
//!
//! Positions are always derived from the text of a label, never from fixed
//! coordinates, so values keep being found when rows are inserted above them.
use crate::spreadsheet::normalize_label;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::Cell;
use crate::spreadsheet::Sheet;
use std::ops::Range;

/// How a cell's text is compared with a wanted label.
/// Whitespace is always normalized first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    #[default]
    CaseInsensitive,
    /// Cell text contains the label, ignoring case
    Contains,
}

impl MatchMode {
    /// Compares two already normalized strings.
    pub fn matches(&self, text: &str, label: &str) -> bool {
        match self {
            MatchMode::Exact => text == label,
            MatchMode::CaseInsensitive => text.to_lowercase() == label.to_lowercase(),
            MatchMode::Contains => text.to_lowercase().contains(&label.to_lowercase()),
        }
    }
}

/// A located label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
    /// Text of the matching cell, trimmed
    pub matched_text: String,
    /// Label that was searched for
    pub label: String,
    /// Rows covered when the label sits in a merged region, otherwise 1
    pub row_span: usize,
    /// Columns covered when the label sits in a merged region, otherwise 1
    pub col_span: usize,
}

impl Anchor {
    pub(crate) fn from_cell(sheet: &Sheet, cell: &Cell, label: &str) -> Self {
        let (row_span, col_span) = sheet
            .merged_region_at(cell.row, cell.col)
            .map(|range| (range.height(), range.width()))
            .unwrap_or((1, 1));
        Anchor {
            row: cell.row,
            col: cell.col,
            matched_text: cell.to_string().trim().to_owned(),
            label: label.to_owned(),
            row_span,
            col_span,
        }
    }

    /// A1-style reference of the label cell.
    pub fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }
}

/// Outcome of a search. `Missing` is not an error: callers treat the field as absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorMatch {
    Found(Anchor),
    Missing(String),
}

impl AnchorMatch {
    pub fn is_found(&self) -> bool {
        matches!(self, AnchorMatch::Found(_))
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        match self {
            AnchorMatch::Found(anchor) => Some(anchor),
            AnchorMatch::Missing(_) => None,
        }
    }

    /// The label that was searched for.
    pub fn label(&self) -> &str {
        match self {
            AnchorMatch::Found(anchor) => &anchor.label,
            AnchorMatch::Missing(label) => label,
        }
    }
}

/// Finds the first cell, in row-major order, whose text matches `label`.
pub fn locate(sheet: &Sheet, label: &str, mode: MatchMode) -> AnchorMatch {
    locate_in(sheet, label, mode, 0..usize::MAX)
}

/// Like [`locate`], restricted to the rows in `rows`.
pub fn locate_in(sheet: &Sheet, label: &str, mode: MatchMode, rows: Range<usize>) -> AnchorMatch {
    let wanted = normalize_label(label);
    sheet
        .cells_in_rows(rows)
        .find(|cell| cell.label().map(|text| mode.matches(&text, &wanted)).unwrap_or(false))
        .map(|cell| AnchorMatch::Found(Anchor::from_cell(sheet, cell, label)))
        .unwrap_or_else(|| AnchorMatch::Missing(label.to_owned()))
}

/// Tries each candidate label in turn and returns the first one found.
pub fn locate_any(sheet: &Sheet, labels: &[&str], mode: MatchMode) -> AnchorMatch {
    labels
        .iter()
        .map(|label| locate(sheet, label, mode))
        .find(AnchorMatch::is_found)
        .unwrap_or_else(|| AnchorMatch::Missing(labels.join(" / ")))
}
