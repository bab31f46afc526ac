//! Header-delimited partitioning of a sheet into repeated blocks.
use crate::extraction::anchor::Anchor;
use crate::extraction::anchor::AnchorMatch;
use crate::extraction::anchor::MatchMode;
use crate::spreadsheet::normalize_label;
use crate::spreadsheet::Sheet;
use std::ops::Range;

/// One repeated structural group of a sheet, such as a single profile's table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The header cell that opens the block
    pub header: Anchor,
    /// Rows belonging to the block, header row included
    pub extent: Range<usize>,
}

impl Block {
    pub fn header_row(&self) -> usize {
        self.header.row
    }

    pub fn header_col(&self) -> usize {
        self.header.col
    }

    /// Text of the header cell.
    pub fn label(&self) -> &str {
        &self.header.matched_text
    }

    /// The header as an anchor for offset reads.
    pub fn anchor(&self) -> AnchorMatch {
        AnchorMatch::Found(self.header.clone())
    }
}

/// Splits a sheet into blocks, one per row holding `header_label`.
///
/// Each block runs from its header row up to the next header row, the last one to the
/// end of the sheet. Blocks come back in order of appearance and never overlap. A label
/// that never occurs yields no blocks.
pub fn partition(sheet: &Sheet, header_label: &str, mode: MatchMode) -> Vec<Block> {
    let wanted = normalize_label(header_label);
    let mut headers: Vec<Anchor> = Vec::new();
    for cell in sheet.cells() {
        let is_header = cell.label().map(|text| mode.matches(&text, &wanted)).unwrap_or(false);
        let same_row = headers.last().map(|last| last.row == cell.row).unwrap_or(false);
        if is_header && !same_row {
            headers.push(Anchor::from_cell(sheet, cell, header_label));
        }
    }

    let end_of_sheet = sheet.row_upper_bound().map(|row| row + 1).unwrap_or(0);
    let boundaries: Vec<usize> = headers
        .iter()
        .skip(1)
        .map(|header| header.row)
        .chain(std::iter::once(end_of_sheet))
        .collect();
    headers
        .into_iter()
        .zip(boundaries)
        .map(|(header, end)| {
            let extent = header.row..end.max(header.row + 1);
            Block { header, extent }
        })
        .collect()
}
