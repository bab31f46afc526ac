use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::range::CellRange;
use std::collections::HashMap;
use std::ops::Range;

/// A named worksheet: populated cells in row-major order plus merged regions.
///
/// Reading a coordinate covered by a merged region yields the region's top-left cell,
/// so callers never need to know whether a label or value was merged.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    /// Sheet name as declared by the workbook
    pub(crate) name: String,
    /// All populated cells, sorted row-major once loading finishes
    cells: Vec<Cell>,
    /// Index mapping from (row, col) to cell vector position
    indexes: HashMap<(usize, usize), usize>,
    /// Merged regions in declaration order
    merged: Vec<CellRange>,
    /// Last populated row (0-based), if any
    row_upper_bound: Option<usize>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(name: &str) -> Self {
        Sheet {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    /// Builds a sheet from cells and merged regions in one step.
    pub fn from_cells(name: &str, cells: Vec<Cell>, merged: Vec<CellRange>) -> Self {
        let mut sheet = Sheet::new(name);
        for cell in cells {
            sheet.push(cell);
        }
        for range in merged {
            sheet.merge(range);
        }
        sheet.finish();
        sheet
    }

    /// Sheet name as declared by the workbook.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the sheet contains no populated cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Adds a cell. Blank cells are dropped; a later cell at the same position replaces the earlier one.
    pub(crate) fn push(&mut self, cell: Cell) {
        if cell.is_blank() {
            return;
        }
        self.update_bound(cell.row);
        match self.indexes.get(&(cell.row, cell.col)) {
            Some(index) => self.cells[*index] = cell,
            None => {
                self.indexes.insert((cell.row, cell.col), self.cells.len());
                self.cells.push(cell);
            }
        }
    }

    /// Registers a merged region.
    pub(crate) fn merge(&mut self, range: CellRange) {
        self.update_bound(range.last_row);
        self.merged.push(range);
    }

    /// Finalizes loading: sorts cells row-major and rebuilds the index.
    pub(crate) fn finish(&mut self) {
        self.cells.sort_by_key(|cell| (cell.row, cell.col));
        self.indexes = self
            .cells
            .iter()
            .enumerate()
            .map(|(index, cell)| ((cell.row, cell.col), index))
            .collect();
    }

    /// Extends the populated row boundary.
    fn update_bound(&mut self, row: usize) {
        if self.row_upper_bound.map(|upper| upper < row).unwrap_or(true) {
            self.row_upper_bound = Some(row);
        }
    }

    /// Last populated row (0-based).
    pub fn row_upper_bound(&self) -> Option<usize> {
        self.row_upper_bound
    }

    /// Merged region covering (row, col), if any.
    pub fn merged_region_at(&self, row: usize, col: usize) -> Option<&CellRange> {
        self.merged.iter().find(|range| range.contains(row, col))
    }

    /// Gets the cell at (row, col), resolving merged regions to their top-left cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if let Some(index) = self.indexes.get(&(row, col)) {
            return self.cells.get(*index);
        }
        let range = self.merged_region_at(row, col)?;
        self.indexes
            .get(&(range.first_row, range.first_col))
            .and_then(|index| self.cells.get(*index))
    }

    /// All populated cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Populated cells whose row lies in `rows`, row-major.
    pub fn cells_in_rows(&self, rows: Range<usize>) -> impl Iterator<Item = &Cell> + '_ {
        let start = self.cells.partition_point(|cell| cell.row < rows.start);
        self.cells[start..]
            .iter()
            .take_while(move |cell| cell.row < rows.end)
    }

    /// Populated cells of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.cells_in_rows(row..row + 1)
    }

    /// Populated cells in `col` strictly below `row`, top to bottom.
    pub fn column_below(&self, col: usize, row: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.cells_in_rows(row + 1..usize::MAX)
            .filter(move |cell| cell.col == col)
    }
}
