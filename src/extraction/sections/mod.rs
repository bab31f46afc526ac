//! One extractor per logical workbook section. Each is a pure function of a sheet
//! returning its sub-record and the warnings collected while reading it.
pub mod consumables;
pub mod delivery;
pub mod identity;
pub mod panel;
pub mod profiles;
pub mod telemetry;

use crate::extraction::offset::read_cell;
use crate::extraction::offset::FromCell;
use crate::extraction::outcome::Extracted;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::Sheet;
use crate::spreadsheet::Workbook;

/// Millimetres per metre.
pub(crate) const MM_PER_M: f64 = 1000.0;

/// Reads one cell of a header-delimited table. An empty cell warns only when `required`.
pub(crate) fn read_column<T: FromCell>(
    sheet: &Sheet,
    row: usize,
    col: usize,
    column: &str,
    required: bool,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let reference = || index_to_reference(row, col);
    match read_cell::<T>(sheet, row, col) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            if required {
                warnings.push(format!("{}: no {column} at {}", sheet.name(), reference()));
            }
            None
        }
        Err(message) => {
            warnings.push(format!(
                "{}: {column} at {} is not a valid {}: {message}",
                sheet.name(),
                reference(),
                T::TARGET
            ));
            None
        }
    }
}

/// Runs `extract` on the named sheet, or yields the default sub-record plus one
/// warning when the workbook has no such sheet.
pub(crate) fn on_sheet<T: Default>(
    workbook: &Workbook,
    sheet_name: &str,
    extract: impl FnOnce(&Sheet) -> Extracted<T>,
) -> Extracted<T> {
    match workbook.sheet(sheet_name) {
        Some(sheet) => {
            let extracted = extract(sheet);
            log::debug!("sheet '{}' extracted with {} warnings", sheet.name(), extracted.warnings.len());
            extracted
        }
        None => Extracted::missing_sheet(sheet_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Cell;

    #[test]
    fn table_cells() {
        let sheet = Sheet::from_cells("Delivery order", vec![Cell::new(4, 2, "2 pcs"), Cell::new(5, 2, "x")], vec![]);
        let mut warnings = Vec::new();
        assert_eq!(read_column::<i64>(&sheet, 4, 2, "QTY", true, &mut warnings), Some(2));
        assert_eq!(read_column::<i64>(&sheet, 6, 2, "QTY", false, &mut warnings), None);
        assert!(warnings.is_empty());
        assert_eq!(read_column::<i64>(&sheet, 6, 2, "QTY", true, &mut warnings), None);
        assert_eq!(read_column::<i64>(&sheet, 5, 2, "QTY", false, &mut warnings), None);
        assert_eq!(
            warnings,
            vec![
                "Delivery order: no QTY at C7",
                "Delivery order: QTY at C6 is not a valid whole number: parse 'x' to double failed",
            ]
        );
    }

    #[test]
    fn absent_sheet_yields_default_and_warning() {
        let workbook = Workbook::from_sheets(vec![Sheet::new("Summary")]);
        let extracted: Extracted<Vec<String>> = on_sheet(&workbook, "Machine info", |_| unreachable!());
        assert!(extracted.value.is_empty());
        assert_eq!(extracted.warnings, vec!["Sheet 'Machine info' not found"]);

        let extracted = on_sheet(&workbook, "summary", |sheet| Extracted::clean(sheet.name().to_owned()));
        assert_eq!(extracted.value, "Summary");
    }
}
