//! # Spreadsheet Module
//!
//! Loads an Office Open XML workbook (.xlsx / .xlsm) from memory into a
//! [`Workbook`] of named [`Sheet`]s. Cells are resolved to typed values at load
//! time and merged regions are kept so lookups can resolve them transparently.
pub(crate) mod cell;
pub(crate) mod range;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod xlsx;

pub use cell::normalize_label;
pub use cell::Cell;
pub use cell::CellValue;
pub use range::CellRange;
pub use sheet::Sheet;

use crate::error::NestingError;
use crate::error::ResultMessage;
use crate::spreadsheet::xlsx::XlsxPackage;
use std::io::Cursor;
use thiserror::Error;

/// Leading bytes of a compound file (legacy .xls, or an encrypted OOXML package).
const CFB_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Leading bytes of a ZIP archive.
const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Errors raised while opening a workbook package.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// A required part is missing from the package
    #[error("File '{0}' not found in workbook package")]
    FileError(String),

    /// The package declares no worksheets
    #[error("Workbook contains no worksheets")]
    SpreadsheetEmptyError,

    /// The bytes are not an Office Open XML package
    #[error("Unsupported workbook format: {0}")]
    UnsupportedFormat(String),
}

/// An in-memory workbook: worksheets in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Parses workbook bytes. Only ZIP-based OOXML packages are accepted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NestingError> {
        if bytes.starts_with(&CFB_SIGNATURE) {
            Err(SpreadsheetError::UnsupportedFormat(
                "compound file (legacy .xls or password-protected workbook)".to_owned(),
            ))?
        }
        if !bytes.starts_with(&ZIP_SIGNATURE) {
            Err(SpreadsheetError::UnsupportedFormat("not a ZIP-based workbook package".to_owned()))?
        }
        let mut package = XlsxPackage::open(Cursor::new(bytes)).with_prefix("open workbook")?;
        let sheets = package.read_sheets()?;
        log::debug!("workbook loaded with {} sheets", sheets.len());
        Ok(Workbook { sheets })
    }

    /// Builds a workbook from already loaded sheets.
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Workbook { sheets }
    }

    /// Looks up a sheet by name, ignoring case and surrounding whitespace.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        let wanted = normalize_label(name);
        self.sheets
            .iter()
            .find(|sheet| normalize_label(sheet.name()).eq_ignore_ascii_case(&wanted))
    }

    /// Sheet names in declaration order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name()).collect()
    }

    /// Number of worksheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_compound_files() {
        let mut bytes = CFB_SIGNATURE.to_vec();
        bytes.extend_from_slice(&[0u8; 504]);
        let error = Workbook::from_bytes(&bytes).unwrap_err();
        assert!(error.to_string().contains("compound file"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Workbook::from_bytes(b"definitely not a workbook").is_err());
        assert!(Workbook::from_bytes(&[]).is_err());
    }

    #[test]
    fn rejects_truncated_zip() {
        let error = Workbook::from_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x00, 0x01]).unwrap_err();
        assert!(error.to_string().starts_with("open workbook:"));
    }

    #[test]
    fn sheet_lookup_ignores_case_and_padding() {
        let workbook = Workbook::from_sheets(vec![Sheet::new("Summary"), Sheet::new(" Machine  info ")]);
        assert!(workbook.sheet("SUMMARY").is_some());
        assert!(workbook.sheet("machine info").is_some());
        assert!(workbook.sheet("Profiles").is_none());
        assert_eq!(workbook.sheet_names(), vec!["Summary", " Machine  info "]);
        assert_eq!(workbook.sheet_count(), 2);
    }
}
