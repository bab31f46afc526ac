use thiserror::Error;

/// Main error type for the nesting extractor.
/// Aggregates errors raised while opening a workbook package or building an extractor.
/// None of these ever escape [`crate::Extractor::extract`]; they are folded into the result.
#[derive(Error, Debug)]
pub enum NestingError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    // Third-party library errors
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    PatternError(#[from] regex::Error),

    #[error("{0}")]
    ConfigError(#[from] toml::de::Error),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    RangeError(#[from] crate::spreadsheet::range::RangeError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, NestingError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| NestingError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_prefix_wraps_message() {
        let result: Result<(), NestingError> =
            Err(crate::spreadsheet::SpreadsheetError::FileError("xl/workbook.xml".to_owned()).into());
        let error = result.with_prefix("open workbook").unwrap_err();
        assert_eq!(error.to_string(), "open workbook: File 'xl/workbook.xml' not found in workbook package");
    }

    #[test]
    fn with_prefix_keeps_ok() {
        let result: Result<u8, NestingError> = Ok(7);
        assert_eq!(result.with_prefix("ignored").unwrap(), 7);
    }
}
