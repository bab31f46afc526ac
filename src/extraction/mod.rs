//! # Extraction
//!
//! Turns a loaded [`Workbook`] into an [`ExtractionResult`]. Every value is found by
//! searching for its label and reading at a fixed offset from it, so the layout may
//! drift (inserted rows, merged titles) without breaking extraction.
pub mod anchor;
pub mod assemble;
pub mod block;
pub mod offset;
pub mod outcome;
pub mod sections;

use crate::config::ExtractorConfig;
use crate::config::DEFAULT_IDENTITY_PATTERN;
use crate::error::NestingError;
use crate::extraction::assemble::assemble;
use crate::extraction::assemble::Sections;
use crate::extraction::sections::on_sheet;
use crate::record::ErrorKind;
use crate::record::ExtractionResult;
use crate::record::ExtractionStatus;
use crate::spreadsheet::Workbook;
use regex::Regex;
use sha2::Digest;
use sha2::Sha256;

/// Configured extraction engine. Immutable, so one instance may serve many threads.
#[derive(Clone, Debug)]
pub struct Extractor {
    config: ExtractorConfig,
    identity_pattern: Regex,
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor {
            config: ExtractorConfig::default(),
            identity_pattern: Regex::new(DEFAULT_IDENTITY_PATTERN).expect("Hardcode regex pattern"),
        }
    }
}

impl Extractor {
    /// Builds an extractor, rejecting an identity pattern that does not compile.
    pub fn new(config: ExtractorConfig) -> Result<Self, NestingError> {
        let identity_pattern = Regex::new(&config.identity_pattern)?;
        Ok(Extractor {
            config,
            identity_pattern,
        })
    }

    /// Extracts a record from workbook bytes. Never fails: unreadable input is
    /// reported through the result's status and error fields.
    pub fn extract(&self, bytes: &[u8], parser_version: Option<&str>) -> ExtractionResult {
        let source_sha256 = sha256_hex(bytes);
        let parser_version = parser_version
            .map(str::to_owned)
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_owned());
        match Workbook::from_bytes(bytes) {
            Ok(workbook) => self.extract_workbook(&workbook, source_sha256, parser_version),
            Err(error) => {
                log::warn!("cannot open workbook {}: {}", source_sha256, error);
                ExtractionResult {
                    status: ExtractionStatus::Error,
                    record: None,
                    warnings: Vec::new(),
                    error_message: Some(format!("Cannot open workbook: {error}")),
                    error_kind: Some(ErrorKind::UnreadableWorkbook),
                    source_sha256,
                    parser_version,
                }
            }
        }
    }

    /// Runs all six section extractors over an already loaded workbook.
    pub fn extract_workbook(
        &self,
        workbook: &Workbook,
        source_sha256: String,
        parser_version: String,
    ) -> ExtractionResult {
        log::debug!("workbook {} holds sheets {:?}", source_sha256, workbook.sheet_names());
        let names = &self.config.sheets;
        let sections = Sections {
            identity: on_sheet(workbook, &names.summary, |sheet| {
                sections::identity::extract(sheet, &self.identity_pattern)
            }),
            panel: on_sheet(workbook, &names.summary, sections::panel::extract),
            profiles: on_sheet(workbook, &names.profiles, sections::profiles::extract),
            consumables: on_sheet(workbook, &names.consumables, sections::consumables::extract),
            telemetry: on_sheet(workbook, &names.machine, sections::telemetry::extract),
            delivery: on_sheet(workbook, &names.delivery, sections::delivery::extract),
        };
        let sections = dedup_missing_summary(sections);
        assemble(sections, &self.config.precision, workbook.sheet_count(), source_sha256, parser_version)
    }
}

/// Identity and panel share the summary sheet; report its absence once.
fn dedup_missing_summary(mut sections: Sections) -> Sections {
    let identity_warnings = &sections.identity.warnings;
    sections
        .panel
        .warnings
        .retain(|warning| !(warning.starts_with("Sheet '") && identity_warnings.contains(warning)));
    sections
}

/// Extracts with the default configuration.
pub fn extract(bytes: &[u8], parser_version: Option<&str>) -> ExtractionResult {
    Extractor::default().extract(bytes, parser_version)
}

/// Lowercase hex SHA-256 digest of the input.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Cell;
    use crate::spreadsheet::Sheet;

    #[test]
    fn digest_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let config = ExtractorConfig {
            identity_pattern: "^TAG-(".to_owned(),
            ..Default::default()
        };
        assert!(Extractor::new(config).is_err());
    }

    #[test]
    fn unreadable_bytes() {
        let result = extract(b"not a workbook", Some("ci"));
        assert_eq!(result.status, ExtractionStatus::Error);
        assert_eq!(result.error_kind, Some(ErrorKind::UnreadableWorkbook));
        assert_eq!(result.parser_version, "ci");
        assert_eq!(result.source_sha256, sha256_hex(b"not a workbook"));
        assert!(result.record.is_none());
    }

    #[test]
    fn default_parser_version() {
        let result = extract(b"", None);
        assert_eq!(result.parser_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn missing_summary_is_reported_once() {
        let workbook = Workbook::from_sheets(vec![Sheet::new("Profiles")]);
        let result = Extractor::default().extract_workbook(&workbook, String::new(), String::new());
        assert_eq!(result.status, ExtractionStatus::Error);
        let summary_warnings = result.warnings.iter().filter(|warning| warning.contains("'Summary'")).count();
        assert_eq!(summary_warnings, 1);
    }

    #[test]
    fn configured_sheet_names() {
        let config = ExtractorConfig::from_toml_str("[sheets]\nsummary = \"Overview\"").unwrap();
        let extractor = Extractor::new(config).unwrap();
        let overview = Sheet::from_cells(
            "Overview",
            vec![Cell::new(0, 0, "PROJECT REFERENCE"), Cell::new(0, 1, "TAG-7")],
            vec![],
        );
        let result = extractor.extract_workbook(&Workbook::from_sheets(vec![overview]), String::new(), String::new());
        assert_eq!(result.status, ExtractionStatus::Partial);
        assert_eq!(result.record.unwrap().meta_data.project_ref_id, "TAG-7");
    }
}
