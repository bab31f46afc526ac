//! # Nesting Workbook Extraction
//!
//! Converts the spreadsheet export of a panel nesting/cutting run (pre-insulated duct
//! panels, U/F profiles, consumables) into a strictly typed [`NestingExecutionRecord`].
//!
//! ## Features
//!
//! - **In-memory parsing**: `.xlsx` / `.xlsm` packages are read from bytes, nothing touches disk
//! - **Position-free lookup**: values are found by their label, then read at a fixed offset,
//!   so inserted rows and merged titles do not break extraction
//! - **Repeating blocks**: one profile entry per `PROFILE TYPE` block, each reading its own labels
//! - **Partial results**: gaps become warnings and null/zero values; only a missing project
//!   reference fails the extraction
//! - **Deterministic output**: rounding is applied once, and the result carries the SHA-256 of
//!   its input so callers can detect duplicate files
//!
//! ## Example
//!
//! ```no_run
//! let bytes = std::fs::read("nesting.xlsx").unwrap();
//! let result = nesting_extract::extract(&bytes, None);
//! println!("{}", result.to_json().unwrap());
//! ```
mod error;
mod helpers;

pub mod config;
pub mod extraction;
pub mod record;
pub mod spreadsheet;

pub use config::ExtractorConfig;
pub use config::Precision;
pub use config::SheetNames;
pub use error::NestingError;
pub use extraction::extract;
pub use extraction::sha256_hex;
pub use extraction::Extractor;
pub use record::ErrorKind;
pub use record::ExtractionResult;
pub use record::ExtractionStatus;
pub use record::NestingExecutionRecord;
pub use record::ValidationStatus;
pub use spreadsheet::Workbook;
