//! Low-level helpers for reading OOXML workbook packages.
pub(crate) mod xml;
pub(crate) mod zip;
