//! Office Open XML (.xlsx / .xlsm) package loader.
use crate::error::NestingError;
use crate::error::ResultMessage;
use crate::helpers::xml::XmlAttributeHelper;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::serial_to_datetime;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::range::CellRange;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::reference::row_to_index;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::BufRead;
use std::io::Read;
use std::io::Seek;
use zip::ZipArchive;

// XML tag names for parsing the OOXML workbook parts
const TAG_RELATIONSHIP: &[u8] = b"Relationship";
const TAG_CUSTOM_FORMATS: QName = QName(b"numFmts"); // Custom number formats container
const TAG_CUSTOM_FORMAT: QName = QName(b"numFmt"); // Individual custom number format
const TAG_FORMAT_INDEXES: QName = QName(b"cellXfs"); // Cell format indexes container
const TAG_FORMAT_INDEX: QName = QName(b"xf"); // Individual cell format index
const TAG_SHARED_STRING_ITEM: QName = QName(b"si"); // Shared string table item
const TAG_PHONETIC_TEXT: QName = QName(b"rPh"); // Phonetic text for Asian languages
const TAG_TEXT: QName = QName(b"t"); // Text content within strings
const TAG_WORKBOOK_PROPERTIES: QName = QName(b"workbookPr"); // Workbook properties
const TAG_SHEET: QName = QName(b"sheet"); // Worksheet definition
const TAG_ROW: QName = QName(b"row"); // Row in worksheet
const TAG_CELL: QName = QName(b"c"); // Cell in worksheet
const TAG_INLINE_STRING: QName = QName(b"is"); // Inline string value
const TAG_VALUE: QName = QName(b"v"); // Cell value content
const TAG_MERGE_CELL: QName = QName(b"mergeCell"); // Merged region

/// An opened OOXML workbook package, read entirely from memory.
pub(crate) struct XlsxPackage<RS: Read + Seek> {
    zip: ZipArchive<RS>,
    /// Cell type per style index, for date detection
    number_formats: Vec<CellType>,
    /// Worksheets as (name, zip_path) pairs in workbook order
    sheets: Vec<(String, String)>,
    /// Whether the workbook uses the 1904 date system
    is_1904: bool,
    shared_strings: Vec<String>,
}

impl<RS: Read + Seek> XlsxPackage<RS> {
    /// Opens the package and loads workbook structure, styles and shared strings.
    pub(crate) fn open(reader: RS) -> Result<Self, NestingError> {
        let mut zip = ZipArchive::new(reader)?;
        let (sheets, is_1904) = load_workbook(&mut zip).with_prefix("read workbook structure")?;
        if sheets.is_empty() {
            Err(SpreadsheetError::SpreadsheetEmptyError)?
        }
        let number_formats = load_number_formats(&mut zip, is_1904).with_prefix("read styles")?;
        let shared_strings = load_shared_strings(&mut zip).with_prefix("read shared strings")?;
        Ok(XlsxPackage {
            zip,
            number_formats,
            sheets,
            is_1904,
            shared_strings,
        })
    }

    /// Reads every worksheet into a [`Sheet`], in workbook order.
    pub(crate) fn read_sheets(&mut self) -> Result<Vec<Sheet>, NestingError> {
        let sheets = self.sheets.clone();
        sheets
            .iter()
            .map(|(name, path)| {
                self.read_sheet(name, path)
                    .with_prefix(&format!("read worksheet '{name}'"))
            })
            .collect()
    }

    fn read_sheet(&mut self, sheet_name: &str, zip_path: &str) -> Result<Sheet, NestingError> {
        let mut sheet = Sheet::new(sheet_name);
        let mut reader = self
            .zip
            .xml_reader(zip_path)?
            .ok_or_else(|| SpreadsheetError::FileError(zip_path.to_owned()))?;

        let mut row_count = 0usize;
        let mut col_count = 0usize;
        let mut row = 0usize;
        let mut col = 0usize;
        let mut kind = CellType::default();
        let mut value = String::new();
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TAG_ROW => {
                if let Some(index) = event.get_attribute_value("r")?.and_then(|r| row_to_index(&r)) {
                    row_count = index;
                }
                col_count = 0;
            }
            Event::End(event) if event.name() == TAG_ROW => {
                row_count += 1;
            }
            Event::Start(event) if event.name() == TAG_CELL => {
                (row, col) = event.get_attribute_value("r")?
                    .and_then(|reference| reference_to_index(&reference))
                    .unwrap_or((row_count, col_count));
                col_count = col + 1;
                value.clear();
                kind = event.get_attribute_value("t")?.map(|t| {
                    match t.as_ref() {
                        "inlineStr" | "str" => CellType::InlineString,
                        "s" => CellType::SharedString,
                        "d" => CellType::IsoDateTime,
                        "b" => CellType::Boolean,
                        "e" => CellType::Error,
                        _ => CellType::Number,
                    }
                }).unwrap_or(CellType::Number);
                if let Some(format_id) = event.get_attribute_value("s")? {
                    if kind == CellType::Number && !format_id.is_empty() {
                        let index = format_id.parse::<usize>()?;
                        kind = self.number_formats.get(index).copied().unwrap_or(CellType::Number);
                    }
                }
            }
            Event::Start(event) if event.name() == TAG_INLINE_STRING => {
                value = read_string_value(&mut reader, TAG_INLINE_STRING, false)?;
            }
            Event::Start(event) if event.name() == TAG_VALUE => {
                value = read_string_value(&mut reader, TAG_VALUE, true)?;
            }
            Event::End(event) if event.name() == TAG_CELL => {
                if !value.is_empty() {
                    let resolved = resolve_value(kind, &value, &self.shared_strings, self.is_1904);
                    sheet.push(Cell { row, col, value: resolved });
                }
                value.clear();
                kind = CellType::default();
            }
            Event::Start(event) if event.name() == TAG_MERGE_CELL => {
                if let Some(reference) = event.get_attribute_value("ref")? {
                    sheet.merge(CellRange::try_from(reference.as_ref())?);
                }
            }
        });
        sheet.finish();
        log::debug!("loaded sheet '{}' with {} populated cells", sheet_name, sheet.len());
        Ok(sheet)
    }
}

/// Converts the raw text of a cell into a typed value according to its declared kind.
fn resolve_value(kind: CellType, value: &str, shared_strings: &[String], is_1904: bool) -> CellValue {
    match kind {
        CellType::Empty => CellValue::Empty,
        CellType::InlineString => CellValue::Text(value.to_owned()),
        CellType::SharedString => value
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|index| shared_strings.get(index))
            .map(|text| CellValue::Text(text.to_owned()))
            .unwrap_or(CellValue::Error(format!("#SST!{value}"))),
        CellType::Boolean => CellValue::Boolean(value.trim() == "1" || value.trim().eq_ignore_ascii_case("true")),
        CellType::Error => CellValue::Error(value.to_owned()),
        CellType::IsoDateTime => Cell::new(0, 0, value)
            .to_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|_| CellValue::Text(value.to_owned())),
        CellType::Number => match value.trim().parse::<f64>() {
            Ok(number) => CellValue::Number(number),
            Err(_) => CellValue::Text(value.to_owned()),
        },
        CellType::NumberDateTime1900 | CellType::NumberDateTime1904 => {
            let is_1904 = is_1904 || kind == CellType::NumberDateTime1904;
            match value.trim().parse::<f64>() {
                Ok(serial) => serial_to_datetime(serial, is_1904)
                    .map(CellValue::DateTime)
                    .unwrap_or(CellValue::Number(serial)),
                Err(_) => CellValue::Text(value.to_owned()),
            }
        }
    }
}

/// Loads worksheet relationships (id -> zip path) from a relationships part.
fn load_relationships<RS: Read + Seek>(zip: &mut ZipArchive<RS>, path: &str) -> Result<HashMap<String, String>, NestingError> {
    let mut reader = zip.xml_reader(path)?
        .ok_or_else(|| SpreadsheetError::FileError(path.to_string()))?;
    let mut relationships: HashMap<String, String> = HashMap::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
            let id = event.get_attribute_value("Id")?;
            let kind = event.get_attribute_value("Type")?;
            let target = event.get_attribute_value("Target")?;
            if kind.map(|it| it.ends_with("/worksheet")).unwrap_or(true) {
                if let Some((id, target)) = id.zip(target) {
                    relationships.insert(id.to_string(), to_zip_path(target));
                }
            }
        }
    });
    Ok(relationships)
}

/// Loads worksheet names and paths from `xl/workbook.xml`, and the date system in use.
fn load_workbook<RS: Read + Seek>(zip: &mut ZipArchive<RS>) -> Result<(Vec<(String, String)>, bool), NestingError> {
    let relationships = load_relationships(zip, "xl/_rels/workbook.xml.rels")?;
    let mut reader = zip.xml_reader("xl/workbook.xml")?
        .ok_or_else(|| SpreadsheetError::FileError("xl/workbook.xml".to_string()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    let mut is_1904 = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.get_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.get_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(id.as_ref()) {
                    sheets.push((name.to_string(), path.to_owned()));
                }
            }
        }
        Event::Start(event) if event.name() == TAG_WORKBOOK_PROPERTIES => {
            is_1904 = event.get_attribute_value("date1904")?
                .map(|value| value.eq("1") || value.eq("true"))
                .unwrap_or(false);
        }
    });
    Ok((sheets, is_1904))
}

/// Loads the cell type of each style index from `xl/styles.xml`.
fn load_number_formats<RS: Read + Seek>(zip: &mut ZipArchive<RS>, is_1904: bool) -> Result<Vec<CellType>, NestingError> {
    let mut reader = match zip.xml_reader("xl/styles.xml")? {
        Some(reader) => reader,
        None => return Ok(Vec::new()),
    };

    let mut custom_formats_context = false;
    let mut custom_formats = HashMap::<String, CellType>::new();
    let mut format_indexes_context = false;
    let mut format_indexes = Vec::<String>::new();

    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_CUSTOM_FORMATS => custom_formats_context = true,
        Event::End(event) if event.name() == TAG_CUSTOM_FORMATS => custom_formats_context = false,
        Event::Start(event) if custom_formats_context && event.name() == TAG_CUSTOM_FORMAT => {
            let id = event.get_attribute_value("numFmtId")?;
            let format = event.get_attribute_value("formatCode")?;
            if let Some((id, format)) = id.zip(format) {
                custom_formats.insert(id.to_string(), CellType::parse_custom_number_format(&format, is_1904));
            }
        }
        Event::Start(event) if event.name() == TAG_FORMAT_INDEXES => format_indexes_context = true,
        Event::End(event) if event.name() == TAG_FORMAT_INDEXES => format_indexes_context = false,
        Event::Start(event) if format_indexes_context && event.name() == TAG_FORMAT_INDEX => {
            let id = event.get_attribute_value("numFmtId")?.map(|id| id.to_string());
            format_indexes.push(id.unwrap_or_else(|| "0".to_owned()));
        }
    });

    Ok(format_indexes
        .iter()
        .map(|id| {
            custom_formats
                .get(id)
                .copied()
                .or_else(|| CellType::parse_builtin_number_format_id(id, is_1904))
                .unwrap_or(CellType::Number)
        })
        .collect())
}

/// Loads the shared string table; absent when the workbook has no text cells.
fn load_shared_strings<RS: Read + Seek>(zip: &mut ZipArchive<RS>) -> Result<Vec<String>, NestingError> {
    let mut shared_strings = Vec::<String>::new();
    let mut reader = match zip.xml_reader("xl/sharedStrings.xml")? {
        Some(reader) => reader,
        None => return Ok(shared_strings),
    };
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
            shared_strings.push(read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?);
        }
    });
    Ok(shared_strings)
}

/// Reads string content up to `end_tag`, skipping phonetic annotations.
fn read_string_value<R: BufRead>(
    reader: &mut XmlReader<R>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, NestingError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = false,
        Event::Text(event) if is_text => text.push_str(&event.xml_content()?),
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}

/// Normalizes a relationship target to a path inside the package.
fn to_zip_path(path: Cow<'_, str>) -> String {
    if let Some(stripped) = path.strip_prefix('/') {
        stripped.to_string()
    } else if path.starts_with("xl/") {
        path.to_string()
    } else {
        format!("xl/{path}")
    }
}
