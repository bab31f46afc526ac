use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

/// First run of digits (with separators) inside a free-form number such as "45,500 mm".
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d[\d.,' \u{a0}]*").expect("Hardcode regex pattern"));

/// Storage kind of a raw cell as declared by the workbook package.
/// Only used while loading; cells are resolved to a [`CellValue`] before extraction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values (true/false)
    Boolean,
    /// Numeric values
    Number,
    /// Serial date/time counted from the 1900 epoch
    NumberDateTime1900,
    /// Serial date/time counted from the 1904 epoch
    NumberDateTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// Inline string values
    InlineString,
    /// Shared string table references
    SharedString,
    /// Error values
    Error,
}

impl CellType {
    /// Parses built-in number format IDs; only date and time formats matter here.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "14" | "15" | "16" | "17" | "18" | "19" | "20" | "21" | "22" | "45" | "46" | "47" => {
                Some(Self::serial_date(is_1904))
            }
            _ => None,
        }
    }

    /// Parses custom number format strings, looking for date/time tokens outside literals.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_color = false;
        let mut is_date = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_color => is_literal = true,

                ']' if is_color => is_color = false,
                '[' if !is_literal => is_color = true,
                _ if is_literal || is_color => (),

                'Y' | 'y' | 'D' | 'd' | 'H' | 'h' | 'S' | 's' => is_date = true,
                _ => (),
            }
        }

        if is_date {
            Self::serial_date(is_1904)
        } else {
            Self::Number
        }
    }

    fn serial_date(is_1904: bool) -> Self {
        if is_1904 {
            Self::NumberDateTime1904
        } else {
            Self::NumberDateTime1900
        }
    }
}

/// Converts a serial date to a calendar date-time.
/// Handles the Lotus 1-2-3 leap year bug for the 1900 epoch.
pub(crate) fn serial_to_datetime(serial: f64, is_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let offset = if is_1904 {
        1462
    } else if days < 60 {
        1
    } else {
        0
    };
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let milliseconds = (serial.fract() * 86_400_000f64).round() as i64;
    epoch
        .checked_add_signed(Duration::try_days(days.checked_add(offset)?)?)?
        .checked_add_signed(Duration::try_milliseconds(milliseconds)?)
}

/// Resolved value of a cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    /// Error literal such as `#DIV/0!`
    Error(String),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// A single populated cell with its 0-based position.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
    /// Resolved cell value
    pub value: CellValue,
}

impl Cell {
    pub fn new(row: usize, col: usize, value: impl Into<CellValue>) -> Self {
        Cell { row, col, value: value.into() }
    }

    /// True when the cell holds nothing, or only whitespace.
    pub fn is_blank(&self) -> bool {
        match &self.value {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Label view of the cell: trimmed text with inner whitespace runs collapsed.
    /// Only text cells carry labels.
    pub fn label(&self) -> Option<String> {
        match &self.value {
            CellValue::Text(text) => {
                let label = normalize_label(text);
                (!label.is_empty()).then_some(label)
            }
            _ => None,
        }
    }

    /// Converts the cell to trimmed text. Whole numbers render without a fraction.
    pub fn to_text(&self) -> Result<String, String> {
        match &self.value {
            CellValue::Empty => Err("cell is empty".to_owned()),
            CellValue::Text(text) if text.trim().is_empty() => Err("cell is empty".to_owned()),
            CellValue::Text(text) => Ok(text.trim().to_owned()),
            CellValue::Number(number) => Ok(format_number(*number)),
            CellValue::Boolean(value) => Ok(if *value { "TRUE" } else { "FALSE" }.to_owned()),
            CellValue::DateTime(datetime) => Ok(datetime.format("%Y-%m-%dT%H:%M:%S").to_string()),
            CellValue::Error(error) => Err(format!("cell holds error value {error}")),
        }
    }

    /// Converts the cell to a double. Text is parsed leniently: thousands separators
    /// and trailing units are stripped ("45,500 mm" -> 45500).
    pub fn to_double(&self) -> Result<f64, String> {
        match &self.value {
            CellValue::Number(number) => Ok(*number),
            CellValue::Text(text) if text.trim().is_empty() => Err("cell is empty".to_owned()),
            CellValue::Text(text) => parse_locale_number(text)
                .ok_or_else(|| format!("parse '{}' to double failed", text.trim())),
            CellValue::Empty => Err("cell is empty".to_owned()),
            CellValue::Boolean(_) => Err("cell holds a boolean, not a number".to_owned()),
            CellValue::DateTime(_) => Err("cell holds a date, not a number".to_owned()),
            CellValue::Error(error) => Err(format!("cell holds error value {error}")),
        }
    }

    /// Converts the cell to a 64-bit integer. Only whole numbers are accepted.
    pub fn to_bigint(&self) -> Result<i64, String> {
        let number = self.to_double()?;
        let rounded = number.round();
        if (number - rounded).abs() < 1e-9 && rounded.abs() < i64::MAX as f64 {
            Ok(rounded as i64)
        } else {
            Err(format!("parse '{}' to bigint failed", format_number(number)))
        }
    }

    /// Converts the cell to a date-time. Serial dates are resolved at load time;
    /// text is accepted in ISO form ("2024-05-01", "2024-05-01T08:30:00") or "01/05/2024".
    pub fn to_datetime(&self) -> Result<NaiveDateTime, String> {
        match &self.value {
            CellValue::DateTime(datetime) => Ok(*datetime),
            CellValue::Text(text) => parse_datetime_text(text.trim())
                .ok_or_else(|| format!("parse '{}' to datetime failed", text.trim())),
            CellValue::Empty => Err("cell is empty".to_owned()),
            _ => Err(format!("parse '{}' to datetime failed", self)),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => write!(f, "{text}"),
            CellValue::Number(number) => write!(f, "{}", format_number(*number)),
            CellValue::Boolean(value) => write!(f, "{}", if *value { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Error(error) => write!(f, "{error}"),
        }
    }
}

/// Trims and collapses whitespace runs (including non-breaking spaces) to a single space.
pub fn normalize_label(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// Parses a human-formatted number: "1,234.5", "1.234,5", "45 500 mm", "12 %", "1,5".
fn parse_locale_number(text: &str) -> Option<f64> {
    let matched = NUMBER_PATTERN.find(text.trim())?.as_str();
    let compact: String = matched
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\'')
        .collect();
    let compact = compact.trim_end_matches(['.', ',']);

    let last_dot = compact.rfind('.');
    let last_comma = compact.rfind(',');
    let normalized = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) if dot > comma => compact.replace(',', ""),
        (Some(_), Some(_)) => compact.replace('.', "").replace(',', "."),
        (None, Some(comma)) => {
            let decimals = compact.len() - comma - 1;
            if compact.matches(',').count() == 1 && decimals != 3 {
                compact.replace(',', ".")
            } else {
                compact.replace(',', "")
            }
        }
        (Some(_), None) if compact.matches('.').count() > 1 => compact.replace('.', ""),
        _ => compact.to_owned(),
    };
    normalized.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%SZ"];
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y"];
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Cell {
        Cell::new(0, 0, value)
    }

    #[test]
    fn custom_number_formats() {
        assert_eq!(CellType::parse_custom_number_format("yyyy-mm-dd", false), CellType::NumberDateTime1900);
        assert_eq!(CellType::parse_custom_number_format("hh:mm", true), CellType::NumberDateTime1904);
        assert_eq!(CellType::parse_custom_number_format("0.00\" days\"", false), CellType::Number);
        assert_eq!(CellType::parse_custom_number_format("[Red]#,##0", false), CellType::Number);
        assert_eq!(CellType::parse_builtin_number_format_id("14", false), Some(CellType::NumberDateTime1900));
        assert_eq!(CellType::parse_builtin_number_format_id("2", false), None);
    }

    #[test]
    fn serial_dates() {
        let date = serial_to_datetime(45413.5, false).unwrap();
        assert_eq!(date.to_string(), "2024-05-01 12:00:00");
        let date = serial_to_datetime(1.0, false).unwrap();
        assert_eq!(date.to_string(), "1900-01-01 00:00:00");
        let date = serial_to_datetime(0.0, true).unwrap();
        assert_eq!(date.to_string(), "1904-01-01 00:00:00");
        assert!(serial_to_datetime(-1.0, false).is_none());
    }

    #[test]
    fn serial_dates_out_of_calendar_range() {
        assert!(serial_to_datetime(1e16, false).is_none());
        assert!(serial_to_datetime(1e10, true).is_none());
        assert!(serial_to_datetime(f64::MAX, false).is_none());
    }

    #[test]
    fn locale_numbers() {
        assert_eq!(text("45500").to_double(), Ok(45500.0));
        assert_eq!(text("45,500 mm").to_double(), Ok(45500.0));
        assert_eq!(text("45 500 mm").to_double(), Ok(45500.0));
        assert_eq!(text("1,234.56").to_double(), Ok(1234.56));
        assert_eq!(text("1.234,56").to_double(), Ok(1234.56));
        assert_eq!(text("1,5 kg").to_double(), Ok(1.5));
        assert_eq!(text("12 %").to_double(), Ok(12.0));
        assert_eq!(text("-3.25m").to_double(), Ok(-3.25));
        assert_eq!(text("1.234.567").to_double(), Ok(1234567.0));
        assert!(text("n/a").to_double().is_err());
        assert!(text("  ").to_double().is_err());
    }

    #[test]
    fn integers() {
        assert_eq!(Cell::new(0, 0, 5.0).to_bigint(), Ok(5));
        assert_eq!(text("12 sheets").to_bigint(), Ok(12));
        assert!(Cell::new(0, 0, 5.5).to_bigint().is_err());
    }

    #[test]
    fn text_conversion() {
        assert_eq!(Cell::new(0, 0, 1001.0).to_text(), Ok("1001".to_owned()));
        assert_eq!(Cell::new(0, 0, 2.5).to_text(), Ok("2.5".to_owned()));
        assert_eq!(text("  TAG-1001 ").to_text(), Ok("TAG-1001".to_owned()));
        assert!(text(" ").to_text().is_err());
        assert!(Cell::new(0, 0, CellValue::Error("#N/A".to_owned())).to_text().is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(text("  TOTAL   LENGTH\u{a0}(mm) ").label(), Some("TOTAL LENGTH (mm)".to_owned()));
        assert_eq!(Cell::new(0, 0, 3.0).label(), None);
        assert_eq!(text("   ").label(), None);
    }

    #[test]
    fn datetimes() {
        assert_eq!(text("2024-05-01").to_datetime().unwrap().to_string(), "2024-05-01 00:00:00");
        assert_eq!(text("01/05/2024").to_datetime().unwrap().to_string(), "2024-05-01 00:00:00");
        assert!(text("tomorrow").to_datetime().is_err());
    }
}
