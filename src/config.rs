use crate::error::NestingError;
use serde::Deserialize;
use serde::Serialize;

/// Default primary-key format of a tag reference.
pub const DEFAULT_IDENTITY_PATTERN: &str = r"^TAG-\d+";

/// Extractor settings. Every field has a default, so a partial TOML file is enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Regular expression the tag reference is validated against.
    pub identity_pattern: String,

    /// Decimal places applied once when the record is assembled.
    pub precision: Precision,

    /// Names of the worksheets each section is read from.
    pub sheets: SheetNames,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            identity_pattern: DEFAULT_IDENTITY_PATTERN.to_owned(),
            precision: Precision::default(),
            sheets: SheetNames::default(),
        }
    }
}

impl ExtractorConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, NestingError> {
        Ok(toml::from_str(text)?)
    }
}

/// Rounding policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precision {
    /// Lengths, areas, times, costs and percentages
    pub dimensions: u32,
    /// Masses in kilograms
    pub weights: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Precision {
            dimensions: 2,
            weights: 4,
        }
    }
}

/// Worksheet names per section, matched case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    pub summary: String,
    pub profiles: String,
    pub consumables: String,
    pub machine: String,
    pub delivery: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        SheetNames {
            summary: "Summary".to_owned(),
            profiles: "Profiles".to_owned(),
            consumables: "Consumables".to_owned(),
            machine: "Machine info".to_owned(),
            delivery: "Delivery order".to_owned(),
        }
    }
}
