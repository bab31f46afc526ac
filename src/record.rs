//! Output contract: the extraction result and the nesting execution record.
//!
//! Absent optional fields are omitted when serialized. Measures holding a whole
//! number are written as JSON integers, so a logical zero is emitted as `0`.
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;

/// Largest magnitude below which every whole f64 is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Overall classification of one extraction call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionStatus {
    /// Every field was read without a warning
    Success,
    /// The record is usable but some fields were missing or malformed
    Partial,
    /// No record could be produced
    Error,
}

/// Why an extraction produced no record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Neither project reference nor project name holds a value
    MissingIdentity,
    /// The bytes could not be opened as a workbook
    UnreadableWorkbook,
}

/// Result of the tag reference format check.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    #[default]
    Ok,
    Warning,
}

/// What a caller receives for every input, readable or not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub status: ExtractionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<NestingExecutionRecord>,

    pub warnings: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    /// Lowercase hex SHA-256 of the input bytes
    pub source_sha256: String,

    pub parser_version: String,
}

impl ExtractionResult {
    /// Serializes to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NestingExecutionRecord {
    pub meta_data: MetaData,
    pub raw_material_panel: RawMaterialPanel,
    pub profiles_and_flanges: Vec<ProfileUsage>,
    pub consumables: Consumables,
    pub flange_accessories: FlangeAccessories,
    pub machine_telemetry: MachineTelemetry,
    pub delivery_order_items: Vec<DeliveryOrderItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
    pub project_ref_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    pub validation_status: ValidationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_date: Option<DateTime<Utc>>,

    pub source_sheet_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMaterialPanel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_spec_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub thickness_mm: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub sheet_length_m: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub sheet_width_m: Option<f64>,

    pub inventory_impact: InventoryImpact,
}

/// Panel stock consumed by the nesting run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryImpact {
    pub utilized_sheets_count: i64,

    #[serde(serialize_with = "serialize_measure")]
    pub net_reusable_remnant_area_m2: f64,

    #[serde(serialize_with = "serialize_measure")]
    pub total_nesting_waste_m2: f64,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub utilized_area_m2: Option<f64>,
}

/// One profile block: a U or F profile and how much of it the run consumed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUsage {
    pub profile_type: String,

    #[serde(serialize_with = "serialize_measure")]
    pub total_length_m: f64,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub remaining_m: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_count: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Consumables {
    pub silicone_kg: Quantity,
    pub aluminum_tape_m: Quantity,
    pub junction_glue_kg: Quantity,
    pub flange_glue_kg: Quantity,
}

/// A consumed amount plus the optional allowance added on top of it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(serialize_with = "serialize_measure")]
    pub quantity: f64,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub extra_allowance_pct: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlangeAccessories {
    pub corners: Vec<CornerAccessory>,
    pub total_corner_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerAccessory {
    pub corner_type: String,
    pub quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub unit_cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub total_cost: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineTelemetry {
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub cut_length_m: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub travel_distance_m: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub machining_time_min: Option<f64>,
}

/// A finished-goods line from the delivery order table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOrderItem {
    pub line_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub qty_produced: i64,

    #[serde(serialize_with = "serialize_measure")]
    pub area_m2: f64,

    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_optional_measure")]
    pub length_m: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
}

/// Writes whole numbers as integers and everything else as floats.
fn serialize_measure<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_optional_measure<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_measure(value, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn whole_measures_are_integers() {
        let impact = InventoryImpact {
            utilized_sheets_count: 5,
            net_reusable_remnant_area_m2: 0.0,
            total_nesting_waste_m2: 1.25,
            utilized_area_m2: Some(12.0),
        };
        let value = serde_json::to_value(&impact).unwrap();
        assert_eq!(
            value,
            json!({
                "utilized_sheets_count": 5,
                "net_reusable_remnant_area_m2": 0,
                "total_nesting_waste_m2": 1.25,
                "utilized_area_m2": 12
            })
        );
        assert!(!serde_json::to_string(&impact).unwrap().contains("0.0"));
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let value = serde_json::to_value(MachineTelemetry::default()).unwrap();
        assert_eq!(value, json!({}));

        let item = DeliveryOrderItem {
            line_id: "1".to_owned(),
            qty_produced: 2,
            area_m2: 0.5,
            ..Default::default()
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({ "line_id": "1", "qty_produced": 2, "area_m2": 0.5 }));
    }

    #[test]
    fn statuses_are_screaming_snake_case() {
        assert_eq!(serde_json::to_value(ExtractionStatus::Partial).unwrap(), json!("PARTIAL"));
        assert_eq!(serde_json::to_value(ErrorKind::MissingIdentity).unwrap(), json!("MISSING_IDENTITY"));
        assert_eq!(serde_json::to_value(ErrorKind::UnreadableWorkbook).unwrap(), json!("UNREADABLE_WORKBOOK"));
        assert_eq!(serde_json::to_value(ValidationStatus::Warning).unwrap(), json!("WARNING"));
    }

    #[test]
    fn report_date_is_utc_iso8601() {
        let meta = MetaData {
            project_ref_id: "TAG-1001".to_owned(),
            report_date: "2024-05-01T00:00:00Z".parse::<DateTime<Utc>>().ok(),
            source_sheet_count: 5,
            ..Default::default()
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["report_date"], json!("2024-05-01T00:00:00Z"));
        assert_eq!(value["validation_status"], json!("OK"));
        assert!(value.get("project_name").is_none());
    }

    #[test]
    fn result_round_trips_through_json() {
        let result = ExtractionResult {
            status: ExtractionStatus::Error,
            record: None,
            warnings: vec!["Sheet 'Summary' not found".to_owned()],
            error_message: Some("no identity".to_owned()),
            error_kind: Some(ErrorKind::MissingIdentity),
            source_sha256: "00".to_owned(),
            parser_version: "test".to_owned(),
        };
        let text = result.to_json().unwrap();
        assert!(!text.contains("\"record\""));
        let parsed: ExtractionResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, result);
    }
}
