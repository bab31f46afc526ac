//! Identity and material parameters from the summary sheet.
use crate::extraction::anchor::locate;
use crate::extraction::anchor::MatchMode;
use crate::extraction::offset::read;
use crate::extraction::offset::read_optional;
use crate::extraction::outcome::Extracted;
use crate::extraction::sections::MM_PER_M;
use crate::record::ValidationStatus;
use crate::spreadsheet::Sheet;
use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::Utc;
use regex::Regex;

const PROJECT_REFERENCE: &str = "PROJECT REFERENCE";
const PROJECT_NAME: &str = "PROJECT NAME";
const DATE: &str = "DATE";
const MATERIAL: &str = "MATERIAL";
const THICKNESS: &str = "THICKNESS (mm)";
const SHEET_LENGTH: &str = "SHEET LENGTH (mm)";
const SHEET_WIDTH: &str = "SHEET WIDTH (mm)";

/// The primary key of a record and the outcome of its format check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    /// `None` when neither label holds a value
    pub project_ref_id: Option<String>,
    pub project_name: Option<String>,
    pub validation_status: ValidationStatus,
}

/// Everything the summary sheet says about the project and the panel stock.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentitySection {
    pub identity: Identity,
    pub report_date: Option<DateTime<Utc>>,
    pub material_spec_name: Option<String>,
    pub thickness_mm: Option<f64>,
    pub sheet_length_m: Option<f64>,
    pub sheet_width_m: Option<f64>,
}

/// Derives the tag reference: `PROJECT REFERENCE` first, `PROJECT NAME` when the
/// reference is absent or empty. A value failing `pattern` is kept but flagged.
pub fn resolve(sheet: &Sheet, pattern: &Regex) -> Extracted<Identity> {
    let mut warnings = Vec::new();
    let reference_anchor = locate(sheet, PROJECT_REFERENCE, MatchMode::CaseInsensitive);
    let name_anchor = locate(sheet, PROJECT_NAME, MatchMode::CaseInsensitive);
    let reference = read_optional::<String>(sheet, &reference_anchor, 0, 1, &mut warnings);
    let project_name = read_optional::<String>(sheet, &name_anchor, 0, 1, &mut warnings);

    let project_ref_id = match (reference, &project_name) {
        (Some(reference), _) => Some(reference),
        (None, Some(name)) => {
            let reason = if reference_anchor.is_found() { "is empty" } else { "not found" };
            warnings.push(format!(
                "{}: '{PROJECT_REFERENCE}' {reason}, using '{PROJECT_NAME}' value '{name}' as project reference",
                sheet.name()
            ));
            Some(name.to_owned())
        }
        (None, None) => None,
    };

    let validation_status = match &project_ref_id {
        Some(id) if !pattern.is_match(id) => {
            warnings.push(format!(
                "{}: project reference '{id}' does not match pattern '{}'",
                sheet.name(),
                pattern.as_str()
            ));
            ValidationStatus::Warning
        }
        _ => ValidationStatus::Ok,
    };

    Extracted::new(
        Identity {
            project_ref_id,
            project_name,
            validation_status,
        },
        warnings,
    )
}

/// Extracts identity plus material parameters. Lengths given in millimetres are converted to metres.
pub fn extract(sheet: &Sheet, pattern: &Regex) -> Extracted<IdentitySection> {
    resolve(sheet, pattern).and_then(|identity| {
        let mut warnings = Vec::new();
        let found = |label: &str| locate(sheet, label, MatchMode::CaseInsensitive);

        let report_date = read_optional::<NaiveDateTime>(sheet, &found(DATE), 0, 1, &mut warnings)
            .map(|datetime| datetime.and_utc());
        let material_spec_name = read::<String>(sheet, &found(MATERIAL), 0, 1, &mut warnings);
        let thickness_mm = read::<f64>(sheet, &found(THICKNESS), 0, 1, &mut warnings);
        let sheet_length_m = read_optional::<f64>(sheet, &found(SHEET_LENGTH), 0, 1, &mut warnings)
            .map(|length| length / MM_PER_M);
        let sheet_width_m = read_optional::<f64>(sheet, &found(SHEET_WIDTH), 0, 1, &mut warnings)
            .map(|width| width / MM_PER_M);

        Extracted::new(
            IdentitySection {
                identity,
                report_date,
                material_spec_name,
                thickness_mm,
                sheet_length_m,
                sheet_width_m,
            },
            warnings,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::Cell;

    fn pattern() -> Regex {
        Regex::new(r"^TAG-\d+").unwrap()
    }

    fn summary(reference: Option<&str>, name: Option<&str>) -> Sheet {
        let mut cells = vec![
            Cell::new(1, 0, "PROJECT REFERENCE"),
            Cell::new(2, 0, "PROJECT NAME"),
            Cell::new(3, 0, "DATE"),
            Cell::new(3, 1, "2024-05-01"),
            Cell::new(4, 0, "MATERIAL"),
            Cell::new(4, 1, "PIR 20mm ALU/ALU"),
            Cell::new(5, 0, "THICKNESS (mm)"),
            Cell::new(5, 1, 20.0),
            Cell::new(6, 0, "SHEET LENGTH (mm)"),
            Cell::new(6, 1, 4000.0),
        ];
        if let Some(reference) = reference {
            cells.push(Cell::new(1, 1, reference));
        }
        if let Some(name) = name {
            cells.push(Cell::new(2, 1, name));
        }
        Sheet::from_cells("Summary", cells, vec![])
    }

    #[test]
    fn reference_is_preferred() {
        let resolved = resolve(&summary(Some("TAG-1001"), Some("Hospital wing B")), &pattern());
        assert!(resolved.is_clean());
        assert_eq!(resolved.value.project_ref_id.as_deref(), Some("TAG-1001"));
        assert_eq!(resolved.value.project_name.as_deref(), Some("Hospital wing B"));
        assert_eq!(resolved.value.validation_status, ValidationStatus::Ok);
    }

    #[test]
    fn empty_reference_falls_back_to_name() {
        let resolved = resolve(&summary(None, Some("TAG-1001")), &pattern());
        assert_eq!(resolved.value.project_ref_id.as_deref(), Some("TAG-1001"));
        assert_eq!(resolved.value.validation_status, ValidationStatus::Ok);
        assert_eq!(resolved.warnings.len(), 1);
        assert!(resolved.warnings[0].contains("'PROJECT REFERENCE' is empty"));
    }

    #[test]
    fn malformed_reference_is_kept_with_warning() {
        let resolved = resolve(&summary(Some("PRJ-77"), None), &pattern());
        assert_eq!(resolved.value.project_ref_id.as_deref(), Some("PRJ-77"));
        assert_eq!(resolved.value.validation_status, ValidationStatus::Warning);
        assert_eq!(
            resolved.warnings,
            vec![r"Summary: project reference 'PRJ-77' does not match pattern '^TAG-\d+'"]
        );
    }

    #[test]
    fn numeric_reference_is_read_as_text() {
        let sheet = Sheet::from_cells(
            "Summary",
            vec![Cell::new(0, 0, "PROJECT REFERENCE"), Cell::new(0, 1, 1001.0)],
            vec![],
        );
        let resolved = resolve(&sheet, &Regex::new(r"^\d+$").unwrap());
        assert_eq!(resolved.value.project_ref_id.as_deref(), Some("1001"));
    }

    #[test]
    fn missing_identity() {
        let resolved = resolve(&summary(None, None), &pattern());
        assert_eq!(resolved.value.project_ref_id, None);
        assert_eq!(resolved.value.validation_status, ValidationStatus::Ok);
    }

    #[test]
    fn material_parameters() {
        let extracted = extract(&summary(Some("TAG-1001"), None), &pattern());
        assert!(extracted.is_clean(), "{:?}", extracted.warnings);
        let section = extracted.value;
        assert_eq!(section.material_spec_name.as_deref(), Some("PIR 20mm ALU/ALU"));
        assert_eq!(section.thickness_mm, Some(20.0));
        assert_eq!(section.sheet_length_m, Some(4.0));
        assert_eq!(section.sheet_width_m, None);
        assert_eq!(section.report_date.map(|date| date.to_rfc3339()).as_deref(), Some("2024-05-01T00:00:00+00:00"));
    }

    #[test]
    fn missing_material_warns() {
        let sheet = Sheet::from_cells(
            "Summary",
            vec![Cell::new(0, 0, "PROJECT REFERENCE"), Cell::new(0, 1, "TAG-1")],
            vec![],
        );
        let extracted = extract(&sheet, &pattern());
        assert_eq!(extracted.value.material_spec_name, None);
        assert_eq!(
            extracted.warnings,
            vec!["Summary: label 'MATERIAL' not found", "Summary: label 'THICKNESS (mm)' not found"]
        );
    }
}
