//! Panel stock consumption from the summary sheet.
use crate::extraction::anchor::locate;
use crate::extraction::anchor::MatchMode;
use crate::extraction::offset::read;
use crate::extraction::offset::read_optional;
use crate::extraction::outcome::Extracted;
use crate::record::InventoryImpact;
use crate::spreadsheet::Sheet;

const UTILIZED_SHEETS: &str = "UTILIZED SHEETS";
const REUSABLE_REMNANTS: &str = "REUSABLE REMNANTS (m2)";
const NESTING_WASTE: &str = "NESTING WASTE (m2)";
const UTILIZED_AREA: &str = "UTILIZED AREA (m2)";

pub fn extract(sheet: &Sheet) -> Extracted<InventoryImpact> {
    let mut warnings = Vec::new();
    let found = |label: &str| locate(sheet, label, MatchMode::CaseInsensitive);

    let utilized_sheets_count = read::<i64>(sheet, &found(UTILIZED_SHEETS), 0, 1, &mut warnings).unwrap_or(0);
    let net_reusable_remnant_area_m2 =
        read::<f64>(sheet, &found(REUSABLE_REMNANTS), 0, 1, &mut warnings).unwrap_or(0.0);
    let total_nesting_waste_m2 = read::<f64>(sheet, &found(NESTING_WASTE), 0, 1, &mut warnings).unwrap_or(0.0);
    let utilized_area_m2 = read_optional::<f64>(sheet, &found(UTILIZED_AREA), 0, 1, &mut warnings);

    Extracted::new(
        InventoryImpact {
            utilized_sheets_count,
            net_reusable_remnant_area_m2,
            total_nesting_waste_m2,
            utilized_area_m2,
        },
        warnings,
    )
}
