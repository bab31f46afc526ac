//! Consumables and flange corner accessories.
use crate::extraction::anchor::locate;
use crate::extraction::anchor::Anchor;
use crate::extraction::anchor::AnchorMatch;
use crate::extraction::anchor::MatchMode;
use crate::extraction::offset::read;
use crate::extraction::offset::read_cell;
use crate::extraction::offset::read_optional;
use crate::extraction::outcome::Extracted;
use crate::extraction::sections::read_column;
use crate::record::Consumables;
use crate::record::CornerAccessory;
use crate::record::FlangeAccessories;
use crate::record::Quantity;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::Sheet;

const SILICONE: &str = "SILICONE (kg)";
const ALUMINUM_TAPE: &str = "ALUMINUM TAPE (m)";
const JUNCTION_GLUE: &str = "JUNCTION GLUE (kg)";
const FLANGE_GLUE: &str = "FLANGE GLUE (kg)";
const CORNER_TYPE: &str = "CORNER TYPE";

/// Column offset of the allowance percentage from a consumable label.
const ALLOWANCE_OFFSET: isize = 2;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConsumablesSection {
    pub consumables: Consumables,
    pub flange_accessories: FlangeAccessories,
}

pub fn extract(sheet: &Sheet) -> Extracted<ConsumablesSection> {
    let mut warnings = Vec::new();
    let consumables = Consumables {
        silicone_kg: read_quantity(sheet, SILICONE, &mut warnings),
        aluminum_tape_m: read_quantity(sheet, ALUMINUM_TAPE, &mut warnings),
        junction_glue_kg: read_quantity(sheet, JUNCTION_GLUE, &mut warnings),
        flange_glue_kg: read_quantity(sheet, FLANGE_GLUE, &mut warnings),
    };
    let flange_accessories = match locate(sheet, CORNER_TYPE, MatchMode::CaseInsensitive) {
        AnchorMatch::Found(header) => read_corners(sheet, &header, &mut warnings),
        missing => {
            warnings.push(format!("{}: label '{}' not found", sheet.name(), missing.label()));
            FlangeAccessories::default()
        }
    };
    Extracted::new(
        ConsumablesSection {
            consumables,
            flange_accessories,
        },
        warnings,
    )
}

fn read_quantity(sheet: &Sheet, label: &str, warnings: &mut Vec<String>) -> Quantity {
    let found = locate(sheet, label, MatchMode::CaseInsensitive);
    Quantity {
        quantity: read::<f64>(sheet, &found, 0, 1, warnings).unwrap_or(0.0),
        extra_allowance_pct: read_optional::<f64>(sheet, &found, 0, ALLOWANCE_OFFSET, warnings),
    }
}

/// Reads the corner table below its header, stopping at the first row without a corner type.
fn read_corners(sheet: &Sheet, header: &Anchor, warnings: &mut Vec<String>) -> FlangeAccessories {
    let last_row = sheet.row_upper_bound().unwrap_or(0);
    let col = header.col;
    let mut corners = Vec::new();
    for row in header.row + header.row_span..=last_row {
        let corner_type = match read_cell::<String>(sheet, row, col) {
            Ok(Some(corner_type)) => corner_type,
            Ok(None) => break,
            Err(message) => {
                warnings.push(format!(
                    "{}: corner type at {} is not valid: {message}",
                    sheet.name(),
                    index_to_reference(row, col)
                ));
                continue;
            }
        };
        corners.push(CornerAccessory {
            corner_type,
            quantity: read_column::<i64>(sheet, row, col + 1, "corner quantity", true, warnings).unwrap_or(0),
            unit_cost: read_column::<f64>(sheet, row, col + 2, "unit cost", false, warnings),
            total_cost: read_column::<f64>(sheet, row, col + 3, "total cost", false, warnings),
        });
    }
    let total_corner_count: i64 = corners.iter().map(|corner| corner.quantity).sum();
    FlangeAccessories {
        corners,
        total_corner_count,
    }
}
