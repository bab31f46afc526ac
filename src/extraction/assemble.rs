//! Merges section outputs into the final record, rounds numeric leaves once and
//! classifies the result.
use crate::config::Precision;
use crate::extraction::outcome::Extracted;
use crate::extraction::sections::consumables::ConsumablesSection;
use crate::extraction::sections::identity::IdentitySection;
use crate::record::Consumables;
use crate::record::CornerAccessory;
use crate::record::DeliveryOrderItem;
use crate::record::ErrorKind;
use crate::record::ExtractionResult;
use crate::record::ExtractionStatus;
use crate::record::FlangeAccessories;
use crate::record::InventoryImpact;
use crate::record::MachineTelemetry;
use crate::record::MetaData;
use crate::record::NestingExecutionRecord;
use crate::record::ProfileUsage;
use crate::record::Quantity;
use crate::record::RawMaterialPanel;

/// Outputs of the six section extractors for one workbook.
#[derive(Clone, Debug, Default)]
pub struct Sections {
    pub identity: Extracted<IdentitySection>,
    pub panel: Extracted<InventoryImpact>,
    pub profiles: Extracted<Vec<ProfileUsage>>,
    pub consumables: Extracted<ConsumablesSection>,
    pub telemetry: Extracted<MachineTelemetry>,
    pub delivery: Extracted<Vec<DeliveryOrderItem>>,
}

/// Rounds a value to `places` decimals. Negative zero becomes zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 || !rounded.is_finite() {
        0.0
    } else {
        rounded
    }
}

/// Applies the precision policy to every numeric leaf of a sub-record.
pub trait Round {
    fn round(self, precision: &Precision) -> Self;
}

impl Round for InventoryImpact {
    fn round(self, precision: &Precision) -> Self {
        let places = precision.dimensions;
        InventoryImpact {
            net_reusable_remnant_area_m2: round_to(self.net_reusable_remnant_area_m2, places),
            total_nesting_waste_m2: round_to(self.total_nesting_waste_m2, places),
            utilized_area_m2: self.utilized_area_m2.map(|area| round_to(area, places)),
            ..self
        }
    }
}

impl Round for RawMaterialPanel {
    fn round(self, precision: &Precision) -> Self {
        let places = precision.dimensions;
        RawMaterialPanel {
            thickness_mm: self.thickness_mm.map(|value| round_to(value, places)),
            sheet_length_m: self.sheet_length_m.map(|value| round_to(value, places)),
            sheet_width_m: self.sheet_width_m.map(|value| round_to(value, places)),
            inventory_impact: self.inventory_impact.round(precision),
            ..self
        }
    }
}

impl Round for ProfileUsage {
    fn round(self, precision: &Precision) -> Self {
        let places = precision.dimensions;
        ProfileUsage {
            total_length_m: round_to(self.total_length_m, places),
            remaining_m: self.remaining_m.map(|value| round_to(value, places)),
            ..self
        }
    }
}

impl Quantity {
    fn round_with(self, places: u32, precision: &Precision) -> Self {
        Quantity {
            quantity: round_to(self.quantity, places),
            extra_allowance_pct: self.extra_allowance_pct.map(|pct| round_to(pct, precision.dimensions)),
        }
    }
}

impl Round for Consumables {
    fn round(self, precision: &Precision) -> Self {
        Consumables {
            silicone_kg: self.silicone_kg.round_with(precision.weights, precision),
            aluminum_tape_m: self.aluminum_tape_m.round_with(precision.dimensions, precision),
            junction_glue_kg: self.junction_glue_kg.round_with(precision.weights, precision),
            flange_glue_kg: self.flange_glue_kg.round_with(precision.weights, precision),
        }
    }
}

impl Round for CornerAccessory {
    fn round(self, precision: &Precision) -> Self {
        let places = precision.dimensions;
        CornerAccessory {
            unit_cost: self.unit_cost.map(|cost| round_to(cost, places)),
            total_cost: self.total_cost.map(|cost| round_to(cost, places)),
            ..self
        }
    }
}

impl Round for FlangeAccessories {
    fn round(self, precision: &Precision) -> Self {
        FlangeAccessories {
            corners: self.corners.round(precision),
            ..self
        }
    }
}

impl Round for MachineTelemetry {
    fn round(self, precision: &Precision) -> Self {
        let places = precision.dimensions;
        MachineTelemetry {
            cut_length_m: self.cut_length_m.map(|value| round_to(value, places)),
            travel_distance_m: self.travel_distance_m.map(|value| round_to(value, places)),
            machining_time_min: self.machining_time_min.map(|value| round_to(value, places)),
        }
    }
}

impl Round for DeliveryOrderItem {
    fn round(self, precision: &Precision) -> Self {
        let places = precision.dimensions;
        DeliveryOrderItem {
            area_m2: round_to(self.area_m2, places),
            length_m: self.length_m.map(|value| round_to(value, places)),
            ..self
        }
    }
}

impl<T: Round> Round for Vec<T> {
    fn round(self, precision: &Precision) -> Self {
        self.into_iter().map(|item| item.round(precision)).collect()
    }
}

/// Builds the result from the section outputs.
///
/// Warnings are kept in section order. A missing project reference is the only
/// condition that withholds the record.
pub fn assemble(
    sections: Sections,
    precision: &Precision,
    source_sheet_count: usize,
    source_sha256: String,
    parser_version: String,
) -> ExtractionResult {
    let mut warnings = Vec::new();
    let identity = sections.identity.drain_into(&mut warnings);
    let inventory_impact = sections.panel.drain_into(&mut warnings);
    let profiles_and_flanges = sections.profiles.drain_into(&mut warnings);
    let consumables = sections.consumables.drain_into(&mut warnings);
    let machine_telemetry = sections.telemetry.drain_into(&mut warnings);
    let delivery_order_items = sections.delivery.drain_into(&mut warnings);

    let Some(project_ref_id) = identity.identity.project_ref_id else {
        log::info!("extraction failed: no project reference ({} warnings)", warnings.len());
        return ExtractionResult {
            status: ExtractionStatus::Error,
            record: None,
            warnings,
            error_message: Some(
                "Project reference not found: neither 'PROJECT REFERENCE' nor 'PROJECT NAME' holds a value".to_owned(),
            ),
            error_kind: Some(ErrorKind::MissingIdentity),
            source_sha256,
            parser_version,
        };
    };

    let record = NestingExecutionRecord {
        meta_data: MetaData {
            project_ref_id,
            project_name: identity.identity.project_name,
            validation_status: identity.identity.validation_status,
            report_date: identity.report_date,
            source_sheet_count,
        },
        raw_material_panel: RawMaterialPanel {
            material_spec_name: identity.material_spec_name,
            thickness_mm: identity.thickness_mm,
            sheet_length_m: identity.sheet_length_m,
            sheet_width_m: identity.sheet_width_m,
            inventory_impact,
        }
        .round(precision),
        profiles_and_flanges: profiles_and_flanges.round(precision),
        consumables: consumables.consumables.round(precision),
        flange_accessories: consumables.flange_accessories.round(precision),
        machine_telemetry: machine_telemetry.round(precision),
        delivery_order_items: delivery_order_items.round(precision),
    };

    let status = if warnings.is_empty() {
        ExtractionStatus::Success
    } else {
        ExtractionStatus::Partial
    };
    log::info!(
        "extraction of '{}' finished with status {:?} and {} warnings",
        record.meta_data.project_ref_id,
        status,
        warnings.len()
    );
    ExtractionResult {
        status,
        record: Some(record),
        warnings,
        error_message: None,
        error_kind: None,
        source_sha256,
        parser_version,
    }
}
