//! Machine telemetry: cutting and travel metrics reported by the nesting machine.
use crate::extraction::anchor::locate;
use crate::extraction::anchor::MatchMode;
use crate::extraction::offset::read;
use crate::extraction::offset::read_optional;
use crate::extraction::outcome::Extracted;
use crate::extraction::sections::MM_PER_M;
use crate::record::MachineTelemetry;
use crate::spreadsheet::Sheet;

const CUT_LENGTH: &str = "CUT LENGTH (mm)";
const TRAVEL_DISTANCE: &str = "TRAVEL DISTANCE (mm)";
const MACHINING_TIME: &str = "MACHINING TIME (min)";

pub fn extract(sheet: &Sheet) -> Extracted<MachineTelemetry> {
    let mut warnings = Vec::new();
    let found = |label: &str| locate(sheet, label, MatchMode::CaseInsensitive);

    let cut_length_m = read::<f64>(sheet, &found(CUT_LENGTH), 0, 1, &mut warnings).map(|length| length / MM_PER_M);
    let travel_distance_m =
        read::<f64>(sheet, &found(TRAVEL_DISTANCE), 0, 1, &mut warnings).map(|distance| distance / MM_PER_M);
    let machining_time_min = read_optional::<f64>(sheet, &found(MACHINING_TIME), 0, 1, &mut warnings);

    Extracted::new(
        MachineTelemetry {
            cut_length_m,
            travel_distance_m,
            machining_time_min,
        },
        warnings,
    )
}
