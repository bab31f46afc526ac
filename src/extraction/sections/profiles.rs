//! U/F profile consumption, one block per profile.
//!
//! Consumption and remnant are reported as read; whether they add up to the issued
//! stock is left to the consumer of the record.
use crate::extraction::anchor::locate_in;
use crate::extraction::anchor::MatchMode;
use crate::extraction::block::partition;
use crate::extraction::block::Block;
use crate::extraction::offset::read;
use crate::extraction::offset::read_optional;
use crate::extraction::outcome::Extracted;
use crate::extraction::sections::MM_PER_M;
use crate::record::ProfileUsage;
use crate::spreadsheet::Sheet;

const PROFILE_TYPE: &str = "PROFILE TYPE";
const TOTAL_LENGTH: &str = "TOTAL LENGTH (mm)";
const REMAINING: &str = "REMAINING (mm)";
const BARS_USED: &str = "BARS USED";

pub fn extract(sheet: &Sheet) -> Extracted<Vec<ProfileUsage>> {
    let blocks = partition(sheet, PROFILE_TYPE, MatchMode::CaseInsensitive);
    if blocks.is_empty() {
        return Extracted::new(
            Vec::new(),
            vec![format!("{}: no '{PROFILE_TYPE}' block found", sheet.name())],
        );
    }

    let mut warnings = Vec::new();
    let profiles: Vec<ProfileUsage> = blocks
        .iter()
        .map(|block| read_block(sheet, block, &mut warnings))
        .collect();
    Extracted::new(profiles, warnings)
}

/// Reads one profile block. Warnings name the block so incomplete profiles can be told apart.
fn read_block(sheet: &Sheet, block: &Block, warnings: &mut Vec<String>) -> ProfileUsage {
    let found = |label: &str| locate_in(sheet, label, MatchMode::CaseInsensitive, block.extent.clone());
    let mut block_warnings = Vec::new();

    let profile_type = read::<String>(sheet, &block.anchor(), 1, 0, &mut block_warnings).unwrap_or_default();
    let total_length_m = read::<f64>(sheet, &found(TOTAL_LENGTH), 0, 1, &mut block_warnings)
        .map(|length| length / MM_PER_M)
        .unwrap_or(0.0);
    let remaining_m = read_optional::<f64>(sheet, &found(REMAINING), 0, 1, &mut block_warnings)
        .map(|length| length / MM_PER_M);
    let bar_count = read_optional::<i64>(sheet, &found(BARS_USED), 0, 1, &mut block_warnings);

    let scope = if profile_type.is_empty() {
        format!("block at {}", block.header.reference())
    } else {
        format!("block '{profile_type}' at {}", block.header.reference())
    };
    warnings.extend(block_warnings.into_iter().map(|warning| format!("{warning} ({scope})")));

    ProfileUsage {
        profile_type,
        total_length_m,
        remaining_m,
        bar_count,
    }
}
