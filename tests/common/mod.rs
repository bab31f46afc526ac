#![allow(dead_code)]

use rust_xlsxwriter::Format;
use rust_xlsxwriter::Workbook;
use rust_xlsxwriter::Worksheet;

/// A profile block as the nesting software prints it.
#[derive(Clone, Debug)]
pub struct ProfileBlock {
    pub name: &'static str,
    pub total_length_mm: f64,
    pub remaining_mm: Option<f64>,
    pub bars_used: Option<f64>,
}

/// Builds nesting workbook exports in memory.
///
/// `shift` inserts blank rows below each sheet's title, moving every label down.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub shift: u32,
    pub project_reference: Option<&'static str>,
    pub project_name: Option<&'static str>,
    /// Serial number written into the date-formatted `DATE` cell
    pub date_serial: f64,
    pub profiles: Vec<ProfileBlock>,
    pub silicone_kg: f64,
    pub machine_info: bool,
}

impl Default for Fixture {
    fn default() -> Self {
        Fixture {
            shift: 0,
            project_reference: Some("TAG-1001"),
            project_name: Some("Hospital Wing B"),
            date_serial: 45413.0,
            profiles: vec![
                ProfileBlock {
                    name: "U PROFILE",
                    total_length_mm: 45500.0,
                    remaining_mm: Some(1250.0),
                    bars_used: Some(12.0),
                },
                ProfileBlock {
                    name: "F PROFILE",
                    total_length_mm: 12000.0,
                    remaining_mm: Some(800.0),
                    bars_used: None,
                },
            ],
            silicone_kg: 0.853271,
            machine_info: true,
        }
    }
}

impl Fixture {
    pub fn shifted(shift: u32) -> Self {
        Fixture {
            shift,
            ..Default::default()
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let mut workbook = Workbook::new();
        self.write_summary(workbook.add_worksheet());
        self.write_profiles(workbook.add_worksheet());
        self.write_consumables(workbook.add_worksheet());
        if self.machine_info {
            self.write_machine_info(workbook.add_worksheet());
        }
        self.write_delivery_order(workbook.add_worksheet());
        workbook.save_to_buffer().unwrap()
    }

    fn write_summary(&self, sheet: &mut Worksheet) {
        sheet.set_name("Summary").unwrap();
        sheet.merge_range(0, 0, 0, 3, "NESTING REPORT", &Format::new()).unwrap();

        let top = self.shift + 2;
        sheet.write_string(top, 0, "PROJECT REFERENCE").unwrap();
        if let Some(reference) = self.project_reference {
            sheet.write_string(top, 1, reference).unwrap();
        }
        sheet.write_string(top + 1, 0, "PROJECT NAME").unwrap();
        if let Some(name) = self.project_name {
            sheet.write_string(top + 1, 1, name).unwrap();
        }
        sheet.write_string(top + 2, 0, "DATE").unwrap();
        let date = Format::new().set_num_format("dd/mm/yyyy");
        sheet.write_number_with_format(top + 2, 1, self.date_serial, &date).unwrap();
        sheet.write_string(top + 3, 0, "MATERIAL").unwrap();
        sheet.write_string(top + 3, 1, "PIR 20mm ALU/ALU").unwrap();
        sheet.write_string(top + 4, 0, "THICKNESS (mm)").unwrap();
        sheet.write_number(top + 4, 1, 20.5).unwrap();
        sheet.merge_range(top + 5, 0, top + 5, 1, "SHEET LENGTH (mm)", &Format::new()).unwrap();
        sheet.write_number(top + 5, 2, 4000.0).unwrap();
        sheet.write_string(top + 6, 0, "SHEET WIDTH (mm)").unwrap();
        sheet.write_string(top + 6, 1, "1,200 mm").unwrap();

        sheet.write_string(top + 8, 0, "PANEL CONSUMPTION").unwrap();
        sheet.write_string(top + 9, 0, "UTILIZED SHEETS").unwrap();
        sheet.write_number(top + 9, 1, 5.0).unwrap();
        sheet.write_string(top + 10, 0, "REUSABLE REMNANTS (m2)").unwrap();
        sheet.write_number(top + 10, 1, 3.456789).unwrap();
        sheet.write_string(top + 11, 0, "NESTING WASTE (m2)").unwrap();
        sheet.write_number(top + 11, 1, 1.2).unwrap();
        sheet.write_string(top + 12, 0, "UTILIZED AREA (m2)").unwrap();
        sheet.write_number(top + 12, 1, 24.0).unwrap();
    }

    fn write_profiles(&self, sheet: &mut Worksheet) {
        sheet.set_name("Profiles").unwrap();
        sheet.write_string(0, 0, "PROFILE CONSUMPTION").unwrap();
        for (index, profile) in self.profiles.iter().enumerate() {
            let top = self.shift + 2 + index as u32 * 6;
            sheet.write_string(top, 0, "PROFILE TYPE").unwrap();
            sheet.write_string(top + 1, 0, profile.name).unwrap();
            sheet.write_string(top + 2, 0, "TOTAL LENGTH (mm)").unwrap();
            sheet.write_number(top + 2, 1, profile.total_length_mm).unwrap();
            if let Some(remaining) = profile.remaining_mm {
                sheet.write_string(top + 3, 0, "REMAINING (mm)").unwrap();
                sheet.write_number(top + 3, 1, remaining).unwrap();
            }
            if let Some(bars) = profile.bars_used {
                sheet.write_string(top + 4, 0, "BARS USED").unwrap();
                sheet.write_number(top + 4, 1, bars).unwrap();
            }
        }
    }

    fn write_consumables(&self, sheet: &mut Worksheet) {
        sheet.set_name("Consumables").unwrap();
        sheet.write_string(0, 0, "CONSUMABLES").unwrap();
        let top = self.shift + 1;
        sheet.write_string(top, 0, "SILICONE (kg)").unwrap();
        sheet.write_number(top, 1, self.silicone_kg).unwrap();
        sheet.write_string(top, 2, "10 %").unwrap();
        sheet.write_string(top + 1, 0, "ALUMINUM TAPE (m)").unwrap();
        sheet.write_number(top + 1, 1, 125.5).unwrap();
        sheet.write_string(top + 2, 0, "JUNCTION GLUE (kg)").unwrap();
        sheet.write_number(top + 2, 1, 1.25).unwrap();
        sheet.write_string(top + 3, 0, "FLANGE GLUE (kg)").unwrap();
        sheet.write_number(top + 3, 1, 0.5).unwrap();
        sheet.write_number(top + 3, 2, 5.0).unwrap();

        let table = top + 5;
        for (col, title) in ["CORNER TYPE", "QTY", "UNIT COST", "TOTAL COST"].iter().enumerate() {
            sheet.write_string(table, col as u16, *title).unwrap();
        }
        for (offset, (corner, quantity, unit_cost)) in [("20 mm corner", 24.0, 0.35), ("30 mm corner", 8.0, 0.5)]
            .iter()
            .enumerate()
        {
            let row = table + 1 + offset as u32;
            sheet.write_string(row, 0, *corner).unwrap();
            sheet.write_number(row, 1, *quantity).unwrap();
            sheet.write_number(row, 2, *unit_cost).unwrap();
            sheet.write_number(row, 3, quantity * unit_cost).unwrap();
        }
        sheet.write_string(table + 4, 0, "TOTAL").unwrap();
        sheet.write_number(table + 4, 1, 32.0).unwrap();
    }

    fn write_machine_info(&self, sheet: &mut Worksheet) {
        sheet.set_name("Machine info").unwrap();
        sheet.write_string(0, 0, "MACHINE").unwrap();
        let top = self.shift + 1;
        sheet.write_string(top, 0, "CUT LENGTH (mm)").unwrap();
        sheet.write_number(top, 1, 182340.0).unwrap();
        sheet.write_string(top + 1, 0, "TRAVEL DISTANCE (mm)").unwrap();
        sheet.write_number(top + 1, 1, 90500.0).unwrap();
        sheet.write_string(top + 2, 0, "MACHINING TIME (min)").unwrap();
        sheet.write_number(top + 2, 1, 47.5).unwrap();
    }

    fn write_delivery_order(&self, sheet: &mut Worksheet) {
        sheet.set_name("Delivery order").unwrap();
        sheet.write_string(0, 0, "DELIVERY ORDER").unwrap();
        let header = self.shift + 1;
        for (col, title) in ["LINE ID", "DESCRIPTION", "QTY", "AREA (m2)", "LENGTH (mm)", "GEOMETRY"]
            .iter()
            .enumerate()
        {
            sheet.write_string(header, col as u16, *title).unwrap();
        }
        sheet.write_string(header + 1, 0, "1").unwrap();
        sheet.write_string(header + 1, 1, "Straight duct 600x400").unwrap();
        sheet.write_number(header + 1, 2, 12.0).unwrap();
        sheet.write_number(header + 1, 3, 18.456).unwrap();
        sheet.write_number(header + 1, 4, 1200.0).unwrap();
        sheet.write_string(header + 1, 5, "STRAIGHT").unwrap();

        sheet.write_string(header + 2, 1, "subtotal").unwrap();
        sheet.write_number(header + 2, 2, 12.0).unwrap();

        sheet.write_string(header + 3, 0, "2").unwrap();
        sheet.write_string(header + 3, 1, "Elbow 90").unwrap();
        sheet.write_number(header + 3, 2, 4.0).unwrap();
        sheet.write_number(header + 3, 3, 6.25).unwrap();
        sheet.write_string(header + 3, 5, "ELBOW").unwrap();
    }
}
