//! Finished goods: the header-delimited delivery order table.
use crate::extraction::anchor::locate;
use crate::extraction::anchor::AnchorMatch;
use crate::extraction::anchor::MatchMode;
use crate::extraction::outcome::Extracted;
use crate::extraction::sections::read_column;
use crate::extraction::sections::MM_PER_M;
use crate::record::DeliveryOrderItem;
use crate::spreadsheet::Sheet;

const LINE_ID: &str = "LINE ID";

/// Columns recognised in the header row.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Column {
    LineId,
    Description,
    Quantity,
    Area,
    /// Divisor converting the column's unit to metres
    Length(f64),
    Geometry,
}

impl Column {
    fn classify(header: &str) -> Option<Self> {
        let header = header.to_lowercase();
        match header.as_str() {
            "line id" => Some(Column::LineId),
            "description" => Some(Column::Description),
            "geometry" => Some(Column::Geometry),
            _ if header.starts_with("qty") || header.starts_with("quantity") => Some(Column::Quantity),
            _ if header.starts_with("area") => Some(Column::Area),
            _ if header.starts_with("length") => {
                let divisor = if header.contains("(mm)") { MM_PER_M } else { 1.0 };
                Some(Column::Length(divisor))
            }
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Column::LineId => "LINE ID",
            Column::Description => "DESCRIPTION",
            Column::Quantity => "QTY",
            Column::Area => "AREA (m2)",
            Column::Length(_) => "LENGTH",
            Column::Geometry => "GEOMETRY",
        }
    }
}

/// Column positions found in the header row; the first occurrence of each wins.
#[derive(Debug, Default)]
struct Layout {
    line_id: usize,
    description: Option<usize>,
    quantity: Option<usize>,
    area: Option<usize>,
    length: Option<(usize, f64)>,
    geometry: Option<usize>,
}

impl Layout {
    fn from_header(sheet: &Sheet, header_row: usize, line_id: usize) -> Self {
        let mut layout = Layout {
            line_id,
            ..Default::default()
        };
        for cell in sheet.row(header_row) {
            let Some(column) = cell.label().and_then(|label| Column::classify(&label)) else {
                continue;
            };
            match column {
                Column::LineId => (),
                Column::Description => layout.description = layout.description.or(Some(cell.col)),
                Column::Quantity => layout.quantity = layout.quantity.or(Some(cell.col)),
                Column::Area => layout.area = layout.area.or(Some(cell.col)),
                Column::Length(divisor) => layout.length = layout.length.or(Some((cell.col, divisor))),
                Column::Geometry => layout.geometry = layout.geometry.or(Some(cell.col)),
            }
        }
        layout
    }
}

/// Reads every populated line identifier below the header. Rows without one are dropped.
pub fn extract(sheet: &Sheet) -> Extracted<Vec<DeliveryOrderItem>> {
    let header = match locate(sheet, LINE_ID, MatchMode::CaseInsensitive) {
        AnchorMatch::Found(header) => header,
        AnchorMatch::Missing(label) => {
            return Extracted::new(Vec::new(), vec![format!("{}: label '{label}' not found", sheet.name())]);
        }
    };

    let mut warnings = Vec::new();
    let layout = Layout::from_header(sheet, header.row, header.col);
    for (position, column) in [(layout.quantity, Column::Quantity), (layout.area, Column::Area)] {
        if position.is_none() {
            warnings.push(format!("{}: column '{}' not found", sheet.name(), column.name()));
        }
    }

    let last_header_row = header.row + header.row_span - 1;
    let mut items = Vec::new();
    for row in sheet.column_below(layout.line_id, last_header_row).map(|cell| cell.row) {
        let line_id = read_column::<String>(sheet, row, layout.line_id, Column::LineId.name(), false, &mut warnings);
        let Some(line_id) = line_id else {
            continue;
        };
        let mut text = |col: Option<usize>, column: Column| {
            col.and_then(|col| read_column::<String>(sheet, row, col, column.name(), false, &mut warnings))
        };
        let description = text(layout.description, Column::Description);
        let geometry = text(layout.geometry, Column::Geometry);

        let qty_produced = layout
            .quantity
            .and_then(|col| read_column::<i64>(sheet, row, col, Column::Quantity.name(), true, &mut warnings))
            .unwrap_or(0);
        let area_m2 = layout
            .area
            .and_then(|col| read_column::<f64>(sheet, row, col, Column::Area.name(), true, &mut warnings))
            .unwrap_or(0.0);
        let length_m = layout.length.and_then(|(col, divisor)| {
            read_column::<f64>(sheet, row, col, Column::Length(divisor).name(), false, &mut warnings)
                .map(|length| length / divisor)
        });

        items.push(DeliveryOrderItem {
            line_id,
            description,
            qty_produced,
            area_m2,
            length_m,
            geometry,
        });
    }
    Extracted::new(items, warnings)
}
