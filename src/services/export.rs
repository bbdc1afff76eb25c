//! Spreadsheet export of visits

use rust_decimal::{prelude::ToPrimitive, Decimal};
use rust_xlsxwriter::{Format, Workbook};

use crate::{error::AppResult, models::visit::Visit};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Visits";

pub const HEADERS: [&str; 17] = [
    "Date",
    "Client Name",
    "Contact",
    "Age",
    "Gender",
    "Artist",
    "Service Type",
    "Services",
    "Start Time",
    "End Time",
    "Subtotal",
    "Discount %",
    "Discount Amount",
    "Final Total",
    "Payment Status",
    "Payment ID",
    "Filled By",
];

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        value.to_f64().map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

fn text(value: &Option<String>) -> Cell {
    value.clone().map(Cell::Text).unwrap_or(Cell::Empty)
}

/// `Haircut (500), Facial (1500)`
pub fn join_services(visit: &Visit) -> String {
    visit
        .services
        .iter()
        .map(|s| format!("{} ({})", s.name, s.price.normalize()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flatten a visit into one row, in `HEADERS` order
pub fn visit_row(visit: &Visit) -> Vec<Cell> {
    vec![
        Cell::Text(visit.visit_date.format("%Y-%m-%d").to_string()),
        Cell::Text(visit.client_name.clone()),
        Cell::Text(visit.contact.clone()),
        visit.age.map(|a| Cell::Number(f64::from(a))).unwrap_or(Cell::Empty),
        text(&visit.gender),
        Cell::Text(visit.artist.clone()),
        text(&visit.service_type),
        Cell::Text(join_services(visit)),
        Cell::Text(visit.start_time.clone()),
        Cell::Text(visit.end_time.clone()),
        visit.subtotal.into(),
        visit.discount_percent.into(),
        visit.discount_amount.into(),
        visit.final_total.into(),
        Cell::Text(visit.payment_status.to_string()),
        text(&visit.payment_id),
        text(&visit.filled_by),
    ]
}

/// Header row followed by one row per visit
pub fn sheet_rows(visits: &[Visit]) -> Vec<Vec<Cell>> {
    let header: Vec<Cell> = HEADERS.iter().map(|h| Cell::Text(h.to_string())).collect();
    std::iter::once(header)
        .chain(visits.iter().map(visit_row))
        .collect()
}

/// Build an xlsx workbook: bold header row, one row per visit, autofit columns
pub fn visits_workbook(visits: &[Visit]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (row, cells) in sheet_rows(visits).into_iter().enumerate() {
        let row = row as u32;
        for (col, cell) in cells.into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(value) if row == 0 => {
                    worksheet.write_string_with_format(row, col, value, &header_format)?;
                }
                Cell::Text(value) => {
                    worksheet.write_string(row, col, value)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number(row, col, value)?;
                }
                Cell::Empty => {}
            }
        }
    }

    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

/// `visits_2024-05-01_2024-05-31.xlsx`
pub fn export_filename(from: chrono::NaiveDate, to: chrono::NaiveDate) -> String {
    format!("visits_{}_{}.xlsx", from.format("%Y-%m-%d"), to.format("%Y-%m-%d"))
}
