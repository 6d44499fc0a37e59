//! CSV import of appliance readings
//!
//! Expected layout, one appliance reading per row:
//!
//! ```text
//! Date,Appliance,kWh,Total kWh
//! 1/15/2024,Air Conditioner,6.2,14.8
//! 1/15/2024,Refrigerator,1.9,0
//! ```
//!
//! Header names are matched case-insensitively and `Total kWh` is optional.
//! Rows are grouped into one `DailyRecord` per date, in first-seen order.

use crate::core::{record_date, DailyRecord, Error, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Outcome of an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported_rows: usize,
    pub skipped_rows: usize,
    pub days: usize,
}

struct Columns {
    date: usize,
    appliance: usize,
    quantity: usize,
    total: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                Error::Validation(format!("CSV is missing the `{}` column", name))
            })
        };

        Ok(Self {
            date: require("Date")?,
            appliance: require("Appliance")?,
            quantity: require("kWh")?,
            total: find("Total kWh"),
        })
    }
}

/// Parse a CSV file from disk
pub fn import_csv_file(path: &Path) -> Result<(Vec<DailyRecord>, ImportReport)> {
    let file = std::fs::File::open(path)?;
    import_csv(file)
}

/// Parse appliance readings into daily records
pub fn import_csv<R: Read>(reader: R) -> Result<(Vec<DailyRecord>, ImportReport)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::locate(&headers)?;
    log::debug!("CSV headers: {:?}", headers);

    let mut days: IndexMap<NaiveDate, DailyRecord> = IndexMap::new();
    let mut total_rows = 0usize;
    let mut skipped_rows = 0usize;

    for result in rdr.records() {
        total_rows += 1;
        // Header is line 1
        let line = total_rows + 1;

        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("Line {}: unreadable row: {}", line, e);
                skipped_rows += 1;
                continue;
            }
        };

        if row.len() != headers.len() {
            log::warn!("Line {} has {} values, expected {}", line, row.len(), headers.len());
            skipped_rows += 1;
            continue;
        }

        let Some(date) = leading_date(&row[columns.date]) else {
            log::warn!("Line {}: invalid date {:?}", line, &row[columns.date]);
            skipped_rows += 1;
            continue;
        };

        let quantity = parse_quantity(&row[columns.quantity]);
        let total = match columns.total {
            Some(index) => parse_quantity(&row[index]),
            None => Some(0.0),
        };
        let (Some(quantity), Some(total)) = (quantity, total) else {
            log::warn!("Line {}: quantities must be non-negative numbers", line);
            skipped_rows += 1;
            continue;
        };

        // First row of a day sets the total, later rows add to it
        let record = days
            .entry(date)
            .or_insert_with(|| DailyRecord::new(date, 0.0));
        record.total_quantity += total;

        let category = category_key(&row[columns.appliance]);
        if !category.is_empty() {
            *record.category_breakdown.entry(category).or_insert(0.0) += quantity;
        }
    }

    let records: Vec<DailyRecord> = days.into_values().collect();
    let report = ImportReport {
        total_rows,
        imported_rows: total_rows - skipped_rows,
        skipped_rows,
        days: records.len(),
    };

    log::info!(
        "Parsed {} rows into {} days ({} skipped)",
        report.imported_rows,
        report.days,
        report.skipped_rows
    );

    Ok((records, report))
}

/// Date at the start of a cell, ignoring any trailing time ("1/5/2024 0:00")
fn leading_date(cell: &str) -> Option<NaiveDate> {
    record_date::parse(cell.split_whitespace().next()?)
}

/// Empty cells count as zero; anything else must be a non-negative number
fn parse_quantity(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(0.0);
    }
    cell.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// "Air Conditioner" -> "airConditioner", "Refrigerator" -> "refrigerator"
///
/// Trailing zeros are dropped first ("Fan00" -> "fan"), matching how exported
/// sheets pad appliance names.
fn category_key(name: &str) -> String {
    let name = name.trim_end_matches('0');
    let mut key = String::with_capacity(name.len());
    for (i, word) in name.split_whitespace().enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                key.extend(first.to_lowercase());
            } else {
                key.extend(first.to_uppercase());
            }
            key.push_str(chars.as_str());
        }
    }
    key
}
