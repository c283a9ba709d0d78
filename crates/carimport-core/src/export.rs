//! # Export
//!
//! Renders the inventory as a CSV table or a JSON backup. Writing the
//! result to a file or triggering a download is the caller's job.
//!
//! ## CSV Layout
//! ```text
//! "Chassis No","Make","Model","Year","Status","Total Cost (BDT)","Selling Price (BDT)","Profit/Loss"
//! "NZE161-1001","Toyota","Axio","2018","sold","613000","650000","37000"
//! "GP5-2002","Honda","Fit","2017","at-port","540000","",""
//! ```
//!
//! Every field is double-quoted with embedded quotes doubled. Rows are
//! joined by `\n` with no trailing newline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{CarRecord, Settings};

/// CSV header row, in column order.
pub const CSV_HEADERS: [&str; 8] = [
    "Chassis No",
    "Make",
    "Model",
    "Year",
    "Status",
    "Total Cost (BDT)",
    "Selling Price (BDT)",
    "Profit/Loss",
];

// =============================================================================
// CSV
// =============================================================================

/// Renders records as CSV, one row per record in the given order.
///
/// ```rust
/// use carimport_core::export::to_csv;
///
/// let csv = to_csv(&[]);
/// assert!(csv.starts_with("\"Chassis No\",\"Make\""));
/// assert_eq!(csv.lines().count(), 1);
/// ```
pub fn to_csv(records: &[CarRecord]) -> String {
    let header = csv_row(CSV_HEADERS.iter().map(|h| h.to_string()));
    std::iter::once(header)
        .chain(records.iter().map(|record| csv_row(record_fields(record))))
        .collect::<Vec<_>>()
        .join("\n")
}

fn record_fields(record: &CarRecord) -> [String; 8] {
    let info = &record.basic_info;
    [
        info.chassis_number.clone(),
        info.make.clone(),
        info.model.clone(),
        info.year.to_string(),
        record.status.to_string(),
        record.total_cost.units().to_string(),
        record.listed_price().map(format_amount).unwrap_or_default(),
        record.profit_loss().map(format_amount).unwrap_or_default(),
    ]
}

fn csv_row<I>(fields: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fields
        .into_iter()
        .map(|field| quote(&field))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Whole amounts print without a fraction (`650000`, not `650000.0`).
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}

/// `car-inventory-2024-03-01.csv`
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("car-inventory-{}.csv", date.format("%Y-%m-%d"))
}

// =============================================================================
// Backup
// =============================================================================

/// Full snapshot for download. There is no restore path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Backup {
    pub cars: Vec<CarRecord>,
    pub settings: Settings,
    #[ts(as = "String")]
    pub backup_date: DateTime<Utc>,
}

impl Backup {
    /// Snapshot of `records` and `settings` taken now.
    pub fn new(records: &[CarRecord], settings: &Settings) -> Self {
        Self::taken_at(records, settings, Utc::now())
    }

    pub fn taken_at(records: &[CarRecord], settings: &Settings, at: DateTime<Utc>) -> Self {
        Backup {
            cars: records.to_vec(),
            settings: *settings,
            backup_date: at,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// File name for this backup's date.
    pub fn file_name(&self) -> String {
        backup_file_name(self.backup_date.date_naive())
    }
}

/// `car-import-backup-2024-03-01.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("car-import-backup-{}.json", date.format("%Y-%m-%d"))
}

// =============================================================================
// Unit Tests
// =============================================================================
