use crate::error::{DashboardError, Result};
use crate::models::StudentRecord;
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const REPORT_PREFIX: &str = "Student_Report_";

pub const HEADERS: [&str; 11] = [
    "Student ID",
    "Name",
    "Class",
    "Section",
    "Gender",
    "Year",
    "Attendance %",
    "Percentage",
    "Fees Paid",
    "Fees Pending",
    "Fee Status",
];

/// `Student_Report_10-15-2026.csv` for 15 October 2026.
pub fn report_file_name(date: NaiveDate) -> String {
    let local = date.format("%-m/%-d/%Y").to_string();
    format!("{}{}.csv", REPORT_PREFIX, local.replace('/', "-"))
}

fn record_fields(r: &StudentRecord) -> [String; 11] {
    [
        r.id.clone(),
        r.name.clone(),
        r.class.to_string(),
        r.section.to_string(),
        r.gender.to_string(),
        r.year.to_string(),
        r.attendance.to_string(),
        r.percentage.to_string(),
        r.fees_paid.to_string(),
        r.fees_pending.to_string(),
        r.fee_status.to_string(),
    ]
}

/// Header plus one line per record. Fields are written unquoted; none of the
/// generated values contain a comma.
///
/// Every line, the last one included, ends in `\n`, so the output is the
/// newline-joined lines plus one final newline.
pub fn write_csv<W: Write>(writer: W, records: &[StudentRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(DashboardError::EmptyExport);
    }

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADERS)?;
    for record in records {
        wtr.write_record(record_fields(record))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[StudentRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the report into `dir`. Nothing is created when `records` is empty.
pub fn write_report(dir: &Path, records: &[StudentRecord], date: NaiveDate) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(DashboardError::EmptyExport);
    }

    let path = dir.join(report_file_name(date));
    let file = File::create(&path)?;
    write_csv(file, records)?;
    info!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}
