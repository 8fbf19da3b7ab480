//! Row and detail view-models for the student listing.
//!
//! These are plain data: the terminal table, the text reports and the tests
//! all consume the same structures.

use crate::formatters::format_currency;
use crate::models::{FeeStatus, StudentRecord};
use serde::Serialize;

/// The listing never shows more than this many rows; there is no paging.
pub const TABLE_ROW_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBadge {
    pub text: String,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id_label: String,
    pub name: String,
    pub class_section: String,
    pub attendance: String,
    /// Percentage scaled to a 500-mark total.
    pub score: String,
    pub result: ResultBadge,
    pub fee_status: FeeStatus,
    /// Record id the row's "view" action opens.
    pub action_id: String,
}

impl TableRow {
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            id_label: format!("#{}", record.id),
            name: record.name.clone(),
            class_section: record.class_section(),
            attendance: format!("{}%", record.attendance),
            score: format!("{}/500", record.percentage * 5),
            result: ResultBadge {
                text: format!("{}%", record.percentage),
                passed: record.is_pass(),
            },
            fee_status: record.fee_status,
            action_id: record.id.clone(),
        }
    }
}

pub fn table_rows<'a, I>(records: I) -> Vec<TableRow>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    records
        .into_iter()
        .take(TABLE_ROW_LIMIT)
        .map(TableRow::from_record)
        .collect()
}

/// Case-insensitive substring match on the name, in input order.
pub fn search_by_name<'a>(records: &'a [StudentRecord], term: &str) -> Vec<&'a StudentRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub id: String,
    pub fields: Vec<DetailField>,
}

impl DetailView {
    pub fn from_record(s: &StudentRecord) -> Self {
        let field = |label, value: String| DetailField { label, value };
        Self {
            id: s.id.clone(),
            fields: vec![
                field("Full Name", s.name.clone()),
                field("Class/Section", format!("{} - {}", s.class, s.section)),
                field("Gender", s.gender.to_string()),
                field("Academic Year", s.year.to_string()),
                field("Attendance", format!("{}%", s.attendance)),
                field("Overall Grade", format!("{}%", s.percentage)),
                field("Status", if s.is_pass() { "Pass" } else { "Fail" }.to_string()),
                field("Fees Paid", format_currency(s.fees_paid)),
                field("Fees Pending", format_currency(s.fees_pending)),
            ],
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// Looks `id` up among `records`; `None` when nothing matches.
pub fn detail_view(records: &[StudentRecord], id: &str) -> Option<DetailView> {
    records
        .iter()
        .find(|r| r.id == id)
        .map(DetailView::from_record)
}
