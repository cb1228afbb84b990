use super::super::domain::{DocumentKind, ExpiryStanding};
use chrono::NaiveDate;
use serde::Serialize;

/// All recipient-facing dates render in this fixed format regardless of
/// locale.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecordView {
    pub patient_name: String,
    pub contact: String,
    pub recorded_date: String,
    pub expiry_date: String,
    pub days_remaining: i64,
    pub standing: ExpiryStanding,
    pub standing_label: &'static str,
    pub status_line: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct KindSectionView {
    pub kind: DocumentKind,
    pub kind_label: &'static str,
    pub expired: Vec<DocumentRecordView>,
    pub expiring_soon: Vec<DocumentRecordView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpirySummary {
    pub title: String,
    pub generated_on: String,
    pub window_days: i64,
    pub total_reported: usize,
    pub total_expired: usize,
    pub total_expiring_soon: usize,
    pub sections: Vec<KindSectionView>,
}
