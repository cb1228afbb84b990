use super::domain::{DocumentRecord, ExpiryStanding, InvalidDateError, SentinelValue};
use super::report::ExpiryReport;
use super::rules::ExpiryRuleTable;
use crate::workflows::roster::RosterRow;
use chrono::{DateTime, NaiveDate};
use tracing::warn;

/// Runs the full classification pass: every (row, rule) pair with a present
/// date value becomes at most one reportable record. A malformed cell never
/// aborts the run; the pair is skipped and kept as a diagnostic.
pub fn classify(rows: &[RosterRow], rules: &ExpiryRuleTable, today: NaiveDate) -> ExpiryReport {
    let mut report = ExpiryReport::default();

    for row in rows {
        let patient_name = row.cell(rules.name_column()).unwrap_or_default();
        let contact = row.cell(rules.contact_column()).unwrap_or_default();

        for rule in rules.rules() {
            let Some(raw_value) = row.cell(rule.column) else {
                continue;
            };
            if SentinelValue::from_cell(raw_value).is_some() {
                continue;
            }

            let Some(recorded_date) = parse_cell_date(raw_value) else {
                let skipped = InvalidDateError {
                    patient_name: patient_name.to_string(),
                    kind: rule.kind,
                    raw_value: raw_value.to_string(),
                };
                warn!(
                    patient = %skipped.patient_name,
                    kind = ?skipped.kind,
                    value = %skipped.raw_value,
                    "skipping unreadable date cell"
                );
                report.invalid_cells.push(skipped);
                continue;
            };

            let expiry_date = rule.policy.resolve(recorded_date);
            let days_remaining = (expiry_date - today).num_days();
            let Some(standing) = ExpiryStanding::from_days_remaining(days_remaining) else {
                continue;
            };

            let record = DocumentRecord {
                patient_name: patient_name.to_string(),
                contact: contact.to_string(),
                kind: rule.kind,
                recorded_date,
                expiry_date,
                days_remaining,
            };

            report.push(rule.kind, standing, record);
        }
    }

    report
}

/// Accepts the date shapes roster exports actually contain: ISO dates,
/// US-style dates, and full RFC 3339 timestamps (time-of-day discarded).
pub(crate) fn parse_cell_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%m/%d/%Y") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    None
}
