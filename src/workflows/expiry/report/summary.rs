use super::super::domain::{
    DocumentKind, DocumentRecord, ExpiryStanding, InvalidDateError, EXPIRING_SOON_WINDOW_DAYS,
};
use super::super::rules::ExpiryRuleTable;
use super::views::{format_date, DocumentRecordView, ExpirySummary, KindSectionView};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Expired and expiring-soon records for one document kind, each list in
/// row-encounter order.
#[derive(Debug, Default, Clone)]
pub struct KindBucket {
    pub expired: Vec<DocumentRecord>,
    pub expiring_soon: Vec<DocumentRecord>,
}

/// One run's classification outcome. Built fresh per sweep; nothing is
/// retained between runs.
#[derive(Debug, Default)]
pub struct ExpiryReport {
    pub sections: HashMap<DocumentKind, KindBucket>,
    pub total_expired: usize,
    pub total_expiring_soon: usize,
    pub invalid_cells: Vec<InvalidDateError>,
}

impl ExpiryReport {
    pub(crate) fn push(
        &mut self,
        kind: DocumentKind,
        standing: ExpiryStanding,
        record: DocumentRecord,
    ) {
        let bucket = self.sections.entry(kind).or_default();
        match standing {
            ExpiryStanding::Expired => {
                bucket.expired.push(record);
                self.total_expired += 1;
            }
            ExpiryStanding::ExpiringSoon => {
                bucket.expiring_soon.push(record);
                self.total_expiring_soon += 1;
            }
        }
    }

    pub fn total_reported(&self) -> usize {
        self.total_expired + self.total_expiring_soon
    }

    /// A run with nothing to report must not generate output downstream.
    pub fn is_empty(&self) -> bool {
        self.total_reported() == 0
    }

    /// Renders the recipient-facing summary. Kind order follows the rule
    /// table; kinds with no reportable records are omitted entirely.
    pub fn summary(&self, rules: &ExpiryRuleTable, today: NaiveDate) -> ExpirySummary {
        let sections = rules
            .rules()
            .iter()
            .filter_map(|rule| {
                self.sections.get(&rule.kind).and_then(|bucket| {
                    if bucket.expired.is_empty() && bucket.expiring_soon.is_empty() {
                        return None;
                    }
                    Some(KindSectionView {
                        kind: rule.kind,
                        kind_label: rule.kind.label(),
                        expired: bucket.expired.iter().map(DocumentRecord::to_view).collect(),
                        expiring_soon: bucket
                            .expiring_soon
                            .iter()
                            .map(DocumentRecord::to_view)
                            .collect(),
                    })
                })
            })
            .collect();

        ExpirySummary {
            title: "Patient Document Expiration Summary".to_string(),
            generated_on: format_date(today),
            window_days: EXPIRING_SOON_WINDOW_DAYS,
            total_reported: self.total_reported(),
            total_expired: self.total_expired,
            total_expiring_soon: self.total_expiring_soon,
            sections,
        }
    }
}

impl DocumentRecord {
    pub fn to_view(&self) -> DocumentRecordView {
        DocumentRecordView {
            patient_name: self.patient_name.clone(),
            contact: self.contact.clone(),
            recorded_date: format_date(self.recorded_date),
            expiry_date: format_date(self.expiry_date),
            days_remaining: self.days_remaining,
            standing: self.standing(),
            standing_label: self.standing().label(),
            status_line: self.status_line(),
        }
    }

    /// The exact phrasing recipients depend on.
    pub fn status_line(&self) -> String {
        if self.days_remaining < 0 {
            format!("Expired on {}", format_date(self.expiry_date))
        } else {
            format!(
                "Expires on {} ({} days)",
                format_date(self.expiry_date),
                self.days_remaining
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn record(name: &str, kind: DocumentKind, expiry: NaiveDate, days: i64) -> DocumentRecord {
        DocumentRecord {
            patient_name: name.to_string(),
            contact: String::new(),
            kind,
            recorded_date: expiry,
            expiry_date: expiry,
            days_remaining: days,
        }
    }

    #[test]
    fn status_line_uses_expired_phrasing_strictly_below_zero() {
        let expired = record("Alice", DocumentKind::Physical, date(2024, 1, 1), -1);
        assert_eq!(expired.status_line(), "Expired on 01/01/2024");

        let due_today = record("Alice", DocumentKind::Physical, date(2025, 6, 1), 0);
        assert_eq!(due_today.status_line(), "Expires on 06/01/2025 (0 days)");
    }

    #[test]
    fn summary_omits_kinds_with_no_reportable_records() {
        let rules = ExpiryRuleTable::standard();
        let mut report = ExpiryReport::default();
        report.push(
            DocumentKind::Mds,
            ExpiryStanding::Expired,
            record("Bea", DocumentKind::Mds, date(2025, 5, 1), -31),
        );

        let summary = report.summary(&rules, date(2025, 6, 1));
        assert_eq!(summary.sections.len(), 1);
        assert_eq!(summary.sections[0].kind, DocumentKind::Mds);
        assert_eq!(summary.total_reported, 1);
        assert_eq!(summary.total_expired, 1);
        assert_eq!(summary.total_expiring_soon, 0);
    }

    #[test]
    fn summary_section_order_follows_the_rule_table() {
        let rules = ExpiryRuleTable::standard();
        let mut report = ExpiryReport::default();
        report.push(
            DocumentKind::LevelOfCare,
            ExpiryStanding::ExpiringSoon,
            record("Cy", DocumentKind::LevelOfCare, date(2025, 6, 10), 9),
        );
        report.push(
            DocumentKind::Physical,
            ExpiryStanding::ExpiringSoon,
            record("Cy", DocumentKind::Physical, date(2025, 6, 12), 11),
        );

        let summary = report.summary(&rules, date(2025, 6, 1));
        let kinds: Vec<DocumentKind> = summary.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![DocumentKind::Physical, DocumentKind::LevelOfCare]);
    }
}
