use chartwatch::workflows::expiry::domain::DocumentKind;
use chartwatch::workflows::expiry::{classify, ExpiryRuleTable};
use chartwatch::workflows::roster::{PatientRoster, RosterImportError};
use chrono::NaiveDate;
use std::io::Cursor;

const ROSTER_FIXTURE: &str = "\
Name,Contact,Physical,PCP Form,MDS,ISP,PA,TB,Dental,Vision,LOC
Alice Jones,555-0100,2023-01-01,2024-08-15,missing,2025-01-01,2025-06-01,2024-09-01,2025-02-10,2024-01-05,2025-08-20
Bob Okafor,,discharged,,,,,,,,
Cara Liu,555-0102,not-a-date,2025-03-01,2025-03-15,,,,,,
";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

#[test]
fn header_row_is_never_classified() {
    let rows = PatientRoster::from_reader(Cursor::new(ROSTER_FIXTURE)).expect("roster parses");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].cell(0), Some("Alice Jones"));
    assert!(rows
        .iter()
        .all(|row| row.cell(0) != Some("Name")), "header must not survive as a row");
}

#[test]
fn full_roster_feeds_the_classification_engine() {
    let rows = PatientRoster::from_reader(Cursor::new(ROSTER_FIXTURE)).expect("roster parses");
    let rules = ExpiryRuleTable::standard();
    let report = classify(&rows, &rules, today());

    // Alice: physical expired 01/01/2024; PA due today; the rest out of
    // window or sentinel.
    let physical = report
        .sections
        .get(&DocumentKind::Physical)
        .expect("physical bucket");
    assert_eq!(physical.expired.len(), 1);
    assert_eq!(physical.expired[0].patient_name, "Alice Jones");

    let pa = report
        .sections
        .get(&DocumentKind::PriorAuthorization)
        .expect("prior auth bucket");
    assert_eq!(pa.expiring_soon.len(), 1);
    assert_eq!(pa.expiring_soon[0].days_remaining, 0);

    // Bob is fully sentinel/blank and contributes nothing.
    assert!(report
        .sections
        .values()
        .flat_map(|bucket| bucket.expired.iter().chain(bucket.expiring_soon.iter()))
        .all(|record| record.patient_name != "Bob Okafor"));

    // Cara's malformed physical is skipped; her other entries still count.
    assert_eq!(report.invalid_cells.len(), 1);
    assert_eq!(report.invalid_cells[0].patient_name, "Cara Liu");
    let mds = report.sections.get(&DocumentKind::Mds).expect("mds bucket");
    assert!(mds
        .expiring_soon
        .iter()
        .any(|record| record.patient_name == "Cara Liu"));
}

#[test]
fn short_rows_read_missing_cells_as_absent() {
    let csv = "Name,Contact,Physical\nDana\n";
    let rows = PatientRoster::from_reader(Cursor::new(csv)).expect("roster parses");
    assert_eq!(rows[0].cell(0), Some("Dana"));
    assert_eq!(rows[0].cell(1), None);
    assert_eq!(rows[0].cell(2), None);

    let rules = ExpiryRuleTable::standard();
    let report = classify(&rows, &rules, today());
    assert!(report.is_empty());
}

#[test]
fn unreadable_files_surface_io_errors() {
    let error = PatientRoster::from_path("./nope/roster.csv").expect_err("io error expected");
    assert!(matches!(error, RosterImportError::Io(_)));
}
