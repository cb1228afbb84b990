use std::sync::{Arc, Mutex};

use chartwatch::workflows::expiry::notify::{DeliveryError, EmailMessage, NotificationGateway};
use chartwatch::workflows::expiry::{ExpiryRuleTable, ExpirySweep, SweepOutcome};
use chartwatch::workflows::roster::PatientRoster;
use chrono::NaiveDate;
use std::io::Cursor;

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("notifier mutex").clone()
    }
}

impl NotificationGateway for RecordingNotifier {
    fn send(&self, message: EmailMessage) -> Result<(), DeliveryError> {
        self.sent.lock().expect("notifier mutex").push(message);
        Ok(())
    }
}

struct FailingNotifier;

impl NotificationGateway for FailingNotifier {
    fn send(&self, _message: EmailMessage) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("smtp relay refused".to_string()))
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

fn sweep_with(notifier: Arc<RecordingNotifier>) -> ExpirySweep<RecordingNotifier> {
    ExpirySweep::new(
        ExpiryRuleTable::standard(),
        notifier,
        "records@example.org".to_string(),
    )
}

#[test]
fn empty_report_suppresses_notification_entirely() {
    let csv = "Name,Contact,Physical\nAlice,555-0100,missing\nBob,,\n";
    let rows = PatientRoster::from_reader(Cursor::new(csv)).expect("roster parses");

    let notifier = Arc::new(RecordingNotifier::default());
    let sweep = sweep_with(notifier.clone());

    let outcome = sweep.run(&rows, today()).expect("sweep runs");
    assert_eq!(outcome, SweepOutcome::NothingToReport);
    assert!(notifier.sent().is_empty(), "no message may leave the pipeline");
}

#[test]
fn findings_produce_one_message_to_the_configured_recipient() {
    let csv = "\
Name,Contact,Physical,PCP Form,MDS,ISP,PA,TB,Dental,Vision,LOC
Alice Jones,555-0100,2023-01-01,,,,2025-06-01,,,,
";
    let rows = PatientRoster::from_reader(Cursor::new(csv)).expect("roster parses");

    let notifier = Arc::new(RecordingNotifier::default());
    let sweep = sweep_with(notifier.clone());

    let outcome = sweep.run(&rows, today()).expect("sweep runs");
    assert_eq!(
        outcome,
        SweepOutcome::Delivered {
            total_reported: 2,
            total_expired: 1,
            total_expiring_soon: 1,
        }
    );

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1, "single grouped summary per run");
    let message = &sent[0];
    assert_eq!(message.recipient, "records@example.org");
    assert_eq!(
        message.subject,
        "Patient Document Expiration Summary - 06/01/2025"
    );

    assert!(message.html_body.contains("Annual Physical"));
    assert!(message.html_body.contains("Expired on 01/01/2024"));
    assert!(message.html_body.contains("Prior Authorization"));
    assert!(message.html_body.contains("Expires on 06/01/2025 (0 days)"));
    assert!(message.html_body.contains("contact: 555-0100"));
    assert!(
        !message.html_body.contains("MDS Assessment"),
        "kinds with no findings are omitted"
    );
}

#[test]
fn transport_failures_surface_without_retry() {
    let csv = "\
Name,Contact,Physical,PCP Form,MDS,ISP,PA,TB,Dental,Vision,LOC
Alice Jones,555-0100,2023-01-01,,,,,,,,
";
    let rows = PatientRoster::from_reader(Cursor::new(csv)).expect("roster parses");

    let sweep = ExpirySweep::new(
        ExpiryRuleTable::standard(),
        Arc::new(FailingNotifier),
        "records@example.org".to_string(),
    );

    let error = sweep.run(&rows, today()).expect_err("delivery fails");
    assert!(matches!(error, DeliveryError::Transport(_)));
}

#[test]
fn malformed_cells_do_not_block_delivery_of_valid_findings() {
    let csv = "\
Name,Contact,Physical,PCP Form,MDS,ISP,PA,TB,Dental,Vision,LOC
Garbled Row,555-0110,02-30-banana,,,,,,,,
Valid Row,555-0111,2023-01-01,,,,,,,,
";
    let rows = PatientRoster::from_reader(Cursor::new(csv)).expect("roster parses");

    let notifier = Arc::new(RecordingNotifier::default());
    let sweep = sweep_with(notifier.clone());

    let outcome = sweep.run(&rows, today()).expect("sweep runs");
    assert_eq!(
        outcome,
        SweepOutcome::Delivered {
            total_reported: 1,
            total_expired: 1,
            total_expiring_soon: 0,
        }
    );
    assert!(notifier.sent()[0].html_body.contains("Valid Row"));
}
