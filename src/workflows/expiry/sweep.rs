use chrono::NaiveDate;

use std::fmt::Write as _;
use std::sync::Arc;

use super::engine;
use super::notify::{DeliveryError, EmailMessage, NotificationGateway};
use super::report::views::{DocumentRecordView, ExpirySummary};
use super::rules::ExpiryRuleTable;
use crate::workflows::roster::RosterRow;
use tracing::info;

/// Terminal state of one weekly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    /// The summary was handed to the notification gateway.
    Delivered {
        total_reported: usize,
        total_expired: usize,
        total_expiring_soon: usize,
    },
    /// Both aggregate counters were zero; no notification was generated.
    NothingToReport,
}

/// Composes the classification engine, formatter, and notification gateway
/// into the weekly pipeline.
pub struct ExpirySweep<N> {
    rules: ExpiryRuleTable,
    notifier: Arc<N>,
    recipient: String,
}

impl<N> ExpirySweep<N>
where
    N: NotificationGateway,
{
    pub fn new(rules: ExpiryRuleTable, notifier: Arc<N>, recipient: String) -> Self {
        Self {
            rules,
            notifier,
            recipient,
        }
    }

    pub fn rules(&self) -> &ExpiryRuleTable {
        &self.rules
    }

    /// Classifies the roster snapshot and delivers the grouped summary. A
    /// run that finds nothing suppresses delivery entirely.
    pub fn run(&self, rows: &[RosterRow], today: NaiveDate) -> Result<SweepOutcome, DeliveryError> {
        let report = engine::classify(rows, &self.rules, today);

        if !report.invalid_cells.is_empty() {
            info!(
                skipped = report.invalid_cells.len(),
                "unreadable date cells skipped this run"
            );
        }

        if report.is_empty() {
            info!("no expired or expiring documents; notification suppressed");
            return Ok(SweepOutcome::NothingToReport);
        }

        let summary = report.summary(&self.rules, today);
        let message = EmailMessage {
            recipient: self.recipient.clone(),
            subject: format!("{} - {}", summary.title, summary.generated_on),
            html_body: render_summary_html(&summary),
        };
        self.notifier.send(message)?;

        info!(
            total = summary.total_reported,
            expired = summary.total_expired,
            expiring_soon = summary.total_expiring_soon,
            recipient = %self.recipient,
            "expiration summary delivered"
        );

        Ok(SweepOutcome::Delivered {
            total_reported: summary.total_reported,
            total_expired: summary.total_expired,
            total_expiring_soon: summary.total_expiring_soon,
        })
    }
}

pub fn render_summary_html(summary: &ExpirySummary) -> String {
    let mut html = String::new();
    writeln!(
        html,
        "<h1>{} &mdash; {}</h1>",
        escape_html(&summary.title),
        summary.generated_on
    )
    .expect("write title");

    html.push_str("<table border=\"1\" cellpadding=\"4\">");
    html.push_str("<tr><th>Documents needing attention</th><th>Expired</th><th>Expiring soon</th></tr>");
    writeln!(
        html,
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        summary.total_reported, summary.total_expired, summary.total_expiring_soon
    )
    .expect("write totals");
    html.push_str("</table>");

    for section in &summary.sections {
        writeln!(html, "<h2>{}</h2>", escape_html(section.kind_label)).expect("write section");
        html.push_str("<ul>");
        for record in section.expired.iter().chain(section.expiring_soon.iter()) {
            write_record_item(&mut html, record);
        }
        html.push_str("</ul>");
    }

    writeln!(
        html,
        "<p><em>Documents expiring within the next {} days are included. Generated {}.</em></p>",
        summary.window_days, summary.generated_on
    )
    .expect("write footer");

    html
}

fn write_record_item(html: &mut String, record: &DocumentRecordView) {
    let contact_note = if record.contact.is_empty() {
        String::new()
    } else {
        format!(" (contact: {})", escape_html(&record.contact))
    };
    writeln!(
        html,
        "<li><strong>{}</strong>{}: {}</li>",
        escape_html(&record.patient_name),
        contact_note,
        escape_html(&record.status_line)
    )
    .expect("write record");
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
