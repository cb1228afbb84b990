use tracing::info;

/// Rendered notification handed to the transport. The recipient is the
/// single configured address; per-patient contacts ride inside the body for
/// informational display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

/// Notification dispatch error. Delivery is never retried here; failures
/// surface to the invoking scheduler and the log.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Trait describing the outbound mail hook so the sweep can be exercised
/// against fakes. Production wiring plugs a real mail adapter in here.
pub trait NotificationGateway: Send + Sync {
    fn send(&self, message: EmailMessage) -> Result<(), DeliveryError>;
}

/// Transport that writes the rendered message to stdout and the log. Used
/// by operator runs and `--dry-run`; cron captures the output.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl NotificationGateway for ConsoleNotifier {
    fn send(&self, message: EmailMessage) -> Result<(), DeliveryError> {
        info!(recipient = %message.recipient, subject = %message.subject, "printing notification to console");
        println!("To: {}", message.recipient);
        println!("Subject: {}", message.subject);
        println!();
        println!("{}", message.html_body);
        Ok(())
    }
}
