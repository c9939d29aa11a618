use crate::config::MailConfig;
use crate::mail::{MailMessage, MailTransport};

const ALERT_SUBJECT: &str = "Alert: video removal limit exceeded";

/// Send the over-cap alert to every configured recipient.
/// Sends are independent: a failed recipient is logged and the rest are
/// still attempted. Returns `(sent, failed)` counts for the run report.
pub(crate) async fn send_cap_alerts(
    mailer: &dyn MailTransport,
    config: &MailConfig,
    max_remove: u32,
) -> (u64, u64) {
    if config.recipients.is_empty() {
        tracing::warn!("Removal limit exceeded but no alert recipients are configured");
        return (0, 0);
    }

    let body = alert_body(max_remove);
    let mut sent = 0;
    let mut failed = 0;

    // the relay takes one submission per recipient
    for recipient in &config.recipients {
        let message = MailMessage {
            to: recipient.clone(),
            from: config.sender.clone(),
            subject: ALERT_SUBJECT.to_string(),
            body: body.clone(),
        };

        match mailer.send(&message).await {
            Ok(()) => {
                tracing::info!("Sent removal limit alert to {}", recipient);
                sent += 1;
            }
            Err(e) => {
                tracing::warn!("Failed to send removal limit alert to {}: {}", recipient, e);
                failed += 1;
            }
        }
    }

    (sent, failed)
}

fn alert_body(max_remove: u32) -> String {
    format!(
        "The video sweep hit its limit of {} deleted videos for a single run. \
         Remaining unavailable videos were left in place; see the run log for \
         the list.",
        max_remove
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{Error, Result};

    struct FakeMailer {
        sent: Mutex<Vec<MailMessage>>,
        fail_to: Option<String>,
    }

    impl FakeMailer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_to: None,
            }
        }

        fn failing_for(recipient: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_to: Some(recipient.to_string()),
            }
        }
    }

    #[async_trait]
    impl MailTransport for FakeMailer {
        async fn send(&self, message: &MailMessage) -> Result<()> {
            if self.fail_to.as_deref() == Some(message.to.as_str()) {
                return Err(Error::Mail("relay rejected message".to_string()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn config_with_recipients(recipients: &[&str]) -> MailConfig {
        MailConfig {
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            ..MailConfig::default()
        }
    }

    #[tokio::test]
    async fn test_one_message_per_recipient() {
        let mailer = FakeMailer::new();
        let config = config_with_recipients(&["ops@example.org", "videos@example.org"]);

        let (sent, failed) = send_cap_alerts(&mailer, &config, 25).await;

        assert_eq!((sent, failed), (2, 0));

        let messages = mailer.sent.lock().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].to, "ops@example.org");
        assert_eq!(messages[1].to, "videos@example.org");
        assert_eq!(messages[0].subject, ALERT_SUBJECT);
        assert_eq!(messages[0].from, config.sender);
        assert!(messages[0].body.contains("limit of 25"));
    }

    #[tokio::test]
    async fn test_failed_recipient_does_not_block_the_rest() {
        let mailer = FakeMailer::failing_for("ops@example.org");
        let config = config_with_recipients(&["ops@example.org", "videos@example.org"]);

        let (sent, failed) = send_cap_alerts(&mailer, &config, 25).await;

        assert_eq!((sent, failed), (1, 1));

        let messages = mailer.sent.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to, "videos@example.org");
    }

    #[tokio::test]
    async fn test_no_recipients_sends_nothing() {
        let mailer = FakeMailer::new();
        let config = config_with_recipients(&[]);

        let (sent, failed) = send_cap_alerts(&mailer, &config, 25).await;

        assert_eq!((sent, failed), (0, 0));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}
