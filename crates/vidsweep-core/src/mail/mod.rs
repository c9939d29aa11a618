mod relay;

use async_trait::async_trait;

use crate::Result;

pub use relay::HttpMailRelay;

/// A single outbound alert mail.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

/// Delivery seam for alert mail. Implementations hand the message to
/// whatever transport the deployment uses.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<()>;
}
