use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

use super::{MailMessage, MailTransport};
use crate::config::MailConfig;
use crate::{Error, Result};

/// Mail delivery through an HTTP relay that accepts a JSON message
/// and hands it to the site's outbound SMTP path.
pub struct HttpMailRelay {
    relay_url: Url,
    client: Client,
}

impl HttpMailRelay {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let relay_url = Url::parse(&config.relay_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { relay_url, client })
    }
}

#[async_trait]
impl MailTransport for HttpMailRelay {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        let response = self
            .client
            .post(self.relay_url.clone())
            .json(&relay_payload(message))
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(Error::Mail(format!(
            "relay returned HTTP {} for mail to {}",
            response.status(),
            message.to
        )))
    }
}

fn relay_payload(message: &MailMessage) -> Value {
    json!({
        "to": message.to,
        "from": message.from,
        "subject": message.subject,
        "body": message.body,
    })
}
