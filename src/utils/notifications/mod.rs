use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::json;
use tracing::{info, warn};

use crate::config::notifications::NotificationSettings;
use crate::utils::rsvp::RsvpRecord;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Hands stored RSVPs to whoever sends the confirmation e-mails.
#[derive(Clone)]
pub enum Notifier {
    Log,
    Webhook(Arc<Webhook>),
}

pub struct Webhook {
    client: Client,
    url: String,
    token: Option<Secret<String>>,
}

impl Notifier {
    pub fn from_settings(settings: NotificationSettings) -> anyhow::Result<Self> {
        let Some(url) = settings.webhook_url else {
            return Ok(Self::Log);
        };
        Self::webhook(url, settings.webhook_token)
    }

    pub fn webhook(url: String, token: Option<Secret<String>>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .context("Failed to build notification client")?;
        Ok(Self::Webhook(Arc::new(Webhook { client, url, token })))
    }

    pub async fn notify(&self, record: &RsvpRecord) -> anyhow::Result<()> {
        match self {
            Notifier::Log => {
                info!(
                    invitation_id = %record.invitation_id,
                    name = %record.name,
                    attending = record.attending,
                    guest_count = record.guest_count,
                    "New RSVP"
                );
                Ok(())
            }
            Notifier::Webhook(hook) => hook.send(record).await,
        }
    }

    /// Failures are only logged; the RSVP is already stored.
    pub async fn notify_or_warn(&self, record: &RsvpRecord) {
        if let Err(e) = self.notify(record).await {
            warn!(
                "Failed to notify about RSVP for invitation {}: {e:?}",
                record.invitation_id
            );
        }
    }

    /// Delivers off the request path so a slow receiver never delays the
    /// guest's confirmation.
    pub fn notify_in_background(&self, record: RsvpRecord) {
        let notifier = self.clone();
        tokio::spawn(async move { notifier.notify_or_warn(&record).await });
    }
}

impl Webhook {
    async fn send(&self, record: &RsvpRecord) -> anyhow::Result<()> {
        let mut request = self.client.post(&self.url).json(&json!({
            "type": "INSERT",
            "table": "rsvps",
            "record": record,
        }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        request
            .send()
            .await
            .context("Notification webhook unreachable")?
            .error_for_status()
            .context("Notification webhook rejected RSVP")?;
        Ok(())
    }
}

impl Display for Notifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notifier::Log => write!(f, "log"),
            Notifier::Webhook(hook) => write!(f, "webhook ({})", hook.url),
        }
    }
}
