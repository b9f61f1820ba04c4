use crate::config::{try_get_env, try_get_secret_env};
use secrecy::Secret;
use serde::Deserialize;

pub const NAME_WEBHOOK_URL: &str = "NOTIFY_WEBHOOK_URL";
pub const NAME_WEBHOOK_TOKEN: &str = "NOTIFY_WEBHOOK_TOKEN";

#[derive(Deserialize)]
pub struct NotificationSettingsModel {
    pub webhook_url: Option<String>,
    pub webhook_token: Option<Secret<String>>,
}

impl NotificationSettingsModel {
    pub fn to_settings(self) -> NotificationSettings {
        NotificationSettings {
            webhook_url: self.webhook_url.filter(|url| !url.trim().is_empty()),
            webhook_token: self.webhook_token,
        }
    }
}

/// Where confirmed RSVPs are announced. Without a webhook they are only logged.
#[derive(Clone, Default)]
pub struct NotificationSettings {
    pub webhook_url: Option<String>,
    pub webhook_token: Option<Secret<String>>,
}

impl NotificationSettings {
    pub fn from_env() -> Self {
        Self {
            webhook_url: try_get_env(NAME_WEBHOOK_URL),
            webhook_token: try_get_secret_env(NAME_WEBHOOK_TOKEN),
        }
    }
}
