use crate::config::{get_env, try_get_env};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tracing::info;

pub const NAME_DATABASE_URL: &str = "DATABASE_URL";

const DEFAULT_USERNAME: &str = "postgres";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_DATABASE: &str = "wedding";

#[derive(Deserialize, Clone)]
pub struct DatabaseFieldsModel {
    username: Option<String>,
    password: Option<Secret<String>>,
    port: Option<u16>,
    host: Option<String>,
    database_name: Option<String>,
}

impl DatabaseFieldsModel {
    fn to_fields(self) -> DatabaseFields {
        DatabaseFields {
            username: self.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: self
                .password
                .unwrap_or_else(|| Secret::new(String::new())),
            port: self.port.unwrap_or(DEFAULT_PORT),
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            database_name: self
                .database_name
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct DatabaseFields {
    username: String,
    password: Secret<String>,
    port: u16,
    host: String,
    database_name: String,
}

impl DatabaseFields {
    fn compose(&self, scheme: &str) -> String {
        format!(
            "{scheme}://{}:{}@{}:{}/{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.database_name
        )
    }
}

/// Resolves a connection string from, in order: composed fields, an explicit
/// url, the `DATABASE_URL` variable.
pub trait ConnectionPrep {
    const SCHEME: &'static str;

    fn compose_database_url(&self) -> Option<String>;
    fn get_database_url(&self) -> Option<String>;
    fn env_database_url() -> Option<String>;
    fn get_connection_string(&self) -> String {
        let info = format!("url for {}", Self::SCHEME);
        if let Some(url) = self.compose_database_url() {
            info!("Using composed {info}");
            url
        } else if let Some(url) = self.get_database_url() {
            info!("Using field {info}");
            url
        } else {
            let url = Self::env_database_url().expect("No connection info provided");
            info!("Using env {info}");
            url
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct PostgresSettingsModel {
    database_url: Option<String>,
    fields: Option<DatabaseFieldsModel>,
    is_migrating: Option<bool>,
}

impl ConnectionPrep for PostgresSettingsModel {
    const SCHEME: &'static str = "postgresql";

    fn compose_database_url(&self) -> Option<String> {
        let fields = self.fields.clone()?.to_fields();
        Some(fields.compose(Self::SCHEME))
    }

    fn get_database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn env_database_url() -> Option<String> {
        try_get_env(NAME_DATABASE_URL)
    }
}

impl PostgresSettingsModel {
    pub fn to_settings(self) -> PostgresSettings {
        let is_migrating = self.is_migrating.unwrap_or(false);
        let database_url = Secret::new(self.get_connection_string());
        PostgresSettings {
            database_url,
            is_migrating,
        }
    }
}

#[derive(Clone)]
pub struct PostgresSettings {
    pub database_url: Secret<String>,
    pub is_migrating: bool,
}

impl PostgresSettings {
    pub fn from_env() -> Self {
        Self {
            database_url: Secret::new(get_env(NAME_DATABASE_URL)),
            is_migrating: true,
        }
    }

    /// Development fallback when no `postgres` section is configured.
    pub fn try_from_env() -> Option<Self> {
        Some(Self {
            database_url: Secret::new(try_get_env(NAME_DATABASE_URL)?),
            is_migrating: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_url_from_fields() {
        let model = PostgresSettingsModel {
            database_url: Some("postgresql://ignored".to_string()),
            fields: Some(DatabaseFieldsModel {
                username: Some("guest".to_string()),
                password: Some(Secret::new("hunter2".to_string())),
                port: None,
                host: Some("db".to_string()),
                database_name: None,
            }),
            is_migrating: Some(true),
        };

        let settings = model.to_settings();
        assert_eq!(
            settings.database_url.expose_secret(),
            "postgresql://guest:hunter2@db:5432/wedding"
        );
        assert!(settings.is_migrating);
    }

    #[test]
    fn falls_back_to_explicit_url() {
        let model = PostgresSettingsModel {
            database_url: Some("postgresql://localhost/rsvp".to_string()),
            fields: None,
            is_migrating: None,
        };

        let settings = model.to_settings();
        assert_eq!(
            settings.database_url.expose_secret(),
            "postgresql://localhost/rsvp"
        );
        assert!(!settings.is_migrating);
    }
}
