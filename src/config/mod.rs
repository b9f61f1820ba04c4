use crate::config::app::{ApplicationSettings, ApplicationSettingsModel, NAME_PORT};
use crate::config::database::{PostgresSettings, PostgresSettingsModel, NAME_DATABASE_URL};
use crate::config::environment::Environment;
use crate::config::notifications::{NotificationSettings, NotificationSettingsModel};
use crate::config::store::{StoreSettings, StoreSettingsModel};
use config::{Config, ConfigError};
use secrecy::Secret;
use serde::Deserialize;
use std::env;
use tracing::{error, warn};

pub mod app;
pub mod database;
pub mod environment;
pub mod notifications;
pub mod store;

const CONFIG_DIR: &str = "configuration";
const CONFIG_FILE_NAME: &str = "settings.toml";

#[derive(Deserialize)]
pub struct SettingsModel {
    pub app: Option<ApplicationSettingsModel>,
    pub postgres: Option<PostgresSettingsModel>,
    pub store: Option<StoreSettingsModel>,
    pub notifications: Option<NotificationSettingsModel>,
}

impl SettingsModel {
    fn parse() -> Result<Self, ConfigError> {
        let base_path = std::env::current_dir().expect("Failed to determine the current directory");
        let config_dir = base_path.join(CONFIG_DIR);
        let settings = Config::builder()
            .add_source(config::File::from(config_dir.join(CONFIG_FILE_NAME)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        settings.build()?.try_deserialize()
    }
}

#[derive(Clone)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub store: StoreSettings,
    pub notifications: NotificationSettings,
    pub environment: Environment,
}

impl Settings {
    fn dev(model: SettingsModel) -> Self {
        let app = model.app.map_or_else(
            || {
                warn!("Using default `app` settings!");
                ApplicationSettings::default()
            },
            |x| x.to_settings(),
        );

        let store = StoreSettings::dev(model.store, model.postgres);

        let notifications = model.notifications.map_or_else(
            || {
                warn!("Using default `notifications` settings (log only)!");
                NotificationSettings::default()
            },
            |x| x.to_settings(),
        );

        Self {
            app,
            store,
            notifications,
            environment: Environment::Development,
        }
    }

    fn prod() -> Self {
        Self {
            app: ApplicationSettings::from_env(),
            store: StoreSettings::Postgres(PostgresSettings::from_env()),
            notifications: NotificationSettings::from_env(),
            environment: Environment::Production,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: ApplicationSettings::default(),
            store: StoreSettings::default(),
            notifications: NotificationSettings::default(),
            environment: Environment::default(),
        }
    }
}

pub fn get_config() -> Result<Settings, anyhow::Error> {
    let environment: Environment = match std::env::var("APP_ENVIRONMENT") {
        Ok(env) => env.try_into().map_err(anyhow::Error::msg)?,
        Err(_) => Environment::Development,
    };

    match environment {
        Environment::Development => {
            let res = SettingsModel::parse().map_err(|e| {
                error!("{e}\n - check {CONFIG_DIR}/{CONFIG_FILE_NAME}, reference at README.md")
            });
            if let Ok(model) = res {
                return Ok(Settings::dev(model));
            }
            warn!("Using default configuration!");
            Ok(Settings::default())
        }

        Environment::Production => {
            let missing = missing_env();
            if !missing.is_empty() {
                anyhow::bail!("Provide missing environment variables {missing:?}");
            }
            Ok(Settings::prod())
        }
    }
}

pub fn try_get_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub fn try_get_secret_env(name: &str) -> Option<Secret<String>> {
    Some(Secret::from(try_get_env(name)?))
}

pub fn get_env(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("Missing {name}"))
}

fn missing_env() -> Vec<&'static str> {
    let present: Vec<String> = env::vars().map(|(key, _)| key).collect();
    [NAME_PORT, NAME_DATABASE_URL]
        .into_iter()
        .filter(|name| !present.iter().any(|key| key == name))
        .collect()
}
