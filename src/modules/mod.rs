use self::clock::Clock;
use self::database::{get_postgres_pool, PgStore};
use self::store::{DynStore, MemoryStore};
use crate::config::app::ApplicationSettings;
use crate::config::environment::Environment;
use crate::config::get_config;
use crate::config::store::StoreSettings;
use crate::utils::notifications::Notifier;
use axum::extract::FromRef;
use core::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub mod clock;
pub mod database;
pub mod store;

pub struct Modules {
    pub app: ApplicationSettings,
    store: DynStore,
    notifier: Notifier,
    clock: Clock,
    environment: Environment,
}

impl Modules {
    pub async fn load_from_settings() -> anyhow::Result<Self> {
        let settings = get_config()?;
        info!("Settings loaded");
        info!("Loading modules");
        let store: DynStore = match settings.store {
            StoreSettings::Postgres(postgres) => {
                Arc::new(PgStore::new(get_postgres_pool(postgres).await))
            }
            StoreSettings::Memory(invitations) => {
                info!("Seeding memory store with {} invitation(s)", invitations.len());
                Arc::new(MemoryStore::new(invitations))
            }
        };
        let notifier = Notifier::from_settings(settings.notifications)?;
        info!("Modules loaded");
        Ok(Self {
            app: settings.app,
            store,
            notifier,
            clock: Clock::System,
            environment: settings.environment,
        })
    }

    pub fn use_custom(
        store: DynStore,
        addr: SocketAddr,
        notifier: Notifier,
        clock: Clock,
        environment: Environment,
    ) -> Self {
        Self {
            app: ApplicationSettings::new(addr),
            store,
            notifier,
            clock,
            environment,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self)
    }
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub environment: Environment,
    pub store: DynStore,
    pub notifier: Notifier,
    pub clock: Clock,
}

impl AppState {
    fn new(modules: &Modules) -> Self {
        Self {
            environment: modules.environment.clone(),
            store: modules.store.clone(),
            notifier: modules.notifier.clone(),
            clock: modules.clock,
        }
    }
}

impl Display for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "store, {} notifier, {:?} clock", self.notifier, self.clock)
    }
}
