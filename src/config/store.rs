use crate::config::database::{PostgresSettings, PostgresSettingsModel};
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::utils::invitations::Invitation;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Invitation preloaded into the in-memory store.
#[derive(Deserialize, Clone, Debug)]
pub struct InvitationSeed {
    pub id: String,
    pub name: String,
    pub rsvp_deadline: String,
    pub allowed_guests: i32,
}

impl InvitationSeed {
    fn to_invitation(self) -> Option<Invitation> {
        match OffsetDateTime::parse(&self.rsvp_deadline, &Rfc3339) {
            Ok(rsvp_deadline) => Some(Invitation {
                id: self.id,
                name: self.name,
                rsvp_deadline,
                allowed_guests: self.allowed_guests,
            }),
            Err(e) => {
                warn!(
                    "Skipping seeded invitation {}: bad rsvp_deadline {:?} ({e})",
                    self.id, self.rsvp_deadline
                );
                None
            }
        }
    }
}

#[derive(Deserialize)]
pub struct StoreSettingsModel {
    pub kind: Option<StoreKind>,
    pub invitations: Option<Vec<InvitationSeed>>,
}

#[derive(Clone)]
pub enum StoreSettings {
    Postgres(PostgresSettings),
    Memory(Vec<Invitation>),
}

impl StoreSettings {
    pub fn dev(store: Option<StoreSettingsModel>, postgres: Option<PostgresSettingsModel>) -> Self {
        let (kind, seeds) = match store {
            Some(model) => (model.kind, model.invitations.unwrap_or_default()),
            None => (None, Vec::new()),
        };

        match kind {
            Some(StoreKind::Memory) => {
                warn!("Using in-memory store, submissions are lost on restart!");
                Self::memory(seeds)
            }
            Some(StoreKind::Postgres) => Self::Postgres(postgres.map_or_else(
                PostgresSettings::from_env,
                |x| x.to_settings(),
            )),
            None => match postgres {
                Some(model) => Self::Postgres(model.to_settings()),
                None => Self::default(),
            },
        }
    }

    fn memory(seeds: Vec<InvitationSeed>) -> Self {
        Self::Memory(
            seeds
                .into_iter()
                .filter_map(InvitationSeed::to_invitation)
                .collect(),
        )
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        match PostgresSettings::try_from_env() {
            Some(settings) => {
                warn!("Using default `postgres` settings (env url)!");
                Self::Postgres(settings)
            }
            None => {
                warn!("No database configured, using in-memory store!");
                Self::Memory(Vec::new())
            }
        }
    }
}
