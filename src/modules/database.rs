use crate::app_errors::DefaultContext;
use crate::config::database::PostgresSettings;
use crate::modules::store::Store;
use crate::utils::invitations::{Invitation, InvitationLookup};
use crate::utils::rsvp::errors::InsertRsvpError;
use crate::utils::rsvp::{NewRsvp, RsvpRecord};
use axum::async_trait;
use secrecy::ExposeSecret;
use sqlx::{migrate, PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

pub async fn get_postgres_pool(config: PostgresSettings) -> PgPool {
    let pool = PgPool::connect(config.database_url.expose_secret())
        .await
        .expect("Cannot establish postgres connection");
    if config.is_migrating {
        info!("Running migrations");
        migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Auto migration failed");
    }
    pool
}

/// Groups the queries of one feature around a borrowed connection.
pub struct PgQuery<'c, T> {
    pub payload: T,
    pub conn: &'c mut PgConnection,
}

impl<'c, T> PgQuery<'c, T> {
    pub fn new(payload: T, conn: &'c mut PgConnection) -> Self {
        Self { payload, conn }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_invitation(&self, code: &str) -> anyhow::Result<Option<Invitation>> {
        let mut conn = self.pool.acquire().await.dc()?;
        let mut q = PgQuery::new(InvitationLookup::new(code), &mut conn);
        q.find().await.dc()
    }

    async fn insert_rsvp(&self, record: &RsvpRecord) -> Result<Uuid, InsertRsvpError> {
        let mut conn = self.pool.acquire().await.dc()?;
        let mut q = PgQuery::new(NewRsvp::new(record), &mut conn);
        q.insert().await
    }
}
