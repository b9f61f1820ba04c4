use crate::utils::invitations::Invitation;
use crate::utils::rsvp::errors::InsertRsvpError;
use crate::utils::rsvp::RsvpRecord;
use axum::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::trace;
use uuid::Uuid;

/// Persistence seam for invitations and RSVPs.
///
/// `insert_rsvp` must report a second record for the same invitation as
/// [`InsertRsvpError::AlreadySubmitted`]; the handler holds no locks of its
/// own, so this is the only guard against duplicate submissions.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_invitation(&self, code: &str) -> anyhow::Result<Option<Invitation>>;
    async fn insert_rsvp(&self, record: &RsvpRecord) -> Result<Uuid, InsertRsvpError>;
}

pub type DynStore = Arc<dyn Store>;

#[derive(Default)]
struct Tables {
    invitations: HashMap<String, Invitation>,
    rsvps: HashMap<String, (Uuid, RsvpRecord)>,
}

/// Process-local store keyed the same way as the `rsvps` table.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new(invitations: impl IntoIterator<Item = Invitation>) -> Self {
        let invitations = invitations
            .into_iter()
            .map(|invitation| (invitation.id.clone(), invitation))
            .collect();
        Self {
            tables: Arc::new(RwLock::new(Tables {
                invitations,
                rsvps: HashMap::new(),
            })),
        }
    }

    pub async fn add_invitation(&self, invitation: Invitation) {
        let mut tables = self.tables.write().await;
        tables
            .invitations
            .insert(invitation.id.clone(), invitation);
    }

    pub async fn rsvp_for(&self, invitation_id: &str) -> Option<RsvpRecord> {
        let tables = self.tables.read().await;
        tables
            .rsvps
            .get(invitation_id)
            .map(|(_, record)| record.clone())
    }

    pub async fn rsvp_count(&self) -> usize {
        self.tables.read().await.rsvps.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_invitation(&self, code: &str) -> anyhow::Result<Option<Invitation>> {
        let tables = self.tables.read().await;
        Ok(tables.invitations.get(code).cloned())
    }

    async fn insert_rsvp(&self, record: &RsvpRecord) -> Result<Uuid, InsertRsvpError> {
        let mut tables = self.tables.write().await;
        if !tables.invitations.contains_key(&record.invitation_id) {
            return Err(anyhow::anyhow!(
                "invitation {} vanished before insert",
                record.invitation_id
            )
            .into());
        }
        match tables.rsvps.entry(record.invitation_id.clone()) {
            Entry::Occupied(_) => Err(InsertRsvpError::AlreadySubmitted),
            Entry::Vacant(slot) => {
                let id = Uuid::new_v4();
                slot.insert((id, record.clone()));
                trace!("Stored RSVP {id} in memory");
                Ok(id)
            }
        }
    }
}
