pub mod errors;

use crate::modules::database::PgQuery;
use crate::modules::store::Store;
use sqlx::{query_as, FromRow};
use time::OffsetDateTime;
use tracing::trace;

use self::errors::InvitationError;

/// Invitation as managed by the organisers; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Invitation {
    pub id: String,
    pub name: String,
    pub rsvp_deadline: OffsetDateTime,
    pub allowed_guests: i32,
}

impl Invitation {
    /// Responses are accepted up to and including the deadline instant.
    pub fn deadline_passed(&self, now: OffsetDateTime) -> bool {
        now > self.rsvp_deadline
    }

    pub fn allows(&self, guest_count: i32) -> bool {
        guest_count <= self.allowed_guests
    }
}

pub struct InvitationLookup<'a> {
    code: &'a str,
}

impl<'a> InvitationLookup<'a> {
    pub fn new(code: &'a str) -> Self {
        Self { code }
    }
}

impl<'c, 'a> PgQuery<'c, InvitationLookup<'a>> {
    pub async fn find(&mut self) -> Result<Option<Invitation>, sqlx::Error> {
        let res = query_as::<_, Invitation>(
            r#"
            SELECT id, name, rsvp_deadline, allowed_guests FROM invitations
            WHERE id = $1
        "#,
        )
        .bind(self.payload.code)
        .fetch_optional(&mut *self.conn)
        .await?;

        if res.is_none() {
            trace!("No invitation with code {:?}", self.payload.code);
        }

        Ok(res)
    }
}

/// Resolves an invite code, keeping "does not exist" apart from "could not
/// tell".
pub async fn lookup_invitation(
    store: &dyn Store,
    code: &str,
) -> Result<Invitation, InvitationError> {
    store
        .find_invitation(code)
        .await?
        .ok_or(InvitationError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::MemoryStore;
    use time::macros::datetime;

    fn invitation() -> Invitation {
        Invitation {
            id: "abc-123".to_string(),
            name: "Jane Doe".to_string(),
            rsvp_deadline: datetime!(2025-11-15 00:00 UTC),
            allowed_guests: 4,
        }
    }

    #[test]
    fn deadline_is_inclusive() {
        let inv = invitation();
        assert!(!inv.deadline_passed(datetime!(2025-11-15 00:00 UTC)));
        assert!(inv.deadline_passed(datetime!(2025-11-15 00:00:00.001 UTC)));
    }

    #[test]
    fn guest_ceiling_is_inclusive() {
        let inv = invitation();
        assert!(inv.allows(4));
        assert!(!inv.allows(5));
    }

    #[tokio::test]
    async fn lookup_distinguishes_missing() {
        let store = MemoryStore::new([invitation()]);
        assert_eq!(
            lookup_invitation(&store, "abc-123").await.unwrap(),
            invitation()
        );
        assert!(matches!(
            lookup_invitation(&store, "zzz-999").await,
            Err(InvitationError::NotFound)
        ));
    }
}
