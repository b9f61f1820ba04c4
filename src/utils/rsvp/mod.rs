pub mod errors;

use serde::Serialize;
use serde_json::Value;
use sqlx::{query_scalar, FromRow};
use time::OffsetDateTime;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::modules::database::PgQuery;
use crate::modules::store::Store;
use crate::validation::{Reply, ValidateContent, ValidatedRsvp};

use self::errors::{InsertRsvpError, RsvpError};

const UNIQUE_VIOLATION: &str = "23505";

/// Row written for a successful submission; also the payload handed to the
/// notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct RsvpRecord {
    pub invitation_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub attending: bool,
    pub guest_count: i32,
    pub adult_count: i32,
    pub child_count: i32,
    pub dietary_restrictions: Option<String>,
    pub message: Option<String>,
    pub gift_preference: Option<String>,
    pub relationship_to_couple: Option<String>,
}

impl RsvpRecord {
    /// Declined replies are stored with zeroed counts whatever the form sent.
    pub fn new(invitation_id: String, rsvp: ValidatedRsvp) -> Self {
        let (attending, guest_count, adult_count, child_count) = match rsvp.reply {
            Reply::Attending(headcount) => {
                (true, headcount.guests, headcount.adults, headcount.children)
            }
            Reply::Declining => (false, 0, 0, 0),
        };

        Self {
            invitation_id,
            name: rsvp.name,
            email: rsvp.email,
            phone: rsvp.phone,
            attending,
            guest_count,
            adult_count,
            child_count,
            dietary_restrictions: rsvp.dietary,
            message: rsvp.message,
            gift_preference: rsvp.gift_preference,
            relationship_to_couple: rsvp.relationship_to_couple,
        }
    }
}

pub struct NewRsvp<'r> {
    record: &'r RsvpRecord,
}

impl<'r> NewRsvp<'r> {
    pub fn new(record: &'r RsvpRecord) -> Self {
        Self { record }
    }
}

impl<'c, 'r> PgQuery<'c, NewRsvp<'r>> {
    pub async fn insert(&mut self) -> Result<Uuid, InsertRsvpError> {
        let record = self.payload.record;
        let res = query_scalar::<_, Uuid>(
            r#"
            INSERT INTO rsvps (
                invitation_id, name, email, phone, attending,
                guest_count, adult_count, child_count,
                dietary_restrictions, message, gift_preference, relationship_to_couple
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
        "#,
        )
        .bind(&record.invitation_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(record.attending)
        .bind(record.guest_count)
        .bind(record.adult_count)
        .bind(record.child_count)
        .bind(&record.dietary_restrictions)
        .bind(&record.message)
        .bind(&record.gift_preference)
        .bind(&record.relationship_to_couple)
        .fetch_one(&mut *self.conn)
        .await;

        match res {
            Ok(id) => {
                trace!("Inserted RSVP {id} for invitation {}", record.invitation_id);
                Ok(id)
            }
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                trace!("RSVP for invitation {} already exists", record.invitation_id);
                Err(InsertRsvpError::AlreadySubmitted)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context("Failed to insert RSVP")
                .into()),
        }
    }
}

/// Runs one submission through parsing, validation, the invitation rules and
/// the insert. Each stage only runs when every earlier one passed.
pub async fn submit_rsvp(
    store: &dyn Store,
    body: &[u8],
    now: OffsetDateTime,
) -> Result<RsvpRecord, RsvpError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|_| RsvpError::MalformedPayload)?;
    let rsvp = payload.validate_content()?;

    let code = rsvp
        .invite_code
        .clone()
        .ok_or(RsvpError::MissingInviteCode)?;

    let invitation = store
        .find_invitation(&code)
        .await
        .map_err(RsvpError::LookupFailed)?
        .ok_or(RsvpError::InvitationInvalid)?;

    if invitation.deadline_passed(now) {
        debug!("RSVP for {code} arrived after the deadline");
        return Err(RsvpError::DeadlinePassed);
    }

    if let Reply::Attending(headcount) = rsvp.reply {
        if !invitation.allows(headcount.guests) {
            debug!(
                "RSVP for {code} asks for {} guests, {} allowed",
                headcount.guests, invitation.allowed_guests
            );
            return Err(RsvpError::GuestLimitExceeded {
                allowed: invitation.allowed_guests,
            });
        }
    }

    let record = RsvpRecord::new(invitation.id, rsvp);
    let id = store.insert_rsvp(&record).await?;
    debug!("Stored RSVP {id} for invitation {code}");

    Ok(record)
}
