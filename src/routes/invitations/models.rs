use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::utils::invitations::Invitation;

/// What the RSVP page needs to greet the guest and size the form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct InvitationSummary {
    pub id: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub rsvp_deadline: OffsetDateTime,
    pub allowed_guests: i32,
    pub deadline_passed: bool,
}

impl InvitationSummary {
    pub fn new(invitation: Invitation, now: OffsetDateTime) -> Self {
        Self {
            deadline_passed: invitation.deadline_passed(now),
            id: invitation.id,
            name: invitation.name,
            rsvp_deadline: invitation.rsvp_deadline,
            allowed_guests: invitation.allowed_guests,
        }
    }
}
