use crate::routes::{
    invitations::models::*, invitations::*, rsvp::models::*, rsvp::*,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
info(title = "Wedding RSVP", description = "Invitation-gated RSVP collection", ),
paths(
post_rsvp,
get_invitation,
),
components(schemas(
RsvpSubmission,
RsvpAccepted,
InvitationSummary,
)),
tags((name = "rsvp"),(name = "invitations"))
)]
pub struct ApiDoc;
