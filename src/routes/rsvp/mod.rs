pub mod models;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use tracing::debug;

use crate::{
    modules::AppState,
    routes::rsvp::models::{RsvpAccepted, RsvpSubmission},
    utils::rsvp::{errors::RsvpError, submit_rsvp},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(post_rsvp))
}

/// Submit the RSVP for an invitation
#[utoipa::path(
    post,
    path = "/rsvp",
    tag = "rsvp",
    request_body = RsvpSubmission,
    responses(
        (status = 200, description = "RSVP stored", body = RsvpAccepted),
        (status = 400, description = "Malformed body, invalid form data or missing invite code"),
        (status = 403, description = "Deadline passed or too many guests"),
        (status = 404, description = "Invalid invitation code"),
        (status = 409, description = "RSVP already submitted for this invitation"),
        (status = 500, description = "RSVP could not be saved")
    )
)]
pub async fn post_rsvp(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RsvpAccepted>, RsvpError> {
    let record = submit_rsvp(state.store.as_ref(), &body, state.clock.now()).await?;
    debug!(
        "RSVP for invitation {} accepted (attending: {})",
        record.invitation_id, record.attending
    );

    state.notifier.notify_in_background(record);

    Ok(Json(RsvpAccepted::default()))
}
