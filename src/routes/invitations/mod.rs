pub mod models;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

use crate::{
    modules::AppState,
    routes::invitations::models::InvitationSummary,
    utils::invitations::{errors::InvitationError, lookup_invitation},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/:code", get(get_invitation))
}

/// Fetch invitation details for the RSVP page
#[utoipa::path(
    get,
    path = "/invitations/{code}",
    tag = "invitations",
    params(("code" = String, Path, description = "Invite code")),
    responses(
        (status = 200, description = "Invitation found", body = InvitationSummary),
        (status = 404, description = "Invalid invitation code"),
        (status = 500, description = "Invitation could not be looked up")
    )
)]
pub async fn get_invitation(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<InvitationSummary>, InvitationError> {
    let invitation = lookup_invitation(state.store.as_ref(), &code).await?;
    debug!("Invitation {} fetched", invitation.id);
    Ok(Json(InvitationSummary::new(invitation, state.clock.now())))
}
