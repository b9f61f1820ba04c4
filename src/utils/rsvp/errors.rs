use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::validation::{FieldErrors, ValidateContentError};

#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("Invalid JSON body.")]
    MalformedPayload,
    #[error("Invalid form data.")]
    ValidationFailed(FieldErrors),
    #[error("Invite code is required for submission.")]
    MissingInviteCode,
    #[error("Invalid invitation code.")]
    InvitationInvalid,
    /// Shown to guests exactly like [`RsvpError::InvitationInvalid`].
    #[error("Invalid invitation code.")]
    LookupFailed(#[source] anyhow::Error),
    #[error("The RSVP deadline for this invitation has passed.")]
    DeadlinePassed,
    #[error("Guest count exceeds the maximum of {allowed} for this invitation.")]
    GuestLimitExceeded { allowed: i32 },
    #[error("An RSVP has already been submitted for this invitation.")]
    AlreadySubmitted,
    #[error("Failed to save RSVP to the database.")]
    PersistenceFailed(#[source] anyhow::Error),
}

impl From<ValidateContentError> for RsvpError {
    fn from(e: ValidateContentError) -> Self {
        match e {
            ValidateContentError::Malformed => Self::MalformedPayload,
            ValidateContentError::Rejected(errors) => Self::ValidationFailed(errors),
        }
    }
}

impl From<InsertRsvpError> for RsvpError {
    fn from(e: InsertRsvpError) -> Self {
        match e {
            InsertRsvpError::AlreadySubmitted => Self::AlreadySubmitted,
            InsertRsvpError::Unexpected(e) => Self::PersistenceFailed(e),
        }
    }
}

impl RsvpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RsvpError::MalformedPayload
            | RsvpError::ValidationFailed(_)
            | RsvpError::MissingInviteCode => StatusCode::BAD_REQUEST,
            RsvpError::InvitationInvalid | RsvpError::LookupFailed(_) => StatusCode::NOT_FOUND,
            RsvpError::DeadlinePassed | RsvpError::GuestLimitExceeded { .. } => {
                StatusCode::FORBIDDEN
            }
            RsvpError::AlreadySubmitted => StatusCode::CONFLICT,
            RsvpError::PersistenceFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RsvpError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        match &self {
            RsvpError::LookupFailed(e) => tracing::error!("Invitation lookup failed: {e:?}"),
            RsvpError::PersistenceFailed(e) => tracing::error!("RSVP insert failed: {e:?}"),
            _ => {}
        }

        let body = match self {
            RsvpError::ValidationFailed(errors) => {
                json!({ "message": "Invalid form data.", "errors": errors })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}

/// Storage-level outcome of writing one RSVP.
#[derive(Error, Debug)]
pub enum InsertRsvpError {
    #[error("An RSVP already exists for this invitation")]
    AlreadySubmitted,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
