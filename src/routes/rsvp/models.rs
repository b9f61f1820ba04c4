use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const ATTENDING: &str = "yes";
pub const DECLINING: &str = "no";

/// RSVP form as posted by the invitation page.
#[derive(Deserialize, Validate, Debug, Clone, Default, ToSchema)]
pub struct RsvpSubmission {
    #[serde(rename = "inviteCode")]
    pub invite_code: Option<String>,
    #[serde(rename = "firstName", default)]
    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[serde(rename = "lastName", default)]
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email address."))]
    pub email: String,
    pub phone: Option<String>,
    /// `yes` or `no`
    #[serde(default)]
    #[validate(custom = "validate_attendance")]
    pub attendance: String,
    #[serde(rename = "guestCount")]
    #[validate(range(min = 1, message = "Guest count must be at least 1."))]
    pub guest_count: Option<i32>,
    #[validate(range(min = 0, message = "Adult count cannot be negative."))]
    pub adult_count: Option<i32>,
    #[validate(range(min = 0, message = "Child count cannot be negative."))]
    pub child_count: Option<i32>,
    pub dietary: Option<String>,
    pub message: Option<String>,
    pub gift_preference: Option<String>,
    pub relationship_to_couple: Option<String>,
}

impl RsvpSubmission {
    pub fn is_attending(&self) -> bool {
        self.attendance == ATTENDING
    }
}

fn validate_attendance(attendance: &str) -> Result<(), ValidationError> {
    match attendance {
        ATTENDING | DECLINING => Ok(()),
        _ => {
            let mut err = ValidationError::new("attendance");
            err.message = Some("Please select an attendance option.".into());
            Err(err)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RsvpAccepted {
    pub message: String,
}

impl Default for RsvpAccepted {
    fn default() -> Self {
        Self {
            message: "RSVP submitted successfully!".to_string(),
        }
    }
}
