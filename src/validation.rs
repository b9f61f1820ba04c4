use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::routes::rsvp::models::RsvpSubmission;

const HEADCOUNT_MISMATCH: &str = "The number of adults and children must add up to the total guest count, and there must be at least one adult.";

const REQUIRED_STRINGS: [&str; 4] = ["firstName", "lastName", "email", "attendance"];
const OPTIONAL_STRINGS: [&str; 6] = [
    "inviteCode",
    "phone",
    "dietary",
    "message",
    "gift_preference",
    "relationship_to_couple",
];
const INTEGERS: [&str; 3] = ["guestCount", "adult_count", "child_count"];

#[derive(Debug, Error)]
pub enum ValidateContentError {
    #[error("Invalid JSON body.")]
    Malformed,
    #[error("Invalid form data.")]
    Rejected(FieldErrors),
}

/// Field name -> messages, in wire naming.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges `validator` output, skipping fields that already failed their
    /// type check.
    fn absorb(&mut self, errors: ValidationErrors) {
        for (field, errors) in errors.field_errors() {
            let field = wire_name(field);
            if self.0.contains_key(field) {
                continue;
            }
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", error.code));
                self.add(field, message);
            }
        }
    }
}

fn wire_name(field: &str) -> &str {
    match field {
        "invite_code" => "inviteCode",
        "first_name" => "firstName",
        "last_name" => "lastName",
        "guest_count" => "guestCount",
        other => other,
    }
}

/// Headcount of an accepted invitation; only constructed once
/// `adults + children == guests` and `adults >= 1` hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Headcount {
    pub guests: i32,
    pub adults: i32,
    pub children: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Attending(Headcount),
    Declining,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRsvp {
    pub invite_code: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub reply: Reply,
    pub dietary: Option<String>,
    pub message: Option<String>,
    pub gift_preference: Option<String>,
    pub relationship_to_couple: Option<String>,
}

pub trait ValidateContent {
    type Valid;

    fn validate_content(self) -> Result<Self::Valid, ValidateContentError>;
}

impl ValidateContent for Value {
    type Valid = ValidatedRsvp;

    /// Type checks and trims the raw object, then applies the field rules
    /// and the headcount invariant. Every failing field is reported.
    fn validate_content(self) -> Result<ValidatedRsvp, ValidateContentError> {
        let Value::Object(mut fields) = self else {
            return Err(ValidateContentError::Malformed);
        };

        let mut errors = check_types(&mut fields);
        let submission: RsvpSubmission = serde_json::from_value(Value::Object(fields))
            .map_err(|_| ValidateContentError::Malformed)?;

        if let Err(e) = submission.validate() {
            errors.absorb(e);
        }

        let reply = if submission.is_attending() {
            match attending_headcount(&submission, &mut errors) {
                Some(headcount) => Reply::Attending(headcount),
                None => return Err(ValidateContentError::Rejected(errors)),
            }
        } else {
            Reply::Declining
        };

        if !errors.is_empty() {
            return Err(ValidateContentError::Rejected(errors));
        }

        Ok(ValidatedRsvp {
            invite_code: submission.invite_code,
            name: format!("{} {}", submission.first_name, submission.last_name)
                .trim()
                .to_string(),
            email: submission.email,
            phone: submission.phone,
            reply,
            dietary: submission.dietary,
            message: submission.message,
            gift_preference: submission.gift_preference,
            relationship_to_couple: submission.relationship_to_couple,
        })
    }
}

enum Fix {
    Keep,
    Remove,
    Replace(String),
    Mistyped(&'static str),
}

/// Removes mistyped fields (recording why), trims strings and drops empty
/// optional ones so the typed model only sees well-typed values.
fn check_types(fields: &mut Map<String, Value>) -> FieldErrors {
    let mut errors = FieldErrors::default();

    for name in REQUIRED_STRINGS.iter().chain(OPTIONAL_STRINGS.iter()) {
        let optional = OPTIONAL_STRINGS.contains(name);
        let fix = match fields.get(*name) {
            None => Fix::Keep,
            Some(Value::Null) if optional => Fix::Remove,
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if optional && trimmed.is_empty() {
                    Fix::Remove
                } else if trimmed.len() != s.len() {
                    Fix::Replace(trimmed.to_string())
                } else {
                    Fix::Keep
                }
            }
            Some(_) => Fix::Mistyped("Expected a string."),
        };
        apply(fields, &mut errors, name, fix);
    }

    for name in INTEGERS {
        let fix = match fields.get(name) {
            None => Fix::Keep,
            Some(Value::Null) => Fix::Remove,
            Some(Value::Number(n)) if n.as_i64().and_then(|v| i32::try_from(v).ok()).is_some() => {
                Fix::Keep
            }
            Some(_) => Fix::Mistyped("Expected an integer."),
        };
        apply(fields, &mut errors, name, fix);
    }

    errors
}

fn apply(fields: &mut Map<String, Value>, errors: &mut FieldErrors, name: &str, fix: Fix) {
    match fix {
        Fix::Keep => {}
        Fix::Remove => {
            fields.remove(name);
        }
        Fix::Replace(value) => {
            fields.insert(name.to_string(), Value::String(value));
        }
        Fix::Mistyped(message) => {
            errors.add(name, message);
            fields.remove(name);
        }
    }
}

fn attending_headcount(submission: &RsvpSubmission, errors: &mut FieldErrors) -> Option<Headcount> {
    let Some(guests) = submission.guest_count else {
        if errors.get("guestCount").is_none() {
            errors.add("guestCount", "Guest count is required when attending.");
        }
        errors.add("adult_count", HEADCOUNT_MISMATCH);
        return None;
    };

    let (Some(adults), Some(children)) = (submission.adult_count, submission.child_count) else {
        errors.add("adult_count", HEADCOUNT_MISMATCH);
        return None;
    };

    let sums_up = i64::from(adults) + i64::from(children) == i64::from(guests);
    if adults < 1 || !sums_up {
        errors.add("adult_count", HEADCOUNT_MISMATCH);
        return None;
    }

    Some(Headcount {
        guests,
        adults,
        children,
    })
}
