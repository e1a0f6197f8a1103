use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Shape check only: local part, "@", domain containing a ".". Does not
/// verify deliverability.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email shape regex is valid")
});

/// Inbound contact-form payload. Absent fields deserialize to empty strings
/// so each one surfaces as its own validation error instead of a
/// deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[serde(default)]
    #[validate(regex(path = *EMAIL_SHAPE, message = "Valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_message"))]
    pub message: String,
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(new_validation_error("required", "Name is required"));
    }
    Ok(())
}

pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(new_validation_error("required", "Message is required"));
    }
    Ok(())
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(std::borrow::Cow::Borrowed(msg));
    err
}

pub const CONTACT_MESSAGE_TYPE: &str = "contactMessage";

/// Document shape the content store persists.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessageDoc {
    #[serde(rename = "_type")]
    pub doc_type: &'static str,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
}

impl ContactMessageDoc {
    /// Stamps the submission with the server-side receipt time.
    pub fn from_form(form: ContactForm) -> Self {
        ContactMessageDoc {
            doc_type: CONTACT_MESSAGE_TYPE,
            name: form.name,
            email: form.email,
            message: form.message,
            submitted_at: Utc::now(),
        }
    }
}

/// Receipt returned by the content store for a created document.
#[derive(Debug, Clone)]
pub struct PersistedDocument {
    pub id: String,
}
