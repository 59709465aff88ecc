//! Contact relay.
//!
//! Accepts `{name, email, subject, message}` as JSON, validates it, and
//! forwards it to a transactional email vendor. Every failure is answered with
//! a JSON `{error}` body.

pub mod mailer;
pub mod server;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

pub use mailer::{compose_email, Mailer, MailerError, OutgoingEmail, ResendMailer};
pub use server::{router, send_email, RelayState};

/// Contact form body as received. Fields are optional so that a missing field
/// is reported as a validation error rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A validated contact message. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    /// Validate the request.
    pub fn validate(self) -> Result<ContactMessage, ContactError> {
        let name = required(self.name, "Name is required.")?;
        let email = required(self.email, "Email is required.")?;
        let subject = required(self.subject, "Subject is required.")?;
        let message = required(self.message, "Message is required.")?;

        if !is_valid_email(&email) {
            return Err(ContactError::Validation("Invalid email format.".to_string()));
        }

        Ok(ContactMessage {
            name,
            email,
            subject,
            message,
        })
    }
}

fn required(value: Option<String>, reason: &str) -> Result<String, ContactError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ContactError::Validation(reason.to_string())),
    }
}

/// Case-insensitive match of `^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$`.
pub fn is_valid_email(email: &str) -> bool {
    fn local_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
    }
    fn domain_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(local_char) {
        return false;
    }
    if !domain.chars().all(domain_char) {
        return false;
    }

    // The top-level label has no dots, so it follows the last one.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Errors returned by the contact endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Email service is not configured: {0} is not set")]
    MissingApiKey(String),

    #[error("{0}")]
    Vendor(String),
}

impl ContactError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) | ContactError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ContactError::MissingApiKey(_) | ContactError::Vendor(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
