//! Email vendor client.

use super::ContactMessage;
use crate::html;
use crate::storage::MailSettings;
use serde::Serialize;

/// Errors from the email vendor.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Email request failed: {0}")]
    Transport(String),

    #[error("{body}")]
    Rejected { status: u16, body: String },
}

/// An email ready to hand to the vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Trait for email vendor implementations
pub trait Mailer: Send + Sync + 'static {
    /// Send `email`, authenticating with `api_key`.
    fn send(
        &self,
        api_key: &str,
        email: &OutgoingEmail,
    ) -> impl std::future::Future<Output = Result<(), MailerError>> + Send;
}

/// Build the relayed email for a validated contact message.
pub fn compose_email(message: &ContactMessage, settings: &MailSettings) -> OutgoingEmail {
    let body = html::escape(&message.message)
        .replace("\r\n", "<br>")
        .replace('\n', "<br>");

    let html = format!(
        "<div style='font-family: Arial, sans-serif; max-width: 600px; margin: auto;'>\
         <h2 style='color: #3b82f6;'>New portfolio message</h2>\
         <p><strong>Name:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Subject:</strong> {}</p>\
         <p><strong>Message:</strong><br>{}</p>\
         </div>",
        html::escape(&message.name),
        html::escape(&message.email),
        html::escape(&message.subject),
        body
    );

    let subject = if settings.subject_prefix.is_empty() {
        message.subject.clone()
    } else {
        format!("{} {}", settings.subject_prefix, message.subject)
    };

    OutgoingEmail {
        from: settings.from.clone(),
        to: settings.to.clone(),
        subject,
        html,
    }
}

/// Resend (`POST /emails`) client.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl ResendMailer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, api_key: &str, email: &OutgoingEmail) -> Result<(), MailerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("unreadable error body: {}", e));

        Err(MailerError::Rejected {
            status: status.as_u16(),
            body: if body.trim().is_empty() {
                format!("Email vendor returned {}", status)
            } else {
                body
            },
        })
    }
}
