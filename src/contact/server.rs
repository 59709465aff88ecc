//! HTTP surface of the contact relay.

use super::mailer::{compose_email, Mailer};
use super::{ContactError, ContactRequest};
use crate::storage::MailSettings;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Shared state of the relay.
pub struct RelayState<M> {
    mailer: Arc<M>,
    settings: Arc<MailSettings>,
}

impl<M> Clone for RelayState<M> {
    fn clone(&self) -> Self {
        Self {
            mailer: Arc::clone(&self.mailer),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<M: Mailer> RelayState<M> {
    pub fn new(mailer: M, settings: MailSettings) -> Self {
        Self {
            mailer: Arc::new(mailer),
            settings: Arc::new(settings),
        }
    }

    /// Vendor API key, read from the environment on every request.
    fn api_key(&self) -> Result<String, ContactError> {
        match std::env::var(&self.settings.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ContactError::MissingApiKey(
                self.settings.api_key_env.clone(),
            )),
        }
    }
}

/// Build the relay router with the contact endpoint at `path`.
pub fn router<M: Mailer>(path: &str, state: RelayState<M>) -> Router {
    Router::new()
        .route(path, post(send_email::<M>))
        .fallback(not_found)
        .with_state(state)
}

/// `POST` handler: validate, check credentials, forward to the vendor.
pub async fn send_email<M: Mailer>(
    State(state): State<RelayState<M>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<Value>, ContactError> {
    let request_id = Uuid::new_v4();

    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(%request_id, "Rejected contact body: {}", rejection.body_text());
        ContactError::InvalidBody(rejection.body_text())
    })?;

    let message = request.validate().map_err(|e| {
        tracing::debug!(%request_id, "Contact validation failed: {}", e);
        e
    })?;

    let api_key = state.api_key().map_err(|e| {
        tracing::error!(%request_id, "{}", e);
        e
    })?;

    let email = compose_email(&message, &state.settings);
    state
        .mailer
        .send(&api_key, &email)
        .await
        .map_err(|e| {
            tracing::warn!(%request_id, "Email vendor failed: {}", e);
            ContactError::Vendor(e.to_string())
        })?;

    tracing::info!(%request_id, "Contact message relayed");
    Ok(Json(json!({ "message": "sent" })))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
